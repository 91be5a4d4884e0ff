// ABOUTME: This module handles output formatting for image descriptor lists
// ABOUTME: It provides table, JSON and HTML formatters behind one trait

use anyhow::Result;
use gallery_sdk::ImageDescriptor;
use owo_colors::OwoColorize;
use serde::Deserialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::constants::ui;
use crate::markup;

pub trait OutputFormat {
    fn format_images(&self, images: &[ImageDescriptor]) -> Result<String>;
}

/// Output formats selectable from the command line or config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Table,
    Json,
    Html,
}

pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn truncate(text: &str, max_len: usize) -> String {
        if text.chars().count() <= max_len {
            text.to_string()
        } else {
            let kept: String = text.chars().take(max_len - 3).collect();
            format!("{}...", kept)
        }
    }

    fn format_category(&self, category: &str) -> String {
        let text = if category.is_empty() {
            ui::UNCATEGORIZED
        } else {
            category
        };

        if !self.use_color {
            text.to_string()
        } else if category.is_empty() {
            text.dimmed().to_string()
        } else {
            text.cyan().to_string()
        }
    }
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Public ID")]
    public_id: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Link")]
    link: String,
}

impl OutputFormat for TableFormatter {
    fn format_images(&self, images: &[ImageDescriptor]) -> Result<String> {
        let rows: Vec<TableRow> = images
            .iter()
            .map(|image| TableRow {
                name: image.name.clone(),
                public_id: image.public_id.clone(),
                category: self.format_category(&image.category),
                link: Self::truncate(&image.link, ui::MAX_LINK_WIDTH),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::psql());
        Ok(table.to_string())
    }
}

pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormat for JsonFormatter {
    fn format_images(&self, images: &[ImageDescriptor]) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(images)?)
        } else {
            Ok(serde_json::to_string(images)?)
        }
    }
}

pub struct HtmlFormatter {
    title: String,
}

impl HtmlFormatter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl OutputFormat for HtmlFormatter {
    fn format_images(&self, images: &[ImageDescriptor]) -> Result<String> {
        Ok(markup::render_page(&self.title, images))
    }
}

/// Picks the formatter for `format`
pub fn formatter(
    format: Format,
    use_color: bool,
    pretty: bool,
    title: &str,
) -> Box<dyn OutputFormat> {
    match format {
        Format::Table => Box::new(TableFormatter::new(use_color)),
        Format::Json => Box::new(JsonFormatter::new(pretty)),
        Format::Html => Box::new(HtmlFormatter::new(title)),
    }
}
