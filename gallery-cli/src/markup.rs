// ABOUTME: Static HTML components for the gallery page: footer, navbar items and the page shell
// ABOUTME: Stateless render functions over explicit inputs; they never call the image handler

use gallery_sdk::ImageDescriptor;
use std::collections::BTreeSet;
use std::fmt::Write;

use crate::constants::{self, markup, ui};

/// Copyright footer. `class_name` replaces the default container class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Footer {
    pub class_name: Option<String>,
}

impl Footer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
        }
    }

    pub fn render(&self) -> String {
        let class = self
            .class_name
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(markup::FOOTER_CLASS);

        format!(
            r#"<div class="{}"><span>{}</span></div>"#,
            escape_html(class),
            escape_html(markup::FOOTER_TEXT)
        )
    }
}

/// A list item pairing an icon with a label. `on_modal` only switches the class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavbarItem {
    pub icon_name: String,
    pub title: String,
    pub on_modal: bool,
}

impl NavbarItem {
    pub fn new(icon_name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            icon_name: icon_name.into(),
            title: title.into(),
            on_modal: false,
        }
    }

    pub fn modal(mut self, on_modal: bool) -> Self {
        self.on_modal = on_modal;
        self
    }

    pub fn render(&self) -> String {
        let class = if self.on_modal {
            markup::NAVBAR_ITEM_MODAL_CLASS
        } else {
            markup::NAVBAR_ITEM_CLASS
        };

        format!(
            r#"<li class="{class}"><i class="fa-solid fa-{}"></i><span>{}</span></li>"#,
            escape_html(&self.icon_name),
            escape_html(&self.title)
        )
    }
}

/// Full gallery page: one navbar item per category, one figure per image, footer.
pub fn render_page(title: &str, images: &[ImageDescriptor]) -> String {
    let categories: BTreeSet<&str> = images.iter().map(category_label).collect();

    let mut html = String::new();
    let _ = writeln!(html, "<!DOCTYPE html>");
    let _ = writeln!(html, r#"<html lang="en">"#);
    let _ = writeln!(
        html,
        r#"<head><meta charset="utf-8"><title>{}</title></head>"#,
        escape_html(title)
    );
    let _ = writeln!(html, "<body>");

    let _ = writeln!(html, r#"<nav><ul class="navbar">"#);
    for category in &categories {
        let item = NavbarItem::new(constants::icon_for_category(category), *category);
        let _ = writeln!(html, "{}", item.render());
    }
    let _ = writeln!(html, "</ul></nav>");

    let _ = writeln!(html, r#"<main class="gallery">"#);
    for image in images {
        let _ = writeln!(
            html,
            r#"<figure data-public-id="{}" data-category="{}"><img src="{}" alt="{}"><figcaption>{}</figcaption></figure>"#,
            escape_html(&image.public_id),
            escape_html(category_label(image)),
            escape_html(&image.link),
            escape_html(&image.name),
            escape_html(&image.name)
        );
    }
    let _ = writeln!(html, "</main>");

    let _ = writeln!(html, "{}", Footer::new().render());
    let _ = writeln!(html, "</body>");
    let _ = write!(html, "</html>");
    html
}

fn category_label(image: &ImageDescriptor) -> &str {
    if image.category.is_empty() {
        ui::UNCATEGORIZED
    } else {
        &image.category
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
