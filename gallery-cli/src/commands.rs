// ABOUTME: Command handlers shared by the binary and the integration tests
// ABOUTME: Each handler calls the SDK and returns the rendered output as a string

use anyhow::Result;
use gallery_sdk::{CloudinaryClient, ImageDescriptor, Transformation};

use crate::output::{formatter, Format};

/// How image lists should be rendered
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: Format,
    pub use_color: bool,
    pub pretty: bool,
    pub title: String,
}

impl RenderOptions {
    pub fn render(&self, images: &[ImageDescriptor]) -> Result<String> {
        if images.is_empty() && self.format == Format::Table {
            return Ok("No images found.".to_string());
        }
        formatter(self.format, self.use_color, self.pretty, &self.title).format_images(images)
    }
}

pub async fn search(client: &CloudinaryClient, tag: &str, render: &RenderOptions) -> Result<String> {
    let images = client.search_images(tag).await?;
    log::info!("Found {} images tagged {:?}", images.len(), tag.trim());
    render.render(&images)
}

pub fn transform(
    client: &CloudinaryClient,
    kind: &str,
    params: &[String],
    images: &[ImageDescriptor],
    render: &RenderOptions,
) -> Result<String> {
    let transformation = Transformation::from_positional(kind, params)?;
    let transformed = client.transform_images(&transformation, images)?;
    render.render(&transformed)
}

pub fn image_url(
    client: &CloudinaryClient,
    public_id: &str,
    kind: Option<&str>,
    params: &[String],
) -> Result<String> {
    let transformation = kind
        .map(|kind| Transformation::from_positional(kind, params))
        .transpose()?;
    Ok(client.image_url(public_id, transformation.as_ref()))
}
