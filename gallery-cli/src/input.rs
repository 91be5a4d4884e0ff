// ABOUTME: Reads image descriptor lists for the transform command
// ABOUTME: Accepts a JSON array from a file or from stdin

use anyhow::{Context, Result};
use gallery_sdk::ImageDescriptor;
use std::io::Read;
use std::path::Path;

/// Parse descriptors from any reader. Blank input is an empty list.
pub fn read_descriptors<R: Read>(mut reader: R) -> Result<Vec<ImageDescriptor>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("Failed to read image descriptors")?;

    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str(&content)
        .context("Image descriptors must be a JSON array of {name, publicId, link, category}")
}

/// Load descriptors from `path`, or from stdin when no path is given
pub fn load_descriptors(path: Option<&Path>) -> Result<Vec<ImageDescriptor>> {
    match path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open input file: {}", path.display()))?;
            read_descriptors(file)
        }
        None => {
            log::debug!("Reading image descriptors from stdin");
            read_descriptors(std::io::stdin().lock())
        }
    }
}
