// ABOUTME: Tag search over the image index, normalized into image descriptors
// ABOUTME: Validates the tag before any external call and hides index failures behind one error

use crate::constants::messages;
use crate::error::GalleryError;
use crate::index::{tag_expression, ImageIndex};
use crate::types::ImageDescriptor;

/// Searches `index` for images carrying `tag`.
///
/// Results keep the order the index returns them in. Any index failure is
/// logged and reported as [`GalleryError::InternalFailure`].
pub async fn search_images<I>(index: &I, tag: &str) -> Result<Vec<ImageDescriptor>, GalleryError>
where
    I: ImageIndex + ?Sized,
{
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(GalleryError::invalid_argument(messages::MISSING_TAG));
    }

    let expression = tag_expression(tag);
    log::debug!("Searching image index: {expression}");

    let response = index
        .search(&expression)
        .await
        .map_err(|err| GalleryError::internal("image search failed", err))?;

    log::debug!(
        "Image index returned {} of {} resources",
        response.resources.len(),
        response.total_count
    );

    Ok(response
        .resources
        .into_iter()
        .map(ImageDescriptor::from)
        .collect())
}
