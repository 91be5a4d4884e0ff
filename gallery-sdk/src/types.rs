// ABOUTME: Data model shared by search and transform: raw index resources and image descriptors
// ABOUTME: Normalizes Cloudinary search hits into the descriptor shape the frontend renders

use serde::{Deserialize, Serialize};

/// The unit of data handed to callers. Serialized with camelCase keys.
///
/// Unknown keys on input are kept in `extra` and written back out, so a
/// transform round-trip only ever changes `link`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDescriptor {
    #[serde(default)]
    pub name: String,
    pub public_id: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub category: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ImageDescriptor {
    pub fn new(
        name: impl Into<String>,
        public_id: impl Into<String>,
        link: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            public_id: public_id.into(),
            link: link.into(),
            category: category.into(),
            extra: serde_json::Map::new(),
        }
    }

    /// Copy of this descriptor pointing at a different URL
    pub fn with_link(&self, link: String) -> Self {
        Self {
            link,
            ..self.clone()
        }
    }
}

/// A stored asset as returned by the search API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub public_id: String,
    pub filename: String,
    #[serde(default)]
    pub folder: String,
    pub url: String,
    #[serde(default)]
    pub secure_url: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub bytes: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_count: u64,
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Last `/`-delimited segment of a folder path. Root assets get an empty category.
pub fn category_from_folder(folder: &str) -> &str {
    folder.rsplit('/').next().unwrap_or_default()
}

impl From<Resource> for ImageDescriptor {
    fn from(resource: Resource) -> Self {
        let category = category_from_folder(&resource.folder).to_string();
        ImageDescriptor::new(resource.filename, resource.public_id, resource.url, category)
    }
}
