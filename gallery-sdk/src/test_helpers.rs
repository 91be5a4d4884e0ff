// ABOUTME: Test helper utilities for mocking the Cloudinary search API and image index
// ABOUTME: Provides mockito servers, canned responses, a stub index and sample descriptors

use async_trait::async_trait;
use mockito::{Server, ServerGuard};
use secrecy::SecretString;
use serde_json::json;
use std::sync::Mutex;

use crate::delivery::DeliveryUrlBuilder;
use crate::error::IndexError;
use crate::index::ImageIndex;
use crate::types::{ImageDescriptor, SearchResponse};
use crate::CloudinaryClient;

pub async fn mock_cloudinary_server() -> ServerGuard {
    Server::new_async().await
}

/// Client for cloud `demo` with credentials `key:secret`, searching against `base_url`
pub fn test_client(base_url: &str) -> CloudinaryClient {
    CloudinaryClient::builder()
        .cloud_name("demo")
        .api_key(SecretString::new("key".to_string().into_boxed_str()))
        .api_secret(SecretString::new("secret".to_string().into_boxed_str()))
        .api_base_url(Some(base_url.to_string()))
        .build()
        .unwrap()
}

pub fn test_delivery() -> DeliveryUrlBuilder {
    DeliveryUrlBuilder::new("demo", true)
}

pub fn sample_images() -> Vec<ImageDescriptor> {
    let mut tagged = ImageDescriptor::new("c.png", "travel/p3", "https://cdn/p3.png", "travel");
    tagged.extra.insert("alt".to_string(), json!("Harbour at dusk"));

    vec![
        ImageDescriptor::new("a.jpg", "p1", "https://cdn/p1.jpg", "landscape"),
        ImageDescriptor::new("b.jpg", "p2", "https://cdn/p2.jpg", "portraits"),
        tagged,
    ]
}

pub fn mock_search_response() -> serde_json::Value {
    json!({
        "total_count": 2,
        "time": 9,
        "resources": [
            {
                "asset_id": "0c8a0f6b",
                "public_id": "p1",
                "folder": "photos/landscape",
                "filename": "a.jpg",
                "format": "jpg",
                "resource_type": "image",
                "type": "upload",
                "created_at": "2023-03-01T10:00:00+00:00",
                "bytes": 120453,
                "width": 1600,
                "height": 900,
                "url": "https://cdn/p1.jpg",
                "secure_url": "https://cdn/p1.jpg",
                "tags": ["sunset"]
            },
            {
                "public_id": "photos/p2",
                "folder": "photos",
                "filename": "b.jpg",
                "url": "https://cdn/p2.jpg",
                "tags": ["sunset", "beach"]
            }
        ]
    })
}

pub fn mock_empty_search_response() -> serde_json::Value {
    json!({
        "total_count": 0,
        "time": 3,
        "resources": []
    })
}

/// In-memory index recording every expression it is asked for
pub struct StubIndex {
    response: Option<SearchResponse>,
    failure: Mutex<Option<IndexError>>,
    expressions: Mutex<Vec<String>>,
}

impl StubIndex {
    pub fn returning(response: SearchResponse) -> Self {
        Self {
            response: Some(response),
            failure: Mutex::new(None),
            expressions: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: IndexError) -> Self {
        Self {
            response: None,
            failure: Mutex::new(Some(error)),
            expressions: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.expressions.lock().unwrap().len()
    }

    pub fn expressions(&self) -> Vec<String> {
        self.expressions.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageIndex for StubIndex {
    async fn search(&self, expression: &str) -> Result<SearchResponse, IndexError> {
        self.expressions
            .lock()
            .unwrap()
            .push(expression.to_string());

        if let Some(error) = self.failure.lock().unwrap().take() {
            return Err(error);
        }

        self.response
            .clone()
            .ok_or_else(|| IndexError::InvalidResponse("stub index exhausted".to_string()))
    }
}
