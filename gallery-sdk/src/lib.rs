// ABOUTME: Gallery SDK library wrapping the Cloudinary API for tag search and URL transformations
// ABOUTME: Exposes an explicitly configured client plus the descriptor, transform and error types

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use url::Url;

pub mod builder;
pub mod constants;
pub mod delivery;
pub mod error;
pub mod index;
pub mod search;
pub mod transform;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use builder::CloudinaryConfig;
pub use delivery::DeliveryUrlBuilder;
pub use error::{ErrorBody, GalleryError, IndexError};
pub use index::ImageIndex;
pub use transform::{CropMode, TransformKind, TransformOptions, Transformation};
pub use types::{ImageDescriptor, Resource, SearchResponse};

pub type Result<T, E = GalleryError> = std::result::Result<T, E>;

/// Client for one Cloudinary cloud. Cheap to clone and safe to share between
/// concurrent calls; it holds no mutable state.
#[derive(Clone)]
pub struct CloudinaryClient {
    client: reqwest::Client,
    search_url: Url,
    api_key: SecretString,
    api_secret: SecretString,
    delivery: DeliveryUrlBuilder,
}

#[derive(Serialize)]
struct SearchRequest<'a> {
    expression: &'a str,
}

impl CloudinaryClient {
    pub fn from_config(config: CloudinaryConfig) -> Result<Self> {
        config.validate()?;
        let search_url = config.search_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("gallery-sdk/", env!("CARGO_PKG_VERSION"))),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| GalleryError::Configuration(format!("Failed to build HTTP client: {e}")))?;

        let mut delivery = DeliveryUrlBuilder::new(config.cloud_name, config.secure);
        if let Some(host) = config.delivery_host {
            delivery = delivery.with_host(host);
        }

        Ok(Self {
            client,
            search_url,
            api_key: config.api_key,
            api_secret: config.api_secret,
            delivery,
        })
    }

    /// Builds a client from `CLOUDINARY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_config(CloudinaryConfig::from_env()?)
    }

    pub fn cloud_name(&self) -> &str {
        self.delivery.cloud_name()
    }

    pub async fn search_images(&self, tag: &str) -> Result<Vec<ImageDescriptor>> {
        search::search_images(self, tag).await
    }

    pub fn transform_images(
        &self,
        transformation: &Transformation,
        images: &[ImageDescriptor],
    ) -> Result<Vec<ImageDescriptor>> {
        transform::transform_images(&self.delivery, transformation, images)
    }

    /// Delivery URL for a single asset
    pub fn image_url(&self, public_id: &str, transformation: Option<&Transformation>) -> String {
        let options = transformation.map(Transformation::options).unwrap_or_default();
        self.delivery.url(public_id, &options)
    }
}

#[async_trait]
impl ImageIndex for CloudinaryClient {
    async fn search(&self, expression: &str) -> Result<SearchResponse, IndexError> {
        let response = self
            .client
            .post(self.search_url.clone())
            .basic_auth(
                self.api_key.expose_secret(),
                Some(self.api_secret.expose_secret()),
            )
            .json(&SearchRequest { expression })
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Err(IndexError::Auth),
            StatusCode::TOO_MANY_REQUESTS => return Err(IndexError::RateLimit),
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                return Err(IndexError::Status {
                    status: s.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{
        mock_cloudinary_server, mock_empty_search_response, mock_search_response, test_client,
    };
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;
    use tokio::net::TcpListener;

    const SEARCH_PATH: &str = "/v1_1/demo/resources/search";

    #[tokio::test]
    async fn test_search_images_against_mock_server() {
        let mut server = mock_cloudinary_server().await;
        let mock = server
            .mock("POST", SEARCH_PATH)
            .match_header("authorization", "Basic a2V5OnNlY3JldA==")
            .match_body(Matcher::Json(json!({
                "expression": "resource_type:image AND tags=sunset"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(mock_search_response().to_string())
            .create_async()
            .await;

        let client = test_client(&server.url());
        let images = client.search_images("sunset").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            images,
            vec![
                ImageDescriptor::new("a.jpg", "p1", "https://cdn/p1.jpg", "landscape"),
                ImageDescriptor::new("b.jpg", "photos/p2", "https://cdn/p2.jpg", "photos"),
            ]
        );
    }

    #[tokio::test]
    async fn test_search_images_empty_result() {
        let mut server = mock_cloudinary_server().await;
        let mock = server
            .mock("POST", SEARCH_PATH)
            .with_status(200)
            .with_body(mock_empty_search_response().to_string())
            .create_async()
            .await;

        let client = test_client(&server.url());
        let images = client.search_images("nothing-here").await.unwrap();

        mock.assert_async().await;
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_empty_tag_never_reaches_server() {
        let mut server = mock_cloudinary_server().await;
        let mock = server
            .mock("POST", SEARCH_PATH)
            .expect(0)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let err = client.search_images("").await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, GalleryError::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_search_maps_failures_to_internal() {
        for (status, body) in [
            (401, r#"{"error":{"message":"Invalid credentials"}}"#),
            (429, r#"{"error":{"message":"Rate Limit Exceeded"}}"#),
            (500, "upstream exploded"),
            (200, r#"{"unexpected": true}"#),
        ] {
            let mut server = mock_cloudinary_server().await;
            let mock = server
                .mock("POST", SEARCH_PATH)
                .with_status(status)
                .with_body(body)
                .create_async()
                .await;

            let client = test_client(&server.url());
            let err = client.search_images("sunset").await.unwrap_err();

            mock.assert_async().await;
            assert!(matches!(err, GalleryError::InternalFailure { .. }));
            assert_eq!(err.to_string(), "Something went wrong");
            assert_eq!(err.status_code().as_u16(), 500);
        }
    }

    #[tokio::test]
    async fn test_index_reports_specific_causes() {
        let mut server = mock_cloudinary_server().await;
        let _mock = server
            .mock("POST", SEARCH_PATH)
            .with_status(401)
            .create_async()
            .await;

        let client = test_client(&server.url());
        let result = ImageIndex::search(&client, "resource_type:image AND tags=x").await;

        assert!(matches!(result, Err(IndexError::Auth)));
    }

    fn client_with_timeout(base_url: &str, timeout: Duration) -> CloudinaryClient {
        CloudinaryClient::builder()
            .cloud_name("demo")
            .api_key(SecretString::new("key".to_string().into_boxed_str()))
            .api_secret(SecretString::new("secret".to_string().into_boxed_str()))
            .api_base_url(Some(base_url.to_string()))
            .timeout(timeout)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_timeout_is_internal_failure() {
        // Accepts connections and never answers
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });

        let client = client_with_timeout(&base_url, Duration::from_millis(100));

        let cause = ImageIndex::search(&client, "resource_type:image AND tags=x").await;
        assert!(matches!(cause, Err(IndexError::Timeout)));

        let err = client.search_images("sunset").await.unwrap_err();
        assert!(matches!(err, GalleryError::InternalFailure { .. }));
        assert_eq!(err.to_string(), "Something went wrong");
        assert!(matches!(
            err.cause().and_then(|c| c.downcast_ref::<IndexError>()),
            Some(IndexError::Timeout)
        ));

        server.abort();
    }

    #[tokio::test]
    async fn test_search_connection_refused_is_internal_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_with_timeout(&format!("http://{addr}"), Duration::from_secs(5));

        let cause = ImageIndex::search(&client, "resource_type:image AND tags=x").await;
        assert!(matches!(cause, Err(IndexError::Network(_))));

        let err = client.search_images("sunset").await.unwrap_err();
        assert!(matches!(err, GalleryError::InternalFailure { .. }));
        assert_eq!(err.to_string(), "Something went wrong");
        assert_eq!(err.to_body().status, 500);
    }

    #[test]
    fn test_transform_images_through_client() {
        let client = test_client("http://127.0.0.1:1");
        let images = vec![ImageDescriptor::new("a.jpg", "p1", "https://cdn/p1.jpg", "landscape")];
        let transformation =
            Transformation::from_positional("resizeImages", &["200", "fill"]).unwrap();

        let out = client.transform_images(&transformation, &images).unwrap();

        assert_eq!(
            out,
            vec![ImageDescriptor::new(
                "a.jpg",
                "p1",
                "https://res.cloudinary.com/demo/image/upload/c_fill,w_200/p1",
                "landscape"
            )]
        );
    }

    #[test]
    fn test_image_url() {
        let client = test_client("http://127.0.0.1:1");
        assert_eq!(
            client.image_url("p1", None),
            "https://res.cloudinary.com/demo/image/upload/p1"
        );
        assert_eq!(
            client.image_url(
                "p1",
                Some(&Transformation::Optimize {
                    format: "avif".to_string()
                })
            ),
            "https://res.cloudinary.com/demo/image/upload/fl_lossy,q_auto:good/p1.avif"
        );
        assert_eq!(client.cloud_name(), "demo");
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api() {
        let client = CloudinaryClient::from_env()
            .expect("CLOUDINARY_* variables must be set for integration tests");
        let result = client.search_images("sample").await;

        assert!(result.is_ok(), "Search should succeed with valid credentials");
    }
}
