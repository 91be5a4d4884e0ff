// ABOUTME: Builder and environment loading for CloudinaryClient configuration
// ABOUTME: Holds credentials as secrets and validates them before a client is constructed

use crate::CloudinaryClient;
use crate::constants::{env, timeouts, urls};
use crate::error::GalleryError;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use typed_builder::TypedBuilder;
use url::Url;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<CloudinaryClient, GalleryError>))]
pub struct CloudinaryConfig {
    #[builder(setter(into))]
    pub cloud_name: String,

    pub api_key: SecretString,

    pub api_secret: SecretString,

    #[builder(default = true)]
    pub secure: bool,

    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    #[builder(default = None)]
    pub api_base_url: Option<String>,

    #[builder(default = None)]
    pub delivery_host: Option<String>,
}

impl From<CloudinaryConfig> for Result<CloudinaryClient, GalleryError> {
    fn from(config: CloudinaryConfig) -> Self {
        CloudinaryClient::from_config(config)
    }
}

impl CloudinaryClient {
    pub fn builder() -> CloudinaryConfigBuilder<((), (), (), (), (), (), ())> {
        CloudinaryConfig::builder()
    }
}

impl CloudinaryConfig {
    /// Reads the three `CLOUDINARY_*` credentials, falling back to
    /// `CLOUDINARY_URL=cloudinary://<key>:<secret>@<cloud_name>`.
    pub fn from_env() -> Result<Self, GalleryError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, GalleryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let (Some(cloud_name), Some(api_key), Some(api_secret)) = (
            var(env::CLOUD_NAME),
            var(env::API_KEY),
            var(env::API_SECRET),
        ) {
            return Ok(Self::with_credentials(cloud_name, api_key, api_secret));
        }

        match var(env::CLOUDINARY_URL) {
            Some(url) => Self::from_cloudinary_url(&url),
            None => Err(GalleryError::Configuration(format!(
                "{}, {} and {} (or {}) must be set",
                env::CLOUD_NAME,
                env::API_KEY,
                env::API_SECRET,
                env::CLOUDINARY_URL
            ))),
        }
    }

    pub fn from_cloudinary_url(value: &str) -> Result<Self, GalleryError> {
        let parsed = Url::parse(value)
            .map_err(|e| GalleryError::Configuration(format!("Invalid CLOUDINARY_URL: {e}")))?;

        if parsed.scheme() != urls::CLOUDINARY_URL_SCHEME {
            return Err(GalleryError::Configuration(format!(
                "Invalid CLOUDINARY_URL scheme '{}', expected '{}'",
                parsed.scheme(),
                urls::CLOUDINARY_URL_SCHEME
            )));
        }

        let cloud_name = parsed.host_str().unwrap_or_default();
        let api_key = parsed.username();
        let api_secret = parsed.password().unwrap_or_default();

        if cloud_name.is_empty() || api_key.is_empty() || api_secret.is_empty() {
            return Err(GalleryError::Configuration(
                "CLOUDINARY_URL must look like cloudinary://<api_key>:<api_secret>@<cloud_name>"
                    .to_string(),
            ));
        }

        Ok(Self::with_credentials(
            cloud_name.to_string(),
            api_key.to_string(),
            api_secret.to_string(),
        ))
    }

    fn with_credentials(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            cloud_name,
            api_key: SecretString::new(api_key.into_boxed_str()),
            api_secret: SecretString::new(api_secret.into_boxed_str()),
            secure: true,
            timeout: timeouts::HTTP_REQUEST_TIMEOUT,
            api_base_url: None,
            delivery_host: None,
        }
    }

    pub fn validate(&self) -> Result<(), GalleryError> {
        if self.cloud_name.trim().is_empty() {
            return Err(GalleryError::Configuration(
                "Cloud name must not be empty".to_string(),
            ));
        }
        if self.api_key.expose_secret().is_empty() || self.api_secret.expose_secret().is_empty() {
            return Err(GalleryError::Configuration(
                "API key and secret must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// `{api_base}/v1_1/{cloud_name}/resources/search`
    pub fn search_url(&self) -> Result<Url, GalleryError> {
        let base = self
            .api_base_url
            .as_deref()
            .unwrap_or(urls::CLOUDINARY_API_BASE);

        let base = Url::parse(base)
            .map_err(|e| GalleryError::Configuration(format!("Invalid API base URL: {e}")))?;

        let path = format!(
            "{}/{}/{}/resources/search",
            base.path().trim_end_matches('/'),
            urls::API_VERSION,
            self.cloud_name
        );

        let mut url = base;
        url.set_path(&path);
        Ok(url)
    }
}
