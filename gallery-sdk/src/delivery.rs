// ABOUTME: Delivery URL construction for images stored on the CDN
// ABOUTME: Maps a public id plus transform options to a fetchable URL without any network call

use crate::constants::urls;
use crate::transform::TransformOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryUrlBuilder {
    cloud_name: String,
    secure: bool,
    host: String,
}

impl DeliveryUrlBuilder {
    pub fn new(cloud_name: impl Into<String>, secure: bool) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            secure,
            host: urls::DELIVERY_HOST.to_string(),
        }
    }

    /// Use a custom delivery host (private CDN or CNAME)
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn cloud_name(&self) -> &str {
        &self.cloud_name
    }

    /// `{scheme}://{host}/{cloud}/image/upload[/{transformation}][/v1]/{public_id}[.{format}]`
    pub fn url(&self, public_id: &str, options: &TransformOptions) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        let mut url = format!("{scheme}://{}/{}/image/upload", self.host, self.cloud_name);

        let transformation = options.transformation_string();
        if !transformation.is_empty() {
            url.push('/');
            url.push_str(&transformation);
        }

        if needs_default_version(public_id) {
            url.push_str("/v1");
        }

        url.push('/');
        url.push_str(&escape_public_id(public_id));

        if let Some(format) = &options.format {
            url.push('.');
            url.push_str(format);
        }

        url
    }
}

/// Assets inside folders are addressed with a version segment so the
/// folder name cannot be read as a transformation.
fn needs_default_version(public_id: &str) -> bool {
    public_id.contains('/')
        && !starts_with_version(public_id)
        && !public_id.starts_with("http://")
        && !public_id.starts_with("https://")
}

fn starts_with_version(public_id: &str) -> bool {
    public_id
        .strip_prefix('v')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

/// Percent-encodes each path segment; `/` separators are kept
fn escape_public_id(public_id: &str) -> String {
    public_id
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/")
}
