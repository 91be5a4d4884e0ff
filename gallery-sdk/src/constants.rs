// ABOUTME: Centralized constants for the gallery SDK
// ABOUTME: Contains endpoints, environment variable names, timeouts and fixed messages

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Cloudinary endpoints
pub mod urls {
    /// Base URL for the Cloudinary Admin API
    pub const CLOUDINARY_API_BASE: &str = "https://api.cloudinary.com";

    /// Admin API version segment
    pub const API_VERSION: &str = "v1_1";

    /// Shared delivery host for image URLs
    pub const DELIVERY_HOST: &str = "res.cloudinary.com";

    /// URL scheme accepted in CLOUDINARY_URL
    pub const CLOUDINARY_URL_SCHEME: &str = "cloudinary";
}

/// Environment variables read by `CloudinaryConfig::from_env`
pub mod env {
    pub const CLOUD_NAME: &str = "CLOUDINARY_CLOUD_NAME";
    pub const API_KEY: &str = "CLOUDINARY_API_KEY";
    pub const API_SECRET: &str = "CLOUDINARY_API_SECRET";
    pub const CLOUDINARY_URL: &str = "CLOUDINARY_URL";
}

/// Search expression pieces
pub mod search {
    pub const RESOURCE_TYPE: &str = "image";
}

/// Fixed option values for the optimize transformation
pub mod optimize {
    pub const FLAGS: &str = "lossy";
    pub const QUALITY: &str = "auto:good";
}

/// Messages returned to callers
pub mod messages {
    pub const MISSING_TAG: &str = "Missing tag";
    pub const MISSING_PROPERTIES: &str = "Missing properties";
    pub const SOMETHING_WENT_WRONG: &str = "Something went wrong";
}
