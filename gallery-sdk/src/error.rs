// ABOUTME: Error types for the gallery SDK with an opaque client-facing surface
// ABOUTME: Keeps the underlying cause for operator logs while callers only see a fixed message

use http::StatusCode;
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;

use crate::constants::messages;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// Required input was missing or malformed. Raised before any external call.
    #[error("{message}")]
    InvalidArgument { message: Cow<'static, str> },

    /// Every other failure. `cause` is for logs only and is never part of `Display`.
    #[error("{message}")]
    InternalFailure {
        message: Cow<'static, str>,
        cause: Option<BoxError>,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// What an HTTP layer sends back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: String,
}

impl GalleryError {
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        GalleryError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Logs `cause` under `context` and hides it behind the generic failure message.
    pub fn internal(context: &str, cause: impl Into<BoxError>) -> Self {
        let cause = cause.into();
        log::error!("{context}: {cause}");
        GalleryError::InternalFailure {
            message: Cow::Borrowed(messages::SOMETHING_WENT_WRONG),
            cause: Some(cause),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            // Missing input maps to 404, matching the handler's historical contract
            GalleryError::InvalidArgument { .. } => StatusCode::NOT_FOUND,
            GalleryError::InternalFailure { .. } | GalleryError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            GalleryError::InternalFailure { cause, .. } => cause.as_deref(),
            _ => None,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            status: self.status_code().as_u16(),
            message: self.to_string(),
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            GalleryError::InvalidArgument { .. } => {
                Some("Check the tag or the transformation parameters and try again")
            }
            GalleryError::Configuration(_) => Some(
                "Set CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET,\nor CLOUDINARY_URL=cloudinary://<api_key>:<api_secret>@<cloud_name>",
            ),
            GalleryError::InternalFailure { .. } => None,
        }
    }
}

/// Failures of the external image index. These never reach callers directly;
/// search wraps them into [`GalleryError::InternalFailure`].
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Authentication failed. Check the Cloudinary API key and secret")]
    Auth,

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Search request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: search request took too long to complete")]
    Timeout,

    #[error("Invalid search response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for IndexError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IndexError::Timeout
        } else if err.is_decode() {
            IndexError::InvalidResponse(err.to_string())
        } else {
            IndexError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        IndexError::InvalidResponse(err.to_string())
    }
}
