//! Error types for Colligo operations.
//!
//! This module defines the main error type [`ColligoError`] which represents
//! all possible errors that can occur while scraping collection pages,
//! talking to the asset API, assembling documents, and writing packages.
//!
//! # Example
//!
//! ```rust
//! use colligo_core::{ColligoError, Result};
//!
//! fn collection_key(html: &str) -> Result<String> {
//!     if html.is_empty() {
//!         return Err(ColligoError::MissingCollectionKey);
//!     }
//!     // ... scraping logic
//!     # Ok(String::new())
//! }
//! ```

use thiserror::Error;

/// Main error type for import operations.
///
/// This enum represents all possible errors that can occur during page
/// scraping, asset-metadata fetching, slideshow/PDF assembly, and
/// channel-package writing.
#[derive(Error, Debug)]
pub enum ColligoError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Unexpected HTTP status from the origin site.
    #[error("HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when HTML cannot be parsed, often due to malformed markup
    /// or invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// The collection page carries no `resource_key` in its inline source
    /// script, so its asset API cannot be addressed.
    #[error("Collection page has no resource key")]
    MissingCollectionKey,

    /// JSON decoding errors from embedded page props or API responses.
    #[error("Failed to decode JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The API answered with JSON that is missing a required part.
    #[error("Unexpected API payload: {0}")]
    UnexpectedPayload(String),

    /// Image decoding or encoding errors.
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    /// PDF assembly errors.
    #[error("PDF error: {0}")]
    PdfError(#[from] lopdf::Error),

    /// File I/O errors.
    ///
    /// Wraps standard I/O errors for file operations.
    #[error("Failed to write to file: {0}")]
    WriteError(#[from] std::io::Error),

    /// The assembled channel tree failed validation.
    #[error("Invalid channel: {0}")]
    InvalidChannel(String),
}

impl ColligoError {
    /// Whether the error is transient and the request worth retrying.
    ///
    /// Timeouts, connection failures, and server-side 5xx/429 statuses are
    /// transient; everything else (parse errors, 4xx statuses, local I/O)
    /// is permanent.
    pub fn is_transient(&self) -> bool {
        match self {
            ColligoError::HttpError(e) => e.is_timeout() || e.is_connect(),
            ColligoError::Timeout { .. } => true,
            ColligoError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}

/// Result type alias for ColligoError.
///
/// This is a convenience alias for `std::result::Result<T, ColligoError>`.
pub type Result<T> = std::result::Result<T, ColligoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ColligoError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_timeout_error() {
        let err = ColligoError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_invalid_channel_error() {
        let err = ColligoError::InvalidChannel("channel has no children".to_string());
        assert!(err.to_string().contains("no children"));
    }

    #[test]
    fn test_transient_classification() {
        assert!(ColligoError::Timeout { timeout: 10 }.is_transient());
        assert!(ColligoError::HttpStatus { status: 503, url: "https://example.com".to_string() }.is_transient());
        assert!(ColligoError::HttpStatus { status: 429, url: "https://example.com".to_string() }.is_transient());
        assert!(!ColligoError::HttpStatus { status: 404, url: "https://example.com".to_string() }.is_transient());
        assert!(!ColligoError::MissingCollectionKey.is_transient());
    }
}
