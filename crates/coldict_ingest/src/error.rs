//! Error types for catalog ingestion.

use coldict_core::CoreError;
use thiserror::Error;

/// Result type for ingestion.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can occur while ingesting from the catalog.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The catalog answered with a non-success status.
    #[error("catalog returned status {status} for {url}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Requested url.
        url: String,
    },

    /// A response body or configuration file was not the expected JSON.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Invalid settings.
    #[error("configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// A url could not be parsed or joined.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// A catalog record could not be normalized, or the dictionary failed.
    #[error("record error: {0}")]
    Record(#[from] CoreError),

    /// I/O error reading a configuration file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        assert_eq!(
            IngestError::config("missing token").to_string(),
            "configuration error: missing token"
        );
    }

    #[test]
    fn status_display_names_url() {
        let err = IngestError::Status {
            status: 404,
            url: "https://catalog.example.com/x".into(),
        };
        assert_eq!(
            err.to_string(),
            "catalog returned status 404 for https://catalog.example.com/x"
        );
    }
}
