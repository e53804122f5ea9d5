//! Error types for brief-api

use thiserror::Error;

/// Result type alias using brief-api Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when talking to the intake service
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be sent or the connection failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON shape
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Base URL could not be used
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),
}

impl Error {
    /// Create a status error from a code and response body
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// Whether the service was reached at all
    pub fn is_protocol(&self) -> bool {
        matches!(self, Error::Status { .. } | Error::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_includes_code_and_body() {
        let e = Error::status(404, "Conversation not found");
        assert_eq!(e.to_string(), "Service returned 404: Conversation not found");
    }

    #[test]
    fn test_protocol_errors() {
        assert!(Error::status(500, "").is_protocol());
        let decode = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(Error::Decode(decode).is_protocol());
        assert!(!Error::InvalidUrl("nope".into()).is_protocol());
    }
}
