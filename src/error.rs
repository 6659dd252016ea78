//! Error types for TeamCity API operations.

use thiserror::Error;

/// Errors that can occur while configuring or using the TeamCity client.
#[derive(Debug, Error)]
pub enum TeamCityError {
    /// Local configuration is missing or invalid. Raised before any network call.
    #[error("TeamCity configuration error: {0}")]
    Configuration(String),

    /// Network, TLS, DNS or timeout failure, surfaced as reported by the transport.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status this call does not accept.
    ///
    /// `status` is the full status line (e.g. `500 Internal Server Error`),
    /// `body` the raw response text.
    #[error("API error {status}: {body}")]
    Api { status: String, body: String },

    /// A request path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TeamCityError {
    /// HTTP status code of an [`TeamCityError::Api`] error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => status.split_whitespace().next()?.parse().ok(),
            _ => None,
        }
    }
}

/// Result type alias for TeamCity operations.
pub type Result<T> = core::result::Result<T, TeamCityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_carries_status_and_body() {
        let err = TeamCityError::Api {
            status: "500 Internal Server Error".to_string(),
            body: "boom".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("boom"));
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_status_code_absent_for_other_errors() {
        let err = TeamCityError::Configuration("address is required".to_string());
        assert_eq!(err.status_code(), None);
    }
}
