use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by `CatApi`
///
/// Payloads are kept as strings so the error can travel inside iced
/// messages, which must be `Clone`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Connection, TLS or body read failure
    #[error("{0}")]
    Transport(String),
    /// The server answered with a non-success status
    #[error("HTTP error! status: {}", .0.as_u16())]
    Status(StatusCode),
    /// The body was not the JSON we expected
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_matches_alert_text() {
        let err = ApiError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[test]
    fn test_decode_error_conversion() {
        let err: ApiError = serde_json::from_str::<Vec<u32>>("{").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
