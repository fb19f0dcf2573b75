//! Chart updater error types

use thiserror::Error;

/// Errors that can occur while fetching or applying chart data
#[derive(Error, Debug)]
pub enum ChartError {
    /// Selection value is not a server id
    #[error("Invalid server id: {0:?}")]
    InvalidServerId(String),

    /// Request could not be sent or the connection failed
    #[error("Network error: {0}")]
    Network(String),

    /// Endpoint answered with a non-success status
    #[error("Unexpected status {0}")]
    Status(u16),

    /// Body is not `{labels, data}` JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Charting backend rejected the chart or update
    #[error("Chart backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Decode(err.to_string())
    }
}

#[cfg(feature = "cli")]
impl From<reqwest::Error> for ChartError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ChartError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ChartError::Status(status.as_u16())
        } else {
            ChartError::Network(err.to_string())
        }
    }
}

/// Result type alias for chart operations
pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChartError::InvalidServerId("abc".to_string());
        assert_eq!(err.to_string(), "Invalid server id: \"abc\"");

        let err = ChartError::Status(404);
        assert_eq!(err.to_string(), "Unexpected status 404");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ChartError = json_err.into();
        assert!(matches!(err, ChartError::Decode(_)));
    }
}
