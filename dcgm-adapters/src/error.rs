//! Error types for adapters.

use thiserror::Error;

/// Errors that can occur when scraping a monitoring agent.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Endpoint answered with a non-success status.
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    /// Failed to read the response body.
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,
}

#[cfg(feature = "exporter")]
impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AdapterError::Timeout
        } else if err.is_connect() {
            AdapterError::Connection(err.to_string())
        } else {
            AdapterError::Http(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message() {
        let err = AdapterError::Status {
            endpoint: "http://localhost:9400/metrics".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "http://localhost:9400/metrics returned status 503"
        );
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(AdapterError::Timeout.to_string(), "Request timed out");
    }
}
