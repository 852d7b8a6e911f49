//! Error types for Quotidian
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// Main error type for Quotidian
#[derive(Error, Debug)]
pub enum AppError {
    /// Network/HTTP errors
    #[error("{}", friendly_network_error(.0))]
    Network(#[from] reqwest::Error),

    /// Response body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// Local persistence errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for Quotidian
pub type Result<T> = std::result::Result<T, AppError>;

/// Translate a reqwest error into a message fit for the UI
fn friendly_network_error(e: &reqwest::Error) -> String {
    if e.is_builder() {
        if let Some(url) = e.url() {
            return format!("Invalid URL: {url}");
        }
        return "Invalid URL".to_string();
    }
    if e.is_connect() {
        if let Some(url) = e.url() {
            return format!("Could not connect to {}", url.host_str().unwrap_or("server"));
        }
        return "Could not connect to server".to_string();
    }
    if e.is_timeout() {
        return "Connection timed out".to_string();
    }
    if let Some(status) = e.status() {
        return format!("Server returned {status}");
    }
    if e.is_decode() {
        return "Invalid response from server".to_string();
    }
    format!("Network error: {e}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = AppError::Parse("missing field".to_string());
        assert_eq!(err.to_string(), "Unexpected response: missing field");
    }

    #[test]
    fn test_storage_error_message() {
        let err = AppError::Storage("disk full".to_string());
        assert_eq!(err.to_string(), "Storage error: disk full");
    }

    #[test]
    fn test_network_error_is_friendly() {
        // A request to a non-routable host produces a connect error.
        let err = reqwest::blocking::Client::new()
            .get("http://invalid.invalid.invalid")
            .send()
            .unwrap_err();
        let msg = AppError::from(err).to_string();
        assert!(!msg.is_empty());
        // The raw reqwest Display text leaks URLs and error chains; the
        // friendly form never starts with reqwest's "error sending request".
        assert!(!msg.starts_with("error sending request"));
    }
}
