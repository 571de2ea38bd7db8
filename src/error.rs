//! Error types for PCForge
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for PCForge operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, credential handling, session management,
/// API calls, and workflow policy checks.
#[derive(Error, Debug)]
pub enum PcforgeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored credential could not be decoded (malformed token)
    #[error("Credential decode error: {0}")]
    Decode(String),

    /// Credential is well-formed but past its expiry
    #[error("Session expired")]
    SessionExpired,

    /// Operation requires an authenticated session
    #[error("Authentication required: {0}")]
    Authentication(String),

    /// Client-side input constraint violated; caught before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Workflow policy short-circuit (declined confirmation, duplicate save)
    #[error("Policy violation: {0}")]
    Policy(String),

    /// API call failed: transport error or non-2xx response
    #[error("{operation}: {message}")]
    Api {
        /// Short per-operation failure label shown to the user
        operation: String,
        /// Detail from the transport layer or response body
        message: String,
    },

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Keyring/credential storage errors
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PcforgeError {
    /// Build an `Api` error from an operation label and a detail message
    pub fn api(operation: &str, message: impl Into<String>) -> Self {
        Self::Api {
            operation: operation.to_string(),
            message: message.into(),
        }
    }
}

/// Result type alias for PCForge operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = PcforgeError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_decode_error_display() {
        let error = PcforgeError::Decode("bad payload".to_string());
        assert_eq!(error.to_string(), "Credential decode error: bad payload");
    }

    #[test]
    fn test_session_expired_display() {
        let error = PcforgeError::SessionExpired;
        assert_eq!(error.to_string(), "Session expired");
    }

    #[test]
    fn test_authentication_error_display() {
        let error = PcforgeError::Authentication("save a build".to_string());
        assert_eq!(error.to_string(), "Authentication required: save a build");
    }

    #[test]
    fn test_validation_error_display() {
        let error = PcforgeError::Validation("budget too low".to_string());
        assert_eq!(error.to_string(), "Validation error: budget too low");
    }

    #[test]
    fn test_policy_error_display() {
        let error = PcforgeError::Policy("deletion cancelled".to_string());
        assert_eq!(error.to_string(), "Policy violation: deletion cancelled");
    }

    #[test]
    fn test_api_error_display() {
        let error = PcforgeError::api("save failed", "500 Internal Server Error");
        assert_eq!(error.to_string(), "save failed: 500 Internal Server Error");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: PcforgeError = json_error.into();
        assert!(matches!(error, PcforgeError::Serialization(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: PcforgeError = io_error.into();
        assert!(matches!(error, PcforgeError::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: PcforgeError = yaml_error.into();
        assert!(matches!(error, PcforgeError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PcforgeError>();
    }
}
