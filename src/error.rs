//! Error types for Banter
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Banter operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, persistence, and the interactive chat loop.
#[derive(Error, Debug)]
pub enum BanterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat persistence errors (key-value store operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Banter operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = BanterError::Config("missing reply text".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing reply text");
    }

    #[test]
    fn test_storage_error_display() {
        let err = BanterError::Storage("tree unavailable".to_string());
        assert_eq!(err.to_string(), "Storage error: tree unavailable");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: BanterError = io.into();
        assert!(matches!(err, BanterError::Io(_)));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json");
        let err: BanterError = bad.unwrap_err().into();
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
