//! Core error types for dayplan-core.
//!
//! This module defines the error hierarchy using thiserror. The pure
//! computations (detection, layout, slot search, application) never return
//! errors for validated input; errors surface at the edges: block
//! validation, configuration, and the remote negotiation boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Remote negotiation errors
    #[error("Negotiation error: {0}")]
    Negotiation(#[from] NegotiationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation errors for blocks and time values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A time string is not `HH:MM` in range
    #[error("Invalid time '{value}': expected HH:MM between 00:00 and 24:00")]
    InvalidTime { value: String },

    /// A minute offset falls outside the day
    #[error("Minute {minutes} is outside the day (0..=1440)")]
    OutOfDay { minutes: i64 },

    /// Invalid time range
    #[error("Invalid time range for block '{id}': end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        id: String,
        start: String,
        end: String,
    },

    /// Two blocks share an identifier
    #[error("Duplicate block id '{0}'")]
    DuplicateId(String),

    /// Empty identifier
    #[error("Block id must not be empty")]
    EmptyId,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine or create the config directory
    #[error("Failed to prepare config directory {path}: {source}")]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised at the remote strategy-negotiation boundary.
///
/// None of these is fatal to a resolution pass; callers fall back to the
/// local strategy engine.
#[derive(Error, Debug)]
pub enum NegotiationError {
    /// Negotiation is disabled or no endpoint is configured
    #[error("Negotiation endpoint not configured")]
    NotConfigured,

    /// Endpoint URL could not be parsed
    #[error("Invalid negotiation endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// The call did not finish in time
    #[error("Negotiation timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u128 },

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx status from the service
    #[error("Negotiation service returned status {0}")]
    Status(u16),

    /// Body was not the expected shape
    #[error("Malformed negotiation response: {0}")]
    Malformed(String),

    /// The service answered with `success: false`
    #[error("Negotiation service reported failure: {0}")]
    Rejected(String),

    /// The service answered successfully with nothing to offer
    #[error("Negotiation service returned no strategies")]
    Empty,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_wraps_into_core_error() {
        let err: CoreError = ValidationError::DuplicateId("a".into()).into();
        assert_eq!(err.to_string(), "Validation error: Duplicate block id 'a'");
    }

    #[test]
    fn timeout_message_reports_milliseconds() {
        let err = NegotiationError::Timeout { timeout_ms: 8000 };
        assert_eq!(err.to_string(), "Negotiation timed out after 8000 ms");
    }
}
