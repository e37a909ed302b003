//! Core error types for sprintcap-core.
//!
//! The state store and the derivation engine are total and never fail.
//! Errors only come from loading user configuration and from mapping
//! raw form input (field names, command arguments) onto typed updates.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for sprintcap-core.
///
/// Front ends return this from their commands so configuration, input
/// and output failures all surface through one `?`.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Home/config directory could not be prepared
    #[error("Failed to prepare config directory {path}: {source}")]
    DirUnavailable {
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Errors raised while turning raw form input into store updates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Field name not recognised for the given record kind
    #[error("unknown {record} field '{field}'")]
    UnknownField { record: &'static str, field: String },

    /// Country reference that names no live country
    #[error("no country matches '{0}'")]
    UnknownCountry(String),

    /// Malformed command argument (e.g. a PTO entry missing `:DAYS`)
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
