//! Core error types for betterrest-core.
//!
//! Everything below [`PredictionFailure`] is detail for logs and for the
//! input layer. A failed calculation only ever reaches the user as the
//! single generic failure.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for betterrest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Prediction errors
    #[error("Prediction error: {0}")]
    Prediction(#[from] PredictionError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model artifact serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Config key does not exist
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Validation errors raised by the input newtypes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Value outside its allowed range
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    /// Value not on the allowed step grid
    #[error("{field} must be a multiple of {step}, got {value}")]
    OffStep {
        field: &'static str,
        step: f64,
        value: f64,
    },

    /// Text could not be parsed
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Why a predictor could not produce a value.
#[derive(Error, Debug)]
pub enum PredictionError {
    /// The model could not be loaded
    #[error("model unavailable at {path}: {message}")]
    ModelUnavailable { path: PathBuf, message: String },

    /// The model refused its inputs
    #[error("invalid model input '{feature}': {value}")]
    InvalidInput { feature: &'static str, value: f64 },

    /// The model produced something that is not a sleep duration
    #[error("model produced an unusable prediction: {0}")]
    InvalidOutput(f64),

    /// Anything else raised inside the model
    #[error("{0}")]
    Model(String),
}

/// The one failure a bedtime calculation can end in.
///
/// The cause is kept as the error source for logging; the display text is
/// always the generic message.
#[derive(Error, Debug)]
#[error("There was a problem in the calculations.")]
pub struct PredictionFailure {
    #[source]
    cause: PredictionError,
}

impl PredictionFailure {
    pub fn cause(&self) -> &PredictionError {
        &self.cause
    }
}

impl From<PredictionError> for PredictionFailure {
    fn from(cause: PredictionError) -> Self {
        Self { cause }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
