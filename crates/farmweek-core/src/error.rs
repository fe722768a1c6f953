//! Core error types for farmweek-core.
//!
//! There is deliberately no fatal error path in the scheduling engine
//! itself: missing live weather degrades to the historical climate table
//! and an unplaceable task is a first-class outcome, not an error. The
//! types here cover the boundaries where real failures happen -- the
//! weather provider, the event store, and configuration files.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for farmweek-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Weather provider errors
    #[error("Weather error: {0}")]
    Weather(#[from] WeatherError),

    /// External event store errors
    #[error("Event store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Weather provider errors.
///
/// Callers are expected to treat any of these as "no live data for this
/// date" -- the scheduler always has the historical table to fall back on.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// The HTTP request to the provider failed
    #[error("Failed to fetch forecast for '{location}': {source}")]
    FetchFailed {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with something we could not interpret
    #[error("Malformed forecast response: {0}")]
    MalformedResponse(String),
}

/// External event store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the event file
    #[error("Failed to load events from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to write the event file
    #[error("Failed to save events to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// No event with the requested id
    #[error("No event with id {0}")]
    NotFound(uuid::Uuid),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
