//! Core error types for rotaday-core.
//!
//! Each subsystem has its own `thiserror` enum; [`CoreError`] gathers them
//! so the session layer and the CLI can propagate with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rotaday-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Persisted state could not be loaded
    #[error("Failed to load state: {0}")]
    Load(#[from] StateLoadError),

    /// Persisted state could not be written
    #[error("Failed to save state: {0}")]
    Save(#[from] StateSaveError),

    /// Claim engine errors
    #[error("Claim error: {0}")]
    Claim(#[from] ClaimError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Failure to read a persisted session state.
///
/// Startup aborts on any of these; there is no fallback to defaults.
#[derive(Error, Debug)]
pub enum StateLoadError {
    /// The state exists but could not be read
    #[error("cannot read {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state was read but does not parse
    #[error("corrupt state in {location}: {message}")]
    Corrupt { location: String, message: String },

    /// The backing database failed
    #[error("database error: {0}")]
    Database(String),
}

/// Failure to persist a session state.
#[derive(Error, Debug)]
pub enum StateSaveError {
    #[error("cannot serialize state: {0}")]
    Serialize(String),

    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("database error: {0}")]
    Database(String),
}

/// Claim engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimError {
    /// Every project is at or over quota while the weekly target is unmet
    #[error("no project has remaining quota this week")]
    EmptyPool,

    /// Forced claim on an id that is not in the registry
    #[error("unknown project: {0}")]
    UnknownProject(String),
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

    /// Key does not name a configuration value
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// No usable data directory
    #[error("cannot prepare data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },
}

/// Validation errors for registry edits.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("project name must not be empty")]
    EmptyName,

    #[error("unknown project: {0}")]
    UnknownProject(String),

    #[error("'{selector}' matches more than one project: {candidates:?}")]
    AmbiguousProject {
        selector: String,
        candidates: Vec<String>,
    },

    #[error("a project named '{0}' already exists")]
    DuplicateName(String),
}

impl From<rusqlite::Error> for StateLoadError {
    fn from(err: rusqlite::Error) -> Self {
        StateLoadError::Database(err.to_string())
    }
}

impl From<rusqlite::Error> for StateSaveError {
    fn from(err: rusqlite::Error) -> Self {
        StateSaveError::Database(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
