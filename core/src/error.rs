//! Error types and handling for Nivoxar Core

use thiserror::Error;

/// Result type alias for Nivoxar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Nivoxar Core
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Router errors
    #[error("Router error: {0}")]
    Router(#[from] RouterError),

    /// Browser history errors
    #[error("History error: {0}")]
    History(#[from] HistoryError),

    /// Navigation journal errors
    #[error("Journal error: {0}")]
    Journal(#[from] JournalError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for field '{field}': {value}")]
    InvalidValue { field: String, value: String },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid configuration format")]
    InvalidFormat,
}

/// Structured error type for router operations
#[derive(Error, Debug)]
pub enum RouterError {
    #[error("Default route '{0}' is not registered")]
    DefaultRouteMissing(String),

    #[error("Login route '{0}' is not registered")]
    LoginRouteMissing(String),
}

/// History integration errors
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Failed to push history entry '{path}': {message}")]
    PushFailed { path: String, message: String },

    #[error("Failed to replace history entry '{path}': {message}")]
    ReplaceFailed { path: String, message: String },
}

/// Navigation journal errors
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Failed to record journal: {message}")]
    RecordingFailed { message: String },

    #[error("Failed to load journal: {path}")]
    LoadFailed { path: String },

    #[error("Invalid journal format")]
    InvalidFormat,
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Generic(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Generic(msg.to_string())
    }
}
