//! Error types for CLI operations.

use thiserror::Error;

/// CLI-specific error types
#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CliError {
    /// Dataset file not found
    #[error("Dataset file not found: {path}")]
    DataNotFound { path: String },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration parsing error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    /// Malformed annotation spec on the command line
    #[error("Invalid annotation spec '{spec}': expected time:label:category[:notes]")]
    AnnotationSpec { spec: String },

    /// Replay execution error
    #[error("Replay failed: {message}")]
    Replay { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
