//! Layered error definitions
//!
//! Categorized by source: config / upload / stream / store. Missing
//! preconditions (apply-sync without marks, playback without a dataset) are
//! deliberately not errors; those paths are silent no-ops.

use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ReviewError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Upload Errors =====
    /// Upload contained no non-blank lines
    #[error("empty upload: no non-blank lines")]
    EmptyUpload,

    /// Sample rate must be a positive finite number
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate { rate: f64 },

    // ===== Stream Errors =====
    /// Notification frame could not be decoded
    #[error("frame decode error: {message}")]
    FrameDecode { message: String },

    // ===== Store Errors =====
    /// Project store write error
    #[error("store '{store}' write error: {message}")]
    StoreWrite { store: String, message: String },

    /// Persisted record could not be decoded
    #[error("project record '{key}' decode error: {message}")]
    RecordDecode { key: String, message: String },

    /// Report export error
    #[error("report write error for '{path}': {message}")]
    ReportWrite { path: String, message: String },

    // ===== General Errors =====
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ReviewError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create frame decode error
    pub fn frame_decode(message: impl Into<String>) -> Self {
        Self::FrameDecode {
            message: message.into(),
        }
    }

    /// Create store write error
    pub fn store_write(store: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreWrite {
            store: store.into(),
            message: message.into(),
        }
    }

    /// Create record decode error
    pub fn record_decode(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordDecode {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create report write error
    pub fn report_write(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ReportWrite {
            path: path.into(),
            message: message.into(),
        }
    }
}
