//! # Config Loader
//!
//! Session configuration loading and parsing module.
//!
//! Responsibilities:
//! - Parse TOML/JSON configuration files
//! - Validate configuration legality
//! - Produce a `SessionConfig`
//!
//! # Example
//!
//! ```no_run
//! use config_loader::ConfigLoader;
//! use std::path::Path;
//!
//! let config = ConfigLoader::load_from_path(Path::new("review.toml")).unwrap();
//! println!("Sample rate: {} Hz", config.sample_rate_hz);
//! ```

mod parser;
mod validator;

pub use contracts::SessionConfig;
pub use parser::ConfigFormat;
pub use validator::validate;

use contracts::ReviewError;
use std::path::Path;

/// Configuration loader
///
/// Provides static methods to load configuration from files or strings.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file path
    ///
    /// Automatically detects format from file extension (.toml / .json).
    ///
    /// # Errors
    /// - File read failure
    /// - Unsupported format
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_path(path: &Path) -> Result<SessionConfig, ReviewError> {
        let format = Self::detect_format(path)?;
        let content = Self::read_file(path)?;
        Self::load_from_str(&content, format)
    }

    /// Load configuration from string
    ///
    /// # Errors
    /// - Parse failure
    /// - Validation failure
    pub fn load_from_str(content: &str, format: ConfigFormat) -> Result<SessionConfig, ReviewError> {
        let config = parser::parse(content, format)?;
        validator::validate(&config)?;
        Ok(config)
    }

    /// Serialize a SessionConfig to TOML string
    pub fn to_toml(config: &SessionConfig) -> Result<String, ReviewError> {
        toml::to_string_pretty(config)
            .map_err(|e| ReviewError::config_parse(format!("TOML serialize error: {e}")))
    }

    /// Serialize a SessionConfig to JSON string
    pub fn to_json(config: &SessionConfig) -> Result<String, ReviewError> {
        serde_json::to_string_pretty(config)
            .map_err(|e| ReviewError::config_parse(format!("JSON serialize error: {e}")))
    }
}

impl ConfigLoader {
    /// Infer configuration format from file extension
    fn detect_format(path: &Path) -> Result<ConfigFormat, ReviewError> {
        let ext = path.extension().and_then(|e| e.to_str()).ok_or_else(|| {
            ReviewError::config_parse("cannot determine file format from extension")
        })?;

        ConfigFormat::from_extension(ext)
            .ok_or_else(|| ReviewError::config_parse(format!("unsupported config format: .{ext}")))
    }

    /// Read configuration file content
    fn read_file(path: &Path) -> Result<String, ReviewError> {
        Ok(std::fs::read_to_string(path)?)
    }
}
