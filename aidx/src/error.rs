//! Error types for AIDX

use std::path::PathBuf;
use thiserror::Error;

/// AIDX error type
///
/// The indexing and search operations themselves never fail; these variants
/// cover loading guides from disk and parsing user-supplied filter values.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A guide file could not be parsed
    #[error("Invalid guide file {path}: {reason}")]
    InvalidGuideFile {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying parse failure
        reason: String,
    },

    /// File extension is not a supported guide format
    #[error("Unsupported guide format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Unknown guide category
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Unknown severity level
    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for AIDX operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::ConfigError(format!("Invalid glob pattern: {}", err))
    }
}

impl From<walkdir::Error> for Error {
    fn from(err: walkdir::Error) -> Self {
        Error::Io(err.into())
    }
}
