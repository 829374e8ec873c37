//! Error types for querycomplete
//!
//! The suggestion pipeline itself never fails. These errors only surface when
//! loading configuration, vocabularies or history snapshots from disk.

use thiserror::Error;

/// Errors that can occur while loading suggestion inputs
#[derive(Debug, Error)]
pub enum SuggestError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Vocabulary file errors
    #[error("Vocabulary error: {0}")]
    Vocabulary(String),

    /// History snapshot errors
    #[error("History error: {0}")]
    History(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for querycomplete operations
pub type SuggestResult<T> = Result<T, SuggestError>;
