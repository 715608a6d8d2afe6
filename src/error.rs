//! Error types for the talkboard engine
//!
//! Structured error definitions via thiserror; binaries wrap these in
//! anyhow for context at the process boundary.

use thiserror::Error;

/// Main error type for talkboard operations
#[derive(Error, Debug)]
pub enum TalkboardError {
    /// The data source could not be read or parsed at all
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// Configuration file was present but malformed
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for talkboard operations
pub type Result<T> = std::result::Result<T, TalkboardError>;
