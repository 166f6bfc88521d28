//! Error types for repairlog-core

use thiserror::Error;

/// Result type alias using repairlog-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in repairlog-core operations
///
/// Note parsing never produces these: unrecognized lines degrade to
/// "not equipment". Only the loaders for external exports can fail.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
