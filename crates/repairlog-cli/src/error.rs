use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] repairlog_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Failed to read {path}: {message}")]
    Input { path: String, message: String },
    #[error("No call log given. Pass a path or set `call_log` in the config file.")]
    CallLogNotConfigured,
    #[error("Client filtering needs a `clients` file in the config")]
    ClientsNotConfigured,
    #[error("Client not found: {0}")]
    ClientNotFound(String),
}
