//! Common error types for CMQ

use thiserror::Error;

/// Common result type for CMQ operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across CMQ crates
///
/// Only setup and infrastructure failures are represented here. Rule failures
/// and quality issues on metadata values are verdicts, not errors.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON reference data could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
