//! Error types for ranking operations

use thiserror::Error;

/// Errors that fail a whole ranking request
///
/// "Cannot compute" conditions such as a missing bodyweight are not errors;
/// they come back as a message on the response.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Population repository failure; never retried
    #[error("Repository error: {0}")]
    Repository(String),

    /// Configuration or taxonomy error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Worker error (tokio runtime issues)
    #[error("Worker error: {0}")]
    Worker(String),
}
