//! Common error types for the dashboard

use thiserror::Error;

/// Common result type for dashboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types shared by the store and the service
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored JSON could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for the missing-parameter-set case
    pub fn parameter_set_not_found(id: impl std::fmt::Display) -> Self {
        Error::NotFound(format!("Parameters not found: {}", id))
    }
}
