//! Common error types for Crema

use thiserror::Error;

/// Common result type for Crema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across Crema crates
///
/// The pure core (flavor, radar, feed, unlock) never returns these; they
/// surface only at configuration loading and at the store boundary.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested post, chat or user not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
