//! Error types for the elite dashboard core.

use thiserror::Error;

/// Errors that can occur in elite operations.
#[derive(Error, Debug)]
pub enum EliteError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM")]
    InvalidMonth(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Shown inline by the connection gate; the gate stays closed.
    #[error("Mot de passe incorrect")]
    InvalidSecret,

    #[error("Nothing matches id '{0}'")]
    NotFound(String),

    #[error("Id '{0}' matches more than one entry")]
    AmbiguousId(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("No async runtime available: {0}")]
    Runtime(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for elite operations.
pub type EliteResult<T> = Result<T, EliteError>;
