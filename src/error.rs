//! Error types for Letterdesk.

use thiserror::Error;

/// Common error type for Letterdesk.
#[derive(Error, Debug)]
pub enum LetterdeskError {
    /// Database error.
    ///
    /// Wraps errors from the database backend. sqlx errors are converted
    /// automatically; the driver detail stays out of API responses.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (credential check failed).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Authorization predicate denied the operation.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input. Nothing was persisted.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness violation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The letter already carries a signature.
    #[error("letter {0} is already signed")]
    AlreadySigned(i64),

    /// Attachment rejected: wrong content type or undecodable payload.
    #[error("invalid attachment: {0}")]
    InvalidAttachment(String),

    /// Attachment rejected: payload exceeds the size ceiling.
    #[error("attachment of {size} bytes exceeds the {limit} byte limit")]
    AttachmentTooLarge { size: u64, limit: u64 },

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for LetterdeskError {
    fn from(e: sqlx::Error) -> Self {
        LetterdeskError::Database(e.to_string())
    }
}

/// Result type alias for Letterdesk operations.
pub type Result<T> = std::result::Result<T, LetterdeskError>;
