//! Error types for expense-log operations.
//!
//! A top-level [`Error`] wraps one enum per concern: form validation,
//! storage, terminal I/O, and CLI commands. The presentation shell turns
//! validation and storage errors into user-facing messages; everything else
//! propagates to the binary.

use thiserror::Error;

/// Result type alias for expense-log operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A required form field was empty.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Storage-related errors (database operations and amount parsing).
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors (terminal or filesystem).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Form validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of amount, category, and date is empty after trimming.
    #[error("Amount, Category and Date required.")]
    MissingRequired,
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection or query error.
    #[error("database error: {0}")]
    Database(String),

    /// The amount text could not be read as a finite number.
    #[error("could not convert amount to a number: '{input}'")]
    InvalidAmount {
        /// The text that failed to parse.
        input: String,
    },

    /// Schema migration error.
    #[error("migration error: {0}")]
    Migration(String),

    /// The `expenses` table does not have the expected column layout.
    #[error("unexpected expenses columns: [{}]", found.join(", "))]
    SchemaMismatch {
        /// Column names as found in the table, in order.
        found: Vec<String>,
    },

    /// Operation attempted after the storage was closed.
    #[error("storage is closed")]
    Closed,
}

/// I/O-specific errors.
#[derive(Error, Debug)]
pub enum IoError {
    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("{0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The add command did not store an expense.
    #[error("{0}")]
    Rejected(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(StorageError::Database(err.to_string()))
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}
