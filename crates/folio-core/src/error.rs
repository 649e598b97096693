//! # Error Module
//!
//! Errors produced by the content store.

use thiserror::Error;

/// Errors from store operations and payload validation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Sqlite(rusqlite::Error),

    /// The requested language is not registered.
    ///
    /// Only raised where a language must already exist (contact form).
    #[error("Language '{0}' not found in the database.")]
    LanguageNotFound(String),

    /// The addressed entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A unique constraint was violated (duplicate tech key, filename, ...).
    #[error("{0}")]
    Conflict(String),

    /// The payload failed validation.
    #[error("{0}")]
    Validation(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(code, ref message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation
                    && code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
            {
                let detail = message
                    .clone()
                    .unwrap_or_else(|| String::from("unique constraint violated"));
                Self::Conflict(detail)
            }
            other => Self::Sqlite(other),
        }
    }
}

impl StoreError {
    /// Check whether this error means "nothing there" rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

// =============================================================================
// TESTS
// =============================================================================
