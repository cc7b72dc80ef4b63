//! The module contains the errors the engine can throw.
//!
//! The variants form a closed taxonomy: input validation, date parsing,
//! transaction timeout and storage failures. Handlers map each of them to
//! an HTTP response without inspecting message strings.
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Required top-level fields are absent from a receipt submission.
    /// Carries the comma-separated field names.
    #[error("Missing required fields: {0}")]
    Validation(String),
    #[error("Invalid date: {0}")]
    Parse(String),
    #[error("transaction timed out after {0}s")]
    Timeout(u64),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Parse(a), Self::Parse(b)) => a == b,
            (Self::Timeout(a), Self::Timeout(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
