use thiserror::Error;

use crate::policy::AccessError;

/// Error for NoteId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for NoteBody validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NoteBodyError {
    #[error("Note body cannot be empty")]
    Empty,

    #[error("Note body too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for personal note operations
#[derive(Debug, Clone, Error)]
pub enum NoteError {
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(#[from] NoteIdError),

    #[error("Invalid note body: {0}")]
    InvalidBody(#[from] NoteBodyError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
