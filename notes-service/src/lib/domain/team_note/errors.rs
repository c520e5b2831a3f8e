use thiserror::Error;

use crate::note::errors::NoteBodyError;
use crate::note::errors::NoteIdError;
use crate::policy::AccessError;

/// Top-level error for team note operations
#[derive(Debug, Clone, Error)]
pub enum TeamNoteError {
    #[error("Invalid note ID: {0}")]
    InvalidNoteId(#[from] NoteIdError),

    #[error("Invalid note body: {0}")]
    InvalidBody(#[from] NoteBodyError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Team note not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
