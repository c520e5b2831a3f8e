use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::note::errors::NoteBodyError;
use crate::note::errors::NoteIdError;
use crate::user::models::UserId;

/// Personal note, visible to and mutable by its owner only.
#[derive(Debug, Clone)]
pub struct Note {
    pub id: NoteId,
    pub owner_id: UserId,
    pub body: NoteBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(owner_id: UserId, body: NoteBody) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            owner_id,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Note unique identifier, shared by personal and team notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoteId(pub Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a note ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, NoteIdError> {
        Uuid::parse_str(s)
            .map(NoteId)
            .map_err(|e| NoteIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Note body value type
///
/// Non-blank, at most 10 000 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteBody(String);

impl NoteBody {
    const MAX_LENGTH: usize = 10_000;

    /// # Errors
    /// * `Empty` - Body is empty or whitespace only
    /// * `TooLong` - Body longer than 10 000 characters
    pub fn new(body: String) -> Result<Self, NoteBodyError> {
        if body.trim().is_empty() {
            return Err(NoteBodyError::Empty);
        }

        let length = body.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NoteBodyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(body))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_body_validation() {
        assert_eq!(NoteBody::new("hello".to_string()).unwrap().as_str(), "hello");
        assert_eq!(NoteBody::new(String::new()), Err(NoteBodyError::Empty));
        assert_eq!(NoteBody::new(" \n\t".to_string()), Err(NoteBodyError::Empty));
    }

    #[test]
    fn test_note_body_length_limit() {
        assert!(NoteBody::new("x".repeat(10_000)).is_ok());
        assert_eq!(
            NoteBody::new("x".repeat(10_001)),
            Err(NoteBodyError::TooLong {
                max: 10_000,
                actual: 10_001
            })
        );
    }

    #[test]
    fn test_new_note_timestamps_match() {
        let note = Note::new(UserId::new(), NoteBody::new("hello".to_string()).unwrap());
        assert_eq!(note.created_at, note.updated_at);
    }
}
