use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::note::errors::NoteError;
use crate::note::models::Note;
use crate::note::models::NoteBody;
use crate::note::models::NoteId;
use crate::note::ports::NoteRepository;
use crate::note::ports::NoteServicePort;
use crate::policy;
use crate::user::models::UserId;

/// Domain service implementation for personal notes.
pub struct NoteService<NR>
where
    NR: NoteRepository,
{
    repository: Arc<NR>,
}

impl<NR> NoteService<NR>
where
    NR: NoteRepository,
{
    pub fn new(repository: Arc<NR>) -> Self {
        Self { repository }
    }

    /// Load a note and check that `requester` owns it.
    async fn owned_note(&self, requester: &UserId, id: &NoteId) -> Result<Note, NoteError> {
        let note = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(NoteError::NotFound(id.to_string()))?;

        policy::ensure_owner(requester, &note.owner_id).inspect_err(|_| {
            tracing::warn!(note_id = %id, user_id = %requester, "Note access denied");
        })?;

        Ok(note)
    }
}

#[async_trait]
impl<NR> NoteServicePort for NoteService<NR>
where
    NR: NoteRepository,
{
    async fn create_note(&self, owner: &UserId, body: NoteBody) -> Result<Note, NoteError> {
        self.repository.create(Note::new(*owner, body)).await
    }

    async fn list_notes(&self, owner: &UserId) -> Result<Vec<Note>, NoteError> {
        self.repository.list_by_owner(owner).await
    }

    async fn get_note(&self, requester: &UserId, id: &NoteId) -> Result<Note, NoteError> {
        self.owned_note(requester, id).await
    }

    async fn update_note(
        &self,
        requester: &UserId,
        id: &NoteId,
        body: NoteBody,
    ) -> Result<Note, NoteError> {
        let mut note = self.owned_note(requester, id).await?;

        note.body = body;
        note.updated_at = Utc::now();

        self.repository.update(note).await
    }

    async fn delete_note(&self, requester: &UserId, id: &NoteId) -> Result<(), NoteError> {
        self.owned_note(requester, id).await?;
        self.repository.delete(id).await
    }
}
