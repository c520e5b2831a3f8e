use async_trait::async_trait;

use crate::note::errors::NoteError;
use crate::note::models::Note;
use crate::note::models::NoteBody;
use crate::note::models::NoteId;
use crate::user::models::UserId;

/// Port for personal note operations.
///
/// Reads and writes of a single note require the requester to own it.
#[async_trait]
pub trait NoteServicePort: Send + Sync + 'static {
    async fn create_note(&self, owner: &UserId, body: NoteBody) -> Result<Note, NoteError>;

    /// Notes owned by `owner`, newest first.
    async fn list_notes(&self, owner: &UserId) -> Result<Vec<Note>, NoteError>;

    /// # Errors
    /// * `NotFound` - Note does not exist
    /// * `Access` - Requester is not the owner
    async fn get_note(&self, requester: &UserId, id: &NoteId) -> Result<Note, NoteError>;

    /// # Errors
    /// * `NotFound` - Note does not exist
    /// * `Access` - Requester is not the owner
    async fn update_note(
        &self,
        requester: &UserId,
        id: &NoteId,
        body: NoteBody,
    ) -> Result<Note, NoteError>;

    /// # Errors
    /// * `NotFound` - Note does not exist
    /// * `Access` - Requester is not the owner
    async fn delete_note(&self, requester: &UserId, id: &NoteId) -> Result<(), NoteError>;
}

/// Persistence operations for personal notes.
///
/// Notes attached to a team are invisible through this port.
#[async_trait]
pub trait NoteRepository: Send + Sync + 'static {
    async fn create(&self, note: Note) -> Result<Note, NoteError>;

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, NoteError>;

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError>;

    /// # Errors
    /// * `NotFound` - Note does not exist
    async fn update(&self, note: Note) -> Result<Note, NoteError>;

    /// # Errors
    /// * `NotFound` - Note does not exist
    async fn delete(&self, id: &NoteId) -> Result<(), NoteError>;
}
