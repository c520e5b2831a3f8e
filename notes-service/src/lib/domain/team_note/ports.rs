use async_trait::async_trait;

use crate::note::models::NoteBody;
use crate::note::models::NoteId;
use crate::team::models::TeamId;
use crate::team_note::errors::TeamNoteError;
use crate::team_note::models::TeamNote;
use crate::user::models::UserId;

/// Port for team note operations.
///
/// All operations require membership of `team_id`; operations on a single
/// note also require the note to belong to `team_id`.
#[async_trait]
pub trait TeamNoteServicePort: Send + Sync + 'static {
    async fn create_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        body: NoteBody,
    ) -> Result<TeamNote, TeamNoteError>;

    async fn list_notes(
        &self,
        requester: &UserId,
        team_id: &TeamId,
    ) -> Result<Vec<TeamNote>, TeamNoteError>;

    async fn get_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        note_id: &NoteId,
    ) -> Result<TeamNote, TeamNoteError>;

    /// Any member may edit.
    async fn update_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        note_id: &NoteId,
        body: NoteBody,
    ) -> Result<TeamNote, TeamNoteError>;

    /// Only the author or a team admin may delete.
    async fn delete_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        note_id: &NoteId,
    ) -> Result<(), TeamNoteError>;
}

/// Persistence operations for team notes.
#[async_trait]
pub trait TeamNoteRepository: Send + Sync + 'static {
    /// Persist the note and its team association, atomically.
    async fn create(&self, note: TeamNote) -> Result<TeamNote, TeamNoteError>;

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<TeamNote>, TeamNoteError>;

    async fn list_for_team(&self, team_id: &TeamId) -> Result<Vec<TeamNote>, TeamNoteError>;

    /// # Errors
    /// * `NotFound` - Note does not exist
    async fn update(&self, note: TeamNote) -> Result<TeamNote, TeamNoteError>;

    /// # Errors
    /// * `NotFound` - Note does not exist
    async fn delete(&self, id: &NoteId) -> Result<(), TeamNoteError>;
}
