use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::notes::NoteRequest;
use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::note::models::NoteBody;
use crate::domain::note::models::NoteId;
use crate::domain::team::models::TeamId;
use crate::domain::team_note::models::TeamNote;
use crate::domain::team_note::ports::TeamNoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::team::errors::TeamError;
use crate::team_note::errors::TeamNoteError;

fn parse_ids(team_id: &str, note_id: &str) -> Result<(TeamId, NoteId), ApiError> {
    let team_id = TeamId::from_string(team_id).map_err(TeamError::from)?;
    let note_id = NoteId::from_string(note_id).map_err(TeamNoteError::from)?;
    Ok((team_id, note_id))
}

pub async fn create_team_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
    ApiJson(body): ApiJson<NoteRequest>,
) -> Result<ApiSuccess<TeamNoteResponseData>, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;
    let body = NoteBody::new(body.body).map_err(TeamNoteError::from)?;

    state
        .team_note_service
        .create_note(&user.user_id, &team_id, body)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::CREATED, note.into()))
}

pub async fn list_team_notes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
) -> Result<ApiSuccess<Vec<TeamNoteResponseData>>, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;

    state
        .team_note_service
        .list_notes(&user.user_id, &team_id)
        .await
        .map_err(ApiError::from)
        .map(|notes| ApiSuccess::new(StatusCode::OK, notes.iter().map(Into::into).collect()))
}

pub async fn get_team_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((team_id, note_id)): Path<(String, String)>,
) -> Result<ApiSuccess<TeamNoteResponseData>, ApiError> {
    let (team_id, note_id) = parse_ids(&team_id, &note_id)?;

    state
        .team_note_service
        .get_note(&user.user_id, &team_id, &note_id)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::OK, note.into()))
}

pub async fn update_team_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((team_id, note_id)): Path<(String, String)>,
    ApiJson(body): ApiJson<NoteRequest>,
) -> Result<ApiSuccess<TeamNoteResponseData>, ApiError> {
    let (team_id, note_id) = parse_ids(&team_id, &note_id)?;
    let body = NoteBody::new(body.body).map_err(TeamNoteError::from)?;

    state
        .team_note_service
        .update_note(&user.user_id, &team_id, &note_id, body)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::OK, note.into()))
}

pub async fn delete_team_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((team_id, note_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let (team_id, note_id) = parse_ids(&team_id, &note_id)?;

    state
        .team_note_service
        .delete_note(&user.user_id, &team_id, &note_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamNoteResponseData {
    pub id: String,
    pub team_id: String,
    pub user_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&TeamNote> for TeamNoteResponseData {
    fn from(note: &TeamNote) -> Self {
        Self {
            id: note.id.to_string(),
            team_id: note.team_id.to_string(),
            user_id: note.author_id.to_string(),
            body: note.body.as_str().to_string(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}
