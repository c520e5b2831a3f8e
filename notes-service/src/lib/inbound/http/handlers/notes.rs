use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::note::models::Note;
use crate::domain::note::models::NoteBody;
use crate::domain::note::models::NoteId;
use crate::domain::note::ports::NoteServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::note::errors::NoteError;

pub async fn create_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<NoteRequest>,
) -> Result<ApiSuccess<NoteResponseData>, ApiError> {
    let body = NoteBody::new(body.body).map_err(NoteError::from)?;

    state
        .note_service
        .create_note(&user.user_id, body)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::CREATED, note.into()))
}

pub async fn list_notes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<NoteResponseData>>, ApiError> {
    state
        .note_service
        .list_notes(&user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|notes| ApiSuccess::new(StatusCode::OK, notes.iter().map(Into::into).collect()))
}

pub async fn get_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(note_id): Path<String>,
) -> Result<ApiSuccess<NoteResponseData>, ApiError> {
    let note_id = NoteId::from_string(&note_id).map_err(NoteError::from)?;

    state
        .note_service
        .get_note(&user.user_id, &note_id)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::OK, note.into()))
}

pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(note_id): Path<String>,
    ApiJson(body): ApiJson<NoteRequest>,
) -> Result<ApiSuccess<NoteResponseData>, ApiError> {
    let note_id = NoteId::from_string(&note_id).map_err(NoteError::from)?;
    let body = NoteBody::new(body.body).map_err(NoteError::from)?;

    state
        .note_service
        .update_note(&user.user_id, &note_id, body)
        .await
        .map_err(ApiError::from)
        .map(|ref note| ApiSuccess::new(StatusCode::OK, note.into()))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(note_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let note_id = NoteId::from_string(&note_id).map_err(NoteError::from)?;

    state
        .note_service
        .delete_note(&user.user_id, &note_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

/// HTTP request body for creating or replacing a note (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoteRequest {
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteResponseData {
    pub id: String,
    pub user_id: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Note> for NoteResponseData {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id.to_string(),
            user_id: note.owner_id.to_string(),
            body: note.body.as_str().to_string(),
            created_at: note.created_at,
            updated_at: note.updated_at,
        }
    }
}
