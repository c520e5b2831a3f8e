use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiJson;
use super::ApiSuccess;
use crate::domain::session::models::LoginCommand;
use crate::domain::session::models::Session;
use crate::domain::session::ports::SessionServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let command = LoginCommand {
        email: body.email,
        password: body.password,
    };

    state
        .session_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// Exchange the refresh token in `Authorization: Bearer` for a session token.
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiSuccess<RefreshResponseData>, ApiError> {
    let refresh_token = refresh_token_from(&headers)?;

    state
        .session_service
        .refresh(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, RefreshResponseData { token }))
}

/// Revoke the refresh token in `Authorization: Bearer`.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let refresh_token = refresh_token_from(&headers)?;

    state
        .session_service
        .logout(refresh_token)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

fn refresh_token_from(headers: &HeaderMap) -> Result<&str, ApiError> {
    auth::extract_bearer_token(headers).map_err(|e| {
        tracing::warn!(error = %e, "Refresh token missing from request");
        ApiError::Unauthorized(e.to_string())
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub token: String,
    pub refresh_token: String,
    pub has_notes_premium: bool,
}

impl From<Session> for LoginResponseData {
    fn from(session: Session) -> Self {
        Self {
            id: session.user.id.to_string(),
            created_at: session.user.created_at,
            updated_at: session.user.updated_at,
            email: session.user.email.as_str().to_string(),
            token: session.access_token,
            refresh_token: session.refresh_token,
            has_notes_premium: session.user.has_notes_premium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshResponseData {
    pub token: String,
}
