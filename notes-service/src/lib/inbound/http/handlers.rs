use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::note::errors::NoteError;
use crate::policy::AccessError;
use crate::session::errors::SessionError;
use crate::team::errors::TeamError;
use crate::team_note::errors::TeamNoteError;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;

pub mod health;
pub mod notes;
pub mod payment;
pub mod session;
pub mod team_notes;
pub mod teams;
pub mod users;

/// Successful response: status code plus a bare JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// JSON request body. Rejections render through `ApiError` like every other failure.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Failed dependency: {0}")]
    FailedDependency(String),

    #[error("Internal server error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::FailedDependency(msg) => {
                tracing::error!(error = %msg, "Datastore failure");
                (
                    StatusCode::FAILED_DEPENDENCY,
                    "Datastore unavailable".to_string(),
                )
            }
            ApiError::InternalServerError(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON that does not fit the request type.
            JsonRejection::JsonDataError(e) => ApiError::UnprocessableEntity(e.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::LastAdmin => ApiError::Conflict(err.to_string()),
            _ => ApiError::Forbidden(err.to_string()),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidUserId(_)
            | UserError::InvalidEmail(_)
            | UserError::Password(PasswordError::Empty) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            UserError::Password(PasswordError::HashingFailed(_)) => {
                ApiError::InternalServerError(err.to_string())
            }
            UserError::DatabaseError(_) => ApiError::FailedDependency(err.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            SessionError::RefreshInvalid(_) => ApiError::Forbidden(err.to_string()),
            SessionError::TokenNotFound => ApiError::NotFound(err.to_string()),
            SessionError::TokenIssuance(_) => ApiError::InternalServerError(err.to_string()),
            SessionError::User(user_err) => ApiError::from(user_err),
            SessionError::DatabaseError(_) => ApiError::FailedDependency(err.to_string()),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::InvalidNoteId(_) => ApiError::BadRequest(err.to_string()),
            NoteError::InvalidBody(_) => ApiError::UnprocessableEntity(err.to_string()),
            NoteError::Access(access) => ApiError::from(access),
            NoteError::NotFound(_) => ApiError::NotFound(err.to_string()),
            NoteError::DatabaseError(_) => ApiError::FailedDependency(err.to_string()),
        }
    }
}

impl From<TeamError> for ApiError {
    fn from(err: TeamError) -> Self {
        match err {
            TeamError::InvalidTeamId(_) => ApiError::BadRequest(err.to_string()),
            TeamError::InvalidTeamName(_) | TeamError::InvalidRole(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            TeamError::Access(access) => ApiError::from(access),
            TeamError::NotFound(_) | TeamError::UserNotFound(_) | TeamError::MemberNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            TeamError::AlreadyMember(_) => ApiError::Conflict(err.to_string()),
            TeamError::DatabaseError(_) => ApiError::FailedDependency(err.to_string()),
        }
    }
}

impl From<TeamNoteError> for ApiError {
    fn from(err: TeamNoteError) -> Self {
        match err {
            TeamNoteError::InvalidNoteId(_) => ApiError::BadRequest(err.to_string()),
            TeamNoteError::InvalidBody(_) => ApiError::UnprocessableEntity(err.to_string()),
            TeamNoteError::Access(access) => ApiError::from(access),
            TeamNoteError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TeamNoteError::DatabaseError(_) => ApiError::FailedDependency(err.to_string()),
        }
    }
}
