use std::fmt;

use thiserror::Error;

use crate::user::errors::UserError;

/// Why a refresh token was not accepted.
///
/// Kept for logging only; clients receive a single uniform error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshRejection {
    NotFound,
    Revoked,
    Expired,
}

impl fmt::Display for RefreshRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RefreshRejection::NotFound => "not found",
            RefreshRejection::Revoked => "revoked",
            RefreshRejection::Expired => "expired",
        };
        f.write_str(reason)
    }
}

/// Top-level error for login, refresh and logout
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The reason is deliberately left out of the message.
    #[error("Refresh token is invalid")]
    RefreshInvalid(RefreshRejection),

    #[error("Refresh token not found")]
    TokenNotFound,

    #[error("Failed to issue session token: {0}")]
    TokenIssuance(String),

    #[error(transparent)]
    User(#[from] UserError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl SessionError {
    pub fn refresh_rejection(&self) -> Option<RefreshRejection> {
        match self {
            SessionError::RefreshInvalid(reason) => Some(*reason),
            _ => None,
        }
    }
}
