use thiserror::Error;

use crate::policy::AccessError;

/// Error for TeamId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for TeamName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TeamNameError {
    #[error("Team name cannot be empty")]
    Empty,

    #[error("Team name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0} (expected \"admin\" or \"member\")")]
    Unknown(String),
}

/// Top-level error for team and membership operations
#[derive(Debug, Clone, Error)]
pub enum TeamError {
    #[error("Invalid team ID: {0}")]
    InvalidTeamId(#[from] TeamIdError),

    #[error("Invalid team name: {0}")]
    InvalidTeamName(#[from] TeamNameError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error("Team not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("User {0} is not a member of this team")]
    MemberNotFound(String),

    #[error("User {0} is already a member of this team")]
    AlreadyMember(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
