use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::team::errors::RoleError;
use crate::team::errors::TeamIdError;
use crate::team::errors::TeamNameError;
use crate::user::models::UserId;

/// Team aggregate entity.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: TeamId,
    pub name: TeamName,
    pub created_by: UserId,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Team unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamId(pub Uuid);

impl TeamId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a team ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TeamIdError> {
        Uuid::parse_str(s)
            .map(TeamId)
            .map_err(|e| TeamIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Team name value type
///
/// Non-blank, at most 100 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamName(String);

impl TeamName {
    const MAX_LENGTH: usize = 100;

    /// Create a new valid team name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, TeamNameError> {
        if name.trim().is_empty() {
            return Err(TeamNameError::Empty);
        }

        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TeamNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Membership role. Stored as `"admin"` / `"member"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Member => "member",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "member" => Ok(Role::Member),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's role within a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Membership {
    pub team_id: TeamId,
    pub user_id: UserId,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(team_id: TeamId, user_id: UserId, role: Role) -> Self {
        Self {
            team_id,
            user_id,
            role,
            created_at: Utc::now(),
        }
    }
}

/// Command to create a team; the caller becomes its first admin.
#[derive(Debug)]
pub struct CreateTeamCommand {
    pub name: TeamName,
    pub is_private: bool,
}

/// Command to add a user to a team with a role.
#[derive(Debug)]
pub struct AddMemberCommand {
    pub user_id: UserId,
    pub role: Role,
}
