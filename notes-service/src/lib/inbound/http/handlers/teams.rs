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
use crate::domain::team::models::AddMemberCommand;
use crate::domain::team::models::CreateTeamCommand;
use crate::domain::team::models::Membership;
use crate::domain::team::models::Role;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::team::models::TeamName;
use crate::domain::team::ports::TeamServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::team::errors::TeamError;

pub async fn create_team(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(body): ApiJson<CreateTeamRequest>,
) -> Result<ApiSuccess<TeamResponseData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .team_service
        .create_team(&user.user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref team| ApiSuccess::new(StatusCode::CREATED, team.into()))
}

pub async fn list_teams(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<Vec<TeamResponseData>>, ApiError> {
    state
        .team_service
        .list_teams(&user.user_id)
        .await
        .map_err(ApiError::from)
        .map(|teams| ApiSuccess::new(StatusCode::OK, teams.iter().map(Into::into).collect()))
}

pub async fn get_team(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
) -> Result<ApiSuccess<TeamResponseData>, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;

    state
        .team_service
        .get_team(&user.user_id, &team_id)
        .await
        .map_err(ApiError::from)
        .map(|ref team| ApiSuccess::new(StatusCode::OK, team.into()))
}

pub async fn delete_team(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;

    state
        .team_service
        .delete_team(&user.user_id, &team_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn add_member(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
    ApiJson(body): ApiJson<AddMemberRequest>,
) -> Result<ApiSuccess<MemberResponseData>, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;
    let command = body.try_into_command()?;

    state
        .team_service
        .add_member(&user.user_id, &team_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref membership| ApiSuccess::new(StatusCode::CREATED, membership.into()))
}

pub async fn list_members(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(team_id): Path<String>,
) -> Result<ApiSuccess<Vec<MemberResponseData>>, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;

    state
        .team_service
        .list_members(&user.user_id, &team_id)
        .await
        .map_err(ApiError::from)
        .map(|members| {
            ApiSuccess::new(StatusCode::OK, members.iter().map(Into::into).collect())
        })
}

pub async fn remove_member(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((team_id, member_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let team_id = TeamId::from_string(&team_id).map_err(TeamError::from)?;
    let member_id = UserId::from_string(&member_id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid member ID: {}", e)))?;

    state
        .team_service
        .remove_member(&user.user_id, &team_id, &member_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

/// HTTP request body for creating a team (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTeamRequest {
    team_name: String,
    #[serde(default)]
    is_private: bool,
}

impl CreateTeamRequest {
    fn try_into_command(self) -> Result<CreateTeamCommand, TeamError> {
        Ok(CreateTeamCommand {
            name: TeamName::new(self.team_name)?,
            is_private: self.is_private,
        })
    }
}

/// HTTP request body for adding a member; role defaults to `member`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AddMemberRequest {
    user_id: String,
    role: Option<String>,
}

impl AddMemberRequest {
    fn try_into_command(self) -> Result<AddMemberCommand, ApiError> {
        let user_id = UserId::from_string(&self.user_id)
            .map_err(|e| ApiError::UnprocessableEntity(format!("Invalid user ID: {}", e)))?;

        let role = match self.role {
            Some(role) => role.parse::<Role>().map_err(TeamError::from)?,
            None => Role::Member,
        };

        Ok(AddMemberCommand { user_id, role })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamResponseData {
    pub id: String,
    pub team_name: String,
    pub created_by: String,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Team> for TeamResponseData {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id.to_string(),
            team_name: team.name.as_str().to_string(),
            created_by: team.created_by.to_string(),
            is_private: team.is_private,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberResponseData {
    pub team_id: String,
    pub user_id: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Membership> for MemberResponseData {
    fn from(membership: &Membership) -> Self {
        Self {
            team_id: membership.team_id.to_string(),
            user_id: membership.user_id.to_string(),
            role: membership.role.as_str().to_string(),
            created_at: membership.created_at,
        }
    }
}
