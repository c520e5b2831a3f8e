use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::policy;
use crate::team::errors::TeamError;
use crate::team::models::AddMemberCommand;
use crate::team::models::CreateTeamCommand;
use crate::team::models::Membership;
use crate::team::models::Role;
use crate::team::models::Team;
use crate::team::models::TeamId;
use crate::team::ports::TeamRepository;
use crate::team::ports::TeamServicePort;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for teams and memberships.
pub struct TeamService<TR, UR>
where
    TR: TeamRepository,
    UR: UserRepository,
{
    repository: Arc<TR>,
    users: Arc<UR>,
}

impl<TR, UR> TeamService<TR, UR>
where
    TR: TeamRepository,
    UR: UserRepository,
{
    /// Create a new team service.
    ///
    /// # Arguments
    /// * `repository` - Team and membership persistence
    /// * `users` - User lookup for validating new members
    pub fn new(repository: Arc<TR>, users: Arc<UR>) -> Self {
        Self { repository, users }
    }

    async fn existing_team(&self, team_id: &TeamId) -> Result<Team, TeamError> {
        self.repository
            .find_by_id(team_id)
            .await?
            .ok_or(TeamError::NotFound(team_id.to_string()))
    }

    async fn membership(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Membership, TeamError> {
        let membership = self.repository.find_membership(team_id, user_id).await?;

        policy::require_member(membership)
            .inspect_err(|_| {
                tracing::warn!(team_id = %team_id, user_id = %user_id, "Team access denied");
            })
            .map_err(TeamError::from)
    }

    async fn admin_membership(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Membership, TeamError> {
        let membership = self.membership(team_id, user_id).await?;

        policy::require_admin(&membership).inspect_err(|_| {
            tracing::warn!(team_id = %team_id, user_id = %user_id, "Team admin action denied");
        })?;

        Ok(membership)
    }
}

#[async_trait]
impl<TR, UR> TeamServicePort for TeamService<TR, UR>
where
    TR: TeamRepository,
    UR: UserRepository,
{
    async fn create_team(
        &self,
        requester: &UserId,
        command: CreateTeamCommand,
    ) -> Result<Team, TeamError> {
        let now = Utc::now();
        let team = Team {
            id: TeamId::new(),
            name: command.name,
            created_by: *requester,
            is_private: command.is_private,
            created_at: now,
            updated_at: now,
        };
        let creator = Membership::new(team.id, *requester, Role::Admin);

        let team = self.repository.create(team, creator).await?;
        tracing::info!(team_id = %team.id, created_by = %requester, "Team created");

        Ok(team)
    }

    async fn list_teams(&self, requester: &UserId) -> Result<Vec<Team>, TeamError> {
        self.repository.list_for_user(requester).await
    }

    async fn get_team(&self, requester: &UserId, team_id: &TeamId) -> Result<Team, TeamError> {
        let team = self.existing_team(team_id).await?;
        self.membership(team_id, requester).await?;

        Ok(team)
    }

    async fn delete_team(&self, requester: &UserId, team_id: &TeamId) -> Result<(), TeamError> {
        self.existing_team(team_id).await?;
        self.admin_membership(team_id, requester).await?;

        self.repository.delete(team_id).await?;
        tracing::info!(team_id = %team_id, deleted_by = %requester, "Team deleted");

        Ok(())
    }

    async fn add_member(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        command: AddMemberCommand,
    ) -> Result<Membership, TeamError> {
        self.existing_team(team_id).await?;
        self.admin_membership(team_id, requester).await?;

        self.users
            .find_by_id(&command.user_id)
            .await
            .map_err(|e| TeamError::DatabaseError(e.to_string()))?
            .ok_or(TeamError::UserNotFound(command.user_id.to_string()))?;

        let membership = Membership::new(*team_id, command.user_id, command.role);

        self.repository.add_member(membership).await
    }

    async fn remove_member(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        member_id: &UserId,
    ) -> Result<(), TeamError> {
        self.existing_team(team_id).await?;
        self.admin_membership(team_id, requester).await?;

        let target = self
            .repository
            .find_membership(team_id, member_id)
            .await?
            .ok_or(TeamError::MemberNotFound(member_id.to_string()))?;

        let admin_count = self.repository.count_admins(team_id).await?;
        policy::ensure_admin_floor(&target, admin_count)?;

        self.repository.remove_member(team_id, member_id).await
    }

    async fn list_members(
        &self,
        requester: &UserId,
        team_id: &TeamId,
    ) -> Result<Vec<Membership>, TeamError> {
        self.existing_team(team_id).await?;
        self.membership(team_id, requester).await?;

        self.repository.list_members(team_id).await
    }
}
