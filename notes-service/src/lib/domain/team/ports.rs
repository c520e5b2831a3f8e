use async_trait::async_trait;

use crate::team::errors::TeamError;
use crate::team::models::AddMemberCommand;
use crate::team::models::CreateTeamCommand;
use crate::team::models::Membership;
use crate::team::models::Team;
use crate::team::models::TeamId;
use crate::user::models::UserId;

/// Port for team and membership operations.
///
/// Every operation takes the authenticated requester and applies the role
/// policy before touching storage.
#[async_trait]
pub trait TeamServicePort: Send + Sync + 'static {
    /// Create a team with the requester as its admin.
    async fn create_team(
        &self,
        requester: &UserId,
        command: CreateTeamCommand,
    ) -> Result<Team, TeamError>;

    /// Teams the requester belongs to.
    async fn list_teams(&self, requester: &UserId) -> Result<Vec<Team>, TeamError>;

    /// # Errors
    /// * `NotFound` - Team does not exist
    /// * `Access` - Requester is not a member
    async fn get_team(&self, requester: &UserId, team_id: &TeamId) -> Result<Team, TeamError>;

    /// # Errors
    /// * `NotFound` - Team does not exist
    /// * `Access` - Requester is not an admin
    async fn delete_team(&self, requester: &UserId, team_id: &TeamId) -> Result<(), TeamError>;

    /// # Errors
    /// * `Access` - Requester is not an admin
    /// * `UserNotFound` - Target user does not exist
    /// * `AlreadyMember` - Target user is already in the team
    async fn add_member(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        command: AddMemberCommand,
    ) -> Result<Membership, TeamError>;

    /// # Errors
    /// * `Access` - Requester is not an admin, or target is the last admin
    /// * `MemberNotFound` - Target user is not in the team
    async fn remove_member(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        member_id: &UserId,
    ) -> Result<(), TeamError>;

    /// # Errors
    /// * `Access` - Requester is not a member
    async fn list_members(
        &self,
        requester: &UserId,
        team_id: &TeamId,
    ) -> Result<Vec<Membership>, TeamError>;
}

/// Persistence operations for teams and memberships.
#[async_trait]
pub trait TeamRepository: Send + Sync + 'static {
    /// Persist a team together with its creator's membership, atomically.
    async fn create(&self, team: Team, creator: Membership) -> Result<Team, TeamError>;

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, TeamError>;

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Team>, TeamError>;

    /// Remove a team along with its memberships and team notes.
    async fn delete(&self, id: &TeamId) -> Result<(), TeamError>;

    async fn find_membership(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, TeamError>;

    /// # Errors
    /// * `AlreadyMember` - Membership already exists
    /// * `UserNotFound` - User does not exist
    async fn add_member(&self, membership: Membership) -> Result<Membership, TeamError>;

    /// # Errors
    /// * `MemberNotFound` - Membership does not exist
    async fn remove_member(&self, team_id: &TeamId, user_id: &UserId) -> Result<(), TeamError>;

    async fn list_members(&self, team_id: &TeamId) -> Result<Vec<Membership>, TeamError>;

    async fn count_admins(&self, team_id: &TeamId) -> Result<i64, TeamError>;
}
