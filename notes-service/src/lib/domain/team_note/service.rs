use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::note::models::NoteBody;
use crate::note::models::NoteId;
use crate::policy;
use crate::team::models::Membership;
use crate::team::models::TeamId;
use crate::team::ports::TeamRepository;
use crate::team_note::errors::TeamNoteError;
use crate::team_note::models::TeamNote;
use crate::team_note::ports::TeamNoteRepository;
use crate::team_note::ports::TeamNoteServicePort;
use crate::user::models::UserId;

/// Domain service implementation for team notes.
pub struct TeamNoteService<TNR, TR>
where
    TNR: TeamNoteRepository,
    TR: TeamRepository,
{
    repository: Arc<TNR>,
    teams: Arc<TR>,
}

impl<TNR, TR> TeamNoteService<TNR, TR>
where
    TNR: TeamNoteRepository,
    TR: TeamRepository,
{
    /// Create a new team note service.
    ///
    /// # Arguments
    /// * `repository` - Team note persistence
    /// * `teams` - Membership lookup for access checks
    pub fn new(repository: Arc<TNR>, teams: Arc<TR>) -> Self {
        Self { repository, teams }
    }

    async fn membership(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Membership, TeamNoteError> {
        let membership = self
            .teams
            .find_membership(team_id, user_id)
            .await
            .map_err(|e| TeamNoteError::DatabaseError(e.to_string()))?;

        policy::require_member(membership)
            .inspect_err(|_| {
                tracing::warn!(team_id = %team_id, user_id = %user_id, "Team note access denied");
            })
            .map_err(TeamNoteError::from)
    }

    /// Membership check followed by loading the note and matching its team.
    async fn accessible_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        note_id: &NoteId,
    ) -> Result<(Membership, TeamNote), TeamNoteError> {
        let membership = self.membership(team_id, requester).await?;

        let note = self
            .repository
            .find_by_id(note_id)
            .await?
            .ok_or(TeamNoteError::NotFound(note_id.to_string()))?;

        policy::ensure_same_team(team_id, &note.team_id).inspect_err(|_| {
            tracing::warn!(
                team_id = %team_id,
                note_id = %note_id,
                "Team note requested through another team"
            );
        })?;

        Ok((membership, note))
    }
}

#[async_trait]
impl<TNR, TR> TeamNoteServicePort for TeamNoteService<TNR, TR>
where
    TNR: TeamNoteRepository,
    TR: TeamRepository,
{
    async fn create_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        body: NoteBody,
    ) -> Result<TeamNote, TeamNoteError> {
        self.membership(team_id, requester).await?;

        self.repository
            .create(TeamNote::new(*team_id, *requester, body))
            .await
    }

    async fn list_notes(
        &self,
        requester: &UserId,
        team_id: &TeamId,
    ) -> Result<Vec<TeamNote>, TeamNoteError> {
        self.membership(team_id, requester).await?;

        self.repository.list_for_team(team_id).await
    }

    async fn get_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        note_id: &NoteId,
    ) -> Result<TeamNote, TeamNoteError> {
        let (_, note) = self.accessible_note(requester, team_id, note_id).await?;

        Ok(note)
    }

    async fn update_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        note_id: &NoteId,
        body: NoteBody,
    ) -> Result<TeamNote, TeamNoteError> {
        let (_, mut note) = self.accessible_note(requester, team_id, note_id).await?;

        note.body = body;
        note.updated_at = Utc::now();

        self.repository.update(note).await
    }

    async fn delete_note(
        &self,
        requester: &UserId,
        team_id: &TeamId,
        note_id: &NoteId,
    ) -> Result<(), TeamNoteError> {
        let (membership, note) = self.accessible_note(requester, team_id, note_id).await?;

        policy::ensure_can_delete_team_note(&membership, &note)?;

        self.repository.delete(note_id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::policy::AccessError;
    use crate::team::errors::TeamError;
    use crate::team::models::Role;
    use crate::team::models::Team;

    mock! {
        pub TestTeamNoteRepository {}

        #[async_trait]
        impl TeamNoteRepository for TestTeamNoteRepository {
            async fn create(&self, note: TeamNote) -> Result<TeamNote, TeamNoteError>;
            async fn find_by_id(&self, id: &NoteId) -> Result<Option<TeamNote>, TeamNoteError>;
            async fn list_for_team(&self, team_id: &TeamId) -> Result<Vec<TeamNote>, TeamNoteError>;
            async fn update(&self, note: TeamNote) -> Result<TeamNote, TeamNoteError>;
            async fn delete(&self, id: &NoteId) -> Result<(), TeamNoteError>;
        }
    }

    mock! {
        pub TestTeamRepository {}

        #[async_trait]
        impl TeamRepository for TestTeamRepository {
            async fn create(&self, team: Team, creator: Membership) -> Result<Team, TeamError>;
            async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, TeamError>;
            async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Team>, TeamError>;
            async fn delete(&self, id: &TeamId) -> Result<(), TeamError>;
            async fn find_membership(&self, team_id: &TeamId, user_id: &UserId) -> Result<Option<Membership>, TeamError>;
            async fn add_member(&self, membership: Membership) -> Result<Membership, TeamError>;
            async fn remove_member(&self, team_id: &TeamId, user_id: &UserId) -> Result<(), TeamError>;
            async fn list_members(&self, team_id: &TeamId) -> Result<Vec<Membership>, TeamError>;
            async fn count_admins(&self, team_id: &TeamId) -> Result<i64, TeamError>;
        }
    }

    struct Fixture {
        team_id: TeamId,
        admin: UserId,
        author: UserId,
        member: UserId,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                team_id: TeamId::new(),
                admin: UserId::new(),
                author: UserId::new(),
                member: UserId::new(),
            }
        }

        fn teams(&self) -> MockTestTeamRepository {
            let (team_id, admin, author, member) =
                (self.team_id, self.admin, self.author, self.member);
            let mut teams = MockTestTeamRepository::new();
            teams.expect_find_membership().returning(move |tid, uid| {
                if *tid != team_id {
                    return Ok(None);
                }
                let role = if *uid == admin {
                    Role::Admin
                } else if *uid == author || *uid == member {
                    Role::Member
                } else {
                    return Ok(None);
                };
                Ok(Some(Membership::new(*tid, *uid, role)))
            });
            teams
        }

        fn note(&self) -> TeamNote {
            TeamNote::new(self.team_id, self.author, body("shared"))
        }
    }

    fn body(text: &str) -> NoteBody {
        NoteBody::new(text.to_string()).unwrap()
    }

    fn notes_with(note: TeamNote) -> MockTestTeamNoteRepository {
        let mut notes = MockTestTeamNoteRepository::new();
        notes
            .expect_find_by_id()
            .returning(move |_| Ok(Some(note.clone())));
        notes
    }

    #[tokio::test]
    async fn test_member_can_create_note() {
        let fixture = Fixture::new();
        let (team_id, member) = (fixture.team_id, fixture.member);

        let mut notes = MockTestTeamNoteRepository::new();
        notes
            .expect_create()
            .withf(move |note| note.team_id == team_id && note.author_id == member)
            .times(1)
            .returning(|note| Ok(note));

        let service = TeamNoteService::new(Arc::new(notes), Arc::new(fixture.teams()));

        let note = service
            .create_note(&member, &team_id, body("hello team"))
            .await
            .unwrap();
        assert_eq!(note.body.as_str(), "hello team");
    }

    #[tokio::test]
    async fn test_non_member_cannot_list_or_create() {
        let fixture = Fixture::new();

        let mut notes = MockTestTeamNoteRepository::new();
        notes.expect_create().times(0);
        notes.expect_list_for_team().times(0);

        let service = TeamNoteService::new(Arc::new(notes), Arc::new(fixture.teams()));
        let stranger = UserId::new();

        assert!(matches!(
            service.list_notes(&stranger, &fixture.team_id).await,
            Err(TeamNoteError::Access(AccessError::NotMember))
        ));
        assert!(matches!(
            service
                .create_note(&stranger, &fixture.team_id, body("hi"))
                .await,
            Err(TeamNoteError::Access(AccessError::NotMember))
        ));
    }

    #[tokio::test]
    async fn test_note_from_another_team_is_forbidden() {
        let fixture = Fixture::new();
        let foreign = TeamNote::new(TeamId::new(), UserId::new(), body("elsewhere"));
        let foreign_id = foreign.id;

        let service =
            TeamNoteService::new(Arc::new(notes_with(foreign)), Arc::new(fixture.teams()));

        assert!(matches!(
            service
                .get_note(&fixture.member, &fixture.team_id, &foreign_id)
                .await,
            Err(TeamNoteError::Access(AccessError::WrongTeam))
        ));
    }

    #[tokio::test]
    async fn test_any_member_can_update_note() {
        let fixture = Fixture::new();
        let note = fixture.note();
        let note_id = note.id;

        let mut notes = notes_with(note);
        notes
            .expect_update()
            .times(1)
            .returning(|note| Ok(note));

        let service = TeamNoteService::new(Arc::new(notes), Arc::new(fixture.teams()));

        let updated = service
            .update_note(&fixture.member, &fixture.team_id, &note_id, body("edited"))
            .await
            .unwrap();
        assert_eq!(updated.body.as_str(), "edited");
        assert_eq!(updated.author_id, fixture.author);
    }

    #[tokio::test]
    async fn test_delete_requires_author_or_admin() {
        let fixture = Fixture::new();
        let note = fixture.note();
        let note_id = note.id;

        let mut notes = notes_with(note);
        notes
            .expect_delete()
            .withf(move |id| *id == note_id)
            .times(2)
            .returning(|_| Ok(()));

        let service = TeamNoteService::new(Arc::new(notes), Arc::new(fixture.teams()));
        let team_id = fixture.team_id;

        assert!(matches!(
            service.delete_note(&fixture.member, &team_id, &note_id).await,
            Err(TeamNoteError::Access(AccessError::NotAuthorOrAdmin))
        ));
        assert!(service
            .delete_note(&fixture.author, &team_id, &note_id)
            .await
            .is_ok());
        assert!(service
            .delete_note(&fixture.admin, &team_id, &note_id)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_missing_note_is_not_found() {
        let fixture = Fixture::new();

        let mut notes = MockTestTeamNoteRepository::new();
        notes.expect_find_by_id().returning(|_| Ok(None));

        let service = TeamNoteService::new(Arc::new(notes), Arc::new(fixture.teams()));

        assert!(matches!(
            service
                .get_note(&fixture.member, &fixture.team_id, &NoteId::new())
                .await,
            Err(TeamNoteError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_membership_lookup_failure_is_a_database_error() {
        let mut teams = MockTestTeamRepository::new();
        teams
            .expect_find_membership()
            .returning(|_, _| Err(TeamError::DatabaseError("connection reset".to_string())));

        let mut notes = MockTestTeamNoteRepository::new();
        notes.expect_list_for_team().times(0);

        let service = TeamNoteService::new(Arc::new(notes), Arc::new(teams));

        let result = service.list_notes(&UserId::new(), &TeamId::new()).await;
        assert!(
            matches!(result, Err(TeamNoteError::DatabaseError(msg)) if msg.contains("connection reset"))
        );
    }
}
