use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::team::models::Membership;
use crate::domain::team::models::Role;
use crate::domain::team::models::Team;
use crate::domain::team::models::TeamId;
use crate::domain::team::models::TeamName;
use crate::domain::team::ports::TeamRepository;
use crate::domain::user::models::UserId;
use crate::team::errors::TeamError;

#[derive(sqlx::FromRow)]
struct TeamRow {
    id: Uuid,
    team_name: String,
    created_by: Uuid,
    is_private: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TeamRow> for Team {
    type Error = TeamError;

    fn try_from(r: TeamRow) -> Result<Self, Self::Error> {
        Ok(Team {
            id: TeamId(r.id),
            name: TeamName::new(r.team_name)?,
            created_by: UserId(r.created_by),
            is_private: r.is_private,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct MembershipRow {
    team_id: Uuid,
    user_id: Uuid,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = TeamError;

    fn try_from(r: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            team_id: TeamId(r.team_id),
            user_id: UserId(r.user_id),
            role: r.role.parse::<Role>()?,
            created_at: r.created_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> TeamError {
    TeamError::DatabaseError(e.to_string())
}

pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn create(&self, team: Team, creator: Membership) -> Result<Team, TeamError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO teams (id, team_name, created_by, is_private, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(team.id.0)
        .bind(team.name.as_str())
        .bind(team.created_by.0)
        .bind(team.is_private)
        .bind(team.created_at)
        .bind(team.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, user_id, role, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(creator.team_id.0)
        .bind(creator.user_id.0)
        .bind(creator.role.as_str())
        .bind(creator.created_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(team)
    }

    async fn find_by_id(&self, id: &TeamId) -> Result<Option<Team>, TeamError> {
        sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT id, team_name, created_by, is_private, created_at, updated_at
            FROM teams
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Team::try_from)
        .transpose()
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Team>, TeamError> {
        sqlx::query_as::<_, TeamRow>(
            r#"
            SELECT t.id, t.team_name, t.created_by, t.is_private, t.created_at, t.updated_at
            FROM teams t
            JOIN team_members m ON m.team_id = t.id
            WHERE m.user_id = $1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(user_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?
        .into_iter()
        .map(Team::try_from)
        .collect()
    }

    async fn delete(&self, id: &TeamId) -> Result<(), TeamError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // Memberships and team_notes links cascade; the note rows do not.
        sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id IN (SELECT note_id FROM team_notes WHERE team_id = $1)
            "#,
        )
        .bind(id.0)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TeamError::NotFound(id.to_string()));
        }

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }

    async fn find_membership(
        &self,
        team_id: &TeamId,
        user_id: &UserId,
    ) -> Result<Option<Membership>, TeamError> {
        sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT team_id, user_id, role, created_at
            FROM team_members
            WHERE team_id = $1 AND user_id = $2
            "#,
        )
        .bind(team_id.0)
        .bind(user_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(Membership::try_from)
        .transpose()
    }

    async fn add_member(&self, membership: Membership) -> Result<Membership, TeamError> {
        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, user_id, role, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(membership.team_id.0)
        .bind(membership.user_id.0)
        .bind(membership.role.as_str())
        .bind(membership.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("team_members_pkey")
                {
                    return TeamError::AlreadyMember(membership.user_id.to_string());
                }
                if db_err.is_foreign_key_violation() {
                    return TeamError::UserNotFound(membership.user_id.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(membership)
    }

    async fn remove_member(&self, team_id: &TeamId, user_id: &UserId) -> Result<(), TeamError> {
        let result = sqlx::query("DELETE FROM team_members WHERE team_id = $1 AND user_id = $2")
            .bind(team_id.0)
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TeamError::MemberNotFound(user_id.to_string()));
        }

        Ok(())
    }

    async fn list_members(&self, team_id: &TeamId) -> Result<Vec<Membership>, TeamError> {
        sqlx::query_as::<_, MembershipRow>(
            r#"
            SELECT team_id, user_id, role, created_at
            FROM team_members
            WHERE team_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(team_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?
        .into_iter()
        .map(Membership::try_from)
        .collect()
    }

    async fn count_admins(&self, team_id: &TeamId) -> Result<i64, TeamError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM team_members WHERE team_id = $1 AND role = 'admin'",
        )
        .bind(team_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }
}
