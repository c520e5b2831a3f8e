use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::note::models::NoteBody;
use crate::domain::note::models::NoteId;
use crate::domain::team::models::TeamId;
use crate::domain::team_note::models::TeamNote;
use crate::domain::team_note::ports::TeamNoteRepository;
use crate::domain::user::models::UserId;
use crate::team_note::errors::TeamNoteError;

#[derive(sqlx::FromRow)]
struct TeamNoteRow {
    id: Uuid,
    team_id: Uuid,
    user_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TeamNoteRow> for TeamNote {
    type Error = TeamNoteError;

    fn try_from(r: TeamNoteRow) -> Result<Self, Self::Error> {
        Ok(TeamNote {
            id: NoteId(r.id),
            team_id: TeamId(r.team_id),
            author_id: UserId(r.user_id),
            body: NoteBody::new(r.body)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> TeamNoteError {
    TeamNoteError::DatabaseError(e.to_string())
}

pub struct PostgresTeamNoteRepository {
    pool: PgPool,
}

impl PostgresTeamNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TeamNoteRepository for PostgresTeamNoteRepository {
    async fn create(&self, note: TeamNote) -> Result<TeamNote, TeamNoteError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(note.id.0)
        .bind(note.author_id.0)
        .bind(note.body.as_str())
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        sqlx::query("INSERT INTO team_notes (note_id, team_id) VALUES ($1, $2)")
            .bind(note.id.0)
            .bind(note.team_id.0)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(note)
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<TeamNote>, TeamNoteError> {
        sqlx::query_as::<_, TeamNoteRow>(
            r#"
            SELECT n.id, tn.team_id, n.user_id, n.body, n.created_at, n.updated_at
            FROM notes n
            JOIN team_notes tn ON tn.note_id = n.id
            WHERE n.id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(TeamNote::try_from)
        .transpose()
    }

    async fn list_for_team(&self, team_id: &TeamId) -> Result<Vec<TeamNote>, TeamNoteError> {
        sqlx::query_as::<_, TeamNoteRow>(
            r#"
            SELECT n.id, tn.team_id, n.user_id, n.body, n.created_at, n.updated_at
            FROM notes n
            JOIN team_notes tn ON tn.note_id = n.id
            WHERE tn.team_id = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(team_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?
        .into_iter()
        .map(TeamNote::try_from)
        .collect()
    }

    async fn update(&self, note: TeamNote) -> Result<TeamNote, TeamNoteError> {
        let result = sqlx::query(
            r#"
            UPDATE notes
            SET body = $2, updated_at = $3
            WHERE id = $1
              AND EXISTS (SELECT 1 FROM team_notes tn WHERE tn.note_id = notes.id)
            "#,
        )
        .bind(note.id.0)
        .bind(note.body.as_str())
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TeamNoteError::NotFound(note.id.to_string()));
        }

        Ok(note)
    }

    async fn delete(&self, id: &NoteId) -> Result<(), TeamNoteError> {
        // The team_notes link goes with the note via ON DELETE CASCADE.
        let result = sqlx::query(
            r#"
            DELETE FROM notes
            WHERE id = $1
              AND EXISTS (SELECT 1 FROM team_notes tn WHERE tn.note_id = notes.id)
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(TeamNoteError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
