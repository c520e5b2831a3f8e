use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::note::models::Note;
use crate::domain::note::models::NoteBody;
use crate::domain::note::models::NoteId;
use crate::domain::note::ports::NoteRepository;
use crate::domain::user::models::UserId;
use crate::note::errors::NoteError;

// Team notes share the `notes` table; this repository only sees rows
// without a `team_notes` link.
const PERSONAL: &str =
    "NOT EXISTS (SELECT 1 FROM team_notes tn WHERE tn.note_id = notes.id)";

#[derive(sqlx::FromRow)]
struct NoteRow {
    id: Uuid,
    user_id: Uuid,
    body: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NoteRow> for Note {
    type Error = NoteError;

    fn try_from(r: NoteRow) -> Result<Self, Self::Error> {
        Ok(Note {
            id: NoteId(r.id),
            owner_id: UserId(r.user_id),
            body: NoteBody::new(r.body)?,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub struct PostgresNoteRepository {
    pool: PgPool,
}

impl PostgresNoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NoteRepository for PostgresNoteRepository {
    async fn create(&self, note: Note) -> Result<Note, NoteError> {
        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, body, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(note.id.0)
        .bind(note.owner_id.0)
        .bind(note.body.as_str())
        .bind(note.created_at)
        .bind(note.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| NoteError::DatabaseError(e.to_string()))?;

        Ok(note)
    }

    async fn find_by_id(&self, id: &NoteId) -> Result<Option<Note>, NoteError> {
        let query = format!(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM notes
            WHERE id = $1 AND {}
            "#,
            PERSONAL
        );

        sqlx::query_as::<_, NoteRow>(&query)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?
            .map(Note::try_from)
            .transpose()
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Note>, NoteError> {
        let query = format!(
            r#"
            SELECT id, user_id, body, created_at, updated_at
            FROM notes
            WHERE user_id = $1 AND {}
            ORDER BY created_at DESC
            "#,
            PERSONAL
        );

        sqlx::query_as::<_, NoteRow>(&query)
            .bind(owner.0)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?
            .into_iter()
            .map(Note::try_from)
            .collect()
    }

    async fn update(&self, note: Note) -> Result<Note, NoteError> {
        let query = format!(
            r#"
            UPDATE notes
            SET body = $2, updated_at = $3
            WHERE id = $1 AND {}
            "#,
            PERSONAL
        );

        let result = sqlx::query(&query)
            .bind(note.id.0)
            .bind(note.body.as_str())
            .bind(note.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(NoteError::NotFound(note.id.to_string()));
        }

        Ok(note)
    }

    async fn delete(&self, id: &NoteId) -> Result<(), NoteError> {
        let query = format!("DELETE FROM notes WHERE id = $1 AND {}", PERSONAL);

        let result = sqlx::query(&query)
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| NoteError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(NoteError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
