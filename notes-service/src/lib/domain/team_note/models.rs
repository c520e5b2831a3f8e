use chrono::DateTime;
use chrono::Utc;

use crate::note::models::NoteBody;
use crate::note::models::NoteId;
use crate::team::models::TeamId;
use crate::user::models::UserId;

/// Note shared with a team. Access is decided by team membership.
#[derive(Debug, Clone)]
pub struct TeamNote {
    pub id: NoteId,
    pub team_id: TeamId,
    pub author_id: UserId,
    pub body: NoteBody,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TeamNote {
    pub fn new(team_id: TeamId, author_id: UserId, body: NoteBody) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            team_id,
            author_id,
            body,
            created_at: now,
            updated_at: now,
        }
    }
}
