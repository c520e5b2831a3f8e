use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::session::errors::RefreshRejection;
use crate::user::models::User;
use crate::user::models::UserId;

/// Persisted refresh token bound to a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub token: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Mint a fresh, unrevoked token for `user_id` expiring after `ttl`.
    pub fn issue(user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            token: auth::generate_refresh_token(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        }
    }

    /// A token is usable while it is unrevoked and `now < expires_at`.
    pub fn check_usable(&self, now: DateTime<Utc>) -> Result<(), RefreshRejection> {
        if self.revoked_at.is_some() {
            return Err(RefreshRejection::Revoked);
        }
        if now >= self.expires_at {
            return Err(RefreshRejection::Expired);
        }
        Ok(())
    }
}

/// Credentials presented at login. The email is not validated; an
/// unparseable address simply matches no user.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}
