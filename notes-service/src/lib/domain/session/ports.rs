use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::RefreshToken;
use crate::session::models::Session;

/// Port for login, token refresh and logout.
#[async_trait]
pub trait SessionServicePort: Send + Sync + 'static {
    /// Verify credentials and open a session.
    ///
    /// # Returns
    /// The user with a session token and a newly persisted refresh token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `TokenIssuance` - Session token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError>;

    /// Exchange a refresh token for a new session token.
    ///
    /// # Errors
    /// * `RefreshInvalid` - Token unknown, revoked or expired
    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError>;

    /// Revoke a refresh token. Revoking an already revoked token succeeds.
    ///
    /// # Errors
    /// * `TokenNotFound` - Token does not exist
    async fn logout(&self, refresh_token: &str) -> Result<(), SessionError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, SessionError>;

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, SessionError>;

    /// Set `revoked_at` to `at` unless it is already set.
    ///
    /// # Errors
    /// * `TokenNotFound` - Token does not exist
    /// * `DatabaseError` - Database operation failed
    async fn revoke(&self, token: &str, at: DateTime<Utc>) -> Result<(), SessionError>;
}
