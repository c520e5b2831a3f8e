use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Duration;
use chrono::Utc;

use crate::session::errors::RefreshRejection;
use crate::session::errors::SessionError;
use crate::session::models::LoginCommand;
use crate::session::models::RefreshToken;
use crate::session::models::Session;
use crate::session::ports::RefreshTokenRepository;
use crate::session::ports::SessionServicePort;
use crate::user::models::EmailAddress;
use crate::user::ports::UserRepository;

/// Domain service implementation for session operations.
pub struct SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    authenticator: Arc<Authenticator>,
    refresh_token_ttl: Duration,
}

impl<UR, RR> SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new session service.
    ///
    /// # Arguments
    /// * `users` - User lookup for login
    /// * `refresh_tokens` - Refresh token persistence
    /// * `authenticator` - Password verification and session token signing
    /// * `refresh_token_ttl` - Lifetime of refresh tokens issued at login
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        authenticator: Arc<Authenticator>,
        refresh_token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            authenticator,
            refresh_token_ttl,
        }
    }
}

#[async_trait]
impl<UR, RR> SessionServicePort for SessionService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn login(&self, command: LoginCommand) -> Result<Session, SessionError> {
        let user = match EmailAddress::new(command.email) {
            Ok(email) => self.users.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            tracing::warn!("Login rejected: unknown email");
            self.authenticator.reject_unknown_account(&command.password);
            return Err(SessionError::InvalidCredentials);
        };

        let result = self
            .authenticator
            .authenticate(&command.password, &user.password_hash, user.id.0)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(user_id = %user.id, "Login rejected: wrong password");
                    SessionError::InvalidCredentials
                }
                other => SessionError::TokenIssuance(other.to_string()),
            })?;

        let refresh_token = self
            .refresh_tokens
            .create(RefreshToken::issue(user.id, self.refresh_token_ttl))
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(Session {
            user,
            access_token: result.access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, SessionError> {
        let record = self
            .refresh_tokens
            .find_by_token(refresh_token)
            .await?
            .ok_or(SessionError::RefreshInvalid(RefreshRejection::NotFound))
            .and_then(|record| {
                record
                    .check_usable(Utc::now())
                    .map(|_| record)
                    .map_err(SessionError::RefreshInvalid)
            })
            .inspect_err(|e| {
                if let Some(reason) = e.refresh_rejection() {
                    tracing::warn!(reason = %reason, "Refresh rejected");
                }
            })?;

        self.authenticator
            .issue_session_token(record.user_id.0)
            .map_err(|e| SessionError::TokenIssuance(e.to_string()))
    }

    async fn logout(&self, refresh_token: &str) -> Result<(), SessionError> {
        self.refresh_tokens.revoke(refresh_token, Utc::now()).await
    }
}
