use chrono::Duration;
use http::HeaderMap;
use uuid::Uuid;

use crate::header::extract_bearer_token;
use crate::header::HeaderError;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::argon2::UNMATCHABLE_HASH;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Default lifetime of a session token.
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

/// Authentication coordinator combining password verification and session tokens.
///
/// Owns the hasher and the token handler so that a service needs a single
/// value, built once at startup, to register users, log them in and
/// authenticate incoming requests.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    session_ttl: Duration,
}

/// Result of successful authentication.
#[derive(Debug)]
pub struct AuthenticationResult {
    /// Session token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing token: {0}")]
    MissingToken(#[from] HeaderError),

    #[error("Unauthorized: {0}")]
    Unauthorized(#[source] JwtError),

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for session token signing
    ///
    /// # Errors
    /// * `Config` - Secret is empty or too short
    pub fn new(jwt_secret: &[u8]) -> Result<Self, JwtError> {
        Ok(Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret)?,
            session_ttl: Duration::minutes(DEFAULT_SESSION_TTL_MINUTES),
        })
    }

    /// Override the session token lifetime.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a password against a stored hash.
    ///
    /// A stored hash that cannot be parsed counts as a mismatch.
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> bool {
        self.password_hasher
            .verify(password, stored_hash)
            .unwrap_or(false)
    }

    /// Verify credentials and issue a session token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match or hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: Uuid,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.verify_password(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.issue_session_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Reject a login for which no account exists.
    ///
    /// Runs a verification at full cost first, so the rejection takes as long
    /// as a wrong password for a known account.
    pub fn reject_unknown_account(&self, password: &str) -> AuthenticationError {
        let _ = self.verify_password(password, UNMATCHABLE_HASH);
        AuthenticationError::InvalidCredentials
    }

    /// Issue a session token without password verification.
    ///
    /// Used by the refresh flow once the refresh token has been accepted.
    pub fn issue_session_token(&self, subject: Uuid) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject, self.session_ttl)
    }

    /// Validate a session token and return its subject.
    pub fn validate_session_token(&self, token: &str) -> Result<Uuid, JwtError> {
        self.jwt_handler.validate(token)
    }

    /// Authenticate a request from its `Authorization: Bearer` header.
    ///
    /// # Returns
    /// The authenticated user id
    ///
    /// # Errors
    /// * `MissingToken` - Header absent or not a bearer credential
    /// * `Unauthorized` - Token failed validation
    pub fn authenticate_request(&self, headers: &HeaderMap) -> Result<Uuid, AuthenticationError> {
        let token = extract_bearer_token(headers)?;

        self.validate_session_token(token)
            .map_err(AuthenticationError::Unauthorized)
    }
}
