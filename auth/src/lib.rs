//! Authentication primitives for the notes backend
//!
//! - Password hashing (Argon2id, fixed cost)
//! - Session token issuing and validation (HS256, fixed issuer)
//! - Opaque refresh token generation
//! - `Authorization` header extraction (`Bearer` and `ApiKey` schemes)
//! - Authentication coordination
//!
//! Persistence of refresh tokens and authorization rules live in the service;
//! this crate holds no state beyond the configured signing key.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//! use uuid::Uuid;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//! let user_id = Uuid::new_v4();
//! let token = handler.issue(user_id, Duration::hours(1)).unwrap();
//! assert_eq!(handler.validate(&token).unwrap(), user_id);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{generate_refresh_token, Authenticator};
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!").unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue tokens
//! let user_id = Uuid::new_v4();
//! let result = auth.authenticate("password123", &hash, user_id).unwrap();
//! let refresh_token = generate_refresh_token();
//! assert_eq!(refresh_token.len(), 64);
//!
//! // Validate token
//! assert_eq!(auth.validate_session_token(&result.access_token).unwrap(), user_id);
//! ```

pub mod authenticator;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use header::extract_api_key;
pub use header::extract_bearer_token;
pub use header::HeaderError;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use refresh::generate_refresh_token;
