use thiserror::Error;

/// Error type for session token operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// The signing secret is unusable (empty or too short).
    #[error("Invalid signing configuration: {0}")]
    Config(String),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    /// Unparseable token, bad signature, wrong algorithm or wrong issuer.
    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token subject is invalid: {0}")]
    InvalidSubject(String),
}
