use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::claims::Claims;
use super::errors::JwtError;

/// Issuer stamped into and required from every session token.
pub const ISSUER: &str = "notes-service";

/// Minimum accepted length of the HMAC signing secret, in bytes.
pub const MIN_SECRET_LENGTH: usize = 32;

/// Session token handler for issuing and validating tokens.
///
/// Uses HS256 exclusively. The secret is checked once at construction, so
/// a handler that exists always signs with a usable key.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    ///
    /// # Returns
    /// JwtHandler configured with HS256
    ///
    /// # Errors
    /// * `Config` - Secret is empty or shorter than 32 bytes
    pub fn new(secret: &[u8]) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::Config("no signing secret configured".to_string()));
        }
        if secret.len() < MIN_SECRET_LENGTH {
            return Err(JwtError::Config(format!(
                "signing secret must be at least {} bytes, got {}",
                MIN_SECRET_LENGTH,
                secret.len()
            )));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        })
    }

    /// Encode arbitrary claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Decode a token, verifying signature, algorithm, issuer and expiry.
    ///
    /// Expiry is checked with zero leeway.
    ///
    /// # Errors
    /// * `Expired` - The `exp` claim is in the past
    /// * `Malformed` - Anything else that prevents verification
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_issuer(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss"]);

        let token_data =
            decode::<T>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        Ok(token_data.claims)
    }

    /// Issue a session token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Subject of the token
    /// * `ttl` - Token lifetime
    ///
    /// # Returns
    /// Signed three-segment token
    pub fn issue(&self, user_id: Uuid, ttl: Duration) -> Result<String, JwtError> {
        self.encode(&Claims::for_session(user_id, ISSUER, ttl))
    }

    /// Validate a session token and return the user it was issued to.
    ///
    /// # Errors
    /// * `Malformed` - Token unparseable, signature/algorithm/issuer mismatch
    /// * `Expired` - Token lifetime is over
    /// * `InvalidSubject` - Subject missing, not a UUID, or the nil UUID
    pub fn validate(&self, token: &str) -> Result<Uuid, JwtError> {
        let claims: Claims = self.decode(token)?;

        let subject = claims
            .sub
            .ok_or_else(|| JwtError::InvalidSubject("missing subject claim".to_string()))?;

        let user_id = Uuid::parse_str(&subject)
            .map_err(|e| JwtError::InvalidSubject(format!("{:?}: {}", subject, e)))?;

        if user_id.is_nil() {
            return Err(JwtError::InvalidSubject("nil user id".to_string()));
        }

        Ok(user_id)
    }
}

/// Issue a session token with an explicit secret.
pub fn issue(user_id: Uuid, secret: &[u8], ttl: Duration) -> Result<String, JwtError> {
    JwtHandler::new(secret)?.issue(user_id, ttl)
}

/// Validate a session token with an explicit secret.
pub fn validate(token: &str, secret: &[u8]) -> Result<Uuid, JwtError> {
    JwtHandler::new(secret)?.validate(token)
}
