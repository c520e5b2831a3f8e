use http::header::AUTHORIZATION;
use http::HeaderMap;

/// Scheme prefix for session and refresh tokens.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Scheme prefix for service API keys.
pub const API_KEY_PREFIX: &str = "ApiKey ";

/// Authorization header extraction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("Authorization header is missing")]
    Missing,

    #[error("Authorization header is not valid ASCII")]
    InvalidEncoding,

    #[error("Authorization header does not use the {0:?} scheme")]
    WrongScheme(&'static str),

    #[error("Authorization header carries no credential")]
    EmptyCredential,
}

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-sensitively and the credential is returned
/// with surrounding whitespace removed.
///
/// # Errors
/// * `Missing` - No Authorization header
/// * `InvalidEncoding` - Header value is not visible ASCII
/// * `WrongScheme` - Header does not start with `Bearer `
/// * `EmptyCredential` - Nothing follows the scheme
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_credential(headers, BEARER_PREFIX)
}

/// Extract the key from `Authorization: ApiKey <key>`.
///
/// Same rules as [`extract_bearer_token`].
pub fn extract_api_key(headers: &HeaderMap) -> Result<&str, HeaderError> {
    extract_credential(headers, API_KEY_PREFIX)
}

fn extract_credential<'a>(
    headers: &'a HeaderMap,
    prefix: &'static str,
) -> Result<&'a str, HeaderError> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or(HeaderError::Missing)?
        .to_str()
        .map_err(|_| HeaderError::InvalidEncoding)?;

    let credential = value
        .strip_prefix(prefix)
        .ok_or(HeaderError::WrongScheme(prefix.trim_end()))?
        .trim();

    if credential.is_empty() {
        return Err(HeaderError::EmptyCredential);
    }

    Ok(credential)
}
