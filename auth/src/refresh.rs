use rand::RngCore;

/// Number of random bytes in a refresh token.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// Generate an opaque refresh token.
///
/// # Returns
/// 32 bytes from the operating system CSPRNG, hex encoded (64 lowercase characters)
pub fn generate_refresh_token() -> String {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
