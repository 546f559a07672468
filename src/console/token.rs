// console/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

pub const DEFAULT_TOKEN_BYTES: usize = 32;

/// Session cookie value from the OS RNG.
pub fn generate_token_default() -> String {
    let mut rng = OsRng;
    generate_token(&mut rng, DEFAULT_TOKEN_BYTES)
}

/// Base64 URL-safe, no padding: 32 bytes -> 43 chars.
pub fn generate_token<R: RngCore>(rng: &mut R, nbytes: usize) -> String {
    let mut buf = vec![0u8; nbytes];
    rng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buf)
}
