//! Opaque session token generation and digesting.
//!
//! Raw tokens leave the process exactly once (in the login response and
//! cookie); only their SHA-256 digest is ever persisted.

use std::fmt;

use rand::{Rng, distributions::Alphanumeric, rngs::OsRng};
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Number of alphanumeric characters in a raw session token.
pub const SESSION_TOKEN_CHARS: usize = 200;

/// A raw session token, held only in memory.
pub struct SessionToken(String);

impl SessionToken {
    /// Generate a fresh random token from the OS entropy source.
    #[must_use]
    pub fn generate() -> Self {
        let raw = OsRng
            .sample_iter(&Alphanumeric)
            .take(SESSION_TOKEN_CHARS)
            .map(char::from)
            .collect();

        Self(raw)
    }

    /// Access the raw token string for transmission to the client.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(**redacted**)")
    }
}

impl Drop for SessionToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Compute the hex-encoded SHA-256 digest under which a token is stored
/// and looked up.
#[must_use]
pub fn digest_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());

    encode_hex(&digest)
}

fn encode_hex(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";

    let mut encoded = String::with_capacity(bytes.len() * 2);

    for byte in bytes {
        encoded.push(HEX[(byte >> 4) as usize] as char);
        encoded.push(HEX[(byte & 0x0f) as usize] as char);
    }

    encoded
}
