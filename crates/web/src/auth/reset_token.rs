//! Password-reset tokens: random, single-use, stored only as a SHA-256 digest.

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;

/// A freshly minted token. `token` goes into the email, `digest` into the
/// database.
#[derive(Debug, Clone)]
pub struct IssuedResetToken {
    pub token: String,
    pub digest: String,
    pub expires_at: DateTime<Utc>,
}

pub fn issue(now: DateTime<Utc>) -> IssuedResetToken {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    let token = general_purpose::URL_SAFE_NO_PAD.encode(bytes);

    IssuedResetToken {
        digest: digest(&token),
        token,
        expires_at: now + Duration::minutes(RESET_TOKEN_TTL_MINUTES),
    }
}

/// Hex-encoded SHA-256 of the token as presented by the client.
pub fn digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_tokens_are_unique() {
        let now = Utc::now();
        let a = issue(now);
        let b = issue(now);
        assert_ne!(a.token, b.token);
        assert_eq!(a.token.len(), 43);
    }

    #[test]
    fn test_digest_matches_token() {
        let issued = issue(Utc::now());
        assert_eq!(issued.digest, digest(&issued.token));
        assert_ne!(issued.digest, issued.token);
        assert_eq!(issued.digest.len(), 64);
    }

    #[test]
    fn test_expiry_is_one_hour() {
        let now = Utc::now();
        assert_eq!(issue(now).expires_at - now, Duration::hours(1));
    }

    #[test]
    fn test_known_digest() {
        assert_eq!(
            digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
