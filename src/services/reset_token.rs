use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};

/// How long a password reset token stays usable.
pub const RESET_TOKEN_TTL_MINUTES: i64 = 10;

/// A freshly issued reset secret. `token` goes to the user by email, only
/// `token_hash` and `expires_at` are persisted.
#[derive(Debug, Clone)]
pub struct IssuedResetToken {
    pub token: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

pub fn issue_reset_token(now: DateTime<Utc>) -> IssuedResetToken {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    let token = hex::encode(bytes);

    IssuedResetToken {
        token_hash: hash_reset_token(&token),
        token,
        expires_at: now + Duration::minutes(RESET_TOKEN_TTL_MINUTES),
    }
}

/// SHA-256 hex digest, the form the store keeps and looks up by.
pub fn hash_reset_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
