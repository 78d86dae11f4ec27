//! Signed bearer tokens.
//!
//! Token layout: `base64url(user_id ":" expires_at_secs) "." hex(mac)` where
//! `mac = blake3::keyed_hash(key, payload_segment)` and `key` is derived from
//! the configured secret.

use crate::model::user::UserId;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

const KEY_CONTEXT: &str = "notes_core 2024 bearer token signing key";

/// Issues and verifies bearer tokens for authenticated users.
pub trait TokenIssuer {
    fn issue(&self, user_id: UserId) -> String;
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    Malformed,
    BadSignature,
    Expired,
}

impl Display for TokenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed => write!(f, "token is malformed"),
            Self::BadSignature => write!(f, "token signature mismatch"),
            Self::Expired => write!(f, "token expired"),
        }
    }
}

impl Error for TokenError {}

/// Keyed-BLAKE3 token issuer with a fixed time-to-live.
pub struct SignedTokenIssuer {
    key: [u8; 32],
    ttl: Duration,
}

impl SignedTokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            key: blake3::derive_key(KEY_CONTEXT, secret.as_bytes()),
            ttl,
        }
    }

    fn sign(&self, payload_segment: &str) -> blake3::Hash {
        blake3::keyed_hash(&self.key, payload_segment.as_bytes())
    }

    fn issue_at(&self, user_id: UserId, now_secs: u64) -> String {
        let expires_at = now_secs.saturating_add(self.ttl.as_secs());
        let payload = URL_SAFE_NO_PAD.encode(format!("{user_id}:{expires_at}"));
        let mac = self.sign(&payload);
        format!("{payload}.{}", mac.to_hex())
    }

    fn verify_at(&self, token: &str, now_secs: u64) -> Result<UserId, TokenError> {
        let (payload, mac_hex) = token.split_once('.').ok_or(TokenError::Malformed)?;
        let presented = blake3::Hash::from_hex(mac_hex).map_err(|_| TokenError::Malformed)?;
        // `blake3::Hash` equality is constant-time.
        if presented != self.sign(payload) {
            return Err(TokenError::BadSignature);
        }

        let decoded = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let text = String::from_utf8(decoded).map_err(|_| TokenError::Malformed)?;
        let (user_text, expires_text) = text.split_once(':').ok_or(TokenError::Malformed)?;
        let user_id: UserId = user_text.parse().map_err(|_| TokenError::Malformed)?;
        let expires_at: u64 = expires_text.parse().map_err(|_| TokenError::Malformed)?;

        if now_secs >= expires_at {
            return Err(TokenError::Expired);
        }
        Ok(user_id)
    }
}

impl TokenIssuer for SignedTokenIssuer {
    fn issue(&self, user_id: UserId) -> String {
        self.issue_at(user_id, unix_now_secs())
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify_at(token, unix_now_secs())
    }
}

fn unix_now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}
