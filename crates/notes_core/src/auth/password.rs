//! Argon2id credential hashing.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Hashes and verifies user passwords.
pub trait CredentialHasher {
    /// Returns a self-describing hash string for storage.
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;
    /// Checks `plaintext` against a stored hash. Malformed hashes verify false.
    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// Argon2 cost parameters are out of range.
    InvalidParams(String),
    /// Hash computation failed.
    Hashing(String),
}

impl Display for CredentialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParams(message) => write!(f, "invalid argon2 parameters: {message}"),
            Self::Hashing(message) => write!(f, "password hashing failed: {message}"),
        }
    }
}

impl Error for CredentialError {}

/// Argon2id hasher producing PHC strings (`$argon2id$v=19$...`).
///
/// Verification reads the cost parameters embedded in the stored hash, so
/// changing the configured costs never invalidates existing users.
pub struct Argon2CredentialHasher {
    argon2: Argon2<'static>,
}

impl Argon2CredentialHasher {
    /// Builds a hasher with explicit costs.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, CredentialError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|err| CredentialError::InvalidParams(err.to_string()))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        match PasswordHash::new(stored_hash) {
            Ok(parsed) => self
                .argon2
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}
