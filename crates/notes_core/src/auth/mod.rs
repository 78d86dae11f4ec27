//! Credential hashing and bearer-token collaborators.
//!
//! # Responsibility
//! - Define the narrow interfaces the auth service consumes.
//! - Provide the production implementations (Argon2id, keyed-BLAKE3 tokens).
//!
//! # Invariants
//! - Plaintext passwords never leave `CredentialHasher::hash`/`verify`.
//! - A token verifies only with the secret that issued it and before expiry.

pub mod password;
pub mod token;

pub use password::{Argon2CredentialHasher, CredentialError, CredentialHasher};
pub use token::{SignedTokenIssuer, TokenError, TokenIssuer};
