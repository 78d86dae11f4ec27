//! Registration, login and token authentication.
//!
//! # Responsibility
//! - Validate and register new identities.
//! - Exchange username/password for a bearer token.
//! - Resolve a bearer token back to a user id.
//!
//! # Invariants
//! - Unknown usernames and wrong passwords both yield `InvalidCredentials`.
//! - Duplicate usernames are caught by the pre-check and, for racing
//!   registrations, by the storage unique constraint.

use crate::auth::{CredentialHasher, TokenIssuer};
use crate::model::user::{NewUser, User, UserId};
use crate::model::validation::ValidationError;
use crate::repo::user_repo::UserRepository;
use crate::repo::{Entity, RepoError};
use crate::service::{ServiceError, ServiceResult};
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum accepted password length in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").expect("valid username regex"));

pub struct AuthService<'a, R, H: ?Sized, T: ?Sized> {
    users: R,
    hasher: &'a H,
    tokens: &'a T,
}

impl<'a, R, H, T> AuthService<'a, R, H, T>
where
    R: UserRepository,
    H: CredentialHasher + ?Sized,
    T: TokenIssuer + ?Sized,
{
    pub fn new(users: R, hasher: &'a H, tokens: &'a T) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Registers a new user and returns the stored record.
    pub fn register(&self, username: &str, password: &str) -> ServiceResult<User> {
        validate_username(username)?;
        validate_password(password)?;

        if self.users.find_by_username(username)?.is_some() {
            return Err(ServiceError::DuplicateIdentity(username.to_string()));
        }

        let password_hash = self.hasher.hash(password)?;
        let created = self.users.create_user(&NewUser {
            username: username.to_string(),
            password_hash,
        });
        match created {
            Ok(user) => Ok(user),
            Err(RepoError::Duplicate(_)) => {
                Err(ServiceError::DuplicateIdentity(username.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Verifies credentials and issues a bearer token.
    pub fn login(&self, username: &str, password: &str) -> ServiceResult<String> {
        let user = self
            .users
            .find_by_username(username)?
            .ok_or(ServiceError::InvalidCredentials)?;
        if !self.hasher.verify(password, &user.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(self.tokens.issue(user.id))
    }

    /// Resolves a bearer token to the user id it was issued for.
    pub fn authenticate(&self, token: &str) -> ServiceResult<UserId> {
        self.tokens
            .verify(token)
            .map_err(|_| ServiceError::Unauthenticated)
    }

    /// Looks up a user by exact username.
    pub fn find_user_by_name(&self, username: &str) -> ServiceResult<User> {
        self.users
            .find_by_username(username)?
            .ok_or_else(|| ServiceError::NotFound(Entity::User(username.to_string())))
    }
}

fn validate_username(username: &str) -> Result<(), ValidationError> {
    if USERNAME_RE.is_match(username) {
        Ok(())
    } else {
        Err(ValidationError::InvalidUsername(username.to_string()))
    }
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() || password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::WeakPassword {
            min_len: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}
