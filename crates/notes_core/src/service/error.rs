//! Service error taxonomy surfaced to the transport boundary.

use crate::auth::CredentialError;
use crate::model::validation::ValidationError;
use crate::repo::{Entity, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Entity is absent or not owned by the caller; the two are never told apart.
    NotFound(Entity),
    /// Username is already registered.
    DuplicateIdentity(String),
    /// Unknown username or wrong password.
    InvalidCredentials,
    /// Bearer token was rejected.
    Unauthenticated,
    Validation(ValidationError),
    Credential(CredentialError),
    /// Any storage failure not classified above.
    Storage(RepoError),
}

impl ServiceError {
    /// Re-labels a not-found as `entity`, keeping every other error intact.
    ///
    /// Guards on child entities use this so a caller never learns the id of a
    /// note it does not own.
    pub fn conceal_as(self, entity: Entity) -> Self {
        match self {
            Self::NotFound(_) => Self::NotFound(entity),
            other => other,
        }
    }

    /// Stable short label used by transport logs and status mapping.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::DuplicateIdentity(_) => "duplicate_identity",
            Self::InvalidCredentials => "invalid_credentials",
            Self::Unauthenticated => "unauthenticated",
            Self::Validation(_) => "validation_failed",
            Self::Credential(_) => "credential_failure",
            Self::Storage(_) => "storage_failure",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(entity) => write!(f, "{entity} not found"),
            Self::DuplicateIdentity(username) => {
                write!(f, "username `{username}` is already registered")
            }
            Self::InvalidCredentials => write!(f, "invalid username or password"),
            Self::Unauthenticated => write!(f, "authentication required"),
            Self::Validation(err) => write!(f, "validation failed: {err}"),
            Self::Credential(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "storage failure: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Credential(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(entity) => Self::NotFound(entity),
            RepoError::CellCountMismatch { expected, actual } => {
                Self::Validation(ValidationError::CellCountMismatch { expected, actual })
            }
            other => Self::Storage(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CredentialError> for ServiceError {
    fn from(value: CredentialError) -> Self {
        Self::Credential(value)
    }
}
