//! Auth service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// Auth service error variants.
#[derive(Debug, Error)]
pub enum AuthServiceError {
    /// A user with this email already exists.
    #[error("email already registered")]
    EmailTaken,

    /// Unknown email or wrong password; deliberately indistinguishable.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No user matched the presented session token.
    #[error("session not found")]
    NotFound,

    /// Password hashing failed.
    #[error("password hashing error")]
    Password,

    /// Underlying SQL/storage error.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::EmailTaken,
            _ => Self::Sql(error),
        }
    }
}
