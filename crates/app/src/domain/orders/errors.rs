use sqlx::error::ErrorKind;
use thiserror::Error;

/// Orders Service errors
#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("User not found")]
    NotFound,

    #[error("Invalid reference")]
    InvalidReference,

    #[error("Sql error: {0}")]
    Sql(#[source] sqlx::Error),
}

impl From<sqlx::Error> for OrdersServiceError {
    fn from(error: sqlx::Error) -> Self {
        if matches!(error, sqlx::Error::RowNotFound) {
            return Self::NotFound;
        }

        if let sqlx::Error::Database(ref db_error) = error {
            if db_error.kind() == ErrorKind::ForeignKeyViolation {
                return Self::InvalidReference;
            }
        }

        Self::Sql(error)
    }
}
