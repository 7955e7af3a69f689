//! User Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::EmailTaken => StatusError::conflict().brief("User already exists"),
        AuthServiceError::InvalidCredentials | AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("User verification failed")
        }
        AuthServiceError::Password => {
            error!("password hashing failed");

            StatusError::internal_server_error()
        }
        AuthServiceError::Sql(source) => {
            error!("auth storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
