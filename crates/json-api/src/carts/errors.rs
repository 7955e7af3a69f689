//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::carts::CartsServiceError;

/// Default mapping; handlers that owe the client a route-specific 400
/// message match the validation variants before falling through here.
pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NegativePrice => {
            StatusError::bad_request().brief("Price must be non-negative")
        }
        CartsServiceError::InvalidQuantity => StatusError::bad_request().brief("Invalid quantity"),
        CartsServiceError::InvalidReference | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart payload")
        }
        // The middleware resolved this user, so a missing user row here
        // means the account went away mid-request.
        CartsServiceError::NotFound => {
            StatusError::unauthorized().brief("User verification failed")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
