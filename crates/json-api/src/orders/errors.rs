//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use trolley_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::NotFound => {
            StatusError::unauthorized().brief("User verification failed")
        }
        OrdersServiceError::InvalidReference => {
            StatusError::bad_request().brief("Invalid order payload")
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage error: {source}");

            StatusError::internal_server_error()
        }
    }
}
