//! Checkout Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*, orders::errors::into_status_error, responses::MessageResponse, state::State,
};

/// Checkout Handler
///
/// Freezes the user's open cart lines into an order session. An empty
/// cart still checks out successfully.
#[endpoint(
    tags("cart"),
    summary = "Checkout Cart",
    responses(
        (status_code = StatusCode::OK, description = "Cart checked out"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .orders
        .checkout(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("Cart checked out successfully")))
}
