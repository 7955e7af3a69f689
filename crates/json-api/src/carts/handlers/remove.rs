//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    carts::errors::into_status_error, extensions::*, responses::MessageResponse, state::State,
};

/// Remove Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveCartItemRequest {
    /// UUID of the cart line to remove
    pub cart_id: Uuid,
}

/// Remove Cart Item Handler
///
/// Removing a line that does not exist (or belongs to someone else) is
/// a no-op success.
#[endpoint(
    tags("cart"),
    summary = "Remove Item from Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<RemoveCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    state
        .app
        .carts
        .remove_item(user.uuid, json.into_inner().cart_id)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MessageResponse::new("Item removed from cart")))
}
