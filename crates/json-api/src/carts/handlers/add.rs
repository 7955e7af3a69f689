//! Add Cart Item Handler

use std::sync::Arc;

use rust_decimal::{Decimal, prelude::FromPrimitive};
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use trolley_app::domain::carts::{
    CartsServiceError,
    models::{AddItemOutcome, NewCartLine},
};

use crate::{
    carts::errors::into_status_error, extensions::*, responses::MessageResponse, state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartItemRequest {
    #[serde(rename = "itemName")]
    pub item_name: String,

    /// Unit price in whole currency units, e.g. 9.99
    #[serde(rename = "itemPrice")]
    pub item_price: f64,

    #[serde(rename = "itemQuantity")]
    pub item_quantity: i32,
}

/// Add Cart Item Handler
///
/// Adding the same (name, price) again merges quantities into the
/// existing open line.
#[endpoint(
    tags("cart"),
    summary = "Add Item to Cart",
    responses(
        (status_code = StatusCode::OK, description = "Item added or quantity merged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid price or quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let request = json.into_inner();

    let item_price = Decimal::from_f64(request.item_price)
        .ok_or_else(|| StatusError::bad_request().brief("Price must be non-negative"))?;

    let outcome = state
        .app
        .carts
        .add_item(
            user.uuid,
            NewCartLine {
                item_name: request.item_name,
                item_price,
                item_quantity: request.item_quantity,
            },
        )
        .await
        .map_err(|error| match error {
            CartsServiceError::InvalidQuantity => {
                StatusError::bad_request().brief("Quantity must not be 0 or non-negative")
            }
            other => into_status_error(other),
        })?;

    let message = match outcome {
        AddItemOutcome::Added(line) => format!("Added {} to the cart!", line.item_name),
        AddItemOutcome::QuantityUpdated(_) => "Quantity updated".to_string(),
    };

    Ok(Json(MessageResponse::new(message)))
}
