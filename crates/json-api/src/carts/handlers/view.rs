//! View Cart Handler

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::carts::models::{CartLine, CartView};

use crate::{carts::errors::into_status_error, extensions::*, state::State};

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    /// UUID of the cart line
    pub id: Uuid,

    #[serde(rename = "itemName")]
    pub item_name: String,

    #[serde(rename = "itemPrice")]
    pub item_price: f64,

    #[serde(rename = "itemQuantity")]
    pub item_quantity: i32,
}

/// Cart View Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartViewResponse {
    #[serde(rename = "userName")]
    pub user_name: String,

    #[serde(rename = "userID")]
    pub user_id: Uuid,

    /// Open cart lines, oldest first
    pub items: Vec<CartItemResponse>,

    /// Sum of price times quantity over the open lines
    pub total: f64,
}

fn item_response(line: CartLine) -> Result<CartItemResponse, StatusError> {
    let item_price = line
        .item_price
        .to_f64()
        .ok_or_else(StatusError::internal_server_error)?;

    Ok(CartItemResponse {
        id: line.uuid,
        item_name: line.item_name,
        item_price,
        item_quantity: line.item_quantity,
    })
}

fn view_response(view: CartView) -> Result<CartViewResponse, StatusError> {
    let total = view
        .total
        .to_f64()
        .ok_or_else(StatusError::internal_server_error)?;

    let items = view
        .items
        .into_iter()
        .map(item_response)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CartViewResponse {
        user_name: view.user_name,
        user_id: view.user_uuid,
        items,
        total,
    })
}

/// View Cart Handler
#[endpoint(
    tags("cart"),
    summary = "View Cart",
    responses(
        (status_code = StatusCode::OK, description = "Open cart lines and total"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartViewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let view = state
        .app
        .carts
        .view_cart(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(view_response(view)?))
}
