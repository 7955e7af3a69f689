//! Update Cart Item Quantity Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::domain::carts::{CartsServiceError, models::SetQuantityOutcome};

use crate::{
    carts::errors::into_status_error, extensions::*, responses::MessageResponse, state::State,
};

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartItemRequest {
    /// UUID of the cart line to update
    pub cart_id: Uuid,

    /// New quantity; zero removes the line
    #[serde(rename = "itemQuantity")]
    pub item_quantity: i32,
}

/// Update Cart Item Quantity Handler
#[endpoint(
    tags("cart"),
    summary = "Update Cart Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated or line removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Negative quantity"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Not authenticated"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<UpdateCartItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let request = json.into_inner();

    let outcome = state
        .app
        .carts
        .set_quantity(user.uuid, request.cart_id, request.item_quantity)
        .await
        .map_err(|error| match error {
            CartsServiceError::InvalidQuantity => {
                StatusError::bad_request().brief("You can't set quantity negative")
            }
            other => into_status_error(other),
        })?;

    let message = match outcome {
        SetQuantityOutcome::Removed => "Item removed from cart",
        SetQuantityOutcome::Updated => "Cart item quantity updated",
    };

    Ok(Json(MessageResponse::new(message)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use trolley_app::domain::carts::MockCartsService;

    use crate::test_helpers::{authed_service, state_with_carts, test_user};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        authed_service(
            state_with_carts(carts),
            Router::with_path("cart").push(Router::with_path("items").put(handler)),
        )
    }

    #[tokio::test]
    async fn test_update_quantity_returns_updated_message() -> TestResult {
        let line_uuid = Uuid::now_v7();

        let mut carts = MockCartsService::new();

        carts
            .expect_set_quantity()
            .once()
            .withf(move |user_uuid, cart_id, quantity| {
                *user_uuid == test_user().uuid && *cart_id == line_uuid && *quantity == 7
            })
            .return_once(|_, _, _| Ok(SetQuantityOutcome::Updated));

        let mut res = TestClient::put("http://example.com/cart/items")
            .json(&json!({ "cart_id": line_uuid, "itemQuantity": 7 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(body.message, "Cart item quantity updated");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_quantity_zero_returns_removed_message() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_set_quantity()
            .once()
            .return_once(|_, _, _| Ok(SetQuantityOutcome::Removed));

        let mut res = TestClient::put("http://example.com/cart/items")
            .json(&json!({ "cart_id": Uuid::now_v7(), "itemQuantity": 0 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(body.message, "Item removed from cart");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_quantity_negative_returns_400() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_set_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::InvalidQuantity));

        let res = TestClient::put("http://example.com/cart/items")
            .json(&json!({ "cart_id": Uuid::now_v7(), "itemQuantity": -1 }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
