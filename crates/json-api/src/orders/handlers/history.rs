//! Order History Handler

use std::sync::Arc;

use rust_decimal::prelude::ToPrimitive;
use salvo::prelude::*;
use serde::{Serialize, Serializer, ser::SerializeMap};
use uuid::Uuid;

use trolley_app::domain::orders::models::{OrderHistory, OrderHistorySession};

use crate::{extensions::*, orders::errors::into_status_error, state::State};

const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Serialize)]
pub(crate) struct OrderItemResponse {
    #[serde(rename = "itemName")]
    pub item_name: String,

    #[serde(rename = "itemPrice")]
    pub item_price: f64,

    #[serde(rename = "itemQuantity")]
    pub item_quantity: i32,
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderSessionResponse {
    #[serde(rename = "orderDate")]
    pub order_date: String,

    pub items: Vec<OrderItemResponse>,
}

/// Sessions keyed by uuid, serialized as a JSON object that preserves
/// newest-first ordering.
#[derive(Debug)]
pub(crate) struct SessionsResponse(pub Vec<(Uuid, OrderSessionResponse)>);

impl Serialize for SessionsResponse {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (uuid, session) in &self.0 {
            map.serialize_entry(uuid, session)?;
        }

        map.end()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct OrderHistoryResponse {
    #[serde(rename = "userName")]
    pub user_name: String,

    #[serde(rename = "userID")]
    pub user_id: Uuid,

    pub sessions: SessionsResponse,
}

fn session_response(session: OrderHistorySession) -> Result<OrderSessionResponse, StatusError> {
    let items = session
        .items
        .into_iter()
        .map(|item| {
            let item_price = item
                .item_price
                .to_f64()
                .ok_or_else(StatusError::internal_server_error)?;

            Ok(OrderItemResponse {
                item_name: item.item_name,
                item_price,
                item_quantity: item.item_quantity,
            })
        })
        .collect::<Result<Vec<_>, StatusError>>()?;

    Ok(OrderSessionResponse {
        order_date: session
            .ordered_at
            .strftime(ORDER_DATE_FORMAT)
            .to_string(),
        items,
    })
}

fn history_response(history: OrderHistory) -> Result<OrderHistoryResponse, StatusError> {
    let sessions = history
        .sessions
        .into_iter()
        .map(|session| {
            let uuid = session.uuid;

            session_response(session).map(|response| (uuid, response))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(OrderHistoryResponse {
        user_name: history.user_name,
        user_id: history.user_uuid,
        sessions: SessionsResponse(sessions),
    })
}

/// Order History Handler
///
/// Plain handler rather than an OpenAPI endpoint: the response is a
/// dynamically keyed map of session uuids, which has no static schema.
#[salvo::handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderHistoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.current_user_or_401()?;

    let history = state
        .app
        .orders
        .order_history(user.uuid)
        .await
        .map_err(into_status_error)?;

    Ok(Json(history_response(history)?))
}
