//! Cart Models

use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

/// One line in a user's cart. `bought` lines are frozen history feeds
/// and never returned by the cart view.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub item_name: String,
    pub item_price: Decimal,
    pub item_quantity: i32,
    pub bought: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New cart line payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCartLine {
    pub item_name: String,
    pub item_price: Decimal,
    pub item_quantity: i32,
}

/// A user's open cart with its computed total.
#[derive(Debug, Clone)]
pub struct CartView {
    pub user_name: String,
    pub user_uuid: Uuid,
    pub items: Vec<CartLine>,
    pub total: Decimal,
}

/// Whether an add merged into an existing line or created a new one.
#[derive(Debug, Clone)]
pub enum AddItemOutcome {
    /// A new line was inserted.
    Added(CartLine),

    /// An existing (name, price) line absorbed the quantity.
    QuantityUpdated(CartLine),
}

/// Whether a quantity update kept or deleted the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetQuantityOutcome {
    /// The stored quantity was overwritten.
    Updated,

    /// Quantity zero deleted the line.
    Removed,
}
