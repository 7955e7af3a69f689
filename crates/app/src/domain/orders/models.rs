use jiff::Timestamp;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A completed checkout for one user.
#[derive(Debug, Clone)]
pub struct OrderSession {
    pub uuid: Uuid,
    pub user_uuid: Uuid,
    pub ordered_at: Timestamp,
}

/// A purchased line frozen at checkout time.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub uuid: Uuid,
    pub session_uuid: Uuid,
    pub item_name: String,
    pub item_price: Decimal,
    pub item_quantity: i32,
}

/// One history entry: a session and the lines bought in it.
#[derive(Debug, Clone)]
pub struct OrderHistorySession {
    pub uuid: Uuid,
    pub ordered_at: Timestamp,
    pub items: Vec<OrderLine>,
}

/// A user's full purchase history, newest session first.
#[derive(Debug, Clone)]
pub struct OrderHistory {
    pub user_name: String,
    pub user_uuid: Uuid,
    pub sessions: Vec<OrderHistorySession>,
}
