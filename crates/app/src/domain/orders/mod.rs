//! Orders
//!
//! Checkout converts a user's open cart lines into an immutable order
//! session, and order history replays those sessions newest first.

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::*;
