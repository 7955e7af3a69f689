//! Cart endpoints: add, update, remove, view.

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;
