//! User account endpoints: register, login, logout.

pub(crate) mod errors;
pub(crate) mod handlers;

pub(crate) use handlers::*;
