//! Cookie-based session authentication.

pub(crate) mod middleware;

/// Name of the session cookie issued on login.
pub(crate) const AUTH_COOKIE: &str = "authToken";
