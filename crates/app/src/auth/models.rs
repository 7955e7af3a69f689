//! Auth data models.

use std::fmt;

use jiff::Timestamp;
use uuid::Uuid;

use crate::auth::token::SessionToken;

/// User account row.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user identifier.
    pub uuid: Uuid,

    /// Display name.
    pub name: String,

    /// Login email, unique across accounts.
    pub email: String,

    /// Argon2 PHC string for the password.
    pub password_hash: String,

    /// SHA-256 digest of the live session token, if logged in.
    pub session_token_hash: Option<String>,

    /// Account creation timestamp.
    pub created_at: Timestamp,

    /// Last update timestamp.
    pub updated_at: Timestamp,
}

/// Registration payload.
#[derive(Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Login payload.
#[derive(Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

/// Result of a successful login: the one-time raw token plus the user
/// it authenticates.
#[derive(Debug)]
pub struct IssuedSession {
    pub token: SessionToken,
    pub user: User,
}
