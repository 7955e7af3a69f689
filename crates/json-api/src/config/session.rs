//! Session Config

use clap::Args;

/// Session cookie settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Max-age of the `authToken` cookie in seconds. Advisory to the
    /// client only; tokens are not expired server-side.
    #[arg(long, env = "SESSION_COOKIE_MAX_AGE", default_value = "3600")]
    pub cookie_max_age_secs: u64,
}
