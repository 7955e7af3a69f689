//! State

use std::sync::Arc;

use trolley_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Max-age applied to the session cookie on login, in seconds.
    pub(crate) cookie_max_age_secs: u64,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, cookie_max_age_secs: u64) -> Self {
        Self {
            app,
            cookie_max_age_secs,
        }
    }

    #[must_use]
    pub(crate) fn shared(app: AppContext, cookie_max_age_secs: u64) -> Arc<Self> {
        Arc::new(Self::new(app, cookie_max_age_secs))
    }
}
