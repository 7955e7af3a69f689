//! Auth middleware.

use std::sync::Arc;

use salvo::prelude::*;
use tracing::error;
use trolley_app::auth::AuthServiceError;

use crate::{auth::AUTH_COOKIE, extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = req.cookie(AUTH_COOKIE).map(|cookie| cookie.value().to_string()) else {
        res.render(StatusError::unauthorized().brief("Authentication required"));

        return;
    };

    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => state,
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let user = match state.app.auth.resolve_token(&token).await {
        Ok(user) => user,
        Err(AuthServiceError::NotFound) => {
            res.render(StatusError::unauthorized().brief("User verification failed"));

            return;
        }
        Err(error) => {
            error!("failed to resolve session token: {error}");

            res.render(StatusError::internal_server_error());

            return;
        }
    };

    depot.insert_current_user(user);

    ctrl.call_next(req, depot, res).await;
}
