//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use trolley_app::{
    auth::{MockAuthService, User},
    context::AppContext,
    domain::{carts::MockCartsService, orders::MockOrdersService},
};

use crate::{extensions::*, state::State};

pub(crate) const TEST_COOKIE_MAX_AGE: u64 = 3600;

pub(crate) fn test_user() -> User {
    User {
        uuid: Uuid::nil(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password_hash: "unused".to_string(),
        session_token_hash: None,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

/// Middleware stand-in that skips token resolution and injects a fixed
/// authenticated user.
#[salvo::handler]
pub(crate) async fn inject_current_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_current_user(test_user());
    ctrl.call_next(req, depot, res).await;
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_login().never();
    auth.expect_resolve_token().never();
    auth.expect_logout().never();

    auth
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_add_item().never();
    carts.expect_set_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_view_cart().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_checkout().never();
    orders.expect_order_history().never();

    orders
}

fn make_state(
    auth: MockAuthService,
    carts: MockCartsService,
    orders: MockOrdersService,
) -> Arc<State> {
    let app = AppContext {
        auth: Arc::new(auth),
        carts: Arc::new(carts),
        orders: Arc::new(orders),
    };

    State::shared(app, TEST_COOKIE_MAX_AGE)
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    make_state(auth, strict_carts_mock(), strict_orders_mock())
}

pub(crate) fn state_with_carts(carts: MockCartsService) -> Arc<State> {
    make_state(strict_auth_mock(), carts, strict_orders_mock())
}

pub(crate) fn state_with_orders(orders: MockOrdersService) -> Arc<State> {
    make_state(strict_auth_mock(), strict_carts_mock(), orders)
}

/// Service for handlers that sit behind the auth middleware: state is
/// injected and a fixed user is already authenticated.
pub(crate) fn authed_service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_current_user)
            .push(route),
    )
}

/// Service for the public routes (register, login, logout).
pub(crate) fn public_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}
