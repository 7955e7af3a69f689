//! Logout User Handler

use std::sync::Arc;

use salvo::{
    http::cookie::{Cookie, time::Duration},
    prelude::*,
};

use crate::{
    auth::AUTH_COOKIE, extensions::*, responses::MessageResponse, state::State,
    users::errors::into_status_error,
};

/// Logout User Handler
///
/// Sits outside the auth middleware: a wholly absent cookie is a 400,
/// while a present-but-invalid one is a 401.
#[endpoint(
    tags("users"),
    summary = "Logout User",
    responses(
        (status_code = StatusCode::OK, description = "Session ended, cookie cleared"),
        (status_code = StatusCode::BAD_REQUEST, description = "No session cookie presented"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Session token not recognised"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let Some(token) = req
        .cookie(AUTH_COOKIE)
        .map(|cookie| cookie.value().to_string())
    else {
        return Err(StatusError::bad_request().brief("Not logged in"));
    };

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .logout(&token)
        .await
        .map_err(into_status_error)?;

    let cleared = Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    res.add_cookie(cleared);

    Ok(Json(MessageResponse::new("User logged out successfully")))
}

#[cfg(test)]
mod tests {
    use salvo::{
        http::header::COOKIE,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use trolley_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::{public_service, state_with_auth};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(
            state_with_auth(auth),
            Router::with_path("users").push(Router::with_path("logout").post(handler)),
        )
    }

    #[tokio::test]
    async fn test_logout_without_cookie_returns_400() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_logout().never();

        let res = TestClient::post("http://example.com/users/logout")
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_with_unknown_token_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_logout()
            .once()
            .withf(|token| token == "stale")
            .return_once(|_| Err(AuthServiceError::NotFound));

        let res = TestClient::post("http://example.com/users/logout")
            .add_header(COOKIE, "authToken=stale", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_logout()
            .once()
            .withf(|token| token == "live-token")
            .return_once(|_| Ok(()));

        let mut res = TestClient::post("http://example.com/users/logout")
            .add_header(COOKIE, "authToken=live-token", true)
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let set_cookie = res
            .headers()
            .get("set-cookie")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        assert!(
            set_cookie.contains("authToken="),
            "clearing cookie must be sent"
        );
        assert!(
            set_cookie.contains("Max-Age=0"),
            "clearing cookie must expire immediately"
        );

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(body.message, "User logged out successfully");

        Ok(())
    }
}
