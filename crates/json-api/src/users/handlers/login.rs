//! Verify User Handler

use std::sync::Arc;

use salvo::{
    http::cookie::{Cookie, time::Duration},
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trolley_app::auth::LoginCredentials;

use crate::{auth::AUTH_COOKIE, extensions::*, state::State, users::errors::into_status_error};

/// Verify User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifyUserRequest {
    pub email: String,
    pub password: String,
}

impl From<VerifyUserRequest> for LoginCredentials {
    fn from(request: VerifyUserRequest) -> Self {
        LoginCredentials {
            email: request.email,
            password: request.password,
        }
    }
}

/// Verified User Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VerifiedUserResponse {
    /// Human-readable outcome description
    pub message: String,

    /// Display name of the verified user
    pub name: String,

    /// UUID of the verified user
    pub user_id: Uuid,

    /// Email of the verified user
    pub email: String,

    /// Raw session token, also set as the `authToken` cookie
    #[serde(rename = "authToken")]
    pub auth_token: String,
}

/// Verify User Handler
///
/// Checks credentials and issues a fresh session token as an http-only
/// cookie. Any previous session for the user stops resolving.
#[endpoint(
    tags("users"),
    summary = "Verify User",
    responses(
        (status_code = StatusCode::OK, description = "User verified, session cookie set"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Unknown email or wrong password"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<VerifyUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VerifiedUserResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .login(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    let token = session.token.expose().to_string();

    let max_age = i64::try_from(state.cookie_max_age_secs).unwrap_or(i64::MAX);

    let cookie = Cookie::build((AUTH_COOKIE, token.clone()))
        .http_only(true)
        .path("/")
        .max_age(Duration::seconds(max_age))
        .build();

    res.add_cookie(cookie);

    Ok(Json(VerifiedUserResponse {
        message: "User verified successfully".to_string(),
        name: session.user.name,
        user_id: session.user.uuid,
        email: session.user.email,
        auth_token: token,
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use trolley_app::auth::{AuthServiceError, IssuedSession, MockAuthService, SessionToken};

    use crate::test_helpers::{public_service, state_with_auth, test_user};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(
            state_with_auth(auth),
            Router::with_path("users").push(Router::with_path("verify").post(handler)),
        )
    }

    #[tokio::test]
    async fn test_verify_user_sets_session_cookie() -> TestResult {
        let user = test_user();
        let token = SessionToken::generate();
        let raw_token = token.expose().to_string();

        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .withf(|credentials| credentials.email == "ada@example.com")
            .return_once(move |_| Ok(IssuedSession { token, user }));

        let mut res = TestClient::post("http://example.com/users/verify")
            .json(&json!({ "email": "ada@example.com", "password": "pw" }))
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
            set_cookie.contains(&format!("authToken={raw_token}")),
            "cookie must carry the raw token"
        );
        assert!(set_cookie.contains("HttpOnly"), "cookie must be http-only");
        assert!(
            set_cookie.contains("Max-Age=3600"),
            "cookie must expire after an hour"
        );

        let body: VerifiedUserResponse = res.take_json().await?;

        assert_eq!(body.message, "User verified successfully");
        assert_eq!(body.name, "Ada");
        assert_eq!(body.email, "ada@example.com");
        assert_eq!(body.auth_token, raw_token);

        Ok(())
    }

    #[tokio::test]
    async fn test_verify_user_bad_credentials_returns_401() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_login()
            .once()
            .return_once(|_| Err(AuthServiceError::InvalidCredentials));

        let res = TestClient::post("http://example.com/users/verify")
            .json(&json!({ "email": "ada@example.com", "password": "wrong" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
