//! Register User Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use trolley_app::auth::NewUser;

use crate::{
    extensions::*, responses::MessageResponse, state::State, users::errors::into_status_error,
};

/// Create User Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl From<CreateUserRequest> for NewUser {
    fn from(request: CreateUserRequest) -> Self {
        NewUser {
            name: request.name,
            email: request.email,
            password: request.password,
        }
    }
}

/// Create User Handler
#[endpoint(
    tags("users"),
    summary = "Create User",
    responses(
        (status_code = StatusCode::CREATED, description = "User created"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateUserRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MessageResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .register(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(MessageResponse::new("User created successfully")))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use trolley_app::auth::{AuthServiceError, MockAuthService};

    use crate::test_helpers::{public_service, state_with_auth, test_user};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        public_service(
            state_with_auth(auth),
            Router::with_path("users").push(Router::with_path("create").post(handler)),
        )
    }

    #[tokio::test]
    async fn test_create_user_success() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .withf(|new_user| {
                new_user.name == "Ada" && new_user.email == "ada@example.com"
            })
            .return_once(|_| Ok(test_user()));

        let mut res = TestClient::post("http://example.com/users/create")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: MessageResponse = res.take_json().await?;

        assert_eq!(body.message, "User created successfully");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email_returns_409() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/users/create")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_user_hashing_failure_returns_500() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_register()
            .once()
            .return_once(|_| Err(AuthServiceError::Password));

        let res = TestClient::post("http://example.com/users/create")
            .json(&json!({ "name": "Ada", "email": "ada@example.com", "password": "pw" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
