//! Auth service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::{
        errors::AuthServiceError,
        models::{IssuedSession, LoginCredentials, NewUser, User},
        password,
        repository::PgAuthRepository,
        token::{SessionToken, digest_token},
    },
    database::Db,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn register(&self, new_user: NewUser) -> Result<User, AuthServiceError> {
        let password_hash =
            password::hash_password(&new_user.password).map_err(|_| AuthServiceError::Password)?;

        let mut tx = self.db.begin().await?;

        // Uniqueness rides on the email UNIQUE constraint; a violation
        // surfaces as EmailTaken through the error mapping.
        let user = self
            .repository
            .create_user(&mut tx, Uuid::now_v7(), &new_user, &password_hash)
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "registered user");

        Ok(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<IssuedSession, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let Some(user) = self
            .repository
            .find_user_by_email(&mut tx, &credentials.email)
            .await?
        else {
            password::dummy_verify(&credentials.password);

            return Err(AuthServiceError::InvalidCredentials);
        };

        if !password::verify_password(&credentials.password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        // Overwriting the stored digest implicitly invalidates any
        // previously issued token for this user.
        let token = SessionToken::generate();

        self.repository
            .set_session_token_hash(&mut tx, user.uuid, Some(&digest_token(token.expose())))
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "issued session token");

        Ok(IssuedSession { token, user })
    }

    async fn resolve_token(&self, token: &str) -> Result<User, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_token_hash(&mut tx, &digest_token(token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        Ok(user)
    }

    async fn logout(&self, token: &str) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .repository
            .find_user_by_token_hash(&mut tx, &digest_token(token))
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        self.repository
            .set_session_token_hash(&mut tx, user.uuid, None)
            .await?;

        tx.commit().await?;

        info!(user = %user.uuid, "cleared session token");

        Ok(())
    }
}

#[automock]
#[async_trait]
/// User registration and session-token lifecycle.
pub trait AuthService: Send + Sync {
    /// Create a new account; the email must be unused.
    async fn register(&self, new_user: NewUser) -> Result<User, AuthServiceError>;

    /// Verify credentials and issue a fresh session token.
    async fn login(&self, credentials: LoginCredentials) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a raw session token to its owning user.
    async fn resolve_token(&self, token: &str) -> Result<User, AuthServiceError>;

    /// Invalidate the session the raw token belongs to.
    async fn logout(&self, token: &str) -> Result<(), AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn register_returns_created_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .auth
            .register(NewUser {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await?;

        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(user.session_token_hash.is_none(), "no session before login");
        assert_ne!(
            user.password_hash, "correct horse",
            "password must not be stored in plaintext"
        );

        Ok(())
    }

    #[tokio::test]
    async fn register_duplicate_email_returns_email_taken() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.register_user("ada@example.com", "correct horse").await;

        let result = ctx
            .auth
            .register(NewUser {
                name: "Impostor".to_string(),
                email: "ada@example.com".to_string(),
                password: "other".to_string(),
            })
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::EmailTaken)),
            "expected EmailTaken, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn login_issues_token_that_resolves_to_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.register_user("ada@example.com", "correct horse").await;

        let session = ctx
            .auth
            .login(LoginCredentials {
                email: "ada@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await?;

        assert_eq!(session.user.uuid, user.uuid);

        let resolved = ctx.auth.resolve_token(session.token.expose()).await?;

        assert_eq!(resolved.uuid, user.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.register_user("ada@example.com", "correct horse").await;

        let wrong_password = ctx
            .auth
            .login(LoginCredentials {
                email: "ada@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        let unknown_email = ctx
            .auth
            .login(LoginCredentials {
                email: "nobody@example.com".to_string(),
                password: "correct horse".to_string(),
            })
            .await;

        assert!(
            matches!(wrong_password, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {wrong_password:?}"
        );
        assert!(
            matches!(unknown_email, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {unknown_email:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn relogin_invalidates_previous_token() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.register_user("ada@example.com", "correct horse").await;

        let first = ctx.login("ada@example.com", "correct horse").await;
        let second = ctx.login("ada@example.com", "correct horse").await;

        let stale = ctx.auth.resolve_token(first.expose()).await;

        assert!(
            matches!(stale, Err(AuthServiceError::NotFound)),
            "expected NotFound for overwritten token, got {stale:?}"
        );
        assert!(ctx.auth.resolve_token(second.expose()).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn logout_invalidates_token_permanently() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.register_user("ada@example.com", "correct horse").await;

        let token = ctx.login("ada@example.com", "correct horse").await;

        ctx.auth.logout(token.expose()).await?;

        let resolved = ctx.auth.resolve_token(token.expose()).await;

        assert!(
            matches!(resolved, Err(AuthServiceError::NotFound)),
            "expected NotFound after logout, got {resolved:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn logout_with_unknown_token_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.auth.logout("not-a-real-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
