use std::sync::Arc;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, AuthUser, LoginInput, RegisterInput};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::token;

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
    pub password_algorithm: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: None, token_ttl_hours: 12, password_algorithm: "argon2".into() }
    }
}

/// Auth business service independent of the web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        Self { repo, cfg }
    }

    pub fn repo(&self) -> &Arc<R> {
        &self.repo
    }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let input = RegisterInput { name: "Test".into(), email: "user@example.com".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        if input.password.len() < 8 {
            return Err(AuthError::Validation("password too short (>=8)".into()));
        }
        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!("user exists: {}", existing.email);
            return Err(AuthError::Conflict);
        }

        let user = self.repo.create_user(&input.email, &input.name).await?;
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let _cred = self
            .repo
            .upsert_password(user.id, hash, self.cfg.password_algorithm.clone())
            .await?;
        info!(user_id = %user.id, email = %user.email, "user_registered");
        Ok(user)
    }

    /// Authenticate a user and optionally issue a token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockAuthRepository::default());
    /// let cfg = AuthConfig { jwt_secret: Some("secret".into()), ..AuthConfig::default() };
    /// let svc = AuthService::new(repo, cfg);
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { name: "N".into(), email: "u@e.com".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.email, "u@e.com");
    /// assert!(session.token.is_some());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let cred = self
            .repo
            .get_credentials(user.id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        let parsed =
            PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::Unauthorized);
        }

        let mut token_value = None;
        if let Some(secret) = &self.cfg.jwt_secret {
            token_value = Some(token::issue(secret, &user, self.cfg.token_ttl_hours)?);
        }

        Ok(AuthSession { user, token: token_value })
    }

    /// Issue a token for an already-authenticated user, e.g. right after
    /// registration. `None` when no signing secret is configured.
    pub fn issue_token(&self, user: &AuthUser) -> Result<Option<String>, AuthError> {
        match &self.cfg.jwt_secret {
            Some(secret) => Ok(Some(token::issue(secret, user, self.cfg.token_ttl_hours)?)),
            None => Ok(None),
        }
    }

    /// Resolve the user a bearer token belongs to; the user must still exist.
    pub async fn authenticate(&self, bearer: &str) -> Result<AuthUser, AuthError> {
        let secret = self.cfg.jwt_secret.as_deref().ok_or(AuthError::Unauthorized)?;
        let claims = token::verify(secret, bearer)?;
        let uid = claims.user_id()?;
        self.repo.find_user_by_id(uid).await?.ok_or(AuthError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repository::mock::MockAuthRepository;

    fn svc() -> AuthService<MockAuthRepository> {
        AuthService::new(
            Arc::new(MockAuthRepository::default()),
            AuthConfig { jwt_secret: Some("test-secret".into()), ..AuthConfig::default() },
        )
    }

    #[tokio::test]
    async fn register_then_login_and_authenticate() {
        let svc = svc();
        let input = RegisterInput {
            name: "Dev".into(),
            email: "dev@example.com".into(),
            password: "S3curePass!".into(),
        };
        let user = svc.register(input).await.unwrap();

        let session = svc
            .login(LoginInput { email: "dev@example.com".into(), password: "S3curePass!".into() })
            .await
            .unwrap();
        let token = session.token.expect("token issued");

        let resolved = svc.authenticate(&token).await.unwrap();
        assert_eq!(resolved.id, user.id);
    }

    #[tokio::test]
    async fn short_password_rejected() {
        let svc = svc();
        let err = svc
            .register(RegisterInput {
                name: "Dev".into(),
                email: "dev@example.com".into(),
                password: "short".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Validation(_)));
        assert_eq!(err.code(), 1001);
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let svc = svc();
        svc.register(RegisterInput {
            name: "Dev".into(),
            email: "dev@example.com".into(),
            password: "S3curePass!".into(),
        })
        .await
        .unwrap();
        let err = svc
            .login(LoginInput { email: "dev@example.com".into(), password: "wrong-pass".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = svc();
        let input = RegisterInput {
            name: "Dev".into(),
            email: "dev@example.com".into(),
            password: "S3curePass!".into(),
        };
        svc.register(input.clone()).await.unwrap();
        assert!(matches!(svc.register(input).await, Err(AuthError::Conflict)));
    }
}
