use std::sync::Arc;

use tracing::instrument;

use crate::data::user_repository::UserRepository;
use crate::domain::{error::DomainError, principal::Principal, user::User};
use crate::infrastructure::security::{JwtKeys, hash_password, verify_password};

pub const USERNAME_MAX_CHARS: usize = 150;
pub const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn UserRepository>,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>, keys: JwtKeys) -> Self {
        Self { repo, keys }
    }

    pub fn keys(&self) -> &JwtKeys {
        &self.keys
    }

    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<User, DomainError> {
        validate_username(&username)?;
        if password.chars().count() < PASSWORD_MIN_CHARS {
            return Err(DomainError::Validation(format!(
                "password must be at least {PASSWORD_MIN_CHARS} characters"
            )));
        }

        let hash =
            hash_password(&password).map_err(|err| DomainError::Internal(err.to_string()))?;
        let user = User::new(username, email.trim().to_lowercase(), hash);
        self.repo.create(user).await
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        let valid = verify_password(password, &user.password_hash)
            .map_err(|_| DomainError::InvalidCredentials)?;
        if !valid {
            return Err(DomainError::InvalidCredentials);
        }

        self.issue_token(&user.principal())
    }

    pub fn issue_token(&self, principal: &Principal) -> Result<String, DomainError> {
        self.keys
            .generate_token(principal)
            .map_err(|err| DomainError::Internal(err.to_string()))
    }
}

fn validate_username(username: &str) -> Result<(), DomainError> {
    let length = username.chars().count();
    if length == 0 || length > USERNAME_MAX_CHARS {
        return Err(DomainError::Validation(format!(
            "username must be 1 to {USERNAME_MAX_CHARS} characters"
        )));
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !username.chars().all(allowed) {
        return Err(DomainError::Validation(
            "username may contain only letters, digits and @/./+/-/_".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::memory::InMemoryUserRepository;

    fn service() -> AuthService {
        AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            JwtKeys::new("test-secret".into(), 60),
        )
    }

    #[tokio::test]
    async fn login_issues_token_for_registered_user() {
        let auth = service();
        let user = auth
            .register("alice".into(), "Alice@Blog.test".into(), "password123".into())
            .await
            .unwrap();
        assert_eq!(user.email, "alice@blog.test");

        let token = auth.login("alice", "password123").await.unwrap();
        let principal = auth.keys().principal_from_token(&token).unwrap();
        assert_eq!(principal, user.principal());
    }

    #[tokio::test]
    async fn login_rejects_bad_credentials() {
        let auth = service();
        auth.register("alice".into(), "a@blog.test".into(), "password123".into())
            .await
            .unwrap();

        assert!(matches!(
            auth.login("alice", "wrong-password").await,
            Err(DomainError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("nobody", "password123").await,
            Err(DomainError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn register_validates_input() {
        let auth = service();
        assert!(matches!(
            auth.register("al ice".into(), "a@b.c".into(), "password123".into())
                .await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            auth.register("alice".into(), "a@b.c".into(), "short".into())
                .await,
            Err(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn register_rejects_taken_username() {
        let auth = service();
        auth.register("alice".into(), "a@blog.test".into(), "password123".into())
            .await
            .unwrap();
        let again = auth
            .register("alice".into(), "other@blog.test".into(), "password123".into())
            .await;
        assert!(matches!(again, Err(DomainError::UserAlreadyExists(_))));
    }
}
