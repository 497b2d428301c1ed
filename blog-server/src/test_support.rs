use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::post_access::PostAccessController;
use crate::application::post_service::PostService;
use crate::data::memory::{InMemoryPostRepository, InMemoryUserRepository};
use crate::data::user_repository::UserRepository;
use crate::domain::principal::Principal;
use crate::domain::user::User;
use crate::infrastructure::security::JwtKeys;

/// Services wired to in-memory repositories.
pub struct TestState {
    pub auth: AuthService,
    pub access: PostAccessController,
    users: Arc<InMemoryUserRepository>,
}

impl TestState {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let posts = Arc::new(InMemoryPostRepository::new());
        let auth = AuthService::new(users.clone(), JwtKeys::new("test-secret".into(), 60));
        let access = PostAccessController::new(PostService::new(posts, users.clone()));
        Self {
            auth,
            access,
            users,
        }
    }

    /// Inserts a user directly, skipping password hashing.
    pub async fn user(&self, username: &str) -> Principal {
        self.users
            .create(User::new(
                username.into(),
                format!("{username}@blog.test"),
                "!unusable".into(),
            ))
            .await
            .unwrap()
            .principal()
    }

    pub fn token(&self, principal: &Principal) -> String {
        self.auth.issue_token(principal).unwrap()
    }
}

/// Builds the test service with the same middleware and routes as the server.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap($crate::presentation::middleware::IdentityMiddleware::new(
                    $state.auth.keys().clone(),
                ))
                .app_data(actix_web::web::Data::new($state.access.clone()))
                .app_data(actix_web::web::Data::new($state.auth.clone()))
                .configure($crate::presentation::handlers::routes),
        )
        .await
    };
}

pub(crate) use init_app;
