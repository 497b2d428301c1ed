mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use application::auth_service::AuthService;
use application::post_access::PostAccessController;
use application::post_service::PostService;
use data::memory::{InMemoryPostRepository, InMemoryUserRepository};
use data::post_repository::{PostRepository, PostgresPostRepository};
use data::user_repository::{PostgresUserRepository, UserRepository};
use infrastructure::config::AppConfig;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::logging::init_logging;
use infrastructure::security::JwtKeys;
use tracing::warn;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::from_env()?;

    let (user_repo, post_repo) = match config.database_url.as_deref() {
        Some(database_url) => {
            let pool = create_pool(database_url).await?;
            run_migrations(&pool).await?;
            let users: Arc<dyn UserRepository> =
                Arc::new(PostgresUserRepository::new(pool.clone()));
            let posts: Arc<dyn PostRepository> = Arc::new(PostgresPostRepository::new(pool));
            (users, posts)
        }
        None => {
            warn!("DATABASE_URL not set, posts and users are kept in memory");
            let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
            let posts: Arc<dyn PostRepository> = Arc::new(InMemoryPostRepository::new());
            (users, posts)
        }
    };

    let auth_service = AuthService::new(
        Arc::clone(&user_repo),
        JwtKeys::new(config.jwt_secret.clone(), config.jwt_ttl_minutes),
    );
    let posts = PostAccessController::new(PostService::new(post_repo, user_repo));

    server::start_rest_server(config, auth_service, posts).await
}
