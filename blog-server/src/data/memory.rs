//! In-memory repositories, used when no `DATABASE_URL` is configured.
//!
//! Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::pagination::{Page, PageNumber};
use crate::domain::post::Post;
use crate::domain::user::User;

/// Posts kept in insertion order.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        let mut posts = self.posts.write().await;
        posts.push(post.clone());
        info!(post_id = %post.id, author_id = %post.author_id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == id).cloned())
    }

    async fn update_post(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> Result<Option<Post>, DomainError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.title = title;
        post.content = content;
        info!(post_id = %id, "post updated");
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut posts = self.posts.write().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        let removed = posts.len() < before;
        if removed {
            info!(post_id = %id, "post deleted");
        }
        Ok(removed)
    }

    async fn list_page(
        &self,
        author_id: Option<Uuid>,
        page: PageNumber,
    ) -> Result<Page<Post>, DomainError> {
        let posts = self.posts.read().await;
        // Reverse first so equal timestamps list the most recent insert first.
        let mut matching: Vec<&Post> = posts
            .iter()
            .rev()
            .filter(|p| author_id.is_none_or(|a| p.author_id == a))
            .collect();
        let window = page.resolve(matching.len() as u64)?;
        matching.sort_by(|a, b| b.date_posted.cmp(&a.date_posted));

        let items = matching
            .into_iter()
            .skip(window.offset() as usize)
            .take(window.limit() as usize)
            .cloned()
            .collect();
        Ok(window.into_page(items))
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(DomainError::UserAlreadyExists(user.username));
        }
        users.push(user.clone());
        info!(user_id = %user.id, username = %user.username, "user created");
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }
}
