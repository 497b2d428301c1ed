use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::pagination::{Page, PageNumber};
use crate::domain::post::Post;
use crate::domain::principal::Principal;
use crate::domain::user::User;
use tracing::instrument;
use uuid::Uuid;

/// The post store. Performs no authorization; see `PostAccessController`.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    pub async fn list_all(&self, page: PageNumber) -> Result<Page<Post>, DomainError> {
        self.posts.list_page(None, page).await
    }

    /// Returns the owning user along with their page of posts.
    pub async fn list_by_author(
        &self,
        username: &str,
        page: PageNumber,
    ) -> Result<(User, Page<Post>), DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;
        let posts = self.posts.list_page(Some(user.id), page).await?;
        Ok((user, posts))
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    #[instrument(skip(self, content, author), fields(author = %author.username))]
    pub async fn create(
        &self,
        title: String,
        content: String,
        author: &Principal,
    ) -> Result<Post, DomainError> {
        let post = Post::new(author, title, content);
        self.posts.create(post).await
    }

    #[instrument(skip(self, content))]
    pub async fn update(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        self.posts
            .update_post(id, title, content)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if self.posts.delete_post(id).await? {
            Ok(())
        } else {
            Err(DomainError::PostNotFound(id))
        }
    }
}
