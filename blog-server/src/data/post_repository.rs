use crate::domain::error::DomainError;
use crate::domain::pagination::{Page, PageNumber};
use crate::domain::post::Post;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: Post) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;
    /// Rewrites title and content only; `None` when no such post exists.
    async fn update_post(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> Result<Option<Post>, DomainError>;
    /// Returns whether a post was removed.
    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError>;
    /// One page of posts, newest first. The count and the slice come from the
    /// same snapshot, so `has_next` always agrees with the items returned.
    async fn list_page(
        &self,
        author_id: Option<Uuid>,
        page: PageNumber,
    ) -> Result<Page<Post>, DomainError>;
}

#[derive(Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, author_id, title, content, date_posted)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(post.id)
        .bind(post.author_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.date_posted)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to create post: {}", e);
            DomainError::Internal(format!("database error: {}", e))
        })?;

        info!(post_id = %post.id, author_id = %post.author_id, "post created");
        Ok(post)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT p.id, p.title, p.content, p.date_posted, p.author_id, u.username AS author
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("db error find_by_id {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })
    }

    async fn update_post(
        &self,
        id: Uuid,
        title: String,
        content: String,
    ) -> Result<Option<Post>, DomainError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            WITH updated AS (
                UPDATE posts
                SET title = $1, content = $2
                WHERE id = $3
                RETURNING id, title, content, date_posted, author_id
            )
            SELECT p.id, p.title, p.content, p.date_posted, p.author_id, u.username AS author
            FROM updated p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(title)
        .bind(content)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("failed to update post {}: {}", id, e);
            DomainError::Internal(e.to_string())
        })?;

        if post.is_some() {
            info!(post_id = %id, "post updated");
        }

        Ok(post)
    }

    async fn delete_post(&self, id: Uuid) -> Result<bool, DomainError> {
        let deleted = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("failed to delete post {}: {}", id, e);
                DomainError::Internal(e.to_string())
            })?;

        let removed = deleted.rows_affected() > 0;
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
        let db_error = |e: sqlx::Error| {
            error!("db error while listing posts: {}", e);
            DomainError::Internal(e.to_string())
        };

        let mut tx = self.pool.begin().await.map_err(db_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM posts WHERE ($1::uuid IS NULL OR author_id = $1)",
        )
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error)?;
        let window = page.resolve(count.max(0) as u64)?;

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT p.id, p.title, p.content, p.date_posted, p.author_id, u.username AS author
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE ($1::uuid IS NULL OR p.author_id = $1)
            ORDER BY p.date_posted DESC, p.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(author_id)
        .bind(window.limit() as i64)
        .bind(window.offset() as i64)
        .fetch_all(&mut *tx)
        .await
        .map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(window.into_page(posts))
    }
}
