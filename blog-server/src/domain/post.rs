use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::principal::Principal;

pub const TITLE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub date_posted: DateTime<Utc>,
    pub author_id: Uuid,
    /// Username of the author, carried for display.
    pub author: String,
}

impl Post {
    pub fn new(author: &Principal, title: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            date_posted: Utc::now(),
            author_id: author.id,
            author: author.username.clone(),
        }
    }
}

/// The editable fields of a post. Anything else a client submits is dropped
/// during deserialization, so an `author` field can never reach the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl PostForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::Validation("title is required".into()));
        }
        if self.title.chars().count() > TITLE_MAX_CHARS {
            return Err(DomainError::Validation(format!(
                "title must be at most {TITLE_MAX_CHARS} characters"
            )));
        }
        if self.content.trim().is_empty() {
            return Err(DomainError::Validation("content is required".into()));
        }
        Ok(())
    }
}

impl From<&Post> for PostForm {
    fn from(post: &Post) -> Self {
        Self::new(post.title.clone(), post.content.clone())
    }
}
