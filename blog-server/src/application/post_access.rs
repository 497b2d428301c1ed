use tracing::{instrument, warn};
use uuid::Uuid;

use crate::application::post_service::PostService;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostForm};
use crate::domain::principal::Principal;

/// Decides whether a principal may change a post.
pub type AuthorizationPredicate = fn(&Principal, &Post) -> bool;

/// The default predicate: only the recorded author may change a post.
pub fn is_author(principal: &Principal, post: &Post) -> bool {
    post.author_id == principal.id
}

/// Gates the mutating operations of the post store.
///
/// Every operation takes the acting principal explicitly. The gates always run
/// in the same order: authentication, then loading the target post, then the
/// authorization predicate. Nothing reaches the store until all gates pass.
///
/// Submitted forms arrive as a `Result` and are only opened after the gates,
/// so a body that failed to parse is reported as a validation error to an
/// authorized caller and never to anyone else.
#[derive(Clone)]
pub struct PostAccessController {
    store: PostService,
    can_modify: AuthorizationPredicate,
}

impl PostAccessController {
    pub fn new(store: PostService) -> Self {
        Self::with_predicate(store, is_author)
    }

    pub fn with_predicate(store: PostService, can_modify: AuthorizationPredicate) -> Self {
        Self { store, can_modify }
    }

    /// Unguarded read access for the feeds and detail view.
    pub fn store(&self) -> &PostService {
        &self.store
    }

    pub fn require_login(principal: Option<&Principal>) -> Result<&Principal, DomainError> {
        principal.ok_or(DomainError::Unauthorized)
    }

    /// Runs both gates and hands back the post they were checked against.
    pub async fn authorize(
        &self,
        principal: Option<&Principal>,
        post_id: Uuid,
    ) -> Result<Post, DomainError> {
        let principal = Self::require_login(principal)?;
        let post = self.store.get(post_id).await?;
        if !(self.can_modify)(principal, &post) {
            warn!(
                post_id = %post_id,
                username = %principal.username,
                "rejected change by non-author"
            );
            return Err(DomainError::Forbidden);
        }
        Ok(post)
    }

    #[instrument(skip(self, principal, form))]
    pub async fn create(
        &self,
        principal: Option<&Principal>,
        form: Result<PostForm, DomainError>,
    ) -> Result<Post, DomainError> {
        let author = Self::require_login(principal)?;
        let form = form?;
        form.validate()?;
        self.store.create(form.title, form.content, author).await
    }

    #[instrument(skip(self, principal, form))]
    pub async fn update(
        &self,
        principal: Option<&Principal>,
        post_id: Uuid,
        form: Result<PostForm, DomainError>,
    ) -> Result<Post, DomainError> {
        self.authorize(principal, post_id).await?;
        let form = form?;
        form.validate()?;
        self.store.update(post_id, form.title, form.content).await
    }

    #[instrument(skip(self, principal))]
    pub async fn delete(
        &self,
        principal: Option<&Principal>,
        post_id: Uuid,
    ) -> Result<(), DomainError> {
        self.authorize(principal, post_id).await?;
        self.store.delete(post_id).await
    }
}
