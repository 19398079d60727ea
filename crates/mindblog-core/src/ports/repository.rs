use async_trait::async_trait;

use crate::domain::{NewPost, Page, Post, PostChanges, PostId, PostPage};
use crate::error::RepoError;

/// Post repository - every query the API makes against the document store.
///
/// Listings are ordered by `created_at` descending, ties broken by id
/// descending, so skip-based reads see a consistent enumeration.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Create the unique slug index. Called once at startup.
    async fn ensure_indexes(&self) -> Result<(), RepoError>;

    /// Round-trip to the store.
    async fn ping(&self) -> Result<(), RepoError>;

    /// Published posts for `page`, plus the total number of published posts.
    async fn list_published(&self, page: Page) -> Result<PostPage, RepoError>;

    /// Every post regardless of status.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Published post with exactly this slug. Drafts are never returned.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Post with this id, any status.
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError>;

    /// Uniformly random published post, `None` when nothing is published.
    async fn find_random(&self) -> Result<Option<Post>, RepoError>;

    /// Insert a post. A taken slug is `RepoError::Constraint`.
    async fn create(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Replace the editable fields. Unknown id is `RepoError::NotFound`.
    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Post, RepoError>;

    /// Remove a post. Deleting a missing id succeeds.
    async fn delete(&self, id: &PostId) -> Result<(), RepoError>;

    /// Flip draft <-> published and return the updated post.
    ///
    /// Read-then-write without a lock: concurrent togglers on the same id race
    /// and the last write wins.
    async fn toggle_publish(&self, id: &PostId) -> Result<Post, RepoError>;
}
