//! In-memory post repository - used when no MongoDB URI is configured, and by tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use tokio::sync::RwLock;

use mindblog_core::domain::{NewPost, Page, Post, PostChanges, PostId, PostPage};
use mindblog_core::error::RepoError;
use mindblog_core::ports::PostRepository;

/// Posts kept in a `Vec` behind an async RwLock.
///
/// Mirrors the MongoDB repository's contract, including the unique slug
/// constraint. Data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<Vec<Post>>,
    counter: AtomicU64,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(Vec::new()),
            counter: AtomicU64::new(0),
        }
    }

    // Object-id shaped: 4 bytes of unix seconds, 8 bytes of a process counter.
    fn next_id(&self) -> PostId {
        let seconds = u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX);
        let sequence = self.counter.fetch_add(1, Ordering::Relaxed);

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..].copy_from_slice(&sequence.to_be_bytes());
        PostId::from_bytes(bytes)
    }

    fn newest_first(posts: &mut [Post]) {
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
    }

    fn published_newest_first(posts: &[Post]) -> Vec<Post> {
        let mut published: Vec<Post> = posts.iter().filter(|p| p.is_published()).cloned().collect();
        Self::newest_first(&mut published);
        published
    }

    fn slug_taken(posts: &[Post], slug: &str, except: Option<&PostId>) -> bool {
        posts
            .iter()
            .any(|p| p.slug == slug && Some(&p.id) != except)
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn ensure_indexes(&self) -> Result<(), RepoError> {
        // Slug uniqueness is checked on every write.
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }

    async fn list_published(&self, page: Page) -> Result<PostPage, RepoError> {
        let posts = self.posts.read().await;
        let published = Self::published_newest_first(&posts);
        let total = published.len() as u64;

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
        let posts = published.into_iter().skip(offset).take(limit).collect();

        Ok(PostPage { posts, total })
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.posts.read().await.clone();
        Self::newest_first(&mut posts);
        Ok(posts)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .find(|p| p.slug == slug && p.is_published())
            .cloned())
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| &p.id == id).cloned())
    }

    async fn find_random(&self) -> Result<Option<Post>, RepoError> {
        let posts = self.posts.read().await;
        let published = Self::published_newest_first(&posts);
        if published.is_empty() {
            return Ok(None);
        }

        let skip = rand::thread_rng().gen_range(0..published.len());
        Ok(published.into_iter().nth(skip))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if Self::slug_taken(&posts, &post.slug, None) {
            return Err(RepoError::Constraint("slug already exists".to_string()));
        }

        let post = post.into_post(self.next_id(), Utc::now());
        posts.push(post.clone());
        tracing::debug!(id = %post.id, slug = %post.slug, "Post created in memory");
        Ok(post)
    }

    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if Self::slug_taken(&posts, &changes.slug, Some(id)) {
            return Err(RepoError::Constraint("slug already exists".to_string()));
        }

        let post = posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(RepoError::NotFound)?;
        changes.apply_to(post, Utc::now());
        Ok(post.clone())
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepoError> {
        self.posts.write().await.retain(|p| &p.id != id);
        Ok(())
    }

    async fn toggle_publish(&self, id: &PostId) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or(RepoError::NotFound)?;

        post.status = post.status.toggled();
        post.updated_at = Utc::now();
        Ok(post.clone())
    }
}
