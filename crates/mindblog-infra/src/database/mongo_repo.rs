//! MongoDB post repository.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{DateTime as BsonDateTime, Document, doc, oid::ObjectId};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use rand::Rng;

use mindblog_core::domain::{NewPost, Page, Post, PostChanges, PostId, PostPage, PostStatus};
use mindblog_core::error::RepoError;
use mindblog_core::ports::PostRepository;

use super::document::{PostDocument, object_id, to_chrono};

const COLLECTION: &str = "posts";
const DUPLICATE_KEY: i32 = 11000;

/// Post repository over the `posts` collection.
///
/// Every driver call runs under `timeout`; exceeding it is `RepoError::Timeout`.
pub struct MongoPostRepository {
    db: Database,
    collection: Collection<PostDocument>,
    timeout: Duration,
}

impl MongoPostRepository {
    pub fn new(db: &Database, timeout: Duration) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection(COLLECTION),
            timeout,
        }
    }

    async fn run<T, F>(&self, op: &'static str, call: F) -> Result<T, RepoError>
    where
        F: IntoFuture<Output = mongodb::error::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, call.into_future()).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(map_mongo_error(op, e)),
            Err(_) => {
                tracing::error!(op, timeout = ?self.timeout, "MongoDB call timed out");
                Err(RepoError::Timeout(self.timeout))
            }
        }
    }

    async fn count_published(&self) -> Result<u64, RepoError> {
        self.run(
            "count_published",
            self.collection.count_documents(published_filter()),
        )
        .await
    }
}

fn published_filter() -> Document {
    doc! { "status": PostStatus::Published.as_str() }
}

// createdAt desc, ties broken by _id desc: a stable enumeration for skip().
fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

fn id_filter(id: &PostId) -> Document {
    doc! { "_id": object_id(id) }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY
        }
        ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn map_mongo_error(op: &'static str, err: mongodb::error::Error) -> RepoError {
    if is_duplicate_key(&err) {
        tracing::debug!(op, "Duplicate slug rejected by unique index");
        return RepoError::Constraint("slug already exists".to_string());
    }

    tracing::error!(op, error = %err, "MongoDB operation failed");
    match err.kind.as_ref() {
        ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
            RepoError::Connection(err.to_string())
        }
        _ => RepoError::Query(err.to_string()),
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn ensure_indexes(&self) -> Result<(), RepoError> {
        let index = IndexModel::builder()
            .keys(doc! { "slug": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        let created = self
            .run("ensure_indexes", self.collection.create_index(index))
            .await?;
        tracing::info!(index = %created.index_name, "Unique slug index ensured");
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        self.run("ping", self.db.run_command(doc! { "ping": 1 }))
            .await
            .map(|_| ())
    }

    async fn list_published(&self, page: Page) -> Result<PostPage, RepoError> {
        let total = self.count_published().await?;

        let docs: Vec<PostDocument> = self
            .run("list_published", async {
                self.collection
                    .find(published_filter())
                    .sort(newest_first())
                    .skip(page.offset())
                    .limit(i64::try_from(page.limit).unwrap_or(i64::MAX))
                    .await?
                    .try_collect::<Vec<PostDocument>>()
                    .await
            })
            .await?;

        Ok(PostPage {
            posts: docs.into_iter().map(Into::into).collect(),
            total,
        })
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let docs: Vec<PostDocument> = self
            .run("list_all", async {
                self.collection
                    .find(doc! {})
                    .sort(newest_first())
                    .await?
                    .try_collect::<Vec<PostDocument>>()
                    .await
            })
            .await?;

        Ok(docs.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let filter = doc! { "slug": slug, "status": PostStatus::Published.as_str() };
        let found = self
            .run("find_by_slug", self.collection.find_one(filter))
            .await?;
        Ok(found.map(Into::into))
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, RepoError> {
        let found = self
            .run("find_by_id", self.collection.find_one(id_filter(id)))
            .await?;
        Ok(found.map(Into::into))
    }

    async fn find_random(&self) -> Result<Option<Post>, RepoError> {
        let total = self.count_published().await?;
        if total == 0 {
            return Ok(None);
        }

        let skip = rand::thread_rng().gen_range(0..total);
        tracing::debug!(total, skip, "Drawing random published post");

        // The set can shrink between count and fetch; the draw is then a miss.
        let found = self
            .run(
                "find_random",
                self.collection
                    .find_one(published_filter())
                    .sort(newest_first())
                    .skip(skip),
            )
            .await?;
        Ok(found.map(Into::into))
    }

    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let document = PostDocument::from_new(post, ObjectId::new(), BsonDateTime::now());

        self.run("create", self.collection.insert_one(&document))
            .await?;
        tracing::info!(id = %document.id, slug = %document.slug, "Post created");

        Ok(document.into())
    }

    async fn update(&self, id: &PostId, changes: PostChanges) -> Result<Post, RepoError> {
        let PostChanges {
            title,
            slug,
            content,
            cover_image,
            mood,
            tags,
            reading_time,
            status,
        } = changes;

        let mut set = doc! {
            "title": title,
            "slug": slug,
            "content": content,
            "coverImage": cover_image,
            "mood": mood,
            "tags": tags,
            "readingTime": i64::from(reading_time),
            "updatedAt": BsonDateTime::now(),
        };
        if let Some(status) = status {
            set.insert("status", status.as_str());
        }

        let updated = self
            .run(
                "update",
                self.collection
                    .find_one_and_update(id_filter(id), doc! { "$set": set })
                    .return_document(ReturnDocument::After),
            )
            .await?;

        updated.map(Into::into).ok_or(RepoError::NotFound)
    }

    async fn delete(&self, id: &PostId) -> Result<(), RepoError> {
        let result = self
            .run("delete", self.collection.delete_one(id_filter(id)))
            .await?;
        tracing::info!(%id, deleted = result.deleted_count, "Post delete requested");
        Ok(())
    }

    async fn toggle_publish(&self, id: &PostId) -> Result<Post, RepoError> {
        let post = self.find_by_id(id).await?.ok_or(RepoError::NotFound)?;
        let status = post.status.toggled();
        let now = BsonDateTime::now();

        let result = self
            .run(
                "toggle_publish",
                self.collection.update_one(
                    id_filter(id),
                    doc! { "$set": { "status": status.as_str(), "updatedAt": now } },
                ),
            )
            .await?;

        // Deleted between the read and the write.
        if result.matched_count == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::info!(%id, status = %status, "Post publish status toggled");
        Ok(Post {
            status,
            updated_at: to_chrono(now),
            ..post
        })
    }
}
