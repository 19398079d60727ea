//! Integration tests against a live MongoDB.
//!
//! Uses `MONGODB_URI` (or localhost) and skips quietly when no server answers.

use std::time::Duration;

use mindblog_core::domain::{NewPost, Page, PostChanges, PostId, PostInput, PostStatus};
use mindblog_core::error::RepoError;
use mindblog_core::ports::PostRepository;

use super::{MongoConfig, MongoConnection, MongoPostRepository};

async fn scratch_repository(name: &str) -> Option<(MongoConnection, MongoPostRepository)> {
    let uri = std::env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
    let config = MongoConfig {
        uri,
        database: format!("mindblog_test_{}_{}", name, std::process::id()),
        timeout: Duration::from_secs(2),
    };

    let connection = match MongoConnection::connect(&config).await {
        Ok(connection) => connection,
        Err(e) => {
            eprintln!("skipping MongoDB test {name}: {e}");
            return None;
        }
    };

    let repo = connection.post_repository();
    repo.ensure_indexes().await.unwrap();
    Some((connection, repo))
}

async fn drop_database(connection: MongoConnection) {
    let _ = connection.db.drop().await;
}

fn new_post(title: &str, status: PostStatus) -> NewPost {
    NewPost::from_input(PostInput {
        title: title.to_string(),
        content: "one two three".to_string(),
        tags: vec!["rust".to_string()],
        status: Some(status),
        ..Default::default()
    })
    .unwrap()
}

#[tokio::test]
async fn test_create_and_find() {
    let Some((connection, repo)) = scratch_repository("create_find").await else {
        return;
    };

    let created = repo
        .create(new_post("Hello Mongo", PostStatus::Published))
        .await
        .unwrap();
    assert_eq!(created.slug, "hello-mongo");
    assert_eq!(created.reading_time, 1);

    let by_slug = repo.find_by_slug("hello-mongo").await.unwrap().unwrap();
    assert_eq!(by_slug.id, created.id);
    assert_eq!(by_slug.tags, vec!["rust".to_string()]);

    let by_id = repo.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id.title, "Hello Mongo");

    assert!(repo.find_by_id(&PostId::from_bytes([0; 12])).await.unwrap().is_none());

    drop_database(connection).await;
}

#[tokio::test]
async fn test_unique_slug_index() {
    let Some((connection, repo)) = scratch_repository("unique_slug").await else {
        return;
    };

    repo.create(new_post("Twice", PostStatus::Draft)).await.unwrap();
    let err = repo
        .create(new_post("Twice", PostStatus::Draft))
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Constraint(_)));

    drop_database(connection).await;
}

#[tokio::test]
async fn test_drafts_are_hidden_until_toggled() {
    let Some((connection, repo)) = scratch_repository("toggle").await else {
        return;
    };

    let draft = repo.create(new_post("Quiet", PostStatus::Draft)).await.unwrap();
    assert!(repo.find_by_slug("quiet").await.unwrap().is_none());
    assert!(repo.find_random().await.unwrap().is_none());

    let toggled = repo.toggle_publish(&draft.id).await.unwrap();
    assert_eq!(toggled.status, PostStatus::Published);
    assert!(repo.find_by_slug("quiet").await.unwrap().is_some());
    assert_eq!(repo.find_random().await.unwrap().unwrap().id, draft.id);

    let back = repo.toggle_publish(&draft.id).await.unwrap();
    assert_eq!(back.status, PostStatus::Draft);

    drop_database(connection).await;
}

#[tokio::test]
async fn test_pagination_and_update() {
    let Some((connection, repo)) = scratch_repository("paging").await else {
        return;
    };

    for i in 0..7 {
        repo.create(new_post(&format!("Entry {i}"), PostStatus::Published))
            .await
            .unwrap();
    }
    repo.create(new_post("Unlisted", PostStatus::Draft)).await.unwrap();

    let second = repo
        .list_published(Page::new(Some(2), Some(3)))
        .await
        .unwrap();
    assert_eq!(second.total, 7);
    let titles: Vec<&str> = second.posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Entry 3", "Entry 2", "Entry 1"]);

    let beyond = repo
        .list_published(Page::new(Some(u64::MAX), Some(10)))
        .await
        .unwrap();
    assert_eq!(beyond.total, 7);
    assert!(beyond.posts.is_empty());

    let all = repo.list_all().await.unwrap();
    assert_eq!(all.len(), 8);

    let target = all.last().unwrap().clone();
    let changes = PostChanges::from_input(PostInput {
        title: "Renamed Entry".to_string(),
        ..Default::default()
    })
    .unwrap();
    let updated = repo.update(&target.id, changes.clone()).await.unwrap();
    assert_eq!(updated.slug, "renamed-entry");
    assert_eq!(updated.status, target.status);

    repo.delete(&target.id).await.unwrap();
    repo.delete(&target.id).await.unwrap();
    assert!(matches!(
        repo.update(&target.id, changes).await,
        Err(RepoError::NotFound)
    ));

    drop_database(connection).await;
}

#[tokio::test]
async fn test_find_random_after_delete() {
    let Some((connection, repo)) = scratch_repository("random").await else {
        return;
    };

    assert!(repo.find_random().await.unwrap().is_none());

    let kept = repo
        .create(new_post("Kept", PostStatus::Published))
        .await
        .unwrap();
    let gone = repo
        .create(new_post("Gone", PostStatus::Published))
        .await
        .unwrap();
    repo.delete(&gone.id).await.unwrap();

    for _ in 0..10 {
        let drawn = repo.find_random().await.unwrap().unwrap();
        assert_eq!(drawn.id, kept.id);
    }

    repo.delete(&kept.id).await.unwrap();
    assert!(repo.find_random().await.unwrap().is_none());

    drop_database(connection).await;
}
