//! Post document as stored in the `posts` collection.

use chrono::{DateTime, Utc};
use mongodb::bson::{DateTime as BsonDateTime, oid::ObjectId};
use serde::{Deserialize, Deserializer, Serialize};

use mindblog_core::domain::{NewPost, Post, PostId, PostStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub mood: String,
    /// Older documents may hold `null` here.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub reading_time: i64,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: PostStatus,
    pub created_at: BsonDateTime,
    pub updated_at: BsonDateTime,
}

impl PostDocument {
    pub fn from_new(post: NewPost, id: ObjectId, now: BsonDateTime) -> Self {
        Self {
            id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            cover_image: post.cover_image,
            mood: post.mood,
            tags: Some(post.tags),
            reading_time: i64::from(post.reading_time),
            status: post.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Conversion from the stored document to the domain Post.
impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: PostId::from_bytes(doc.id.bytes()),
            title: doc.title,
            slug: doc.slug,
            content: doc.content,
            cover_image: doc.cover_image,
            mood: doc.mood,
            tags: doc.tags.unwrap_or_default(),
            reading_time: u32::try_from(doc.reading_time.max(0)).unwrap_or(u32::MAX),
            status: doc.status,
            created_at: to_chrono(doc.created_at),
            updated_at: to_chrono(doc.updated_at),
        }
    }
}

pub(crate) fn object_id(id: &PostId) -> ObjectId {
    ObjectId::from_bytes(id.bytes())
}

pub(crate) fn to_chrono(dt: BsonDateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(dt.timestamp_millis()).unwrap_or_default()
}

// Anything other than "published" reads as a draft.
fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PostStatus, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(match raw.as_deref() {
        Some("published") => PostStatus::Published,
        _ => PostStatus::Draft,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{self, doc};

    #[test]
    fn test_reads_legacy_document() {
        let oid = ObjectId::new();
        let raw = doc! {
            "_id": oid,
            "title": "Legacy",
            "slug": "legacy",
            "content": "some words here",
            "coverImage": "",
            "mood": "calm",
            "tags": bson::Bson::Null,
            "readingTime": 1_i32,
            "status": "",
            "createdAt": BsonDateTime::from_millis(1_700_000_000_000),
            "updatedAt": BsonDateTime::from_millis(1_700_000_500_000),
        };

        let document: PostDocument = bson::from_document(raw).unwrap();
        let post = Post::from(document);

        assert_eq!(post.id.bytes(), oid.bytes());
        assert!(post.tags.is_empty());
        assert_eq!(post.reading_time, 1);
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.created_at.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_writes_camel_case_keys() {
        let new_post = NewPost {
            title: "T".to_string(),
            slug: "t".to_string(),
            content: String::new(),
            cover_image: "c.png".to_string(),
            mood: String::new(),
            tags: vec!["x".to_string()],
            reading_time: 0,
            status: PostStatus::Published,
        };

        let document = PostDocument::from_new(new_post, ObjectId::new(), BsonDateTime::now());
        let stored = bson::to_document(&document).unwrap();

        assert!(stored.contains_key("_id"));
        assert_eq!(stored.get_str("coverImage").unwrap(), "c.png");
        assert_eq!(stored.get_str("status").unwrap(), "published");
        assert_eq!(stored.get_i64("readingTime").unwrap(), 0);
        assert!(stored.get_datetime("createdAt").is_ok());
    }
}
