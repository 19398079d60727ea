use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PostId;
use crate::error::DomainError;

/// Average reading speed used for `reading_time`.
pub const WORDS_PER_MINUTE: usize = 200;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    /// The opposite status. Toggling twice yields the original value.
    pub fn toggled(self) -> Self {
        match self {
            PostStatus::Draft => PostStatus::Published,
            PostStatus::Published => PostStatus::Draft,
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(PostStatus::Draft),
            "published" => Ok(PostStatus::Published),
            other => Err(DomainError::Validation(format!(
                "status must be 'draft' or 'published', got '{other}'"
            ))),
        }
    }
}

/// Post entity - a blog article as stored and served.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Editable fields as received from a client, before any derivation.
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: String,
    pub slug: Option<String>,
    pub content: String,
    pub cover_image: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub status: Option<PostStatus>,
}

/// A validated post ready to be inserted. The store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub status: PostStatus,
}

impl NewPost {
    /// Validate the input and derive slug and reading time.
    /// A missing status means draft.
    pub fn from_input(input: PostInput) -> Result<Self, DomainError> {
        let title = require_title(&input.title)?;
        let slug = resolve_slug(&title, input.slug.as_deref())?;

        Ok(Self {
            reading_time: reading_time(&input.content),
            title,
            slug,
            content: input.content,
            cover_image: input.cover_image,
            mood: input.mood,
            tags: input.tags,
            status: input.status.unwrap_or_default(),
        })
    }

    /// Materialize the post with store-assigned identity and timestamps.
    pub fn into_post(self, id: PostId, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            cover_image: self.cover_image,
            mood: self.mood,
            tags: self.tags,
            reading_time: self.reading_time,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Full replacement of a post's editable fields.
///
/// `status: None` keeps the stored status.
#[derive(Debug, Clone, PartialEq)]
pub struct PostChanges {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image: String,
    pub mood: String,
    pub tags: Vec<String>,
    pub reading_time: u32,
    pub status: Option<PostStatus>,
}

impl PostChanges {
    pub fn from_input(input: PostInput) -> Result<Self, DomainError> {
        let title = require_title(&input.title)?;
        let slug = resolve_slug(&title, input.slug.as_deref())?;

        Ok(Self {
            reading_time: reading_time(&input.content),
            title,
            slug,
            content: input.content,
            cover_image: input.cover_image,
            mood: input.mood,
            tags: input.tags,
            status: input.status,
        })
    }

    /// Apply the changes in place and stamp `updated_at`.
    pub fn apply_to(self, post: &mut Post, now: DateTime<Utc>) {
        post.title = self.title;
        post.slug = self.slug;
        post.content = self.content;
        post.cover_image = self.cover_image;
        post.mood = self.mood;
        post.tags = self.tags;
        post.reading_time = self.reading_time;
        if let Some(status) = self.status {
            post.status = status;
        }
        post.updated_at = now;
    }
}

fn require_title(title: &str) -> Result<String, DomainError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(DomainError::Validation("title is required".to_string()));
    }
    Ok(title.to_string())
}

fn resolve_slug(title: &str, explicit: Option<&str>) -> Result<String, DomainError> {
    let source = match explicit.map(str::trim) {
        Some(slug) if !slug.is_empty() => slug,
        _ => title,
    };

    let slug = slugify(source);
    if slug.is_empty() {
        return Err(DomainError::Validation(
            "slug must contain at least one letter or digit".to_string(),
        ));
    }
    Ok(slug)
}

/// Turn free text into a URL-safe slug.
///
/// Lowercases, keeps alphanumerics, turns whitespace and hyphen runs into a
/// single hyphen and drops everything else. Never starts or ends with `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            slug.push(ch);
        } else if (ch.is_whitespace() || ch == '-') && !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Minutes needed to read `content`, rounded up. Empty content reads in 0.
pub fn reading_time(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    u32::try_from(words.div_ceil(WORDS_PER_MINUTE)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_slug_char(c: char) -> bool {
        c == '-' || (c.is_alphanumeric() && !c.is_uppercase())
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Hello, World!  Foo"), "hello-world-foo");
        assert_eq!(slugify("  --Rust -- is   fun--  "), "rust-is-fun");
        assert_eq!(slugify("a - , b"), "a-b");
        assert_eq!(slugify("Already-a-slug"), "already-a-slug");
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("What's new in 2024?"), "whats-new-in-2024");
        assert_eq!(slugify("C++ & Rust"), "c-rust");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_slugify_output_shape() {
        let inputs = [
            "Hello, World!  Foo",
            "-leading and trailing-",
            "tabs\tand\nnewlines",
            "Ünïcödé Títlé",
            "___under_scores___",
            "x",
        ];

        for input in inputs {
            let slug = slugify(input);
            assert!(slug.chars().all(is_slug_char), "{input:?} -> {slug:?}");
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
            assert!(!slug.contains("--"), "{slug:?}");
        }
    }

    #[test]
    fn test_reading_time() {
        let words = vec!["word"; 400].join(" ");
        assert_eq!(reading_time(&words), 2);
        assert_eq!(reading_time("single"), 1);
        assert_eq!(reading_time(""), 0);
        assert_eq!(reading_time("   \n\t "), 0);

        let words = vec!["word"; 201].join("\n");
        assert_eq!(reading_time(&words), 2);
    }

    #[test]
    fn test_status_toggle_round_trip() {
        for status in [PostStatus::Draft, PostStatus::Published] {
            assert_ne!(status.toggled(), status);
            assert_eq!(status.toggled().toggled(), status);
        }
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("draft".parse::<PostStatus>(), Ok(PostStatus::Draft));
        assert_eq!("published".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert!(matches!(
            "archived".parse::<PostStatus>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_new_post_derives_slug_and_defaults() {
        let post = NewPost::from_input(PostInput {
            title: "  My First Post  ".to_string(),
            content: "one two three".to_string(),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(post.title, "My First Post");
        assert_eq!(post.slug, "my-first-post");
        assert_eq!(post.reading_time, 1);
        assert_eq!(post.status, PostStatus::Draft);
    }

    #[test]
    fn test_new_post_normalizes_explicit_slug() {
        let post = NewPost::from_input(PostInput {
            title: "Ignored For Slug".to_string(),
            slug: Some("Custom Slug!".to_string()),
            status: Some(PostStatus::Published),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(post.slug, "custom-slug");
        assert_eq!(post.status, PostStatus::Published);
    }

    #[test]
    fn test_new_post_rejects_blank_title_and_empty_slug() {
        let blank = NewPost::from_input(PostInput {
            title: "   ".to_string(),
            ..Default::default()
        });
        assert!(matches!(blank, Err(DomainError::Validation(_))));

        let symbols = NewPost::from_input(PostInput {
            title: "???".to_string(),
            ..Default::default()
        });
        assert!(matches!(symbols, Err(DomainError::Validation(_))));
    }

    #[test]
    fn test_changes_keep_status_when_absent() {
        let created = Utc::now();
        let mut post = NewPost::from_input(PostInput {
            title: "Original".to_string(),
            status: Some(PostStatus::Published),
            ..Default::default()
        })
        .unwrap()
        .into_post(PostId::from_bytes([1; 12]), created);

        let changes = PostChanges::from_input(PostInput {
            title: "Renamed".to_string(),
            content: vec!["w"; 250].join(" "),
            tags: vec!["rust".to_string()],
            ..Default::default()
        })
        .unwrap();

        let later = created + chrono::TimeDelta::seconds(5);
        changes.apply_to(&mut post, later);

        assert_eq!(post.title, "Renamed");
        assert_eq!(post.slug, "renamed");
        assert_eq!(post.reading_time, 2);
        assert_eq!(post.tags, vec!["rust".to_string()]);
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.created_at, created);
        assert_eq!(post.updated_at, later);
    }

    #[test]
    fn test_post_json_uses_camel_case() {
        let post = NewPost::from_input(PostInput {
            title: "Json".to_string(),
            cover_image: "cover.png".to_string(),
            ..Default::default()
        })
        .unwrap()
        .into_post(PostId::from_bytes([0xab; 12]), Utc::now());

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], "abababababababababababab");
        assert_eq!(json["coverImage"], "cover.png");
        assert_eq!(json["readingTime"], 0);
        assert_eq!(json["status"], "draft");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }
}
