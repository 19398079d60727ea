//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response carrying a freshly issued bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: u64,
}

/// Body of create and update requests. Only `title` is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub cover_image: Option<String>,
    pub mood: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

/// `?page=&limit=` on the public listing.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// One page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPageResponse<T> {
    pub posts: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

/// Unpaginated list of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse<T> {
    pub posts: Vec<T>,
}

/// Plain acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_only_title_required() {
        let req: PostRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.title, "Hi");
        assert!(req.slug.is_none() && req.tags.is_none() && req.status.is_none());

        assert!(serde_json::from_str::<PostRequest>(r#"{"content":"x"}"#).is_err());
    }

    #[test]
    fn test_post_request_camel_case() {
        let req: PostRequest = serde_json::from_str(
            r#"{"title":"Hi","coverImage":"c.png","tags":["a","b"],"status":"published"}"#,
        )
        .unwrap();
        assert_eq!(req.cover_image.as_deref(), Some("c.png"));
        assert_eq!(req.tags, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(req.status.as_deref(), Some("published"));
    }

    #[test]
    fn test_login_response_shape() {
        let json = serde_json::to_value(LoginResponse {
            token: "abc".to_string(),
            expires_in: 3600,
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"token": "abc", "expiresIn": 3600}));
    }
}
