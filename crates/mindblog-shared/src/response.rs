//! Error body shared by every failing endpoint: `{"error": "<message>"}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    // Common error constructors
    pub fn too_many_requests() -> Self {
        Self::new("rate limit exceeded")
    }

    pub fn internal_error() -> Self {
        Self::new("internal server error")
    }
}
