//! # Mindblog Infrastructure
//!
//! Concrete implementations of the ports defined in `mindblog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `mongo` - MongoDB post repository
//! - `auth` - JWT + Argon2 authentication

pub mod database;
pub mod rate_limit;

#[cfg(feature = "auth")]
pub mod auth;

// Re-exports - In-Memory
pub use database::InMemoryPostRepository;
pub use rate_limit::{RateLimitConfig, SlidingWindowRateLimiter};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "mongo")]
pub use database::{MongoConfig, MongoConnection, MongoPostRepository};
