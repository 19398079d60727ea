//! # Mindblog Core
//!
//! The domain layer of the blog API.
//! Post rules (slugs, reading time, publish status), admin credentials and the
//! ports that infrastructure implements. No I/O happens in this crate.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
