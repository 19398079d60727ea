//! # Mindblog Shared
//!
//! Wire types exchanged with the front end.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
