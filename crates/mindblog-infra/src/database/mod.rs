//! Post storage: MongoDB in production, in-memory for local runs and tests.

mod memory_repo;

#[cfg(feature = "mongo")]
mod connections;
#[cfg(feature = "mongo")]
mod document;
#[cfg(feature = "mongo")]
mod mongo_repo;

pub use memory_repo::InMemoryPostRepository;

#[cfg(feature = "mongo")]
pub use connections::{MongoConfig, MongoConnection};
#[cfg(feature = "mongo")]
pub use document::PostDocument;
#[cfg(feature = "mongo")]
pub use mongo_repo::MongoPostRepository;

#[cfg(feature = "mongo")]
#[cfg(test)]
mod tests;
