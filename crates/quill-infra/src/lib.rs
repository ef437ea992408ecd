//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the document stores and the post repository built on them.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory store only
//! - `mongo` - MongoDB document store

pub mod database;

// Re-exports - In-Memory
pub use database::{DocumentPostRepository, InMemoryDocumentStore, PartitionStrategy};

// Re-exports - MongoDB
#[cfg(feature = "mongo")]
pub use database::{MongoConfig, MongoDocumentStore};
