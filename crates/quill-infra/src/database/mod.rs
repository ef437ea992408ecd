//! Document store implementations and the post repository built on top of them.

mod document_repo;
mod memory;
mod partition;

#[cfg(feature = "mongo")]
mod connections;
#[cfg(feature = "mongo")]
mod mongo;

pub use document_repo::{DEFAULT_OPERATION_TIMEOUT, DocumentPostRepository};
pub use memory::InMemoryDocumentStore;
pub use partition::PartitionStrategy;

#[cfg(feature = "mongo")]
pub use connections::{MongoConfig, MongoDocumentStore};

/// Post repository backed by MongoDB.
#[cfg(feature = "mongo")]
pub type MongoPostRepository = DocumentPostRepository<MongoDocumentStore>;

/// Post repository backed by process memory.
pub type InMemoryPostRepository = DocumentPostRepository<InMemoryDocumentStore>;

#[cfg(test)]
mod tests;
