//! Document store port - the contract expected from the persistence service.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::Filter;
use crate::error::RepoError;

/// A stored document: a JSON object.
pub type Document = Map<String, Value>;

/// Logical location of a set of documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    pub database: String,
    pub collection: String,
}

impl Namespace {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
        }
    }
}

/// Document store trait - abstraction over document databases (MongoDB, in-memory).
///
/// A single store instance is shared by every request; implementations do
/// their own locking.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Liveness check.
    async fn ping(&self) -> Result<(), RepoError>;

    /// Insert a document unconditionally.
    async fn insert_one(&self, ns: &Namespace, document: Document) -> Result<(), RepoError>;

    /// Overwrite the fields of the first document matching `filter`.
    /// Returns the number of matched documents (0 or 1).
    async fn update_one(
        &self,
        ns: &Namespace,
        filter: &Filter,
        document: Document,
    ) -> Result<u64, RepoError>;

    /// Delete every document matching `filter`. Returns how many were removed.
    async fn delete_many(&self, ns: &Namespace, filter: &Filter) -> Result<u64, RepoError>;

    /// First document matching `filter`, in insertion order.
    async fn find_one(&self, ns: &Namespace, filter: &Filter) -> Result<Option<Document>, RepoError>;

    /// Documents matching `filter` in insertion order, skipping `skip` and
    /// returning at most `limit`.
    async fn find(
        &self,
        ns: &Namespace,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, RepoError>;
}
