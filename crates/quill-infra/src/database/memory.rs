//! In-memory document store - used when no database is configured, and in tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use quill_core::domain::Filter;
use quill_core::error::RepoError;
use quill_core::ports::{Document, DocumentStore, Namespace};

/// In-memory document store using a HashMap of insertion-ordered collections
/// behind an async RwLock.
///
/// Note: Data is lost on process restart.
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<Namespace, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
        }
    }

    /// Number of documents stored under `ns`.
    pub async fn count(&self, ns: &Namespace) -> usize {
        self.collections
            .read()
            .await
            .get(ns)
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn ping(&self) -> Result<(), RepoError> {
        Ok(())
    }

    async fn insert_one(&self, ns: &Namespace, document: Document) -> Result<(), RepoError> {
        let mut collections = self.collections.write().await;
        collections.entry(ns.clone()).or_default().push(document);
        Ok(())
    }

    async fn update_one(
        &self,
        ns: &Namespace,
        filter: &Filter,
        document: Document,
    ) -> Result<u64, RepoError> {
        let mut collections = self.collections.write().await;
        let Some(stored) = collections
            .get_mut(ns)
            .and_then(|docs| docs.iter_mut().find(|doc| filter.matches(doc)))
        else {
            return Ok(0);
        };

        for (field, value) in document {
            stored.insert(field, value);
        }
        Ok(1)
    }

    async fn delete_many(&self, ns: &Namespace, filter: &Filter) -> Result<u64, RepoError> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(ns) else {
            return Ok(0);
        };

        let before = docs.len();
        docs.retain(|doc| !filter.matches(doc));
        Ok((before - docs.len()) as u64)
    }

    async fn find_one(&self, ns: &Namespace, filter: &Filter) -> Result<Option<Document>, RepoError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(ns)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    async fn find(
        &self,
        ns: &Namespace,
        filter: &Filter,
        skip: u64,
        limit: u64,
    ) -> Result<Vec<Document>, RepoError> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(ns) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|doc| filter.matches(doc))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
