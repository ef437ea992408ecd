//! Post repository implemented over any [`DocumentStore`].

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use quill_core::domain::{Filter, Page, Post, TenantId, fields};
use quill_core::error::RepoError;
use quill_core::ports::{Document, DocumentStore, PostRepository};

use super::partition::PartitionStrategy;

/// Upper bound on a single repository operation.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Generic document-backed post repository.
///
/// Resolves each tenant to a namespace through its [`PartitionStrategy`] and
/// bounds every store call by the operation timeout.
pub struct DocumentPostRepository<S> {
    store: S,
    partitioning: PartitionStrategy,
    timeout: Duration,
}

impl<S: DocumentStore> DocumentPostRepository<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            partitioning: PartitionStrategy::default(),
            timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    pub fn with_partitioning(mut self, partitioning: PartitionStrategy) -> Self {
        self.partitioning = partitioning;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, RepoError>>,
    ) -> Result<T, RepoError> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .map_err(|_| RepoError::Timeout(self.timeout))?
    }
}

fn to_document(post: &Post) -> Result<Document, RepoError> {
    match serde_json::to_value(post)? {
        Value::Object(document) => Ok(document),
        _ => Err(RepoError::Serialization(
            "post did not serialize to an object".to_string(),
        )),
    }
}

fn from_document(document: Document) -> Result<Post, RepoError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}

#[async_trait]
impl<S: DocumentStore> PostRepository for DocumentPostRepository<S> {
    async fn ping(&self) -> Result<(), RepoError> {
        self.bounded(self.store.ping()).await
    }

    async fn create(&self, tenant: &TenantId, post: Post) -> Result<Post, RepoError> {
        tracing::debug!(tenant = %tenant, slug = %post.slug, "Creating post");

        let ns = self.partitioning.namespace(tenant);
        let document = to_document(&post)?;
        self.bounded(self.store.insert_one(&ns, document)).await?;

        Ok(post)
    }

    async fn save(&self, tenant: &TenantId, post: &Post) -> Result<(), RepoError> {
        tracing::debug!(tenant = %tenant, slug = %post.slug, "Updating post");

        // Keyed by slug: with colliding slugs the store picks which one is overwritten.
        let ns = self.partitioning.namespace(tenant);
        let filter = Filter::new().eq(fields::SLUG, post.slug.as_str());
        let matched = self
            .bounded(self.store.update_one(&ns, &filter, to_document(post)?))
            .await?;

        if matched == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_id(&self, tenant: &TenantId, id: Uuid) -> Result<(), RepoError> {
        tracing::debug!(tenant = %tenant, post_id = %id, "Deleting post by id");

        let ns = self.partitioning.namespace(tenant);
        let filter = Filter::new().eq(fields::ID, id.to_string());
        let deleted = self.bounded(self.store.delete_many(&ns, &filter)).await?;

        if deleted == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_slug(&self, tenant: &TenantId, slug: &str) -> Result<(), RepoError> {
        tracing::debug!(tenant = %tenant, slug = %slug, "Deleting posts by slug");

        let ns = self.partitioning.namespace(tenant);
        let filter = Filter::new().eq(fields::SLUG, slug);
        let deleted = self.bounded(self.store.delete_many(&ns, &filter)).await?;

        if deleted == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn get_by_slug(&self, tenant: &TenantId, slug: &str) -> Result<Post, RepoError> {
        tracing::debug!(tenant = %tenant, slug = %slug, "Getting post by slug");

        let ns = self.partitioning.namespace(tenant);
        let filter = Filter::new().eq(fields::SLUG, slug);

        self.bounded(self.store.find_one(&ns, &filter))
            .await?
            .ok_or(RepoError::NotFound)
            .and_then(from_document)
    }

    async fn list(
        &self,
        tenant: &TenantId,
        page: Page,
        filter: &Filter,
    ) -> Result<Vec<Post>, RepoError> {
        tracing::debug!(
            tenant = %tenant,
            from = page.from,
            size = page.size,
            "Listing posts"
        );

        // MongoDB reads a zero limit as "no limit".
        if page.size == 0 {
            return Ok(Vec::new());
        }

        let ns = self.partitioning.namespace(tenant);
        let documents = self
            .bounded(self.store.find(&ns, filter, page.from, page.size))
            .await?;

        documents.into_iter().map(from_document).collect()
    }
}
