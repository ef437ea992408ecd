use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Filter, Page, Post, TenantId};
use crate::error::RepoError;

/// Post repository - tenant-scoped persistence of posts.
///
/// Every operation is bounded by the implementation's operation timeout and
/// fails with [`RepoError::Timeout`] once it elapses. Nothing is retried.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepoError>;

    /// Insert a post. Slug collisions are not checked.
    async fn create(&self, tenant: &TenantId, post: Post) -> Result<Post, RepoError>;

    /// Overwrite the stored post that has the same slug.
    async fn save(&self, tenant: &TenantId, post: &Post) -> Result<(), RepoError>;

    /// Delete every post with this id.
    async fn delete_by_id(&self, tenant: &TenantId, id: Uuid) -> Result<(), RepoError>;

    /// Delete every post with this slug.
    async fn delete_by_slug(&self, tenant: &TenantId, slug: &str) -> Result<(), RepoError>;

    /// First post with this slug, or [`RepoError::NotFound`].
    async fn get_by_slug(&self, tenant: &TenantId, slug: &str) -> Result<Post, RepoError>;

    /// A page of posts matching `filter`, oldest first.
    async fn list(
        &self,
        tenant: &TenantId,
        page: Page,
        filter: &Filter,
    ) -> Result<Vec<Post>, RepoError>;
}
