//! Tenant partitioning - how a tenant id selects where its posts live.

use quill_core::domain::TenantId;
use quill_core::ports::Namespace;

/// Strategy mapping tenants onto logical databases/collections.
///
/// This is a data layout choice, not an isolation boundary: every tenant is
/// served through the same connection and credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionStrategy {
    /// One database per tenant, each holding the same collection.
    DatabasePerTenant { collection: String },
    /// One shared database, one `<prefix>_<tenant>` collection per tenant.
    CollectionPerTenant { database: String, prefix: String },
}

impl PartitionStrategy {
    /// Resolve the namespace holding a tenant's posts.
    pub fn namespace(&self, tenant: &TenantId) -> Namespace {
        match self {
            PartitionStrategy::DatabasePerTenant { collection } => {
                Namespace::new(tenant.as_str(), collection.as_str())
            }
            PartitionStrategy::CollectionPerTenant { database, prefix } => {
                Namespace::new(database.as_str(), format!("{prefix}_{tenant}"))
            }
        }
    }
}

impl Default for PartitionStrategy {
    fn default() -> Self {
        PartitionStrategy::DatabasePerTenant {
            collection: "posts".to_string(),
        }
    }
}
