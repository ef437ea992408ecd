//! Domain entities - the core business objects.

mod page;
mod post;
mod tenant;

pub use page::{DEFAULT_PAGE_SIZE, Filter, FilterValue, MAX_PAGE_SIZE, Page};
pub use post::{Post, build_slug, fields};
pub use tenant::TenantId;
