//! Entity query and mutation services
//!
//! One service per entity type, each built over the shared engine. Services
//! hold no ambient state: the catalog handle and the listing bus are passed
//! in at construction.

pub mod brands;
pub mod categories;
pub mod engine;
pub mod products;
pub mod stores;

pub use brands::BrandService;
pub use categories::CategoryService;
pub use products::ProductService;
pub use stores::StoreService;

use crate::core::entity::CatalogRecord;
use crate::core::error::FeriaResult;
use crate::core::query::{ListParams, Page};
use async_trait::async_trait;
use uuid::Uuid;

/// Read side of an entity service: paginated listing and point lookup
///
/// Implementations accept a filter/sort/page request, evaluate the predicate
/// once for both the count and the page slice, and return the uniform page
/// envelope.
#[async_trait]
pub trait QueryService: Send + Sync {
    type Record: CatalogRecord;
    type Filter: Default + Send + Sync;

    async fn list(
        &self,
        filter: &Self::Filter,
        params: &ListParams,
    ) -> FeriaResult<Page<Self::Record>>;

    async fn get(&self, id: Uuid) -> FeriaResult<Self::Record>;
}
