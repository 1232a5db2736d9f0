//! Record trait shared by every catalog entity
//!
//! The query engine and the storage tables are generic over this trait: it
//! exposes the identity, slug, search and sort surface of a record without
//! the engine knowing the concrete type. One implementation exists per
//! entity (Category, Brand, Product, Store).

use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use uuid::Uuid;

/// Scalar value a record can be sorted by
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
    Time(DateTime<Utc>),
    Count(usize),
}

impl SortKey {
    /// Total order within the same variant; mixed variants compare equal so
    /// a bad field name degrades to the stable insertion order
    pub fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => {
                a.to_lowercase().cmp(&b.to_lowercase())
            }
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Time(a), SortKey::Time(b)) => a.cmp(b),
            (SortKey::Count(a), SortKey::Count(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// A persisted catalog record with a name, a unique slug, and timestamps
pub trait CatalogRecord: Clone + Send + Sync + 'static {
    /// Plural resource segment used in paths ("categories", "stores")
    fn resource_name() -> &'static str;

    /// Localized singular label used in error messages ("categoría")
    fn label() -> &'static str;

    /// Whether `name` must also be unique within the collection
    /// (categories and brands; products and stores only enforce slug/SKU)
    const UNIQUE_NAME: bool;

    fn id(&self) -> Uuid;

    fn name(&self) -> &str;

    fn slug(&self) -> &str;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    /// Text fields OR'ed together by free-text search
    fn search_terms(&self) -> Vec<&str>;

    /// Scalar sort key for a field name, `None` when the field is unknown
    fn sort_value(&self, field: &str) -> Option<SortKey>;

    /// Collection path published on the listing bus after mutations
    fn collection_path() -> String {
        format!("/{}", Self::resource_name())
    }
}
