//! In-memory catalog tables
//!
//! `MemTable` keeps one entity collection behind an `RwLock<IndexMap>`, so
//! listings iterate in stable insertion order. The slug-uniqueness check in
//! `insert`/`replace` runs under the write lock and is the authoritative
//! duplicate signal; the service-level pre-check is only a fast path.

use crate::core::entity::CatalogRecord;
use crate::core::error::{FeriaError, FeriaResult};
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// A single entity collection, cloneable and thread-safe
#[derive(Clone)]
pub struct MemTable<T> {
    rows: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T: CatalogRecord> MemTable<T> {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    fn read(&self) -> FeriaResult<RwLockReadGuard<'_, IndexMap<Uuid, T>>> {
        self.rows
            .read()
            .map_err(|e| FeriaError::storage("read lock", e))
    }

    fn write(&self) -> FeriaResult<RwLockWriteGuard<'_, IndexMap<Uuid, T>>> {
        self.rows
            .write()
            .map_err(|e| FeriaError::storage("write lock", e))
    }

    /// Fetch one record by id
    pub fn get(&self, id: Uuid) -> FeriaResult<Option<T>> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// All records in insertion order
    pub fn all(&self) -> FeriaResult<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    /// Count records matching a predicate
    pub fn count_matching(&self, pred: impl Fn(&T) -> bool) -> FeriaResult<usize> {
        Ok(self.read()?.values().filter(|row| pred(row)).count())
    }

    /// Find a record by its slug
    pub fn find_by_slug(&self, slug: &str) -> FeriaResult<Option<T>> {
        Ok(self
            .read()?
            .values()
            .find(|row| row.slug() == slug)
            .cloned())
    }

    /// Insert a new record; fails with `DuplicateSlug` when another record
    /// already holds the slug
    pub fn insert(&self, row: T) -> FeriaResult<T> {
        let mut rows = self.write()?;
        if rows.values().any(|existing| existing.slug() == row.slug()) {
            return Err(FeriaError::DuplicateSlug {
                entity: T::label(),
                slug: row.slug().to_string(),
            });
        }
        rows.insert(row.id(), row.clone());
        Ok(row)
    }

    /// Replace an existing record; fails with `NotFound` when the id is
    /// absent, or `DuplicateSlug` when the new slug collides with another
    /// record
    pub fn replace(&self, row: T) -> FeriaResult<T> {
        let mut rows = self.write()?;
        if !rows.contains_key(&row.id()) {
            return Err(FeriaError::NotFound {
                entity: T::label(),
                id: row.id(),
            });
        }
        let collision = rows
            .values()
            .any(|existing| existing.id() != row.id() && existing.slug() == row.slug());
        if collision {
            return Err(FeriaError::DuplicateSlug {
                entity: T::label(),
                slug: row.slug().to_string(),
            });
        }
        rows.insert(row.id(), row.clone());
        Ok(row)
    }

    /// Remove a record by id, returning it
    pub fn remove(&self, id: Uuid) -> FeriaResult<T> {
        self.write()?
            .shift_remove(&id)
            .ok_or(FeriaError::NotFound {
                entity: T::label(),
                id,
            })
    }

    pub fn len(&self) -> FeriaResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> FeriaResult<bool> {
        Ok(self.read()?.is_empty())
    }
}

impl<T: CatalogRecord> Default for MemTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The shared catalog handle injected into every service
///
/// One long-lived instance per process; clones share the same tables. No
/// global singleton: construct it explicitly and pass it to each service.
#[derive(Clone, Default)]
pub struct Catalog {
    pub categories: MemTable<crate::domain::Category>,
    pub brands: MemTable<crate::domain::Brand>,
    pub products: MemTable<crate::domain::Product>,
    pub stores: MemTable<crate::domain::Store>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::Utc;

    fn category(name: &str, slug: &str) -> Category {
        let now = Utc::now();
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            parent_id: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_insert_and_get() {
        let table = MemTable::new();
        let row = table.insert(category("Frutas", "frutas")).unwrap();
        let fetched = table.get(row.id).unwrap().unwrap();
        assert_eq!(fetched.slug, "frutas");
    }

    #[test]
    fn test_insert_duplicate_slug_rejected_at_storage_level() {
        let table = MemTable::new();
        table.insert(category("Frutas", "frutas")).unwrap();
        let err = table.insert(category("Verduras", "frutas")).unwrap_err();
        assert!(matches!(err, FeriaError::DuplicateSlug { .. }));
        assert_eq!(table.len().unwrap(), 1);
    }

    #[test]
    fn test_replace_keeps_own_slug() {
        let table = MemTable::new();
        let mut row = table.insert(category("Frutas", "frutas")).unwrap();
        row.name = "Frutas frescas".to_string();
        // Unchanged slug must not collide with itself
        let updated = table.replace(row).unwrap();
        assert_eq!(updated.name, "Frutas frescas");
    }

    #[test]
    fn test_replace_detects_slug_collision() {
        let table = MemTable::new();
        table.insert(category("Frutas", "frutas")).unwrap();
        let mut other = table.insert(category("Verduras", "verduras")).unwrap();
        other.slug = "frutas".to_string();
        let err = table.replace(other).unwrap_err();
        assert!(matches!(err, FeriaError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_replace_missing_row_is_not_found() {
        let table: MemTable<Category> = MemTable::new();
        let err = table.replace(category("Frutas", "frutas")).unwrap_err();
        assert!(matches!(err, FeriaError::NotFound { .. }));
    }

    #[test]
    fn test_remove() {
        let table = MemTable::new();
        let row = table.insert(category("Frutas", "frutas")).unwrap();
        table.remove(row.id).unwrap();
        assert!(table.get(row.id).unwrap().is_none());
        assert!(matches!(
            table.remove(row.id).unwrap_err(),
            FeriaError::NotFound { .. }
        ));
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let table = MemTable::new();
        table.insert(category("Frutas", "frutas")).unwrap();
        table.insert(category("Verduras", "verduras")).unwrap();
        table.insert(category("Abarrotes", "abarrotes")).unwrap();
        let slugs: Vec<String> = table.all().unwrap().into_iter().map(|c| c.slug).collect();
        assert_eq!(slugs, vec!["frutas", "verduras", "abarrotes"]);
    }

    #[test]
    fn test_catalog_clones_share_tables() {
        let catalog = Catalog::new();
        let clone = catalog.clone();
        catalog.categories.insert(category("Frutas", "frutas")).unwrap();
        assert_eq!(clone.categories.len().unwrap(), 1);
    }
}
