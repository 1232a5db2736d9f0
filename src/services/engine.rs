//! Generic query/mutation skeleton shared by all entity services
//!
//! Every entity service runs the same pipeline: build a predicate (AND of
//! optional filters, OR'ed free-text search), count the matches, sort, slice
//! the page, and wrap the result in the uniform envelope. Mutations share
//! the uniqueness/reference checks. This module holds that skeleton once,
//! keyed by [`CatalogRecord`]; the per-entity services only add their own
//! foreign-key and dependent-count rules.

use crate::core::entity::{CatalogRecord, SortKey};
use crate::core::error::{FeriaError, FeriaResult};
use crate::core::query::{ListParams, Page, SortOrder};
use crate::core::slug::slugify;
use crate::storage::MemTable;
use uuid::Uuid;

/// Run a listing: filter, search, sort, and page a collection
///
/// `matches` is the entity-specific AND predicate. `custom_sort` overrides
/// the scalar sort for one field name, used for aggregate-count sorts such
/// as ordering brands by their number of products.
pub fn list_page<T: CatalogRecord>(
    table: &MemTable<T>,
    params: &ListParams,
    matches: impl Fn(&T) -> bool,
    custom_sort: Option<(&str, &dyn Fn(&T) -> SortKey)>,
) -> FeriaResult<Page<T>> {
    let needle = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<T> = table
        .all()?
        .into_iter()
        .filter(|row| matches(row))
        .filter(|row| match &needle {
            Some(needle) => matches_search(row, needle),
            None => true,
        })
        .collect();

    if let Some(field) = params.sort_by.as_deref() {
        let key_of = |row: &T| -> Option<SortKey> {
            match custom_sort {
                Some((custom_field, key)) if custom_field == field => Some(key(row)),
                _ => row.sort_value(field),
            }
        };
        rows.sort_by(|a, b| {
            let ord = match (key_of(a), key_of(b)) {
                (Some(ka), Some(kb)) => ka.compare(&kb),
                _ => std::cmp::Ordering::Equal,
            };
            match params.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    Ok(Page::from_rows(rows, params))
}

/// Case-insensitive substring match across the record's designated text
/// fields, OR semantics
fn matches_search<T: CatalogRecord>(row: &T, needle_lower: &str) -> bool {
    row.search_terms()
        .iter()
        .any(|term| term.to_lowercase().contains(needle_lower))
}

/// Fetch the operation target, `NotFound` when absent
pub fn fetch<T: CatalogRecord>(table: &MemTable<T>, id: Uuid) -> FeriaResult<T> {
    table.get(id)?.ok_or(FeriaError::NotFound {
        entity: T::label(),
        id,
    })
}

/// Check a foreign-key reference, `InvalidReference` naming the missing
/// entity when absent
pub fn ensure_ref<T: CatalogRecord>(table: &MemTable<T>, id: Uuid) -> FeriaResult<()> {
    if table.get(id)?.is_some() {
        Ok(())
    } else {
        Err(FeriaError::InvalidReference {
            entity: T::label(),
            id,
        })
    }
}

/// Fast-path slug uniqueness check; the storage insert re-checks under the
/// write lock
pub fn ensure_slug_free<T: CatalogRecord>(
    table: &MemTable<T>,
    slug: &str,
    exclude: Option<Uuid>,
) -> FeriaResult<()> {
    match table.find_by_slug(slug)? {
        Some(existing) if Some(existing.id()) != exclude => Err(FeriaError::DuplicateSlug {
            entity: T::label(),
            slug: slug.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Name uniqueness check (case-insensitive), only for entities that enforce
/// unique names
pub fn ensure_name_free<T: CatalogRecord>(
    table: &MemTable<T>,
    name: &str,
    exclude: Option<Uuid>,
) -> FeriaResult<()> {
    if !T::UNIQUE_NAME {
        return Ok(());
    }
    let lower = name.to_lowercase();
    let taken = table.count_matching(|row| {
        Some(row.id()) != exclude && row.name().to_lowercase() == lower
    })?;
    if taken > 0 {
        Err(FeriaError::DuplicateName {
            entity: T::label(),
            name: name.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Use the explicit slug when provided, otherwise derive one from the name
pub fn resolve_slug(explicit: Option<String>, name: &str) -> String {
    match explicit {
        Some(slug) if !slug.trim().is_empty() => slug,
        _ => slugify(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::Utc;

    fn seed(table: &MemTable<Category>, names: &[&str]) {
        for name in names {
            let now = Utc::now();
            table
                .insert(Category {
                    id: Uuid::new_v4(),
                    name: name.to_string(),
                    slug: slugify(name),
                    description: None,
                    parent_id: None,
                    active: true,
                    created_at: now,
                    updated_at: now,
                })
                .unwrap();
        }
    }

    #[test]
    fn test_list_page_counts_match_predicate() {
        let table = MemTable::new();
        seed(&table, &["Frutas", "Verduras", "Abarrotes"]);
        let params = ListParams::default();
        let page = list_page(&table, &params, |c| c.name.starts_with('A'), None).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Abarrotes");
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let table = MemTable::new();
        seed(&table, &["Frutas", "Verduras", "Frutos secos"]);
        let params = ListParams {
            search: Some("FRUT".to_string()),
            ..Default::default()
        };
        let page = list_page(&table, &params, |_| true, None).unwrap();
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_sort_by_name_desc() {
        let table = MemTable::new();
        seed(&table, &["Frutas", "Abarrotes", "Verduras"]);
        let params = ListParams {
            sort_by: Some("name".to_string()),
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let page = list_page(&table, &params, |_| true, None).unwrap();
        let names: Vec<&str> = page.items.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Verduras", "Frutas", "Abarrotes"]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_insertion_order() {
        let table = MemTable::new();
        seed(&table, &["Frutas", "Abarrotes"]);
        let params = ListParams {
            sort_by: Some("bogus".to_string()),
            ..Default::default()
        };
        let page = list_page(&table, &params, |_| true, None).unwrap();
        assert_eq!(page.items[0].name, "Frutas");
    }

    #[test]
    fn test_custom_sort_overrides_scalar() {
        let table = MemTable::new();
        seed(&table, &["Frutas", "Abarrotes"]);
        let params = ListParams {
            sort_by: Some("len".to_string()),
            sort_order: SortOrder::Desc,
            ..Default::default()
        };
        let by_len = |c: &Category| SortKey::Count(c.name.len());
        let page = list_page(&table, &params, |_| true, Some(("len", &by_len))).unwrap();
        assert_eq!(page.items[0].name, "Abarrotes");
    }

    #[test]
    fn test_pagination_25_rows_page_2() {
        let table = MemTable::new();
        let names: Vec<String> = (0..25).map(|i| format!("Categoria {:02}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        seed(&table, &refs);
        let params = ListParams {
            page: 2,
            limit: 10,
            ..Default::default()
        };
        let page = list_page(&table, &params, |_| true, None).unwrap();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_ensure_slug_free_excludes_self() {
        let table = MemTable::new();
        seed(&table, &["Frutas"]);
        let existing = table.find_by_slug("frutas").unwrap().unwrap();
        assert!(ensure_slug_free(&table, "frutas", Some(existing.id)).is_ok());
        assert!(ensure_slug_free(&table, "frutas", None).is_err());
    }

    #[test]
    fn test_ensure_name_free_case_insensitive() {
        let table = MemTable::new();
        seed(&table, &["Frutas"]);
        let err = ensure_name_free(&table, "FRUTAS", None).unwrap_err();
        assert!(matches!(err, FeriaError::DuplicateName { .. }));
    }

    #[test]
    fn test_resolve_slug_prefers_explicit() {
        assert_eq!(resolve_slug(Some("mi-slug".to_string()), "Otro"), "mi-slug");
        assert_eq!(resolve_slug(None, "Frutas Secas"), "frutas-secas");
        assert_eq!(resolve_slug(Some("  ".to_string()), "Frutas"), "frutas");
    }
}
