//! Listing parameters and the pagination envelope

use serde::{Deserialize, Serialize};

/// Sort direction for listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Pagination and sorting parameters shared by every listing operation
///
/// Extracted from URL query strings; all fields have defaults.
///
/// # Example
/// ```rust,ignore
/// GET /admin/products?page=2&limit=10
/// GET /admin/brands?search=ac&sort_by=products&sort_order=desc
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: usize,

    /// Number of items per page
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Free-text search, OR'ed across the entity's designated text fields
    /// with case-insensitive substring matching
    pub search: Option<String>,

    /// Field to sort by (entity-specific; unknown fields leave the
    /// insertion order untouched)
    #[serde(alias = "sortBy")]
    pub sort_by: Option<String>,

    /// Sort direction
    #[serde(alias = "sortOrder")]
    pub sort_order: SortOrder,
}

fn default_page() -> usize {
    1
}

fn default_limit() -> usize {
    10
}

// The serde attributes only cover deserialization; programmatic callers get
// the same page/limit defaults here
impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            search: None,
            sort_by: None,
            sort_order: SortOrder::default(),
        }
    }
}

impl ListParams {
    /// Page number, at least 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Items per page, clamped to 1..=100
    pub fn limit(&self) -> usize {
        self.limit.clamp(1, 100)
    }

    /// Offset of the first item on the requested page
    pub fn skip(&self) -> usize {
        (self.page() - 1) * self.limit()
    }
}

/// Paginated listing envelope
///
/// Uniform shape returned by every `list` operation: the page slice plus the
/// paging metadata derived from the same predicate as the slice.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Build the envelope from an already-paged slice and the full match count
    pub fn new(items: Vec<T>, page: usize, limit: usize, total: usize) -> Self {
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);
        Self {
            items,
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Slice a fully filtered and sorted collection down to the requested page
    pub fn from_rows(rows: Vec<T>, params: &ListParams) -> Self {
        let total = rows.len();
        let items: Vec<T> = rows
            .into_iter()
            .skip(params.skip())
            .take(params.limit())
            .collect();
        Self::new(items, params.page(), params.limit(), total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_defaults() {
        let params = ListParams::default();
        // Raw fields carry the defaults, not just the clamped accessors
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 10);
        assert_eq!(params.skip(), 0);
    }

    #[test]
    fn test_struct_update_syntax_keeps_limit_default() {
        let params = ListParams {
            search: Some("frutas".to_string()),
            ..Default::default()
        };
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_params_clamping() {
        let params = ListParams {
            page: 0,
            limit: 500,
            ..Default::default()
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_page_math() {
        let page = Page::new(vec![1, 2, 3], 2, 10, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_page_math_last_page() {
        let page: Page<u8> = Page::new(vec![], 3, 10, 25);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_page_math_empty() {
        let page: Page<u8> = Page::new(vec![], 1, 10, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn test_from_rows_slices_requested_page() {
        let rows: Vec<usize> = (0..25).collect();
        let params = ListParams {
            page: 2,
            limit: 10,
            ..Default::default()
        };
        let page = Page::from_rows(rows, &params);
        assert_eq!(page.items, (10..20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = Page::new(vec![1], 1, 10, 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["hasNext"], false);
        assert_eq!(json["hasPrev"], false);
        assert!(json.get("total_pages").is_none());
    }

    #[test]
    fn test_sort_order_deserializes_lowercase() {
        let order: SortOrder = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(order, SortOrder::Desc);
    }
}
