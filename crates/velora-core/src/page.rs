use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Server-authoritative pagination cursor attached to every list response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: u64,
    pub total_pages: u32,
    pub current_page: u32,
    pub items_per_page: u32,
}

impl PageMeta {
    pub fn is_last_page(&self) -> bool {
        self.total_pages == 0 || self.current_page >= self.total_pages
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            total_items: 0,
            total_pages: 0,
            current_page: 1,
            items_per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Default page size sent when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// One page of a list response: `{ items: [...], meta: {...} }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            meta: PageMeta::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Map each item, keeping the pagination meta.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}

/// A search/filter value. Booleans are kept distinct from text so explicit
/// `false` filters survive to the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Flag(bool),
}

impl FilterValue {
    fn as_query_value(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Flag(b) => b.to_string(),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Parameters for one list fetch: page cursor, free-text search, ordering,
/// and named filters. Built with `with_*` methods, serialized to query
/// pairs by the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub order_by: Option<String>,
    pub order_desc: bool,
    pub filters: IndexMap<String, FilterValue>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_order(mut self, order_by: impl Into<String>, desc: bool) -> Self {
        self.order_by = Some(order_by.into());
        self.order_desc = desc;
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Serialize to `(key, value)` query pairs. Blank search text is not
    /// sent; the server treats absence as "no search".
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("pageSize".to_string(), size.to_string()));
        }
        if let Some(search) = &self.search
            && !search.trim().is_empty()
        {
            pairs.push(("search".to_string(), search.trim().to_string()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("orderBy".to_string(), order_by.clone()));
            pairs.push(("orderDesc".to_string(), self.order_desc.to_string()));
        }
        for (key, value) in &self.filters {
            pairs.push((key.clone(), value.as_query_value()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_meta_wire_names() {
        let json = json!({
            "totalItems": 42,
            "totalPages": 3,
            "currentPage": 2,
            "itemsPerPage": 20
        });
        let meta: PageMeta = serde_json::from_value(json).unwrap();
        assert_eq!(meta.total_items, 42);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.current_page, 2);
        assert_eq!(meta.items_per_page, 20);
        assert!(!meta.is_last_page());
        assert!(!meta.is_first_page());
    }

    #[test]
    fn test_empty_collection_is_last_page() {
        let meta = PageMeta::default();
        assert!(meta.is_last_page());
        assert!(meta.is_first_page());
    }

    #[test]
    fn test_page_decoding() {
        let json = json!({
            "items": ["a", "b"],
            "meta": {
                "totalItems": 2,
                "totalPages": 1,
                "currentPage": 1,
                "itemsPerPage": 20
            }
        });
        let page: Page<String> = serde_json::from_value(json).unwrap();
        assert_eq!(page.len(), 2);
        assert!(page.meta.is_last_page());
    }

    #[test]
    fn test_query_pairs_full() {
        let query = ListQuery::new()
            .with_page(3)
            .with_page_size(50)
            .with_search("silicone")
            .with_order("name", true)
            .with_filter("active", true);

        let pairs = query.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "3".to_string()),
                ("pageSize".to_string(), "50".to_string()),
                ("search".to_string(), "silicone".to_string()),
                ("orderBy".to_string(), "name".to_string()),
                ("orderDesc".to_string(), "true".to_string()),
                ("active".to_string(), "true".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_search_not_sent() {
        let query = ListQuery::new().with_search("   ");
        assert!(query.to_query_pairs().is_empty());
    }

    #[test]
    fn test_false_filter_survives() {
        let query = ListQuery::new().with_filter("active", false);
        assert_eq!(
            query.to_query_pairs(),
            vec![("active".to_string(), "false".to_string())]
        );
    }

    #[test]
    fn test_page_map_keeps_meta() {
        let page = Page {
            items: vec![1, 2, 3],
            meta: PageMeta {
                total_items: 3,
                total_pages: 1,
                current_page: 1,
                items_per_page: 20,
            },
        };
        let mapped = page.map(|n| n * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.meta.total_items, 3);
    }
}
