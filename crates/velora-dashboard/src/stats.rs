use velora_core::PageMeta;

/// Headline counts shown above a list.
///
/// Computed over the loaded page only, NOT the whole collection: with more
/// than one page, `active`/`inactive` describe what is on screen while
/// `total_items` is the server's collection-wide count. Callers should
/// label them accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStats {
    /// Items on the loaded page.
    pub page_count: usize,
    /// Active items on the loaded page.
    pub active: usize,
    /// Inactive items on the loaded page.
    pub inactive: usize,
    /// Collection-wide total, server-authoritative.
    pub total_items: u64,
}

impl PageStats {
    pub fn from_page<T>(items: &[T], meta: &PageMeta, is_active: impl Fn(&T) -> bool) -> Self {
        let active = items.iter().filter(|item| is_active(item)).count();
        Self {
            page_count: items.len(),
            active,
            inactive: items.len() - active,
            total_items: meta.total_items,
        }
    }
}

/// Mean of a numeric field over the loaded page; `None` when empty.
/// Page-scoped like [`PageStats`].
pub fn page_average<T>(items: &[T], value: impl Fn(&T) -> f64) -> Option<f64> {
    if items.is_empty() {
        return None;
    }
    let sum: f64 = items.iter().map(value).sum();
    Some(sum / items.len() as f64)
}
