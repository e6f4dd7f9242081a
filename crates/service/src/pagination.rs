//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct, helpers to normalize inputs and
//! the `Page` envelope returned by paginated queries.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `u64` (0-based page index, page size)
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One page of results plus totals.
#[derive(Clone, Debug, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, opts: Pagination, total_items: u64) -> Self {
        let (idx, per_page) = opts.normalize();
        Self { items, page: idx + 1, per_page, total_items, total_pages: total_items.div_ceil(per_page) }
    }

    /// Slice an already ordered, complete list.
    pub fn from_slice(all: &[T], opts: Pagination) -> Self
    where
        T: Clone,
    {
        let (idx, per_page) = opts.normalize();
        let start = (idx * per_page) as usize;
        let items = all.iter().skip(start).take(per_page as usize).cloned().collect();
        Self::new(items, opts, all.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::{Page, Pagination};

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }

    #[test]
    fn page_totals_round_up() {
        let p = Page::new(vec![1, 2], Pagination { page: 3, per_page: 2 }, 5);
        assert_eq!(p.page, 3);
        assert_eq!(p.total_pages, 3);
        let empty: Page<u8> = Page::new(vec![], Pagination::default(), 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn from_slice_takes_requested_window() {
        let all: Vec<u32> = (1..=7).collect();
        let p = Page::from_slice(&all, Pagination { page: 2, per_page: 3 });
        assert_eq!(p.items, vec![4, 5, 6]);
        assert_eq!(p.total_items, 7);
        assert_eq!(p.total_pages, 3);
        let past_end = Page::from_slice(&all, Pagination { page: 9, per_page: 3 });
        assert!(past_end.items.is_empty());
    }
}
