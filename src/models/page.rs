//! Paginated responses and client-side page slicing

use serde::{Deserialize, Serialize};

/// Pagination block of a list response. Only `pages` is guaranteed by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    pub pages: u32,
}

/// `{ items: [...], pagination: { pages } }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Slice one 1-based page out of an already-filtered list.
///
/// Page 0 is treated as page 1; pages past the end are empty.
pub fn paginate<T>(items: &[T], page: usize, limit: usize) -> &[T] {
    if limit == 0 {
        return &[];
    }
    let start = page.max(1).saturating_sub(1).saturating_mul(limit);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(limit).min(items.len());
    &items[start..end]
}

/// Number of pages for `len` items, never less than 1.
pub fn total_pages(len: usize, limit: usize) -> usize {
    if limit == 0 {
        return 1;
    }
    len.div_ceil(limit).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_slices() {
        let items: Vec<u32> = (1..=25).collect();
        assert_eq!(paginate(&items, 1, 10), &items[0..10]);
        assert_eq!(paginate(&items, 3, 10), &[21, 22, 23, 24, 25]);
        assert!(paginate(&items, 4, 10).is_empty());
    }

    #[test]
    fn test_paginate_edge_cases() {
        let items = vec!["a", "b", "c"];
        assert_eq!(paginate(&items, 0, 2), &["a", "b"]);
        assert!(paginate(&items, 1, 0).is_empty());
        assert!(paginate::<u8>(&[], 1, 10).is_empty());
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn test_page_deserializes_minimal_pagination() {
        let page: Page<u32> =
            serde_json::from_str(r#"{"items":[1,2],"pagination":{"pages":4}}"#).unwrap();
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.pagination.pages, 4);
        assert_eq!(page.pagination.total, 0);
    }
}
