//! Page window arithmetic.

use std::ops::Range;

/// Number of pages needed for `total` rows. Zero rows means zero pages.
///
/// A page size of zero is treated as one.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

/// Clamp `page` into `[0, page_count - 1]` (or `0` when there are no rows).
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.min(page_count(total, page_size).saturating_sub(1))
}

/// The rows of one page of a sorted dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageWindow {
    /// Zero-based page index, already clamped.
    pub page: usize,
    /// Total number of pages.
    pub page_count: usize,
    /// Page size in effect.
    pub page_size: usize,
    /// Total number of rows across all pages.
    pub total: usize,
    /// Index range into the sorted dataset.
    pub range: Range<usize>,
}

impl PageWindow {
    /// Compute the window for `page`, clamping it to the valid range.
    pub fn new(page: usize, total: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page = clamp_page(page, total, page_size);
        let start = (page * page_size).min(total);
        let end = (start + page_size).min(total);
        Self {
            page,
            page_count: page_count(total, page_size),
            page_size,
            total,
            range: start..end,
        }
    }

    /// A single window spanning every row (pagination disabled).
    pub fn all(total: usize) -> Self {
        Self {
            page: 0,
            page_count: usize::from(total > 0),
            page_size: total.max(1),
            total,
            range: 0..total,
        }
    }

    /// One-based index of the first row on this page, or 0 when empty.
    pub fn first(&self) -> usize {
        if self.range.is_empty() {
            0
        } else {
            self.range.start + 1
        }
    }

    /// One-based index of the last row on this page, or 0 when empty.
    pub fn last(&self) -> usize {
        self.range.end
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    /// Returns `true` if there is a page before this one.
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 10), 0);
        assert_eq!(page_count(5, 2), 3);
        assert_eq!(page_count(4, 2), 2);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn test_window_clamps_past_end() {
        let window = PageWindow::new(5, 5, 2);
        assert_eq!(window.page, 2);
        assert_eq!(window.range, 4..5);
        assert_eq!((window.first(), window.last()), (5, 5));
        assert!(window.has_prev());
        assert!(!window.has_next());
    }

    #[test]
    fn test_window_on_empty_data() {
        let window = PageWindow::new(3, 0, 10);
        assert_eq!(window.page, 0);
        assert_eq!(window.page_count, 0);
        assert!(window.is_empty());
        assert_eq!((window.first(), window.last()), (0, 0));
    }

    #[test]
    fn test_all_window() {
        let window = PageWindow::all(7);
        assert_eq!(window.range, 0..7);
        assert_eq!(window.page_count, 1);
        assert!(!window.has_next());
    }
}
