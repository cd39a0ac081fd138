//! Page cursor and the page window derived from it.
use std::ops::Range;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 5;

/// Page sizes offered by the page-size toggle.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 20, 50];

/// Requested page and page size. `page` is 1-based and may point past the
/// end; [`Pagination::compute`] clamps it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageCursor {
    pub page: usize,
    pub items_per_page: usize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self {
            page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

/// Window over the filtered records.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub start_index: usize,
    /// Exclusive; may exceed `total_items` on the last page.
    pub end_index: usize,
}

impl Pagination {
    pub fn compute(total_items: usize, cursor: PageCursor) -> Self {
        let items_per_page = cursor.items_per_page.max(1);
        let total_pages = total_items.div_ceil(items_per_page);
        let current_page = cursor.page.clamp(1, total_pages.max(1));
        let start_index = (current_page - 1) * items_per_page;
        Self {
            current_page,
            total_pages,
            total_items,
            items_per_page,
            start_index,
            end_index: start_index + items_per_page,
        }
    }

    /// Index range safe to slice the filtered list with.
    pub fn range(&self) -> Range<usize> {
        let start = self.start_index.min(self.total_items);
        let end = self.end_index.min(self.total_items);
        start..end
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// 1-based first/last item shown, `(0, 0)` when nothing is shown.
    pub fn shown_bounds(&self) -> (usize, usize) {
        let r = self.range();
        if r.is_empty() { (0, 0) } else { (r.start + 1, r.end) }
    }
}

/// The page size after `current` in [`PAGE_SIZE_OPTIONS`], wrapping around.
pub fn next_page_size(current: usize) -> usize {
    PAGE_SIZE_OPTIONS
        .iter()
        .copied()
        .find(|&n| n > current)
        .unwrap_or(PAGE_SIZE_OPTIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(page: usize, items_per_page: usize) -> PageCursor {
        PageCursor { page, items_per_page }
    }

    #[test]
    fn computes_bounds_for_middle_page() {
        let p = Pagination::compute(12, cursor(2, 5));
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.current_page, 2);
        assert_eq!(p.range(), 5..10);
        assert!(p.has_prev() && p.has_next());
        assert_eq!(p.shown_bounds(), (6, 10));
    }

    #[test]
    fn last_page_is_short() {
        let p = Pagination::compute(12, cursor(3, 5));
        assert_eq!(p.end_index, 15);
        assert_eq!(p.range(), 10..12);
        assert!(!p.has_next());
    }

    #[test]
    fn clamps_page_into_range() {
        let p = Pagination::compute(7, cursor(9, 5));
        assert_eq!(p.current_page, 2);
        let p = Pagination::compute(7, cursor(0, 5));
        assert_eq!(p.current_page, 1);
    }

    #[test]
    fn empty_list_stays_on_page_one() {
        let p = Pagination::compute(0, cursor(4, 5));
        assert_eq!(p.total_pages, 0);
        assert_eq!(p.current_page, 1);
        assert!(p.range().is_empty());
        assert_eq!(p.shown_bounds(), (0, 0));
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let p = Pagination::compute(3, cursor(2, 0));
        assert_eq!(p.items_per_page, 1);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.range(), 1..2);
    }

    #[test]
    fn page_size_cycle_wraps() {
        assert_eq!(next_page_size(5), 10);
        assert_eq!(next_page_size(20), 50);
        assert_eq!(next_page_size(50), 5);
        assert_eq!(next_page_size(7), 10);
    }
}
