//! Page arithmetic shared by the data sources and the pagination strip.

use std::ops::Range;

/// Number of pages needed for `total_items`, never less than one.
///
/// ```
/// use roster_listing::pagination::total_pages;
/// assert_eq!(total_pages(25, 10), 3);
/// assert_eq!(total_pages(0, 10), 1);
/// ```
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    total_items.div_ceil(size).max(1)
}

/// Clamp a requested page into `1..=total_pages`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Index range of `page` within a collection of `len` items.
///
/// Pages past the end yield an empty range at `len`.
pub fn slice_bounds(page: usize, page_size: usize, len: usize) -> Range<usize> {
    let size = page_size.max(1);
    let start = page.saturating_sub(1).saturating_mul(size).min(len);
    let end = start.saturating_add(size).min(len);
    start..end
}

/// One slot of the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSlot {
    Page(usize),
    Ellipsis,
}

/// Page numbers to show around `current`: one neighbour on each side, the
/// first and last page always, and an ellipsis wherever pages are skipped.
///
/// ```
/// use roster_listing::pagination::{page_window, PageSlot::*};
/// assert_eq!(
///     page_window(5, 12),
///     vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(12)]
/// );
/// ```
pub fn page_window(current: usize, total_pages: usize) -> Vec<PageSlot> {
    let total = total_pages.max(1);
    let current = clamp_page(current, total);
    let low = current.saturating_sub(1).max(1);
    let high = (current + 1).min(total);

    let mut slots = Vec::with_capacity(7);
    if low > 1 {
        slots.push(PageSlot::Page(1));
        if low > 2 {
            slots.push(PageSlot::Ellipsis);
        }
    }
    slots.extend((low..=high).map(PageSlot::Page));
    if high < total {
        if high < total - 1 {
            slots.push(PageSlot::Ellipsis);
        }
        slots.push(PageSlot::Page(total));
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::PageSlot::{Ellipsis, Page};
    use super::*;

    #[test]
    fn total_pages_rounds_up_and_floors_at_one() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(31, 10), 4);
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn clamp_page_bounds() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(4, 0), 1);
    }

    #[test]
    fn slice_bounds_for_last_partial_page() {
        assert_eq!(slice_bounds(1, 10, 25), 0..10);
        assert_eq!(slice_bounds(3, 10, 25), 20..25);
        assert_eq!(slice_bounds(4, 10, 25), 25..25);
    }

    #[test]
    fn window_small_totals_have_no_ellipsis() {
        assert_eq!(page_window(1, 1), vec![Page(1)]);
        assert_eq!(page_window(2, 3), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_window(1, 3), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn window_at_edges() {
        assert_eq!(page_window(1, 12), vec![Page(1), Page(2), Ellipsis, Page(12)]);
        assert_eq!(page_window(12, 12), vec![Page(1), Ellipsis, Page(11), Page(12)]);
        assert_eq!(
            page_window(3, 12),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(12)]
        );
    }

    #[test]
    fn window_collapses_single_skipped_page() {
        assert_eq!(
            page_window(4, 12),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Ellipsis, Page(12)]
        );
    }

    #[test]
    fn window_clamps_current() {
        assert_eq!(page_window(99, 4), page_window(4, 4));
    }
}
