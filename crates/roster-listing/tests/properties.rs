use proptest::prelude::*;
use roster_listing::pagination::{page_window, total_pages, PageSlot};
use roster_listing::{ListState, MemorySource, Page};

fn observed(total_items: usize, page_size: usize) -> ListState {
    let mut state = ListState::new(page_size);
    state.observe(&Page::<()> {
        items: Vec::new(),
        total_items,
        page: 1,
        page_size,
        total_pages: total_pages(total_items, page_size),
    });
    state
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Change {
    Search,
    Filter,
    ClearFilter,
    PageSize,
}

fn arb_change() -> impl Strategy<Value = Change> {
    prop_oneof![
        Just(Change::Search),
        Just(Change::Filter),
        Just(Change::ClearFilter),
        Just(Change::PageSize),
    ]
}

proptest! {
    #[test]
    fn total_pages_matches_ceiling(total in 0usize..10_000, size in 1usize..200) {
        let expected = std::cmp::max(1, total.div_ceil(size));
        prop_assert_eq!(total_pages(total, size), expected);
    }

    #[test]
    fn query_changes_return_to_first_page(
        total in 0usize..500,
        size in 1usize..50,
        start in 1usize..60,
        change in arb_change(),
        text in "[a-z]{0,6}",
        new_size in 0usize..100,
    ) {
        let mut state = observed(total, size);
        state.set_page(start);
        match change {
            Change::Search => state.set_search(&text),
            Change::Filter => state.set_filter("status", &text),
            Change::ClearFilter => state.clear_filter("status"),
            Change::PageSize => state.set_page_size(new_size),
        }
        prop_assert_eq!(state.page(), 1);
    }

    #[test]
    fn set_page_stays_in_range(total in 0usize..500, size in 1usize..50, requested in 0usize..1_000) {
        let mut state = observed(total, size);
        state.set_page(requested);
        prop_assert!(state.page() >= 1);
        prop_assert!(state.page() <= state.total_pages());
        if requested > state.total_pages() {
            prop_assert_eq!(state.page(), state.total_pages());
        }
    }

    #[test]
    fn memory_pages_never_overflow(len in 0usize..120, size in 1usize..30, requested in 0usize..20) {
        let source = MemorySource::new((0..len).collect::<Vec<_>>());
        let mut state = ListState::new(size);
        state.observe(&source.page(&state));
        state.set_page(requested);
        let page = source.page(&state);
        prop_assert!(page.items.len() <= size);
        prop_assert_eq!(page.total_items, len);
        prop_assert!(page.page >= 1 && page.page <= page.total_pages);
    }

    #[test]
    fn window_keeps_first_last_and_current(current in 1usize..200, total in 1usize..200) {
        let slots = page_window(current, total);
        let current = current.min(total);
        prop_assert_eq!(slots.first(), Some(&PageSlot::Page(1)));
        prop_assert_eq!(slots.last(), Some(&PageSlot::Page(total)));
        prop_assert!(slots.contains(&PageSlot::Page(current)));

        let pages: Vec<usize> = slots
            .iter()
            .filter_map(|slot| match slot {
                PageSlot::Page(n) => Some(*n),
                PageSlot::Ellipsis => None,
            })
            .collect();
        prop_assert!(pages.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(pages.iter().all(|&n| n == 1 || n == total || n.abs_diff(current) <= 1));
    }
}
