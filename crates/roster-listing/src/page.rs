use serde::{Deserialize, Serialize};

/// One page of results, produced fresh on every recompute or fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// A single empty page, used for the error state and before the first
    /// load.
    pub fn empty(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            total_items: 0,
            page: 1,
            page_size: page_size.max(1),
            total_pages: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// 1-based numbers of the first and last item on this page, for a
    /// "Showing 41–50 of 115" caption. `None` when the page holds nothing.
    pub fn range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.page.max(1) - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_items: self.total_items,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }
}
