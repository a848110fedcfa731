use crate::page::Page;
use crate::pagination;
use std::collections::BTreeMap;

/// Page, page size, search term and filter selections of one listing.
///
/// Fields change only through the setters. Changing what is being looked at
/// (search, filters, page size) always sends the listing back to page 1;
/// moving between pages never touches the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    page: usize,
    page_size: usize,
    search: String,
    filters: BTreeMap<String, String>,
    total_items: usize,
    total_pages: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ListState {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
            total_items: 0,
            total_pages: 1,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &BTreeMap<String, String> {
        &self.filters
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Item count reported by the most recent page.
    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Page count reported by the most recent page.
    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Replace the search term. Surrounding whitespace is not significant.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.trim().to_owned();
        self.page = 1;
    }

    /// Select `value` for filter `key`. An empty value clears the filter.
    pub fn set_filter(&mut self, key: &str, value: &str) {
        if value.is_empty() {
            self.filters.remove(key);
        } else {
            self.filters.insert(key.to_owned(), value.to_owned());
        }
        self.page = 1;
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.filters.remove(key);
        self.page = 1;
    }

    /// Move to page `n`, clamped into the known page range.
    pub fn set_page(&mut self, n: usize) {
        self.page = pagination::clamp_page(n, self.total_pages);
    }

    /// Change the page size (zero is treated as one) and return to page 1.
    pub fn set_page_size(&mut self, n: usize) {
        self.page_size = n.max(1);
        self.page = 1;
    }

    /// Record the totals of a freshly produced page.
    ///
    /// Returns `true` when the current page had to be clamped because the
    /// data shrank, in which case a remote listing must fetch again.
    pub fn observe<T>(&mut self, page: &Page<T>) -> bool {
        self.total_items = page.total_items;
        self.total_pages = page.total_pages.max(1);
        let clamped = pagination::clamp_page(self.page, self.total_pages);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    /// Forget observed totals, as when a listing is remounted.
    pub fn reset_totals(&mut self) {
        self.total_items = 0;
        self.total_pages = 1;
    }
}
