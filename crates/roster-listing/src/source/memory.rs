use crate::page::Page;
use crate::pagination;
use crate::state::ListState;
use std::collections::HashMap;
use std::fmt;

type Field<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// Serves pages out of a collection already held in memory.
///
/// Search matches a trimmed, case-insensitive substring against any of the
/// search fields. Each active filter must match its field exactly. Filter
/// keys without a registered field are ignored.
///
/// ```
/// use roster_listing::{ListState, MemorySource};
///
/// #[derive(Clone)]
/// struct Employee { name: String, department: String }
///
/// let source = MemorySource::new(vec![
///     Employee { name: "Ali Hassan".into(), department: "Finance".into() },
///     Employee { name: "Sara Lee".into(), department: "Sales".into() },
/// ])
/// .search_field(|e: &Employee| e.name.clone())
/// .filter_field("department", |e: &Employee| e.department.clone());
///
/// let mut state = ListState::new(10);
/// state.set_search("ali");
/// let page = source.page(&state);
/// assert_eq!(page.items.len(), 1);
/// ```
pub struct MemorySource<T> {
    items: Vec<T>,
    search_fields: Vec<Field<T>>,
    filter_fields: HashMap<String, Field<T>>,
}

impl<T> fmt::Debug for MemorySource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySource")
            .field("items", &self.items.len())
            .field("search_fields", &self.search_fields.len())
            .field("filter_fields", &self.filter_fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<T: Clone> MemorySource<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            search_fields: Vec::new(),
            filter_fields: HashMap::new(),
        }
    }

    /// Add a field the search term is matched against.
    pub fn search_field(mut self, field: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.search_fields.push(Box::new(field));
        self
    }

    /// Register the field filter `key` compares against.
    pub fn filter_field(
        mut self,
        key: impl Into<String>,
        field: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.filter_fields.insert(key.into(), Box::new(field));
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the backing collection.
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Whether `item` passes the search term and every active filter.
    pub fn matches(&self, item: &T, state: &ListState) -> bool {
        let needle = state.search().trim().to_lowercase();
        let searched = needle.is_empty()
            || self
                .search_fields
                .iter()
                .any(|field| field(item).to_lowercase().contains(&needle));
        searched
            && state.filters().iter().all(|(key, value)| {
                self.filter_fields
                    .get(key)
                    .is_none_or(|field| field(item) == *value)
            })
    }

    /// Filter, clamp and slice into the page `state` asks for.
    pub fn page(&self, state: &ListState) -> Page<T> {
        for key in state.filters().keys() {
            if !self.filter_fields.contains_key(key) {
                tracing::debug!(%key, "ignoring filter with no configured field");
            }
        }

        let matched: Vec<&T> = self
            .items
            .iter()
            .filter(|item| self.matches(item, state))
            .collect();
        let total_items = matched.len();
        let total_pages = pagination::total_pages(total_items, state.page_size());
        let page = pagination::clamp_page(state.page(), total_pages);
        let items = matched[pagination::slice_bounds(page, state.page_size(), total_items)]
            .iter()
            .map(|item| (*item).clone())
            .collect();

        tracing::debug!(
            total_items,
            page,
            page_size = state.page_size(),
            search = state.search(),
            "recomputed in-memory page"
        );

        Page {
            items,
            total_items,
            page,
            page_size: state.page_size(),
            total_pages,
        }
    }
}
