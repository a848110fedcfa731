//! A complete list page: filter bar, table and pagination strip wired to a
//! data source.
//!
//! The listing owns its [`ListState`]. Every setter recomputes the page
//! (in-memory sources) or issues a fetch (remote sources) and returns the
//! command that carries it out. Remote responses come back as
//! [`Message::Loaded`] and are applied only if their request id is still
//! the latest one and the listing is still mounted.

use crate::data_table::{self, BodyState, Column, DataTable};
use crate::filter_bar::{self, BarSlot, FilterBar};
use crate::filter_select::FilterSelect;
use crate::key::{hint_line, Binding, KeyCombination, KeyMap};
use crate::pagination::{self, Pagination};
use crate::search_field::SearchField;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use roster_core::{Command, Component, Subscription};
use roster_listing::{ListDataSource, ListError, ListState, ListingConfig, Page, RequestId};

#[derive(Debug)]
pub enum Message<T> {
    Bar(filter_bar::Message),
    Table(data_table::Message),
    Pages(pagination::Message),
    /// A remote fetch finished.
    Loaded {
        request: RequestId,
        result: Result<Page<T>, ListError>,
    },
    KeyPress(KeyEvent),
    Paste(String),
    SetSearch(String),
    SetFilter { key: String, value: Option<String> },
    SetPage(usize),
    SetPageSize(usize),
    Refetch,
}

/// Where keyboard input goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Search,
    Filter(usize),
    Table,
}

pub struct ListingKeys {
    pub next_zone: Binding,
    pub previous_zone: Binding,
    /// Leave the search field or a filter for the table.
    pub leave: Binding,
    pub refetch: Binding,
}

impl Default for ListingKeys {
    fn default() -> Self {
        Self {
            next_zone: Binding::new(vec![KeyCombination::new(KeyCode::Tab)], "tab", "focus"),
            previous_zone: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::BackTab),
                    KeyCombination::shift(KeyCode::BackTab),
                ],
                "shift+tab",
                "back",
            ),
            leave: Binding::new(vec![KeyCombination::new(KeyCode::Esc)], "esc", "to table"),
            refetch: Binding::new(
                vec![KeyCombination::ctrl(KeyCode::Char('r'))],
                "ctrl+r",
                "refetch",
            ),
        }
    }
}

impl KeyMap for ListingKeys {
    fn bindings(&self) -> Vec<&Binding> {
        vec![&self.next_zone, &self.refetch]
    }
}

/// One paginated, filterable list bound to a [`ListDataSource`].
///
/// ```rust,ignore
/// let employees = Listing::new(
///     "Employees",
///     MemorySource::new(seed::employees())
///         .search_field(|e: &Employee| e.name.clone())
///         .filter_field("department", |e: &Employee| e.department.clone()),
///     vec![Column::text("Name", |e: &Employee| e.name.clone())],
///     &settings.listing,
/// )
/// .with_filter(FilterSelect::controlled("department", "Department", departments));
///
/// // on mount:
/// let cmd = employees.mount();
/// ```
pub struct Listing<T> {
    title: String,
    state: ListState,
    source: ListDataSource<T>,
    bar: FilterBar,
    table: DataTable<T>,
    pagination: Pagination,
    zone: Zone,
    mounted: bool,
    keys: ListingKeys,
}

impl<T: Clone + Send + 'static> Listing<T> {
    pub fn new(
        title: impl Into<String>,
        source: impl Into<ListDataSource<T>>,
        columns: Vec<Column<T>>,
        config: &ListingConfig,
    ) -> Self {
        let title = title.into();
        let bar = FilterBar::new(SearchField::new(format!("Search {}", title.to_lowercase())))
            .with_debounce(config.search_debounce());
        let table = DataTable::new(columns).with_title(title.clone());
        let state = ListState::new(config.page_size);
        let mut pagination = Pagination::new(config.page_size_options.clone());
        pagination.sync(&state, None);

        let mut listing = Self {
            title,
            state,
            source: source.into(),
            bar,
            table,
            pagination,
            zone: Zone::Search,
            mounted: false,
            keys: ListingKeys::default(),
        };
        listing.set_zone(Zone::Search);
        listing
    }

    pub fn with_filter(mut self, select: FilterSelect) -> Self {
        self.bar = self.bar.with_filter(select);
        self
    }

    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.table = self.table.with_empty_text(text);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    pub fn source(&self) -> &ListDataSource<T> {
        &self.source
    }

    pub fn items(&self) -> &[T] {
        self.table.items()
    }

    pub fn body_state(&self) -> BodyState {
        self.table.body_state()
    }

    pub fn is_loading(&self) -> bool {
        self.table.is_loading()
    }

    pub fn error(&self) -> Option<&ListError> {
        self.table.error()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn filter_bar(&self) -> &FilterBar {
        &self.bar
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// Whether a dropdown is open and should receive Esc.
    pub fn overlay_open(&self) -> bool {
        self.bar.overlay_open()
    }

    /// Start showing data. Totals from an earlier mount are forgotten and
    /// remote listings fetch the current page.
    pub fn mount(&mut self) -> Command<Message<T>> {
        self.mounted = true;
        self.state.reset_totals();
        self.pagination.sync(&self.state, None);
        tracing::info!(listing = %self.title, remote = self.source.is_remote(), "listing mounted");
        self.reload()
    }

    /// Stop showing data. Pending search text is dropped and any response
    /// still in flight will be ignored.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.bar.cancel_debounce();
        if let ListDataSource::Remote(remote) = &mut self.source {
            remote.cancel();
        }
        self.table.set_loading(false);
        tracing::info!(listing = %self.title, "listing unmounted");
    }

    pub fn set_search(&mut self, term: &str) -> Command<Message<T>> {
        self.state.set_search(term);
        self.changed()
    }

    /// Set filter `key`, or clear it with `None`.
    pub fn set_filter(&mut self, key: &str, value: Option<&str>) -> Command<Message<T>> {
        match value {
            Some(value) => self.state.set_filter(key, value),
            None => self.state.clear_filter(key),
        }
        self.changed()
    }

    pub fn set_page(&mut self, n: usize) -> Command<Message<T>> {
        self.state.set_page(n);
        self.changed()
    }

    pub fn set_page_size(&mut self, n: usize) -> Command<Message<T>> {
        self.state.set_page_size(n);
        self.changed()
    }

    /// Run the current query again.
    pub fn refetch(&mut self) -> Command<Message<T>> {
        tracing::debug!(listing = %self.title, "refetch requested");
        self.reload()
    }

    /// Swap the items of an in-memory listing. Remote listings ignore this.
    pub fn replace_items(&mut self, items: Vec<T>) -> Command<Message<T>> {
        match &mut self.source {
            ListDataSource::Memory(memory) => {
                memory.replace(items);
                self.reload()
            }
            ListDataSource::Remote(_) => Command::none(),
        }
    }

    fn changed(&mut self) -> Command<Message<T>> {
        self.bar.sync(&self.state);
        self.pagination.sync(&self.state, None);
        self.reload()
    }

    fn reload(&mut self) -> Command<Message<T>> {
        if !self.mounted {
            return Command::none();
        }
        match &mut self.source {
            ListDataSource::Memory(memory) => {
                let page = memory.page(&self.state);
                self.apply(page);
                Command::none()
            }
            ListDataSource::Remote(remote) => {
                let (request, fetch) = remote.issue(&self.state);
                self.table.set_loading(true);
                Command::perform(fetch, move |result| Message::Loaded { request, result })
            }
        }
    }

    /// Show `page`. Returns whether the current page had to be clamped.
    fn apply(&mut self, page: Page<T>) -> bool {
        let clamped = self.state.observe(&page);
        let range = page.range();
        self.table.set_items(page.items);
        self.pagination.sync(&self.state, range);
        self.bar.sync(&self.state);
        clamped
    }

    fn loaded(&mut self, request: RequestId, result: Result<Page<T>, ListError>) -> Command<Message<T>> {
        if !self.mounted {
            tracing::debug!(%request, listing = %self.title, "response for unmounted listing dropped");
            return Command::none();
        }
        let ListDataSource::Remote(remote) = &mut self.source else {
            return Command::none();
        };
        if !remote.accept(request) {
            tracing::debug!(%request, listing = %self.title, "stale response discarded");
            return Command::none();
        }
        self.table.set_loading(false);

        match result {
            Ok(page) => {
                if self.apply(page) {
                    tracing::debug!(
                        listing = %self.title,
                        page = self.state.page(),
                        "page out of range after load, fetching clamped page"
                    );
                    return self.reload();
                }
                Command::none()
            }
            Err(err) => {
                tracing::warn!(%request, listing = %self.title, error = %err, "page fetch failed");
                self.table.set_error(err);
                self.state.observe(&Page::<T>::empty(self.state.page_size()));
                self.pagination.sync(&self.state, None);
                Command::none()
            }
        }
    }

    fn zones(&self) -> Vec<Zone> {
        self.bar
            .slots()
            .map(|slot| match slot {
                BarSlot::Search => Zone::Search,
                BarSlot::Filter(i) => Zone::Filter(i),
            })
            .chain(std::iter::once(Zone::Table))
            .collect()
    }

    pub fn set_zone(&mut self, zone: Zone) {
        self.zone = zone;
        match zone {
            Zone::Search => self.bar.set_focus(Some(BarSlot::Search)),
            Zone::Filter(i) => self.bar.set_focus(Some(BarSlot::Filter(i))),
            Zone::Table => self.bar.set_focus(None),
        }
        if zone == Zone::Table {
            self.table.focus();
        } else {
            self.table.blur();
        }
    }

    fn cycle_zone(&mut self, forward: bool) {
        let zones = self.zones();
        let current = zones.iter().position(|z| *z == self.zone).unwrap_or(0);
        let next = if forward {
            (current + 1) % zones.len()
        } else {
            (current + zones.len() - 1) % zones.len()
        };
        self.set_zone(zones[next]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message<T>> {
        if self.keys.refetch.matches(&key) {
            return self.refetch();
        }
        if self.bar.overlay_open() {
            return self.update(Message::Bar(filter_bar::Message::KeyPress(key)));
        }
        if self.keys.leave.matches(&key) && self.zone != Zone::Table {
            self.set_zone(Zone::Table);
            return Command::none();
        }
        if self.keys.next_zone.matches(&key) {
            self.cycle_zone(true);
            return Command::none();
        }
        if self.keys.previous_zone.matches(&key) {
            self.cycle_zone(false);
            return Command::none();
        }
        match self.zone {
            Zone::Search | Zone::Filter(_) => {
                self.update(Message::Bar(filter_bar::Message::KeyPress(key)))
            }
            Zone::Table if self.pagination.handles(&key) => {
                self.update(Message::Pages(pagination::Message::KeyPress(key)))
            }
            Zone::Table => self.update(Message::Table(data_table::Message::KeyPress(key))),
        }
    }

    fn hints(&self) -> ratatui::text::Line<'static> {
        let mut bindings = Vec::new();
        if self.zone == Zone::Table {
            bindings.extend(self.pagination.keys().bindings());
            bindings.extend(self.table.keys().bindings());
        } else {
            bindings.push(&self.keys.leave);
        }
        bindings.extend(self.keys.bindings());
        hint_line(bindings)
    }
}

impl<T: Clone + Send + 'static> Component for Listing<T> {
    type Message = Message<T>;

    fn update(&mut self, msg: Message<T>) -> Command<Message<T>> {
        match msg {
            Message::Bar(filter_bar::Message::SearchSettled(term)) => self.set_search(&term),
            Message::Bar(filter_bar::Message::FilterChanged { key, value }) => {
                self.set_filter(&key, value.as_deref())
            }
            Message::Bar(inner) => self.bar.update(inner).map(Message::Bar),
            Message::Pages(pagination::Message::PageRequested(n)) => self.set_page(n),
            Message::Pages(pagination::Message::PageSizeRequested(n)) => self.set_page_size(n),
            Message::Pages(inner) => self.pagination.update(inner).map(Message::Pages),
            Message::Table(inner) => self.table.update(inner).map(Message::Table),
            Message::Loaded { request, result } => self.loaded(request, result),
            Message::KeyPress(key) => self.handle_key(key),
            Message::Paste(text) => self.update(Message::Bar(filter_bar::Message::Paste(text))),
            Message::SetSearch(term) => self.set_search(&term),
            Message::SetFilter { key, value } => self.set_filter(&key, value.as_deref()),
            Message::SetPage(n) => self.set_page(n),
            Message::SetPageSize(n) => self.set_page_size(n),
            Message::Refetch => self.refetch(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let [bar_area, table_area, pages_area, hint_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.bar.view(frame, bar_area);
        self.table.view(frame, table_area);
        self.pagination.view(frame, pages_area);
        frame.render_widget(Paragraph::new(self.hints()), hint_area);
        self.bar.view_overlays(frame, bar_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message<T>>> {
        if !self.mounted {
            return vec![];
        }
        let mut subs: Vec<_> = self
            .bar
            .subscriptions()
            .into_iter()
            .map(|sub| sub.map(Message::Bar))
            .collect();
        subs.extend(
            self.table
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Message::Table)),
        );
        subs
    }

    fn focused(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter_select::FilterOption;
    use crossterm::event::KeyModifiers;
    use futures::future::BoxFuture;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use roster_core::testing::buffer_to_string;
    use roster_listing::{MemorySource, PageFetcher, PageRequest, RemoteSource};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    struct Employee {
        name: String,
        department: String,
    }

    fn employee(name: &str, department: &str) -> Employee {
        Employee {
            name: name.into(),
            department: department.into(),
        }
    }

    fn staff(count: usize) -> Vec<Employee> {
        (1..=count)
            .map(|n| employee(&format!("Employee {n:02}"), if n % 2 == 0 { "Sales" } else { "Finance" }))
            .collect()
    }

    fn config() -> ListingConfig {
        ListingConfig::default()
    }

    fn memory_listing(items: Vec<Employee>) -> Listing<Employee> {
        let source = MemorySource::new(items)
            .search_field(|e: &Employee| e.name.clone())
            .filter_field("department", |e: &Employee| e.department.clone());
        Listing::new(
            "Employees",
            source,
            vec![
                Column::text("Name", |e: &Employee| e.name.clone()),
                Column::text("Department", |e: &Employee| e.department.clone()),
            ],
            &config(),
        )
        .with_filter(FilterSelect::controlled(
            "department",
            "Department",
            vec!["Finance".into(), "Sales".into(), FilterOption::new("Human Resources", "HR")],
        ))
    }

    /// Run `msg` and every synchronous follow-up; return the first async
    /// command left over, if any.
    fn pump<T: Clone + Send + 'static>(listing: &mut Listing<T>, msg: Message<T>) -> Option<Command<Message<T>>> {
        let mut cmd = listing.update(msg);
        loop {
            if cmd.is_async() {
                return Some(cmd);
            }
            match cmd.into_message() {
                Some(next) => cmd = listing.update(next),
                None => return None,
            }
        }
    }

    fn press(code: KeyCode) -> Message<Employee> {
        Message::KeyPress(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn page_past_the_end_clamps_to_last() {
        let mut listing = memory_listing(staff(25));
        assert!(listing.mount().is_none());
        assert_eq!(listing.state().total_pages(), 3);

        assert!(listing.set_page(5).is_none());
        assert_eq!(listing.state().page(), 3);
        let names: Vec<_> = listing.items().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            ["Employee 21", "Employee 22", "Employee 23", "Employee 24", "Employee 25"]
        );
        assert_eq!(listing.pagination().page(), 3);
    }

    #[test]
    fn replacing_items_recomputes_and_clamps() {
        let mut listing = memory_listing(staff(25));
        listing.mount();
        listing.set_page(3);
        assert!(listing.replace_items(staff(12)).is_none());
        assert_eq!(listing.state().page(), 2);
        assert_eq!(listing.state().total_items(), 12);
        let names: Vec<_> = listing.items().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Employee 11", "Employee 12"]);
        assert_eq!(listing.pagination().total_pages(), 2);
    }

    #[test]
    fn escape_leaves_the_bar_for_the_table() {
        let mut listing = memory_listing(staff(5));
        listing.mount();
        assert_eq!(listing.zone(), Zone::Search);
        pump(&mut listing, press(KeyCode::Esc));
        assert_eq!(listing.zone(), Zone::Table);
        pump(&mut listing, press(KeyCode::Esc));
        assert_eq!(listing.zone(), Zone::Table);
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut items = staff(12);
        items.push(employee("Ali Hassan", "Finance"));
        items.push(employee("Sara Lee", "Sales"));
        let mut listing = memory_listing(items);
        listing.mount();

        listing.set_search("  ALI ");
        assert_eq!(listing.items(), [employee("Ali Hassan", "Finance")]);
        assert_eq!(listing.state().total_items(), 1);
        assert_eq!(listing.state().search(), "ALI");
    }

    #[test]
    fn no_matches_shows_empty_not_loading() {
        let mut listing = memory_listing(staff(8));
        listing.mount();
        listing.set_search("zzz");
        assert!(listing.items().is_empty());
        assert_eq!(listing.body_state(), BodyState::Empty);
        assert_eq!(listing.state().total_items(), 0);
        assert_eq!(listing.state().total_pages(), 1);
    }

    #[test]
    fn page_size_change_returns_to_first_page() {
        let mut listing = memory_listing(staff(45));
        listing.mount();
        listing.set_page(3);
        assert_eq!(listing.state().page(), 3);

        listing.set_page_size(20);
        assert_eq!(listing.state().page(), 1);
        assert_eq!(listing.items().len(), 20);
        assert_eq!(listing.state().total_pages(), 3);
    }

    #[test]
    fn filter_and_all_option() {
        let mut listing = memory_listing(staff(10));
        listing.mount();
        listing.set_page(2);
        listing.set_filter("department", Some("Sales"));
        assert_eq!(listing.state().page(), 1);
        assert!(listing.items().iter().all(|e| e.department == "Sales"));
        assert_eq!(listing.filter_bar().selects()[0].value(), Some("Sales"));

        listing.set_filter("department", None);
        assert_eq!(listing.items().len(), 10);
        assert_eq!(listing.filter_bar().selects()[0].value(), None);
    }

    #[test]
    fn unmounted_listing_does_nothing() {
        let mut listing = memory_listing(staff(5));
        assert!(listing.set_search("a").is_none());
        assert!(listing.items().is_empty());
        assert!(listing.subscriptions().is_empty());
    }

    #[test]
    fn typed_search_applies_after_debounce() {
        let mut items = staff(5);
        items.push(employee("Ali Hassan", "Finance"));
        let mut listing = memory_listing(items);
        listing.mount();

        for c in "ali".chars() {
            assert!(pump(&mut listing, press(KeyCode::Char(c))).is_none());
        }
        assert_eq!(listing.items().len(), 6);
        assert_eq!(listing.subscriptions().len(), 1);

        let generation = listing.filter_bar().debounce().generation();
        pump(&mut listing, Message::Bar(filter_bar::Message::DebounceElapsed(generation)));
        assert_eq!(listing.items(), [employee("Ali Hassan", "Finance")]);
        assert!(listing.subscriptions().is_empty());
    }

    #[test]
    fn unmount_cancels_pending_search() {
        let mut listing = memory_listing(staff(5));
        listing.mount();
        pump(&mut listing, press(KeyCode::Char('x')));
        let generation = listing.filter_bar().debounce().generation();
        listing.unmount();
        pump(&mut listing, Message::Bar(filter_bar::Message::DebounceElapsed(generation)));
        assert_eq!(listing.state().search(), "");
    }

    #[test]
    fn tab_cycles_zones_and_table_keys_page() {
        let mut listing = memory_listing(staff(25));
        listing.mount();
        assert_eq!(listing.zone(), Zone::Search);
        pump(&mut listing, press(KeyCode::Tab));
        assert_eq!(listing.zone(), Zone::Filter(0));
        pump(&mut listing, press(KeyCode::Tab));
        assert_eq!(listing.zone(), Zone::Table);

        pump(&mut listing, press(KeyCode::Right));
        assert_eq!(listing.state().page(), 2);
        pump(&mut listing, press(KeyCode::Char('G')));
        assert_eq!(listing.state().page(), 3);
        pump(&mut listing, press(KeyCode::Char('s')));
        assert_eq!(listing.state().page_size(), 20);
        assert_eq!(listing.state().page(), 1);

        pump(&mut listing, Message::KeyPress(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)));
        assert_eq!(listing.zone(), Zone::Filter(0));
        pump(&mut listing, press(KeyCode::Tab));
        pump(&mut listing, press(KeyCode::Tab));
        assert_eq!(listing.zone(), Zone::Search);
    }

    #[test]
    fn dropdown_choice_filters_at_once() {
        let mut listing = memory_listing(staff(6));
        listing.mount();
        listing.set_zone(Zone::Filter(0));
        pump(&mut listing, press(KeyCode::Enter));
        assert!(listing.overlay_open());
        pump(&mut listing, press(KeyCode::Down));
        pump(&mut listing, press(KeyCode::Down));
        pump(&mut listing, press(KeyCode::Enter));
        assert!(!listing.overlay_open());
        assert_eq!(listing.state().filter("department"), Some("Sales"));
        assert_eq!(listing.items().len(), 3);
    }

    #[test]
    fn renders_rows_and_caption() {
        let mut listing = memory_listing(staff(25));
        listing.mount();
        listing.set_page(2);
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| listing.view(frame, frame.area()))
            .unwrap();
        let out = buffer_to_string(terminal.backend().buffer());
        assert!(out.contains("Search employees"));
        assert!(out.contains("Department: All"));
        assert!(out.contains("Employee 11"));
        assert!(!out.contains("Employee 10"));
        assert!(out.contains("Showing 11–20 of 25"));
        assert!(out.contains("[2]"));
    }

    // Remote listings

    #[derive(Default)]
    struct Scripted {
        requests: Mutex<Vec<PageRequest>>,
        total_pages: AtomicUsize,
        fail: std::sync::atomic::AtomicBool,
    }

    impl Scripted {
        fn new(total_pages: usize) -> Arc<Self> {
            let scripted = Self::default();
            scripted.total_pages.store(total_pages, Ordering::SeqCst);
            Arc::new(scripted)
        }
    }

    /// Echoes the search term back as the only item.
    impl PageFetcher<String> for Scripted {
        fn fetch(&self, request: PageRequest) -> BoxFuture<'static, Result<Page<String>, ListError>> {
            self.requests.lock().unwrap().push(request.clone());
            let total_pages = self.total_pages.load(Ordering::SeqCst);
            let fail = self.fail.load(Ordering::SeqCst);
            Box::pin(async move {
                if fail {
                    return Err(ListError::Status {
                        status: 503,
                        message: "maintenance".into(),
                    });
                }
                let search = request
                    .query
                    .iter()
                    .find(|(k, _)| k == "search")
                    .map_or_else(|| "all".to_owned(), |(_, v)| v.clone());
                Ok(Page {
                    items: vec![search],
                    total_items: total_pages * request.page_size,
                    page: request.page,
                    page_size: request.page_size,
                    total_pages,
                })
            })
        }
    }

    fn remote_listing(fetcher: &Arc<Scripted>) -> Listing<String> {
        let fetcher: Arc<dyn PageFetcher<String>> = fetcher.clone();
        Listing::new(
            "Attendance",
            RemoteSource::new(fetcher, "attendance"),
            vec![Column::text("Record", |s: &String| s.clone())],
            &config(),
        )
    }

    async fn resolve(cmd: Command<Message<String>>) -> Message<String> {
        match cmd.into_future() {
            Some(fut) => fut.await,
            None => panic!("expected a fetch"),
        }
    }

    #[tokio::test]
    async fn remote_mount_fetches_and_shows_loading() {
        let fetcher = Scripted::new(1);
        let mut listing = remote_listing(&fetcher);
        let cmd = listing.mount();
        assert!(cmd.is_async());
        assert_eq!(listing.body_state(), BodyState::Loading);
        assert_eq!(listing.subscriptions().len(), 1);

        let msg = resolve(cmd).await;
        assert!(pump(&mut listing, msg).is_none());
        assert_eq!(listing.items(), ["all".to_owned()]);
        assert!(!listing.is_loading());
        let requests = fetcher.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].endpoint, "attendance");
    }

    #[tokio::test]
    async fn last_request_wins() {
        let fetcher = Scripted::new(1);
        let mut listing = remote_listing(&fetcher);
        let first = listing.mount();
        let second = listing.set_search("omar");

        let late = resolve(first).await;
        let latest = resolve(second).await;
        pump(&mut listing, latest);
        assert_eq!(listing.items(), ["omar".to_owned()]);

        pump(&mut listing, late);
        assert_eq!(listing.items(), ["omar".to_owned()]);
        assert!(!listing.is_loading());
    }

    #[tokio::test]
    async fn stale_response_while_newer_in_flight_keeps_loading() {
        let fetcher = Scripted::new(1);
        let mut listing = remote_listing(&fetcher);
        let first = listing.mount();
        let _second = listing.set_search("sara");

        pump(&mut listing, resolve(first).await);
        assert!(listing.is_loading());
        assert!(listing.items().is_empty());
    }

    #[tokio::test]
    async fn response_after_remount_is_discarded() {
        let fetcher = Scripted::new(1);
        let mut old = remote_listing(&fetcher);
        let orphan = old.mount();
        old.unmount();
        drop(old);

        let mut fresh = remote_listing(&fetcher);
        let current = fresh.mount();
        pump(&mut fresh, resolve(orphan).await);
        assert!(fresh.is_loading());
        assert!(fresh.items().is_empty());

        pump(&mut fresh, resolve(current).await);
        assert_eq!(fresh.items(), ["all".to_owned()]);
    }

    #[tokio::test]
    async fn response_after_unmount_is_ignored() {
        let fetcher = Scripted::new(1);
        let mut listing = remote_listing(&fetcher);
        let cmd = listing.mount();
        listing.unmount();
        pump(&mut listing, resolve(cmd).await);
        assert!(listing.items().is_empty());
    }

    #[tokio::test]
    async fn failure_clears_rows_and_refetch_recovers() {
        let fetcher = Scripted::new(1);
        let mut listing = remote_listing(&fetcher);
        let cmd = listing.mount();
        pump(&mut listing, resolve(cmd).await);
        assert_eq!(listing.items().len(), 1);

        fetcher.fail.store(true, Ordering::SeqCst);
        let cmd = listing.refetch();
        pump(&mut listing, resolve(cmd).await);
        assert!(listing.items().is_empty());
        assert_eq!(listing.body_state(), BodyState::Empty);
        assert!(listing.error().is_some_and(ListError::is_retryable));

        fetcher.fail.store(false, Ordering::SeqCst);
        let retry = pump(
            &mut listing,
            Message::KeyPress(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
        );
        let msg = resolve(retry.unwrap_or_else(|| panic!("ctrl+r should refetch"))).await;
        pump(&mut listing, msg);
        assert!(listing.error().is_none());
        assert_eq!(listing.items().len(), 1);
    }

    #[tokio::test]
    async fn shrinking_remote_data_refetches_clamped_page() {
        let fetcher = Scripted::new(5);
        let mut listing = remote_listing(&fetcher);
        let cmd = listing.mount();
        pump(&mut listing, resolve(cmd).await);
        assert_eq!(listing.state().total_pages(), 5);

        fetcher.total_pages.store(2, Ordering::SeqCst);
        let cmd = listing.set_page(4);
        let follow_up = pump(&mut listing, resolve(cmd).await);
        assert_eq!(listing.state().page(), 2);
        let follow_up = follow_up.unwrap_or_else(|| panic!("clamped page should be fetched"));
        pump(&mut listing, resolve(follow_up).await);

        let requests = fetcher.requests.lock().unwrap();
        let pages: Vec<_> = requests.iter().map(|r| r.page).collect();
        assert_eq!(pages, [1, 4, 2]);
    }

    #[tokio::test]
    async fn failure_after_paging_resets_the_strip() {
        let fetcher = Scripted::new(12);
        let mut listing = remote_listing(&fetcher);
        let cmd = listing.mount();
        pump(&mut listing, resolve(cmd).await);
        let cmd = listing.set_page(5);
        pump(&mut listing, resolve(cmd).await);
        assert_eq!(listing.pagination().page(), 5);

        fetcher.fail.store(true, Ordering::SeqCst);
        let cmd = listing.refetch();
        pump(&mut listing, resolve(cmd).await);
        assert_eq!(listing.state().total_items(), 0);
        assert_eq!(listing.state().total_pages(), 1);
        assert_eq!(listing.pagination().total_pages(), 1);
        assert!(pump(&mut listing, Message::Pages(pagination::Message::Next)).is_none());

        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|frame| listing.view(frame, frame.area()))
            .unwrap();
        let out = buffer_to_string(terminal.backend().buffer());
        assert!(out.contains("‹ Prev  [1]  Next ›"));
        assert!(out.contains("Showing 0 of 0"));
        assert!(!out.contains("[5]"));
    }

    #[tokio::test]
    async fn remount_forgets_totals_and_fetches_current_page() {
        let fetcher = Scripted::new(12);
        let mut listing = remote_listing(&fetcher);
        let cmd = listing.mount();
        pump(&mut listing, resolve(cmd).await);
        let cmd = listing.set_page(5);
        pump(&mut listing, resolve(cmd).await);
        listing.unmount();

        fetcher.total_pages.store(3, Ordering::SeqCst);
        let cmd = listing.mount();
        assert_eq!(listing.state().total_pages(), 1);
        assert_eq!(listing.state().total_items(), 0);
        assert_eq!(listing.pagination().total_pages(), 1);

        let follow_up = pump(&mut listing, resolve(cmd).await);
        assert_eq!(listing.state().page(), 3);
        let follow_up = follow_up.unwrap_or_else(|| panic!("clamped page should be fetched"));
        pump(&mut listing, resolve(follow_up).await);
        assert_eq!(listing.state().total_pages(), 3);

        let requests = fetcher.requests.lock().unwrap();
        let pages: Vec<_> = requests.iter().map(|r| r.page).collect();
        assert_eq!(pages, [1, 5, 5, 3]);
    }

    #[tokio::test]
    async fn remote_query_carries_filters() {
        let fetcher = Scripted::new(1);
        let mut listing = remote_listing(&fetcher);
        let _ = listing.mount();
        let _ = listing.set_filter("status", Some("Absent"));
        let requests = fetcher.requests.lock().unwrap();
        let last = requests.last().unwrap();
        assert!(last.query.contains(&("status".to_owned(), "Absent".to_owned())));
        assert!(last.query.contains(&("page".to_owned(), "1".to_owned())));
    }
}
