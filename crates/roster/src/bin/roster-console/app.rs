//! The console model: a tab strip over one mounted listing.
//!
//! Only the active tab's listing exists. Switching tabs unmounts it and
//! mounts a fresh listing for the new tab, so remote tabs re-query and any
//! response still in flight for the old tab is dropped.

use crate::records::{ActivityEntry, AttendanceRecord, Employee, PayrollRecord};
use crate::tabs::{self, Tab};
use crate::seed;
use roster::crossterm::event::{KeyCode, KeyEvent};
use roster::listing::{ConsoleSettings, ListingConfig, PageFetcher};
use roster::ratatui::layout::{Constraint, Layout, Rect};
use roster::ratatui::style::{Color, Modifier, Style};
use roster::ratatui::widgets::{Paragraph, Tabs};
use roster::ratatui::Frame;
use roster::widgets::key::{hint_line, Binding, KeyCombination, KeyMap};
use roster::widgets::listing::{self, Listing};
use roster::widgets::Zone;
use roster::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use std::sync::Arc;

pub struct Flags {
    pub settings: ConsoleSettings,
    pub attendance: Arc<dyn PageFetcher<AttendanceRecord>>,
    pub payroll: Arc<dyn PageFetcher<PayrollRecord>>,
}

#[derive(Debug)]
pub enum Msg {
    Employees(listing::Message<Employee>),
    Activity(listing::Message<ActivityEntry>),
    Attendance(listing::Message<AttendanceRecord>),
    Payroll(listing::Message<PayrollRecord>),
    Key(KeyEvent),
    Paste(String),
}

pub struct ConsoleKeys {
    pub tabs: Binding,
    pub next_tab: Binding,
    pub previous_tab: Binding,
    pub quit: Binding,
}

impl Default for ConsoleKeys {
    fn default() -> Self {
        Self {
            tabs: Binding::new(
                (1..=4).map(|n| KeyCombination::new(KeyCode::F(n))).collect(),
                "F1-F4",
                "tabs",
            ),
            next_tab: Binding::new(vec![KeyCombination::ctrl(KeyCode::Right)], "ctrl+→", "next tab"),
            previous_tab: Binding::new(
                vec![KeyCombination::ctrl(KeyCode::Left)],
                "ctrl+←",
                "previous tab",
            ),
            quit: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Esc),
                    KeyCombination::ctrl(KeyCode::Char('c')),
                ],
                "esc",
                "quit",
            ),
        }
    }
}

impl KeyMap for ConsoleKeys {
    fn bindings(&self) -> Vec<&Binding> {
        vec![&self.tabs, &self.next_tab, &self.quit]
    }
}

/// What a fresh listing for each tab is built from.
struct Sources {
    listing: ListingConfig,
    staff: Vec<Employee>,
    activity: Vec<ActivityEntry>,
    attendance: Arc<dyn PageFetcher<AttendanceRecord>>,
    payroll: Arc<dyn PageFetcher<PayrollRecord>>,
}

impl Sources {
    fn open(&self, tab: Tab) -> (Screen, Command<Msg>) {
        match tab {
            Tab::Employees => {
                let mut listing = tabs::employees(self.staff.clone(), &self.listing);
                let cmd = listing.mount().map(Msg::Employees);
                (Screen::Employees(listing), cmd)
            }
            Tab::Activity => {
                let mut listing = tabs::activity(self.activity.clone(), &self.listing);
                let cmd = listing.mount().map(Msg::Activity);
                (Screen::Activity(listing), cmd)
            }
            Tab::Attendance => {
                let mut listing = tabs::attendance(self.attendance.clone(), &self.listing);
                let cmd = listing.mount().map(Msg::Attendance);
                (Screen::Attendance(listing), cmd)
            }
            Tab::Payroll => {
                let mut listing = tabs::payroll(self.payroll.clone(), &self.listing);
                let cmd = listing.mount().map(Msg::Payroll);
                (Screen::Payroll(listing), cmd)
            }
        }
    }
}

/// The mounted listing.
enum Screen {
    Employees(Listing<Employee>),
    Activity(Listing<ActivityEntry>),
    Attendance(Listing<AttendanceRecord>),
    Payroll(Listing<PayrollRecord>),
}

impl Screen {
    fn tab(&self) -> Tab {
        match self {
            Screen::Employees(_) => Tab::Employees,
            Screen::Activity(_) => Tab::Activity,
            Screen::Attendance(_) => Tab::Attendance,
            Screen::Payroll(_) => Tab::Payroll,
        }
    }

    fn zone(&self) -> Zone {
        match self {
            Screen::Employees(l) => l.zone(),
            Screen::Activity(l) => l.zone(),
            Screen::Attendance(l) => l.zone(),
            Screen::Payroll(l) => l.zone(),
        }
    }

    fn overlay_open(&self) -> bool {
        match self {
            Screen::Employees(l) => l.overlay_open(),
            Screen::Activity(l) => l.overlay_open(),
            Screen::Attendance(l) => l.overlay_open(),
            Screen::Payroll(l) => l.overlay_open(),
        }
    }

    fn unmount(&mut self) {
        match self {
            Screen::Employees(l) => l.unmount(),
            Screen::Activity(l) => l.unmount(),
            Screen::Attendance(l) => l.unmount(),
            Screen::Payroll(l) => l.unmount(),
        }
    }

    fn key(&mut self, key: KeyEvent) -> Command<Msg> {
        match self {
            Screen::Employees(l) => l.update(listing::Message::KeyPress(key)).map(Msg::Employees),
            Screen::Activity(l) => l.update(listing::Message::KeyPress(key)).map(Msg::Activity),
            Screen::Attendance(l) => l.update(listing::Message::KeyPress(key)).map(Msg::Attendance),
            Screen::Payroll(l) => l.update(listing::Message::KeyPress(key)).map(Msg::Payroll),
        }
    }

    fn paste(&mut self, text: String) -> Command<Msg> {
        match self {
            Screen::Employees(l) => l.update(listing::Message::Paste(text)).map(Msg::Employees),
            Screen::Activity(l) => l.update(listing::Message::Paste(text)).map(Msg::Activity),
            Screen::Attendance(l) => l.update(listing::Message::Paste(text)).map(Msg::Attendance),
            Screen::Payroll(l) => l.update(listing::Message::Paste(text)).map(Msg::Payroll),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        match self {
            Screen::Employees(l) => l.view(frame, area),
            Screen::Activity(l) => l.view(frame, area),
            Screen::Attendance(l) => l.view(frame, area),
            Screen::Payroll(l) => l.view(frame, area),
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        fn lift<T: Send + 'static>(
            subs: Vec<Subscription<listing::Message<T>>>,
            wrap: fn(listing::Message<T>) -> Msg,
        ) -> Vec<Subscription<Msg>> {
            subs.into_iter().map(|sub| sub.map(wrap)).collect()
        }
        match self {
            Screen::Employees(l) => lift(l.subscriptions(), Msg::Employees),
            Screen::Activity(l) => lift(l.subscriptions(), Msg::Activity),
            Screen::Attendance(l) => lift(l.subscriptions(), Msg::Attendance),
            Screen::Payroll(l) => lift(l.subscriptions(), Msg::Payroll),
        }
    }
}

pub struct Console {
    sources: Sources,
    screen: Screen,
    keys: ConsoleKeys,
}

impl Console {
    pub fn tab(&self) -> Tab {
        self.screen.tab()
    }

    fn switch(&mut self, tab: Tab) -> Command<Msg> {
        if tab == self.screen.tab() {
            return Command::none();
        }
        self.screen.unmount();
        let (screen, cmd) = self.sources.open(tab);
        self.screen = screen;
        tracing::info!(tab = tab.title(), "switched tab");
        Command::batch([cmd, Command::set_title(format!("Roster · {}", tab.title()))])
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Msg> {
        if self.keys.quit.matches(&key) && (key.code != KeyCode::Esc || self.esc_quits()) {
            return Command::quit();
        }
        if self.keys.tabs.matches(&key) {
            if let KeyCode::F(n) = key.code {
                return self.switch(Tab::ALL[usize::from(n - 1)]);
            }
        }
        if self.keys.next_tab.matches(&key) {
            return self.switch(self.screen.tab().next());
        }
        if self.keys.previous_tab.matches(&key) {
            return self.switch(self.screen.tab().previous());
        }
        self.screen.key(key)
    }

    /// Esc belongs to the listing until focus is on the table with no
    /// dropdown open.
    fn esc_quits(&self) -> bool {
        self.screen.zone() == Zone::Table && !self.screen.overlay_open()
    }

    /// Hand a listing message to the mounted listing. Messages for any
    /// other tab belong to a listing that has since been unmounted.
    fn route(&mut self, msg: Msg) -> Command<Msg> {
        match (msg, &mut self.screen) {
            (Msg::Employees(m), Screen::Employees(l)) => l.update(m).map(Msg::Employees),
            (Msg::Activity(m), Screen::Activity(l)) => l.update(m).map(Msg::Activity),
            (Msg::Attendance(m), Screen::Attendance(l)) => l.update(m).map(Msg::Attendance),
            (Msg::Payroll(m), Screen::Payroll(l)) => l.update(m).map(Msg::Payroll),
            (msg, screen) => {
                tracing::debug!(active = screen.tab().title(), ?msg, "message for closed tab dropped");
                Command::none()
            }
        }
    }
}

impl Model for Console {
    type Message = Msg;
    type Flags = Flags;

    fn init(flags: Flags) -> (Self, Command<Msg>) {
        let sources = Sources {
            listing: flags.settings.listing,
            staff: seed::employees(),
            activity: seed::activity(),
            attendance: flags.attendance,
            payroll: flags.payroll,
        };
        let (screen, cmd) = sources.open(Tab::Employees);
        let console = Console {
            sources,
            screen,
            keys: ConsoleKeys::default(),
        };
        (
            console,
            Command::batch([cmd, Command::set_title("Roster · Employees")]),
        )
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Key(key) => self.handle_key(key),
            Msg::Paste(text) => self.screen.paste(text),
            listing => self.route(listing),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [tab_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let titles = Tab::ALL
            .iter()
            .map(|tab| format!(" F{} {} ", tab.index() + 1, tab.title()));
        let tabs = Tabs::new(titles)
            .select(self.screen.tab().index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .divider("│");
        frame.render_widget(tabs, tab_area);

        self.screen.view(frame, body_area);
        frame.render_widget(Paragraph::new(hint_line(self.keys.bindings())), status_area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(|event| match event {
            TerminalEvent::Key(key) => Some(Msg::Key(key)),
            TerminalEvent::Paste(text) => Some(Msg::Paste(text)),
            TerminalEvent::Resize(..) => None,
        })];
        subs.extend(self.screen.subscriptions());
        subs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use roster::crossterm::event::KeyModifiers;
    use roster::listing::{ListError, Page, PageRequest};
    use roster::testing::TestProgram;
    use roster::widgets::BodyState;
    use std::sync::Mutex;

    /// Serves the same rows for every request and remembers the queries.
    struct Canned<T> {
        rows: Vec<T>,
        requests: Mutex<Vec<PageRequest>>,
    }

    impl<T> Canned<T> {
        fn new(rows: Vec<T>) -> Arc<Self> {
            Arc::new(Self {
                rows,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    impl<T: Clone + Send + Sync + 'static> PageFetcher<T> for Canned<T> {
        fn fetch(&self, request: PageRequest) -> BoxFuture<'static, Result<Page<T>, ListError>> {
            self.requests.lock().unwrap().push(request.clone());
            let rows = self.rows.clone();
            Box::pin(async move {
                Ok(Page {
                    total_items: rows.len(),
                    items: rows,
                    page: request.page,
                    page_size: request.page_size,
                    total_pages: 1,
                })
            })
        }
    }

    fn present(name: &str) -> AttendanceRecord {
        AttendanceRecord {
            employee: name.into(),
            date: "2026-03-02".into(),
            status: "Present".into(),
            check_in: Some("08:58".into()),
            check_out: None,
        }
    }

    struct Harness {
        program: TestProgram<Console>,
        attendance: Arc<Canned<AttendanceRecord>>,
    }

    fn console() -> Harness {
        let attendance = Canned::new(vec![present("Ali Hassan"), present("Sara Lee")]);
        let payroll: Arc<Canned<PayrollRecord>> = Canned::new(vec![PayrollRecord {
            employee: "Omar Farouk".into(),
            period: "2026-02".into(),
            gross: 5200.0,
            net: 4180.75,
            status: "Paid".into(),
        }]);
        let program = TestProgram::<Console>::new(Flags {
            settings: ConsoleSettings::default(),
            attendance: attendance.clone(),
            payroll,
        });
        Harness {
            program,
            attendance,
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Msg {
        Msg::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn starts_on_employees() {
        let mut h = console();
        h.program.drain_messages();
        assert_eq!(h.program.model().tab(), Tab::Employees);
        assert_eq!(h.program.pending_futures(), 0);
        let screen = h.program.render_string(120, 30);
        assert!(screen.contains("F1 Employees"));
        assert!(screen.contains("Ali Hassan"));
        assert!(screen.contains("Showing 1–10 of 91"));
    }

    #[tokio::test]
    async fn remote_tab_fetches_on_mount() {
        let mut h = console();
        h.program.send(key(KeyCode::F(3), KeyModifiers::NONE));
        assert_eq!(h.program.model().tab(), Tab::Attendance);
        assert_eq!(h.program.pending_futures(), 1);
        assert!(h.program.render_string(120, 30).contains("Loading"));

        h.program.settle().await;
        let screen = h.program.render_string(120, 30);
        assert!(screen.contains("Sara Lee"));
        assert!(screen.contains("08:58"));
        assert_eq!(h.attendance.requests.lock().unwrap()[0].endpoint, "attendance");
    }

    #[tokio::test]
    async fn response_for_closed_tab_is_dropped() {
        let mut h = console();
        h.program.send(key(KeyCode::F(3), KeyModifiers::NONE));
        let in_flight = h.program.take_futures();
        h.program.send(key(KeyCode::F(1), KeyModifiers::NONE));
        for fut in in_flight {
            let msg = fut.await;
            h.program.send(msg);
        }
        assert_eq!(h.program.model().tab(), Tab::Employees);
        assert!(h.program.render_string(120, 30).contains("Ali Hassan"));
    }

    #[tokio::test]
    async fn returning_to_a_remote_tab_requeries() {
        let mut h = console();
        h.program.send(key(KeyCode::F(3), KeyModifiers::NONE));
        h.program.settle().await;
        h.program.send(key(KeyCode::Right, KeyModifiers::CONTROL));
        assert_eq!(h.program.model().tab(), Tab::Payroll);
        h.program.settle().await;
        assert!(h.program.render_string(120, 30).contains("Net (page 4,180.75)"));

        h.program.send(key(KeyCode::Left, KeyModifiers::CONTROL));
        assert_eq!(h.program.model().tab(), Tab::Attendance);
        h.program.settle().await;
        assert_eq!(h.attendance.requests.lock().unwrap().len(), 2);
    }

    #[test]
    fn escape_closes_dropdown_then_leaves_filter_before_quitting() {
        let mut h = console();
        h.program.send(key(KeyCode::Tab, KeyModifiers::NONE));
        h.program.send(key(KeyCode::Enter, KeyModifiers::NONE));
        h.program.drain_messages();
        h.program.send(key(KeyCode::Esc, KeyModifiers::NONE));
        h.program.drain_messages();
        assert!(!h.program.quit_requested());

        h.program.send(key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(!h.program.quit_requested());
        assert_eq!(h.program.model().screen.zone(), Zone::Table);

        h.program.send(key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(h.program.quit_requested());
    }

    #[test]
    fn escape_while_typing_a_search_does_not_quit() {
        let mut h = console();
        for c in "sara".chars() {
            h.program.send(key(KeyCode::Char(c), KeyModifiers::NONE));
        }
        h.program.send(key(KeyCode::Esc, KeyModifiers::NONE));
        h.program.drain_messages();
        assert!(!h.program.quit_requested());
        assert_eq!(h.program.model().screen.zone(), Zone::Table);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut h = console();
        h.program.send(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(h.program.quit_requested());
    }

    #[test]
    fn employees_department_filter() {
        let mut h = console();
        h.program.send(Msg::Employees(listing::Message::SetFilter {
            key: "department".into(),
            value: Some("Finance".into()),
        }));
        h.program.drain_messages();
        let Screen::Employees(employees) = &h.program.model().screen else {
            panic!("expected the employees tab");
        };
        assert_eq!(employees.body_state(), BodyState::Populated);
        assert!(employees.items().iter().all(|e| e.department == "Finance"));
        assert_eq!(employees.state().page(), 1);
    }
}
