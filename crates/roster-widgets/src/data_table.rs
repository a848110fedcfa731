//! Column-driven table body with loading, empty and populated states.

use crate::chrome::{self, focus_block};
use crate::key::{Binding, KeyCombination, KeyMap};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;
use roster_core::{owner_key, subscribe, Command, Component, Every, Subscription};
use roster_listing::ListError;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

type HeaderFn<T> = Box<dyn Fn(&[T]) -> String + Send + Sync>;
type CellFn<T> = Box<dyn Fn(&T) -> Span<'static> + Send + Sync>;

/// Column heading: fixed text, or computed from the rows on screen.
pub enum Header<T> {
    Text(String),
    Render(HeaderFn<T>),
}

impl<T> Header<T> {
    fn resolve(&self, items: &[T]) -> String {
        match self {
            Header::Text(text) => text.clone(),
            Header::Render(render) => render(items),
        }
    }
}

/// How one column is titled, drawn and sized.
pub struct Column<T> {
    header: Header<T>,
    cell: CellFn<T>,
    width: Option<Constraint>,
}

impl<T> Column<T> {
    /// A column whose cells are styled spans.
    pub fn new(
        header: impl Into<String>,
        cell: impl Fn(&T) -> Span<'static> + Send + Sync + 'static,
    ) -> Self {
        Self {
            header: Header::Text(header.into()),
            cell: Box::new(cell),
            width: None,
        }
    }

    /// A column whose cells are plain text.
    pub fn text(
        header: impl Into<String>,
        cell: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::new(header, move |item| Span::raw(cell(item)))
    }

    /// Compute the heading from the rows currently shown.
    pub fn with_header_fn(mut self, render: impl Fn(&[T]) -> String + Send + Sync + 'static) -> Self {
        self.header = Header::Render(Box::new(render));
        self
    }

    /// Fix the width instead of sizing to content.
    pub fn with_width(mut self, width: Constraint) -> Self {
        self.width = Some(width);
        self
    }
}

/// What the table body shows, checked in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    Loading,
    Empty,
    Populated,
}

#[derive(Debug, Clone)]
pub enum Message {
    KeyPress(KeyEvent),
    SpinnerTick,
}

pub struct TableKeys {
    pub scroll_up: Binding,
    pub scroll_down: Binding,
}

impl Default for TableKeys {
    fn default() -> Self {
        Self {
            scroll_up: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Up),
                    KeyCombination::new(KeyCode::Char('k')),
                ],
                "↑/k",
                "scroll",
            ),
            scroll_down: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Down),
                    KeyCombination::new(KeyCode::Char('j')),
                ],
                "↓/j",
                "scroll",
            ),
        }
    }
}

impl KeyMap for TableKeys {
    fn bindings(&self) -> Vec<&Binding> {
        vec![&self.scroll_up, &self.scroll_down]
    }
}

#[derive(Debug, Clone)]
pub struct DataTableStyle {
    pub header: Style,
    pub empty: Style,
    pub error: Style,
    pub loading: Style,
}

impl Default for DataTableStyle {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            empty: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            loading: Style::default().fg(Color::Cyan),
        }
    }
}

/// Renders one row per item and one column per [`Column`].
///
/// The table does not own data: the listing hands it each page with
/// [`set_items`](DataTable::set_items) and flips
/// [`set_loading`](DataTable::set_loading) around fetches. Headers are drawn
/// in every state.
///
/// ```rust,ignore
/// let table = DataTable::new(vec![
///     Column::text("Name", |e: &Employee| e.name.clone()),
///     Column::text("Department", |e: &Employee| e.department.clone())
///         .with_width(Constraint::Length(14)),
/// ])
/// .with_empty_text("No employees match");
/// ```
pub struct DataTable<T> {
    columns: Vec<Column<T>>,
    items: Vec<T>,
    loading: bool,
    error: Option<ListError>,
    title: String,
    empty_text: String,
    offset: usize,
    tick: usize,
    owner: u64,
    focus: bool,
    style: DataTableStyle,
    keys: TableKeys,
}

impl<T> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            items: Vec::new(),
            loading: false,
            error: None,
            title: String::new(),
            empty_text: "No records found".into(),
            offset: 0,
            tick: 0,
            owner: owner_key(),
            focus: false,
            style: DataTableStyle::default(),
            keys: TableKeys::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    pub fn with_style(mut self, style: DataTableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn keys(&self) -> &TableKeys {
        &self.keys
    }

    /// Show a new page of rows and clear any error.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.error = None;
        self.offset = 0;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
        if !loading {
            self.tick = 0;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Drop the rows and show `error` in their place.
    pub fn set_error(&mut self, error: ListError) {
        self.items.clear();
        self.offset = 0;
        self.error = Some(error);
    }

    pub fn error(&self) -> Option<&ListError> {
        self.error.as_ref()
    }

    pub fn body_state(&self) -> BodyState {
        if self.loading {
            BodyState::Loading
        } else if self.items.is_empty() {
            BodyState::Empty
        } else {
            BodyState::Populated
        }
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// Width of each column: the given constraint, or the widest of the
    /// header and the cells on this page.
    fn widths(&self, headers: &[String]) -> Vec<Constraint> {
        self.columns
            .iter()
            .zip(headers)
            .map(|(column, header)| {
                column.width.unwrap_or_else(|| {
                    let widest = self
                        .items
                        .iter()
                        .map(|item| (column.cell)(item).content.width())
                        .chain(std::iter::once(header.width()))
                        .max()
                        .unwrap_or(0);
                    Constraint::Length(u16::try_from(widest).unwrap_or(u16::MAX))
                })
            })
            .collect()
    }

    fn placeholder(&self) -> Line<'static> {
        match self.body_state() {
            BodyState::Loading => Line::from(vec![
                Span::styled(chrome::spinner_frame(self.tick), self.style.loading),
                Span::styled(" Loading…", self.style.loading),
            ]),
            BodyState::Empty => match &self.error {
                Some(err) => {
                    let mut text = err.user_message().to_owned();
                    if err.is_retryable() {
                        text.push_str(" Press Ctrl+R to retry.");
                    }
                    Line::styled(text, self.style.error)
                }
                None => Line::styled(self.empty_text.clone(), self.style.empty),
            },
            BodyState::Populated => Line::default(),
        }
    }
}

impl<T: Send + 'static> Component for DataTable<T> {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::SpinnerTick => {
                if self.loading {
                    self.tick = self.tick.wrapping_add(1);
                }
            }
            Message::KeyPress(key) if self.focus => {
                if self.keys.scroll_up.matches(&key) {
                    self.offset = self.offset.saturating_sub(1);
                } else if self.keys.scroll_down.matches(&key) {
                    self.offset = (self.offset + 1).min(self.items.len().saturating_sub(1));
                }
            }
            Message::KeyPress(_) => {}
        }
        Command::none()
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let block = focus_block(&self.title, self.focus);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let headers: Vec<String> = self
            .columns
            .iter()
            .map(|column| column.header.resolve(&self.items))
            .collect();
        let header = Row::new(
            headers
                .iter()
                .map(|h| Cell::from(h.clone()).style(self.style.header)),
        )
        .bottom_margin(1);

        let body_state = self.body_state();
        let rows: Vec<Row> = if body_state == BodyState::Populated {
            self.items
                .iter()
                .enumerate()
                .map(|(index, item)| {
                    Row::new(self.columns.iter().map(|column| Cell::from((column.cell)(item))))
                        .style(chrome::stripe(index))
                })
                .collect()
        } else {
            Vec::new()
        };

        let table = Table::new(rows, self.widths(&headers))
            .header(header)
            .column_spacing(2);
        let mut state = TableState::default().with_offset(self.offset);
        frame.render_stateful_widget(table, inner, &mut state);

        if body_state != BodyState::Populated && inner.height > 2 {
            let message_area = Rect {
                y: inner.y + 2,
                height: 1,
                ..inner
            };
            frame.render_widget(Paragraph::new(self.placeholder()), message_area);
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.loading {
            let spinner = Every::new(SPINNER_INTERVAL, "data-table-spinner").owned_by(self.owner);
            vec![subscribe(spinner).map(|_| Message::SpinnerTick)]
        } else {
            vec![]
        }
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use roster_core::testing::buffer_to_string;

    #[derive(Clone)]
    struct Person {
        name: &'static str,
        team: &'static str,
    }

    fn table() -> DataTable<Person> {
        DataTable::new(vec![
            Column::text("Name", |p: &Person| p.name.to_owned()),
            Column::text("Team", |p: &Person| p.team.to_owned())
                .with_header_fn(|rows: &[Person]| format!("Team ({})", rows.len())),
        ])
        .with_title("People")
    }

    fn render(table: &DataTable<Person>, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| table.view(frame, frame.area())).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    #[test]
    fn hints_cover_both_scroll_directions() {
        let hints: String = TableKeys::default()
            .hints()
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(hints.contains("↑/k"));
        assert!(hints.contains("↓/j"));
    }

    #[test]
    fn loading_wins_over_empty_and_populated() {
        let mut t = table();
        assert_eq!(t.body_state(), BodyState::Empty);
        t.set_items(vec![Person { name: "Ali", team: "Ops" }]);
        assert_eq!(t.body_state(), BodyState::Populated);
        t.set_loading(true);
        assert_eq!(t.body_state(), BodyState::Loading);
    }

    #[test]
    fn populated_renders_headers_and_rows() {
        let mut t = table();
        t.set_items(vec![
            Person { name: "Ali Hassan", team: "Finance" },
            Person { name: "Sara Lee", team: "Sales" },
        ]);
        let out = render(&t, 50, 8);
        assert!(out.contains("Name"));
        assert!(out.contains("Team (2)"));
        assert!(out.contains("Ali Hassan"));
        assert!(out.contains("Sara Lee"));
        assert!(!out.contains("No records found"));
    }

    #[test]
    fn empty_state_keeps_headers() {
        let t = table();
        let out = render(&t, 40, 6);
        assert!(out.contains("Name"));
        assert!(out.contains("No records found"));
        assert!(!out.contains("Loading"));
    }

    #[test]
    fn loading_shows_spinner_not_empty_text() {
        let mut t = table();
        t.set_loading(true);
        let out = render(&t, 40, 6);
        assert!(out.contains("Loading"));
        assert!(!out.contains("No records found"));
    }

    #[test]
    fn error_replaces_rows_with_message() {
        let mut t = table();
        t.set_items(vec![Person { name: "Stale", team: "Row" }]);
        t.set_error(ListError::Transport("refused".into()));
        assert_eq!(t.body_state(), BodyState::Empty);
        let out = render(&t, 90, 6);
        assert!(!out.contains("Stale"));
        assert!(out.contains("Could not reach the server"));
        assert!(out.contains("Ctrl+R"));
    }

    #[test]
    fn spinner_subscription_only_while_loading() {
        let mut t = table();
        assert!(t.subscriptions().is_empty());
        t.set_loading(true);
        assert_eq!(t.subscriptions().len(), 1);
        t.update(Message::SpinnerTick);
        assert_eq!(t.tick, 1);
        t.set_loading(false);
        assert!(t.subscriptions().is_empty());
    }

    #[test]
    fn each_table_owns_its_spinner() {
        let mut a = table();
        let mut b = table();
        a.set_loading(true);
        b.set_loading(true);
        assert_ne!(a.subscriptions()[0].id(), b.subscriptions()[0].id());
    }

    #[test]
    fn auto_width_fits_widest_cell() {
        let mut t = table();
        t.set_items(vec![Person { name: "Bartholomew", team: "QA" }]);
        let widths = t.widths(&["Name".to_owned(), "Team (1)".to_owned()]);
        assert_eq!(widths, vec![Constraint::Length(11), Constraint::Length(8)]);
    }
}
