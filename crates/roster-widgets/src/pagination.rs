//! Page-number strip with prev/next, ellipsis collapsing and a page-size
//! selector.
//!
//! The strip never changes pages by itself. It asks its parent with
//! [`Message::PageRequested`] / [`Message::PageSizeRequested`], the parent
//! applies the request to its list state and pushes the result back with
//! [`Pagination::sync`].

use crate::key::{Binding, KeyCombination, KeyMap};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use roster_core::{Command, Component};
use roster_listing::pagination::{clamp_page, page_window, PageSlot};
use roster_listing::ListState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    Previous,
    Next,
    First,
    Last,
    Goto(usize),
    CyclePageSize,
    /// Outbound: the user wants page `n`.
    PageRequested(usize),
    /// Outbound: the user wants `n` rows per page.
    PageSizeRequested(usize),
}

pub struct PaginationKeys {
    pub previous: Binding,
    pub next: Binding,
    pub first: Binding,
    pub last: Binding,
    /// Jump straight to pages 1 through 9.
    pub goto: Binding,
    pub page_size: Binding,
}

impl Default for PaginationKeys {
    fn default() -> Self {
        Self {
            previous: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Left),
                    KeyCombination::new(KeyCode::Char('h')),
                    KeyCombination::new(KeyCode::PageUp),
                ],
                "←/h",
                "prev",
            ),
            next: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Right),
                    KeyCombination::new(KeyCode::Char('l')),
                    KeyCombination::new(KeyCode::PageDown),
                ],
                "→/l",
                "next",
            ),
            first: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::Home),
                    KeyCombination::new(KeyCode::Char('g')),
                ],
                "g",
                "first",
            ),
            last: Binding::new(
                vec![
                    KeyCombination::new(KeyCode::End),
                    KeyCombination::new(KeyCode::Char('G')),
                ],
                "G",
                "last",
            ),
            goto: Binding::new(
                ('1'..='9').map(|c| KeyCombination::new(KeyCode::Char(c))).collect(),
                "1-9",
                "page",
            ),
            page_size: Binding::new(
                vec![KeyCombination::new(KeyCode::Char('s'))],
                "s",
                "rows/page",
            ),
        }
    }
}

impl KeyMap for PaginationKeys {
    fn bindings(&self) -> Vec<&Binding> {
        vec![
            &self.previous,
            &self.next,
            &self.first,
            &self.last,
            &self.goto,
            &self.page_size,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct PaginationStyle {
    pub current: Style,
    pub page: Style,
    pub disabled: Style,
    pub caption: Style,
}

impl Default for PaginationStyle {
    fn default() -> Self {
        Self {
            current: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            page: Style::default(),
            disabled: Style::default().fg(Color::DarkGray),
            caption: Style::default().fg(Color::Gray),
        }
    }
}

pub struct Pagination {
    page: usize,
    total_pages: usize,
    page_size: usize,
    total_items: usize,
    range: Option<(usize, usize)>,
    page_size_options: Vec<usize>,
    keys: PaginationKeys,
    style: PaginationStyle,
}

impl Pagination {
    pub fn new(page_size_options: Vec<usize>) -> Self {
        let mut options: Vec<usize> = page_size_options.into_iter().filter(|n| *n > 0).collect();
        options.sort_unstable();
        options.dedup();
        Self {
            page: 1,
            total_pages: 1,
            page_size: options.first().copied().unwrap_or(10),
            total_items: 0,
            range: None,
            page_size_options: options,
            keys: PaginationKeys::default(),
            style: PaginationStyle::default(),
        }
    }

    pub fn with_style(mut self, style: PaginationStyle) -> Self {
        self.style = style;
        self
    }

    /// Mirror the list state after it changed. `range` is the first and
    /// last item number on the current page, if any.
    pub fn sync(&mut self, state: &ListState, range: Option<(usize, usize)>) {
        self.page = state.page();
        self.total_pages = state.total_pages().max(1);
        self.page_size = state.page_size();
        self.total_items = state.total_items();
        self.range = range;
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn keys(&self) -> &PaginationKeys {
        &self.keys
    }

    /// Whether `key` is one of the strip's bindings.
    pub fn handles(&self, key: &KeyEvent) -> bool {
        self.keys.bindings().iter().any(|b| b.matches(key))
    }

    /// The option after the current size, wrapping to the smallest.
    pub fn next_page_size(&self) -> Option<usize> {
        let options = &self.page_size_options;
        options
            .iter()
            .copied()
            .find(|n| *n > self.page_size)
            .or_else(|| options.first().copied())
    }

    fn request(&self, page: usize) -> Command<Message> {
        let page = clamp_page(page, self.total_pages);
        if page == self.page {
            Command::none()
        } else {
            Command::message(Message::PageRequested(page))
        }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let prev_style = if self.page > 1 {
            self.style.page
        } else {
            self.style.disabled
        };
        let next_style = if self.page < self.total_pages {
            self.style.page
        } else {
            self.style.disabled
        };

        spans.push(Span::styled("‹ Prev ", prev_style));
        for slot in page_window(self.page, self.total_pages) {
            spans.push(Span::raw(" "));
            match slot {
                PageSlot::Page(n) if n == self.page => {
                    spans.push(Span::styled(format!("[{n}]"), self.style.current));
                }
                PageSlot::Page(n) => spans.push(Span::styled(n.to_string(), self.style.page)),
                PageSlot::Ellipsis => spans.push(Span::styled("…", self.style.disabled)),
            }
        }
        spans.push(Span::styled("  Next ›", next_style));
        spans.push(Span::styled(
            format!("   Rows: {} ▾", self.page_size),
            self.style.caption,
        ));
        let caption = match self.range {
            Some((first, last)) => format!("   Showing {first}–{last} of {}", self.total_items),
            None => "   Showing 0 of 0".to_owned(),
        };
        spans.push(Span::styled(caption, self.style.caption));
        spans
    }
}

impl Component for Pagination {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => {
                let next = if self.keys.previous.matches(&key) {
                    Message::Previous
                } else if self.keys.next.matches(&key) {
                    Message::Next
                } else if self.keys.first.matches(&key) {
                    Message::First
                } else if self.keys.last.matches(&key) {
                    Message::Last
                } else if self.keys.goto.matches(&key) {
                    match key.code {
                        KeyCode::Char(c) => match c.to_digit(10) {
                            Some(n) => Message::Goto(n as usize),
                            None => return Command::none(),
                        },
                        _ => return Command::none(),
                    }
                } else if self.keys.page_size.matches(&key) {
                    Message::CyclePageSize
                } else {
                    return Command::none();
                };
                self.update(next)
            }
            Message::Previous => self.request(self.page.saturating_sub(1)),
            Message::Next => self.request(self.page + 1),
            Message::First => self.request(1),
            Message::Last => self.request(self.total_pages),
            Message::Goto(n) => self.request(n),
            Message::CyclePageSize => match self.next_page_size() {
                Some(n) if n != self.page_size => Command::message(Message::PageSizeRequested(n)),
                _ => Command::none(),
            },
            Message::PageRequested(_) | Message::PageSizeRequested(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.render_widget(Paragraph::new(Line::from(self.spans())), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use roster_listing::Page;

    fn strip(page: usize, total_items: usize, page_size: usize) -> Pagination {
        let mut state = ListState::new(page_size);
        let total_pages = roster_listing::pagination::total_pages(total_items, page_size);
        state.observe(&Page::<()> {
            items: Vec::new(),
            total_items,
            page: 1,
            page_size,
            total_pages,
        });
        state.set_page(page);
        let first = (state.page() - 1) * page_size + 1;
        let last = (first + page_size - 1).min(total_items);
        let mut pagination = Pagination::new(vec![10, 20, 50, 100]);
        pagination.sync(&state, Some((first, last)));
        pagination
    }

    fn text(p: &Pagination) -> String {
        p.spans().iter().map(|s| s.content.as_ref()).collect()
    }

    fn requested(cmd: Command<Message>) -> Option<Message> {
        cmd.into_message()
    }

    #[test]
    fn strip_collapses_with_ellipsis() {
        let p = strip(5, 115, 10);
        assert_eq!(
            text(&p),
            "‹ Prev  1 … 4 [5] 6 … 12  Next ›   Rows: 10 ▾   Showing 41–50 of 115"
        );
    }

    #[test]
    fn next_and_previous_request_neighbours() {
        let mut p = strip(5, 115, 10);
        assert_eq!(requested(p.update(Message::Next)), Some(Message::PageRequested(6)));
        assert_eq!(requested(p.update(Message::Previous)), Some(Message::PageRequested(4)));
        assert_eq!(requested(p.update(Message::Last)), Some(Message::PageRequested(12)));
    }

    #[test]
    fn edges_do_not_request() {
        let mut p = strip(1, 25, 10);
        assert!(p.update(Message::Previous).is_none());
        assert!(p.update(Message::First).is_none());
        let mut p = strip(3, 25, 10);
        assert!(p.update(Message::Next).is_none());
    }

    #[test]
    fn goto_is_clamped() {
        let mut p = strip(1, 25, 10);
        assert_eq!(requested(p.update(Message::Goto(9))), Some(Message::PageRequested(3)));
    }

    #[test]
    fn digit_keys_jump_to_page() {
        let mut p = strip(1, 115, 10);
        let three = KeyEvent::new(KeyCode::Char('3'), KeyModifiers::NONE);
        assert!(p.handles(&three));
        assert_eq!(
            requested(p.update(Message::KeyPress(three))),
            Some(Message::PageRequested(3))
        );
        let mut p = strip(1, 25, 10);
        let nine = KeyEvent::new(KeyCode::Char('9'), KeyModifiers::NONE);
        assert_eq!(
            requested(p.update(Message::KeyPress(nine))),
            Some(Message::PageRequested(3))
        );
        let zero = KeyEvent::new(KeyCode::Char('0'), KeyModifiers::NONE);
        assert!(!p.handles(&zero));
    }

    #[test]
    fn page_size_cycles_and_wraps() {
        let mut p = strip(1, 25, 10);
        assert_eq!(
            requested(p.update(Message::CyclePageSize)),
            Some(Message::PageSizeRequested(20))
        );
        let mut p = strip(1, 25, 100);
        assert_eq!(
            requested(p.update(Message::CyclePageSize)),
            Some(Message::PageSizeRequested(10))
        );
    }

    #[test]
    fn keys_map_to_requests() {
        let mut p = strip(2, 25, 10);
        let right = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        assert!(p.handles(&right));
        assert_eq!(
            requested(p.update(Message::KeyPress(right))),
            Some(Message::PageRequested(3))
        );
        let unbound = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert!(!p.handles(&unbound));
        assert!(p.update(Message::KeyPress(unbound)).is_none());
    }

    #[test]
    fn empty_listing_caption() {
        let mut p = Pagination::new(vec![10]);
        p.sync(&ListState::new(10), None);
        assert!(text(&p).ends_with("Showing 0 of 0"));
        assert!(text(&p).contains("[1]"));
    }
}
