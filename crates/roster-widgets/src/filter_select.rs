//! Dropdown for one filter key, with an "All" entry that clears it.

use crate::chrome::focus_block;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use ratatui::Frame;
use roster_core::{Command, Component};

const ALL: &str = "All";

/// Who owns the selected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// The parent owns the value and pushes it back with
    /// [`FilterSelect::set_value`] after applying a choice.
    Controlled,
    /// The select records its own choice as soon as it is made.
    Standalone,
}

/// A choice in the dropdown: what is shown and what is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for FilterOption {
    fn from(value: &str) -> Self {
        Self::new(value, value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    Open,
    Close,
    /// Pick the entry at `index`, where 0 is "All".
    Choose(usize),
    /// Outbound: filter `key` should become `value` (`None` clears it).
    Chosen { key: String, value: Option<String> },
}

#[derive(Debug, Clone)]
pub struct FilterSelectStyle {
    pub label: Style,
    pub value: Style,
    pub highlighted: Style,
    pub item: Style,
}

impl Default for FilterSelectStyle {
    fn default() -> Self {
        Self {
            label: Style::default().fg(Color::Gray),
            value: Style::default().add_modifier(Modifier::BOLD),
            highlighted: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            item: Style::default(),
        }
    }
}

/// Dropdown bound to one filter key.
///
/// Choosing an entry always emits [`Message::Chosen`] right away; the
/// first entry is "All" and clears the filter.
///
/// ```rust,ignore
/// let status = FilterSelect::controlled(
///     "status",
///     "Status",
///     vec!["Present".into(), "Absent".into(), "Leave".into()],
/// );
/// ```
pub struct FilterSelect {
    key: String,
    label: String,
    options: Vec<FilterOption>,
    mode: SelectMode,
    value: Option<String>,
    open: bool,
    cursor: usize,
    focus: bool,
    style: FilterSelectStyle,
}

impl FilterSelect {
    pub fn new(
        mode: SelectMode,
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            options,
            mode,
            value: None,
            open: false,
            cursor: 0,
            focus: false,
            style: FilterSelectStyle::default(),
        }
    }

    pub fn controlled(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Self {
        Self::new(SelectMode::Controlled, key, label, options)
    }

    pub fn standalone(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<FilterOption>,
    ) -> Self {
        Self::new(SelectMode::Standalone, key, label, options)
    }

    pub fn with_style(mut self, style: FilterSelectStyle) -> Self {
        self.style = style;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Show `value` as selected. Values not among the options show as-is.
    pub fn set_value(&mut self, value: Option<&str>) {
        self.value = value.filter(|v| !v.is_empty()).map(str::to_owned);
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
        self.open = false;
    }

    fn entry_count(&self) -> usize {
        self.options.len() + 1
    }

    fn selected_index(&self) -> usize {
        self.value
            .as_deref()
            .and_then(|v| self.options.iter().position(|o| o.value == v))
            .map_or(0, |i| i + 1)
    }

    fn display_value(&self) -> String {
        match self.value.as_deref() {
            None => ALL.to_owned(),
            Some(v) => self
                .options
                .iter()
                .find(|o| o.value == v)
                .map_or_else(|| v.to_owned(), |o| o.label.clone()),
        }
    }

    fn entry_label(&self, index: usize) -> &str {
        match index {
            0 => ALL,
            i => self.options.get(i - 1).map_or("", |o| o.label.as_str()),
        }
    }

    fn choose(&mut self, index: usize) -> Command<Message> {
        if index >= self.entry_count() {
            return Command::none();
        }
        self.open = false;
        let value = match index {
            0 => None,
            i => self.options.get(i - 1).map(|o| o.value.clone()),
        };
        if self.mode == SelectMode::Standalone {
            self.value = value.clone();
        }
        Command::message(Message::Chosen {
            key: self.key.clone(),
            value,
        })
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        if !self.open {
            return match key.code {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => self.update(Message::Open),
                _ => Command::none(),
            };
        }
        let count = self.entry_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = (self.cursor + count - 1) % count;
                Command::none()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1) % count;
                Command::none()
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.choose(self.cursor),
            KeyCode::Esc => self.update(Message::Close),
            _ => Command::none(),
        }
    }

    /// Rect the open list occupies below `anchor`, kept inside `bounds`.
    fn overlay_area(&self, anchor: Rect, bounds: Rect) -> Rect {
        let wanted_height = u16::try_from(self.entry_count()).unwrap_or(u16::MAX).saturating_add(2);
        let widest = (0..self.entry_count())
            .map(|i| self.entry_label(i).chars().count())
            .max()
            .unwrap_or(0);
        let wanted_width = u16::try_from(widest + 6).unwrap_or(u16::MAX).max(anchor.width);
        let y = anchor.y.saturating_add(anchor.height).min(bounds.bottom());
        let height = wanted_height.min(bounds.bottom().saturating_sub(y));
        let width = wanted_width.min(bounds.right().saturating_sub(anchor.x));
        Rect::new(anchor.x, y, width, height)
    }

    /// Draw the open list over whatever is below `anchor`. Call after the
    /// rest of the screen so it lands on top.
    pub fn view_overlay(&self, frame: &mut Frame, anchor: Rect) {
        if !self.open {
            return;
        }
        let area = self.overlay_area(anchor, frame.area());
        if area.height < 3 || area.width < 4 {
            return;
        }
        frame.render_widget(Clear, area);
        let block = focus_block(&self.label, true);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines: Vec<Line> = (0..self.entry_count())
            .take(usize::from(inner.height))
            .map(|i| {
                let (marker, style) = if i == self.cursor {
                    ("▸ ", self.style.highlighted)
                } else {
                    ("  ", self.style.item)
                };
                Line::styled(format!("{marker}{}", self.entry_label(i)), style)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for FilterSelect {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::KeyPress(_) => Command::none(),
            Message::Open => {
                self.open = true;
                self.cursor = self.selected_index();
                Command::none()
            }
            Message::Close => {
                self.open = false;
                Command::none()
            }
            Message::Choose(index) => self.choose(index),
            Message::Chosen { .. } => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let block = focus_block("", self.focus);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        let arrow = if self.open { " ▴" } else { " ▾" };
        let line = Line::from(vec![
            Span::styled(format!("{}: ", self.label), self.style.label),
            Span::styled(self.display_value(), self.style.value),
            Span::styled(arrow, self.style.label),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
