//! Single-line search box.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use roster_core::{Command, Component};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    KeyPress(KeyEvent),
    Paste(String),
    /// Outbound: the text changed.
    Edited(String),
    /// Outbound: Enter was pressed.
    Submitted(String),
}

#[derive(Debug, Clone)]
pub struct SearchFieldStyle {
    pub prompt: Style,
    pub text: Style,
    pub placeholder: Style,
    pub cursor: Style,
}

impl Default for SearchFieldStyle {
    fn default() -> Self {
        Self {
            prompt: Style::default().fg(Color::Cyan),
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
        }
    }
}

/// Text box that reports every edit and every submit to its parent.
///
/// It does not debounce; [`FilterBar`](crate::filter_bar::FilterBar) does.
pub struct SearchField {
    value: Vec<char>,
    cursor: usize,
    focus: bool,
    prompt: String,
    placeholder: String,
    style: SearchFieldStyle,
}

impl SearchField {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            focus: false,
            prompt: "⌕ ".into(),
            placeholder: placeholder.into(),
            style: SearchFieldStyle::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_style(mut self, style: SearchFieldStyle) -> Self {
        self.style = style;
        self
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the text without reporting an edit.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    pub fn focus(&mut self) {
        self.focus = true;
    }

    pub fn blur(&mut self) {
        self.focus = false;
    }

    fn edited(&self) -> Command<Message> {
        Command::message(Message::Edited(self.value()))
    }

    fn insert(&mut self, text: &str) -> Command<Message> {
        let chars: Vec<char> = text.chars().filter(|c| !c.is_control()).collect();
        if chars.is_empty() {
            return Command::none();
        }
        let count = chars.len();
        self.value.splice(self.cursor..self.cursor, chars);
        self.cursor += count;
        self.edited()
    }

    fn handle_key(&mut self, key: KeyEvent) -> Command<Message> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), m) if m.contains(KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    return Command::none();
                }
                self.value.clear();
                self.cursor = 0;
                self.edited()
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.insert(c.encode_utf8(&mut [0; 4]))
            }
            (KeyCode::Backspace, _) => {
                if self.cursor == 0 {
                    return Command::none();
                }
                self.cursor -= 1;
                self.value.remove(self.cursor);
                self.edited()
            }
            (KeyCode::Delete, _) => {
                if self.cursor >= self.value.len() {
                    return Command::none();
                }
                self.value.remove(self.cursor);
                self.edited()
            }
            (KeyCode::Left, KeyModifiers::NONE) => {
                self.cursor = self.cursor.saturating_sub(1);
                Command::none()
            }
            (KeyCode::Right, KeyModifiers::NONE) => {
                self.cursor = (self.cursor + 1).min(self.value.len());
                Command::none()
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                Command::none()
            }
            (KeyCode::End, _) => {
                self.cursor = self.value.len();
                Command::none()
            }
            (KeyCode::Enter, _) => Command::message(Message::Submitted(self.value())),
            _ => Command::none(),
        }
    }
}

impl Component for SearchField {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) if self.focus => self.handle_key(key),
            Message::Paste(text) if self.focus => {
                let single_line = text.replace(['\r', '\n'], " ");
                self.insert(&single_line)
            }
            _ => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut spans = vec![Span::styled(self.prompt.clone(), self.style.prompt)];

        if self.value.is_empty() {
            if self.focus {
                spans.push(Span::styled(" ", self.style.cursor));
            }
            spans.push(Span::styled(self.placeholder.clone(), self.style.placeholder));
        } else {
            // Scroll so the cursor stays inside the box.
            let available = usize::from(area.width)
                .saturating_sub(self.prompt.width())
                .saturating_sub(1)
                .max(1);
            let start = self.cursor.saturating_sub(available);
            let end = (start + available).min(self.value.len());
            let before: String = self.value[start..self.cursor.min(end)].iter().collect();
            spans.push(Span::styled(before, self.style.text));
            if self.focus {
                let at = self.value.get(self.cursor).map_or(' ', |c| *c);
                spans.push(Span::styled(at.to_string(), self.style.cursor));
                let after: String = self
                    .value
                    .get(self.cursor + 1..end.max(self.cursor + 1))
                    .map(|rest| rest.iter().collect())
                    .unwrap_or_default();
                spans.push(Span::styled(after, self.style.text));
            } else {
                let rest: String = self.value[self.cursor.min(end)..end].iter().collect();
                spans.push(Span::styled(rest, self.style.text));
            }
        }

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
