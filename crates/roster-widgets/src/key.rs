//! Key bindings and the hint line built from them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// A key press with the modifiers that must accompany it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub fn shift(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::SHIFT,
        }
    }

    /// Whether `event` is this combination.
    ///
    /// Modifiers must match exactly, so plain `←` does not fire on
    /// `Ctrl+←`. Shift is ignored for character keys because terminals
    /// disagree on whether `G` arrives with it.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        if self.code != event.code {
            return false;
        }
        if event.modifiers == self.modifiers {
            return true;
        }
        matches!(self.code, KeyCode::Char(_))
            && event.modifiers.difference(KeyModifiers::SHIFT)
                == self.modifiers.difference(KeyModifiers::SHIFT)
    }
}

/// One action reachable from one or more key combinations.
#[derive(Debug, Clone)]
pub struct Binding {
    pub keys: Vec<KeyCombination>,
    /// How the keys are written in the hint line, e.g. `←/h`.
    pub label: String,
    pub description: String,
    pub enabled: bool,
}

impl Binding {
    pub fn new(
        keys: Vec<KeyCombination>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            keys,
            label: label.into(),
            description: description.into(),
            enabled: true,
        }
    }

    /// Disabled bindings never match.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled && self.keys.iter().any(|k| k.matches(event))
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Types that publish their bindings for the hint line.
pub trait KeyMap {
    /// Bindings worth advertising, most important first.
    fn bindings(&self) -> Vec<&Binding>;

    /// `label description · label description ...` for enabled bindings.
    fn hints(&self) -> Line<'static> {
        hint_line(self.bindings())
    }
}

/// Render bindings as a dimmed hint line.
pub fn hint_line<'a>(bindings: impl IntoIterator<Item = &'a Binding>) -> Line<'static> {
    let key_style = Style::default().fg(Color::Gray);
    let text_style = Style::default().fg(Color::DarkGray);
    let mut spans = Vec::new();
    for binding in bindings.into_iter().filter(|b| b.enabled) {
        if !spans.is_empty() {
            spans.push(Span::styled(" · ", text_style));
        }
        spans.push(Span::styled(binding.label.clone(), key_style));
        spans.push(Span::styled(format!(" {}", binding.description), text_style));
    }
    Line::from(spans)
}
