use crossterm::event::{Event, KeyEvent, KeyEventKind};

/// Terminal input delivered through
/// [`terminal_events`](crate::subscriptions::terminal_events).
///
/// Listings only care about keys, pasted text and resizes; mouse and focus
/// reports are dropped at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    /// A key press.
    Key(KeyEvent),
    /// Terminal resized to (columns, rows).
    Resize(u16, u16),
    /// Bracketed paste content.
    Paste(String),
}

impl TerminalEvent {
    /// Convert a raw crossterm event, discarding the kinds listings ignore.
    ///
    /// Key releases are discarded as well so that terminals reporting both
    /// press and release do not double every keystroke.
    pub fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(TerminalEvent::Key(key)),
            Event::Resize(w, h) => Some(TerminalEvent::Resize(w, h)),
            Event::Paste(text) => Some(TerminalEvent::Paste(text)),
            _ => None,
        }
    }
}
