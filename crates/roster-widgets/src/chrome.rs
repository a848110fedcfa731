//! Borders, row striping and the loading spinner shared by listing widgets.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

/// Braille frames for the loading spinner.
pub const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_frame(tick: usize) -> &'static str {
    SPINNER[tick % SPINNER.len()]
}

/// Rounded panel whose border lights up while focused.
pub fn focus_block(title: &str, focused: bool) -> Block<'_> {
    let (border, heading) = if focused {
        (Color::Cyan, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    } else {
        (Color::DarkGray, Style::default().fg(Color::Gray))
    };
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));
    if title.is_empty() {
        block
    } else {
        block.title(ratatui::text::Span::styled(format!(" {title} "), heading))
    }
}

/// Background for the `index`-th body row.
pub fn stripe(index: usize) -> Style {
    if index % 2 == 1 {
        Style::default().bg(Color::Rgb(28, 30, 36))
    } else {
        Style::default()
    }
}
