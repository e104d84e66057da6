// src/ui/widgets/status_bar.rs
//! One-line status bar: last result, or key hints.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use crate::app::{Status, StatusKind};

const BROWSE_HINTS: &str = "↑↓ move  ⏎ open  ← up  space mark  m menu  esc clear  q quit";
const MENU_HINTS: &str = "↑↓ choose  ⏎ activate  esc close";

/// Render the status bar.
pub fn render_status_bar(f: &mut Frame<'_>, area: Rect, status: Option<&Status>, menu_open: bool) {
    let paragraph = match status {
        Some(Status { kind, text }) if !menu_open => {
            let color = match kind {
                StatusKind::Info => Color::Green,
                StatusKind::Error => Color::Red,
            };
            Paragraph::new(text.as_str()).style(Style::default().fg(color))
        }
        _ => Paragraph::new(if menu_open { MENU_HINTS } else { BROWSE_HINTS })
            .style(Style::default().fg(Color::DarkGray)),
    };
    f.render_widget(paragraph, area);
}
