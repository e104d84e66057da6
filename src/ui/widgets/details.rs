// src/ui/widgets/details.rs
//! Details panel: detected type, AVFS handler and virtual path.

use std::path::Path;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::Details;

fn field<'a>(key: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{key}: "), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value),
    ])
}

/// Render the details panel.
pub fn render_details(f: &mut Frame<'_>, area: Rect, details: Option<&Details>, mount_root: &Path) {
    let block = Block::default().borders(Borders::ALL).title("2: Details");

    let lines = match details {
        Some(d) => {
            let mut lines = vec![
                field("Name", d.name.clone()),
                field("Type", d.file_type.mime.clone()),
                field("Category", d.file_type.category.to_string()),
            ];
            if d.file_type.names.len() > 1 {
                lines.push(field("Also", d.file_type.names[1..].join(", ")));
            }
            lines.push(Line::raw(""));
            let (verdict, color) = if d.supported {
                ("supported archive", Color::Green)
            } else {
                ("no AVFS handler (passthrough)", Color::DarkGray)
            };
            lines.push(Line::from(Span::styled(verdict, Style::default().fg(color))));
            lines.push(field("Handler", d.suffix.clone()));
            lines.push(field("Virtual path", d.virtual_path.display().to_string()));
            lines
        }
        None => vec![
            Line::raw("No file highlighted"),
            Line::raw(""),
            field("Mount root", mount_root.display().to_string()),
        ],
    };

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}
