// src/ui/widgets/file_list.rs
//! File browser list widget.

use std::collections::BTreeSet;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::fs::{Entry, FileCategory};
use crate::ui::icons::{icon_for_entry, MARK};

/// Render the file browser list.
pub fn render_file_list(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    entries: &[Entry],
    marked: &BTreeSet<String>,
    state: &mut ListState,
) {
    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let is_marked = marked.contains(&entry.name);
            let line = format!(
                "{} {} {}",
                if is_marked { MARK } else { " " },
                icon_for_entry(entry.is_dir, entry.category()),
                entry.name
            );
            let style = if is_marked {
                Style::default().fg(Color::Yellow)
            } else if !entry.is_dir && entry.category() == FileCategory::Archive {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, state);
}
