// src/ui/widgets/menu_popup.rs
//! Context menu drawn over the browser.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::{app::MenuPopup, menu::MenuItem, ui::layout::centered_rect};

/// Label with its mnemonic character underlined.
fn label_line<F>(item: &MenuItem<F>) -> Line<'static> {
    match item.label.split_once('_') {
        Some((before, after)) if !after.is_empty() => {
            let mut rest = after.chars();
            let key = rest.next().map(String::from).unwrap_or_default();
            Line::from(vec![
                Span::raw(before.to_string()),
                Span::styled(key, Style::default().add_modifier(Modifier::UNDERLINED)),
                Span::raw(rest.as_str().to_string()),
            ])
        }
        _ => Line::raw(item.display_label()),
    }
}

/// Render the open context menu.
pub fn render_menu_popup(f: &mut Frame<'_>, area: Rect, menu: &MenuPopup) {
    // items + tip + borders
    let height = menu.items.len() as u16 + 4;
    let popup = centered_rect(60, height, area);

    let items: Vec<ListItem> = menu.items.iter().map(|it| ListItem::new(label_line(it))).collect();
    let tip = menu
        .items
        .get(menu.selected)
        .map(|it| it.tip.clone())
        .unwrap_or_default();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Actions")
                .title_bottom(tip),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(menu.selected));

    f.render_widget(Clear, popup);
    f.render_stateful_widget(list, popup, &mut state);
}
