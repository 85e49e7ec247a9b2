//! Category dropdown overlay.
//!
//! The second category surface. On narrow terminals it is the only one.

use crate::app::App;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use super::render::centered_rect;

pub fn render(f: &mut Frame, app: &App) {
    let Some(cursor) = app.dropdown_cursor else {
        return;
    };

    let area = f.area();
    let items = app.nav_items();

    // Fit the list height to the category count, bounded by the screen.
    let wanted = items.len() as u16 + 2;
    let base = centered_rect(50, 70, area);
    let height = wanted.min(base.height).max(3);
    let overlay = Rect {
        y: base.y + (base.height.saturating_sub(height)) / 2,
        height,
        ..base
    };
    if overlay.width < 10 {
        return;
    }

    f.render_widget(Clear, overlay);

    let list_items: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let (marker, style) = if item.active {
                ("● ", app.style("nav_tab_active"))
            } else {
                ("  ", app.style("nav_tab"))
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(item.title.as_str(), style),
            ]))
        })
        .collect();

    let list = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(" Categories (Enter select, Esc close) "),
        )
        .highlight_style(app.style("nav_cursor"));

    let mut state = ListState::default().with_selected(Some(cursor));
    f.render_stateful_widget(list, overlay, &mut state);
}
