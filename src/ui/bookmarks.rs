use crate::app::{App, Focus};
use crate::util::truncate_to_width;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Render the bookmarks panel. The title carries the live count.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Bookmarks;
    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("Bookmarks ({})", app.bookmarks.len()));

    if app.bookmarks.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No bookmarks yet. Press b on an article.",
            app.style("bookmark_title"),
        )))
        .wrap(Wrap { trim: true })
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app
        .bookmarks
        .list()
        .iter()
        .map(|bookmark| {
            ListItem::new(Line::from(Span::styled(
                truncate_to_width(&bookmark.title, width),
                app.style("bookmark_title"),
            )))
        })
        .collect();

    let mut list = List::new(items).block(block);
    if is_focused {
        list = list
            .highlight_style(app.style("bookmark_selected"))
            .highlight_symbol("▌");
    }

    let selected = app.selected_bookmark.min(app.bookmarks.len() - 1);
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
