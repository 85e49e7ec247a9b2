//! Help overlay: a scrollable keybinding table.
//!
//! Shows the live bindings, config overrides included, grouped by context.

use crate::app::App;
use crate::keybindings::Context;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use super::render::centered_rect;

const MIN_KEY_WIDTH: usize = 16;

/// Context display order and labels for the help screen.
const CONTEXT_ORDER: [(Context, &str); 6] = [
    (Context::Global, "General"),
    (Context::CategoryNav, "Category Tabs"),
    (Context::ArticleList, "Articles"),
    (Context::Bookmarks, "Bookmarks"),
    (Context::Dropdown, "Category Dropdown"),
    (Context::Detail, "Article Detail"),
];

/// Render the help overlay on top of the current view.
pub fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    let overlay = centered_rect(80, 80, area);
    if overlay.width < 20 || overlay.height < 6 {
        return;
    }

    f.render_widget(Clear, overlay);

    let bindings = app.keybindings.all_bindings();

    let mut rows: Vec<Row> = Vec::new();
    // Headings share the key column, so it must fit the longest one.
    let mut key_width = MIN_KEY_WIDTH;

    for (ctx, label) in &CONTEXT_ORDER {
        let group: Vec<_> = bindings.iter().filter(|(c, ..)| c == ctx).collect();
        if group.is_empty() {
            continue;
        }

        let heading = format!("-- {} --", label);
        key_width = key_width.max(heading.width());
        rows.push(
            Row::new(vec![
                Line::from(Span::styled(
                    heading,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
            ])
            .style(app.style("overlay_heading")),
        );
        for (_, key, _, description) in group {
            let key = format!("  {}", key);
            key_width = key_width.max(key.width());
            rows.push(Row::new(vec![key, description.to_string()]));
        }
        rows.push(Row::new(vec![String::new(), String::new()]));
    }
    rows.pop();

    let total_rows = rows.len();

    // Borders and the header row
    let visible_height = overlay.height.saturating_sub(4) as usize;
    let max_scroll = total_rows.saturating_sub(visible_height);
    let scroll = app.help_scroll_offset.min(max_scroll);
    let visible_rows: Vec<Row> = rows.into_iter().skip(scroll).take(visible_height).collect();

    let title = if max_scroll > 0 {
        format!(
            " Help ({}/{}) ",
            scroll.saturating_add(1),
            max_scroll.saturating_add(1)
        )
    } else {
        " Help (? to close) ".to_string()
    };

    let key_width = u16::try_from(key_width + 1).unwrap_or(u16::MAX);
    let widths = [Constraint::Length(key_width), Constraint::Min(20)];

    let table = Table::new(visible_rows, widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border_focused"))
                .title(title),
        )
        .header(
            Row::new(vec!["Key", "Action"])
                .style(
                    Style::default()
                        .add_modifier(Modifier::BOLD)
                        .add_modifier(Modifier::UNDERLINED),
                )
                .bottom_margin(1),
        )
        .style(app.style("detail_body"));

    f.render_widget(table, overlay);

    if max_scroll > 0 && scroll < max_scroll {
        let hint = Line::from(vec![Span::styled(
            " j/k to scroll, ? or Esc to close ",
            app.style("overlay_hint"),
        )]);
        let hint_area = Rect {
            x: overlay.x + 1,
            y: overlay.y + overlay.height.saturating_sub(1),
            width: overlay.width.saturating_sub(2),
            height: 1,
        };
        f.render_widget(Paragraph::new(hint), hint_area);
    }
}
