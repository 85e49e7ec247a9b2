//! Category tab bar.

use crate::app::{App, Focus};
use crate::view::NavItem;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const TAB_SEPARATOR: &str = "│";

/// Render the tab bar. The active category is underlined; the cursor is
/// highlighted while the bar has focus.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 3 || area.height < 3 {
        return;
    }

    let is_focused = app.focus == Focus::Nav;
    let items = app.nav_items();
    let labels: Vec<String> = items.iter().map(tab_label).collect();
    let widths: Vec<usize> = labels.iter().map(|l| l.width()).collect();

    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor = app.nav_cursor.min(items.len().saturating_sub(1));
    let start = first_visible_tab(&widths, cursor, inner_width);

    let mut spans = Vec::with_capacity(items.len() * 2 + 1);
    if start > 0 {
        spans.push(Span::styled("‹", app.style("nav_tab")));
    }
    for (i, (item, label)) in items.iter().zip(labels).enumerate().skip(start) {
        let mut style = if item.active {
            app.style("nav_tab_active")
        } else {
            app.style("nav_tab")
        };
        if is_focused && i == cursor {
            style = style.patch(app.style("nav_cursor"));
        }
        if i > start {
            spans.push(Span::styled(TAB_SEPARATOR, app.style("panel_border")));
        }
        spans.push(Span::styled(label, style));
    }

    let line = if items.is_empty() {
        Line::from(Span::styled(" No categories ", app.style("nav_tab")))
    } else {
        Line::from(spans)
    };

    let border_style = if is_focused {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let bar = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Categories"),
    );
    f.render_widget(bar, area);
}

fn tab_label(item: &NavItem) -> String {
    format!(" {} ", item.title)
}

/// Index of the first tab to draw so that `cursor` fits in `available` columns.
///
/// Tabs are separated by one column. Scrolling only happens when the cursor
/// would otherwise fall off the right edge.
pub(super) fn first_visible_tab(widths: &[usize], cursor: usize, available: usize) -> usize {
    if widths.is_empty() {
        return 0;
    }

    let mut start = 0;
    loop {
        let used: usize = widths[start..=cursor].iter().sum::<usize>() + (cursor - start);
        if used <= available || start == cursor {
            return start;
        }
        start += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_scroll_when_cursor_fits() {
        assert_eq!(first_visible_tab(&[8, 8, 8], 2, 40), 0);
    }

    #[test]
    fn test_scrolls_to_keep_cursor_visible() {
        // 10 + 1 + 10 + 1 + 10 = 32 > 25, drop the first tab
        assert_eq!(first_visible_tab(&[10, 10, 10], 2, 25), 1);
    }

    #[test]
    fn test_oversized_tab_starts_at_cursor() {
        assert_eq!(first_visible_tab(&[5, 50], 1, 20), 1);
    }

    #[test]
    fn test_empty_tabs() {
        assert_eq!(first_visible_tab(&[], 0, 20), 0);
    }
}
