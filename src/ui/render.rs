//! Render functions for the TUI.
//!
//! Lays out the browse view and draws overlays on top of it.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use super::{articles, bookmarks, detail, dropdown, help, nav, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Height of the category tab bar including borders.
const TAB_BAR_HEIGHT: u16 = 3;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    app.set_compact(app.is_compact(area.width));

    render_browse(f, app, area);

    if app.dropdown_cursor.is_some() {
        dropdown::render(f, app);
    }

    if app.detail.is_some() {
        detail::render(f, app);
    }

    if app.show_help {
        help::render(f, app);
    }
}

/// Render the browse view: tab bar, cards, bookmarks and status bar.
///
/// The compact layout drops the tab bar and only shows bookmarks when toggled,
/// stacked under the cards.
fn render_browse(f: &mut Frame, app: &App, area: Rect) {
    let mut constraints = Vec::with_capacity(3);
    if !app.compact {
        constraints.push(Constraint::Length(TAB_BAR_HEIGHT));
    }
    constraints.push(Constraint::Min(0));
    constraints.push(Constraint::Length(1));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let (main, status_area) = if app.compact {
        (rows[0], rows[1])
    } else {
        nav::render(f, app, rows[0]);
        (rows[1], rows[2])
    };

    render_main_panels(f, app, main);
    status::render(f, app, status_area);
}

fn render_main_panels(f: &mut Frame, app: &App, area: Rect) {
    match (app.compact, app.show_bookmarks) {
        (false, _) => {
            let columns = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(area);
            articles::render(f, app, columns[0]);
            bookmarks::render(f, app, columns[1]);
        }
        (true, true) => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(area);
            articles::render(f, app, rows[0]);
            bookmarks::render(f, app, rows[1]);
        }
        (true, false) => articles::render(f, app, area),
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
