use crate::app::{App, Focus};
use crate::keybindings::{Action, Context};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

use super::input::focus_to_context;

const DETAIL_HINTS: &[(Action, &str)] = &[
    (Action::CloseDetail, "close"),
    (Action::ScrollDown, "scroll"),
    (Action::PageDown, "page"),
];

const DROPDOWN_HINTS: &[(Action, &str)] = &[
    (Action::NavDown, "down"),
    (Action::Select, "select"),
    (Action::Back, "close"),
];

const BOOKMARK_HINTS: &[(Action, &str)] = &[
    (Action::DeleteBookmark, "delete"),
    (Action::CycleFocus, "switch"),
    (Action::ShowHelp, "help"),
    (Action::Quit, "quit"),
];

const NAV_HINTS: &[(Action, &str)] = &[
    (Action::NextCategory, "next"),
    (Action::Select, "select"),
    (Action::CycleFocus, "switch"),
    (Action::ShowHelp, "help"),
    (Action::Quit, "quit"),
];

const COMPACT_HINTS: &[(Action, &str)] = &[
    (Action::Bookmark, "bookmark"),
    (Action::ViewDetails, "view"),
    (Action::OpenDropdown, "categories"),
    (Action::ToggleBookmarks, "saved"),
    (Action::CycleFocus, "switch"),
    (Action::ShowHelp, "help"),
    (Action::Quit, "quit"),
];

const ARTICLE_HINTS: &[(Action, &str)] = &[
    (Action::Bookmark, "bookmark"),
    (Action::ViewDetails, "view"),
    (Action::NextCategory, "next tab"),
    (Action::OpenDropdown, "categories"),
    (Action::CycleFocus, "switch"),
    (Action::ShowHelp, "help"),
    (Action::Quit, "quit"),
];

/// Render the status bar: the transient message if any, else key hints.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        Cow::Owned(hints(app))
    };

    f.render_widget(Paragraph::new(text).style(app.style("status_bar")), area);
}

/// Key hints for the active view, using whatever keys are currently bound.
fn hints(app: &App) -> String {
    let (context, table) = if app.detail.is_some() {
        (Context::Detail, DETAIL_HINTS)
    } else if app.dropdown_cursor.is_some() {
        (Context::Dropdown, DROPDOWN_HINTS)
    } else {
        let table = match (app.compact, app.focus) {
            (_, Focus::Bookmarks) => BOOKMARK_HINTS,
            (false, Focus::Nav) => NAV_HINTS,
            (true, _) => COMPACT_HINTS,
            (false, _) => ARTICLE_HINTS,
        };
        (focus_to_context(app.focus), table)
    };

    table
        .iter()
        .filter_map(|(action, label)| {
            let key = app.keybindings.key_for(context, *action)?;
            Some(format!("[{}] {}", key, label))
        })
        .collect::<Vec<_>>()
        .join("  ")
}
