//! Input handling for the TUI.
//!
//! Keys are resolved to `keybindings::Action`s for the current context and
//! dispatched from there. Overlays capture input in this order: help, detail
//! modal, category dropdown.

use crate::app::{App, AppEvent, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::{load_articles, load_categories, load_detail};
use super::Action;

/// Lines moved by PageDown/PageUp when the modal height is not known yet.
const DEFAULT_PAGE: usize = 10;

/// Map the current focus panel to a keybinding context.
pub(super) fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Nav => KbContext::CategoryNav,
        Focus::Articles => KbContext::ArticleList,
        Focus::Bookmarks => KbContext::Bookmarks,
    }
}

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    if app.detail.is_some() {
        return Ok(handle_detail_input(app, code, modifiers));
    }

    if app.dropdown_cursor.is_some() {
        return Ok(handle_dropdown_input(app, code, modifiers, event_tx));
    }

    handle_browse_input(app, code, modifiers, event_tx)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_detail_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    let page = match app.detail_visible_lines {
        0 => DEFAULT_PAGE,
        n => n,
    };

    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Detail)
    {
        Some(KbAction::CloseDetail) => app.close_detail(),
        Some(KbAction::ScrollDown) => app.detail_scroll_down(1),
        Some(KbAction::ScrollUp) => app.detail_scroll_up(1),
        Some(KbAction::PageDown) => app.detail_scroll_down(page),
        Some(KbAction::PageUp) => app.detail_scroll_up(page),
        _ => {}
    }
    Action::Continue
}

fn handle_dropdown_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Dropdown)
    {
        Some(KbAction::Quit) => return Action::Quit,
        Some(KbAction::Back) => app.close_dropdown(),
        Some(KbAction::NavDown) => app.dropdown_down(),
        Some(KbAction::NavUp) => app.dropdown_up(),
        Some(KbAction::Select) => {
            if let Some(index) = app.dropdown_cursor {
                let request = app.select_dropdown(index);
                load_articles(app, request, event_tx);
                app.focus = Focus::Articles;
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Handle input in the browse view (tab bar, cards, bookmarks).
fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    let context = focus_to_context(app.focus);
    let action = app.keybindings.action_for_key(code, modifiers, context);

    match action {
        Some(KbAction::Quit) => return Ok(Action::Quit),
        Some(KbAction::NavDown) => app.nav_down(),
        Some(KbAction::NavUp) => app.nav_up(),
        Some(KbAction::CycleFocus) => app.cycle_focus(),
        Some(KbAction::PrevCategory | KbAction::NextCategory) if app.compact => {
            // No tab bar to move through
            app.open_dropdown();
        }
        Some(KbAction::PrevCategory) => {
            app.focus = Focus::Nav;
            app.nav_cursor_left();
        }
        Some(KbAction::NextCategory) => {
            app.focus = Focus::Nav;
            app.nav_cursor_right();
        }
        Some(KbAction::Select) => {
            if app.focus == Focus::Nav {
                let request = app.select_nav(app.nav_cursor);
                load_articles(app, request, event_tx);
            }
        }
        Some(KbAction::Back) => {
            if app.compact && app.show_bookmarks {
                app.toggle_bookmarks();
            } else if app.focus != Focus::Articles {
                app.focus = Focus::Articles;
            }
        }
        Some(KbAction::Bookmark) => {
            app.bookmark_selected();
        }
        Some(KbAction::ViewDetails) => {
            let request = app.request_detail();
            load_detail(app, request, event_tx);
        }
        Some(KbAction::DeleteBookmark) => {
            if app.delete_selected_bookmark() {
                app.set_status(format!("Bookmark removed ({} left)", app.bookmarks.len()));
            }
        }
        Some(KbAction::OpenDropdown) => app.open_dropdown(),
        Some(KbAction::RefreshCategories) => {
            load_categories(app, event_tx);
            app.set_status("Reloading categories...");
        }
        Some(KbAction::ToggleBookmarks) => {
            if app.compact {
                app.toggle_bookmarks();
            } else {
                app.focus = Focus::Bookmarks;
            }
        }
        Some(KbAction::CycleTheme) => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        Some(KbAction::ShowHelp) => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        _ => {}
    }
    Ok(Action::Continue)
}
