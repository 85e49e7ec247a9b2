//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

/// Every semantic UI role mapped to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Category navigation --
    pub nav_tab: Style,
    pub nav_tab_active: Style,
    pub nav_cursor: Style,

    // -- Article cards --
    pub card_title: Style,
    pub card_selected: Style,
    pub card_time: Style,
    pub card_image: Style,
    pub card_action: Style,
    pub card_bookmarked: Style,

    // -- List banners --
    pub banner_loading: Style,
    pub banner_error: Style,
    pub banner_empty: Style,

    // -- Bookmarks --
    pub bookmark_title: Style,
    pub bookmark_selected: Style,

    // -- Detail modal --
    pub detail_title: Style,
    pub detail_body: Style,
    pub detail_image: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub overlay_heading: Style,
    pub overlay_hint: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            nav_tab: Style::default().fg(Color::Gray),
            nav_tab_active: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            nav_cursor: Style::default().bg(Color::DarkGray).fg(Color::White),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_time: Style::default().fg(Color::DarkGray),
            card_image: Style::default().fg(Color::Blue),
            card_action: Style::default().fg(Color::Cyan),
            card_bookmarked: Style::default().fg(Color::Yellow),

            banner_loading: Style::default().bg(Color::Green).fg(Color::White),
            banner_error: Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            banner_empty: Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            bookmark_title: Style::default(),
            bookmark_selected: Style::default().bg(Color::DarkGray).fg(Color::White),

            detail_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default(),
            detail_image: Style::default().fg(Color::Blue),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            overlay_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            overlay_hint: Style::default().fg(Color::DarkGray),
        }
    }

    fn light() -> Self {
        Self {
            nav_tab: Style::default().fg(Color::DarkGray),
            nav_tab_active: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            nav_cursor: Style::default().bg(Color::Blue).fg(Color::White),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_time: Style::default().fg(Color::DarkGray),
            card_image: Style::default().fg(Color::Blue),
            card_action: Style::default().fg(Color::Magenta),
            card_bookmarked: Style::default().fg(Color::Magenta),

            banner_loading: Style::default().bg(Color::Green).fg(Color::Black),
            banner_error: Style::default()
                .bg(Color::Red)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            banner_empty: Style::default()
                .bg(Color::LightRed)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            bookmark_title: Style::default().fg(Color::Black),
            bookmark_selected: Style::default().bg(Color::Blue).fg(Color::White),

            detail_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            detail_body: Style::default().fg(Color::Black),
            detail_image: Style::default().fg(Color::Blue),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            overlay_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            overlay_hint: Style::default().fg(Color::DarkGray),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup built from a `ColorPalette`.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

const ROLE_NAMES: [&str; 22] = [
    "nav_tab",
    "nav_tab_active",
    "nav_cursor",
    "card_title",
    "card_selected",
    "card_time",
    "card_image",
    "card_action",
    "card_bookmarked",
    "banner_loading",
    "banner_error",
    "banner_empty",
    "bookmark_title",
    "bookmark_selected",
    "detail_title",
    "detail_body",
    "detail_image",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "overlay_heading",
    "overlay_hint",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 22] = [
            p.nav_tab,
            p.nav_tab_active,
            p.nav_cursor,
            p.card_title,
            p.card_selected,
            p.card_time,
            p.card_image,
            p.card_action,
            p.card_bookmarked,
            p.banner_loading,
            p.banner_error,
            p.banner_empty,
            p.bookmark_title,
            p.bookmark_selected,
            p.detail_title,
            p.detail_body,
            p.detail_image,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.overlay_heading,
            p.overlay_hint,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name. Unknown roles get `Style::default()`.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}
