//! Terminal news reader.
//!
//! Browses categories and articles from a remote news API, keeps an
//! in-memory bookmark list and shows article details in a modal.

pub mod api;
pub mod app;
pub mod bookmarks;
pub mod config;
pub mod keybindings;
pub mod theme;
pub mod ui;
pub mod util;
pub mod view;
