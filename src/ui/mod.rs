//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `helpers` - Spawning of background fetches
//! - `render` - Layout and overlay dispatch
//! - `nav` - Category tab bar
//! - `dropdown` - Category dropdown overlay
//! - `articles` - Article card list
//! - `bookmarks` - Bookmarks panel
//! - `detail` - Article detail modal
//! - `help` - Keybinding overlay
//! - `status` - Status bar

mod articles;
mod bookmarks;
mod detail;
mod dropdown;
mod events;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod nav;
mod render;
mod status;

pub use helpers::load_categories;
pub use loop_runner::{run, Action};
