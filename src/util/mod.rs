//! Text helpers shared by the view models and renderers.
//!
//! Everything the API returns is untrusted text that ends up in a terminal,
//! so it passes through [`strip_control_chars`] before display.

mod text;

pub use text::{one_line, strip_control_chars, truncate_to_width};
