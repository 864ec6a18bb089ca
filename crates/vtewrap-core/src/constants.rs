// src/constants.rs
use crate::color::Color;

// Font
pub const DEFAULT_FONT_FAMILY: &str = "Monospace";
pub const DEFAULT_FONT_SIZE: f64 = 12.0;

pub const SCROLLBACK_LIMIT: usize = 1000;

// Colors
pub const DEFAULT_FG: Color = Color::WHITE;
pub const DEFAULT_BG: Color = Color::BLACK;

// Window
pub const DEFAULT_WINDOW_TITLE: &str = "vtewrap";
pub const DEFAULT_WINDOW_WIDTH: i32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: i32 = 600;

// Child process
/// -1 lets the native library pick its own spawn timeout.
pub const DEFAULT_SPAWN_TIMEOUT_MS: i32 = -1;
