//! vtewrap core - toolkit-agnostic glue around a native VTE terminal
//!
//! This crate owns the parts of the binding that do not need GTK: reference
//! ownership of the native widget, descriptor layouts for the FFI boundary,
//! configuration and errors. Backends plug in through [`NativeLibrary`] and
//! [`WindowSystem`]; [`dummy_backend::RecordingLibrary`] is the headless one
//! used by the tests.

pub mod color;
pub mod config;
pub mod constants;
pub mod dummy_backend;
pub mod error;
pub mod font;
pub mod native;
pub mod ownership;
pub mod terminal;
pub mod window;

// Re-export main types
pub use color::{Color, NativeRgba, RGBA_LAYOUT_VERSION};
pub use config::{ScrollPolicies, ScrollPolicy, TerminalConfig, WindowConfig};
pub use error::{TerminalError, TerminalResult};
pub use font::{FontSpec, FontStyle, FontWeight};
pub use native::{NativeLibrary, SpawnOutcome, SpawnRequest, WindowSystem};
pub use ownership::NativeRef;
pub use terminal::Terminal;
pub use window::TerminalWindow;
