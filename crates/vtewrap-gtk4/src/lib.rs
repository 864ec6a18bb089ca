//! vtewrap GTK4 - the native VTE widget embedded through GTK 4
//!
//! [`Gtk4Library`] implements the vtewrap-core seams with real VTE calls;
//! [`VteTerminalWidget`] and [`VteTerminalWindow`] take gdk/pango descriptors
//! directly. Everything here must run on the GTK main thread.

mod backend;
pub mod convert;
mod terminal;

pub use backend::{Gtk4Library, TerminalPtr};
pub use terminal::{VteTerminalWidget, VteTerminalWindow};

// Re-export vtewrap-core types for convenience
pub use vtewrap_core::{
    Color, FontSpec, ScrollPolicies, ScrollPolicy, SpawnOutcome, SpawnRequest, TerminalConfig,
    TerminalError, TerminalResult, WindowConfig,
};
