//! vtewrap - the VTE terminal widget for GTK 4 applications
//!
//! This crate provides the native VTE terminal as a GTK 4 widget with:
//! - Background/foreground color and font passthroughs
//! - Child process spawning and `child-exited` notification
//! - Deterministic release of the native reference on drop
//! - A headless recording backend for testing the glue without a display

pub use vtewrap_core::{
    dummy_backend, Color, FontSpec, FontStyle, FontWeight, NativeLibrary, NativeRef, NativeRgba,
    ScrollPolicies, ScrollPolicy, SpawnOutcome, SpawnRequest, Terminal, TerminalConfig,
    TerminalError, TerminalResult, TerminalWindow, WindowConfig, WindowSystem,
    RGBA_LAYOUT_VERSION,
};
pub use vtewrap_gtk4::{convert, Gtk4Library, TerminalPtr, VteTerminalWidget, VteTerminalWindow};
