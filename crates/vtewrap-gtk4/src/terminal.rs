//! GTK4 terminal widget implementation

use crate::backend::Gtk4Library;
use crate::convert::rgba_to_native;
use gtk4::gdk;
use gtk4::prelude::*;
use vtewrap_core::{
    SpawnOutcome, SpawnRequest, Terminal, TerminalConfig, TerminalResult, TerminalWindow,
    WindowConfig,
};

/// The native VTE widget, owned from Rust
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VteTerminalWidget {
    terminal: Terminal<Gtk4Library>,
}

impl VteTerminalWidget {
    /// Create a terminal with the native defaults
    pub fn new() -> TerminalResult<Self> {
        Ok(Self {
            terminal: Terminal::new(Gtk4Library::new())?,
        })
    }

    /// Create a terminal and apply `config`
    pub fn with_config(config: &TerminalConfig) -> TerminalResult<Self> {
        Ok(Self {
            terminal: Terminal::with_config(Gtk4Library::new(), config)?,
        })
    }

    /// The GTK widget to put into containers
    pub fn widget(&self) -> gtk4::Widget {
        // SAFETY: `self.terminal` keeps the native object alive
        unsafe { self.terminal.native_handle().to_widget() }
    }

    /// Toolkit-agnostic handle, for everything not covered here
    pub fn terminal(&self) -> &Terminal<Gtk4Library> {
        &self.terminal
    }

    /// Background for text with no explicit background color.
    /// Only visible when no background image is set and the terminal is opaque.
    pub fn set_bg_color(&self, color: &gdk::RGBA) {
        self.terminal.set_background_color(rgba_to_native(color));
    }

    /// Color used to draw normal text
    pub fn set_fg_color(&self, color: &gdk::RGBA) {
        self.terminal.set_foreground_color(rgba_to_native(color));
    }

    /// Font for all text; the terminal resizes to keep its rows and columns.
    pub fn set_font(&self, font: &pango::FontDescription) {
        self.terminal.set_font(font);
    }

    pub fn reset_colors(&self) {
        self.terminal.reset_colors();
    }

    pub fn spawn(&self, request: SpawnRequest) -> TerminalResult<async_channel::Receiver<SpawnOutcome>> {
        self.terminal.spawn(request)
    }

    pub fn connect_child_exited<F: Fn(i32) + 'static>(&self, callback: F) {
        self.terminal.connect_child_exited(callback);
    }
}

/// A terminal packed into its own top-level window
pub struct VteTerminalWindow {
    terminal: VteTerminalWidget,
    window: gtk4::Window,
}

impl VteTerminalWindow {
    pub fn new(config: &WindowConfig) -> TerminalResult<Self> {
        let (terminal, window) = TerminalWindow::new(Gtk4Library::new(), config)?.into_parts();
        Ok(Self {
            terminal: VteTerminalWidget { terminal },
            window,
        })
    }

    pub fn terminal(&self) -> &VteTerminalWidget {
        &self.terminal
    }

    pub fn window(&self) -> &gtk4::Window {
        &self.window
    }

    pub fn is_visible(&self) -> bool {
        self.window.is_visible()
    }
}
