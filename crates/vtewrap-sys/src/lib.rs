//! Raw FFI declarations for `libvte-2.91-gtk4`
//!
//! Only the entry points the wrapper needs are declared. Linking is set up by
//! `build.rs` through `pkg-config`, which also compiles `layout_check.c`
//! against the installed headers so a layout change fails the build.

#![allow(non_camel_case_types)]

use glib::ffi::{gpointer, GDestroyNotify, GError, GPid, GSpawnChildSetupFunc, GSpawnFlags, GType};
use gtk4::ffi::GtkWidget;
use gtk4::gdk::ffi::GdkRGBA;
use gtk4::gio::ffi::GCancellable;
use pango::ffi::PangoFontDescription;
use std::os::raw::{c_char, c_int, c_long, c_uint};

/// `gssize` as represented by `glib-sys` (which exposes it as `isize`)
type gssize = isize;

mod layout;
pub use layout::GDK_RGBA_LAYOUT_VERSION;

pub type VtePtyFlags = c_uint;
pub const VTE_PTY_DEFAULT: VtePtyFlags = 0;

/// Instance struct, as declared in `vte/vteterminal.h`
#[repr(C)]
pub struct VteTerminal {
    pub widget: GtkWidget,
    _unused_padding: [gpointer; 1],
}

pub type VteTerminalSpawnAsyncCallback =
    Option<unsafe extern "C" fn(terminal: *mut VteTerminal, pid: GPid, error: *mut GError, user_data: gpointer)>;

extern "C" {
    pub fn vte_get_major_version() -> c_uint;
    pub fn vte_get_minor_version() -> c_uint;

    pub fn vte_terminal_get_type() -> GType;
    /// Returns a floating reference
    pub fn vte_terminal_new() -> *mut GtkWidget;

    pub fn vte_terminal_set_color_background(terminal: *mut VteTerminal, background: *const GdkRGBA);
    pub fn vte_terminal_set_color_foreground(terminal: *mut VteTerminal, foreground: *const GdkRGBA);
    pub fn vte_terminal_set_default_colors(terminal: *mut VteTerminal);
    pub fn vte_terminal_set_font(terminal: *mut VteTerminal, font_desc: *const PangoFontDescription);
    pub fn vte_terminal_set_scrollback_lines(terminal: *mut VteTerminal, lines: c_long);
    pub fn vte_terminal_set_size(terminal: *mut VteTerminal, columns: c_long, rows: c_long);
    pub fn vte_terminal_feed(terminal: *mut VteTerminal, data: *const c_char, length: gssize);

    #[allow(clippy::too_many_arguments)]
    pub fn vte_terminal_spawn_async(
        terminal: *mut VteTerminal,
        pty_flags: VtePtyFlags,
        working_directory: *const c_char,
        argv: *mut *mut c_char,
        envv: *mut *mut c_char,
        spawn_flags: GSpawnFlags,
        child_setup: GSpawnChildSetupFunc,
        child_setup_data: gpointer,
        child_setup_data_destroy: GDestroyNotify,
        timeout: c_int,
        cancellable: *mut GCancellable,
        callback: VteTerminalSpawnAsyncCallback,
        user_data: gpointer,
    );
}
