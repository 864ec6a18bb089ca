//! GTK4 backend: the native seams implemented with VTE and GTK calls

use crate::convert::{font_description, native_to_gdk, policy_type};
use async_channel::Sender;
use glib::translate::{from_glib_none, ToGlibPtr};
use gtk4::prelude::*;
use std::ffi::{CStr, CString, NulError};
use std::marker::PhantomData;
use std::os::raw::c_char;
use std::os::unix::ffi::OsStrExt;
use std::ptr::{self, NonNull};
use std::rc::Rc;
use tracing::{debug, warn};
use vtewrap_core::{
    FontSpec, NativeLibrary, NativeRgba, ScrollPolicies, SpawnOutcome, SpawnRequest,
    TerminalError, TerminalResult, WindowSystem,
};
use vtewrap_sys as ffi;

/// Non-null pointer to a `VteTerminal` instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerminalPtr(NonNull<ffi::VteTerminal>);

impl TerminalPtr {
    pub fn as_ptr(self) -> *mut ffi::VteTerminal {
        self.0.as_ptr()
    }

    fn as_gpointer(self) -> glib::ffi::gpointer {
        self.0.as_ptr().cast()
    }

    /// A GTK widget view of the same native object.
    ///
    /// The returned wrapper holds its own reference, independent of the one
    /// owned by [`vtewrap_core::NativeRef`].
    ///
    /// # Safety
    /// The object must still be alive: call this only while a `NativeRef`
    /// (or a `Terminal`) for `self` is held.
    pub(crate) unsafe fn to_widget(self) -> gtk4::Widget {
        unsafe { from_glib_none(self.0.as_ptr().cast::<gtk4::ffi::GtkWidget>()) }
    }
}

/// VTE and GTK behind the core seams. Main thread only.
#[derive(Debug, Default)]
pub struct Gtk4Library {
    _not_send: PhantomData<*const ()>,
}

impl Gtk4Library {
    pub fn new() -> Rc<Self> {
        let (major, minor) = Self::vte_version();
        debug!("Using VTE {}.{}", major, minor);
        Rc::new(Self::default())
    }

    /// Runtime VTE version as `(major, minor)`
    pub fn vte_version() -> (u32, u32) {
        unsafe { (ffi::vte_get_major_version(), ffi::vte_get_minor_version()) }
    }
}

struct SpawnContext {
    program: String,
    done: Sender<SpawnOutcome>,
}

unsafe extern "C" fn spawn_finished(
    _terminal: *mut ffi::VteTerminal,
    pid: glib::ffi::GPid,
    error: *mut glib::ffi::GError,
    user_data: glib::ffi::gpointer,
) {
    let context = Box::from_raw(user_data.cast::<SpawnContext>());
    let outcome = if error.is_null() {
        debug!("Spawned {} as pid {}", context.program, pid);
        Ok(pid)
    } else {
        let message = if (*error).message.is_null() {
            "unknown error".to_string()
        } else {
            CStr::from_ptr((*error).message).to_string_lossy().into_owned()
        };
        warn!("Failed to spawn {}: {}", context.program, message);
        Err(TerminalError::SpawnFailed {
            program: context.program,
            message,
        })
    };
    let _ = context.done.try_send(outcome);
}

fn to_cstrings(items: &[String]) -> Result<Vec<CString>, NulError> {
    items.iter().map(|s| CString::new(s.as_str())).collect()
}

/// NULL-terminated pointer vector borrowing from `strings`
fn to_strv(strings: &[CString]) -> Vec<*mut c_char> {
    strings
        .iter()
        .map(|s| s.as_ptr() as *mut c_char)
        .chain(std::iter::once(ptr::null_mut()))
        .collect()
}

impl NativeLibrary for Gtk4Library {
    type Handle = TerminalPtr;
    type FontDescription = pango::FontDescription;

    fn terminal_new(&self) -> Option<TerminalPtr> {
        if !gtk4::is_initialized_main_thread() {
            warn!("GTK is not initialized on this thread; refusing to create a terminal");
            return None;
        }
        let widget = unsafe { ffi::vte_terminal_new() };
        NonNull::new(widget.cast::<ffi::VteTerminal>()).map(TerminalPtr)
    }

    unsafe fn ref_sink(&self, handle: TerminalPtr) {
        unsafe {
            glib::gobject_ffi::g_object_ref_sink(handle.as_gpointer().cast());
        }
    }

    unsafe fn unref(&self, handle: TerminalPtr) {
        unsafe { glib::gobject_ffi::g_object_unref(handle.as_gpointer().cast()) }
    }

    unsafe fn set_color_background(&self, handle: TerminalPtr, color: &NativeRgba) {
        let rgba = native_to_gdk(color);
        unsafe { ffi::vte_terminal_set_color_background(handle.as_ptr(), &rgba) }
    }

    unsafe fn set_color_foreground(&self, handle: TerminalPtr, color: &NativeRgba) {
        let rgba = native_to_gdk(color);
        unsafe { ffi::vte_terminal_set_color_foreground(handle.as_ptr(), &rgba) }
    }

    unsafe fn set_font(&self, handle: TerminalPtr, font: &pango::FontDescription) {
        unsafe { ffi::vte_terminal_set_font(handle.as_ptr(), font.to_glib_none().0) }
    }

    fn describe_font(&self, spec: &FontSpec) -> pango::FontDescription {
        font_description(spec)
    }

    unsafe fn set_default_colors(&self, handle: TerminalPtr) {
        unsafe { ffi::vte_terminal_set_default_colors(handle.as_ptr()) }
    }

    unsafe fn set_scrollback_lines(&self, handle: TerminalPtr, lines: i64) {
        let lines = lines.clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        unsafe { ffi::vte_terminal_set_scrollback_lines(handle.as_ptr(), lines as _) }
    }

    unsafe fn set_size(&self, handle: TerminalPtr, columns: i64, rows: i64) {
        let clamp = |v: i64| v.clamp(1, i64::from(i32::MAX));
        unsafe { ffi::vte_terminal_set_size(handle.as_ptr(), clamp(columns) as _, clamp(rows) as _) }
    }

    unsafe fn feed(&self, handle: TerminalPtr, data: &[u8]) {
        unsafe { ffi::vte_terminal_feed(handle.as_ptr(), data.as_ptr().cast(), data.len() as isize) }
    }

    unsafe fn spawn_async(&self, handle: TerminalPtr, request: &SpawnRequest, done: Sender<SpawnOutcome>) {
        let program = request.program().to_string();
        let fail = |message: String| {
            let _ = done.try_send(Err(TerminalError::SpawnFailed {
                program: program.clone(),
                message,
            }));
        };

        let argv = match to_cstrings(&request.argv) {
            Ok(argv) => argv,
            Err(e) => return fail(e.to_string()),
        };
        let env = match to_cstrings(&request.env_entries()) {
            Ok(env) => env,
            Err(e) => return fail(e.to_string()),
        };
        let workdir = match request
            .working_directory
            .as_ref()
            .map(|d| CString::new(d.as_os_str().as_bytes()))
            .transpose()
        {
            Ok(dir) => dir,
            Err(e) => return fail(e.to_string()),
        };

        let mut argv_ptrs = to_strv(&argv);
        let mut env_ptrs = to_strv(&env);
        // A null envv inherits the parent environment unchanged
        let envv = if env.is_empty() { ptr::null_mut() } else { env_ptrs.as_mut_ptr() };
        let context = Box::new(SpawnContext {
            program: program.clone(),
            done: done.clone(),
        });

        unsafe {
            ffi::vte_terminal_spawn_async(
                handle.as_ptr(),
                ffi::VTE_PTY_DEFAULT,
                workdir.as_ref().map_or(ptr::null(), |d| d.as_ptr()),
                argv_ptrs.as_mut_ptr(),
                envv,
                glib::ffi::G_SPAWN_SEARCH_PATH,
                None,
                ptr::null_mut(),
                None,
                request.timeout_ms,
                ptr::null_mut(),
                Some(spawn_finished),
                Box::into_raw(context).cast(),
            );
        }
    }

    unsafe fn connect_child_exited(&self, handle: TerminalPtr, callback: Box<dyn Fn(i32) + 'static>) {
        let widget = unsafe { handle.to_widget() };
        widget.connect_local("child-exited", false, move |values| {
            let status = values
                .get(1)
                .and_then(|v| v.get::<i32>().ok())
                .unwrap_or(-1);
            callback(status);
            None
        });
    }
}

impl WindowSystem for Gtk4Library {
    type Window = gtk4::Window;

    fn window_new(&self, title: &str, width: i32, height: i32) -> TerminalResult<gtk4::Window> {
        if !gtk4::is_initialized_main_thread() {
            return Err(TerminalError::WindowCreationFailed {
                reason: "GTK is not initialized on this thread".to_string(),
            });
        }
        Ok(gtk4::Window::builder()
            .title(title)
            .default_width(width)
            .default_height(height)
            .build())
    }

    unsafe fn pack_scrolled(&self, window: &gtk4::Window, terminal: TerminalPtr, policies: ScrollPolicies) {
        let scrolled = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(policy_type(policies.horizontal))
            .vscrollbar_policy(policy_type(policies.vertical))
            .hexpand(true)
            .vexpand(true)
            .child(&unsafe { terminal.to_widget() })
            .build();
        window.set_child(Some(&scrolled));
    }

    fn show_window(&self, window: &gtk4::Window) {
        window.present();
    }

    fn is_window_visible(&self, window: &gtk4::Window) -> bool {
        window.is_visible()
    }

    fn destroy_window(&self, window: &gtk4::Window) {
        debug!("Destroying window {:?}", window.title());
        window.destroy();
    }
}
