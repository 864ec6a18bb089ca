//! Seams between the wrapper and the native terminal library

use crate::color::NativeRgba;
use crate::config::ScrollPolicies;
use crate::constants::DEFAULT_SPAWN_TIMEOUT_MS;
use crate::error::{TerminalError, TerminalResult};
use crate::font::FontSpec;
use async_channel::Sender;
use std::fmt;
use std::path::PathBuf;

/// Result of an asynchronous spawn: the child's pid on success
pub type SpawnOutcome = Result<i32, TerminalError>;

/// Raw API surface of the wrapped terminal library.
///
/// Every method must be called from the toolkit's main thread. Handles are
/// plain copies of the native pointer; ownership is tracked by
/// [`NativeRef`](crate::ownership::NativeRef), not by the handle.
///
/// # Safety
///
/// Methods taking a handle are `unsafe`: the caller must guarantee `handle`
/// came from [`terminal_new`](Self::terminal_new) on this library and that
/// the object is still alive, i.e. some owned reference to it has not been
/// released yet. [`Terminal`](crate::Terminal) upholds this for its own
/// handle; other code should go through it.
pub trait NativeLibrary {
    /// Non-null reference to a native terminal object
    type Handle: Copy + Eq + fmt::Debug;
    /// The toolkit's own font descriptor, borrowed for the duration of a call
    type FontDescription;

    /// Allocate a terminal. The object starts with one floating reference.
    fn terminal_new(&self) -> Option<Self::Handle>;
    fn describe_font(&self, spec: &FontSpec) -> Self::FontDescription;

    /// Take ownership of the floating reference (or add a strong one).
    ///
    /// # Safety
    /// `handle` must be live. Each call must be balanced by one [`unref`](Self::unref).
    unsafe fn ref_sink(&self, handle: Self::Handle);
    /// Drop one strong reference; the object may be freed.
    ///
    /// # Safety
    /// `handle` must be live and the caller must own the reference it releases.
    unsafe fn unref(&self, handle: Self::Handle);

    /// # Safety
    /// `handle` must be live.
    unsafe fn set_color_background(&self, handle: Self::Handle, color: &NativeRgba);
    /// # Safety
    /// `handle` must be live.
    unsafe fn set_color_foreground(&self, handle: Self::Handle, color: &NativeRgba);
    /// # Safety
    /// `handle` must be live.
    unsafe fn set_font(&self, handle: Self::Handle, font: &Self::FontDescription);
    /// # Safety
    /// `handle` must be live.
    unsafe fn set_default_colors(&self, handle: Self::Handle);
    /// # Safety
    /// `handle` must be live.
    unsafe fn set_scrollback_lines(&self, handle: Self::Handle, lines: i64);
    /// # Safety
    /// `handle` must be live.
    unsafe fn set_size(&self, handle: Self::Handle, columns: i64, rows: i64);
    /// # Safety
    /// `handle` must be live.
    unsafe fn feed(&self, handle: Self::Handle, data: &[u8]);

    /// Start `request` in a new PTY; the outcome arrives on `done`.
    ///
    /// # Safety
    /// `handle` must be live.
    unsafe fn spawn_async(&self, handle: Self::Handle, request: &SpawnRequest, done: Sender<SpawnOutcome>);
    /// # Safety
    /// `handle` must be live.
    unsafe fn connect_child_exited(&self, handle: Self::Handle, callback: Box<dyn Fn(i32) + 'static>);
}

/// Top-level window management needed to host a terminal
pub trait WindowSystem: NativeLibrary {
    type Window: Clone;

    fn window_new(&self, title: &str, width: i32, height: i32) -> TerminalResult<Self::Window>;
    /// Put `terminal` in a fresh scrolled container and make it the window's child.
    ///
    /// # Safety
    /// `terminal` must be live (see [`NativeLibrary`]).
    unsafe fn pack_scrolled(&self, window: &Self::Window, terminal: Self::Handle, policies: ScrollPolicies);
    fn show_window(&self, window: &Self::Window);
    fn is_window_visible(&self, window: &Self::Window) -> bool;
    /// Tear down a window that will not be handed out.
    fn destroy_window(&self, window: &Self::Window);
}

/// A child process to run inside the terminal
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnRequest {
    pub argv: Vec<String>,
    pub working_directory: Option<PathBuf>,
    /// Extra `NAME=value` entries on top of the inherited environment
    pub env: Vec<(String, String)>,
    pub timeout_ms: i32,
}

impl SpawnRequest {
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            working_directory: None,
            env: Vec::new(),
            timeout_ms: DEFAULT_SPAWN_TIMEOUT_MS,
        }
    }

    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = Some(dir.into());
        self
    }

    pub fn with_env(mut self, name: &str, value: &str) -> Self {
        self.env.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: i32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn program(&self) -> &str {
        self.argv.first().map(String::as_str).unwrap_or("")
    }

    /// Reject requests the native layer cannot represent as C strings.
    pub fn validate(&self) -> TerminalResult<()> {
        let invalid = |message: String| Err(TerminalError::InvalidSpawnRequest { message });

        if self.program().is_empty() {
            return invalid("empty argv".to_string());
        }
        if let Some(arg) = self.argv.iter().find(|a| a.contains('\0')) {
            return invalid(format!("argument contains NUL: {:?}", arg));
        }
        for (name, value) in &self.env {
            if name.is_empty() || name.contains('=') || name.contains('\0') || value.contains('\0') {
                return invalid(format!("bad environment entry: {:?}", name));
            }
        }
        if let Some(dir) = &self.working_directory {
            if dir.as_os_str().is_empty() {
                return invalid("empty working directory".to_string());
            }
        }
        Ok(())
    }

    /// `NAME=value` strings for the native environment vector
    pub fn env_entries(&self) -> Vec<String> {
        self.env.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_request_builder() {
        let req = SpawnRequest::new(["bash", "-l"])
            .with_working_directory("/tmp")
            .with_env("TERM", "xterm-256color");
        assert_eq!(req.program(), "bash");
        assert_eq!(req.env_entries(), vec!["TERM=xterm-256color".to_string()]);
        assert_eq!(req.timeout_ms, DEFAULT_SPAWN_TIMEOUT_MS);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_spawn_request_rejects_unrepresentable_input() {
        assert!(SpawnRequest::new(Vec::<String>::new()).validate().is_err());
        assert!(SpawnRequest::new([""]).validate().is_err());
        assert!(SpawnRequest::new(["sh", "-c", "a\0b"]).validate().is_err());
        assert!(SpawnRequest::new(["sh"]).with_env("A=B", "c").validate().is_err());
        assert!(SpawnRequest::new(["sh"]).with_working_directory("").validate().is_err());
    }
}
