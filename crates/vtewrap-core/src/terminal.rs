// src/terminal.rs
use crate::color::NativeRgba;
use crate::config::TerminalConfig;
use crate::error::{TerminalError, TerminalResult};
use crate::font::FontSpec;
use crate::native::{NativeLibrary, SpawnOutcome, SpawnRequest};
use crate::ownership::NativeRef;

use async_channel::Receiver;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};

/// Host-side handle to a native terminal widget.
///
/// Clones share one native reference; the reference is released when the
/// last clone is dropped. The native handle is fixed at construction.
///
/// Every raw library call below passes `native_handle()`, which stays live
/// for as long as `self` holds its `NativeRef`.
pub struct Terminal<L: NativeLibrary> {
    native: Rc<NativeRef<L>>,
}

impl<L: NativeLibrary> Clone for Terminal<L> {
    fn clone(&self) -> Self {
        Self {
            native: Rc::clone(&self.native),
        }
    }
}

impl<L: NativeLibrary> fmt::Debug for Terminal<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("handle", &self.native.handle())
            .finish()
    }
}

impl<L: NativeLibrary> PartialEq for Terminal<L> {
    fn eq(&self, other: &Self) -> bool {
        self.native.handle() == other.native.handle()
    }
}

impl<L: NativeLibrary> Eq for Terminal<L> {}

impl<L: NativeLibrary> Terminal<L> {
    /// Allocate a native terminal and take ownership of it.
    pub fn new(library: Rc<L>) -> TerminalResult<Self> {
        let handle = library.terminal_new().ok_or_else(|| {
            warn!("Native terminal allocation returned null");
            TerminalError::ConstructionFailed {
                reason: "native terminal allocation returned null".to_string(),
            }
        })?;
        debug!("Created native terminal {:?}", handle);

        // SAFETY: `handle` was just allocated and is adopted nowhere else
        let native = unsafe { NativeRef::adopt(library, handle) };
        Ok(Self {
            native: Rc::new(native),
        })
    }

    /// Allocate a terminal and apply `config` to it.
    pub fn with_config(library: Rc<L>, config: &TerminalConfig) -> TerminalResult<Self> {
        config.validate()?;
        let terminal = Self::new(library)?;
        terminal.apply_config(config)?;
        Ok(terminal)
    }

    pub fn apply_config(&self, config: &TerminalConfig) -> TerminalResult<()> {
        config.validate()?;
        debug!(
            "Applying config to {:?}: fg={}, bg={}, font={}, scrollback={}",
            self.native_handle(),
            config.foreground,
            config.background,
            config.font,
            config.scrollback_lines
        );
        self.set_background_color(config.background);
        self.set_foreground_color(config.foreground);
        self.set_font_spec(&config.font);
        self.set_scrollback_lines(config.scrollback_lines);
        if let Some((columns, rows)) = config.size {
            self.set_size(columns, rows)?;
        }
        Ok(())
    }

    /// The native object this terminal wraps
    pub fn native_handle(&self) -> L::Handle {
        self.native.handle()
    }

    pub fn library(&self) -> &L {
        self.native.library()
    }

    pub fn library_rc(&self) -> Rc<L> {
        Rc::clone(self.native.library_rc())
    }

    /// Number of live host handles sharing the native reference
    pub fn host_references(&self) -> usize {
        Rc::strong_count(&self.native)
    }

    /// Background for text without an explicit background color.
    ///
    /// Takes effect on the next redraw.
    pub fn set_background_color(&self, color: impl Into<NativeRgba>) {
        let rgba = color.into();
        trace!("set_color_background {:?} {:?}", self.native_handle(), rgba);
        unsafe { self.library().set_color_background(self.native_handle(), &rgba) };
    }

    /// Color used to draw normal text
    pub fn set_foreground_color(&self, color: impl Into<NativeRgba>) {
        let rgba = color.into();
        trace!("set_color_foreground {:?} {:?}", self.native_handle(), rgba);
        unsafe { self.library().set_color_foreground(self.native_handle(), &rgba) };
    }

    /// Font for all text. The native side reloads metrics and resizes to keep
    /// the same row and column count; an unusable font falls back silently.
    pub fn set_font(&self, font: &L::FontDescription) {
        trace!("set_font {:?}", self.native_handle());
        unsafe { self.library().set_font(self.native_handle(), font) };
    }

    pub fn set_font_spec(&self, spec: &FontSpec) {
        let font = self.library().describe_font(spec);
        self.set_font(&font);
    }

    /// Restore the native default palette.
    pub fn reset_colors(&self) {
        unsafe { self.library().set_default_colors(self.native_handle()) };
    }

    pub fn set_scrollback_lines(&self, lines: usize) {
        let lines = i64::try_from(lines).unwrap_or(i64::MAX);
        unsafe { self.library().set_scrollback_lines(self.native_handle(), lines) };
    }

    /// Request a grid of `columns` x `rows` cells.
    pub fn set_size(&self, columns: usize, rows: usize) -> TerminalResult<()> {
        let invalid = || TerminalError::InvalidSize { columns, rows };
        if columns == 0 || rows == 0 {
            return Err(invalid());
        }
        let cols = i64::try_from(columns).map_err(|_| invalid())?;
        let rows_n = i64::try_from(rows).map_err(|_| invalid())?;
        unsafe { self.library().set_size(self.native_handle(), cols, rows_n) };
        Ok(())
    }

    /// Push bytes into the emulator as if the child had written them.
    pub fn feed(&self, data: &[u8]) {
        if data.is_empty() {
            return;
        }
        unsafe { self.library().feed(self.native_handle(), data) };
    }

    /// Run `request` in a new PTY attached to this terminal.
    ///
    /// Returns once the request is handed to the native library; the pid or
    /// the spawn error arrives later on the returned receiver.
    pub fn spawn(&self, request: SpawnRequest) -> TerminalResult<Receiver<SpawnOutcome>> {
        request.validate()?;
        debug!("Spawning {:?} in {:?}", request.argv, self.native_handle());
        let (tx, rx) = async_channel::bounded(1);
        unsafe { self.library().spawn_async(self.native_handle(), &request, tx) };
        Ok(rx)
    }

    /// Call `callback` with the exit status whenever the child process exits.
    pub fn connect_child_exited<F>(&self, callback: F)
    where
        F: Fn(i32) + 'static,
    {
        unsafe {
            self.library()
                .connect_child_exited(self.native_handle(), Box::new(callback))
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::dummy_backend::{NativeCall, RecordingLibrary};

    #[test]
    fn test_null_allocation_is_construction_error() {
        let lib = Rc::new(RecordingLibrary::failing_terminal_alloc());
        let err = Terminal::new(lib).unwrap_err();
        assert!(matches!(err, TerminalError::ConstructionFailed { .. }));
    }

    #[test]
    fn test_with_config_applies_everything() {
        let lib = Rc::new(RecordingLibrary::new());
        let config = TerminalConfig::new()
            .with_colors(Color::BLACK, Color::WHITE)
            .with_scrollback_lines(500)
            .with_size(80, 24);
        let term = Terminal::with_config(Rc::clone(&lib), &config).unwrap();
        let h = term.native_handle();

        let calls = lib.calls();
        assert!(calls.contains(&NativeCall::SetColorBackground(h, Color::WHITE.to_native())));
        assert!(calls.contains(&NativeCall::SetColorForeground(h, Color::BLACK.to_native())));
        assert!(calls.contains(&NativeCall::SetFont(h, FontSpec::default())));
        assert!(calls.contains(&NativeCall::SetScrollbackLines(h, 500)));
        assert!(calls.contains(&NativeCall::SetSize(h, 80, 24)));
    }

    #[test]
    fn test_invalid_config_allocates_nothing() {
        let lib = Rc::new(RecordingLibrary::new());
        let config = TerminalConfig::new().with_size(80, 0);
        assert!(Terminal::with_config(Rc::clone(&lib), &config).is_err());
        assert!(lib.calls().is_empty());
    }

    #[test]
    fn test_set_size_rejects_zero() {
        let lib = Rc::new(RecordingLibrary::new());
        let term = Terminal::new(Rc::clone(&lib)).unwrap();
        lib.clear_calls();
        assert!(term.set_size(0, 0).is_err());
        assert!(lib.calls().is_empty());
    }

    #[test]
    fn test_spawn_reports_pid() {
        let lib = Rc::new(RecordingLibrary::new());
        let term = Terminal::new(Rc::clone(&lib)).unwrap();
        let rx = term.spawn(SpawnRequest::new(["bash"])).unwrap();
        let pid = rx.try_recv().unwrap().unwrap();
        assert!(pid > 0);
    }

    #[test]
    fn test_spawn_failure_is_delivered() {
        let lib = Rc::new(RecordingLibrary::new());
        lib.set_fail_spawn(true);
        let term = Terminal::new(Rc::clone(&lib)).unwrap();
        let rx = term.spawn(SpawnRequest::new(["nope"])).unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            Err(TerminalError::SpawnFailed { .. })
        ));
    }

    #[test]
    fn test_invalid_spawn_never_reaches_native() {
        let lib = Rc::new(RecordingLibrary::new());
        let term = Terminal::new(Rc::clone(&lib)).unwrap();
        lib.clear_calls();
        assert!(term.spawn(SpawnRequest::new(Vec::<String>::new())).is_err());
        assert!(lib.calls().is_empty());
    }

    #[test]
    fn test_feed_skips_empty_input() {
        let lib = Rc::new(RecordingLibrary::new());
        let term = Terminal::new(Rc::clone(&lib)).unwrap();
        lib.clear_calls();
        term.feed(b"");
        term.feed(b"hello\r\n");
        assert_eq!(
            lib.calls(),
            vec![NativeCall::Feed(term.native_handle(), b"hello\r\n".to_vec())]
        );
    }
}
