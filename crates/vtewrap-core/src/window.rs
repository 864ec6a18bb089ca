//! A terminal packed into its own top-level window

use crate::config::WindowConfig;
use crate::error::TerminalResult;
use crate::native::WindowSystem;
use crate::terminal::Terminal;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Window → scrolled container → terminal
pub struct TerminalWindow<W: WindowSystem> {
    terminal: Terminal<W>,
    window: W::Window,
}

impl<W: WindowSystem> TerminalWindow<W> {
    /// Build the window, pack a new terminal into it and show it.
    ///
    /// A window allocation error is returned unchanged; a null terminal
    /// becomes [`TerminalError::ConstructionFailed`](crate::TerminalError)
    /// and the already created window is destroyed.
    pub fn new(library: Rc<W>, config: &WindowConfig) -> TerminalResult<Self> {
        config.validate()?;

        let window = library.window_new(&config.title, config.width, config.height)?;
        let terminal = match Terminal::with_config(Rc::clone(&library), &config.terminal) {
            Ok(terminal) => terminal,
            Err(e) => {
                warn!("Terminal construction failed, destroying window: {}", e);
                library.destroy_window(&window);
                return Err(e);
            }
        };

        debug!(
            "Packing terminal {:?} into scrolled container ({:?})",
            terminal.native_handle(),
            config.scroll
        );
        // SAFETY: `terminal` owns a live reference to its handle
        unsafe { library.pack_scrolled(&window, terminal.native_handle(), config.scroll) };
        library.show_window(&window);
        info!("Terminal window '{}' shown", config.title);

        Ok(Self { terminal, window })
    }

    pub fn terminal(&self) -> &Terminal<W> {
        &self.terminal
    }

    pub fn window(&self) -> &W::Window {
        &self.window
    }

    pub fn is_visible(&self) -> bool {
        self.terminal.library().is_window_visible(&self.window)
    }

    pub fn into_parts(self) -> (Terminal<W>, W::Window) {
        (self.terminal, self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScrollPolicy;
    use crate::dummy_backend::{NativeCall, RecordingLibrary};
    use crate::error::TerminalError;

    #[test]
    fn test_window_failure_propagates_before_terminal_alloc() {
        let lib = Rc::new(RecordingLibrary::failing_window_alloc());
        let result = TerminalWindow::new(Rc::clone(&lib), &WindowConfig::default());
        assert!(matches!(result, Err(TerminalError::WindowCreationFailed { .. })));
        assert_eq!(lib.live_objects(), 0);
    }

    #[test]
    fn test_pack_order_and_policies() {
        let lib = Rc::new(RecordingLibrary::new());
        let config = WindowConfig::new()
            .with_title("scratch")
            .with_default_size(309, 99)
            .with_scroll_policies(ScrollPolicy::Never, ScrollPolicy::Never);
        let tw = TerminalWindow::new(Rc::clone(&lib), &config).unwrap();

        let record = lib.window(*tw.window()).unwrap();
        assert_eq!((record.title.as_str(), record.width, record.height), ("scratch", 309, 99));
        assert_eq!(record.children[0].policies, config.scroll);

        let calls = lib.calls();
        let pack = calls
            .iter()
            .position(|c| matches!(c, NativeCall::PackScrolled(..)))
            .unwrap();
        let show = calls
            .iter()
            .position(|c| matches!(c, NativeCall::ShowWindow(..)))
            .unwrap();
        assert!(pack < show);
    }
}
