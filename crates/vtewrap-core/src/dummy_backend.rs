//! Recording stand-in for the native library, for testing without GTK
//!
//! Tracks a reference count per allocated object the way GObject does
//! (objects start with a floating reference), logs every call, and keeps a
//! small window tree so container layout can be asserted.

use crate::color::NativeRgba;
use crate::config::ScrollPolicies;
use crate::error::{TerminalError, TerminalResult};
use crate::font::FontSpec;
use crate::native::{NativeLibrary, SpawnOutcome, SpawnRequest, WindowSystem};
use async_channel::Sender;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Identifier of a recorded native object. Zero is never handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WindowId(usize);

/// Reference bookkeeping for one object
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectRecord {
    pub ref_count: u32,
    pub floating: bool,
    pub sink_calls: u32,
    pub unref_calls: u32,
    pub finalized: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum NativeCall {
    TerminalNew(ObjectId),
    RefSink(ObjectId),
    Unref(ObjectId),
    SetColorBackground(ObjectId, NativeRgba),
    SetColorForeground(ObjectId, NativeRgba),
    SetFont(ObjectId, FontSpec),
    SetDefaultColors(ObjectId),
    SetScrollbackLines(ObjectId, i64),
    SetSize(ObjectId, i64, i64),
    Feed(ObjectId, Vec<u8>),
    SpawnAsync(ObjectId, SpawnRequest),
    ConnectChildExited(ObjectId),
    WindowNew(WindowId),
    PackScrolled(WindowId, ObjectId),
    ShowWindow(WindowId),
    DestroyWindow(WindowId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScrolledRecord {
    pub policies: ScrollPolicies,
    pub children: Vec<ObjectId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WindowRecord {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub children: Vec<ScrolledRecord>,
    pub visible: bool,
    pub destroyed: bool,
}

#[derive(Default)]
struct State {
    next_id: u64,
    next_pid: i32,
    objects: HashMap<ObjectId, ObjectRecord>,
    calls: Vec<NativeCall>,
    windows: Vec<WindowRecord>,
    exit_handlers: Vec<(ObjectId, Rc<dyn Fn(i32)>)>,
    violations: u32,
    fail_terminal_alloc: bool,
    fail_window_alloc: bool,
    fail_spawn: bool,
}

impl State {
    /// Count a violation if `id` is unknown or already finalized.
    fn check_live(&mut self, id: ObjectId) -> bool {
        let live = self.objects.get(&id).is_some_and(|o| !o.finalized);
        if !live {
            self.violations += 1;
        }
        live
    }

    fn unref(&mut self, id: ObjectId) {
        if !self.check_live(id) {
            return;
        }
        if let Some(object) = self.objects.get_mut(&id) {
            object.unref_calls += 1;
            object.ref_count -= 1;
            if object.ref_count == 0 {
                object.finalized = true;
            }
        }
        self.calls.push(NativeCall::Unref(id));
    }
}

/// Test double for [`NativeLibrary`] and [`WindowSystem`]
#[derive(Default)]
pub struct RecordingLibrary {
    state: RefCell<State>,
}

impl RecordingLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `terminal_new` returns null
    pub fn failing_terminal_alloc() -> Self {
        let lib = Self::new();
        lib.state.borrow_mut().fail_terminal_alloc = true;
        lib
    }

    /// Every `window_new` fails
    pub fn failing_window_alloc() -> Self {
        let lib = Self::new();
        lib.state.borrow_mut().fail_window_alloc = true;
        lib
    }

    pub fn set_fail_spawn(&self, fail: bool) {
        self.state.borrow_mut().fail_spawn = fail;
    }

    pub fn calls(&self) -> Vec<NativeCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn object(&self, id: ObjectId) -> Option<ObjectRecord> {
        self.state.borrow().objects.get(&id).cloned()
    }

    /// Objects allocated and not yet finalized
    pub fn live_objects(&self) -> usize {
        self.state.borrow().objects.values().filter(|o| !o.finalized).count()
    }

    pub fn window(&self, id: WindowId) -> Option<WindowRecord> {
        self.state.borrow().windows.get(id.0).cloned()
    }

    pub fn window_count(&self) -> usize {
        self.state.borrow().windows.len()
    }

    /// Windows created and not yet destroyed
    pub fn live_windows(&self) -> usize {
        self.state.borrow().windows.iter().filter(|w| !w.destroyed).count()
    }

    /// Over-releases and calls on finalized or unknown objects
    pub fn violations(&self) -> u32 {
        self.state.borrow().violations
    }

    /// Fire `child-exited` on `id` as the native library would.
    pub fn emit_child_exited(&self, id: ObjectId, status: i32) {
        let handlers: Vec<Rc<dyn Fn(i32)>> = self
            .state
            .borrow()
            .exit_handlers
            .iter()
            .filter(|(owner, _)| *owner == id)
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            handler(status);
        }
    }

    fn record(&self, call: NativeCall) {
        self.state.borrow_mut().calls.push(call);
    }

    /// Log `call` if `id` is live, otherwise count a violation.
    fn record_on(&self, id: ObjectId, call: NativeCall) {
        let mut state = self.state.borrow_mut();
        if state.check_live(id) {
            state.calls.push(call);
        }
    }
}

impl NativeLibrary for RecordingLibrary {
    type Handle = ObjectId;
    type FontDescription = FontSpec;

    fn terminal_new(&self) -> Option<ObjectId> {
        let mut state = self.state.borrow_mut();
        if state.fail_terminal_alloc {
            return None;
        }
        state.next_id += 1;
        let id = ObjectId(state.next_id);
        state.objects.insert(
            id,
            ObjectRecord {
                ref_count: 1,
                floating: true,
                sink_calls: 0,
                unref_calls: 0,
                finalized: false,
            },
        );
        state.calls.push(NativeCall::TerminalNew(id));
        Some(id)
    }

    unsafe fn ref_sink(&self, id: ObjectId) {
        let mut state = self.state.borrow_mut();
        if !state.check_live(id) {
            return;
        }
        if let Some(object) = state.objects.get_mut(&id) {
            object.sink_calls += 1;
            if object.floating {
                object.floating = false;
            } else {
                object.ref_count += 1;
            }
        }
        state.calls.push(NativeCall::RefSink(id));
    }

    unsafe fn unref(&self, id: ObjectId) {
        self.state.borrow_mut().unref(id);
    }

    unsafe fn set_color_background(&self, id: ObjectId, color: &NativeRgba) {
        self.record_on(id, NativeCall::SetColorBackground(id, *color));
    }

    unsafe fn set_color_foreground(&self, id: ObjectId, color: &NativeRgba) {
        self.record_on(id, NativeCall::SetColorForeground(id, *color));
    }

    unsafe fn set_font(&self, id: ObjectId, font: &FontSpec) {
        self.record_on(id, NativeCall::SetFont(id, font.clone()));
    }

    fn describe_font(&self, spec: &FontSpec) -> FontSpec {
        spec.clone()
    }

    unsafe fn set_default_colors(&self, id: ObjectId) {
        self.record_on(id, NativeCall::SetDefaultColors(id));
    }

    unsafe fn set_scrollback_lines(&self, id: ObjectId, lines: i64) {
        self.record_on(id, NativeCall::SetScrollbackLines(id, lines));
    }

    unsafe fn set_size(&self, id: ObjectId, columns: i64, rows: i64) {
        self.record_on(id, NativeCall::SetSize(id, columns, rows));
    }

    unsafe fn feed(&self, id: ObjectId, data: &[u8]) {
        self.record_on(id, NativeCall::Feed(id, data.to_vec()));
    }

    unsafe fn spawn_async(&self, id: ObjectId, request: &SpawnRequest, done: Sender<SpawnOutcome>) {
        self.record_on(id, NativeCall::SpawnAsync(id, request.clone()));
        let outcome = {
            let mut state = self.state.borrow_mut();
            if state.fail_spawn {
                Err(TerminalError::SpawnFailed {
                    program: request.program().to_string(),
                    message: "spawn refused by test double".to_string(),
                })
            } else {
                state.next_pid += 1;
                Ok(1000 + state.next_pid)
            }
        };
        let _ = done.try_send(outcome);
    }

    unsafe fn connect_child_exited(&self, id: ObjectId, callback: Box<dyn Fn(i32) + 'static>) {
        let mut state = self.state.borrow_mut();
        if state.check_live(id) {
            state.exit_handlers.push((id, Rc::from(callback)));
            state.calls.push(NativeCall::ConnectChildExited(id));
        }
    }
}

impl WindowSystem for RecordingLibrary {
    type Window = WindowId;

    fn window_new(&self, title: &str, width: i32, height: i32) -> TerminalResult<WindowId> {
        let mut state = self.state.borrow_mut();
        if state.fail_window_alloc {
            return Err(TerminalError::WindowCreationFailed {
                reason: "window allocation refused by test double".to_string(),
            });
        }
        let id = WindowId(state.windows.len());
        state.windows.push(WindowRecord {
            title: title.to_string(),
            width,
            height,
            children: Vec::new(),
            visible: false,
            destroyed: false,
        });
        state.calls.push(NativeCall::WindowNew(id));
        Ok(id)
    }

    unsafe fn pack_scrolled(&self, window: &WindowId, terminal: ObjectId, policies: ScrollPolicies) {
        // The container holds its own reference to the terminal
        self.ref_sink(terminal);
        let mut state = self.state.borrow_mut();
        if let Some(record) = state.windows.get_mut(window.0) {
            record.children = vec![ScrolledRecord {
                policies,
                children: vec![terminal],
            }];
        }
        state.calls.push(NativeCall::PackScrolled(*window, terminal));
    }

    fn show_window(&self, window: &WindowId) {
        let mut state = self.state.borrow_mut();
        if let Some(record) = state.windows.get_mut(window.0) {
            record.visible = true;
        }
        state.calls.push(NativeCall::ShowWindow(*window));
    }

    fn is_window_visible(&self, window: &WindowId) -> bool {
        self.state
            .borrow()
            .windows
            .get(window.0)
            .is_some_and(|w| w.visible)
    }

    fn destroy_window(&self, window: &WindowId) {
        let mut state = self.state.borrow_mut();
        let packed: Vec<ObjectId> = match state.windows.get_mut(window.0) {
            Some(record) if !record.destroyed => {
                record.destroyed = true;
                record.visible = false;
                record
                    .children
                    .drain(..)
                    .flat_map(|scrolled| scrolled.children)
                    .collect()
            }
            _ => return,
        };
        // Containers drop the references they held on their children
        for id in packed {
            state.unref(id);
        }
        state.calls.push(NativeCall::DestroyWindow(*window));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_over_release_is_counted() {
        let lib = RecordingLibrary::new();
        let id = lib.terminal_new().unwrap();
        unsafe {
            lib.unref(id);
            assert!(lib.object(id).unwrap().finalized);
            lib.unref(id);
            lib.set_color_background(id, &NativeRgba::new(0.0, 0.0, 0.0, 1.0));
        }
        assert_eq!(lib.violations(), 2);
    }

    #[test]
    fn test_handles_are_never_zero() {
        let lib = RecordingLibrary::new();
        let a = lib.terminal_new().unwrap();
        let b = lib.terminal_new().unwrap();
        assert_ne!(a.raw(), 0);
        assert_ne!(a, b);
        assert_eq!(lib.live_objects(), 2);
    }

    #[test]
    fn test_failing_allocators() {
        assert!(RecordingLibrary::failing_terminal_alloc().terminal_new().is_none());
        let lib = RecordingLibrary::failing_window_alloc();
        assert!(matches!(
            lib.window_new("t", 10, 10),
            Err(TerminalError::WindowCreationFailed { .. })
        ));
        assert_eq!(lib.window_count(), 0);
    }

    #[test]
    fn test_destroy_window_releases_packed_children() {
        let lib = RecordingLibrary::new();
        let id = lib.terminal_new().unwrap();
        let window = lib.window_new("t", 10, 10).unwrap();
        unsafe {
            lib.ref_sink(id);
            lib.pack_scrolled(&window, id, ScrollPolicies::default());
        }
        assert_eq!(lib.object(id).unwrap().ref_count, 2);

        lib.destroy_window(&window);
        lib.destroy_window(&window);
        let record = lib.window(window).unwrap();
        assert!(record.destroyed && !record.visible && record.children.is_empty());
        assert_eq!(lib.object(id).unwrap().ref_count, 1);
        assert_eq!(lib.live_windows(), 0);
        assert_eq!(lib.violations(), 0);
    }
}
