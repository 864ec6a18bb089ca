// tests/wrapper_properties.rs
//! Ownership and marshaling behavior of the wrapper, driven through the
//! recording backend

use std::cell::Cell;
use std::rc::Rc;
use vtewrap_core::dummy_backend::{NativeCall, RecordingLibrary};
use vtewrap_core::{
    Color, FontSpec, ScrollPolicy, SpawnRequest, Terminal, TerminalConfig, TerminalError,
    TerminalWindow, WindowConfig, WindowSystem,
};

fn library() -> Rc<RecordingLibrary> {
    Rc::new(RecordingLibrary::new())
}

#[test]
fn constructed_terminal_has_live_non_null_handle() {
    let lib = library();
    for _ in 0..8 {
        let term = Terminal::new(Rc::clone(&lib)).unwrap();
        let handle = term.native_handle();
        assert_ne!(handle.raw(), 0);

        let record = lib.object(handle).unwrap();
        assert!(!record.floating, "floating reference must be sunk");
        assert_eq!(record.sink_calls, 1);
        assert!(!record.finalized);
    }
}

#[test]
fn failed_allocation_yields_no_terminal() {
    let lib = Rc::new(RecordingLibrary::failing_terminal_alloc());
    let result = Terminal::new(Rc::clone(&lib));
    assert!(matches!(result, Err(TerminalError::ConstructionFailed { .. })));
    assert_eq!(lib.live_objects(), 0);
    assert!(lib.calls().is_empty());
}

#[test]
fn windowed_terminal_is_single_scrolled_child() {
    let lib = library();
    let tw = TerminalWindow::new(Rc::clone(&lib), &WindowConfig::default()).unwrap();

    let window = lib.window(*tw.window()).unwrap();
    assert_eq!(window.children.len(), 1);
    let scrolled = &window.children[0];
    assert_eq!(scrolled.children, vec![tw.terminal().native_handle()]);
    assert_eq!(scrolled.policies.horizontal, ScrollPolicy::Never);
    assert_eq!(scrolled.policies.vertical, ScrollPolicy::Automatic);
    assert!(tw.is_visible());
}

#[test]
fn windowed_construction_surfaces_terminal_failure() {
    let lib = Rc::new(RecordingLibrary::failing_terminal_alloc());
    let result = TerminalWindow::new(Rc::clone(&lib), &WindowConfig::default());
    assert!(matches!(result, Err(TerminalError::ConstructionFailed { .. })));

    assert_eq!(lib.window_count(), 1);
    assert_eq!(lib.live_windows(), 0);
    assert!(lib.calls().iter().any(|c| matches!(c, NativeCall::DestroyWindow(..))));
    assert_eq!(lib.live_objects(), 0);
}

#[test]
fn windowed_construction_propagates_window_failure() {
    let lib = Rc::new(RecordingLibrary::failing_window_alloc());
    let result = TerminalWindow::new(Rc::clone(&lib), &WindowConfig::default());
    assert!(matches!(result, Err(TerminalError::WindowCreationFailed { .. })));
    assert_eq!(lib.live_objects(), 0);
}

#[test]
fn setters_keep_handle_identity() {
    let lib = library();
    let term = Terminal::new(Rc::clone(&lib)).unwrap();
    let before = term.native_handle();

    term.set_background_color(Color::BLACK);
    term.set_foreground_color(Color::WHITE);
    term.set_font(&FontSpec::new("Monospace", 12.0));
    term.reset_colors();

    assert_eq!(term.native_handle(), before);
    assert_eq!(lib.live_objects(), 1);
    assert_eq!(lib.object(before).unwrap().ref_count, 1);
}

#[test]
fn setters_forward_exact_descriptors() {
    let lib = library();
    let term = Terminal::new(Rc::clone(&lib)).unwrap();
    let h = term.native_handle();
    lib.clear_calls();

    let font = FontSpec::parse("DejaVu Sans Mono Bold 11").unwrap();
    term.set_background_color(Color::rgba(0.1, 0.2, 0.3, 0.5));
    term.set_foreground_color(Color::WHITE);
    term.set_font(&font);

    assert_eq!(
        lib.calls(),
        vec![
            NativeCall::SetColorBackground(h, Color::rgba(0.1, 0.2, 0.3, 0.5).to_native()),
            NativeCall::SetColorForeground(h, Color::WHITE.to_native()),
            NativeCall::SetFont(h, font),
        ]
    );
}

#[test]
fn dropping_last_clone_releases_exactly_once() {
    let lib = library();
    let term = Terminal::new(Rc::clone(&lib)).unwrap();
    let handle = term.native_handle();
    let clones: Vec<_> = (0..3).map(|_| term.clone()).collect();
    assert_eq!(term.host_references(), 4);

    drop(term);
    assert_eq!(lib.object(handle).unwrap().unref_calls, 0);
    drop(clones);

    let record = lib.object(handle).unwrap();
    assert_eq!(record.unref_calls, 1);
    assert!(record.finalized);
    assert_eq!(lib.live_objects(), 0);
    assert_eq!(lib.violations(), 0);
}

#[test]
fn safe_api_never_double_releases() {
    let lib = library();
    let term = Terminal::new(Rc::clone(&lib)).unwrap();
    let handle = term.native_handle();
    for _ in 0..4 {
        let clone = term.clone();
        clone.feed(b"x");
        drop(clone);
    }
    let window = TerminalWindow::new(Rc::clone(&lib), &WindowConfig::default()).unwrap();
    let (packed, window_id) = window.into_parts();
    drop(packed);
    lib.destroy_window(&window_id);
    drop(term);

    assert_eq!(lib.object(handle).unwrap().unref_calls, 1);
    assert_eq!(lib.live_objects(), 0);
    assert_eq!(lib.violations(), 0);
}

#[test]
fn window_keeps_terminal_alive_after_host_release() {
    let lib = library();
    let tw = TerminalWindow::new(Rc::clone(&lib), &WindowConfig::default()).unwrap();
    let handle = tw.terminal().native_handle();

    let (terminal, _window) = tw.into_parts();
    drop(terminal);

    // Our one reference is gone; the container still holds its own
    let record = lib.object(handle).unwrap();
    assert_eq!(record.unref_calls, 1);
    assert_eq!(record.ref_count, 1);
    assert!(!record.finalized);
    assert_eq!(lib.violations(), 0);
}

#[test]
fn end_to_end_black_white_and_font() {
    let lib = library();
    let tw = TerminalWindow::new(Rc::clone(&lib), &WindowConfig::default()).unwrap();
    let term = tw.terminal();

    term.set_background_color(Color::rgba(0.0, 0.0, 0.0, 1.0));
    term.set_foreground_color(Color::rgba(1.0, 1.0, 1.0, 1.0));
    term.set_font_spec(&"Monospace 12".parse().unwrap());

    assert!(tw.is_visible());
    assert_eq!(lib.violations(), 0);
    let h = term.native_handle();
    let calls = lib.calls();
    assert!(calls.ends_with(&[
        NativeCall::SetColorBackground(h, Color::BLACK.to_native()),
        NativeCall::SetColorForeground(h, Color::WHITE.to_native()),
        NativeCall::SetFont(h, FontSpec::new("Monospace", 12.0)),
    ]));
}

#[test]
fn child_exit_reaches_subscriber() {
    let lib = library();
    let term = Terminal::with_config(Rc::clone(&lib), &TerminalConfig::default()).unwrap();
    let seen = Rc::new(Cell::new(None));
    let seen_in_cb = Rc::clone(&seen);
    term.connect_child_exited(move |status| seen_in_cb.set(Some(status)));

    let pid = term
        .spawn(SpawnRequest::new(["bash"]))
        .unwrap()
        .try_recv()
        .unwrap()
        .unwrap();
    assert!(pid > 0);

    lib.emit_child_exited(term.native_handle(), 0);
    assert_eq!(seen.get(), Some(0));
}
