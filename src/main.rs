// src/main.rs
use gtk4::prelude::*;
use gtk4::{gdk, Application};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vtewrap::{
    Color, FontSpec, SpawnRequest, TerminalConfig, TerminalResult, VteTerminalWindow, WindowConfig,
};

fn default_shell() -> String {
    std::env::var("SHELL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "/bin/sh".to_string())
}

fn open_terminal(app: &Application) -> TerminalResult<()> {
    let config = WindowConfig::new().with_terminal(
        TerminalConfig::new()
            .with_colors(Color::WHITE, Color::BLACK)
            .with_font(FontSpec::new("Monospace", 12.0)),
    );

    let terminal_window = VteTerminalWindow::new(&config)?;
    terminal_window.window().set_application(Some(app));

    let terminal = terminal_window.terminal();
    terminal.set_bg_color(&gdk::RGBA::new(0.0, 0.0, 0.0, 1.0));
    terminal.set_fg_color(&gdk::RGBA::new(1.0, 1.0, 1.0, 1.0));
    terminal.set_font(&pango::FontDescription::from_string("Monospace 12"));

    let app_weak = app.downgrade();
    terminal.connect_child_exited(move |status| {
        info!("Shell exited with status {}", status);
        if let Some(app) = app_weak.upgrade() {
            app.quit();
        }
    });

    let outcome = terminal.spawn(SpawnRequest::new([default_shell()]))?;
    glib::MainContext::default().spawn_local(async move {
        match outcome.recv().await {
            Ok(Ok(pid)) => info!("Shell running as pid {}", pid),
            Ok(Err(e)) => error!("{}", e),
            Err(_) => error!("Spawn result channel closed"),
        }
    });

    // The window and its scrolled container keep the widget alive from here
    Ok(())
}

fn main() -> glib::ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = Application::builder()
        .application_id("com.example.vtewrap")
        .build();

    app.connect_activate(|app| {
        if let Err(e) = open_terminal(app) {
            error!("Failed to open terminal: {}", e);
            app.quit();
        }
    });

    app.run()
}
