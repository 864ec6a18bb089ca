// src/config.rs
use crate::color::Color;
use crate::constants::{
    DEFAULT_BG, DEFAULT_FG, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH,
    SCROLLBACK_LIMIT,
};
use crate::error::{TerminalError, TerminalResult};
use crate::font::FontSpec;

/// Settings applied to a terminal right after construction
#[derive(Clone, Debug)]
pub struct TerminalConfig {
    pub background: Color,
    pub foreground: Color,
    pub font: FontSpec,
    pub scrollback_lines: usize,
    /// Requested grid size as `(columns, rows)`; `None` keeps the native default
    pub size: Option<(usize, usize)>,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            background: DEFAULT_BG,
            foreground: DEFAULT_FG,
            font: FontSpec::default(),
            scrollback_lines: SCROLLBACK_LIMIT,
            size: None,
        }
    }
}

impl TerminalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_foreground_color(mut self, color: Color) -> Self {
        self.foreground = color;
        self
    }

    pub fn with_colors(mut self, fg: Color, bg: Color) -> Self {
        self.foreground = fg;
        self.background = bg;
        self
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Parses a Pango-style description such as `"Monospace 12"`.
    pub fn with_font_description(mut self, description: &str) -> TerminalResult<Self> {
        self.font = FontSpec::parse(description)?;
        Ok(self)
    }

    pub fn with_scrollback_lines(mut self, lines: usize) -> Self {
        self.scrollback_lines = lines;
        self
    }

    pub fn with_size(mut self, columns: usize, rows: usize) -> Self {
        self.size = Some((columns, rows));
        self
    }

    pub fn validate(&self) -> TerminalResult<()> {
        if let Some((columns, rows)) = self.size {
            if columns == 0 || rows == 0 {
                return Err(TerminalError::InvalidSize { columns, rows });
            }
        }
        if !(self.font.size.is_finite() && self.font.size > 0.0) {
            return Err(TerminalError::ConfigurationError {
                field: "font.size".to_string(),
                value: self.font.size.to_string(),
            });
        }
        Ok(())
    }
}

/// Scrollbar visibility for one axis of the scrolled container
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPolicy {
    Always,
    Automatic,
    Never,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollPolicies {
    pub horizontal: ScrollPolicy,
    pub vertical: ScrollPolicy,
}

impl Default for ScrollPolicies {
    fn default() -> Self {
        // Columns are fixed by the terminal, rows scroll
        Self {
            horizontal: ScrollPolicy::Never,
            vertical: ScrollPolicy::Automatic,
        }
    }
}

/// Settings for a terminal hosted in its own top-level window
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub scroll: ScrollPolicies,
    pub terminal: TerminalConfig,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_WINDOW_TITLE.to_string(),
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
            scroll: ScrollPolicies::default(),
            terminal: TerminalConfig::default(),
        }
    }
}

impl WindowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_default_size(mut self, width: i32, height: i32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_scroll_policies(mut self, horizontal: ScrollPolicy, vertical: ScrollPolicy) -> Self {
        self.scroll = ScrollPolicies { horizontal, vertical };
        self
    }

    pub fn with_terminal(mut self, terminal: TerminalConfig) -> Self {
        self.terminal = terminal;
        self
    }

    pub fn validate(&self) -> TerminalResult<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(TerminalError::ConfigurationError {
                field: "window size".to_string(),
                value: format!("{}x{}", self.width, self.height),
            });
        }
        self.terminal.validate()
    }
}
