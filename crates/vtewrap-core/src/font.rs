//! Toolkit-independent font descriptor
//!
//! [`FontSpec`] speaks the Pango description-string dialect
//! (`"Monospace Bold Italic 12"`) so backends can hand the string straight to
//! their own parser. The native descriptor itself stays owned by the backend.

use crate::constants::{DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE};
use crate::error::{TerminalError, TerminalResult};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Oblique,
    Italic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Normal,
    Medium,
    SemiBold,
    Bold,
    Heavy,
}

impl FontStyle {
    fn keyword(self) -> Option<&'static str> {
        match self {
            FontStyle::Normal => None,
            FontStyle::Oblique => Some("Oblique"),
            FontStyle::Italic => Some("Italic"),
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "italic" => Some(FontStyle::Italic),
            "oblique" => Some(FontStyle::Oblique),
            _ => None,
        }
    }
}

impl FontWeight {
    fn keyword(self) -> Option<&'static str> {
        match self {
            FontWeight::Thin => Some("Thin"),
            FontWeight::Light => Some("Light"),
            FontWeight::Normal => None,
            FontWeight::Medium => Some("Medium"),
            FontWeight::SemiBold => Some("Semi-Bold"),
            FontWeight::Bold => Some("Bold"),
            FontWeight::Heavy => Some("Heavy"),
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_lowercase().as_str() {
            "thin" => Some(FontWeight::Thin),
            "light" => Some(FontWeight::Light),
            "medium" => Some(FontWeight::Medium),
            "semi-bold" | "semibold" | "demi-bold" => Some(FontWeight::SemiBold),
            "bold" => Some(FontWeight::Bold),
            "heavy" | "black" => Some(FontWeight::Heavy),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub style: FontStyle,
    pub weight: FontWeight,
    /// Size in points
    pub size: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE)
    }
}

impl FontSpec {
    pub fn new(family: &str, size: f64) -> Self {
        Self {
            family: family.to_string(),
            style: FontStyle::Normal,
            weight: FontWeight::Normal,
            size,
        }
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Parse a description such as `"DejaVu Sans Mono, Monospace Bold 11.5"`.
    ///
    /// Style and weight words are taken from the right of the family list,
    /// and the size must come last.
    pub fn parse(description: &str) -> TerminalResult<Self> {
        let invalid = || TerminalError::InvalidFont { value: description.to_string() };

        let mut words: Vec<&str> = description.split_whitespace().collect();
        let size = words
            .pop()
            .and_then(|w| w.parse::<f64>().ok())
            .filter(|s| s.is_finite() && *s > 0.0)
            .ok_or_else(invalid)?;

        let mut style = FontStyle::Normal;
        let mut weight = FontWeight::Normal;
        while let Some(word) = words.last() {
            if let Some(s) = FontStyle::parse(word) {
                style = s;
            } else if let Some(w) = FontWeight::parse(word) {
                weight = w;
            } else {
                break;
            }
            words.pop();
        }

        let family = words.join(" ");
        if family.is_empty() {
            return Err(invalid());
        }

        Ok(Self { family, style, weight, size })
    }
}

impl FromStr for FontSpec {
    type Err = TerminalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontSpec::parse(s)
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.family)?;
        if let Some(style) = self.style.keyword() {
            write!(f, " {}", style)?;
        }
        if let Some(weight) = self.weight.keyword() {
            write!(f, " {}", weight)?;
        }
        write!(f, " {}", self.size)
    }
}
