//! Color descriptors and their native binary layout

use crate::error::{TerminalError, TerminalResult};
use std::mem::{align_of, offset_of, size_of};

/// Color in 0.0..=1.0 space with alpha channel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "rgba({:.2}, {:.2}, {:.2}, {:.2})",
            self.r, self.g, self.b, self.a
        )
    }
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0, a: 1.0 };
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> TerminalResult<Self> {
        let invalid = || TerminalError::InvalidColor { value: hex.to_string() };
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| -> TerminalResult<f64> {
            u8::from_str_radix(s, 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| invalid())
        };

        match digits.len() {
            3 => {
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Color::rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Color::rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            8 => Ok(Color::rgba(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                channel(&digits[6..8])?,
            )),
            _ => Err(invalid()),
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }

    pub fn to_native(self) -> NativeRgba {
        NativeRgba::new(self.r as f32, self.g as f32, self.b as f32, self.a as f32)
    }
}

/// GTK major version whose `GdkRGBA` declaration [`NativeRgba`] mirrors.
///
/// GTK 3 declared the channels as `gdouble`; GTK 4 switched to `float`. Bump
/// this together with the struct if the header ever changes again. The GTK
/// backend asserts it against the version `layout_check.c` is compiled for.
pub const RGBA_LAYOUT_VERSION: u32 = 4;

/// Binary image of `GdkRGBA` from `gdk/gdkrgba.h` (GTK 4):
///
/// ```c
/// struct _GdkRGBA { float red; float green; float blue; float alpha; };
/// ```
///
/// Values crossing the FFI boundary are built field by field from this type,
/// never by reinterpreting the address of a toolkit object.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeRgba {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

const _: () = {
    assert!(size_of::<NativeRgba>() == 16);
    assert!(align_of::<NativeRgba>() == align_of::<f32>());
    assert!(offset_of!(NativeRgba, red) == 0);
    assert!(offset_of!(NativeRgba, green) == 4);
    assert!(offset_of!(NativeRgba, blue) == 8);
    assert!(offset_of!(NativeRgba, alpha) == 12);
};

impl NativeRgba {
    /// Channels are clamped into `0.0..=1.0`; NaN becomes `0.0`.
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        fn clamp(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self {
            red: clamp(red),
            green: clamp(green),
            blue: clamp(blue),
            alpha: clamp(alpha),
        }
    }
}

impl From<Color> for NativeRgba {
    fn from(color: Color) -> Self {
        color.to_native()
    }
}

impl From<&Color> for NativeRgba {
    fn from(color: &Color) -> Self {
        color.to_native()
    }
}

impl From<NativeRgba> for Color {
    fn from(rgba: NativeRgba) -> Self {
        Color::rgba(
            rgba.red as f64,
            rgba.green as f64,
            rgba.blue as f64,
            rgba.alpha as f64,
        )
    }
}
