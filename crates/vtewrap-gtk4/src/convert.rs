//! Descriptor conversions between gdk/pango types and the checked layouts

use gtk4::gdk;
use gtk4::gdk::ffi::GdkRGBA;
use gtk4::PolicyType;
use std::mem::{align_of, offset_of, size_of};
use vtewrap_core::{FontSpec, NativeRgba, ScrollPolicy};

// NativeRgba must stay bit-compatible with the GdkRGBA that gdk4-sys binds.
const _: () = {
    assert!(size_of::<NativeRgba>() == size_of::<GdkRGBA>());
    assert!(align_of::<NativeRgba>() == align_of::<GdkRGBA>());
    assert!(offset_of!(NativeRgba, red) == offset_of!(GdkRGBA, red));
    assert!(offset_of!(NativeRgba, green) == offset_of!(GdkRGBA, green));
    assert!(offset_of!(NativeRgba, blue) == offset_of!(GdkRGBA, blue));
    assert!(offset_of!(NativeRgba, alpha) == offset_of!(GdkRGBA, alpha));
    assert!(vtewrap_core::RGBA_LAYOUT_VERSION == vtewrap_sys::GDK_RGBA_LAYOUT_VERSION);
};

pub fn rgba_to_native(color: &gdk::RGBA) -> NativeRgba {
    NativeRgba::new(color.red(), color.green(), color.blue(), color.alpha())
}

/// Field-by-field copy into the struct handed to VTE
pub fn native_to_gdk(color: &NativeRgba) -> GdkRGBA {
    GdkRGBA {
        red: color.red,
        green: color.green,
        blue: color.blue,
        alpha: color.alpha,
    }
}

pub fn native_to_rgba(color: &NativeRgba) -> gdk::RGBA {
    gdk::RGBA::new(color.red, color.green, color.blue, color.alpha)
}

pub fn font_description(spec: &FontSpec) -> pango::FontDescription {
    pango::FontDescription::from_string(&spec.to_string())
}

pub fn policy_type(policy: ScrollPolicy) -> PolicyType {
    match policy {
        ScrollPolicy::Always => PolicyType::Always,
        ScrollPolicy::Automatic => PolicyType::Automatic,
        ScrollPolicy::Never => PolicyType::Never,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vtewrap_core::{Color, FontWeight};

    #[test]
    fn test_gdk_rgba_maps_channel_for_channel() {
        let rgba = gdk::RGBA::new(0.25, 0.5, 0.75, 1.0);
        let native = rgba_to_native(&rgba);
        assert_eq!(native, NativeRgba { red: 0.25, green: 0.5, blue: 0.75, alpha: 1.0 });

        let raw = native_to_gdk(&native);
        assert_eq!((raw.red, raw.green, raw.blue, raw.alpha), (0.25, 0.5, 0.75, 1.0));
        let back = native_to_rgba(&native);
        assert_eq!((back.red(), back.green(), back.blue(), back.alpha()), (0.25, 0.5, 0.75, 1.0));
    }

    #[test]
    fn test_core_color_reaches_gdk_unchanged() {
        let raw = native_to_gdk(&Color::BLACK.to_native());
        assert_eq!((raw.red, raw.green, raw.blue, raw.alpha), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_font_description_from_spec() {
        let spec = FontSpec::new("Monospace", 12.0).with_weight(FontWeight::Bold);
        let desc = font_description(&spec);
        assert_eq!(desc.family().map(|f| f.to_string()), Some("Monospace".to_string()));
        assert_eq!(desc.size(), 12 * pango::SCALE);
        assert_eq!(desc.weight(), pango::Weight::Bold);
    }

    #[test]
    fn test_layout_version_matches_linked_gtk() {
        assert_eq!(vtewrap_core::RGBA_LAYOUT_VERSION, vtewrap_sys::GDK_RGBA_LAYOUT_VERSION);
        assert_eq!(gtk4::major_version(), vtewrap_sys::GDK_RGBA_LAYOUT_VERSION);
    }

    #[test]
    fn test_policy_mapping() {
        assert_eq!(policy_type(ScrollPolicy::Never), PolicyType::Never);
        assert_eq!(policy_type(ScrollPolicy::Automatic), PolicyType::Automatic);
    }
}
