/// GTK major version whose `GdkRGBA` layout the Rust mirrors follow.
///
/// Also read by `build.rs`, which hands it to `layout_check.c`.
pub const GDK_RGBA_LAYOUT_VERSION: u32 = 4;
