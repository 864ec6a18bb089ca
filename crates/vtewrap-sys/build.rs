use std::process::Command;

include!("src/layout.rs");

const LIBRARY: &str = "vte-2.91-gtk4";
const MIN_VERSION: (u32, u32) = (0, 70);

fn pkg_config(args: &[&str]) -> Option<String> {
    Command::new("pkg-config")
        .args(args)
        .arg(LIBRARY)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.');
    let major = parts.next()?.parse().ok()?;
    let minor = parts.next()?.parse().ok()?;
    Some((major, minor))
}

fn main() {
    println!("cargo:rerun-if-changed=layout_check.c");
    println!("cargo:rerun-if-changed=src/layout.rs");
    println!("cargo:rerun-if-env-changed=PKG_CONFIG_PATH");

    let Some(version) = pkg_config(&["--modversion"]) else {
        println!("cargo:warning=pkg-config could not find {LIBRARY}; skipping link setup and layout check");
        return;
    };

    if !matches!(parse_version(&version), Some(v) if v >= MIN_VERSION) {
        println!(
            "cargo:warning={LIBRARY} {version} is older than {}.{}; GTK 4 support may be missing",
            MIN_VERSION.0, MIN_VERSION.1
        );
    }

    let libs = pkg_config(&["--libs"]).unwrap_or_default();
    for flag in libs.split_whitespace() {
        if let Some(path) = flag.strip_prefix("-L") {
            println!("cargo:rustc-link-search=native={path}");
        } else if let Some(lib) = flag.strip_prefix("-l") {
            println!("cargo:rustc-link-lib={lib}");
        }
    }

    // Validate the mirrored layouts against the installed headers
    let cflags = pkg_config(&["--cflags"]).unwrap_or_default();
    let mut build = cc::Build::new();
    build.file("layout_check.c");
    build.define(
        "VTEWRAP_RGBA_LAYOUT_VERSION",
        GDK_RGBA_LAYOUT_VERSION.to_string().as_str(),
    );
    for flag in cflags.split_whitespace() {
        if let Some(path) = flag.strip_prefix("-I") {
            build.include(path);
        } else if let Some(define) = flag.strip_prefix("-D") {
            match define.split_once('=') {
                Some((name, value)) => build.define(name, value),
                None => build.define(define, None),
            };
        }
    }
    build.compile("vtewrap_layout_check");
}
