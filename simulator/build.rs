//! Build script for the HUD simulator.
//!
//! On Windows, adds `vendor/sdl2` to the link search path and copies SDL2.dll
//! next to the built binary. Other platforms use the system SDL2.

use std::path::{Path, PathBuf};
use std::{env, fs};

fn main() {
    if env::var("CARGO_CFG_TARGET_OS").unwrap_or_default() != "windows" {
        return;
    }

    let Some(manifest_dir) = env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from) else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping SDL2 setup");
        return;
    };
    let vendor_sdl2 = manifest_dir
        .parent()
        .unwrap_or(&manifest_dir)
        .join("vendor")
        .join("sdl2");

    println!("cargo:rerun-if-changed={}", vendor_sdl2.display());

    if !vendor_sdl2.exists() {
        println!("cargo:warning=SDL2 vendor directory not found at {}", vendor_sdl2.display());
        println!("cargo:warning=Place SDL2.lib and SDL2.dll in vendor/sdl2/ at the workspace root");
        return;
    }

    println!("cargo:rustc-link-search=native={}", vendor_sdl2.display());

    if let Some(out_dir) = env::var_os("OUT_DIR") {
        copy_dll(&vendor_sdl2, Path::new(&out_dir));
    }
}

/// OUT_DIR is `target/<profile>/build/<pkg>-<hash>/out`; the binary lands in
/// `target/<profile>`.
fn copy_dll(
    vendor_sdl2: &Path,
    out_dir: &Path,
) {
    let Some(profile_dir) = out_dir
        .ancestors()
        .find(|p| p.file_name().is_some_and(|n| n == "release" || n == "debug"))
    else {
        return;
    };

    let dll_src = vendor_sdl2.join("SDL2.dll");
    let dll_dst = profile_dir.join("SDL2.dll");
    if !dll_src.exists() || dll_dst.exists() {
        return;
    }

    match fs::copy(&dll_src, &dll_dst) {
        Ok(_) => println!("cargo:warning=Copied SDL2.dll to {}", dll_dst.display()),
        Err(e) => println!("cargo:warning=Failed to copy SDL2.dll: {e}"),
    }
}
