//! Path utilities for locating test assets.
//!
//! Map rendering tests need a TrueType font. DejaVu Sans is checked in at
//! `testdata/font.ttf`; `TEST_FONT` can point tests at a different one.

use std::path::PathBuf;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    // Start from the test-utils crate manifest dir
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Common locations of freely licensed TrueType fonts on Linux and macOS.
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/usr/share/fonts/gnu-free/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// Searches for a TrueType font usable in tests.
///
/// This function checks the following locations in order:
/// 1. Environment variable `TEST_FONT` (if set)
/// 2. `testdata/font.ttf` at the workspace root
/// 3. Common system font paths
///
/// # Returns
///
/// `Some(PathBuf)` if a font is found, `None` otherwise.
pub fn find_test_font() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(font) = std::env::var("TEST_FONT") {
        candidates.push(PathBuf::from(font));
    }

    candidates.push(workspace_root().join("testdata").join("font.ttf"));
    candidates.extend(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

    candidates.into_iter().find(|path| path.is_file())
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::Builder::new()
        .prefix("reception_test_")
        .tempdir()
        .expect("Failed to create temporary test directory")
}
