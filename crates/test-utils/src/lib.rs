//! Shared test utilities for the reception-maps workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Font lookup and a skip macro for text-dependent tests
//! - Base map and icon generators
//! - Common map bounds and CSV fixtures
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{require_font, fixtures};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro to skip a test if no TrueType font is available.
///
/// # Usage
///
/// ```ignore
/// use test_utils::require_font;
///
/// #[test]
/// fn test_label_rendering() {
///     let font_path = require_font!();
///     // Test code using font_path...
/// }
/// ```
///
/// If no font is found, the test will print a skip message and return early.
#[macro_export]
macro_rules! require_font {
    () => {{
        match $crate::find_test_font() {
            Some(path) => path,
            None => {
                eprintln!("SKIPPED: No TrueType font found. Set TEST_FONT to a .ttf file.");
                return;
            }
        }
    }};
}

/// Assert two floats are within `epsilon` of each other.
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(projected.easting, 500_000.0, 1e-6);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let (left, right, epsilon) = ($left as f64, $right as f64, $epsilon as f64);
        let diff = (left - right).abs();
        assert!(
            diff <= epsilon,
            "{} = {} is not within {} of {} (off by {})",
            stringify!($left),
            left,
            epsilon,
            right,
            diff
        );
    }};
}
