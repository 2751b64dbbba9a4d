//! Test image generators for base maps and icons.
//!
//! These generators create predictable, verifiable images that can be used
//! across the test suite.

use std::path::Path;

use image::{Rgba, RgbaImage};

/// Creates an opaque base map where every pixel is distinct.
///
/// Pixel (x, y) is `[x % 256, y % 256, (x + y) % 256, 255]`, which makes
/// misplaced or stale pixels easy to spot.
pub fn create_base_map(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8, 255])
    })
}

/// Creates an image filled with one colour.
pub fn create_solid_image(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(color))
}

/// Creates a disc icon: `color` inside the circle, fully transparent outside,
/// and a half-transparent ring at the edge.
pub fn create_disc_icon(size: u32, color: [u8; 3]) -> RgbaImage {
    let radius = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        let distance = (dx * dx + dy * dy).sqrt();

        let alpha = if distance <= radius - 1.5 {
            255
        } else if distance <= radius {
            128
        } else {
            0
        };
        Rgba([color[0], color[1], color[2], alpha])
    })
}

/// Writes a set of disc icons into `dir` as `<name>.png`.
pub fn write_icon_set(dir: &Path, size: u32, icons: &[(&str, [u8; 3])]) {
    for (name, color) in icons {
        create_disc_icon(size, *color)
            .save(dir.join(format!("{}.png", name)))
            .expect("Failed to write test icon");
    }
}
