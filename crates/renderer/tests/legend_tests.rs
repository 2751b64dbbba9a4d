//! Tests for legend placement and drawing.
//!
//! Cursor tests need a parsed font; they are skipped when none is installed.

use image::RgbaImage;
use reception_common::{GeoCoordinate, Operator, PixelPoint, UNKNOWN_VALUE};
use renderer::{legend_lines, Canvas, FontFace, FontSettings, LegendWriter};
use test_utils::{create_base_map, require_font};

fn alfa() -> Operator {
    Operator {
        call_sign: "ALFA".to_string(),
        location: GeoCoordinate::new(47.6, -122.3),
        pixel: PixelPoint::new(500, 400),
        power_watts: 50.0,
        antenna_type: "Vertical".to_string(),
        antenna_gain_dbi: 2.5,
        antenna_height_ft: 30.0,
    }
}

/// Pixel rows of the text layer that contain any ink.
fn inked_rows(layer: &RgbaImage) -> Vec<u32> {
    (0..layer.height())
        .filter(|&y| (0..layer.width()).any(|x| layer.get_pixel(x, y)[3] > 0))
        .collect()
}

// ============================================================================
// Cursor placement tests
// ============================================================================

#[test]
fn test_cursor_starts_in_lower_left() {
    let font_path = require_font!();
    let font = FontFace::load(&font_path, FontSettings::default()).unwrap();
    let mut canvas = Canvas::new(create_base_map(640, 400));

    let writer = LegendWriter::new(&mut canvas, &font);

    // size 12 at 72 dpi with 1.5 spacing: 18 px lines
    // x = 12 * 5, y = 400 - 8 * 18
    assert_eq!(writer.cursor(), PixelPoint::new(60, 256));
}

#[test]
fn test_cursor_advances_one_line_per_line_written() {
    let font_path = require_font!();
    let font = FontFace::load(&font_path, FontSettings::default()).unwrap();
    let mut canvas = Canvas::new(create_base_map(640, 400));

    let mut writer = LegendWriter::new(&mut canvas, &font);
    writer.write_lines(&["one", "two", "three"]);

    assert_eq!(writer.cursor(), PixelPoint::new(60, 256 + 3 * 18));
    assert_eq!(writer.into_lines(), vec!["one", "two", "three"]);
}

#[test]
fn test_cursor_scales_with_dpi() {
    let font_path = require_font!();
    let settings = FontSettings {
        dpi: 144.0,
        size: 10.0,
        line_spacing: 1.2,
        ..FontSettings::default()
    };
    let font = FontFace::load(&font_path, settings).unwrap();
    let mut canvas = Canvas::new(create_base_map(800, 600));

    let mut writer = LegendWriter::new(&mut canvas, &font);
    // Line height = 10 * 1.2 * 2 = 24 px; x margin stays in points
    assert_eq!(writer.cursor(), PixelPoint::new(50, 600 - 192));

    writer.write_lines(&["x"]);
    assert_eq!(writer.cursor().y, 600 - 192 + 24);
}

// ============================================================================
// Drawing tests
// ============================================================================

#[test]
fn test_full_legend_draws_every_line() {
    let font_path = require_font!();
    let font = FontFace::load(&font_path, FontSettings::default()).unwrap();
    let base = create_base_map(640, 400);
    let mut canvas = Canvas::new(base.clone());

    let lines = {
        let mut writer = LegendWriter::new(&mut canvas, &font);
        writer.write_legend("Transmission Map (who can hear me) for ALFA", "146.520 MHz", Some(&alfa()));
        writer.into_lines()
    };

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Transmission Map (who can hear me) for ALFA");
    assert_eq!(lines[5], "Antenna Est. Gain: 2.5 dBi");

    // Ink stays inside the legend block and leaves the output untouched
    let rows = inked_rows(canvas.text_layer());
    assert!(!rows.is_empty());
    assert!(*rows.first().unwrap() >= 256 - 18);
    assert!(*rows.last().unwrap() < 400);
    assert_eq!(canvas.output(), &base);
}

#[test]
fn test_legend_skips_unknown_attributes() {
    let mut op = alfa();
    op.power_watts = UNKNOWN_VALUE;
    op.antenna_type.clear();

    let lines = legend_lines("Receive Map (who can I hear) for ALFA", "", Some(&op));

    assert_eq!(
        lines,
        vec![
            "Receive Map (who can I hear) for ALFA",
            "Antenna Height: 30 feet",
            "Antenna Est. Gain: 2.5 dBi",
        ]
    );
}
