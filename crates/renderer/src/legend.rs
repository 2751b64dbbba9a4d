//! Map legend drawn in the lower-left corner of each map.

use reception_common::{Operator, PixelPoint};

use crate::canvas::Canvas;
use crate::font::FontFace;

/// Lines the legend area is sized for.
pub const MAX_LEGEND_LINES: u32 = 8;

/// Legend text for one map.
///
/// Attributes the operator did not supply are left out entirely, as is the
/// frequency line when no frequency is configured.
pub fn legend_lines(title: &str, frequency: &str, operator: Option<&Operator>) -> Vec<String> {
    let mut lines = vec![title.to_string()];

    if !frequency.is_empty() {
        lines.push(format!("Frequency: {}", frequency));
    }

    let Some(op) = operator else {
        return lines;
    };

    if let Some(power) = op.known_power() {
        lines.push(format!("Transmitter Power: {:.0} Watts", power));
    }
    if let Some(antenna) = op.known_antenna_type() {
        lines.push(format!("Antenna Type: {}", antenna));
    }
    if let Some(height) = op.known_antenna_height() {
        lines.push(format!("Antenna Height: {:.0} feet", height));
    }
    if let Some(gain) = op.known_antenna_gain() {
        lines.push(format!("Antenna Est. Gain: {:.1} dBi", gain));
    }

    lines
}

/// Writes successive lines onto a canvas's text layer.
///
/// The cursor starts at a left margin of five font sizes and far enough
/// above the bottom edge for `MAX_LEGEND_LINES` lines, then moves down one
/// line per line written. Create one writer per map.
pub struct LegendWriter<'a> {
    canvas: &'a mut Canvas,
    font: &'a FontFace,
    cursor: PixelPoint,
    line_advance: i32,
    written: Vec<String>,
}

impl<'a> LegendWriter<'a> {
    pub fn new(canvas: &'a mut Canvas, font: &'a FontFace) -> Self {
        let settings = font.settings();
        let line_height = settings.line_height();

        let x = (settings.size * 5.0 + 0.5) as i32;
        let y = canvas.height() as i32 - (line_height * MAX_LEGEND_LINES as f32 + 0.5) as i32;

        Self {
            canvas,
            font,
            cursor: PixelPoint::new(x, y),
            line_advance: (line_height + 0.5) as i32,
            written: Vec::new(),
        }
    }

    /// Draw each line at the cursor, moving down one line after each.
    pub fn write_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        for line in lines {
            let line = line.as_ref();
            self.canvas.draw_text(self.font, line, self.cursor);
            self.cursor.y += self.line_advance;
            self.written.push(line.to_string());
        }
    }

    /// Write the full legend for a map.
    pub fn write_legend(&mut self, title: &str, frequency: &str, operator: Option<&Operator>) {
        let lines = legend_lines(title, frequency, operator);
        self.write_lines(&lines);
    }

    /// Baseline position of the next line.
    pub fn cursor(&self) -> PixelPoint {
        self.cursor
    }

    /// Lines written so far, in order.
    pub fn into_lines(self) -> Vec<String> {
        self.written
    }
}
