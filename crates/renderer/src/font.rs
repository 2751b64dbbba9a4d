//! TrueType text rendering for map labels and legends.

use std::path::Path;

use image::{Rgba, RgbaImage};
use reception_common::{PixelPoint, ReceptionError, ReceptionResult};
use rusttype::{point, Font, Scale};
use serde::{Deserialize, Serialize};

use crate::canvas::alpha_over;

/// Glyph hinting mode.
///
/// rusttype rasterizes outlines without hinting instructions; `Full`
/// approximates hinting by snapping the pixel size to a whole number of
/// pixels so stems land on the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hinting {
    #[default]
    None,
    Full,
}

/// Text rendering parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSettings {
    /// Output resolution in dots per inch
    #[serde(default = "default_dpi")]
    pub dpi: f32,
    /// Font size in points
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default)]
    pub hinting: Hinting,
    /// Line spacing as a multiple of the font size
    #[serde(default = "default_line_spacing")]
    pub line_spacing: f32,
}

fn default_dpi() -> f32 {
    72.0
}

fn default_size() -> f32 {
    12.0
}

fn default_line_spacing() -> f32 {
    1.5
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            dpi: default_dpi(),
            size: default_size(),
            hinting: Hinting::default(),
            line_spacing: default_line_spacing(),
        }
    }
}

impl FontSettings {
    /// Font size converted from points to pixels at the configured DPI.
    pub fn pixels_per_em(&self) -> f32 {
        self.size * self.dpi / 72.0
    }

    /// Distance between successive baselines, in pixels.
    pub fn line_height(&self) -> f32 {
        self.size * self.line_spacing * self.dpi / 72.0
    }
}

/// A parsed font together with the settings it is drawn with.
pub struct FontFace {
    font: Font<'static>,
    settings: FontSettings,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("glyphs", &self.font.glyph_count())
            .field("settings", &self.settings)
            .finish()
    }
}

impl FontFace {
    /// Read and parse a TrueType font file.
    pub fn load(path: &Path, settings: FontSettings) -> ReceptionResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            ReceptionError::Font(format!("can't open font file {}: {}", path.display(), e))
        })?;

        let face = Self::from_bytes(bytes, settings).map_err(|_| {
            ReceptionError::Font(format!("can't parse font file {}", path.display()))
        })?;

        tracing::debug!(
            path = %path.display(),
            size = settings.size,
            dpi = settings.dpi,
            hinting = ?settings.hinting,
            "Loaded font"
        );
        Ok(face)
    }

    pub fn from_bytes(bytes: Vec<u8>, settings: FontSettings) -> ReceptionResult<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| ReceptionError::Font("can't parse font data".to_string()))?;
        Ok(Self { font, settings })
    }

    pub fn settings(&self) -> &FontSettings {
        &self.settings
    }

    /// Rasterization scale after hinting.
    pub fn scale(&self) -> Scale {
        let px = self.settings.pixels_per_em();
        let px = match self.settings.hinting {
            Hinting::None => px,
            Hinting::Full => px.round().max(1.0),
        };
        Scale::uniform(px)
    }

    /// Draw `text` with its baseline starting at `baseline`.
    ///
    /// Glyph coverage becomes the alpha of `color`, blended over what is
    /// already in `image`, so edge pixels keep the colour's RGB. Glyphs
    /// falling outside the image are clipped.
    pub fn draw(&self, image: &mut RgbaImage, color: Rgba<u8>, baseline: PixelPoint, text: &str) {
        let scale = self.scale();
        let ascent = self.font.v_metrics(scale).ascent;
        let top = baseline.y - ascent.round() as i32;
        let (width, height) = (image.width() as i32, image.height() as i32);

        for glyph in self.font.layout(text, scale, point(0.0, ascent)) {
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };

            glyph.draw(|gx, gy, coverage| {
                let x = baseline.x + bounds.min.x + gx as i32;
                let y = top + bounds.min.y + gy as i32;
                if x < 0 || y < 0 || x >= width || y >= height {
                    return;
                }

                let alpha = (coverage.clamp(0.0, 1.0) * color[3] as f32).round() as u8;
                let src = Rgba([color[0], color[1], color[2], alpha]);
                alpha_over(image.get_pixel_mut(x as u32, y as u32), &src);
            });
        }
    }
}
