//! Layered map canvas.
//!
//! A canvas holds the base map, the output raster, and a transparent text
//! layer of the same size. Icons are composited straight onto the output;
//! labels and legend lines go onto the text layer, which is merged over the
//! output last so text is never hidden under an icon.

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use reception_common::{PixelPoint, ReceptionError, ReceptionResult};

use crate::font::FontFace;

/// Colour of all map text.
pub const TEXT_COLOR: Rgba<u8> = Rgba([0x10, 0x10, 0x10, 0xff]);

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Composite `src` over `dst` (non-premultiplied source-over).
#[inline]
pub fn alpha_over(dst: &mut Rgba<u8>, src: &Rgba<u8>) {
    let src_a = src[3] as u32;
    if src_a == 0 {
        return;
    }
    if src_a == 255 {
        *dst = *src;
        return;
    }

    let dst_a = dst[3] as u32;
    let dst_weight = dst_a * (255 - src_a);
    // Output alpha scaled by 255
    let out_a = src_a * 255 + dst_weight;

    for c in 0..3 {
        let value = (src[c] as u32 * src_a * 255 + dst[c] as u32 * dst_weight + out_a / 2) / out_a;
        dst[c] = value.min(255) as u8;
    }
    dst[3] = ((out_a + 127) / 255) as u8;
}

/// Composite `src` onto `dst` with its top-left corner at (`left`, `top`),
/// clipping to `dst`.
pub fn composite(dst: &mut RgbaImage, src: &RgbaImage, left: i32, top: i32) {
    let (dst_w, dst_h) = (dst.width() as i64, dst.height() as i64);

    let x_start = (-(left as i64)).max(0);
    let y_start = (-(top as i64)).max(0);
    let x_end = (src.width() as i64).min(dst_w - left as i64);
    let y_end = (src.height() as i64).min(dst_h - top as i64);

    for sy in y_start..y_end {
        for sx in x_start..x_end {
            let src_px = src.get_pixel(sx as u32, sy as u32);
            let dst_px = dst.get_pixel_mut((sx + left as i64) as u32, (sy + top as i64) as u32);
            alpha_over(dst_px, src_px);
        }
    }
}

/// Decode the base map image.
pub fn load_base_map(path: &Path) -> ReceptionResult<RgbaImage> {
    let map = image::open(path)
        .map_err(|e| ReceptionError::asset(path, format!("can't decode base map: {}", e)))?
        .to_rgba8();

    tracing::info!(
        path = %path.display(),
        width = map.width(),
        height = map.height(),
        "Loaded base map"
    );
    Ok(map)
}

/// Where an operator's label goes: to the right of its icon, with the
/// baseline half a line below the icon centre.
pub fn label_anchor(center: PixelPoint, icon: &RgbaImage, font: &FontFace) -> PixelPoint {
    let settings = font.settings();
    let dx = (icon.width() as i32 + settings.size as i32) / 2;
    let dy = (settings.pixels_per_em() / 2.0 + 0.5) as i32;
    center.offset(dx, dy)
}

/// Output raster plus text overlay for one map at a time.
#[derive(Debug, Clone)]
pub struct Canvas {
    base_map: RgbaImage,
    output: RgbaImage,
    text_layer: RgbaImage,
}

impl Canvas {
    pub fn new(base_map: RgbaImage) -> Self {
        let (width, height) = base_map.dimensions();
        Self {
            output: base_map.clone(),
            text_layer: RgbaImage::from_pixel(width, height, TRANSPARENT),
            base_map,
        }
    }

    pub fn width(&self) -> u32 {
        self.base_map.width()
    }

    pub fn height(&self) -> u32 {
        self.base_map.height()
    }

    /// Restore the output to the base map and clear the text layer.
    ///
    /// Must run before drawing each map; nothing from the previous map
    /// survives it.
    pub fn reset(&mut self) {
        self.output.copy_from_slice(&self.base_map);
        self.text_layer.fill(0);
    }

    /// Composite an icon centred on `center`.
    pub fn blit_icon(&mut self, icon: &RgbaImage, center: PixelPoint) {
        let left = center.x - (icon.width() / 2) as i32;
        let top = center.y - (icon.height() / 2) as i32;
        composite(&mut self.output, icon, left, top);
    }

    /// Draw text onto the text layer with its baseline at `anchor`.
    pub fn draw_text(&mut self, font: &FontFace, text: &str, anchor: PixelPoint) {
        font.draw(&mut self.text_layer, TEXT_COLOR, anchor, text);
    }

    /// Merge the text layer over the output.
    pub fn finalize(&mut self) {
        composite(&mut self.output, &self.text_layer, 0, 0);
    }

    pub fn base_map(&self) -> &RgbaImage {
        &self.base_map
    }

    pub fn output(&self) -> &RgbaImage {
        &self.output
    }

    pub fn text_layer(&self) -> &RgbaImage {
        &self.text_layer
    }

    /// Encode the output raster as a PNG file.
    pub fn save_png(&self, path: &Path) -> ReceptionResult<()> {
        self.output
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| ReceptionError::output(path, e))
    }
}
