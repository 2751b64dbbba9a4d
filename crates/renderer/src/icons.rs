//! Icon sprites keyed by reception category.
//!
//! Every image in the icon directory becomes one category, named after the
//! file without its extension (`good.png` → `good`). Icons are resized once
//! at load time so plotting is a plain blit.

use std::collections::HashMap;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use reception_common::{ReceptionError, ReceptionResult};

/// Resize an image to `width` pixels wide, keeping its aspect ratio.
///
/// Uses bilinear (triangle) filtering.
pub fn resize_to_width(image: &RgbaImage, width: u32) -> RgbaImage {
    if image.width() == width || image.width() == 0 {
        return image.clone();
    }

    let height = ((image.height() as u64 * width as u64 + image.width() as u64 / 2)
        / image.width() as u64)
        .max(1) as u32;
    imageops::resize(image, width, height, FilterType::Triangle)
}

/// Read-only mapping from category name to a pre-sized icon.
#[derive(Debug, Clone)]
pub struct IconCatalog {
    icons: HashMap<String, RgbaImage>,
    icon_width: u32,
}

impl IconCatalog {
    /// Create an empty catalog whose icons will be `icon_width` pixels wide.
    pub fn new(icon_width: u32) -> ReceptionResult<Self> {
        if icon_width == 0 {
            return Err(ReceptionError::invalid_config(
                "icons.size",
                "icon width must be at least 1 pixel",
            ));
        }

        Ok(Self {
            icons: HashMap::new(),
            icon_width,
        })
    }

    /// Load every image file in `dir`.
    ///
    /// Files whose extension is not a known image format are skipped. A file
    /// that looks like an image but cannot be decoded is an asset error.
    pub fn load(dir: &Path, icon_width: u32) -> ReceptionResult<Self> {
        let mut catalog = Self::new(icon_width)?;

        let entries = std::fs::read_dir(dir)
            .map_err(|e| ReceptionError::asset(dir, format!("can't read icon directory: {}", e)))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ReceptionError::asset(dir, e))?;
            let path = entry.path();
            if path.is_file() {
                paths.push(path);
            }
        }
        paths.sort();

        for path in paths {
            if ImageFormat::from_path(&path).is_err() {
                tracing::warn!(path = %path.display(), "Skipping non-image file in icon directory");
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                tracing::warn!(path = %path.display(), "Skipping icon with non UTF-8 name");
                continue;
            };

            let icon = image::open(&path)
                .map_err(|e| ReceptionError::asset(&path, format!("can't decode icon: {}", e)))?
                .to_rgba8();

            catalog.insert(name, &icon);
        }

        tracing::info!(
            directory = %dir.display(),
            count = catalog.len(),
            icon_width,
            "Loaded icons"
        );
        Ok(catalog)
    }

    /// Add or replace an icon, resizing it to the catalog width.
    pub fn insert(&mut self, category: &str, icon: &RgbaImage) {
        let resized = resize_to_width(icon, self.icon_width);
        if self.icons.insert(category.to_string(), resized).is_some() {
            tracing::debug!(category, "Replaced icon");
        }
    }

    /// Icon for a category, if the catalog has one.
    pub fn get(&self, category: &str) -> Option<&RgbaImage> {
        self.icons.get(category)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.icons.contains_key(category)
    }

    /// Category names in sorted order.
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.icons.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}
