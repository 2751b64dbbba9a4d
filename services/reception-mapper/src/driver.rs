//! Map generation driver.
//!
//! For each selected transmitter the generator resets the shared canvas,
//! plots every receiver that reported it, plots the transmitter itself on
//! top, writes the legend, merges the text layer, and saves the result as a
//! PNG file. Maps are produced one at a time on a single canvas.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use indicatif::{ProgressBar, ProgressStyle};
use reception_common::{
    CallSignFilter, MapMode, Operator, OperatorCatalog, ReceptionError, ReceptionResult,
    ReportMatrix,
};
use renderer::{label_anchor, load_base_map, Canvas, FontFace, IconCatalog, LegendWriter};
use tracing::{debug, info};

use crate::config::MapperConfig;

/// Decoded images and font shared by every map in a run.
#[derive(Debug)]
pub struct MapAssets {
    pub base_map: RgbaImage,
    pub icons: IconCatalog,
    pub font: FontFace,
}

impl MapAssets {
    pub fn load(config: &MapperConfig) -> ReceptionResult<Self> {
        let icons = IconCatalog::load(&config.icons.directory, config.icons.size)?;
        let base_map = load_base_map(&config.map.file)?;
        let font = FontFace::load(&config.font.file, config.font.settings)?;

        Ok(Self {
            base_map,
            icons,
            font,
        })
    }
}

/// Settings that shape each map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub mode: MapMode,
    pub frequency: String,
    pub output_directory: PathBuf,
    pub transmitter_icon: String,
    pub no_report_icon: Option<String>,
    /// Draw a progress bar on stderr while maps are written
    pub show_progress: bool,
}

impl MapOptions {
    pub fn from_config(config: &MapperConfig) -> Self {
        Self {
            mode: config.map_mode(),
            frequency: config.data.frequency.clone(),
            output_directory: config.data.output_directory.clone(),
            transmitter_icon: config.icons.transmitter_icon.clone(),
            no_report_icon: config.icons.no_report_icon.clone(),
            show_progress: false,
        }
    }
}

/// What was drawn on one map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapContents {
    pub transmitter: String,
    pub receivers_plotted: Vec<String>,
    /// False when the transmitter is missing from the operator file
    pub transmitter_plotted: bool,
    pub legend: Vec<String>,
}

/// A map written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMap {
    pub path: PathBuf,
    pub contents: MapContents,
}

/// Outcome of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub maps: Vec<RenderedMap>,
    /// Requested call signs that had no reports
    pub skipped: Vec<String>,
}

impl GenerationSummary {
    pub fn maps_written(&self) -> usize {
        self.maps.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.maps.iter().map(|map| map.path.as_path())
    }
}

/// Draws and writes reception maps.
pub struct MapGenerator {
    canvas: Canvas,
    icons: IconCatalog,
    font: FontFace,
    transmitter_icon: RgbaImage,
    options: MapOptions,
}

impl MapGenerator {
    /// Build a generator, checking that the configured icons exist.
    pub fn new(assets: MapAssets, options: MapOptions) -> ReceptionResult<Self> {
        let MapAssets {
            base_map,
            icons,
            font,
        } = assets;

        let transmitter_icon = icons
            .get(&options.transmitter_icon)
            .cloned()
            .ok_or_else(|| missing_icon(&icons, &options.transmitter_icon))?;

        if let Some(name) = &options.no_report_icon {
            if !icons.contains(name) {
                return Err(missing_icon(&icons, name));
            }
        }

        Ok(Self {
            canvas: Canvas::new(base_map),
            icons,
            font,
            transmitter_icon,
            options,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Draw the map for one transmitter onto the canvas.
    ///
    /// The canvas is reset first and finalized last; the finished raster is
    /// available from `canvas().output()` until the next call.
    pub fn render(
        &mut self,
        transmitter: &str,
        operators: &OperatorCatalog,
        reports: &ReportMatrix,
    ) -> MapContents {
        self.canvas.reset();

        let operator = operators.get(transmitter);
        let mut receivers_plotted = Vec::new();
        for receiver in reports.receivers() {
            if receiver == transmitter {
                continue;
            }

            let category = match (reports.category(transmitter, receiver), &self.options.no_report_icon) {
                (Some(category), _) => category,
                (None, Some(no_report)) => no_report.as_str(),
                (None, None) => continue,
            };

            let Some(icon) = self.icons.get(category) else {
                debug!(transmitter, receiver, category, "No icon for category");
                continue;
            };

            let Some(receiving) = operators.get(receiver) else {
                info!(transmitter, receiver, "Skipping icon for missing operator");
                continue;
            };

            // A suffixed call can resolve to the transmitter's own station
            if operator.is_some_and(|op| op.call_sign == receiving.call_sign) {
                debug!(transmitter, receiver, "Skipping receiver at transmitter's station");
                continue;
            }

            plot_operator(&mut self.canvas, &self.font, icon, receiving);
            receivers_plotted.push(receiver.to_string());
        }

        // Last, so no receiver icon covers it
        match operator {
            Some(op) => plot_operator(&mut self.canvas, &self.font, &self.transmitter_icon, op),
            None => info!(transmitter, "Skipping icon for missing operator"),
        }

        let title = self.options.mode.legend_title(transmitter);
        let mut legend = LegendWriter::new(&mut self.canvas, &self.font);
        legend.write_legend(&title, &self.options.frequency, operator);
        let legend = legend.into_lines();

        self.canvas.finalize();

        MapContents {
            transmitter: transmitter.to_string(),
            receivers_plotted,
            transmitter_plotted: operator.is_some(),
            legend,
        }
    }

    /// Where the map for `transmitter` is written.
    pub fn output_path(&self, transmitter: &str) -> PathBuf {
        self.options
            .output_directory
            .join(self.options.mode.file_name(transmitter))
    }

    /// Render and save one map per selected transmitter.
    pub fn generate(
        &mut self,
        operators: &OperatorCatalog,
        reports: &ReportMatrix,
        filter: &CallSignFilter,
    ) -> ReceptionResult<GenerationSummary> {
        let selection = reports.select_transmitters(filter);
        let total = selection.selected.len();

        let dir = &self.options.output_directory;
        std::fs::create_dir_all(dir).map_err(|e| ReceptionError::output(dir, e))?;

        info!(maps = total, mode = ?self.options.mode, "Beginning map generation");

        let mut summary = GenerationSummary {
            maps: Vec::with_capacity(total),
            skipped: selection.skipped,
        };

        let progress = self.progress_bar(total as u64);
        for (index, transmitter) in selection.selected.iter().enumerate() {
            progress.set_message(transmitter.clone());

            let contents = self.render(transmitter, operators, reports);
            let path = self.output_path(transmitter);
            if let Err(e) = self.canvas.save_png(&path) {
                progress.abandon();
                return Err(e);
            }

            progress.suspend(|| {
                info!(
                    index = index + 1,
                    total,
                    transmitter = %transmitter,
                    receivers = contents.receivers_plotted.len(),
                    path = %path.display(),
                    "Wrote map"
                )
            });
            progress.inc(1);
            summary.maps.push(RenderedMap { path, contents });
        }
        progress.finish_and_clear();

        info!(
            written = summary.maps_written(),
            skipped = summary.skipped.len(),
            "Map generation completed"
        );
        Ok(summary)
    }

    fn progress_bar(&self, total: u64) -> ProgressBar {
        if !self.options.show_progress {
            return ProgressBar::hidden();
        }

        let bar = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} maps {msg}")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        bar
    }
}

/// Icon centred on the operator with the call sign to its right.
fn plot_operator(canvas: &mut Canvas, font: &FontFace, icon: &RgbaImage, operator: &Operator) {
    canvas.blit_icon(icon, operator.pixel);
    let anchor = label_anchor(operator.pixel, icon, font);
    canvas.draw_text(font, &operator.call_sign, anchor);
}

fn missing_icon(icons: &IconCatalog, name: &str) -> ReceptionError {
    ReceptionError::Asset {
        path: name.to_string(),
        message: format!(
            "no icon named '{}' in icon directory (available: {})",
            name,
            icons.categories().join(", ")
        ),
    }
}
