//! Reception map generation.
//!
//! Reads operator locations and who-heard-whom reports, then draws one map
//! per transmitting station showing where it was heard and how well (or,
//! in receive mode, who that station heard).

pub mod config;
pub mod data;
pub mod driver;

use projection::Projector;
use reception_common::ReceptionResult;
use tracing::info;

pub use config::{ConfigOverrides, MapperConfig};
pub use data::{load_operators, load_reports, read_operators, read_reports};
pub use driver::{GenerationSummary, MapAssets, MapContents, MapGenerator, MapOptions, RenderedMap};

/// Load every input named by `config` and write its maps.
///
/// `show_progress` draws a progress bar on stderr while maps are written.
pub fn run(config: &MapperConfig, show_progress: bool) -> ReceptionResult<GenerationSummary> {
    config.validate()?;

    let assets = MapAssets::load(config)?;
    let projector = Projector::new(
        &config.bounds()?,
        assets.base_map.width(),
        assets.base_map.height(),
    )?;

    let mode = config.map_mode();
    let operators = load_operators(&config.data.operator_file, &projector, config.data.call_sign_match)?;
    let reports = load_reports(&config.data.report_file, mode)?;
    info!(
        operators = operators.len(),
        transmitters = reports.transmitters().count(),
        zone = projector.zone(),
        "Loaded run data"
    );

    let options = MapOptions {
        show_progress,
        ..MapOptions::from_config(config)
    };
    let mut generator = MapGenerator::new(assets, options)?;
    generator.generate(&operators, &reports, &config.call_sign_filter())
}
