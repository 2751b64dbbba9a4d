//! Reception map generator.
//!
//! Draws one PNG map per transmitting station from an operator file and a
//! reception report file, using the settings in `config/reception.yaml`.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use reception_mapper::{ConfigOverrides, MapperConfig};

#[derive(Parser, Debug)]
#[command(name = "reception-mapper")]
#[command(about = "Generate radio reception quality maps")]
struct Args {
    /// Configuration file
    #[arg(long, env = "RECEPTION_CONFIG", default_value = "config/reception.yaml")]
    config: PathBuf,

    /// File containing operator information
    #[arg(long)]
    operators: Option<PathBuf>,

    /// File containing reception reports to be mapped
    #[arg(long)]
    reports: Option<PathBuf>,

    /// Call signs to create maps for, or "all"
    #[arg(long)]
    calls: Option<String>,

    /// Frequency the reception was tested at
    #[arg(long)]
    freq: Option<String>,

    /// Generate receive maps instead of transmit maps
    #[arg(long)]
    receive: bool,

    /// Directory maps are written into
    #[arg(long, env = "RECEPTION_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            operator_file: self.operators.clone(),
            report_file: self.reports.clone(),
            output_directory: self.output_dir.clone(),
            call_signs: self.calls.clone(),
            frequency: self.freq.clone(),
            receive_map: self.receive,
        }
    }
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    let builder = fmt().with_env_filter(filter).with_target(false);
    if args.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args);

    let mut config = MapperConfig::load(&args.config)?;
    config.apply_overrides(&args.overrides());

    info!(
        config = %args.config.display(),
        operators = %config.data.operator_file.display(),
        reports = %config.data.report_file.display(),
        calls = %config.data.call_signs,
        mode = ?config.map_mode(),
        "Starting reception map generation"
    );

    // Bar and JSON log lines would interleave on a terminal
    let show_progress = !args.log_json && std::io::stderr().is_terminal();
    let summary =
        reception_mapper::run(&config, show_progress).context("Map generation failed")?;

    for call in &summary.skipped {
        info!(call_sign = %call, "No map generated");
    }
    for path in summary.paths() {
        println!("{}", path.display());
    }

    Ok(())
}
