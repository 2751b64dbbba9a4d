//! Configuration loading for map generation runs.
//!
//! Loads a `MapperConfig` from a YAML file (usually `config/reception.yaml`).
//! Command-line flags can then override the data section for a single run.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use reception_common::{
    CallSignFilter, CallSignMatch, GeoCoordinate, MapMode, ProjectedBounds, ReceptionError,
    ReceptionResult,
};
use renderer::FontSettings;
use serde::Deserialize;
use tracing::debug;

/// Root configuration for a run.
#[derive(Debug, Clone, Deserialize)]
pub struct MapperConfig {
    pub data: DataConfig,
    pub icons: IconConfig,
    pub map: MapConfig,
    pub font: FontConfig,
}

/// Input files, output location, and what to draw.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub operator_file: PathBuf,
    pub report_file: PathBuf,
    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,
    /// `ALL` or a comma-separated list of call signs
    #[serde(default = "default_call_signs")]
    pub call_signs: String,
    /// Shown in the legend; omitted when empty
    #[serde(default)]
    pub frequency: String,
    #[serde(default)]
    pub receive_map: bool,
    #[serde(default)]
    pub call_sign_match: CallSignMatch,
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_call_signs() -> String {
    "ALL".to_string()
}

/// Icon set settings.
#[derive(Debug, Clone, Deserialize)]
pub struct IconConfig {
    pub directory: PathBuf,
    /// Width in pixels every icon is resized to
    #[serde(default = "default_icon_size")]
    pub size: u32,
    #[serde(default = "default_transmitter_icon")]
    pub transmitter_icon: String,
    /// Icon for receivers with no report; when unset they are not drawn
    #[serde(default)]
    pub no_report_icon: Option<String>,
}

fn default_icon_size() -> u32 {
    32
}

fn default_transmitter_icon() -> String {
    "transmitter".to_string()
}

/// Base map image and the coordinates of its corners.
#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    pub file: PathBuf,
    pub nw_corner: GeoCoordinate,
    pub se_corner: GeoCoordinate,
}

/// Font file plus rendering settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    pub file: PathBuf,
    #[serde(flatten)]
    pub settings: FontSettings,
}

/// Per-run values taken from the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub operator_file: Option<PathBuf>,
    pub report_file: Option<PathBuf>,
    pub output_directory: Option<PathBuf>,
    pub call_signs: Option<String>,
    pub frequency: Option<String>,
    /// Only ever switches receive maps on
    pub receive_map: bool,
}

impl MapperConfig {
    /// Load a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "Loaded mapper config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> ReceptionResult<Self> {
        serde_yaml::from_str(content).map_err(|e| ReceptionError::invalid_config("yaml", e.to_string()))
    }

    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(path) = &overrides.operator_file {
            self.data.operator_file = path.clone();
        }
        if let Some(path) = &overrides.report_file {
            self.data.report_file = path.clone();
        }
        if let Some(dir) = &overrides.output_directory {
            self.data.output_directory = dir.clone();
        }
        if let Some(calls) = &overrides.call_signs {
            self.data.call_signs = calls.clone();
        }
        if let Some(frequency) = &overrides.frequency {
            self.data.frequency = frequency.clone();
        }
        if overrides.receive_map {
            self.data.receive_map = true;
        }
    }

    /// Check value ranges that deserialization alone can't.
    pub fn validate(&self) -> ReceptionResult<()> {
        if self.icons.size == 0 {
            return Err(ReceptionError::invalid_config("icons.size", "must be at least 1 pixel"));
        }
        if self.icons.transmitter_icon.trim().is_empty() {
            return Err(ReceptionError::invalid_config(
                "icons.transmitter_icon",
                "must name an icon",
            ));
        }

        let font = &self.font.settings;
        for (field, value) in [
            ("font.size", font.size),
            ("font.dpi", font.dpi),
            ("font.line_spacing", font.line_spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ReceptionError::invalid_config(
                    field,
                    format!("must be a positive number, got {}", value),
                ));
            }
        }

        self.bounds()?;
        Ok(())
    }

    pub fn bounds(&self) -> ReceptionResult<ProjectedBounds> {
        ProjectedBounds::new(self.map.nw_corner, self.map.se_corner)
    }

    pub fn map_mode(&self) -> MapMode {
        MapMode::from_receive_flag(self.data.receive_map)
    }

    pub fn call_sign_filter(&self) -> CallSignFilter {
        CallSignFilter::parse(&self.data.call_signs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Hinting;

    const MINIMAL: &str = r#"
data:
  operator_file: operators.csv
  report_file: reports.csv

icons:
  directory: icons

map:
  file: map.png
  nw_corner: [47.8, -122.6]
  se_corner: [47.4, -122.0]

font:
  file: font.ttf
"#;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = MapperConfig::from_yaml(MINIMAL).unwrap();

        assert_eq!(config.data.output_directory, PathBuf::from("."));
        assert_eq!(config.data.call_signs, "ALL");
        assert_eq!(config.data.frequency, "");
        assert!(!config.data.receive_map);
        assert_eq!(config.data.call_sign_match, CallSignMatch::BaseCall);
        assert_eq!(config.icons.size, 32);
        assert_eq!(config.icons.transmitter_icon, "transmitter");
        assert_eq!(config.icons.no_report_icon, None);
        assert_eq!(config.font.settings, FontSettings::default());
        assert_eq!(config.map.nw_corner, GeoCoordinate::new(47.8, -122.6));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r#"
data:
  operator_file: data/operators.csv
  report_file: data/reports.csv
  output_directory: out
  call_signs: "k7abc, w1aw"
  frequency: "146.520 MHz"
  receive_map: true
  call_sign_match: exact

icons:
  directory: icons
  size: 24
  transmitter_icon: tower
  no_report_icon: noreport

map:
  file: map.png
  nw_corner: [47.8, -122.6]
  se_corner: [47.4, -122.0]

font:
  file: fonts/DejaVuSans.ttf
  dpi: 96
  size: 10
  hinting: full
  line_spacing: 1.2
"#;

        let config = MapperConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.map_mode(), MapMode::Receive);
        assert_eq!(
            config.call_sign_filter(),
            CallSignFilter::Only(vec!["K7ABC".to_string(), "W1AW".to_string()])
        );
        assert_eq!(config.data.call_sign_match, CallSignMatch::Exact);
        assert_eq!(config.icons.no_report_icon.as_deref(), Some("noreport"));
        assert_eq!(config.font.settings.dpi, 96.0);
        assert_eq!(config.font.settings.hinting, Hinting::Full);
        assert_eq!(config.font.settings.line_spacing, 1.2);
    }

    #[test]
    fn test_overrides_replace_data_settings() {
        let mut config = MapperConfig::from_yaml(MINIMAL).unwrap();

        config.apply_overrides(&ConfigOverrides {
            report_file: Some(PathBuf::from("field-day.csv")),
            call_signs: Some("N0CALL".to_string()),
            frequency: Some("7.040 MHz".to_string()),
            receive_map: true,
            ..ConfigOverrides::default()
        });

        assert_eq!(config.data.operator_file, PathBuf::from("operators.csv"));
        assert_eq!(config.data.report_file, PathBuf::from("field-day.csv"));
        assert_eq!(config.data.frequency, "7.040 MHz");
        assert_eq!(config.map_mode(), MapMode::Receive);
    }

    #[test]
    fn test_receive_override_never_turns_receive_off() {
        let mut config = MapperConfig::from_yaml(MINIMAL).unwrap();
        config.data.receive_map = true;

        config.apply_overrides(&ConfigOverrides::default());

        assert!(config.data.receive_map);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = MapperConfig::from_yaml(MINIMAL).unwrap();
        config.font.settings.line_spacing = 0.0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("font.line_spacing"));

        let mut config = MapperConfig::from_yaml(MINIMAL).unwrap();
        config.icons.size = 0;
        assert!(config.validate().is_err());

        // Corners swapped
        let mut config = MapperConfig::from_yaml(MINIMAL).unwrap();
        std::mem::swap(&mut config.map.nw_corner, &mut config.map.se_corner);
        assert!(matches!(config.validate(), Err(ReceptionError::InvalidBounds(_))));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let config = MapperConfig::from_yaml(include_str!("../../../config/reception.yaml")).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.call_sign_filter(), CallSignFilter::All);
    }

    #[test]
    fn test_missing_required_section_is_error() {
        let yaml = "data:\n  operator_file: a.csv\n  report_file: b.csv\n";
        assert!(MapperConfig::from_yaml(yaml).is_err());
    }
}
