//! Run configuration for the analysis pipeline.
//!
//! Everything a run needs (input files, phases of interest, how groups are
//! drawn) is described by an [`AnalysisConfig`], usually loaded from a JSON file.

use crate::api::enums::error_bar::ErrorBar;
use crate::api::enums::performance_measure::PerformanceMeasure;
use crate::api::errors::{AnalysisError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Colour of the series drawn when no groups are configured.
pub const DEFAULT_SERIES_COLOR: &str = "#0000ff";

const DEFAULT_CAGES: u32 = 2;
const DEFAULT_CORNERS: u32 = 4;

/// Describes a single analysis run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisConfig {
    /// Dataset file, `.json` or `.json.zst`.
    pub dataset_path: PathBuf,

    /// Timeline INI file.
    pub timeline_path: PathBuf,

    /// Phases of interest, in the order they are plotted.
    pub phase_names: Vec<String>,

    /// Groups drawn as separate series. Empty draws all subjects as one series.
    #[serde(default)]
    pub groups: Vec<String>,

    /// `#rrggbb` colour of each group's series.
    #[serde(default)]
    pub group_colors: BTreeMap<String, String>,

    #[serde(default)]
    pub measure: PerformanceMeasure,

    #[serde(default)]
    pub error_bar: ErrorBar,

    #[serde(default)]
    pub title: Option<String>,

    /// Phase whose visits feed the intervisit interval histograms.
    #[serde(default)]
    pub histogram_phase: Option<String>,

    #[serde(default = "default_cages")]
    pub cages: u32,

    #[serde(default = "default_corners")]
    pub corners: u32,

    /// Subject whose first nosepoke sides are counted.
    #[serde(default)]
    pub side_count_subject: Option<String>,
}

fn default_cages() -> u32 {
    DEFAULT_CAGES
}

fn default_corners() -> u32 {
    DEFAULT_CORNERS
}

impl AnalysisConfig {
    /// Loads and validates a configuration file.
    ///
    /// Relative dataset and timeline paths are resolved against the
    /// directory containing the configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut config: AnalysisConfig = serde_json::from_reader(reader)?;

        if let Some(base_dir) = path.parent() {
            config.resolve_paths(base_dir);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn resolve_paths(&mut self, base_dir: &Path) {
        if self.dataset_path.is_relative() {
            self.dataset_path = base_dir.join(&self.dataset_path);
        }

        if self.timeline_path.is_relative() {
            self.timeline_path = base_dir.join(&self.timeline_path);
        }
    }

    /// Fails fast on settings that would only surface midway through a run.
    pub fn validate(&self) -> Result<()> {
        if self.phase_names.is_empty() {
            return Err(AnalysisError::Configuration(
                "phase_names must not be empty".to_string(),
            ));
        }

        if self.cages == 0 || self.corners == 0 {
            return Err(AnalysisError::Configuration(format!(
                "cages and corners must be positive, got {} cages and {} corners",
                self.cages, self.corners
            )));
        }

        for group in &self.groups {
            self.group_color(group)?;
        }

        for color in self.group_colors.values() {
            parse_hex_color(color)?;
        }

        Ok(())
    }

    /// The colour of a configured group's series.
    pub fn group_color(&self, group: &str) -> Result<(u8, u8, u8)> {
        let color = self.group_colors.get(group).ok_or_else(|| {
            AnalysisError::Configuration(format!("No colour configured for group '{}'", group))
        })?;

        parse_hex_color(color)
    }
}

/// Parses a `#rrggbb` colour.
pub fn parse_hex_color(text: &str) -> Result<(u8, u8, u8)> {
    let invalid = || AnalysisError::Configuration(format!("Invalid colour '{}'", text));

    let hex = text.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: core::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
    };

    Ok((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
