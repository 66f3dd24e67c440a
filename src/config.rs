//! Dashboard configuration.
//!
//! Settings come from an optional `launch_dashboard.toml` in the working
//! directory. Every field has a default, so a partial file is fine and a
//! missing file means "all defaults".

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::filter::PayloadRange;

/// File looked up in the working directory at startup.
pub const CONFIG_FILE_NAME: &str = "launch_dashboard.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Dataset loaded at startup.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Window title.
    #[serde(default = "default_title")]
    pub title: String,

    /// Entries of the launch site dropdown (after "All Sites").
    #[serde(default = "default_sites")]
    pub sites: Vec<String>,

    /// Payload range control.
    #[serde(default)]
    pub payload_slider: SliderConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            title: default_title(),
            sites: default_sites(),
            payload_slider: SliderConfig::default(),
        }
    }
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("spacex_launch_dash.csv")
}

fn default_title() -> String {
    "SpaceX Launch Records Dashboard".to_string()
}

fn default_sites() -> Vec<String> {
    ["CCAFS SLC-40", "CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Upper bound on the kg labels drawn under the payload handles.
pub const MAX_MARKS: usize = 101;

/// Bounds and step of the payload range handles, in kg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderConfig {
    #[serde(default)]
    pub min: f64,

    #[serde(default = "default_slider_max")]
    pub max: f64,

    #[serde(default = "default_slider_step")]
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: default_slider_max(),
            step: default_slider_step(),
        }
    }
}

fn default_slider_max() -> f64 {
    10000.0
}

fn default_slider_step() -> f64 {
    1000.0
}

impl SliderConfig {
    /// The full slider span, used when no dataset is loaded.
    pub fn full_range(&self) -> PayloadRange {
        PayloadRange::new(self.min, self.max)
    }

    /// Positions that get a "{n}kg" label under the handles.
    ///
    /// At most `MAX_MARKS` labels: a step too fine for that is widened to an
    /// integer multiple of itself.
    pub fn marks(&self) -> Vec<f64> {
        let span = self.max - self.min;
        if self.step.is_nan() || self.step <= 0.0 || span.is_nan() || span < 0.0 || span.is_infinite() {
            return vec![self.min];
        }
        let intervals = (span / self.step).floor();
        let stride = (intervals / (MAX_MARKS - 1) as f64).ceil().max(1.0);
        let step = self.step * stride;
        let n = (span / step).floor() as usize;
        (0..=n).map(|i| self.min + i as f64 * step).collect()
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            log::info!("Using config file {}", path.display());
            Self::load_from_file(path)
        } else {
            log::debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }
}
