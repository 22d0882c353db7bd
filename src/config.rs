use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{MinefieldError, Result};

pub const DEFAULT_CONFIG_PATH: &str = "minefield.json";

/// Startup settings, read from JSON. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub width: u32,
    pub height: u32,
    pub cols: usize,
    pub rows: usize,
    pub origin: [f64; 2],
    pub zoom: f64,
    pub zoom_step: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub asset_dir: PathBuf,
    /// Edge length for generated sprites when `asset_dir` is missing.
    pub placeholder_edge: u32,
    pub background: [u8; 4],
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            cols: 10,
            rows: 10,
            origin: [0.0, 0.0],
            zoom: 1.0,
            zoom_step: 0.1,
            zoom_min: 0.5,
            zoom_max: 5.0,
            asset_dir: PathBuf::from("assets/single-files"),
            placeholder_edge: 16,
            background: [32, 32, 32, 255],
        }
    }
}

impl Config {
    pub fn from_json(text: &str, path: &Path) -> Result<Self> {
        let config: Config =
            serde_json::from_str(text).map_err(|source| MinefieldError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, or returns the defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loading configuration from {}", path.display());
                Self::from_json(&text, path)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.zoom_min < self.zoom && self.zoom < self.zoom_max) {
            return Err(MinefieldError::ConfigValue(format!(
                "zoom {} must lie strictly between {} and {}",
                self.zoom, self.zoom_min, self.zoom_max
            )));
        }
        if self.zoom_min <= 0.0 {
            return Err(MinefieldError::ConfigValue(format!(
                "zoom_min must be positive, got {}",
                self.zoom_min
            )));
        }
        if self.cols == 0 || self.rows == 0 {
            return Err(MinefieldError::ConfigValue(format!(
                "field must have at least one cell, got {}x{}",
                self.cols, self.rows
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MinefieldError::ConfigValue(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
