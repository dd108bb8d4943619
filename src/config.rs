//! YAML configuration
//!
//! Every key is optional; missing keys take the built-in defaults.
//!
//! ```yaml
//! title: My Songs
//! output: songs.pdf
//! store-dir: /home/me/.kalimba
//! log-level: debug
//! layout:
//!   line-height: 8
//!   page-bottom: 270
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::KalimbaError;
use crate::export::{ExportOptions, PageLayout};

pub const DEFAULT_STORE_DIR: &str = ".kalimba";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RawConfig {
    pub title: Option<String>,
    pub output: Option<String>,
    pub store_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub layout: Option<PageLayout>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub export: ExportOptions,
    pub store_dir: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: ExportOptions::default(),
            store_dir: PathBuf::from(DEFAULT_STORE_DIR),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Config, KalimbaError> {
        // An empty file deserializes as null
        let raw: RawConfig = if content.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| KalimbaError::Config(e.to_string()))?
        };
        Config::from_raw(raw)
    }

    pub fn load(path: &Path) -> Result<Config, KalimbaError> {
        let content = fs::read_to_string(path).map_err(|e| {
            KalimbaError::Config(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Config::from_yaml(&content)
    }

    fn from_raw(raw: RawConfig) -> Result<Config, KalimbaError> {
        let defaults = Config::default();
        let layout = raw.layout.unwrap_or_default();

        if layout.line_height <= 0.0 {
            return Err(KalimbaError::Config(format!(
                "line-height must be positive, got {}",
                layout.line_height
            )));
        }
        if layout.page_top >= layout.page_bottom {
            return Err(KalimbaError::Config(format!(
                "page-top ({}) must be above page-bottom ({})",
                layout.page_top, layout.page_bottom
            )));
        }

        Ok(Config {
            export: ExportOptions {
                title: raw.title.unwrap_or(defaults.export.title),
                filename: raw.output.unwrap_or(defaults.export.filename),
                layout,
            },
            store_dir: raw.store_dir.unwrap_or(defaults.store_dir),
            log_level: raw.log_level.unwrap_or(defaults.log_level),
        })
    }
}
