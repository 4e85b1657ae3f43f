//! # Process configuration
//! Small TOML file + env overrides. Resolution order per field:
//! env var > config file > built-in default. A missing config file is not an
//! error (defaults apply); a present but broken file is.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const ENV_CONFIG_PATH: &str = "ATP_CONFIG_PATH";
pub const ENV_DATASET_PATH: &str = "ATP_DATASET_PATH";
pub const ENV_BIND: &str = "ATP_BIND";
pub const ENV_TITLE: &str = "ATP_TITLE";

pub const DEFAULT_CONFIG_PATH: &str = "config/app.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Plan title surfaced to the UI.
    #[serde(default = "default_title")]
    pub title: String,
    /// Base network GeoJSON file.
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,
    /// Directory served as the static UI.
    #[serde(default = "default_ui_dir")]
    pub ui_dir: PathBuf,
    /// Listen address, `host:port`.
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_title() -> String {
    "West Valley Active Transportation Plan".to_string()
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("data/network.geojson")
}

fn default_ui_dir() -> PathBuf {
    PathBuf::from("ui")
}

fn default_bind() -> String {
    "127.0.0.1:5000".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            dataset_path: default_dataset_path(),
            ui_dir: default_ui_dir(),
            bind: default_bind(),
        }
    }
}

impl AppConfig {
    /// Load from ATP_CONFIG_PATH or "config/app.toml", then apply env
    /// overrides.
    pub fn load() -> Result<Self> {
        let path = env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading config at {}", path.display()))?;
            Self::from_toml_str(&content)
                .with_context(|| format!("parsing config at {}", path.display()))?
        } else {
            Self::default()
        };

        cfg.apply_env();
        Ok(cfg)
    }

    /// Load from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    fn apply_env(&mut self) {
        if let Ok(v) = env::var(ENV_DATASET_PATH) {
            if !v.trim().is_empty() {
                self.dataset_path = PathBuf::from(v);
            }
        }
        if let Ok(v) = env::var(ENV_BIND) {
            if !v.trim().is_empty() {
                self.bind = v;
            }
        }
        if let Ok(v) = env::var(ENV_TITLE) {
            if !v.trim().is_empty() {
                self.title = v;
            }
        }
    }
}
