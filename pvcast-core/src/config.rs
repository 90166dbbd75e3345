use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{map::DEFAULT_CENTER, model::ParsedCoordinate};

/// Hosted weather service used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "https://weather-app-backend-xav1.onrender.com";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// backend_url = "http://localhost:8080"
/// timeout_secs = 5
///
/// [map_center]
/// latitude = 50.0647
/// longitude = 19.945
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Base URL of the weather service, without the `/api/...` path.
    pub backend_url: Option<String>,

    pub timeout_secs: Option<u64>,

    /// Where the map starts before any coordinate is selected.
    pub map_center: Option<ParsedCoordinate>,
}

impl Config {
    pub fn backend_url(&self) -> &str {
        self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn map_center(&self) -> ParsedCoordinate {
        self.map_center.unwrap_or(DEFAULT_CENTER)
    }

    /// Validate and store the backend base URL.
    pub fn set_backend_url(&mut self, url: &str) -> Result<()> {
        let trimmed = url.trim();
        let parsed = reqwest::Url::parse(trimmed)
            .with_context(|| format!("Invalid backend URL: {trimmed}"))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("Backend URL must use http or https, got '{}'", parsed.scheme());
        }

        self.backend_url = Some(trimmed.trim_end_matches('/').to_string());
        Ok(())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "pvcast", "pvcast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
