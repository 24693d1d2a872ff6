use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fmt, fs, path::PathBuf};

use crate::error::ForecastError;
use crate::model::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://dataservice.accuweather.com";

pub const LOCATION_KEY_VAR: &str = "ACCUWEATHER_LOCATION_KEY";
pub const API_KEY_VAR: &str = "ACCUWEATHER_API_KEY";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// location_key = "349727"
/// api_key = "..."
/// metric = false
/// ```
#[derive(Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub location_key: Option<String>,
    pub api_key: Option<String>,

    /// Overrides the AccuWeather host, e.g. for a local mock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request metric units instead of imperial.
    #[serde(default)]
    pub metric: bool,

    /// Contact line shown on the contact page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

// The API key stays out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("location_key", &self.location_key)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("metric", &self.metric)
            .field("contact", &self.contact)
            .finish()
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
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
        let dirs = ProjectDirs::from("dev", "forecast-page", "forecast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `ACCUWEATHER_LOCATION_KEY` / `ACCUWEATHER_API_KEY` from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| env::var(name).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(LOCATION_KEY_VAR).filter(|v| !v.is_empty()) {
            self.location_key = Some(key);
        }
        if let Some(key) = lookup(API_KEY_VAR).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn set_credentials(&mut self, location_key: String, api_key: String) {
        self.location_key = Some(location_key);
        self.api_key = Some(api_key);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Validated credentials; fails when either value is absent or empty.
    pub fn credentials(&self) -> Result<Credentials, ForecastError> {
        Credentials::new(
            self.location_key.clone().unwrap_or_default(),
            self.api_key.clone().unwrap_or_default(),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}
