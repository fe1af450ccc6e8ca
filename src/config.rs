use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::RegressionConfig;

/// Top-level configuration persisted as TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bookkeeping about the config file itself
    pub metadata: ConfigMetadata,

    /// Paths and per-exercise defaults
    pub settings: AppSettings,

    /// Progress trend fitting settings
    pub regression: RegressionConfig,

    /// History and chart display settings
    pub display: DisplaySettings,
}

/// Versioning and timestamps for the config file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Config schema version, bumped on incompatible changes
    pub version: String,

    /// When the file was first written
    pub created_at: DateTime<Utc>,

    /// When the file last changed
    pub updated_at: DateTime<Utc>,
}

/// Paths and per-exercise defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Directory holding the database and backups
    pub data_dir: PathBuf,

    /// Weight increment assigned to new exercises when none is given
    pub default_weight_step: f64,
}

/// History and chart display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Trailing sessions shown in history output and charts; 0 shows all.
    /// Display-only: the regression window is configured separately.
    pub view_window: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            settings: AppSettings::default(),
            regression: RegressionConfig::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            data_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".liftrs"),
            default_weight_step: 2.5,
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings { view_window: 0 }
    }
}

impl AppConfig {
    /// Read and parse a config file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content).context("config file is not valid TOML")?;

        Ok(config)
    }

    /// Write the config as pretty TOML, stamping `updated_at`
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self).context("failed to serialize config")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("failed to write config file {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Default location: `~/.liftrs/config.toml`
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".liftrs")
            .join("config.toml")
    }

    /// Load the default config file, or start from defaults when it is
    /// missing or unreadable
    pub fn load_or_default() -> Self {
        let path = Self::default_config_path();

        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    error = %err,
                    "no usable config file, using defaults"
                );
                Self::default()
            }
        }
    }

    /// Write to the default location
    pub fn save_default(&mut self) -> Result<()> {
        self.save_to_file(Self::default_config_path())
    }

    /// Where the SQLite database lives
    pub fn database_path(&self) -> PathBuf {
        self.settings.data_dir.join("liftrs.db")
    }

    /// Read a single setting by its dotted key
    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "regression.weighted" => Some(self.regression.weighted.to_string()),
            "regression.window" => Some(self.regression.window.to_string()),
            "regression.fit_to_last_session" => {
                Some(self.regression.fit_to_last_session.to_string())
            }
            "display.view_window" => Some(self.display.view_window.to_string()),
            "settings.data_dir" => Some(self.settings.data_dir.display().to_string()),
            "settings.default_weight_step" => Some(self.settings.default_weight_step.to_string()),
            _ => None,
        }
    }

    /// Update a single setting by its dotted key
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "regression.weighted" => {
                self.regression.weighted = parse_setting(key, value)?;
            }
            "regression.window" => {
                self.regression.window = parse_setting(key, value)?;
            }
            "regression.fit_to_last_session" => {
                self.regression.fit_to_last_session = parse_setting(key, value)?;
            }
            "display.view_window" => {
                self.display.view_window = parse_setting(key, value)?;
            }
            "settings.data_dir" => {
                self.settings.data_dir = PathBuf::from(value);
            }
            "settings.default_weight_step" => {
                let step: f64 = parse_setting(key, value)?;
                if !step.is_finite() || step <= 0.0 {
                    bail!("default_weight_step must be a positive number, got {}", value);
                }
                self.settings.default_weight_step = step;
            }
            _ => bail!("unknown config key: {}", key),
        }
        self.metadata.updated_at = Utc::now();
        Ok(())
    }

    /// All settable keys with their current values
    pub fn list_values(&self) -> Vec<(&'static str, String)> {
        [
            "regression.weighted",
            "regression.window",
            "regression.fit_to_last_session",
            "display.view_window",
            "settings.data_dir",
            "settings.default_weight_step",
        ]
        .iter()
        .map(|key| (*key, self.get_value(key).unwrap_or_default()))
        .collect()
    }
}

fn parse_setting<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| anyhow::anyhow!("invalid value for {}: {:?}", key, value))
}
