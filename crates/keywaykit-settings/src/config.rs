//! Configuration file handling
//!
//! A single file (TOML or JSON, chosen by extension) holds the default job,
//! the lateral step percentage, output location and playback speed.

use std::path::{Path, PathBuf};

use keywaykit_camtools::KeywayParameters;
use keywaykit_visualizer::visualizer::{MAX_SPEED, MIN_SPEED};
use keywaykit_visualizer::DEFAULT_PROGRAM_NAME;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Directory under the platform config dir
pub const CONFIG_DIR_NAME: &str = "keywaykit";
/// File name of the default config
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Where generated programs go
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// File name used by `generate` when none is given
    pub file_name: String,
    /// Directory relative names are resolved against
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_PROGRAM_NAME.to_string(),
            directory: PathBuf::from("."),
        }
    }
}

/// Simulation playback preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Speed multiplier
    pub speed: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self { speed: 1.0 }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lateral step as a percentage of the tool diameter (1-100)
    pub lateral_step_percent: f64,
    /// Default job parameters
    pub job: KeywayParameters,
    pub output: OutputSettings,
    pub playback: PlaybackSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lateral_step_percent: 100.0,
            job: KeywayParameters::default(),
            output: OutputSettings::default(),
            playback: PlaybackSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl Config {
    /// `<config_dir>/keywaykit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::LoadError(format!("{}: {}", path.display(), e)))?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` when it exists, otherwise the defaults
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = ConfigFormat::from_path(path)?;

        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if !(1.0..=100.0).contains(&self.lateral_step_percent) {
            return Err(ConfigError::ValueOutOfRange {
                key: "lateral_step_percent".to_string(),
                value: self.lateral_step_percent.to_string(),
            }
            .into());
        }

        if !(MIN_SPEED..=MAX_SPEED).contains(&self.playback.speed) {
            return Err(ConfigError::ValueOutOfRange {
                key: "playback.speed".to_string(),
                value: self.playback.speed.to_string(),
            }
            .into());
        }

        if self.output.file_name.trim().is_empty() {
            return Err(ConfigError::EmptyValue("output.file_name".to_string()).into());
        }

        self.job.validate()?;
        Ok(())
    }

    /// Job parameters with the lateral step percentage applied, unless the
    /// job already names a lateral step
    pub fn job_parameters(&self) -> KeywayParameters {
        self.job
            .clone()
            .with_lateral_step_percent(self.lateral_step_percent)
    }
}
