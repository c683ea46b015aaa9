//! KeywayKit Settings Crate
//!
//! Handles the configuration file: default job parameters, lateral step
//! percentage, output location and playback speed.

pub mod config;
pub mod error;

pub use config::{Config, OutputSettings, PlaybackSettings, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
