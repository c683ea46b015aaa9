//! Command line argument handling shared by the subcommands

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use keywaykit_camtools::{CutSide, KeywayParameters};
use keywaykit_core::{parse_count, parse_decimal};
use keywaykit_settings::Config;
use tracing::{debug, warn};

/// Job parameter flags; each one overrides the config's `job` section
///
/// Decimal values accept `.` or `,` as the separator.
#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Z before each stroke
    #[arg(long, value_parser = parse_decimal, allow_hyphen_values = true)]
    pub start_z: Option<f64>,
    /// Z at the end of each stroke
    #[arg(long, value_parser = parse_decimal, allow_hyphen_values = true)]
    pub final_depth_z: Option<f64>,
    /// Number of notches around the part
    #[arg(long, value_parser = parse_count)]
    pub notches: Option<u32>,
    /// Cutting feed rate (mm/min)
    #[arg(long, value_parser = parse_decimal)]
    pub feed_rate: Option<f64>,
    /// Radial advance per pass (mm)
    #[arg(long, value_parser = parse_decimal)]
    pub depth_per_pass: Option<f64>,
    /// Diameter where cutting starts (mm)
    #[arg(long, value_parser = parse_decimal)]
    pub initial_diameter: Option<f64>,
    /// Diameter where cutting ends (mm)
    #[arg(long, value_parser = parse_decimal)]
    pub final_diameter: Option<f64>,
    /// Cutter diameter (mm)
    #[arg(long, value_parser = parse_decimal)]
    pub tool_diameter: Option<f64>,
    /// Keyway width (mm)
    #[arg(long, value_parser = parse_decimal)]
    pub opening: Option<f64>,
    /// Retract side: positive or negative
    #[arg(long)]
    pub cut_side: Option<CutSide>,
    /// Enable taper compensation
    #[arg(long)]
    pub conical: bool,
    /// Taper angle in degrees
    #[arg(long, value_parser = parse_decimal, allow_hyphen_values = true)]
    pub conical_angle: Option<f64>,
    /// Lateral step as a percentage of the tool diameter
    #[arg(long, value_parser = parse_decimal)]
    pub lateral_step_percent: Option<f64>,
    /// Explicit lateral step (mm), replaces the percentage
    #[arg(long, value_parser = parse_decimal)]
    pub lateral_step: Option<f64>,
}

impl JobArgs {
    /// Job parameters from `config` with every given flag applied
    pub fn apply(&self, config: &Config) -> KeywayParameters {
        let mut config = config.clone();
        let params = &mut config.job;

        override_with(&mut params.start_z, self.start_z);
        override_with(&mut params.final_depth_z, self.final_depth_z);
        override_with(&mut params.notch_count, self.notches);
        override_with(&mut params.feed_rate, self.feed_rate);
        override_with(&mut params.depth_per_pass_y, self.depth_per_pass);
        override_with(&mut params.initial_diameter, self.initial_diameter);
        override_with(&mut params.final_diameter, self.final_diameter);
        override_with(&mut params.tool_diameter, self.tool_diameter);
        override_with(&mut params.keyway_opening, self.opening);
        override_with(&mut params.cut_side, self.cut_side);
        override_with(&mut params.conical_angle_deg, self.conical_angle);
        if self.conical {
            params.conical_enabled = true;
        }

        override_with(&mut config.lateral_step_percent, self.lateral_step_percent);
        if !(1.0..=100.0).contains(&config.lateral_step_percent) {
            warn!(
                "Lateral step percentage {} outside 1-100",
                config.lateral_step_percent
            );
        }

        let mut params = config.job_parameters();
        if self.lateral_step.is_some() {
            params.lateral_step_override = self.lateral_step;
        }

        debug!("Job parameters: {:?}", params);
        params
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

/// Load the config from `path`, or from the default location when it exists
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match Config::default_path() {
            Ok(default) => Config::load_or_default(&default)
                .with_context(|| format!("Failed to load config {}", default.display())),
            Err(e) => {
                debug!("{}, using defaults", e);
                Ok(Config::default())
            }
        },
    }
}
