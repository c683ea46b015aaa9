//! Keyway Generator
//!
//! Generates G-code for cutting keyway/notch features on cylindrical parts.
//! The tool strokes axially (Z) at a radial position (Y), steps radially one
//! depth-per-pass at a time from the initial to the final radius, widens the
//! cut with lateral (X) offsets when the opening is wider than the tool, and
//! repeats the whole sequence at each notch angle on the rotary (A) axis.
//!
//! Generation is a pure function of [`KeywayParameters`]: identical inputs
//! always produce byte-identical programs.

mod emitter;
mod geometry;
mod lateral;
mod radial;
mod summary;

pub use emitter::SAFE_Z;
pub use geometry::{KeywayGeometry, RETRACT_CLEARANCE};
pub use lateral::{LateralPlan, STEP_OVERLAP_FACTOR, TWO_PASS_RATIO};
pub use radial::RadialSchedule;
pub use summary::KeywaySummary;

use keywaykit_core::Command;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{CamToolResult, ParameterError, ParameterResult};
use emitter::ProgramEmitter;

/// Smallest radial step the 3-decimal coordinate grid can represent
pub const MIN_DEPTH_PER_PASS: f64 = 0.001;

/// Allowed distance of a depth per pass from the coordinate grid, in grid steps
const DEPTH_GRID_TOLERANCE: f64 = 1e-6;

/// Openings wider than this multiple of the tool use the lateral step percentage
pub const LATERAL_STEP_PERCENT_RATIO: f64 = 1.5;

/// Side the retract move is biased toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutSide {
    /// Retract below the cutting envelope
    #[default]
    Positive,
    /// Retract above the cutting envelope
    Negative,
}

impl fmt::Display for CutSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
        }
    }
}

impl FromStr for CutSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" | "pos" | "+" => Ok(Self::Positive),
            "negative" | "neg" | "-" => Ok(Self::Negative),
            _ => Err(format!("Unknown cut side: {}", s)),
        }
    }
}

/// Parameters for the Keyway CAMTool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywayParameters {
    /// Tool Z position before each stroke (mm)
    pub start_z: f64,
    /// Z at the end of a full-depth stroke (mm, may be negative)
    pub final_depth_z: f64,
    /// Number of notches evenly spaced around the part
    pub notch_count: u32,
    /// Feed rate for cutting strokes (mm/min)
    pub feed_rate: f64,
    /// Radial increment per pass (mm)
    pub depth_per_pass_y: f64,
    /// Diameter where cutting starts (mm)
    pub initial_diameter: f64,
    /// Diameter where cutting ends (mm)
    pub final_diameter: f64,
    /// Cutter diameter (mm)
    pub tool_diameter: f64,
    /// Total keyway width to clear (mm)
    pub keyway_opening: f64,
    #[serde(default)]
    pub cut_side: CutSide,
    #[serde(default)]
    pub conical_enabled: bool,
    /// Taper angle in degrees, used only when `conical_enabled`
    #[serde(default)]
    pub conical_angle_deg: f64,
    /// Nominal lateral step replacing the tool diameter (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lateral_step_override: Option<f64>,
}

impl Default for KeywayParameters {
    fn default() -> Self {
        Self {
            start_z: 5.0,
            final_depth_z: -5.0,
            notch_count: 4,
            feed_rate: 100.0,
            depth_per_pass_y: 1.0,
            initial_diameter: 30.0,
            final_diameter: 40.0,
            tool_diameter: 8.0,
            keyway_opening: 10.0,
            cut_side: CutSide::Positive,
            conical_enabled: false,
            conical_angle_deg: 5.0,
            lateral_step_override: None,
        }
    }
}

impl KeywayParameters {
    /// Check every precondition of the generator
    pub fn validate(&self) -> ParameterResult<()> {
        let reals = [
            ("start_z", self.start_z),
            ("final_depth_z", self.final_depth_z),
            ("feed_rate", self.feed_rate),
            ("depth_per_pass_y", self.depth_per_pass_y),
            ("initial_diameter", self.initial_diameter),
            ("final_diameter", self.final_diameter),
            ("tool_diameter", self.tool_diameter),
            ("keyway_opening", self.keyway_opening),
            ("conical_angle_deg", self.conical_angle_deg),
        ];
        for (name, value) in reals {
            if !value.is_finite() {
                return Err(ParameterError::NonFinite(name.to_string()));
            }
        }

        if self.notch_count == 0 {
            return Err(ParameterError::non_positive("notch_count", 0.0));
        }
        if self.feed_rate <= 0.0 {
            return Err(ParameterError::non_positive("feed_rate", self.feed_rate));
        }
        if self.depth_per_pass_y <= 0.0 {
            return Err(ParameterError::non_positive(
                "depth_per_pass_y",
                self.depth_per_pass_y,
            ));
        }
        if self.depth_per_pass_y < MIN_DEPTH_PER_PASS {
            return Err(ParameterError::InvalidValue {
                name: "depth_per_pass_y".to_string(),
                reason: format!("must be at least {}", MIN_DEPTH_PER_PASS),
            });
        }
        let steps = self.depth_per_pass_y / MIN_DEPTH_PER_PASS;
        if (steps - steps.round()).abs() > DEPTH_GRID_TOLERANCE {
            return Err(ParameterError::InvalidValue {
                name: "depth_per_pass_y".to_string(),
                reason: format!(
                    "must be a multiple of {} (got {})",
                    MIN_DEPTH_PER_PASS, self.depth_per_pass_y
                ),
            });
        }
        if self.initial_diameter <= 0.0 {
            return Err(ParameterError::non_positive(
                "initial_diameter",
                self.initial_diameter,
            ));
        }
        if self.final_diameter <= 0.0 {
            return Err(ParameterError::non_positive(
                "final_diameter",
                self.final_diameter,
            ));
        }
        if self.initial_diameter == self.final_diameter {
            return Err(ParameterError::EqualDiameters {
                diameter: self.initial_diameter,
            });
        }
        if self.tool_diameter <= 0.0 {
            return Err(ParameterError::non_positive(
                "tool_diameter",
                self.tool_diameter,
            ));
        }
        if self.keyway_opening < 0.0 {
            return Err(ParameterError::negative(
                "keyway_opening",
                self.keyway_opening,
            ));
        }
        if let Some(step) = self.lateral_step_override {
            if !step.is_finite() {
                return Err(ParameterError::NonFinite(
                    "lateral_step_override".to_string(),
                ));
            }
            if step <= 0.0 {
                return Err(ParameterError::non_positive("lateral_step_override", step));
            }
        }
        if self.conical_enabled && self.conical_angle_deg.abs() >= 90.0 {
            return Err(ParameterError::InvalidValue {
                name: "conical_angle_deg".to_string(),
                reason: "must be strictly between -90 and 90 degrees".to_string(),
            });
        }
        Ok(())
    }

    /// Derive the lateral step from a percentage of the tool diameter
    ///
    /// Only wide openings (more than 1.5x the tool) take a step override;
    /// narrower ones keep the default planning. An override that is already
    /// set is kept.
    pub fn with_lateral_step_percent(mut self, percent: f64) -> Self {
        if self.lateral_step_override.is_some() {
            return self;
        }
        self.lateral_step_override =
            if self.keyway_opening > self.tool_diameter * LATERAL_STEP_PERCENT_RATIO {
                Some(percent / 100.0 * self.tool_diameter)
            } else {
                None
            };
        self
    }
}

/// Generator for Keyway G-Code
#[derive(Debug, Clone)]
pub struct KeywayGenerator {
    params: KeywayParameters,
    geometry: KeywayGeometry,
    lateral: LateralPlan,
    radial: RadialSchedule,
}

impl KeywayGenerator {
    /// Validate the parameters and resolve the job geometry
    pub fn new(params: KeywayParameters) -> ParameterResult<Self> {
        params.validate()?;

        let geometry = KeywayGeometry::resolve(&params);
        let lateral = LateralPlan::plan(
            params.tool_diameter,
            params.keyway_opening,
            params.lateral_step_override,
        );
        let radial = RadialSchedule::plan(&geometry);
        debug!(
            "Keyway job: {} notches, {} radial passes, {} lateral passes",
            params.notch_count,
            radial.pass_count(),
            lateral.pass_count()
        );

        Ok(Self {
            params,
            geometry,
            lateral,
            radial,
        })
    }

    pub fn params(&self) -> &KeywayParameters {
        &self.params
    }

    pub fn geometry(&self) -> &KeywayGeometry {
        &self.geometry
    }

    pub fn lateral_plan(&self) -> &LateralPlan {
        &self.lateral
    }

    pub fn radial_schedule(&self) -> &RadialSchedule {
        &self.radial
    }

    /// Derived values for display
    pub fn summary(&self) -> KeywaySummary {
        KeywaySummary::new(
            &self.geometry,
            &self.lateral,
            &self.radial,
            self.params.notch_count,
        )
    }

    /// Generate the program as typed commands
    pub fn generate(&self) -> Vec<Command> {
        let commands =
            ProgramEmitter::new(&self.params, &self.geometry, &self.lateral, &self.radial).emit();
        debug!("Generated {} commands", commands.len());
        commands
    }

    /// Generate the program as one text line per command
    pub fn generate_lines(&self) -> Vec<String> {
        self.generate().iter().map(Command::to_string).collect()
    }

    /// Generate the program as newline-joined text
    pub fn to_gcode(&self) -> String {
        self.generate_lines().join("\n")
    }
}

/// Validate `params` and generate the program lines in one call
pub fn generate_gcode(params: &KeywayParameters) -> CamToolResult<Vec<String>> {
    let generator = KeywayGenerator::new(params.clone())?;
    Ok(generator.generate_lines())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_job() {
        let p = KeywayParameters::default();
        assert_eq!(p.initial_diameter, 30.0);
        assert_eq!(p.final_diameter, 40.0);
        assert_eq!(p.cut_side, CutSide::Positive);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let base = KeywayParameters::default();

        let p = KeywayParameters {
            notch_count: 0,
            ..base.clone()
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::NonPositive { ref name, .. }) if name == "notch_count"
        ));

        let p = KeywayParameters {
            feed_rate: 0.0,
            ..base.clone()
        };
        assert!(p.validate().is_err());

        let p = KeywayParameters {
            depth_per_pass_y: -1.0,
            ..base.clone()
        };
        assert!(p.validate().is_err());

        let p = KeywayParameters {
            depth_per_pass_y: 0.0001,
            ..base.clone()
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::InvalidValue { .. })
        ));

        let p = KeywayParameters {
            depth_per_pass_y: 0.0014,
            ..base.clone()
        };
        assert!(matches!(
            p.validate(),
            Err(ParameterError::InvalidValue { ref name, .. }) if name == "depth_per_pass_y"
        ));

        let p = KeywayParameters {
            final_diameter: 30.0,
            ..base.clone()
        };
        assert_eq!(
            p.validate(),
            Err(ParameterError::EqualDiameters { diameter: 30.0 })
        );

        let p = KeywayParameters {
            tool_diameter: 0.0,
            ..base.clone()
        };
        assert!(p.validate().is_err());

        let p = KeywayParameters {
            keyway_opening: -1.0,
            ..base.clone()
        };
        assert!(matches!(p.validate(), Err(ParameterError::Negative { .. })));

        let p = KeywayParameters {
            start_z: f64::NAN,
            ..base.clone()
        };
        assert_eq!(
            p.validate(),
            Err(ParameterError::NonFinite("start_z".to_string()))
        );

        let p = KeywayParameters {
            conical_enabled: true,
            conical_angle_deg: 90.0,
            ..base.clone()
        };
        assert!(p.validate().is_err());

        let p = KeywayParameters {
            lateral_step_override: Some(0.0),
            ..base
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_zero_opening_is_valid() {
        let p = KeywayParameters {
            keyway_opening: 0.0,
            ..KeywayParameters::default()
        };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_generator_rejects_equal_diameters() {
        let p = KeywayParameters {
            final_diameter: 30.0,
            ..KeywayParameters::default()
        };
        assert!(KeywayGenerator::new(p.clone()).is_err());
        assert!(generate_gcode(&p).is_err());
    }

    #[test]
    fn test_lateral_step_percent() {
        let wide = KeywayParameters {
            keyway_opening: 20.0,
            ..KeywayParameters::default()
        }
        .with_lateral_step_percent(50.0);
        assert_eq!(wide.lateral_step_override, Some(4.0));

        let narrow = KeywayParameters::default().with_lateral_step_percent(50.0);
        assert_eq!(narrow.lateral_step_override, None);
    }

    #[test]
    fn test_lateral_step_percent_keeps_existing_override() {
        let wide = KeywayParameters {
            keyway_opening: 20.0,
            lateral_step_override: Some(3.0),
            ..KeywayParameters::default()
        }
        .with_lateral_step_percent(50.0);
        assert_eq!(wide.lateral_step_override, Some(3.0));

        let narrow = KeywayParameters {
            keyway_opening: 11.0,
            lateral_step_override: Some(3.0),
            ..KeywayParameters::default()
        }
        .with_lateral_step_percent(50.0);
        assert_eq!(narrow.lateral_step_override, Some(3.0));
    }

    #[test]
    fn test_depth_per_pass_on_grid() {
        for depth in [0.001, 0.1, 0.0125 * 8.0, 1.5, 2.345] {
            let p = KeywayParameters {
                depth_per_pass_y: depth,
                ..KeywayParameters::default()
            };
            assert!(p.validate().is_ok(), "depth {} rejected", depth);
        }

        for depth in [0.0014, 0.0015, 0.0125, 1.0005] {
            let p = KeywayParameters {
                depth_per_pass_y: depth,
                ..KeywayParameters::default()
            };
            assert!(KeywayGenerator::new(p).is_err(), "depth {} accepted", depth);
        }
    }

    #[test]
    fn test_cut_side_parsing() {
        assert_eq!("positive".parse::<CutSide>(), Ok(CutSide::Positive));
        assert_eq!("NEG".parse::<CutSide>(), Ok(CutSide::Negative));
        assert!("sideways".parse::<CutSide>().is_err());
        assert_eq!(CutSide::Negative.to_string(), "negative");
    }

    #[test]
    fn test_program_framing() {
        let lines = generate_gcode(&KeywayParameters::default()).unwrap();
        assert_eq!(&lines[..3], &["G0 Z100", "G0 Y0", "G0 X0"]);
        assert_eq!(&lines[lines.len() - 2..], &["G0 Z100", "M30"]);
    }

    #[test]
    fn test_notch_header() {
        let lines = generate_gcode(&KeywayParameters::default()).unwrap();
        assert_eq!(&lines[3..7], &["G0 A0.00", "G0 Z5", "G0 Y15", "G0 X0"]);
        assert!(lines.contains(&"G0 A90.00".to_string()));
        assert!(lines.contains(&"G0 A180.00".to_string()));
        assert!(lines.contains(&"G0 A270.00".to_string()));
    }

    #[test]
    fn test_summary() {
        let generator = KeywayGenerator::new(KeywayParameters::default()).unwrap();
        let summary = generator.summary();
        assert_eq!(summary.initial_radius, 15.0);
        assert_eq!(summary.final_radius, 20.0);
        assert_eq!(summary.radial_depth, 5.0);
        assert_eq!(summary.lateral_displacement, 1.0);
        assert_eq!(summary.lateral_passes, 2);
        assert_eq!(summary.radial_passes, 6);
        assert_eq!(summary.notch_angle_step, 90.0);
        assert_eq!(summary.retract_y, 14.0);
        assert!(summary.to_string().contains("Retract Y:            14.00"));
    }
}
