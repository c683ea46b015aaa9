//! Geometry derived once per generation call

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CutSide, KeywayParameters};

/// Clearance between the retract position and the cutting envelope
pub const RETRACT_CLEARANCE: f64 = 1.0;

/// Radii, direction, taper and retract position for a job
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeywayGeometry {
    pub initial_radius: f64,
    pub final_radius: f64,
    /// Cutting from a larger radius towards a smaller one
    pub cutting_reversed: bool,
    /// Signed Y advance per radial pass
    pub radial_increment: f64,
    /// Taper angle in radians, 0 when taper is disabled
    pub taper_angle_rad: f64,
    /// Y shift accumulated over a full-depth conical stroke
    pub taper_offset: f64,
    /// Y used by every retract move of the job
    pub retract_y: f64,
}

impl KeywayGeometry {
    pub fn resolve(params: &KeywayParameters) -> Self {
        let initial_radius = params.initial_diameter / 2.0;
        let final_radius = params.final_diameter / 2.0;
        let cutting_reversed = params.initial_diameter > params.final_diameter;

        let step = params.depth_per_pass_y.abs();
        let radial_increment = if cutting_reversed { -step } else { step };

        let taper_angle_rad = if params.conical_enabled {
            params.conical_angle_deg.to_radians()
        } else {
            0.0
        };
        let taper_offset = if params.conical_enabled {
            params.final_depth_z.abs() * taper_angle_rad.tan()
        } else {
            0.0
        };

        let retract_y = Self::retract_position(
            params.cut_side,
            initial_radius,
            final_radius,
            params.conical_enabled.then_some(taper_offset),
        );

        let geometry = Self {
            initial_radius,
            final_radius,
            cutting_reversed,
            radial_increment,
            taper_angle_rad,
            taper_offset,
            retract_y,
        };
        debug!("Resolved keyway geometry: {:?}", geometry);
        geometry
    }

    /// Single retract Y for the whole job
    ///
    /// Takes the extreme of every Y the tool touches while cutting (both
    /// radii, and both radii shifted by the taper when conical) and backs off
    /// by [`RETRACT_CLEARANCE`] on the cut side.
    fn retract_position(
        side: CutSide,
        initial_radius: f64,
        final_radius: f64,
        taper_offset: Option<f64>,
    ) -> f64 {
        let mut envelope = vec![initial_radius, final_radius];
        if let Some(offset) = taper_offset {
            envelope.push(initial_radius + offset);
            envelope.push(final_radius + offset);
        }

        match side {
            CutSide::Positive => {
                envelope.into_iter().fold(f64::INFINITY, f64::min) - RETRACT_CLEARANCE
            }
            CutSide::Negative => {
                envelope.into_iter().fold(f64::NEG_INFINITY, f64::max) + RETRACT_CLEARANCE
            }
        }
    }

    /// Lowest and highest Y swept while cutting
    pub fn cutting_envelope(&self) -> (f64, f64) {
        let ys = [
            self.initial_radius,
            self.final_radius,
            self.initial_radius + self.taper_offset,
            self.final_radius + self.taper_offset,
        ];
        let low = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let high = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (low, high)
    }

    /// Absolute radial distance between the two radii
    pub fn radial_depth(&self) -> f64 {
        (self.final_radius - self.initial_radius).abs()
    }
}
