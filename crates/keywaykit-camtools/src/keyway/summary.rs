//! Derived values shown to the operator before a program is generated

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{KeywayGeometry, LateralPlan, RadialSchedule};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywaySummary {
    pub initial_radius: f64,
    pub final_radius: f64,
    /// |final radius - initial radius|
    pub radial_depth: f64,
    pub cutting_reversed: bool,
    /// Largest lateral offset from the keyway axis
    pub lateral_displacement: f64,
    pub lateral_passes: usize,
    pub radial_passes: usize,
    pub notch_angle_step: f64,
    pub retract_y: f64,
    pub taper_offset: f64,
}

impl KeywaySummary {
    pub(crate) fn new(
        geometry: &KeywayGeometry,
        lateral: &LateralPlan,
        radial: &RadialSchedule,
        notch_count: u32,
    ) -> Self {
        Self {
            initial_radius: geometry.initial_radius,
            final_radius: geometry.final_radius,
            radial_depth: geometry.radial_depth(),
            cutting_reversed: geometry.cutting_reversed,
            lateral_displacement: lateral.max_displacement(),
            lateral_passes: lateral.pass_count(),
            radial_passes: radial.pass_count(),
            notch_angle_step: 360.0 / notch_count as f64,
            retract_y: geometry.retract_y,
            taper_offset: geometry.taper_offset,
        }
    }
}

impl fmt::Display for KeywaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.cutting_reversed {
            "inward"
        } else {
            "outward"
        };
        writeln!(f, "Initial radius:       {:.3}", self.initial_radius)?;
        writeln!(f, "Final radius:         {:.3}", self.final_radius)?;
        writeln!(f, "Radial depth:         {:.3} ({})", self.radial_depth, direction)?;
        writeln!(f, "Lateral displacement: {:.3}", self.lateral_displacement)?;
        writeln!(f, "Lateral passes:       {}", self.lateral_passes)?;
        writeln!(f, "Radial passes/notch:  {}", self.radial_passes)?;
        writeln!(f, "Notch angle step:     {:.2}", self.notch_angle_step)?;
        writeln!(f, "Retract Y:            {:.2}", self.retract_y)?;
        write!(f, "Taper Y offset:       {:.3}", self.taper_offset)
    }
}
