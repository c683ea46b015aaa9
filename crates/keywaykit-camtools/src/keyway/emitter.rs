//! Command emission for the keyway program

use keywaykit_core::{
    format_shortest, Axis, Command, Precision, ANGLE_DECIMALS, COORD_DECIMALS, RETRACT_DECIMALS,
};
use tracing::trace;

use super::{KeywayGeometry, KeywayParameters, LateralPlan, RadialSchedule};

/// Z of the global safety retract at program start and end
pub const SAFE_Z: f64 = 100.0;

const COORD: Precision = Precision::Fixed(COORD_DECIMALS);
const RETRACT: Precision = Precision::Fixed(RETRACT_DECIMALS);
const ANGLE: Precision = Precision::Fixed(ANGLE_DECIMALS);
const PLAIN: Precision = Precision::Shortest;

pub(crate) struct ProgramEmitter<'a> {
    params: &'a KeywayParameters,
    geometry: &'a KeywayGeometry,
    lateral: &'a LateralPlan,
    radial: &'a RadialSchedule,
    commands: Vec<Command>,
}

impl<'a> ProgramEmitter<'a> {
    pub(crate) fn new(
        params: &'a KeywayParameters,
        geometry: &'a KeywayGeometry,
        lateral: &'a LateralPlan,
        radial: &'a RadialSchedule,
    ) -> Self {
        Self {
            params,
            geometry,
            lateral,
            radial,
            commands: Vec::new(),
        }
    }

    pub(crate) fn emit(mut self) -> Vec<Command> {
        self.rapid(Axis::Z, SAFE_Z, PLAIN);
        self.rapid(Axis::Y, 0.0, PLAIN);
        self.rapid(Axis::X, 0.0, PLAIN);

        for notch in 0..self.params.notch_count {
            self.emit_notch(notch);
        }

        self.rapid(Axis::Z, SAFE_Z, PLAIN);
        self.commands.push(Command::ProgramEnd);
        self.commands
    }

    fn emit_notch(&mut self, index: u32) {
        let angle = (360.0 / self.params.notch_count as f64) * index as f64;
        trace!("Notch {} at A{}", index, angle);

        self.rapid(Axis::A, angle, ANGLE);
        self.rapid(Axis::Z, self.params.start_z, PLAIN);
        self.rapid(Axis::Y, self.geometry.initial_radius, PLAIN);
        self.rapid(Axis::X, 0.0, PLAIN);

        let radial = self.radial;
        for (pass, &y) in radial.positions().iter().enumerate() {
            if pass > 0 {
                self.rapid(Axis::Y, y, COORD);
            }
            self.emit_radial_pass(y);
        }
        // A centered pass already ends at the start Z
        if radial.closes_at_final() && !self.lateral.is_centered() {
            self.rapid(Axis::Z, self.params.start_z, PLAIN);
        }
    }

    /// All lateral strokes at one radial position
    fn emit_radial_pass(&mut self, y: f64) {
        let lateral = self.lateral;
        if lateral.is_centered() {
            self.emit_cut(y);
            self.rapid(Axis::Y, self.geometry.retract_y, RETRACT);
            self.rapid(Axis::Z, self.params.start_z, PLAIN);
            return;
        }

        let offsets = lateral.offsets();
        for (i, &x) in offsets.iter().enumerate() {
            self.rapid(Axis::X, x, COORD);
            self.emit_cut(y);
            self.rapid(Axis::Y, self.geometry.retract_y, RETRACT);
            self.rapid(Axis::Z, self.params.start_z, PLAIN);
            if i + 1 < offsets.len() {
                self.rapid(Axis::Y, y, COORD);
            } else {
                self.rapid(Axis::X, 0.0, PLAIN);
            }
        }
    }

    /// Full-depth stroke; conical jobs move Y and Z together
    fn emit_cut(&mut self, y: f64) {
        let p = self.params;
        let cut = if p.conical_enabled {
            Command::linear()
                .word(Axis::Y, y + self.geometry.taper_offset, COORD)
                .word(Axis::Z, p.final_depth_z, PLAIN)
                .word(Axis::F, p.feed_rate, PLAIN)
                .comment(format!("taper {}deg", format_shortest(p.conical_angle_deg)))
        } else {
            Command::linear()
                .word(Axis::Z, p.final_depth_z, PLAIN)
                .word(Axis::F, p.feed_rate, PLAIN)
        };
        self.commands.push(cut);
    }

    fn rapid(&mut self, axis: Axis, value: f64, precision: Precision) {
        self.commands
            .push(Command::rapid().word(axis, value, precision));
    }
}
