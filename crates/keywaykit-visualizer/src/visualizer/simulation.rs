//! Simulation frame building
//!
//! Replays a program into absolute machine poses. Every G0/G1 line yields one
//! frame; axes the line does not mention keep the value of the previous frame.

use keywaykit_core::{AxisValues, Command, GcodeError, MotionMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::gcode::GcodeParser;

/// Absolute machine pose after one motion command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationFrame {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub a: f64,
    pub motion_mode: MotionMode,
}

impl SimulationFrame {
    /// Machine origin, the pose before the first command
    pub fn origin() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            a: 0.0,
            motion_mode: MotionMode::Rapid,
        }
    }

    /// Pose after applying `axes` with `mode`; unspecified axes carry forward
    pub fn advance(&self, mode: MotionMode, axes: &AxisValues) -> Self {
        Self {
            x: axes.x.unwrap_or(self.x),
            y: axes.y.unwrap_or(self.y),
            z: axes.z.unwrap_or(self.z),
            a: axes.a.unwrap_or(self.a),
            motion_mode: mode,
        }
    }

    /// `X: 0.00 | Y: 0.00 | Z: 0.00`
    pub fn position_readout(&self) -> String {
        format!("X: {:.2} | Y: {:.2} | Z: {:.2}", self.x, self.y, self.z)
    }

    /// `A: 90.0°`
    pub fn angle_readout(&self) -> String {
        format!("A: {:.1}°", self.a)
    }
}

impl Default for SimulationFrame {
    fn default() -> Self {
        Self::origin()
    }
}

impl fmt::Display for SimulationFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} X{:.3} Y{:.3} Z{:.3} A{:.2}",
            self.motion_mode, self.x, self.y, self.z, self.a
        )
    }
}

/// Incremental frame builder
///
/// Holds the running pose between lines so a program can be fed one line
/// or one command at a time.
#[derive(Debug, Default)]
pub struct FrameBuilder {
    parser: GcodeParser,
    pose: SimulationFrame,
    frames: Vec<SimulationFrame>,
}

impl FrameBuilder {
    /// Lenient builder: unsupported lines produce no frame
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder that rejects arcs and malformed tokens
    pub fn strict() -> Self {
        Self {
            parser: GcodeParser::strict(),
            ..Self::default()
        }
    }

    /// Feed one program line, returning the frame it produced
    pub fn push_line(&mut self, line: &str) -> Result<Option<SimulationFrame>, GcodeError> {
        let parsed = self.parser.parse(line)?;
        Ok(parsed
            .motion_mode
            .map(|mode| self.record(mode, &parsed.axes)))
    }

    /// Feed one typed command, returning the frame it produced
    pub fn push_command(&mut self, command: &Command) -> Option<SimulationFrame> {
        command
            .mode()
            .map(|mode| self.record(mode, &command.axes()))
    }

    /// Frames built so far
    pub fn frames(&self) -> &[SimulationFrame] {
        &self.frames
    }

    pub fn finish(self) -> Vec<SimulationFrame> {
        debug!("Built {} simulation frames", self.frames.len());
        self.frames
    }

    fn record(&mut self, mode: MotionMode, axes: &AxisValues) -> SimulationFrame {
        self.pose = self.pose.advance(mode, axes);
        self.frames.push(self.pose);
        self.pose
    }
}

/// Build frames from program lines
///
/// Lines that cannot be read are skipped with a warning.
pub fn build_frames<S: AsRef<str>>(lines: &[S]) -> Vec<SimulationFrame> {
    let mut builder = FrameBuilder::new();
    for line in lines {
        if let Err(e) = builder.push_line(line.as_ref()) {
            warn!("Skipping line: {}", e);
        }
    }
    builder.finish()
}

/// Build frames from program lines, failing on the first unreadable line
pub fn build_frames_strict<S: AsRef<str>>(lines: &[S]) -> Result<Vec<SimulationFrame>, GcodeError> {
    let mut builder = FrameBuilder::strict();
    for line in lines {
        builder.push_line(line.as_ref())?;
    }
    Ok(builder.finish())
}

/// Build frames straight from generated commands
pub fn frames_from_commands(commands: &[Command]) -> Vec<SimulationFrame> {
    let mut builder = FrameBuilder::new();
    for command in commands {
        builder.push_command(command);
    }
    builder.finish()
}
