//! Simulation module
//!
//! This module provides:
//! - Simulation frame building (carry-forward pose replay)
//! - Playback stepping with speed control

pub mod playback;
pub mod simulation;

pub use playback::{Playback, PlaybackState, BASE_FRAME_DELAY_MS, MAX_SPEED, MIN_SPEED};
pub use simulation::{
    build_frames, build_frames_strict, frames_from_commands, FrameBuilder, SimulationFrame,
};
