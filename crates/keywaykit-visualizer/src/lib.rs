//! # KeywayKit Visualizer
//!
//! Program parsing and simulation for KeywayKit.
//! Includes the line parser, the simulation frame builder, playback
//! stepping and program file I/O.

pub mod gcode;
pub mod utils;
pub mod visualizer;

pub use gcode::{GcodeParser, ParsedLine};

pub use utils::{
    read_program, with_program_extension, ProgramExporter, ProgramReader, ProgramValidation,
    DEFAULT_PROGRAM_NAME,
};

pub use visualizer::{
    build_frames, build_frames_strict, frames_from_commands, FrameBuilder, Playback,
    PlaybackState, SimulationFrame,
};
