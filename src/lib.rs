//! # KeywayKit
//!
//! Multi-pass keyway and notch G-Code generation for 4-axis machining
//! (X, Y, Z plus a rotary A axis), with a simulation replay of the
//! generated program.
//!
//! ## Architecture
//!
//! KeywayKit is organized as a workspace with multiple crates:
//!
//! 1. **keywaykit-core** - Command model, numeric formatting, errors
//! 2. **keywaykit-camtools** - Keyway generator and parameter validation
//! 3. **keywaykit-visualizer** - Line parser, simulation frames, playback, file I/O
//! 4. **keywaykit-settings** - Configuration file
//! 5. **keywaykit** - Command line binary that integrates all crates

pub mod cli;

pub use keywaykit_core::{
    parse_count, parse_decimal, Axis, AxisValues, Command, GcodeError, MotionMode,
};

pub use keywaykit_camtools::{
    generate_gcode, CamToolError, CutSide, KeywayGenerator, KeywayGeometry, KeywayParameters,
    KeywaySummary, LateralPlan, ParameterError, RadialSchedule,
};

pub use keywaykit_visualizer::{
    build_frames, frames_from_commands, read_program, FrameBuilder, Playback, ProgramExporter,
    SimulationFrame,
};

pub use keywaykit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so programs written to stdout stay clean
/// - RUST_LOG environment variable support (default `info`)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}
