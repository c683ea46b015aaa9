//! # KeywayKit CAM Tools
//!
//! This crate provides the CAM (Computer-Aided Manufacturing) side of
//! KeywayKit: turning a small set of machining parameters into a complete
//! G-Code program for keyway/notch features on cylindrical parts.
//!
//! ## CAM Tools Included
//!
//! - **Keyway Generator**: radial multi-pass cutting, lateral widening passes,
//!   conical taper compensation and side-aware retracts
//!
//! ## Supporting Infrastructure
//!
//! - **Error**: CAM and parameter validation errors

pub mod error;
pub mod keyway;

// Re-export commonly used items
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use keyway::{
    generate_gcode, CutSide, KeywayGenerator, KeywayGeometry, KeywayParameters, KeywaySummary,
    LateralPlan, RadialSchedule,
};
