//! # KeywayKit Core
//!
//! Core types and utilities for KeywayKit.
//! Provides the G-Code command model shared by the generator and the
//! simulator, the numeric formatting contract, and the G-Code error type.

pub mod error;
pub mod types;
pub mod units;

pub use error::GcodeError;

pub use types::{Axis, AxisValues, Command, MotionMode, Word};

pub use units::{
    format_fixed, format_shortest, parse_count, parse_decimal, round_to, Precision,
    ANGLE_DECIMALS, COORD_DECIMALS, RETRACT_DECIMALS,
};
