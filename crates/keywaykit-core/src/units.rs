//! Numeric input and output utilities
//!
//! Parses user-entered decimals written with either `.` or `,` as the
//! separator, and implements the fixed-precision formatting used for every
//! coordinate written into a program.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal places used for X and Y coordinates
pub const COORD_DECIMALS: usize = 3;

/// Decimal places used for the retract Y coordinate
pub const RETRACT_DECIMALS: usize = 2;

/// Decimal places used for the rotary A axis
pub const ANGLE_DECIMALS: usize = 2;

/// How a value is rendered into a G-Code word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Fixed number of decimal places (`15.000`)
    Fixed(usize),
    /// Shortest representation that round-trips (`15`, `-5`, `12.5`)
    Shortest,
}

impl Precision {
    /// Render `value` using this precision
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Fixed(decimals) => format_fixed(value, decimals),
            Self::Shortest => format_shortest(value),
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(decimals) => write!(f, "{} decimals", decimals),
            Self::Shortest => write!(f, "shortest"),
        }
    }
}

/// Round `value` to `decimals` decimal places
///
/// Negative zero is normalized to zero so that formatting never
/// produces `-0.000`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a value with a fixed number of decimal places
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let value = round_to(value, decimals);
    format!("{:.prec$}", value, prec = decimals)
}

/// Format a value using the shortest round-trip representation
pub fn format_shortest(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Parse a decimal number typed by a user
///
/// Accepts `,` as the decimal separator (`"30,5"`), an optional sign, and
/// surrounding whitespace. Rejects empty input and non-finite results.
///
/// * `input` - String to parse
pub fn parse_decimal(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty number".to_string());
    }
    if input.matches([',', '.']).count() > 1 {
        return Err(format!("Invalid number: {}", input));
    }

    let normalized = input.replace(',', ".");
    let value = normalized
        .parse::<f64>()
        .map_err(|_| format!("Invalid number: {}", input))?;

    if !value.is_finite() {
        return Err(format!("Number is not finite: {}", input));
    }
    Ok(value)
}

/// Parse a whole number typed by a user
pub fn parse_count(input: &str) -> Result<u32, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty number".to_string());
    }
    input
        .parse::<u32>()
        .map_err(|_| format!("Invalid whole number: {}", input))
}
