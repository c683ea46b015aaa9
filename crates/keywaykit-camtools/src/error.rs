//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for keyway generation and
//! machining parameter validation.

use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CamToolError {
    /// A parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to machining parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A value that must be strictly positive was zero or negative.
    #[error("Parameter '{name}' must be greater than zero (got {value})")]
    NonPositive { name: String, value: f64 },

    /// A value that must not be negative was negative.
    #[error("Parameter '{name}' must not be negative (got {value})")]
    Negative { name: String, value: f64 },

    /// A value was NaN or infinite.
    #[error("Parameter '{0}' must be a finite number")]
    NonFinite(String),

    /// Initial and final diameters are equal, leaving nothing to cut.
    #[error("Final diameter cannot be equal to the initial diameter ({diameter})")]
    EqualDiameters { diameter: f64 },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },
}

impl ParameterError {
    pub(crate) fn non_positive(name: &str, value: f64) -> Self {
        Self::NonPositive {
            name: name.to_string(),
            value,
        }
    }

    pub(crate) fn negative(name: &str, value: f64) -> Self {
        Self::Negative {
            name: name.to_string(),
            value,
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
