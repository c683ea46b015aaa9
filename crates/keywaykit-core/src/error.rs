//! Error handling for KeywayKit
//!
//! Provides the G-Code error type shared by the parser, the simulator and
//! program file handling. Uses `thiserror` for ergonomic error handling.

use thiserror::Error;

/// G-Code error type
///
/// Represents errors raised while turning text back into commands or
/// while reading and writing program files.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// A numeric value could not be parsed
    #[error("Invalid number '{token}' at line {line_number}")]
    InvalidNumber {
        /// The line number (1-based) where the token was found.
        line_number: u32,
        /// The offending token text.
        token: String,
    },

    /// A motion word outside the supported G0/G1 set
    #[error("Unsupported motion word at line {line_number}: {code}")]
    UnsupportedMotion {
        /// The line number (1-based) where the word was found.
        line_number: u32,
        /// The unsupported word.
        code: String,
    },

    /// The program contained no commands
    #[error("Empty program")]
    EmptyProgram,
}
