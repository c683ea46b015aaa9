//! G-Code text handling
//!
//! This module provides:
//! - Comment stripping
//! - Motion word and axis token extraction
//! - Strict validation for hand-edited programs

pub mod parser;

pub use parser::*;
