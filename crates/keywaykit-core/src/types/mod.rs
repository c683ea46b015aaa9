//! Program model types.
//!
//! ## Modules
//!
//! - [`command`]: Motion commands, axis words and the per-line axis record.

pub mod command;

pub use command::*;
