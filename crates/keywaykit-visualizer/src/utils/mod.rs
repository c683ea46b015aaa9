//! Utility modules

pub mod file_io;

pub use file_io::{
    read_program, with_program_extension, ProgramExporter, ProgramReader, ProgramValidation,
    DEFAULT_PROGRAM_NAME, PROGRAM_EXTENSION,
};
