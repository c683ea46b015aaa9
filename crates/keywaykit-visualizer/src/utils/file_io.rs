//! Program file I/O
//!
//! Writes generated programs to `.nc` files and reads them back for
//! simulation.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use keywaykit_core::{GcodeError, MotionMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::gcode::GcodeParser;

/// File name used when the user does not pick one
pub const DEFAULT_PROGRAM_NAME: &str = "keyway.nc";

/// Extension given to exported programs
pub const PROGRAM_EXTENSION: &str = "nc";

/// Writes programs to disk
#[derive(Debug, Clone)]
pub struct ProgramExporter {
    directory: PathBuf,
}

impl ProgramExporter {
    /// Exporter writing relative paths under `directory`
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Resolve `name` against the output directory, adding `.nc` when the
    /// name has no extension
    pub fn resolve(&self, name: impl AsRef<Path>) -> PathBuf {
        let name = name.as_ref();
        let path = if name.is_absolute() {
            name.to_path_buf()
        } else {
            self.directory.join(name)
        };
        with_program_extension(path)
    }

    /// Write `lines` newline-joined with a trailing newline
    ///
    /// # Errors
    /// Returns error if the program is empty or the file cannot be written
    pub fn write<S: AsRef<str>>(&self, name: impl AsRef<Path>, lines: &[S]) -> Result<PathBuf> {
        if lines.is_empty() {
            return Err(GcodeError::EmptyProgram.into());
        }

        let path = self.resolve(name);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut text = String::new();
        for line in lines {
            text.push_str(line.as_ref());
            text.push('\n');
        }

        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {} lines to {}", lines.len(), path.display());
        Ok(path)
    }
}

impl Default for ProgramExporter {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Append the `.nc` extension to paths that have none
pub fn with_program_extension(path: impl Into<PathBuf>) -> PathBuf {
    let mut path = path.into();
    if path.extension().is_none() {
        path.set_extension(PROGRAM_EXTENSION);
    }
    path
}

/// Reader for program files
#[derive(Debug)]
pub struct ProgramReader {
    path: PathBuf,
    file_size: u64,
}

impl ProgramReader {
    /// Open a program file
    ///
    /// # Errors
    /// Returns error if file does not exist or cannot be accessed
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(anyhow!("File does not exist: {}", path.display()));
        }

        if !path.is_file() {
            return Err(anyhow!("Path is not a file: {}", path.display()));
        }

        let file_size = fs::metadata(&path)?.len();
        Ok(Self { path, file_size })
    }

    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-empty trimmed lines of the program
    ///
    /// # Errors
    /// Returns error if the file cannot be read or holds no commands
    pub fn read_lines(&self) -> Result<Vec<String>> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;

        let lines: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();

        if lines.is_empty() {
            return Err(GcodeError::EmptyProgram.into());
        }
        debug!("Read {} lines from {}", lines.len(), self.path.display());
        Ok(lines)
    }

    /// Check every line with the strict parser
    pub fn validate(&self) -> Result<ProgramValidation> {
        let mut validation = ProgramValidation::default();
        let mut parser = GcodeParser::strict();

        for line in self.read_lines()? {
            validation.total_lines += 1;
            match parser.parse(&line) {
                Ok(parsed) => match parsed.motion_mode {
                    Some(MotionMode::Rapid) => validation.rapid_moves += 1,
                    Some(MotionMode::Linear) => validation.linear_moves += 1,
                    None => validation.other_lines += 1,
                },
                Err(e) => {
                    warn!("{}", e);
                    validation.errors.push(e.to_string());
                }
            }
        }
        Ok(validation)
    }
}

/// Result of validating a program file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramValidation {
    pub total_lines: u64,
    pub rapid_moves: u64,
    pub linear_moves: u64,
    pub other_lines: u64,
    pub errors: Vec<String>,
}

impl ProgramValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn total_motion_commands(&self) -> u64 {
        self.rapid_moves + self.linear_moves
    }
}

/// Read a program file into lines
pub fn read_program(path: impl AsRef<Path>) -> Result<Vec<String>> {
    ProgramReader::new(path)?.read_lines()
}
