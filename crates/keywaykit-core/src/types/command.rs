//! G-Code command model
//!
//! A program is an ordered list of [`Command`]s. Each motion command carries
//! its words in emission order together with the precision each word is
//! rendered with, so that text output is byte-identical across runs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::units::{round_to, Precision};

/// Motion mode of a move command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MotionMode {
    /// Rapid positioning (G0)
    #[serde(rename = "G0")]
    Rapid,
    /// Linear interpolation at feed rate (G1)
    #[serde(rename = "G1")]
    Linear,
}

impl MotionMode {
    /// Parse a motion word such as `G0`, `G00`, `g1`
    pub fn from_word(word: &str) -> Option<Self> {
        let upper = word.to_ascii_uppercase();
        let digits = upper.strip_prefix('G')?;
        match digits.parse::<u32>().ok()? {
            0 => Some(Self::Rapid),
            1 => Some(Self::Linear),
            _ => None,
        }
    }

    /// The canonical word for this mode
    pub fn word(&self) -> &'static str {
        match self {
            Self::Rapid => "G0",
            Self::Linear => "G1",
        }
    }
}

impl fmt::Display for MotionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// Address letter of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
    A,
    /// Feed rate
    F,
}

impl Axis {
    /// Letter used in program text
    pub fn letter(&self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
            Self::A => 'A',
            Self::F => 'F',
        }
    }

    /// Inverse of [`Axis::letter`], case-insensitive
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            'A' => Some(Self::A),
            'F' => Some(Self::F),
            _ => None,
        }
    }
}

/// Explicit per-command record of the axis values a line specifies
///
/// `None` means the line does not mention that address.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisValues {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub a: Option<f64>,
    pub f: Option<f64>,
}

impl AxisValues {
    /// Set the value for `axis`, replacing any previous value
    pub fn set(&mut self, axis: Axis, value: f64) {
        let slot = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
            Axis::A => &mut self.a,
            Axis::F => &mut self.f,
        };
        *slot = Some(value);
    }

    /// Value for `axis`, if present
    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
            Axis::A => self.a,
            Axis::F => self.f,
        }
    }

    /// True when no address is present
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.z.is_none()
            && self.a.is_none()
            && self.f.is_none()
    }
}

/// A single address/value pair of a motion command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub axis: Axis,
    pub value: f64,
    pub precision: Precision,
}

impl Word {
    pub fn new(axis: Axis, value: f64, precision: Precision) -> Self {
        Self {
            axis,
            value,
            precision,
        }
    }

    /// The value exactly as it appears in program text
    pub fn emitted_value(&self) -> f64 {
        match self.precision {
            Precision::Fixed(decimals) => round_to(self.value, decimals),
            Precision::Shortest => self.value,
        }
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.axis.letter(), self.precision.format(self.value))
    }
}

/// One line of a generated program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// G0/G1 move
    Motion {
        mode: MotionMode,
        words: Vec<Word>,
        comment: Option<String>,
    },
    /// M30
    ProgramEnd,
}

impl Command {
    /// Start a rapid (G0) move with no words
    pub fn rapid() -> Self {
        Self::motion(MotionMode::Rapid)
    }

    /// Start a linear (G1) move with no words
    pub fn linear() -> Self {
        Self::motion(MotionMode::Linear)
    }

    pub fn motion(mode: MotionMode) -> Self {
        Self::Motion {
            mode,
            words: Vec::new(),
            comment: None,
        }
    }

    /// Append a word. No-op on [`Command::ProgramEnd`].
    pub fn word(mut self, axis: Axis, value: f64, precision: Precision) -> Self {
        if let Self::Motion { words, .. } = &mut self {
            words.push(Word::new(axis, value, precision));
        }
        self
    }

    /// Attach a trailing parenthesized comment
    pub fn comment(mut self, text: impl Into<String>) -> Self {
        if let Self::Motion { comment, .. } = &mut self {
            *comment = Some(text.into());
        }
        self
    }

    /// Motion mode, or `None` for non-motion commands
    pub fn mode(&self) -> Option<MotionMode> {
        match self {
            Self::Motion { mode, .. } => Some(*mode),
            Self::ProgramEnd => None,
        }
    }

    /// Axis values as they appear in the emitted text
    pub fn axes(&self) -> AxisValues {
        let mut axes = AxisValues::default();
        if let Self::Motion { words, .. } = self {
            for word in words {
                axes.set(word.axis, word.emitted_value());
            }
        }
        axes
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Motion {
                mode,
                words,
                comment,
            } => {
                write!(f, "{}", mode)?;
                for word in words {
                    write!(f, " {}", word)?;
                }
                if let Some(text) = comment {
                    write!(f, " ({})", text)?;
                }
                Ok(())
            }
            Self::ProgramEnd => f.write_str("M30"),
        }
    }
}
