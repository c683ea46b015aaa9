//! G-Code line parser
//!
//! Turns program text back into motion mode and axis values. Comments in
//! `( )` or after `;` are stripped before any token is looked at.

use keywaykit_core::{Axis, AxisValues, GcodeError, MotionMode};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::trace;

/// One parsed program line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// 1-based line number within the parsed text
    pub line_number: u32,
    /// G0/G1 when the line is a supported motion command
    pub motion_mode: Option<MotionMode>,
    /// Axis values present on the line
    pub axes: AxisValues,
    /// Comment text without delimiters
    pub comment: Option<String>,
}

impl ParsedLine {
    /// True for G0/G1 lines
    pub fn is_motion(&self) -> bool {
        self.motion_mode.is_some()
    }
}

/// G-Code parser
///
/// In lenient mode (the default) lines that are not G0/G1 moves are
/// returned without a motion mode and malformed address tokens are ignored.
/// Strict mode reports both as errors.
#[derive(Debug, Default)]
pub struct GcodeParser {
    strict: bool,
    line_number: u32,
}

impl GcodeParser {
    /// Create a lenient parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser that rejects unsupported motion and malformed tokens
    pub fn strict() -> Self {
        Self {
            strict: true,
            line_number: 0,
        }
    }

    /// Number of lines parsed so far
    pub fn lines_parsed(&self) -> u32 {
        self.line_number
    }

    /// Parse the next line of a program
    pub fn parse(&mut self, line: &str) -> Result<ParsedLine, GcodeError> {
        self.line_number += 1;
        let line_number = self.line_number;

        let comment = Self::extract_comment(line);
        let cleaned = Self::remove_comments(line);
        let cleaned = cleaned.trim();

        let mut parsed = ParsedLine {
            line_number,
            motion_mode: None,
            axes: AxisValues::default(),
            comment,
        };

        let Some(mnemonic) = cleaned.split_whitespace().next() else {
            return Ok(parsed);
        };

        parsed.motion_mode = MotionMode::from_word(mnemonic);
        if parsed.motion_mode.is_none() {
            if self.strict && mnemonic.to_ascii_uppercase().starts_with('G') {
                return Err(GcodeError::UnsupportedMotion {
                    line_number,
                    code: mnemonic.to_string(),
                });
            }
            trace!("Line {}: non-motion '{}'", line_number, mnemonic);
            return Ok(parsed);
        }

        if self.strict {
            Self::check_tokens(line_number, cleaned)?;
        }

        for captures in Self::axis_regex().captures_iter(cleaned) {
            let letter = captures[1]
                .chars()
                .next()
                .unwrap_or_default()
                .to_ascii_uppercase();
            let Some(axis) = Axis::from_letter(letter) else {
                continue;
            };
            let token = &captures[2];
            let value = token
                .parse::<f64>()
                .map_err(|_| GcodeError::InvalidNumber {
                    line_number,
                    token: format!("{}{}", letter, token),
                })?;
            parsed.axes.set(axis, value);
        }

        trace!("Line {}: {:?} {:?}", line_number, parsed.motion_mode, parsed.axes);
        Ok(parsed)
    }

    /// Parse every line of a program text
    pub fn parse_program(&mut self, text: &str) -> Result<Vec<ParsedLine>, GcodeError> {
        text.lines().map(|line| self.parse(line)).collect()
    }

    /// Every address token after the mnemonic must be a letter followed by a number
    fn check_tokens(line_number: u32, cleaned: &str) -> Result<(), GcodeError> {
        static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = TOKEN_REGEX.get_or_init(|| {
            Regex::new(r"^[XYZAFxyzaf][-+]?[0-9]*\.?[0-9]+$").expect("invalid regex pattern")
        });

        match cleaned
            .split_whitespace()
            .skip(1)
            .find(|token| !regex.is_match(token))
        {
            Some(token) => Err(GcodeError::InvalidNumber {
                line_number,
                token: token.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn axis_regex() -> &'static Regex {
        static AXIS_REGEX: OnceLock<Regex> = OnceLock::new();
        AXIS_REGEX.get_or_init(|| {
            Regex::new(r"(?i)([XYZAF])([-+]?[0-9]*\.?[0-9]+)").expect("invalid regex pattern")
        })
    }

    /// Remove comments from a G-Code line
    fn remove_comments(line: &str) -> String {
        static COMMENT_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = COMMENT_REGEX.get_or_init(|| Regex::new(r"[;(].*").expect("invalid regex pattern"));
        regex.replace(line, "").to_string()
    }

    fn extract_comment(line: &str) -> Option<String> {
        let start = line.find(['(', ';'])?;
        let text = line[start + 1..].trim_end();
        let text = text.strip_suffix(')').unwrap_or(text).trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}
