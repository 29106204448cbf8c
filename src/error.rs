//! Error types for the simulator front end.

use thiserror::Error;

use crate::display::MimeType;

/// A single script line could not be understood.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseCommandError {
    /// The line holds no command.
    #[error("empty command")]
    Empty,
    /// The first word is not a known command.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    /// A direction word did not match the expected set.
    #[error("expected {expected}, found `{found}`")]
    Direction {
        /// Accepted spellings.
        expected: &'static str,
        /// Offending word.
        found: String,
    },
    /// A required argument is absent.
    #[error("missing {0}")]
    MissingArgument(&'static str),
    /// An argument is not a number.
    #[error("{name} must be a number, found `{value}`")]
    InvalidNumber {
        /// Argument name.
        name: &'static str,
        /// Offending text.
        value: String,
    },
    /// More words follow a complete command.
    #[error("unexpected trailing argument `{0}`")]
    TrailingArgument(String),
}

/// A script failed to parse.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    /// 1-based line number.
    pub line: usize,
    /// What was wrong with it.
    pub source: ParseCommandError,
}

/// A MIME string names no representation the simulator produces.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("unknown MIME type `{0}`")]
pub struct UnknownMimeType(pub String);

/// A display surface could not show a drawing.
#[derive(Debug, Error)]
pub enum DisplayError {
    /// No host is attached to the surface.
    #[error("display surface is unavailable")]
    Unavailable,
    /// The bundle lacks the only representation the surface can show.
    #[error("display surface needs {0}")]
    Unsupported(MimeType),
    /// Host-specific failure.
    #[error("display failed: {0}")]
    Surface(String),
}
