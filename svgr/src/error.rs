//! Error types for path interpretation and document loading

use std::io;
use thiserror::Error;

/// Errors raised while interpreting path data.
///
/// Offsets are byte positions into the string handed to the interpreter.
/// Commands emitted before the error stay emitted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown path command '{command}' at byte {offset}")]
    UnknownCommand { command: char, offset: usize },

    #[error("expected a number at byte {offset}")]
    MalformedNumber { offset: usize },

    #[error("expected an arc flag at byte {offset}")]
    MalformedFlag { offset: usize },

    /// Coordinates appeared where no command can be repeated, either at
    /// the start of the data or after a closepath.
    #[error("coordinates at byte {offset} do not follow a command")]
    MissingCommand { offset: usize },

    #[error("byte range {start}..{end} is not a valid slice of the path data")]
    InvalidRange { start: usize, end: usize },
}

/// Errors that can occur when loading an SVG document
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed SVG: {0}")]
    Xml(String),

    #[error("invalid transform: {0}")]
    Transform(String),

    #[error("invalid viewBox: {0}")]
    ViewBox(String),
}
