//! Core error types for the ctlfmt pipeline.
//!
//! Two things can go wrong while linting a file: the lexer can hit a
//! character no rule recognizes, or the parser can fail to find a required
//! token. Neither is recovered from; both propagate to the pipeline entry
//! point, which hands the driver a single [`CtlError`] for logging.

use thiserror::Error;

use crate::position::Position;

/// Error raised when no lexer rule matches at the cursor.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unexpected character '{character}' at {position}")]
pub struct LexError {
    /// Where the offending character sits in the source.
    pub position: Position,

    /// The character that no rule recognized.
    pub character: char,
}

impl LexError {
    /// Creates a lex error for the character at the given position.
    pub fn new(position: Position, character: char) -> Self {
        Self {
            position,
            character,
        }
    }
}

/// Error raised when the parser requires a token that is not present.
///
/// Carries the offending token's lexeme and position so the driver can log
/// `file -> error` lines without holding on to the token stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message} at {position} (near '{lexeme}')")]
pub struct ParseError {
    /// Human-readable description of what the parser expected.
    pub message: String,

    /// Lexeme of the token the parser was looking at.
    pub lexeme: String,

    /// Position of the offending token.
    pub position: Position,
}

impl ParseError {
    /// Creates a parse error at the given token position.
    pub fn new(message: impl Into<String>, lexeme: impl Into<String>, position: Position) -> Self {
        Self {
            message: message.into(),
            lexeme: lexeme.into(),
            position,
        }
    }
}

/// Any failure produced by the core pipeline for a single file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CtlError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl CtlError {
    /// Position the failure was reported at.
    pub fn position(&self) -> Position {
        match self {
            CtlError::Lex(e) => e.position,
            CtlError::Parse(e) => e.position,
        }
    }
}
