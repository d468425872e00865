//! ctlfmt-util - Shared infrastructure for the ctlfmt pipeline.
//!
//! This crate holds the types every other pipeline crate agrees on:
//! source positions and the error values that cross crate boundaries.
//! Nothing in here knows anything about CTL syntax.

pub mod error;
pub mod position;

pub use error::{CtlError, LexError, ParseError};
pub use position::Position;
