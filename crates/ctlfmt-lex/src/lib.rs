//! ctlfmt-lex - Lexical analyzer for CTL control scripts.
//!
//! Turns raw source text into a stream of classified [`Token`]s while
//! tracking 1-based line/column positions. The stream always ends with
//! exactly one `EOF` token; whitespace stays in the stream (the parser
//! skips it), and a whitespace run containing a blank line is marked with
//! its own `NEWLINE` kind so the formatter can preserve it.
//!
//! Recognition order at each cursor position, first match wins:
//!
//! 1. composite `else if`, then standalone `if` / `else`
//! 2. reserved keywords, `main`
//! 3. type keywords (built-ins, `dyn_`/`dyn_dyn_` variants, library types)
//! 4. template type keywords, access modifiers, modifiers
//! 5. identifiers
//! 6. `/* */` and `//` comments
//! 7. operators (tables searched longest-first, with the `<`/`<<` guard)
//! 8. numbers (hex, binary, octal, float, decimal)
//! 9. symbols (`::`, `<<`, `>>` before their one-character prefixes)
//! 10. string and char literals
//! 11. box-drawing dividers
//! 12. whitespace / blank-line markers
//!
//! Anything else is a [`LexError`](ctlfmt_util::LexError) carrying the
//! position and the offending character.
//!
//! # Example
//!
//! ```
//! use ctlfmt_lex::{Lexer, TokenKind};
//!
//! let tokens = Lexer::new("int x = 1;").tokenize().unwrap();
//! assert_eq!(tokens.first().unwrap().kind, TokenKind::TypeKeyword);
//! assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
//! ```

pub mod cursor;
pub mod keywords;
mod lexer;
pub mod token;

#[cfg(test)]
mod edge_cases;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};
