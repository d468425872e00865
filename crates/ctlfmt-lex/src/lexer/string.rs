//! String and char literal lexing.
//!
//! Double-quoted text is a string literal and may span lines; backslash
//! escapes the next character. Single-quoted text is a char literal: the
//! shortest escape-aware run to the closing quote on the same line. Both
//! lexemes include the surrounding quotes and are re-emitted verbatim. An
//! unterminated literal is a lex error at the opening quote.

use ctlfmt_util::LexError;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `"..."` with `\` as a single-character escape.
    pub(super) fn match_string(&mut self) -> Result<Option<Token>, LexError> {
        if self.cursor.current_char() != '"' {
            return Ok(None);
        }

        let start = self.cursor.position();
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                return Err(self.error_at_start('"'));
            }
            match self.cursor.current_char() {
                '\\' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '"' => {
                    self.cursor.advance();
                    break;
                }
                _ => self.cursor.advance(),
            }
        }

        Ok(Some(self.make(
            TokenKind::StringLiteral,
            self.cursor.slice_from(start).to_string(),
        )))
    }

    /// `'...'`, not crossing a newline.
    pub(super) fn match_char(&mut self) -> Result<Option<Token>, LexError> {
        if self.cursor.current_char() != '\'' {
            return Ok(None);
        }

        let start = self.cursor.position();
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() || self.cursor.current_char() == '\n' {
                return Err(self.error_at_start('\''));
            }
            match self.cursor.current_char() {
                '\\' => {
                    self.cursor.advance();
                    self.cursor.advance();
                }
                '\'' => {
                    self.cursor.advance();
                    break;
                }
                _ => self.cursor.advance(),
            }
        }

        Ok(Some(self.make(
            TokenKind::Char,
            self.cursor.slice_from(start).to_string(),
        )))
    }
}
