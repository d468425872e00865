//! Identifier lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Identifiers: `[A-Za-z_][A-Za-z0-9_]*`. Keywords have already been
    /// tried at this point, so whatever matches here is a plain name.
    pub(super) fn match_identifier(&mut self) -> Option<Token> {
        let c = self.cursor.current_char();
        if !(c.is_ascii_alphabetic() || c == '_') {
            return None;
        }

        let start = self.cursor.position();
        self.cursor.advance();
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_alphanumeric() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }

        Some(self.make(TokenKind::Identifier, self.cursor.slice_from(start).to_string()))
    }
}
