//! Divider lexing.
//!
//! Control scripts separate sections with lines of box-drawing characters.
//! A run of `─` (U+2500) is one divider token; a `─` immediately followed
//! by a `//` comment fuses the comment into the same token. A run of `═`
//! (U+2550) is also a divider. Dividers pass through the formatter
//! verbatim.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn match_divider(&mut self) -> Option<Token> {
        let start = self.cursor.position();

        match self.cursor.current_char() {
            '─' => {
                self.cursor.advance();

                if self.cursor.starts_with("//") {
                    self.cursor.advance_n(2);
                    while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                        self.cursor.advance();
                    }
                    return Some(
                        self.make(TokenKind::Divider, self.cursor.slice_from(start).to_string()),
                    );
                }

                while self.cursor.current_char() == '─' {
                    self.cursor.advance();
                }
                Some(self.make(TokenKind::Divider, self.cursor.slice_from(start).to_string()))
            }
            '═' => {
                self.cursor.advance();
                while self.cursor.current_char() == '═' {
                    self.cursor.advance();
                }
                Some(self.make(TokenKind::Divider, self.cursor.slice_from(start).to_string()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(source: &str) -> Token {
        Lexer::new(source).tokenize().unwrap().remove(0)
    }

    #[test]
    fn test_light_divider_run() {
        let token = first("────────\nint x;");
        assert_eq!(token.kind, TokenKind::Divider);
        assert_eq!(token.lexeme, "────────");
    }

    #[test]
    fn test_double_divider_run() {
        let token = first("══════");
        assert_eq!(token.kind, TokenKind::Divider);
        assert_eq!(token.lexeme, "══════");
    }

    #[test]
    fn test_divider_with_fused_comment() {
        let token = first("─// section: callbacks\nint x;");
        assert_eq!(token.kind, TokenKind::Divider);
        assert_eq!(token.lexeme, "─// section: callbacks");
    }

    #[test]
    fn test_divider_at_eof() {
        let token = first("──");
        assert_eq!(token.lexeme, "──");
    }
}
