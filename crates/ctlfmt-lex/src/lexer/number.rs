//! Number literal lexing.
//!
//! Four shapes, tried in this order:
//! - hex `0x...`, binary `0b...`, octal `0o...`, each with an optional
//!   `u`/`U`/`l`/`L` suffix; a prefix with no digits after it is a lex error
//! - floats: digits (or a leading `.digits`), an optional single `.`,
//!   an optional `e`/`E` exponent with optional sign, an optional `f`/`F`
//!   suffix; underscores are accepted as digit separators
//! - decimal integers with underscore separators and an optional suffix
//!
//! All shapes come out as one `NUMBER` token carrying the raw lexeme.

use ctlfmt_util::LexError;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    pub(super) fn match_number(&mut self) -> Result<Option<Token>, LexError> {
        let c = self.cursor.current_char();
        let leading_dot = c == '.' && self.cursor.peek_char(1).is_ascii_digit();
        if !c.is_ascii_digit() && !leading_dot {
            return Ok(None);
        }

        if c == '0' {
            match self.cursor.peek_char(1) {
                'x' | 'X' => return self.lex_prefixed(16).map(Some),
                'b' | 'B' => return self.lex_prefixed(2).map(Some),
                'o' | 'O' => return self.lex_prefixed(8).map(Some),
                _ => {}
            }
        }

        Ok(Some(self.lex_decimal_or_float()))
    }

    /// Hex, binary or octal: prefix, digit run, optional suffix.
    fn lex_prefixed(&mut self, radix: u32) -> Result<Token, LexError> {
        let start = self.cursor.position();
        let prefix = self.cursor.peek_char(1);
        self.cursor.advance_n(2);

        let digits_start = self.cursor.position();
        while self.cursor.current_char().is_digit(radix) {
            self.cursor.advance();
        }

        if self.cursor.position() == digits_start {
            let character = if self.cursor.is_at_end() {
                prefix
            } else {
                self.cursor.current_char()
            };
            return Err(self.error_at_start(character));
        }

        if matches!(self.cursor.current_char(), 'u' | 'U' | 'l' | 'L') {
            self.cursor.advance();
        }

        Ok(self.make(TokenKind::Number, self.cursor.slice_from(start).to_string()))
    }

    /// Decimal integer or float, one token either way.
    fn lex_decimal_or_float(&mut self) -> Token {
        let start = self.cursor.position();
        let mut is_float = false;

        self.consume_digit_run();

        if self.cursor.current_char() == '.'
            && (self.cursor.position() > start || self.cursor.peek_char(1).is_ascii_digit())
        {
            self.cursor.advance();
            self.consume_digit_run();
            is_float = true;
        }

        if self.exponent_ahead() {
            self.cursor.advance(); // e / E
            if matches!(self.cursor.current_char(), '+' | '-') {
                self.cursor.advance();
            }
            self.consume_digit_run();
            is_float = true;
        }

        if matches!(self.cursor.current_char(), 'f' | 'F') {
            self.cursor.advance();
            is_float = true;
        }

        if !is_float && matches!(self.cursor.current_char(), 'u' | 'U' | 'l' | 'L') {
            self.cursor.advance();
        }

        self.make(TokenKind::Number, self.cursor.slice_from(start).to_string())
    }

    /// `[0-9_]*`; underscores are digit separators.
    fn consume_digit_run(&mut self) {
        loop {
            let c = self.cursor.current_char();
            if c.is_ascii_digit() || c == '_' {
                self.cursor.advance();
            } else {
                break;
            }
        }
    }

    /// True if an `e`/`E` exponent with at least one digit follows. Without
    /// the digit the `e` is left alone so `12e` lexes as `12` + identifier.
    fn exponent_ahead(&self) -> bool {
        if !matches!(self.cursor.current_char(), 'e' | 'E') {
            return false;
        }
        let after = self.cursor.peek_char(1);
        after.is_ascii_digit()
            || (matches!(after, '+' | '-') && self.cursor.peek_char(2).is_ascii_digit())
    }
}
