//! Comment lexing.
//!
//! `//` comments run to (but not including) the next newline; a comment at
//! end of file without a trailing newline is fine. `/* */` and `/** */`
//! comments may span lines; their lexeme is the content between the
//! delimiters. An unterminated block comment is a lex error at the opening
//! slash.

use ctlfmt_util::LexError;

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// `/* ... */` or `/** ... */`.
    pub(super) fn match_multiline_comment(&mut self) -> Result<Option<Token>, LexError> {
        if !self.cursor.starts_with("/*") {
            return Ok(None);
        }

        let is_doc_comment = self.cursor.starts_with("/**");
        self.cursor.advance_n(if is_doc_comment { 3 } else { 2 });

        let start = self.cursor.position();
        while !self.cursor.is_at_end() && !self.cursor.starts_with("*/") {
            self.cursor.advance();
        }

        if self.cursor.is_at_end() {
            return Err(self.error_at_start('/'));
        }

        let content = self.cursor.slice_from(start).to_string();
        self.cursor.advance_n(2);
        Ok(Some(self.make(TokenKind::MultiLineComment, content)))
    }

    /// `// ...` up to the next newline; the lexeme is the text after `//`.
    pub(super) fn match_comment(&mut self) -> Option<Token> {
        if !self.cursor.starts_with("//") {
            return None;
        }

        self.cursor.advance_n(2);
        let start = self.cursor.position();
        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }

        Some(self.make(TokenKind::Comment, self.cursor.slice_from(start).to_string()))
    }
}
