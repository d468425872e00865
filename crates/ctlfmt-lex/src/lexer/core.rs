//! Core lexer implementation.
//!
//! This module contains the main [`Lexer`] struct, the rule dispatch loop
//! and the whitespace/blank-line rule. The recognition order is fixed:
//! composite and reserved keywords first, then identifiers, comments,
//! operators, numbers, symbols, string/char literals, dividers, and
//! finally whitespace. The first rule that matches at the cursor wins.

use ctlfmt_util::{LexError, Position};

use crate::cursor::Cursor;
use crate::keywords::KeywordTable;
use crate::token::{Token, TokenKind};

/// Lexer for CTL control scripts.
///
/// Produces the complete token stream for a source string, terminated by
/// exactly one `EOF` token. Whitespace is preserved in the stream; a
/// whitespace run containing two or more newlines becomes a `NEWLINE`
/// blank-line marker instead.
pub struct Lexer<'a> {
    /// Character cursor over the source.
    pub(super) cursor: Cursor<'a>,

    /// Keyword, operator and symbol tables. Read-only after construction.
    pub(super) keywords: KeywordTable,

    /// Line where the current token starts (1-based).
    token_line: u32,

    /// Column where the current token starts (1-based).
    token_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for the given source code. The type-keyword table
    /// (base types plus their `dyn_`/`dyn_dyn_` variants) is expanded here.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            keywords: KeywordTable::new(),
            token_line: 1,
            token_column: 1,
        }
    }

    /// Tokenizes the entire source.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] carrying the position and the offending
    /// character as soon as no rule matches at the cursor.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        while !self.cursor.is_at_end() {
            self.token_line = self.cursor.line();
            self.token_column = self.cursor.column();
            tokens.push(self.scan_token()?);
        }

        self.token_line = self.cursor.line();
        self.token_column = self.cursor.column();
        tokens.push(self.make(TokenKind::Eof, String::new()));

        Ok(tokens)
    }

    /// Scans one token at the cursor. First match wins.
    fn scan_token(&mut self) -> Result<Token, LexError> {
        if let Some(token) = self.match_keyword() {
            return Ok(token);
        }
        if let Some(token) = self.match_main_keyword() {
            return Ok(token);
        }
        if let Some(token) = self.match_type_keyword() {
            return Ok(token);
        }
        if let Some(token) = self.match_template_type_keyword() {
            return Ok(token);
        }
        if let Some(token) = self.match_access_modifier() {
            return Ok(token);
        }
        if let Some(token) = self.match_modifier() {
            return Ok(token);
        }
        if let Some(token) = self.match_identifier() {
            return Ok(token);
        }
        if let Some(token) = self.match_multiline_comment()? {
            return Ok(token);
        }
        if let Some(token) = self.match_comment() {
            return Ok(token);
        }
        if let Some(token) = self.match_operator() {
            return Ok(token);
        }
        if let Some(token) = self.match_number()? {
            return Ok(token);
        }
        if let Some(token) = self.match_symbol() {
            return Ok(token);
        }
        if let Some(token) = self.match_string()? {
            return Ok(token);
        }
        if let Some(token) = self.match_char()? {
            return Ok(token);
        }
        if let Some(token) = self.match_divider() {
            return Ok(token);
        }
        if let Some(token) = self.match_whitespace() {
            return Ok(token);
        }

        Err(self.error_here())
    }

    /// Whitespace rule. A run of whitespace is one token; a run containing
    /// two or more newlines is a blank-line marker instead.
    fn match_whitespace(&mut self) -> Option<Token> {
        if !self.cursor.current_char().is_whitespace() {
            return None;
        }

        let start = self.cursor.position();
        let mut newlines = 0u32;
        while !self.cursor.is_at_end() && self.cursor.current_char().is_whitespace() {
            if self.cursor.current_char() == '\n' {
                newlines += 1;
            }
            self.cursor.advance();
        }

        let kind = if newlines >= 2 {
            TokenKind::Newline
        } else {
            TokenKind::Whitespace
        };
        Some(self.make(kind, self.cursor.slice_from(start).to_string()))
    }

    /// Builds a token at the recorded start position of the current scan.
    pub(super) fn make(&self, kind: TokenKind, lexeme: String) -> Token {
        Token::new(kind, lexeme, self.token_line, self.token_column)
    }

    /// Lex error at the character currently under the cursor.
    pub(super) fn error_here(&self) -> LexError {
        LexError::new(
            Position::new(self.cursor.line(), self.cursor.column()),
            self.cursor.current_char(),
        )
    }

    /// Lex error at the recorded start of the current token. Used when a
    /// rule commits (string quote, comment opener, numeric prefix) and then
    /// runs out of input.
    pub(super) fn error_at_start(&self, character: char) -> LexError {
        LexError::new(Position::new(self.token_line, self.token_column), character)
    }
}
