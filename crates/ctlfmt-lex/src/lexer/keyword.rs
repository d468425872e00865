//! Keyword lexing.
//!
//! Handles the composite `else if` keyword, the standalone `if`/`else`
//! rules, reserved words, `main`, and the type/template/modifier keyword
//! sets. All word probes are bounds-checked; the character after a match
//! must not continue the word.

use crate::keywords::{ACCESS_MODIFIERS, KEYWORDS, MODIFIERS, TEMPLATE_TYPE_KEYWORDS};
use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Composite `else if` (any positive amount of whitespace between the
    /// words), then `if`, then `else`, then the reserved-word table.
    pub(super) fn match_keyword(&mut self) -> Option<Token> {
        if let Some(length) = self.composite_else_if_length() {
            self.cursor.advance_n(length);
            return Some(self.make(TokenKind::ElseIf, "else if".to_string()));
        }

        if self.word_ahead("if") {
            self.cursor.advance_n(2);
            return Some(self.make(TokenKind::If, "if".to_string()));
        }

        if self.word_ahead("else") {
            self.cursor.advance_n(4);
            return Some(self.make(TokenKind::Else, "else".to_string()));
        }

        for keyword in KEYWORDS {
            if self.word_ahead(keyword) {
                self.cursor.advance_n(keyword.len());
                return Some(self.make(TokenKind::Keyword, (*keyword).to_string()));
            }
        }

        None
    }

    /// `main`, emitted with its own kind.
    pub(super) fn match_main_keyword(&mut self) -> Option<Token> {
        if self.word_ahead("main") {
            self.cursor.advance_n(4);
            return Some(self.make(TokenKind::MainKeyword, "main".to_string()));
        }
        None
    }

    /// Built-in, `dyn_`-prefixed and library type names. Unlike the other
    /// keyword sets, an underscore also continues the word here, so that
    /// `int_count` stays an identifier.
    pub(super) fn match_type_keyword(&mut self) -> Option<Token> {
        let matched = self
            .keywords
            .type_keywords
            .iter()
            .find(|keyword| {
                self.cursor.starts_with(keyword) && {
                    let next = self.cursor.peek_char(keyword.len());
                    !next.is_alphanumeric() && next != '_'
                }
            })
            .cloned()?;

        self.cursor.advance_n(matched.len());
        Some(self.make(TokenKind::TypeKeyword, matched))
    }

    /// `vector` and `shared_ptr`.
    pub(super) fn match_template_type_keyword(&mut self) -> Option<Token> {
        for keyword in TEMPLATE_TYPE_KEYWORDS {
            if self.word_ahead(keyword) {
                self.cursor.advance_n(keyword.len());
                return Some(self.make(TokenKind::TemplateTypeKeyword, (*keyword).to_string()));
            }
        }
        None
    }

    /// `public`, `private`, `protected`.
    pub(super) fn match_access_modifier(&mut self) -> Option<Token> {
        for keyword in ACCESS_MODIFIERS {
            if self.word_ahead(keyword) {
                self.cursor.advance_n(keyword.len());
                return Some(self.make(TokenKind::AccessModifier, (*keyword).to_string()));
            }
        }
        None
    }

    /// `static`, `global`, `synchronized`.
    pub(super) fn match_modifier(&mut self) -> Option<Token> {
        for keyword in MODIFIERS {
            if self.word_ahead(keyword) {
                self.cursor.advance_n(keyword.len());
                return Some(self.make(TokenKind::Modifier, (*keyword).to_string()));
            }
        }
        None
    }

    /// True if `word` sits at the cursor and the character after it is not
    /// alphanumeric. At end of input the boundary holds trivially.
    fn word_ahead(&self, word: &str) -> bool {
        self.cursor.starts_with(word) && !self.cursor.peek_char(word.len()).is_alphanumeric()
    }

    /// Length in characters of a composite `else if` at the cursor, if one
    /// is present: `else`, one or more whitespace characters, `if`, and a
    /// word boundary (not alphanumeric, not underscore) after.
    fn composite_else_if_length(&self) -> Option<usize> {
        if !self.cursor.starts_with("else") {
            return None;
        }

        let mut length = 4;
        let mut whitespace = 0;
        while self.cursor.peek_char(length).is_whitespace() {
            length += 1;
            whitespace += 1;
        }
        if whitespace == 0 {
            return None;
        }

        if self.cursor.peek_char(length) != 'i' || self.cursor.peek_char(length + 1) != 'f' {
            return None;
        }
        length += 2;

        let next = self.cursor.peek_char(length);
        if next.is_alphanumeric() || next == '_' {
            return None;
        }

        Some(length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(source: &str) -> Token {
        Lexer::new(source).tokenize().unwrap().remove(0)
    }

    #[test]
    fn test_else_if_is_one_token() {
        let token = first("else if (a)");
        assert_eq!(token.kind, TokenKind::ElseIf);
        assert_eq!(token.lexeme, "else if");
    }

    #[test]
    fn test_else_if_across_newline() {
        let token = first("else\n   if (a)");
        assert_eq!(token.kind, TokenKind::ElseIf);
        assert_eq!(token.lexeme, "else if");
    }

    #[test]
    fn test_plain_if_and_else() {
        assert_eq!(first("if (a)").kind, TokenKind::If);
        assert_eq!(first("else {").kind, TokenKind::Else);
    }

    #[test]
    fn test_elseif_without_space_is_identifier() {
        assert_eq!(first("elseif").kind, TokenKind::Identifier);
    }

    #[test]
    fn test_reserved_keywords() {
        for lexeme in ["while", "const", "switch", "finally", "new"] {
            let token = first(&format!("{lexeme} x"));
            assert_eq!(token.kind, TokenKind::Keyword, "{lexeme}");
            assert_eq!(token.lexeme, lexeme);
        }
    }

    #[test]
    fn test_keyword_needs_word_boundary() {
        assert_eq!(first("whileX").kind, TokenKind::Identifier);
        assert_eq!(first("format").kind, TokenKind::Identifier);
    }

    #[test]
    fn test_main_keyword() {
        assert_eq!(first("main()").kind, TokenKind::MainKeyword);
        assert_eq!(first("mainline").kind, TokenKind::Identifier);
    }

    #[test]
    fn test_type_keywords() {
        for lexeme in ["int", "dyn_string", "dyn_dyn_float", "errClass", "TfString"] {
            let token = first(&format!("{lexeme} v"));
            assert_eq!(token.kind, TokenKind::TypeKeyword, "{lexeme}");
        }
    }

    #[test]
    fn test_type_keyword_underscore_boundary() {
        // `int_count` must not split into `int` + `_count`.
        assert_eq!(first("int_count").kind, TokenKind::Identifier);
    }

    #[test]
    fn test_template_and_modifiers() {
        assert_eq!(first("vector<int>").kind, TokenKind::TemplateTypeKeyword);
        assert_eq!(first("shared_ptr<T>").kind, TokenKind::TemplateTypeKeyword);
        assert_eq!(first("public int").kind, TokenKind::AccessModifier);
        assert_eq!(first("static int").kind, TokenKind::Modifier);
        assert_eq!(first("synchronized f").kind, TokenKind::Modifier);
    }

    #[test]
    fn test_keyword_at_end_of_input() {
        // Word-boundary probe at the last character must not index past the end.
        assert_eq!(first("return").kind, TokenKind::Keyword);
        assert_eq!(first("int").kind, TokenKind::TypeKeyword);
        assert_eq!(first("main").kind, TokenKind::MainKeyword);
    }
}
