//! Token model.
//!
//! A token is a classified slice of source text: a kind from the closed
//! [`TokenKind`] enumeration, the lexeme it was cut from, and the 1-based
//! line/column of its first character. Whitespace and blank-line tokens are
//! kept in the stream; the parser skips them transparently.

use std::fmt;

use ctlfmt_util::Position;

/// Classification of a lexeme.
///
/// This is a closed enumeration: the lexer never emits anything outside it,
/// and the parser matches on it exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A run of whitespace containing at most one newline.
    Whitespace,
    /// A run of whitespace containing two or more newlines (blank line).
    Newline,
    /// End of input. Exactly one per token stream, always last.
    Eof,
    Identifier,
    Number,
    /// `+ - * / % ++ --`
    ArithmeticOperator,
    /// `== != < <= > >=`
    ComparisonOperator,
    /// `&& || !`
    LogicalOperator,
    /// `= += -= *= /= %=`
    AssignmentOperator,
    /// A reserved word such as `while`, `const` or `new`.
    Keyword,
    /// Punctuation: parens, braces, `::`, `<<`, `>>`, `$`, `#`, ...
    Symbol,
    StringLiteral,
    /// A `//` comment; the lexeme is the text after the slashes.
    Comment,
    /// A `/* */` comment; the lexeme is the text between the delimiters.
    MultiLineComment,
    /// A run of box-drawing characters, preserved verbatim.
    Divider,
    /// A built-in, `dyn_`-prefixed or library type name.
    TypeKeyword,
    MainKeyword,
    If,
    Else,
    /// The composite `else if`, fused into a single token by the lexer.
    ElseIf,
    /// `vector` or `shared_ptr`.
    TemplateTypeKeyword,
    /// A single-quoted literal, quotes included in the lexeme.
    Char,
    /// `public`, `private` or `protected`.
    AccessModifier,
    /// `static`, `global` or `synchronized`.
    Modifier,
}

impl TokenKind {
    /// Canonical upper-case name, used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::ArithmeticOperator => "ARITHMETIC_OPERATOR",
            TokenKind::ComparisonOperator => "COMPARISON_OPERATOR",
            TokenKind::LogicalOperator => "LOGICAL_OPERATOR",
            TokenKind::AssignmentOperator => "ASSIGNMENT_OPERATOR",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::StringLiteral => "STRING_LITERAL",
            TokenKind::Comment => "COMMENT",
            TokenKind::MultiLineComment => "MULTI_LINE_COMMENT",
            TokenKind::Divider => "DIVIDER",
            TokenKind::TypeKeyword => "TYPE_KEYWORD",
            TokenKind::MainKeyword => "MAIN_KEYWORD",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::ElseIf => "ELSE_IF",
            TokenKind::TemplateTypeKeyword => "TEMPLATE_TYPE_KEYWORD",
            TokenKind::Char => "CHAR",
            TokenKind::AccessModifier => "ACCESS_MODIFIER",
            TokenKind::Modifier => "MODIFIER",
        }
    }

    /// True for the kinds the parser advances past without looking.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Newline)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single lexed token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// Classification of the lexeme.
    pub kind: TokenKind,

    /// The raw text this token was cut from. Empty for `Eof`.
    pub lexeme: String,

    /// Line of the first character (1-based).
    pub line: u32,

    /// Column of the first character (1-based).
    pub column: u32,
}

impl Token {
    /// Creates a token at the given position.
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
        }
    }

    /// The position of the token's first character.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// True if this token has the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// True if this token is a `SYMBOL` with the given lexeme.
    pub fn is_symbol(&self, lexeme: &str) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme == lexeme
    }

    /// True if this token is a `KEYWORD` with the given lexeme.
    pub fn is_keyword(&self, lexeme: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == lexeme
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let escaped = self.lexeme.replace('\n', "\\n").replace('\t', "\\t");
        write!(
            f,
            "{}({}) at line {}, column {}",
            self.kind, escaped, self.line, self.column
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(TokenKind::ElseIf.as_str(), "ELSE_IF");
        assert_eq!(TokenKind::MultiLineComment.as_str(), "MULTI_LINE_COMMENT");
        assert_eq!(TokenKind::TemplateTypeKeyword.to_string(), "TEMPLATE_TYPE_KEYWORD");
    }

    #[test]
    fn test_trivia() {
        assert!(TokenKind::Whitespace.is_trivia());
        assert!(TokenKind::Newline.is_trivia());
        assert!(!TokenKind::Eof.is_trivia());
        assert!(!TokenKind::Comment.is_trivia());
    }

    #[test]
    fn test_symbol_probe() {
        let token = Token::new(TokenKind::Symbol, ";", 1, 4);
        assert!(token.is_symbol(";"));
        assert!(!token.is_symbol(","));
        assert!(!token.is_keyword(";"));
    }

    #[test]
    fn test_display_escapes_newlines() {
        let token = Token::new(TokenKind::Whitespace, "\n\t", 2, 1);
        assert_eq!(token.to_string(), "WHITESPACE(\\n\\t) at line 2, column 1");
    }
}
