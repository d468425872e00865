//! ctlfmt-par - Recursive-descent parser for CTL control scripts.
//!
//! Consumes the token stream from `ctlfmt-lex` and produces a typed
//! [`Program`] AST. The grammar is ambiguous at several points without
//! lookahead: assignments, declarations, function declarations and
//! function calls all begin with an identifier. The parser resolves these
//! with deterministic, whitespace-transparent peek predicates over the
//! token vector; it never rewinds past a consumed token.
//!
//! A small [`SymbolTable`] records user-defined enum/struct/class names as
//! they are declared, so that an identifier in type position can be told
//! apart from an ordinary identifier, and so `A::B` can be classified as
//! an enum access or a class-static access.
//!
//! Expression precedence, lowest to highest:
//!
//! | Level | Operators |
//! |-------|-----------|
//! | conditional | `? :` (right-assoc, one level) |
//! | logical-or | `\|\|` |
//! | logical-and | `&&` |
//! | unary | prefix `!` `~` (chains) |
//! | bitwise-or | `\|` |
//! | bitwise-xor | `^` |
//! | bitwise-and | `&` |
//! | shift | `<<` `>>` |
//! | relational | `== != < <= > >=` (one level) |
//! | additive | `+` `-` |
//! | multiplicative | `*` `/` `%` |
//! | factor | primary with `.attr`, `[index]`, `(args)` chains |
//!
//! Failures are fatal to the current file: every parse function returns a
//! [`ParseError`] through `?` and no resynchronization is attempted.

mod ast;
mod dump;
mod emit;
mod expr;
mod items;
mod stmt;
mod symbols;
mod types;

#[cfg(test)]
mod edge_cases;

pub use ast::*;
pub use emit::{indent, join_statements};
pub use symbols::{SymbolTable, UserTypeTag};

use ctlfmt_lex::{Token, TokenKind};
use ctlfmt_util::ParseError;

/// Result of a parse step.
pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive-descent parser over a lexed token vector.
pub struct Parser {
    /// The full token stream, `EOF`-terminated.
    tokens: Vec<Token>,

    /// Cursor into `tokens`. Always rests on a non-trivia token.
    pos: usize,

    /// User-defined type names seen so far.
    symbols: SymbolTable,

    /// Set when the cursor skipped a blank-line marker; drained at
    /// statement boundaries into `Stmt::BlankLine` nodes.
    blank_pending: bool,
}

impl Parser {
    /// Creates a parser over a token stream. The stream is expected to be
    /// `EOF`-terminated (the lexer guarantees this); an empty stream gets
    /// an `EOF` token so the cursor always has something to rest on.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut parser = Self {
            tokens,
            pos: 0,
            symbols: SymbolTable::new(),
            blank_pending: false,
        };
        if parser.tokens.is_empty() {
            parser.tokens.push(Token::new(TokenKind::Eof, "", 1, 1));
        }
        parser.skip_trivia();
        parser
    }

    /// Parses the whole token stream into a program.
    pub fn parse(mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        while self.current().kind != TokenKind::Eof {
            if self.take_blank() {
                statements.push(Stmt::BlankLine);
                continue;
            }
            let statement = self.parse_statement()?;
            statements.push(statement);
        }
        Ok(Program { statements })
    }

    // =========================================================================
    // Token cursor
    // =========================================================================

    /// The token under the cursor. Never trivia, never past `EOF`.
    pub(crate) fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// The n-th non-trivia token after the cursor (`peek(0)` is the
    /// current token). Clamped to the trailing `EOF`; the scan never reads
    /// past the end of the vector.
    pub(crate) fn peek(&self, n: usize) -> &Token {
        let last = self.tokens.len() - 1;
        let mut idx = self.pos;
        for _ in 0..n {
            if idx >= last {
                break;
            }
            idx += 1;
            while idx < last && self.tokens[idx].kind.is_trivia() {
                idx += 1;
            }
        }
        &self.tokens[idx.min(last)]
    }

    /// Moves the cursor to the next non-trivia token, recording any
    /// blank-line marker it passes.
    pub(crate) fn advance(&mut self) {
        let last = self.tokens.len() - 1;
        if self.pos < last {
            self.pos += 1;
        }
        self.skip_trivia();
    }

    fn skip_trivia(&mut self) {
        let last = self.tokens.len() - 1;
        while self.pos < last && self.tokens[self.pos].kind.is_trivia() {
            if self.tokens[self.pos].kind == TokenKind::Newline {
                self.blank_pending = true;
            }
            self.pos += 1;
        }
    }

    /// Drains the pending blank-line flag.
    pub(crate) fn take_blank(&mut self) -> bool {
        std::mem::take(&mut self.blank_pending)
    }

    /// Drops a pending blank-line flag (used before a closing brace, where
    /// a blank line is not between two statements).
    pub(crate) fn clear_blank(&mut self) {
        self.blank_pending = false;
    }

    /// Requires the current token to have the given kind, returns it and
    /// advances.
    pub(crate) fn consume(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.current().kind == kind {
            let token = self.current().clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.error(format!("expected {kind} but got {}", self.current().kind)))
        }
    }

    /// Requires the current token to be a symbol with the given lexeme.
    pub(crate) fn consume_symbol(&mut self, symbol: &str) -> ParseResult<Token> {
        if self.current().is_symbol(symbol) {
            let token = self.current().clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.error(format!(
                "expected '{symbol}' but got {}",
                self.current().kind
            )))
        }
    }

    /// Requires the current token to be a keyword with the given lexeme.
    pub(crate) fn consume_keyword(&mut self, keyword: &str) -> ParseResult<Token> {
        if self.current().is_keyword(keyword) {
            let token = self.current().clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.error(format!(
                "expected '{keyword}' but got {}",
                self.current().kind
            )))
        }
    }

    /// Requires a `;`, with a message naming the construct it terminates.
    pub(crate) fn consume_statement_end(&mut self, what: &str) -> ParseResult<()> {
        if self.current().is_symbol(";") {
            self.advance();
            Ok(())
        } else {
            Err(self.error(format!("expected ';' at the end of {what}")))
        }
    }

    /// Consumes a trailing comment token if one is present.
    pub(crate) fn take_comment(&mut self) -> Option<String> {
        if self.current().kind == TokenKind::Comment {
            let lexeme = self.current().lexeme.clone();
            self.advance();
            Some(lexeme)
        } else {
            None
        }
    }

    /// Builds a parse error at the current token.
    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        let token = self.current();
        ParseError::new(message, token.lexeme.clone(), token.position())
    }

    pub(crate) fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub(crate) fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    // =========================================================================
    // Statement dispatch
    // =========================================================================

    /// Parses one statement. The identifier-led predicates run first, in
    /// the order assignment, function declaration, declaration, function
    /// call; the rest dispatches on the leading token.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        if self.detect_assignment() {
            return self.parse_assignment();
        }
        if self.detect_function_declaration() {
            return Ok(Stmt::Function(self.parse_function_declaration()?));
        }
        if self.detect_declaration() {
            return Ok(Stmt::Declaration(self.parse_declaration(true)?));
        }
        if self.detect_function_call() {
            let call = self.parse_expression()?;
            self.consume_statement_end("function call")?;
            return Ok(Stmt::Expr(call));
        }

        match self.current().kind {
            TokenKind::Divider => {
                let token = self.consume(TokenKind::Divider)?;
                Ok(Stmt::Divider(token.lexeme))
            }
            TokenKind::Comment => {
                let token = self.consume(TokenKind::Comment)?;
                Ok(Stmt::Comment(token.lexeme))
            }
            TokenKind::MultiLineComment => {
                let token = self.consume(TokenKind::MultiLineComment)?;
                // Per-line trim keeps re-indentation stable across runs.
                let mut lines: Vec<String> = token
                    .lexeme
                    .split('\n')
                    .map(|line| line.trim().to_string())
                    .collect();
                while lines.first().is_some_and(String::is_empty) {
                    lines.remove(0);
                }
                while lines.last().is_some_and(String::is_empty) {
                    lines.pop();
                }
                Ok(Stmt::MultilineComment(lines))
            }
            TokenKind::If => {
                let statement = self.parse_if_statement()?;
                // A `;` after the whole construct is tolerated.
                if self.current().is_symbol(";") {
                    self.advance();
                }
                Ok(statement)
            }
            TokenKind::Keyword => {
                let keyword = self.current().lexeme.clone();
                match keyword.as_str() {
                    "return" => self.parse_return_statement(),
                    "break" => self.parse_break_statement(),
                    "continue" => self.parse_continue_statement(),
                    "while" => self.parse_while_statement(),
                    "do" => self.parse_do_while_loop(),
                    "for" => self.parse_for_loop(),
                    "enum" => Ok(Stmt::Enum(self.parse_enum_declaration()?)),
                    "switch" => self.parse_switch_statement(),
                    "struct" => Ok(Stmt::Struct(self.parse_struct_declaration()?)),
                    "class" => Ok(Stmt::Class(self.parse_class_declaration()?)),
                    "try" => self.parse_try_catch(),
                    _ => Err(self.error("unexpected statement")),
                }
            }
            TokenKind::Symbol if self.current().lexeme == "#" => self.parse_library_import(),
            TokenKind::Symbol if self.current().lexeme == "{" => {
                Ok(Stmt::Block(self.parse_block()?))
            }
            _ => Err(self.error("unexpected statement")),
        }
    }

    // =========================================================================
    // Lookahead predicates
    // =========================================================================

    /// True if the token names a type: a type or template keyword, or an
    /// identifier registered as a user-defined enum/struct/class.
    pub(crate) fn token_is_type(&self, token: &Token) -> bool {
        match token.kind {
            TokenKind::TypeKeyword | TokenKind::TemplateTypeKeyword => true,
            TokenKind::Identifier => self.symbols.is_type(&token.lexeme),
            _ => false,
        }
    }

    /// Assignment: prefix `++`/`--`, or an identifier followed by a chain
    /// of `.ident` / `[expr]` accesses ending in an assignment operator or
    /// a postfix `++`/`--`.
    pub(crate) fn detect_assignment(&self) -> bool {
        let current = self.current();
        if current.kind == TokenKind::ArithmeticOperator
            && matches!(current.lexeme.as_str(), "++" | "--")
        {
            return true;
        }
        if current.kind != TokenKind::Identifier {
            return false;
        }

        let Some(n) = self.scan_access_chain(1) else {
            return false;
        };
        let token = self.peek(n);
        token.kind == TokenKind::AssignmentOperator
            || (token.kind == TokenKind::ArithmeticOperator
                && matches!(token.lexeme.as_str(), "++" | "--"))
    }

    /// Function call: an identifier with an access chain ending in `(`.
    pub(crate) fn detect_function_call(&self) -> bool {
        if self.current().kind != TokenKind::Identifier {
            return false;
        }
        let Some(n) = self.scan_access_chain(1) else {
            return false;
        };
        self.peek(n).is_symbol("(")
    }

    /// Walks a `.ident` / `[expr]` access chain starting at peek offset
    /// `start`. Returns the offset of the first token after the chain, or
    /// `None` if the chain is malformed or runs into `EOF`.
    fn scan_access_chain(&self, start: usize) -> Option<usize> {
        let mut n = start;
        loop {
            let token = self.peek(n);
            if token.kind != TokenKind::Symbol {
                break;
            }
            match token.lexeme.as_str() {
                "." => {
                    if self.peek(n + 1).kind == TokenKind::Identifier {
                        n += 2;
                    } else {
                        return None;
                    }
                }
                "[" => {
                    n += 1;
                    let mut depth = 1usize;
                    loop {
                        let token = self.peek(n);
                        if token.kind == TokenKind::Eof {
                            return None;
                        }
                        if token.is_symbol("[") {
                            depth += 1;
                        } else if token.is_symbol("]") {
                            depth -= 1;
                            if depth == 0 {
                                break;
                            }
                        }
                        n += 1;
                    }
                    n += 1;
                }
                _ => break,
            }
        }
        Some(n)
    }

    /// Function declaration: optional access modifier, optional modifier,
    /// optional type, optional identifier or `main`, then `(`, a balanced
    /// scan to the matching `)`, then `{`.
    pub(crate) fn detect_function_declaration(&self) -> bool {
        let mut n = 0;
        if self.peek(n).kind == TokenKind::AccessModifier {
            n += 1;
        }
        if self.peek(n).kind == TokenKind::Modifier {
            n += 1;
        }
        if self.token_is_type(self.peek(n)) {
            n += 1;
        }
        if self.peek(n).kind == TokenKind::Identifier {
            n += 1;
        }
        if self.peek(n).kind == TokenKind::MainKeyword {
            n += 1;
        }
        if !self.peek(n).is_symbol("(") {
            return false;
        }

        n += 1;
        let mut depth = 1usize;
        loop {
            let token = self.peek(n);
            if token.kind == TokenKind::Eof {
                return false;
            }
            if token.is_symbol("(") {
                depth += 1;
            } else if token.is_symbol(")") {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            n += 1;
        }
        self.peek(n + 1).is_symbol("{")
    }

    /// Declaration: a type in type position followed by an identifier and
    /// `;`/`=`/`,`, or a template keyword followed by `<`, or `const`, or
    /// an access modifier.
    pub(crate) fn detect_declaration(&self) -> bool {
        if self.token_is_type(self.current())
            && self.peek(1).kind == TokenKind::Identifier
            && matches!(self.peek(2).lexeme.as_str(), ";" | "=" | ",")
        {
            return true;
        }
        if self.current().kind == TokenKind::TemplateTypeKeyword && self.peek(1).lexeme == "<" {
            return true;
        }
        if self.current().is_keyword("const") {
            return true;
        }
        self.current().kind == TokenKind::AccessModifier
    }

    /// Class initialization: a type name directly followed by `(`.
    pub(crate) fn detect_class_initialization(&self) -> bool {
        self.token_is_type(self.current()) && self.peek(1).is_symbol("(")
    }
}
