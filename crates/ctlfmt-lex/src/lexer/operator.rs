//! Operator and symbol lexing.
//!
//! The four operator tables are searched longest-first: comparison, then
//! assignment, then arithmetic, then logical. A bare `<` or `>` is not a
//! comparison operator when the next character doubles it, so that `<<` and
//! `>>` survive for the symbol table. The symbol table itself is also
//! searched longest-first (`::` before `:`).

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Comparison, assignment, arithmetic and logical operators, in that
    /// order, each table sorted by descending lexeme length.
    pub(super) fn match_operator(&mut self) -> Option<Token> {
        for i in 0..self.keywords.comparison_operators.len() {
            let op = self.keywords.comparison_operators[i];
            if self.cursor.starts_with(op) {
                // `<` and `>` must not swallow the first half of a shift.
                if (op == "<" && self.cursor.peek_char(1) == '<')
                    || (op == ">" && self.cursor.peek_char(1) == '>')
                {
                    continue;
                }
                self.cursor.advance_n(op.len());
                return Some(self.make(TokenKind::ComparisonOperator, op.to_string()));
            }
        }

        for i in 0..self.keywords.assignment_operators.len() {
            let op = self.keywords.assignment_operators[i];
            if self.cursor.starts_with(op) {
                self.cursor.advance_n(op.len());
                return Some(self.make(TokenKind::AssignmentOperator, op.to_string()));
            }
        }

        for i in 0..self.keywords.arithmetic_operators.len() {
            let op = self.keywords.arithmetic_operators[i];
            if self.cursor.starts_with(op) {
                self.cursor.advance_n(op.len());
                return Some(self.make(TokenKind::ArithmeticOperator, op.to_string()));
            }
        }

        for i in 0..self.keywords.logical_operators.len() {
            let op = self.keywords.logical_operators[i];
            if self.cursor.starts_with(op) {
                self.cursor.advance_n(op.len());
                return Some(self.make(TokenKind::LogicalOperator, op.to_string()));
            }
        }

        None
    }

    /// Punctuation from the symbol table, longest lexeme first.
    pub(super) fn match_symbol(&mut self) -> Option<Token> {
        for i in 0..self.keywords.symbols.len() {
            let symbol = self.keywords.symbols[i];
            if self.cursor.starts_with(symbol) {
                self.cursor.advance_n(symbol.len());
                return Some(self.make(TokenKind::Symbol, symbol.to_string()));
            }
        }
        None
    }
}
