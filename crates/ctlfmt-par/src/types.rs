//! Type parsing.
//!
//! A type is a built-in type keyword, a template keyword with angle-bracket
//! arguments, or an identifier that resolves through the symbol table to a
//! user-defined enum/struct/class. Any other identifier in type position is
//! a parse error.

use ctlfmt_lex::{Token, TokenKind};

use crate::ast::{AtomicType, TemplateType, TypeExpr};
use crate::{ParseResult, Parser};

impl Parser {
    /// Parses a type expression.
    pub(crate) fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        if self.current().kind == TokenKind::TypeKeyword {
            let token = self.consume(TokenKind::TypeKeyword)?;
            return Ok(TypeExpr::Atomic(AtomicType::builtin(token.lexeme)));
        }

        if self.current().kind == TokenKind::TemplateTypeKeyword {
            return self.parse_template_type();
        }

        if self.current().kind == TokenKind::Identifier {
            return self.parse_user_type();
        }

        Err(self.error(format!(
            "expected a type keyword or identifier but got {}",
            self.current().kind
        )))
    }

    /// An identifier in type position: must be registered as an enum,
    /// struct or class.
    fn parse_user_type(&mut self) -> ParseResult<TypeExpr> {
        let name = self.current().lexeme.clone();
        let Some(tag) = self.symbols().lookup(&name) else {
            return Err(self.error(format!("type '{name}' is not defined")));
        };
        self.consume(TokenKind::Identifier)?;
        Ok(TypeExpr::Atomic(AtomicType::user(name, tag)))
    }

    /// `keyword<Type (, Type)*>`. The closing bracket of a nested template
    /// may arrive as a `>>` shift symbol; it is split in place so the
    /// enclosing template can consume the second half.
    fn parse_template_type(&mut self) -> ParseResult<TypeExpr> {
        let keyword = self.consume(TokenKind::TemplateTypeKeyword)?;

        if !(self.current().kind == TokenKind::ComparisonOperator && self.current().lexeme == "<") {
            return Err(self.error("expected '<' after template type keyword"));
        }
        self.advance();

        let mut inner = vec![self.parse_type()?];
        while self.current().is_symbol(",") {
            self.advance();
            inner.push(self.parse_type()?);
        }

        self.consume_closing_angle()?;

        Ok(TypeExpr::Template(TemplateType {
            keyword: keyword.lexeme,
            inner,
        }))
    }

    /// Consumes one closing `>`. A `>>` token counts as two: the first
    /// half is consumed and the second half is left in the stream as a
    /// fresh `>` comparison token.
    fn consume_closing_angle(&mut self) -> ParseResult<()> {
        if self.current().kind == TokenKind::ComparisonOperator && self.current().lexeme == ">" {
            self.advance();
            return Ok(());
        }

        if self.current().is_symbol(">>") {
            let token = self.current().clone();
            self.tokens[self.pos] = Token::new(
                TokenKind::ComparisonOperator,
                ">",
                token.line,
                token.column + 1,
            );
            return Ok(());
        }

        Err(self.error("expected '>' after template type"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::UserTypeTag;
    use ctlfmt_lex::Lexer;

    fn parse_type_from(source: &str) -> ParseResult<TypeExpr> {
        let mut parser = Parser::new(Lexer::new(source).tokenize().unwrap());
        parser.parse_type()
    }

    #[test]
    fn test_builtin_type() {
        let ty = parse_type_from("dyn_string").unwrap();
        assert_eq!(ty.format(), "dyn_string");
        assert!(matches!(ty, TypeExpr::Atomic(a) if a.tag.is_none()));
    }

    #[test]
    fn test_template_type() {
        let ty = parse_type_from("vector<int>").unwrap();
        assert_eq!(ty.format(), "vector<int>");
    }

    #[test]
    fn test_template_with_several_arguments() {
        let ty = parse_type_from("vector<int, string>").unwrap();
        assert_eq!(ty.format(), "vector<int, string>");
    }

    #[test]
    fn test_nested_template_with_shift_close() {
        // The `>>` at the end lexes as one shift symbol and must close
        // both templates.
        let ty = parse_type_from("vector<shared_ptr<int>>").unwrap();
        assert_eq!(ty.format(), "vector<shared_ptr<int>>");
    }

    #[test]
    fn test_unknown_identifier_in_type_position() {
        let err = parse_type_from("Widget").unwrap_err();
        assert!(err.message.contains("not defined"));
    }

    #[test]
    fn test_user_type_resolves_through_symbol_table() {
        let mut parser = Parser::new(Lexer::new("Foo").tokenize().unwrap());
        parser.symbols_mut().register_class("Foo");
        let ty = parser.parse_type().unwrap();
        match ty {
            TypeExpr::Atomic(atomic) => assert_eq!(atomic.tag, Some(UserTypeTag::Class)),
            other => panic!("expected atomic type, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_angle_bracket() {
        assert!(parse_type_from("vector int>").is_err());
        assert!(parse_type_from("vector<int").is_err());
    }
}
