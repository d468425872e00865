//! Expression parsing.
//!
//! Hand-written recursive descent, one function per precedence level, each
//! building a left-associative chain except where noted. `parse_comparison`
//! is the entry point used by condition positions; initializers, return
//! values and defaults go through `parse_conditional_expression`, which
//! adds the single ternary level on top.

use ctlfmt_lex::TokenKind;

use crate::ast::*;
use crate::{ParseResult, Parser};

impl Parser {
    /// `Comparison ("?" Expression ":" Expression)?` - at most one ternary
    /// level, right-associative.
    pub(crate) fn parse_conditional_expression(&mut self) -> ParseResult<Expr> {
        let condition = self.parse_comparison()?;

        if !self.current().is_symbol("?") {
            return Ok(condition);
        }
        self.advance();

        let if_true = self.parse_expression()?;

        if !self.current().is_symbol(":") {
            return Err(self.error("expected ':' in ternary expression"));
        }
        self.advance();

        let if_false = self.parse_expression()?;

        Ok(Expr::Ternary(TernaryExpr {
            condition: Box::new(condition),
            if_true: Box::new(if_true),
            if_false: Box::new(if_false),
        }))
    }

    /// Condition entry point: the logical-or chain.
    pub(crate) fn parse_comparison(&mut self) -> ParseResult<Expr> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_logical_and()?;

        while self.current().kind == TokenKind::LogicalOperator && self.current().lexeme == "||" {
            self.advance();
            let right = self.parse_logical_and()?;
            left = binary(left, BinOp::Or, right);
        }

        Ok(left)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_negation()?;

        while self.current().kind == TokenKind::LogicalOperator && self.current().lexeme == "&&" {
            self.advance();
            let right = self.parse_negation()?;
            left = binary(left, BinOp::And, right);
        }

        Ok(left)
    }

    /// Prefix `!` or `~`, right-associative, may chain.
    fn parse_negation(&mut self) -> ParseResult<Expr> {
        let op = if self.current().kind == TokenKind::LogicalOperator && self.current().lexeme == "!"
        {
            Some(UnaryOp::Not)
        } else if self.current().is_symbol("~") {
            Some(UnaryOp::BitNot)
        } else {
            None
        };

        if let Some(op) = op {
            self.advance();
            let operand = self.parse_negation()?;
            return Ok(Expr::Unary(UnaryExpr {
                op,
                operand: Box::new(operand),
            }));
        }

        self.parse_bitwise_or()
    }

    fn parse_bitwise_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_bitwise_xor()?;

        while self.current().is_symbol("|") {
            self.advance();
            let right = self.parse_bitwise_xor()?;
            left = binary(left, BinOp::BitOr, right);
        }

        Ok(left)
    }

    fn parse_bitwise_xor(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_bitwise_and()?;

        while self.current().is_symbol("^") {
            self.advance();
            let right = self.parse_bitwise_and()?;
            left = binary(left, BinOp::BitXor, right);
        }

        Ok(left)
    }

    fn parse_bitwise_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_shift()?;

        while self.current().is_symbol("&") {
            self.advance();
            let right = self.parse_shift()?;
            left = binary(left, BinOp::BitAnd, right);
        }

        Ok(left)
    }

    fn parse_shift(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_relational()?;

        while self.current().is_symbol("<<") || self.current().is_symbol(">>") {
            let op = if self.current().lexeme == "<<" {
                BinOp::Shl
            } else {
                BinOp::Shr
            };
            self.advance();
            let right = self.parse_relational()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// One relational level only: `a < b < c` parses as `(a < b)` and
    /// leaves the rest for the caller to reject.
    fn parse_relational(&mut self) -> ParseResult<Expr> {
        let left = self.parse_expression()?;

        if self.current().kind == TokenKind::ComparisonOperator {
            let token = self.consume(TokenKind::ComparisonOperator)?;
            let op = BinOp::from_lexeme(&token.lexeme)
                .ok_or_else(|| self.error("unknown comparison operator"))?;
            let right = self.parse_expression()?;
            return Ok(binary(left, op, right));
        }

        Ok(left)
    }

    /// Additive chain. A comment between the operator and the right
    /// operand is attached to the resulting binary node.
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_term()?;

        while self.current().kind == TokenKind::ArithmeticOperator
            && matches!(self.current().lexeme.as_str(), "+" | "-")
        {
            let op = if self.current().lexeme == "+" {
                BinOp::Add
            } else {
                BinOp::Sub
            };
            self.advance();

            let comment = self.take_comment();

            let right = self.parse_term()?;
            left = binary(left, op, right);
            if let Some(comment) = comment {
                left.set_comment(comment);
            }
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_factor()?;

        while self.current().kind == TokenKind::ArithmeticOperator
            && matches!(self.current().lexeme.as_str(), "*" | "/" | "%")
        {
            let op = match self.current().lexeme.as_str() {
                "*" => BinOp::Mul,
                "/" => BinOp::Div,
                _ => BinOp::Mod,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = binary(left, op, right);
        }

        Ok(left)
    }

    /// A primary followed by any chain of `.attr`, `[index]` and `(args)`.
    pub(crate) fn parse_factor(&mut self) -> ParseResult<Expr> {
        let mut node = self.parse_primary()?;

        loop {
            if self.current().is_symbol(".") {
                self.advance();
                let attribute = self.consume(TokenKind::Identifier)?;
                node = Expr::Attribute(AttributeAccess {
                    object: Box::new(node),
                    attribute: attribute.lexeme,
                });
            } else if self.current().is_symbol("[") {
                self.advance();
                let index = self.parse_expression()?;
                if !self.current().is_symbol("]") {
                    return Err(self.error("expected closing ']' for index access"));
                }
                self.advance();
                node = Expr::Index(IndexAccess {
                    object: Box::new(node),
                    index: Box::new(index),
                });
            } else {
                break;
            }

            if self.current().is_symbol("(") {
                node = self.parse_function_call(Some(node))?;
            }
        }

        Ok(node)
    }

    fn parse_primary(&mut self) -> ParseResult<Expr> {
        // Signed or unsigned number literal.
        if self.current().kind == TokenKind::Number
            || (self.current().kind == TokenKind::ArithmeticOperator
                && self.current().lexeme == "-"
                && self.peek(1).kind == TokenKind::Number)
        {
            let negative = self.current().kind == TokenKind::ArithmeticOperator;
            if negative {
                self.advance();
            }
            let token = self.consume(TokenKind::Number)?;
            return Ok(Expr::Number(NumberLit::new(token.lexeme, negative)));
        }

        if self.current().kind == TokenKind::StringLiteral {
            let token = self.consume(TokenKind::StringLiteral)?;
            return Ok(Expr::Str(StrLit {
                lexeme: token.lexeme,
                comment: None,
            }));
        }

        if self.current().kind == TokenKind::Char {
            let token = self.consume(TokenKind::Char)?;
            return Ok(Expr::Char(token.lexeme));
        }

        if self.current().is_keyword("true") || self.current().is_keyword("false") {
            let token = self.consume(TokenKind::Keyword)?;
            return Ok(Expr::Bool(token.lexeme == "true"));
        }

        // `new Type(args)` class initialization.
        if self.current().is_keyword("new") {
            self.advance();
            let mut init = self.parse_class_initialization()?;
            init.is_new = true;
            return Ok(Expr::ClassInit(init));
        }

        // Identifier directly followed by `(` is a call.
        if self.current().kind == TokenKind::Identifier && self.peek(1).is_symbol("(") {
            return self.parse_function_call(None);
        }

        // A type name followed by `::` is an enum or class-static access.
        if self.token_is_type(self.current()) && self.peek(1).is_symbol("::") {
            return self.parse_double_colon_access();
        }

        if self.current().kind == TokenKind::Identifier {
            let token = self.consume(TokenKind::Identifier)?;
            return Ok(Expr::Ident(Ident::new(token.lexeme)));
        }

        // `$name` global identifier.
        if self.current().is_symbol("$") {
            self.advance();
            if self.current().kind != TokenKind::Identifier {
                return Err(self.error("expected identifier after '$'"));
            }
            let token = self.consume(TokenKind::Identifier)?;
            return Ok(Expr::Global(token.lexeme));
        }

        // `&name` pointer-of identifier.
        if self.current().is_symbol("&") {
            self.advance();
            if self.current().kind != TokenKind::Identifier {
                return Err(self.error("expected identifier after '&'"));
            }
            let token = self.consume(TokenKind::Identifier)?;
            return Ok(Expr::Pointer(token.lexeme));
        }

        // `(Type)expr` cast when the parenthesized token is a known type.
        if self.current().is_symbol("(") && self.token_is_type(self.peek(1)) {
            return self.parse_type_cast();
        }

        // Parenthesized subexpression, grouping preserved.
        if self.current().is_symbol("(") {
            self.advance();
            let inner = self.parse_conditional_expression()?;
            if !self.current().is_symbol(")") {
                return Err(self.error("expected closing parenthesis"));
            }
            self.advance();
            return Ok(Expr::Grouping(Box::new(inner)));
        }

        if self.detect_class_initialization() {
            return Ok(Expr::ClassInit(self.parse_class_initialization()?));
        }

        Err(self.error("expected a primary expression"))
    }

    /// `callee(args)`. Without an explicit callee, a standalone identifier
    /// is consumed first.
    pub(crate) fn parse_function_call(&mut self, callee: Option<Expr>) -> ParseResult<Expr> {
        let callee = match callee {
            Some(expr) => expr,
            None => {
                let token = self.consume(TokenKind::Identifier)?;
                Expr::Ident(Ident::new(token.lexeme))
            }
        };

        self.consume_symbol("(")?;
        let args = self.parse_argument_list()?;
        self.consume_symbol(")")?;

        Ok(Expr::Call(CallExpr {
            callee: Box::new(callee),
            args,
        }))
    }

    /// `Expression Comment? ("," Comment? Expression)*`; trailing comments
    /// attach to the argument they follow.
    fn parse_argument_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();

        if self.current().is_symbol(")") {
            return Ok(args);
        }

        let mut arg = self.parse_expression()?;
        if let Some(comment) = self.take_comment() {
            arg.set_comment(comment);
        }
        args.push(arg);

        while self.current().is_symbol(",") {
            self.advance();

            let comment = self.take_comment();
            let mut arg = self.parse_expression()?;
            if let Some(comment) = comment {
                arg.set_comment(comment);
            }
            args.push(arg);
        }

        Ok(args)
    }

    /// `A::B` where `A` is an enum (enum access), a class, or a library
    /// type (class-static access).
    pub(crate) fn parse_double_colon_access(&mut self) -> ParseResult<Expr> {
        let name = self.current().lexeme.clone();

        if self.symbols().is_enum(&name) {
            return self.parse_enum_access();
        }
        if self.symbols().is_class(&name) || self.token_is_type(self.current()) {
            return self.parse_class_static_access();
        }

        Err(self.error(format!("type '{name}' is not defined")))
    }

    fn parse_enum_access(&mut self) -> ParseResult<Expr> {
        let enum_name = self.consume(TokenKind::Identifier)?;
        self.consume_symbol("::")?;
        let variant = self.consume(TokenKind::Identifier)?;

        Ok(Expr::EnumAccess(EnumAccess {
            enum_name: enum_name.lexeme,
            variant: variant.lexeme,
        }))
    }

    /// `Type::(FunctionCall | identifier)`.
    fn parse_class_static_access(&mut self) -> ParseResult<Expr> {
        let type_name = self.parse_type()?.format();
        self.consume_symbol("::")?;

        let member = if self.detect_function_call() {
            self.parse_function_call(None)?
        } else {
            let token = self.consume(TokenKind::Identifier)?;
            Expr::Ident(Ident::new(token.lexeme))
        };

        Ok(Expr::StaticAccess(StaticAccess {
            type_name,
            member: Box::new(member),
        }))
    }

    /// `(Type)Expression`.
    fn parse_type_cast(&mut self) -> ParseResult<Expr> {
        self.consume_symbol("(")?;
        let ty = self.parse_type()?;
        self.consume_symbol(")")?;
        let operand = self.parse_expression()?;

        Ok(Expr::Cast(CastExpr {
            ty,
            operand: Box::new(operand),
        }))
    }

    /// `Type(args)`, the `new`-less construction form.
    pub(crate) fn parse_class_initialization(&mut self) -> ParseResult<ClassInit> {
        let ty = self.parse_type()?;
        self.consume_symbol("(")?;
        let args = self.parse_argument_list()?;
        self.consume_symbol(")")?;

        Ok(ClassInit {
            ty,
            args,
            is_new: false,
        })
    }
}

fn binary(left: Expr, op: BinOp, right: Expr) -> Expr {
    Expr::Binary(BinaryExpr {
        left: Box::new(left),
        op,
        right: Box::new(right),
        comment: None,
    })
}
