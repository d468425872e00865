//! Statement parsing: assignments, control flow, blocks, imports.

use ctlfmt_lex::TokenKind;

use crate::ast::*;
use crate::{ParseResult, Parser};

impl Parser {
    /// An assignment statement of any flavor, semicolon included.
    pub(crate) fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let step = self.parse_assignment_like(true)?;
        Ok(match step {
            ForStep::Assign(assign) => Stmt::Assignment(assign),
            ForStep::Compound(assign) => Stmt::Compound(assign),
            ForStep::Increment(inc) => Stmt::Increment(inc),
        })
    }

    /// Shared body for assignment statements and `for` init/step slots:
    /// prefix `++`/`--`, or a factor followed by `=`, a compound operator,
    /// or a postfix `++`/`--`. The semicolon is consumed only in statement
    /// position.
    pub(crate) fn parse_assignment_like(&mut self, parse_semicolon: bool) -> ParseResult<ForStep> {
        // Prefix increment/decrement.
        if self.current().kind == TokenKind::ArithmeticOperator
            && matches!(self.current().lexeme.as_str(), "++" | "--")
        {
            let token = self.consume(TokenKind::ArithmeticOperator)?;
            let op = increment_op(&token.lexeme);
            let target = self.parse_factor()?;
            if parse_semicolon {
                self.consume_statement_end("increment/decrement")?;
            }
            return Ok(ForStep::Increment(Increment {
                target,
                op,
                prefix: true,
            }));
        }

        let target = self.parse_factor()?;

        if self.current().kind == TokenKind::AssignmentOperator {
            let operator = self.current().lexeme.clone();

            if operator == "=" {
                self.advance();
                let value = self.parse_conditional_expression()?;
                if parse_semicolon {
                    self.consume_statement_end("assignment")?;
                }
                return Ok(ForStep::Assign(Assignment { target, value }));
            }

            if let Some(op) = CompoundOp::from_lexeme(&operator) {
                self.advance();
                let value = self.parse_conditional_expression()?;
                if parse_semicolon {
                    self.consume_statement_end("compound assignment")?;
                }
                return Ok(ForStep::Compound(CompoundAssignment { target, op, value }));
            }
        }

        if self.current().kind == TokenKind::ArithmeticOperator
            && matches!(self.current().lexeme.as_str(), "++" | "--")
        {
            let token = self.consume(TokenKind::ArithmeticOperator)?;
            let op = increment_op(&token.lexeme);
            if parse_semicolon {
                self.consume_statement_end("increment/decrement")?;
            }
            return Ok(ForStep::Increment(Increment {
                target,
                op,
                prefix: false,
            }));
        }

        Err(self.error("invalid assignment statement"))
    }

    /// `"if" Comment? "(" Comparison ")" (Block | Statement)` followed by
    /// any `else if` clauses and an optional `else`.
    pub(crate) fn parse_if_statement(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenKind::If)?;
        let comment = self.take_comment();

        self.consume_symbol("(")?;
        let condition = self.parse_comparison()?;
        self.consume_symbol(")")?;

        let (then_block, inline) = self.parse_clause_body()?;

        let mut else_ifs = Vec::new();
        while self.current().kind == TokenKind::ElseIf {
            else_ifs.push(self.parse_else_if_clause()?);
        }

        let else_clause = if self.current().kind == TokenKind::Else {
            Some(self.parse_else_clause()?)
        } else {
            None
        };

        Ok(Stmt::If(IfStmt {
            condition,
            then_block,
            inline,
            else_ifs,
            else_clause,
            comment,
        }))
    }

    fn parse_else_if_clause(&mut self) -> ParseResult<ElseIfClause> {
        self.consume(TokenKind::ElseIf)?;
        let comment = self.take_comment();

        self.consume_symbol("(")?;
        let condition = self.parse_comparison()?;
        self.consume_symbol(")")?;

        let (block, inline) = self.parse_clause_body()?;

        Ok(ElseIfClause {
            condition,
            block,
            inline,
            comment,
        })
    }

    fn parse_else_clause(&mut self) -> ParseResult<ElseClause> {
        self.consume(TokenKind::Else)?;
        let comment = self.take_comment();

        let (block, inline) = self.parse_clause_body()?;

        Ok(ElseClause {
            block,
            inline,
            comment,
        })
    }

    /// Either a brace block or a single inline statement; exactly one of
    /// the two is returned.
    fn parse_clause_body(&mut self) -> ParseResult<(Option<Block>, Option<Box<Stmt>>)> {
        if self.current().is_symbol("{") {
            Ok((Some(self.parse_block()?), None))
        } else {
            Ok((None, Some(Box::new(self.parse_statement()?))))
        }
    }

    /// `{ Statement* }` with blank-line markers preserved between
    /// statements.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Block> {
        self.consume_symbol("{")?;

        let mut statements = Vec::new();
        while !self.current().is_symbol("}") {
            if self.current().kind == TokenKind::Eof {
                return Err(self.error("expected '}' before end of file"));
            }
            if self.take_blank() {
                statements.push(Stmt::BlankLine);
                continue;
            }
            statements.push(self.parse_statement()?);
        }

        // A blank line against the closing brace is not between two
        // statements; drop it so it does not leak to the enclosing block.
        self.clear_blank();
        self.consume_symbol("}")?;

        Ok(Block { statements })
    }

    /// `"while" "(" Comparison ")" (Block | Statement)`.
    pub(crate) fn parse_while_statement(&mut self) -> ParseResult<Stmt> {
        self.consume_keyword("while")?;
        self.consume_symbol("(")?;
        let condition = self.parse_comparison()?;
        self.consume_symbol(")")?;

        let body = if self.current().is_symbol("{") {
            Stmt::Block(self.parse_block()?)
        } else {
            self.parse_statement()?
        };

        Ok(Stmt::While(WhileLoop {
            condition,
            body: Box::new(body),
        }))
    }

    /// `"do" Block "while" "(" Comparison ")" ";"`.
    pub(crate) fn parse_do_while_loop(&mut self) -> ParseResult<Stmt> {
        self.consume_keyword("do")?;
        let body = self.parse_block()?;
        self.consume_keyword("while")?;
        self.consume_symbol("(")?;
        let condition = self.parse_comparison()?;
        self.consume_symbol(")")?;
        self.consume_statement_end("do-while loop")?;

        Ok(Stmt::DoWhile(DoWhileLoop { body, condition }))
    }

    /// `"for" "(" Init ";" Comparison ";" Step? ")" (Block | Statement)`.
    pub(crate) fn parse_for_loop(&mut self) -> ParseResult<Stmt> {
        self.consume_keyword("for")?;
        self.consume_symbol("(")?;

        let init = self.parse_for_initialization()?;
        self.consume_symbol(";")?;

        let condition = self.parse_comparison()?;
        self.consume_symbol(";")?;

        // The step is optional; anything but a symbol starts one.
        let step = if self.current().kind != TokenKind::Symbol {
            Some(self.parse_assignment_like(false)?)
        } else {
            None
        };

        self.consume_symbol(")")?;

        let body = if self.current().is_symbol("{") {
            Stmt::Block(self.parse_block()?)
        } else {
            self.parse_statement()?
        };

        Ok(Stmt::For(ForLoop {
            init,
            condition,
            step,
            body: Box::new(body),
        }))
    }

    /// `Declaration | Assignment | identifier` in the init slot.
    fn parse_for_initialization(&mut self) -> ParseResult<ForInit> {
        if self.detect_declaration() {
            return Ok(ForInit::Declaration(self.parse_declaration(false)?));
        }
        if self.detect_assignment() {
            return Ok(ForInit::Step(self.parse_assignment_like(false)?));
        }
        let token = self.consume(TokenKind::Identifier)?;
        Ok(ForInit::Ident(token.lexeme))
    }

    /// `"switch" "(" Expression ")" "{" (CaseClause | DefaultClause)* "}"`.
    pub(crate) fn parse_switch_statement(&mut self) -> ParseResult<Stmt> {
        self.consume_keyword("switch")?;
        self.consume_symbol("(")?;
        let scrutinee = self.parse_expression()?;
        self.consume_symbol(")")?;
        self.consume_symbol("{")?;

        let mut cases = Vec::new();
        while self.current().is_keyword("case") || self.current().is_keyword("default") {
            cases.push(self.parse_case_clause()?);
        }

        self.clear_blank();
        self.consume_symbol("}")?;

        Ok(Stmt::Switch(SwitchStmt { scrutinee, cases }))
    }

    /// `"case" Expression ":"` or `"default" ":"`, followed by the
    /// statements up to the next clause or the closing brace. A `break`
    /// inside is an ordinary break statement.
    fn parse_case_clause(&mut self) -> ParseResult<CaseClause> {
        let (value, is_default) = if self.current().is_keyword("default") {
            self.consume_keyword("default")?;
            (None, true)
        } else {
            self.consume_keyword("case")?;
            (Some(self.parse_expression()?), false)
        };

        self.consume_symbol(":")?;

        let mut statements = Vec::new();
        loop {
            let current = self.current();
            if current.is_keyword("case")
                || current.is_keyword("default")
                || current.is_symbol("}")
                || current.kind == TokenKind::Eof
            {
                break;
            }
            if self.take_blank() {
                statements.push(Stmt::BlankLine);
                continue;
            }
            statements.push(self.parse_statement()?);
        }
        self.clear_blank();

        Ok(CaseClause {
            value,
            body: Block { statements },
            is_default,
        })
    }

    /// `"return" Expression? ";"`.
    pub(crate) fn parse_return_statement(&mut self) -> ParseResult<Stmt> {
        self.consume_keyword("return")?;

        let expression = if self.current().is_symbol(";") {
            None
        } else {
            Some(self.parse_conditional_expression()?)
        };

        self.consume_statement_end("return statement")?;
        Ok(Stmt::Return(expression))
    }

    pub(crate) fn parse_break_statement(&mut self) -> ParseResult<Stmt> {
        self.consume_keyword("break")?;
        self.consume_statement_end("break statement")?;
        Ok(Stmt::Break)
    }

    pub(crate) fn parse_continue_statement(&mut self) -> ParseResult<Stmt> {
        self.consume_keyword("continue")?;
        self.consume_statement_end("continue statement")?;
        Ok(Stmt::Continue)
    }

    /// `"try" Block "catch" Block ("finally" Block)?`. There is no typed
    /// catch binding.
    pub(crate) fn parse_try_catch(&mut self) -> ParseResult<Stmt> {
        self.consume_keyword("try")?;
        let try_block = self.parse_block()?;

        self.consume_keyword("catch")?;
        let catch_block = self.parse_block()?;

        let finally_block = if self.current().is_keyword("finally") {
            self.consume_keyword("finally")?;
            Some(self.parse_block()?)
        } else {
            None
        };

        Ok(Stmt::Try(TryStmt {
            try_block,
            catch_block,
            finally_block,
        }))
    }

    /// `"#" "uses" StringLiteral`. The string keeps its quotes.
    pub(crate) fn parse_library_import(&mut self) -> ParseResult<Stmt> {
        self.consume_symbol("#")?;
        self.consume_keyword("uses")?;
        let name = self.consume(TokenKind::StringLiteral)?;

        Ok(Stmt::Library(LibraryImport { name: name.lexeme }))
    }
}

fn increment_op(lexeme: &str) -> IncrementOp {
    if lexeme == "++" {
        IncrementOp::Increment
    } else {
        IncrementOp::Decrement
    }
}
