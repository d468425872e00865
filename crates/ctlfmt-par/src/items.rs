//! Declaration parsing: variables, functions, enums, structs, classes.
//!
//! These are the constructs that shape the symbol table. Enum names are
//! rejected on redefinition; class names are registered before their body
//! is parsed so methods can reference the enclosing class.

use ctlfmt_lex::TokenKind;

use crate::ast::*;
use crate::{ParseResult, Parser};

impl Parser {
    /// `AccessModifier? Modifier* ("const" Type? | Type) identifier
    /// ("=" Comment? ConditionalExpression Comment?)?
    /// ("," identifier ...)* ";"?`
    pub(crate) fn parse_declaration(&mut self, parse_semicolon: bool) -> ParseResult<Declaration> {
        let access = if self.current().kind == TokenKind::AccessModifier {
            let token = self.consume(TokenKind::AccessModifier)?;
            AccessModifier::from_lexeme(&token.lexeme)
        } else {
            None
        };

        let mut modifiers = Vec::new();
        while self.current().kind == TokenKind::Modifier {
            let token = self.consume(TokenKind::Modifier)?;
            if let Some(modifier) = Modifier::from_lexeme(&token.lexeme) {
                modifiers.push(modifier);
            }
        }

        let is_const = if self.current().is_keyword("const") {
            self.advance();
            true
        } else {
            false
        };

        // The type may be omitted after `const`; it is present when a type
        // or template keyword follows that is not itself the declared name.
        let ty = if !is_const
            || (matches!(
                self.current().kind,
                TokenKind::TypeKeyword | TokenKind::TemplateTypeKeyword
            ) && self.peek(1).lexeme != "=")
        {
            Some(self.parse_type()?)
        } else {
            None
        };

        let mut entries = vec![self.parse_declaration_entry()?];
        while self.current().is_symbol(",") {
            self.advance();
            entries.push(self.parse_declaration_entry()?);
        }

        if parse_semicolon {
            self.consume_statement_end("declaration")?;
        }

        Ok(Declaration {
            access,
            modifiers,
            is_const,
            ty,
            entries,
        })
    }

    /// One declared name with its optional initializer and the comments
    /// adjacent to the `=`.
    fn parse_declaration_entry(&mut self) -> ParseResult<DeclEntry> {
        let name = self.consume(TokenKind::Identifier)?.lexeme;

        let mut before_comment = None;
        let mut after_comment = None;
        let init = if self.current().kind == TokenKind::AssignmentOperator
            && self.current().lexeme == "="
        {
            self.advance();
            before_comment = self.take_comment();
            let value = self.parse_conditional_expression()?;
            after_comment = self.take_comment();
            Some(value)
        } else {
            None
        };

        Ok(DeclEntry {
            name,
            init,
            before_comment,
            after_comment,
        })
    }

    /// `AccessModifier? Modifier? Type? (identifier | "main")
    /// "(" ParameterList? ")" Block`
    ///
    /// A declaration whose name position is empty and whose type position
    /// holds a user type is a constructor; its name is taken from the type
    /// position and it has no return type.
    pub(crate) fn parse_function_declaration(&mut self) -> ParseResult<FunctionDecl> {
        let access = if self.current().kind == TokenKind::AccessModifier {
            let token = self.consume(TokenKind::AccessModifier)?;
            AccessModifier::from_lexeme(&token.lexeme)
        } else {
            None
        };

        let mut modifiers = Vec::new();
        while self.current().kind == TokenKind::Modifier {
            let token = self.consume(TokenKind::Modifier)?;
            if let Some(modifier) = Modifier::from_lexeme(&token.lexeme) {
                modifiers.push(modifier);
            }
        }

        let mut return_type = if self.token_is_type(self.current()) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let name;
        let mut is_constructor = false;
        if (self.current().kind == TokenKind::Identifier
            || self.current().kind == TokenKind::MainKeyword)
            && self.peek(1).is_symbol("(")
        {
            if self.current().kind == TokenKind::MainKeyword {
                self.consume(TokenKind::MainKeyword)?;
                name = FunctionName::Main;
            } else {
                let token = self.consume(TokenKind::Identifier)?;
                name = FunctionName::Ident(token.lexeme);
            }
        } else if self.current().is_symbol("(") {
            // Constructor: the "return type" was really the name.
            match return_type.take() {
                Some(ty) => {
                    name = FunctionName::Ident(ty.format());
                    is_constructor = true;
                }
                None => return Err(self.error("expected function name before '('")),
            }
        } else {
            return Err(self.error("expected '(' after function name"));
        }

        self.consume_symbol("(")?;
        let params = self.parse_parameter_list()?;
        self.consume_symbol(")")?;

        let body = self.parse_block()?;

        Ok(FunctionDecl {
            access,
            modifier: modifiers.into_iter().next(),
            return_type,
            name,
            params,
            body,
            is_constructor,
        })
    }

    fn parse_parameter_list(&mut self) -> ParseResult<Vec<Param>> {
        let mut params = Vec::new();

        if self.current().is_symbol(")") {
            return Ok(params);
        }

        params.push(self.parse_parameter()?);
        while self.current().is_symbol(",") {
            self.advance();
            params.push(self.parse_parameter()?);
        }

        Ok(params)
    }

    /// `"const"? Type "&"? identifier ("=" ConditionalExpression)?`
    fn parse_parameter(&mut self) -> ParseResult<Param> {
        let is_const = if self.current().is_keyword("const") {
            self.advance();
            true
        } else {
            false
        };

        let ty = self.parse_type()?;

        let is_pointer = if self.current().is_symbol("&") {
            self.advance();
            true
        } else {
            false
        };

        let name = self.consume(TokenKind::Identifier)?.lexeme;

        let default = if self.current().kind == TokenKind::AssignmentOperator
            && self.current().lexeme == "="
        {
            self.advance();
            Some(self.parse_conditional_expression()?)
        } else {
            None
        };

        Ok(Param {
            ty,
            name,
            default,
            is_pointer,
            is_const,
        })
    }

    /// `"enum" identifier "{" EnumValue ("," EnumValue)* "}" ";"`.
    /// Redefining an already-registered enum name is a parse error.
    pub(crate) fn parse_enum_declaration(&mut self) -> ParseResult<EnumDecl> {
        self.consume_keyword("enum")?;

        if self.current().kind == TokenKind::Identifier
            && self.symbols().is_enum(&self.current().lexeme)
        {
            let name = self.current().lexeme.clone();
            return Err(self.error(format!("enum '{name}' is already defined")));
        }

        let name = self.consume(TokenKind::Identifier)?.lexeme;
        self.consume_symbol("{")?;

        let mut values = Vec::new();
        while self.current().kind == TokenKind::Identifier {
            values.push(self.parse_enum_value()?);

            if !self.current().is_symbol(",") {
                break;
            }
            self.advance();
        }

        self.clear_blank();
        self.consume_symbol("}")?;
        self.consume_statement_end("enum declaration")?;

        self.symbols_mut().register_enum(name.clone());

        Ok(EnumDecl { name, values })
    }

    /// `identifier ("=" number)?`.
    fn parse_enum_value(&mut self) -> ParseResult<EnumValue> {
        let name = self.consume(TokenKind::Identifier)?.lexeme;

        // No assignment: the next token is the `,` or `}` of the list.
        if self.current().kind == TokenKind::Symbol {
            return Ok(EnumValue { name, value: None });
        }

        if !(self.current().kind == TokenKind::AssignmentOperator && self.current().lexeme == "=") {
            return Err(self.error("expected '=' or ',' after enum value"));
        }
        self.advance();

        let value = self.consume(TokenKind::Number)?.lexeme;
        Ok(EnumValue {
            name,
            value: Some(value),
        })
    }

    /// `"struct" identifier (":" Type)? Block ";"`. Single inheritance is
    /// preserved and re-emitted.
    pub(crate) fn parse_struct_declaration(&mut self) -> ParseResult<StructDecl> {
        self.consume_keyword("struct")?;
        let name = self.consume(TokenKind::Identifier)?.lexeme;

        let parent = if self.current().is_symbol(":") {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        self.symbols_mut().register_struct(name.clone());

        self.consume_statement_end("struct declaration")?;

        Ok(StructDecl { name, parent, body })
    }

    /// `"class" identifier (":" Type)? Block ";"`. The name is registered
    /// before the body is parsed so that methods can name their own class.
    pub(crate) fn parse_class_declaration(&mut self) -> ParseResult<ClassDecl> {
        self.consume_keyword("class")?;
        let name = self.consume(TokenKind::Identifier)?.lexeme;

        self.symbols_mut().register_class(name.clone());

        let parent = if self.current().is_symbol(":") {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        self.consume_statement_end("class declaration")?;

        Ok(ClassDecl { name, parent, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ctlfmt_lex::Lexer;
    use crate::symbols::UserTypeTag;

    fn parse(source: &str) -> Program {
        Parser::new(Lexer::new(source).tokenize().unwrap())
            .parse()
            .unwrap()
    }

    fn parse_one(source: &str) -> Stmt {
        let mut program = parse(source);
        assert_eq!(program.statements.len(), 1, "{source}");
        program.statements.remove(0)
    }

    #[test]
    fn test_simple_declaration() {
        match parse_one("int x;") {
            Stmt::Declaration(decl) => {
                assert_eq!(decl.entries.len(), 1);
                assert_eq!(decl.entries[0].name, "x");
                assert!(decl.entries[0].init.is_none());
                assert!(!decl.is_const);
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_multi_entry_declaration_preserves_order() {
        match parse_one("int a, b = 2, c;") {
            Stmt::Declaration(decl) => {
                let names: Vec<_> = decl.entries.iter().map(|e| e.name.as_str()).collect();
                assert_eq!(names, vec!["a", "b", "c"]);
                assert!(decl.entries[1].init.is_some());
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_const_without_type() {
        match parse_one("const RATE = 50;") {
            Stmt::Declaration(decl) => {
                assert!(decl.is_const);
                assert!(decl.ty.is_none());
                assert_eq!(decl.entries[0].name, "RATE");
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_const_with_type() {
        match parse_one("const int LIMIT = 8;") {
            Stmt::Declaration(decl) => {
                assert!(decl.is_const);
                assert_eq!(decl.ty.as_ref().map(TypeExpr::format).as_deref(), Some("int"));
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_access_modifier_declaration() {
        match parse_one("private static int count;") {
            Stmt::Declaration(decl) => {
                assert_eq!(decl.access, Some(AccessModifier::Private));
                assert_eq!(decl.modifiers, vec![Modifier::Static]);
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_initializer_comments() {
        match parse_one("int x = //a\n 5 //b\n;") {
            Stmt::Declaration(decl) => {
                assert_eq!(decl.entries[0].before_comment.as_deref(), Some("a"));
                assert_eq!(decl.entries[0].after_comment.as_deref(), Some("b"));
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_function_declaration() {
        match parse_one("int add(int a, int b) { return a + b; }") {
            Stmt::Function(func) => {
                assert_eq!(func.name.as_str(), "add");
                assert_eq!(func.params.len(), 2);
                assert!(!func.is_constructor);
                assert_eq!(
                    func.return_type.as_ref().map(TypeExpr::format).as_deref(),
                    Some("int")
                );
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_main_function() {
        match parse_one("main() { start(); }") {
            Stmt::Function(func) => assert!(matches!(func.name, FunctionName::Main)),
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_pointer_and_const_parameters() {
        match parse_one("void update(const string &name, int value = 0) { }") {
            Stmt::Function(func) => {
                assert!(func.params[0].is_const);
                assert!(func.params[0].is_pointer);
                assert!(func.params[1].default.is_some());
            }
            other => panic!("expected function, got {other:?}"),
        }
    }

    #[test]
    fn test_constructor_inside_class() {
        let program = parse("class Device { Device() { init(); } };");
        match &program.statements[0] {
            Stmt::Class(class) => match &class.body.statements[0] {
                Stmt::Function(func) => {
                    assert!(func.is_constructor);
                    assert_eq!(func.name.as_str(), "Device");
                    assert!(func.return_type.is_none());
                }
                other => panic!("expected constructor, got {other:?}"),
            },
            other => panic!("expected class, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_declaration_and_values() {
        match parse_one("enum Color { RED = 1, GREEN, BLUE = 4 };") {
            Stmt::Enum(decl) => {
                assert_eq!(decl.name, "Color");
                assert_eq!(decl.values.len(), 3);
                assert_eq!(decl.values[0].value.as_deref(), Some("1"));
                assert_eq!(decl.values[1].value, None);
                assert_eq!(decl.values[2].value.as_deref(), Some("4"));
            }
            other => panic!("expected enum, got {other:?}"),
        }
    }

    #[test]
    fn test_enum_redefinition_is_rejected() {
        let source = "enum Color { RED };\nenum Color { BLUE };";
        let err = Parser::new(Lexer::new(source).tokenize().unwrap())
            .parse()
            .unwrap_err();
        assert!(err.message.contains("already defined"), "{err}");
    }

    #[test]
    fn test_enum_name_usable_as_type() {
        let program = parse("enum Color { RED = 1 };\nColor c = Color::RED;");
        match &program.statements[1] {
            Stmt::Declaration(decl) => {
                match decl.ty.as_ref().unwrap() {
                    TypeExpr::Atomic(atomic) => {
                        assert_eq!(atomic.tag, Some(UserTypeTag::Enum));
                    }
                    other => panic!("expected atomic type, got {other:?}"),
                }
                match decl.entries[0].init.as_ref().unwrap() {
                    Expr::EnumAccess(access) => {
                        assert_eq!(access.enum_name, "Color");
                        assert_eq!(access.variant, "RED");
                    }
                    other => panic!("expected enum access, got {other:?}"),
                }
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_struct_with_inheritance() {
        let program = parse("struct Base { int id; };\nstruct Extra : Base { int more; };");
        match &program.statements[1] {
            Stmt::Struct(decl) => {
                assert_eq!(decl.parent.as_ref().map(TypeExpr::format).as_deref(), Some("Base"));
            }
            other => panic!("expected struct, got {other:?}"),
        }
    }

    #[test]
    fn test_class_self_reference() {
        // The class name must resolve inside its own body.
        let source = "class Node { Node next() { return makeNode(); } };";
        let program = parse(source);
        assert!(matches!(program.statements[0], Stmt::Class(_)));
    }

    #[test]
    fn test_class_static_access_after_declaration() {
        let program = parse("class Util { };\nint x = Util::MAX;");
        match &program.statements[1] {
            Stmt::Declaration(decl) => {
                assert!(matches!(
                    decl.entries[0].init,
                    Some(Expr::StaticAccess(_))
                ));
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_template_declaration() {
        match parse_one("vector<int> numbers;") {
            Stmt::Declaration(decl) => {
                assert_eq!(decl.ty.as_ref().map(TypeExpr::format).as_deref(), Some("vector<int>"));
            }
            other => panic!("expected declaration, got {other:?}"),
        }
    }

    #[test]
    fn test_new_class_initialization() {
        let program = parse("class Device { };\nDevice d = new Device(5);");
        match &program.statements[1] {
            Stmt::Declaration(decl) => match decl.entries[0].init.as_ref().unwrap() {
                Expr::ClassInit(init) => {
                    assert!(init.is_new);
                    assert_eq!(init.args.len(), 1);
                }
                other => panic!("expected class init, got {other:?}"),
            },
            other => panic!("expected declaration, got {other:?}"),
        }
    }
}
