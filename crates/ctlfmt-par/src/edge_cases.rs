//! End-to-end parsing and re-emission scenarios.

use ctlfmt_lex::Lexer;

use crate::*;

fn parse(source: &str) -> Program {
    Parser::new(Lexer::new(source).tokenize().unwrap())
        .parse()
        .unwrap()
}

fn reformat(source: &str) -> String {
    parse(source).format()
}

/// Strips blank-line statements for structural comparison.
fn without_blanks(program: &Program) -> Vec<Stmt> {
    program
        .statements
        .iter()
        .filter(|s| !matches!(s, Stmt::BlankLine))
        .cloned()
        .collect()
}

#[test]
fn scenario_declaration_with_precedence() {
    let program = parse("int x = 1 + 2 * 3;");
    match &program.statements[0] {
        Stmt::Declaration(decl) => {
            let init = decl.entries[0].init.as_ref().unwrap();
            match init {
                Expr::Binary(add) => {
                    assert_eq!(add.op, BinOp::Add);
                    assert!(matches!(
                        &*add.right,
                        Expr::Binary(mul) if mul.op == BinOp::Mul
                    ));
                }
                other => panic!("expected binary initializer, got {other:?}"),
            }
        }
        other => panic!("expected declaration, got {other:?}"),
    }
    assert_eq!(reformat("int x = 1 + 2 * 3;"), "int x = 1 + 2 * 3;");
}

#[test]
fn scenario_inline_if_chain_wraps_in_braces() {
    let formatted = reformat("if (a > 0) b = 1; else if (a < 0) b = -1; else b = 0;");
    assert_eq!(
        formatted,
        "if (a > 0) {\n  b = 1;\n} else if (a < 0) {\n  b = -1;\n} else {\n  b = 0;\n}"
    );
}

#[test]
fn scenario_lone_inline_if_stays_unwrapped() {
    assert_eq!(reformat("if (a > 0) b = 1;"), "if (a > 0)\n  b = 1;");
}

#[test]
fn scenario_enum_then_enum_access() {
    let program = parse("enum Color { RED = 1, GREEN, BLUE = 4 };\nColor c = Color::RED;");
    match &program.statements[0] {
        Stmt::Enum(decl) => {
            assert_eq!(decl.values[1].name, "GREEN");
            assert_eq!(decl.values[1].value, None);
        }
        other => panic!("expected enum, got {other:?}"),
    }
    match &program.statements[1] {
        Stmt::Declaration(decl) => {
            assert!(matches!(
                decl.entries[0].init,
                Some(Expr::EnumAccess(_))
            ));
        }
        other => panic!("expected declaration, got {other:?}"),
    }
}

#[test]
fn scenario_for_loop_with_index_compound() {
    let program = parse("for (int i = 0; i < n; i++) { sum += a[i]; }");
    match &program.statements[0] {
        Stmt::For(stmt) => {
            assert!(matches!(stmt.init, ForInit::Declaration(_)));
            match &stmt.condition {
                Expr::Binary(cmp) => assert_eq!(cmp.op, BinOp::Lt),
                other => panic!("expected relational condition, got {other:?}"),
            }
            match &*stmt.body {
                Stmt::Block(block) => match &block.statements[0] {
                    Stmt::Compound(assign) => {
                        assert!(matches!(assign.value, Expr::Index(_)));
                    }
                    other => panic!("expected compound assignment, got {other:?}"),
                },
                other => panic!("expected block body, got {other:?}"),
            }
        }
        other => panic!("expected for loop, got {other:?}"),
    }
    assert_eq!(
        reformat("for (int i = 0; i < n; i++) { sum += a[i]; }"),
        "for (int i = 0; i < n; i++) {\n  sum += a[i];\n}"
    );
}

#[test]
fn scenario_blank_line_after_import() {
    let program = parse("#uses \"ctrlMath\"\n\n\nvoid f() { return; }");
    assert!(matches!(program.statements[0], Stmt::Library(_)));
    assert!(matches!(program.statements[1], Stmt::BlankLine));
    assert!(matches!(program.statements[2], Stmt::Function(_)));
    assert_eq!(program.statements.len(), 3);
}

#[test]
fn scenario_nested_template_with_user_type() {
    let program = parse("class Foo { };\nvector<shared_ptr<Foo>> v;");
    match &program.statements[1] {
        Stmt::Declaration(decl) => match decl.ty.as_ref().unwrap() {
            TypeExpr::Template(vector) => {
                assert_eq!(vector.keyword, "vector");
                match &vector.inner[0] {
                    TypeExpr::Template(ptr) => {
                        assert_eq!(ptr.keyword, "shared_ptr");
                        match &ptr.inner[0] {
                            TypeExpr::Atomic(foo) => {
                                assert_eq!(foo.name, "Foo");
                                assert_eq!(foo.tag, Some(UserTypeTag::Class));
                            }
                            other => panic!("expected atomic inner type, got {other:?}"),
                        }
                    }
                    other => panic!("expected shared_ptr template, got {other:?}"),
                }
            }
            other => panic!("expected template type, got {other:?}"),
        },
        other => panic!("expected declaration, got {other:?}"),
    }
}

#[test]
fn precedence_pairs_associate_as_specified() {
    // Lower-precedence first operator: right operand groups.
    for (source, top) in [
        ("a || b && c", BinOp::Or),
        ("a && b | c", BinOp::And),
        ("a | b ^ c", BinOp::BitOr),
        ("a ^ b & c", BinOp::BitXor),
        ("a & b << c", BinOp::BitAnd),
        ("a << b == c", BinOp::Shl),
        ("a == b + c", BinOp::Eq),
        ("a + b * c", BinOp::Add),
    ] {
        let program = parse(&format!("x = {source};"));
        match &program.statements[0] {
            Stmt::Assignment(assign) => match &assign.value {
                Expr::Binary(b) => {
                    assert_eq!(b.op, top, "{source}");
                    assert!(matches!(&*b.right, Expr::Binary(_)), "{source}");
                    assert!(!matches!(&*b.left, Expr::Binary(_)), "{source}");
                }
                other => panic!("expected binary for {source}, got {other:?}"),
            },
            other => panic!("expected assignment, got {other:?}"),
        }
    }
}

#[test]
fn reformatting_is_idempotent() {
    let sources = [
        "int x = 1 + 2 * 3;",
        "if (a > 0) b = 1; else if (a < 0) b = -1; else b = 0;",
        "enum Color { RED = 1, GREEN, BLUE = 4 };\nColor c = Color::RED;",
        "for (int i = 0; i < n; i++) { sum += a[i]; }",
        "while (running)\n  poll();",
        "do { tick(); } while (alive);",
        "switch (mode) { case 1: x = 1; break; default: x = 0; }",
        "try { risky(); } catch { log(); } finally { done(); }",
        "#uses \"ctrlMath\"\n\nvoid f() { return; }",
        "x = (a + b) * c;",
        "string s = cond ? \"yes\" : \"no\";",
        "class Foo { };\nvector<shared_ptr<Foo>> v;",
        "─────────\n// section\nint x;",
        "/* header\n   text */\nint y;",
        "global_list[idx].value = -5;",
        "total += compute(&target, 'c');",
    ];

    for source in sources {
        let once = reformat(source);
        let twice = reformat(&once);
        assert_eq!(once, twice, "not idempotent for {source:?}");
    }
}

#[test]
fn reparsing_formatted_output_preserves_structure() {
    let sources = [
        "int x = 1 + 2 * 3;",
        "enum Color { RED = 1, GREEN };\nColor c = Color::RED;",
        "for (int i = 0; i < n; i++) { sum += a[i]; }",
        "x = (a + b) * c;",
        "if (a > 0) { b = 1; } else { b = 0; }",
    ];

    for source in sources {
        let first = parse(source);
        let second = parse(&first.format());
        assert_eq!(
            without_blanks(&first),
            without_blanks(&second),
            "structure changed for {source:?}"
        );
    }
}

#[test]
fn divider_and_comments_pass_through() {
    let source = "──────\n// note\n/* block */\nint x;";
    let formatted = reformat(source);
    assert!(formatted.contains("──────"));
    assert!(formatted.contains("// note"));
    assert!(formatted.contains("/*\n  block\n*/"));
}

#[test]
fn function_call_statement_gets_semicolon() {
    assert_eq!(reformat("dpSet(\"dp\", 1);"), "dpSet(\"dp\", 1);");
}

#[test]
fn multiple_blank_lines_collapse_to_one() {
    let formatted = reformat("x = 1;\n\n\n\ny = 2;");
    assert_eq!(formatted, "x = 1;\n\ny = 2;");
}

#[test]
fn parse_failure_reports_position() {
    let err = Parser::new(Lexer::new("int x = ;").tokenize().unwrap())
        .parse()
        .unwrap_err();
    assert_eq!(err.position.line, 1);
    assert!(err.position.column >= 9);
}
