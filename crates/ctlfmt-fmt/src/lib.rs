//! ctlfmt-fmt - Formatter shell and core pipeline entry point.
//!
//! The heavy lifting happens in the AST's own `format` methods; this crate
//! adds the file-level polish: exactly one blank line before and after
//! every top-level function, class and struct declaration, consecutive
//! blank lines collapsed to one, and a single trailing newline. It also
//! exposes the one-call pipeline (`source -> tokens -> AST -> text`) that
//! the driver consumes, converting both failure kinds into a single
//! [`CtlError`].

use ctlfmt_lex::Lexer;
use ctlfmt_par::{Parser, Program, Stmt};
use ctlfmt_util::CtlError;

/// Lexes and parses a source string into a program.
///
/// # Errors
///
/// Returns the lex or parse failure for the file; there is no recovery.
pub fn parse_source(source: &str) -> Result<Program, CtlError> {
    let tokens = Lexer::new(source).tokenize()?;
    let program = Parser::new(tokens).parse()?;
    Ok(program)
}

/// Runs the full pipeline and returns the normalized source text.
pub fn format_source(source: &str) -> Result<String, CtlError> {
    let program = parse_source(source)?;
    Ok(Formatter::new(&program).format())
}

/// Formatter shell over a parsed program.
pub struct Formatter<'a> {
    program: &'a Program,
}

impl<'a> Formatter<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Re-emits the program with blank lines injected around top-level
    /// function, class and struct declarations.
    pub fn format(&self) -> String {
        let mut pieces: Vec<String> = Vec::new();

        for statement in &self.program.statements {
            match statement {
                Stmt::BlankLine => {
                    if pieces.last().is_some_and(|piece| !piece.is_empty()) {
                        pieces.push(String::new());
                    }
                }
                _ => {
                    if wants_surrounding_blanks(statement)
                        && pieces.last().is_some_and(|piece| !piece.is_empty())
                    {
                        pieces.push(String::new());
                    }
                    pieces.push(statement.format_terminated(0));
                    if wants_surrounding_blanks(statement) {
                        pieces.push(String::new());
                    }
                }
            }
        }

        while pieces.first().is_some_and(String::is_empty) {
            pieces.remove(0);
        }
        while pieces.last().is_some_and(String::is_empty) {
            pieces.pop();
        }

        let mut out = pieces.join("\n");
        out.push('\n');
        out
    }
}

/// Top-level declarations that get breathing room.
fn wants_surrounding_blanks(statement: &Stmt) -> bool {
    matches!(
        statement,
        Stmt::Function(_) | Stmt::Class(_) | Stmt::Struct(_)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_injected_around_functions() {
        let formatted = format_source("int a;\nvoid f() { return; }\nint b;").unwrap();
        assert_eq!(
            formatted,
            "int a;\n\nvoid f() {\n  return;\n}\n\nint b;\n"
        );
    }

    #[test]
    fn test_import_keeps_one_blank_line() {
        let formatted = format_source("#uses \"ctrlMath\"\n\n\nvoid f() { return; }").unwrap();
        assert_eq!(
            formatted,
            "#uses \"ctrlMath\"\n\nvoid f() {\n  return;\n}\n"
        );
    }

    #[test]
    fn test_existing_blank_is_not_doubled() {
        let formatted = format_source("int a;\n\nvoid f() { }\n\nint b;").unwrap();
        assert_eq!(formatted, "int a;\n\nvoid f() {\n}\n\nint b;\n");
    }

    #[test]
    fn test_class_and_struct_get_blanks() {
        let formatted =
            format_source("int a;\nstruct P { int x; };\nclass D { };\nint b;").unwrap();
        assert_eq!(
            formatted,
            "int a;\n\nstruct P {\n  int x;\n};\n\nclass D {\n};\n\nint b;\n"
        );
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let sources = [
            "int a;\nvoid f() { return; }\nint b;",
            "#uses \"std\"\n\n\n\nmain() { start(); }",
            "enum Mode { A, B };\nswitch (m) { case 1: go(); break; default: stop(); }",
            "struct P { int x; };\nP p;\nif (ready) run(); else wait();",
        ];
        for source in sources {
            let once = format_source(source).unwrap();
            let twice = format_source(&once).unwrap();
            assert_eq!(once, twice, "not idempotent for {source:?}");
        }
    }

    #[test]
    fn test_lex_error_propagates() {
        match format_source("int x = @;") {
            Err(CtlError::Lex(err)) => assert_eq!(err.character, '@'),
            other => panic!("expected lex error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_propagates() {
        match format_source("int x = ;") {
            Err(CtlError::Parse(err)) => assert!(err.message.contains("primary")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_newline() {
        let formatted = format_source("int x;").unwrap();
        assert!(formatted.ends_with(";\n"));
        assert!(!formatted.ends_with("\n\n"));
    }
}
