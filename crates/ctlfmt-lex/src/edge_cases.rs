//! Edge-case and invariant tests for the lexer as a whole.

use crate::{Lexer, Token, TokenKind};

use proptest::prelude::*;

fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize().unwrap()
}

fn significant(source: &str) -> Vec<(TokenKind, String)> {
    lex(source)
        .into_iter()
        .filter(|t| !t.kind.is_trivia())
        .map(|t| (t.kind, t.lexeme))
        .collect()
}

#[test]
fn stream_ends_with_exactly_one_eof() {
    for source in ["", "int x;", "// only a comment", "\n\n\n"] {
        let tokens = lex(source);
        let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eof_count, 1, "{source:?}");
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
    }
}

#[test]
fn positions_are_non_decreasing() {
    let source = "#uses \"std\"\n\nvoid f() {\n  x += 1; // note\n}\n";
    let tokens = lex(source);
    let mut last = (0u32, 0u32);
    for token in &tokens {
        let here = (token.line, token.column);
        assert!(here >= last, "position went backwards at {token}");
        last = here;
    }
}

#[test]
fn shift_never_splits() {
    let tokens = significant("a<<b>>c");
    let symbols: Vec<_> = tokens
        .iter()
        .filter(|(k, _)| *k == TokenKind::Symbol)
        .map(|(_, l)| l.as_str())
        .collect();
    assert_eq!(symbols, vec!["<<", ">>"]);
}

#[test]
fn double_colon_never_splits() {
    let tokens = significant("A::B::C");
    assert!(!tokens.iter().any(|(k, l)| *k == TokenKind::Symbol && l == ":"));
    assert_eq!(
        tokens
            .iter()
            .filter(|(k, l)| *k == TokenKind::Symbol && l == "::")
            .count(),
        2
    );
}

#[test]
fn bare_colon_still_lexes() {
    let tokens = significant("case 1: break;");
    assert!(tokens.iter().any(|(k, l)| *k == TokenKind::Symbol && l == ":"));
}

#[test]
fn numeric_prefix_without_digits_fails() {
    for source in ["int x = 0x;", "int y = 0b;", "int z = 0o;"] {
        assert!(Lexer::new(source).tokenize().is_err(), "{source}");
    }
}

#[test]
fn comment_at_eof_without_newline() {
    let tokens = lex("int x; // done");
    assert_eq!(tokens[tokens.len() - 2].kind, TokenKind::Comment);
    assert_eq!(tokens[tokens.len() - 2].lexeme, " done");
}

#[test]
fn dyn_collection_types() {
    let tokens = significant("dyn_string names; dyn_dyn_int grid;");
    assert_eq!(tokens[0], (TokenKind::TypeKeyword, "dyn_string".into()));
    assert_eq!(tokens[3], (TokenKind::TypeKeyword, "dyn_dyn_int".into()));
}

#[test]
fn global_and_pointer_prefixes() {
    let tokens = significant("$g_value &ref");
    assert_eq!(tokens[0], (TokenKind::Symbol, "$".into()));
    assert_eq!(tokens[1], (TokenKind::Identifier, "g_value".into()));
    assert_eq!(tokens[2], (TokenKind::Symbol, "&".into()));
    assert_eq!(tokens[3], (TokenKind::Identifier, "ref".into()));
}

#[test]
fn library_import_line() {
    let tokens = significant("#uses \"ctrlMath\"");
    assert_eq!(
        tokens,
        vec![
            (TokenKind::Symbol, "#".into()),
            (TokenKind::Keyword, "uses".into()),
            (TokenKind::StringLiteral, "\"ctrlMath\"".into()),
            (TokenKind::Eof, String::new()),
        ]
    );
}

#[test]
fn template_declaration_tokens() {
    let tokens = significant("vector<shared_ptr<int>> v;");
    assert_eq!(tokens[0].0, TokenKind::TemplateTypeKeyword);
    assert_eq!(tokens[1], (TokenKind::ComparisonOperator, "<".into()));
    assert_eq!(tokens[2].0, TokenKind::TemplateTypeKeyword);
    // The closing `>>` of a nested template lexes as a shift symbol; the
    // parser deals with it.
    assert!(tokens.iter().any(|(k, l)| *k == TokenKind::Symbol && l == ">>")
        || tokens
            .iter()
            .filter(|(k, l)| *k == TokenKind::ComparisonOperator && l == ">")
            .count()
            == 2);
}

#[test]
fn ternary_symbols() {
    let tokens = significant("a ? b : c");
    assert!(tokens.iter().any(|(k, l)| *k == TokenKind::Symbol && l == "?"));
    assert!(tokens.iter().any(|(k, l)| *k == TokenKind::Symbol && l == ":"));
}

proptest! {
    /// For any input the lexer either fails cleanly or produces a stream
    /// with exactly one trailing EOF and lexicographically non-decreasing
    /// positions.
    #[test]
    fn lexer_invariants_hold(source in "[ -~\n\t]{0,120}") {
        if let Ok(tokens) = Lexer::new(&source).tokenize() {
            prop_assert!(!tokens.is_empty());
            prop_assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
            let eof_count = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
            prop_assert_eq!(eof_count, 1);

            let mut last = (0u32, 0u32);
            for token in &tokens {
                let here = (token.line, token.column);
                prop_assert!(here >= last);
                last = here;
            }
        }
    }

    /// Lexing never loses or invents non-whitespace characters for
    /// operator-free word streams.
    #[test]
    fn word_streams_round_trip(words in proptest::collection::vec("[a-z_][a-z0-9_]{0,8}", 0..8)) {
        let source = words.join(" ");
        let tokens = Lexer::new(&source).tokenize().unwrap();
        let rebuilt: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        prop_assert_eq!(rebuilt, source);
    }
}
