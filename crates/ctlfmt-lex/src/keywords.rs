//! Keyword and operator tables for the CTL language.
//!
//! The base lists are compile-time constants. The full type-keyword list is
//! expanded once at lexer construction (every base type also exists as a
//! `dyn_` and `dyn_dyn_` collection variant) and the operator and symbol
//! tables are sorted by descending length so that `==` beats `=`, `<<`
//! beats `<`, and `::` beats `:`. None of the tables are mutated after
//! construction.

/// Reserved words. `if`, `else`, `else if` and `main` are lexed separately
/// with their own kinds and are not listed here.
pub const KEYWORDS: &[&str] = &[
    "while", "for", "return", "break", "continue", "true", "false", "null", "uses", "const",
    "enum", "switch", "case", "default", "struct", "class", "try", "catch", "finally", "do", "new",
];

/// `static`-style declaration modifiers.
pub const MODIFIERS: &[&str] = &["static", "global", "synchronized"];

/// Access modifiers on declarations and functions.
pub const ACCESS_MODIFIERS: &[&str] = &["public", "private", "protected"];

/// Built-in scalar types. Each is expanded to `dyn_<t>` and `dyn_dyn_<t>`.
pub const BASE_TYPE_KEYWORDS: &[&str] = &[
    "string", "int", "float", "bool", "void", "mapping", "file", "uint", "time", "anytype",
    "errClass", "mixed", "ulong", "char", "unsigned", "bit64", "shape", "bit32", "long", "palette",
];

/// Types provided by the standard control libraries. Matched like type
/// keywords so that declarations of these resolve without a symbol table.
pub const LIBRARY_TYPE_KEYWORDS: &[&str] = &[
    "OaTestResultEnvironment",
    "OaTestResultStatistic",
    "LogEntry",
    "OaTestResult",
    "OsInfo",
    "TfString",
    "ProjEnvProject",
    "fitLookUpTable",
    "ProjEnvComponent",
    "JsonFile",
    "OaTestResultFileFormat",
    "TfTestRunner",
    "TfTestProject",
    "TfNotifier",
    "TfErrHdl",
    "LogReader",
    "Scope",
    "Trend",
];

/// Types taking angle-bracket arguments.
pub const TEMPLATE_TYPE_KEYWORDS: &[&str] = &["vector", "shared_ptr"];

pub const ARITHMETIC_OPERATORS: &[&str] = &["+", "-", "*", "/", "%", "++", "--"];

pub const ASSIGNMENT_OPERATORS: &[&str] = &["+=", "-=", "*=", "/=", "%=", "="];

pub const COMPARISON_OPERATORS: &[&str] = &["==", "!=", ">", ">=", "<", "<="];

pub const LOGICAL_OPERATORS: &[&str] = &["&&", "||", "!"];

/// Punctuation. `::`, `<<` and `>>` must beat their one-character prefixes,
/// which the length sort guarantees.
pub const SYMBOLS: &[&str] = &[
    "(", ")", "{", "}", "[", "]", ",", ";", ":", ".", "$", "#", "?", "&", "|", "^", "~", "::",
    "<<", ">>",
];

/// Lookup tables built once per lexer.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    /// Base types, their `dyn_`/`dyn_dyn_` variants, and library types.
    pub type_keywords: Vec<String>,
    pub comparison_operators: Vec<&'static str>,
    pub assignment_operators: Vec<&'static str>,
    pub arithmetic_operators: Vec<&'static str>,
    pub logical_operators: Vec<&'static str>,
    pub symbols: Vec<&'static str>,
}

impl KeywordTable {
    pub fn new() -> Self {
        let mut type_keywords = Vec::with_capacity(BASE_TYPE_KEYWORDS.len() * 3);
        for base in BASE_TYPE_KEYWORDS {
            type_keywords.push((*base).to_string());
            type_keywords.push(format!("dyn_{base}"));
            type_keywords.push(format!("dyn_dyn_{base}"));
        }
        type_keywords.extend(LIBRARY_TYPE_KEYWORDS.iter().map(|k| (*k).to_string()));

        Self {
            type_keywords,
            comparison_operators: sorted_by_length(COMPARISON_OPERATORS),
            assignment_operators: sorted_by_length(ASSIGNMENT_OPERATORS),
            arithmetic_operators: sorted_by_length(ARITHMETIC_OPERATORS),
            logical_operators: sorted_by_length(LOGICAL_OPERATORS),
            symbols: sorted_by_length(SYMBOLS),
        }
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest entries first, ties in table order.
fn sorted_by_length(table: &[&'static str]) -> Vec<&'static str> {
    let mut sorted = table.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    sorted
}
