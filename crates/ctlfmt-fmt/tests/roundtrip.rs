//! Whole-script round trips through the full pipeline.

use ctlfmt_fmt::{format_source, parse_source};
use ctlfmt_par::Stmt;

const PANEL_SCRIPT: &str = r#"#uses "ctrlMath"
#uses "tf"

────────────────────────────
// Panel state

enum RunState { IDLE = 0, ACTIVE, FAULT = 9 };

const int POLL_LIMIT = 50;
dyn_string g_names;

struct Sample {
  time when;
  float value;
};

class Recorder {
  public int count;

  Recorder(int capacity) { reserve(capacity); }

  void add(const Sample &s, bool force = false) {
    if (count >= POLL_LIMIT) {
      dropOldest();
    } else if (!force) {
      store(s);
    } else {
      storeFront(s);
    }
    count++;
  }
};

main() {
  Recorder r = Recorder(POLL_LIMIT);
  vector<shared_ptr<Sample>> window;
  int mask = 1 << 3;
  string label = $g_active ? "on" : "off";
  float ratio = (float)mask / 8.0;
  int code = TfErrHdl::last();

  for (int i = 0; i < POLL_LIMIT; i++) {
    mask = mask | readBit(i);
  }

  switch (state()) {
    case RunState::IDLE:
      idle();
      break;
    default:
      run(&r);
  }

  do {
    poll();
  } while (alive());

  try {
    commit();
  } catch {
    logError("commit failed");
  }
}
"#;

#[test]
fn panel_script_parses_completely() {
    let program = parse_source(PANEL_SCRIPT).unwrap();
    let kinds: Vec<&str> = program
        .statements
        .iter()
        .map(|s| match s {
            Stmt::Library(_) => "library",
            Stmt::Divider(_) => "divider",
            Stmt::Comment(_) => "comment",
            Stmt::Enum(_) => "enum",
            Stmt::Declaration(_) => "declaration",
            Stmt::Struct(_) => "struct",
            Stmt::Class(_) => "class",
            Stmt::Function(_) => "function",
            Stmt::BlankLine => "blank",
            _ => "other",
        })
        .collect();

    let significant: Vec<&str> = kinds.iter().copied().filter(|k| *k != "blank").collect();
    assert_eq!(
        significant,
        vec![
            "library",
            "library",
            "divider",
            "comment",
            "enum",
            "declaration",
            "declaration",
            "struct",
            "class",
            "function",
        ]
    );
}

#[test]
fn panel_script_formats_idempotently() {
    let once = format_source(PANEL_SCRIPT).unwrap();
    let twice = format_source(&once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn panel_script_formatting_details() {
    let formatted = format_source(PANEL_SCRIPT).unwrap();

    // Dividers and comments pass through verbatim.
    assert!(formatted.contains("────────────────────────────\n"));
    assert!(formatted.contains("// Panel state\n"));

    // Enum body, one value per line, two-space indent.
    assert!(formatted.contains("enum RunState {\n  IDLE = 0,\n  ACTIVE,\n  FAULT = 9\n};"));

    // The else-if chain continues on the closing brace line.
    assert!(formatted.contains("    if (count >= POLL_LIMIT) {\n      dropOldest();\n    } else if (!force) {"));

    // Nested template survives the shift-token close.
    assert!(formatted.contains("vector<shared_ptr<Sample>> window;"));

    // Shift and bitwise operators are spaced.
    assert!(formatted.contains("int mask = 1 << 3;"));
    assert!(formatted.contains("mask = mask | readBit(i);"));

    // Ternary over a global, cast, and library-type static access.
    assert!(formatted.contains("string label = $g_active ? \"on\" : \"off\";"));
    assert!(formatted.contains("float ratio = (float)mask / 8.0;"));
    assert!(formatted.contains("int code = TfErrHdl::last();"));

    // Case labels sit one level inside the switch, bodies one deeper.
    assert!(formatted.contains("  switch (state()) {\n    case RunState::IDLE:\n      idle();\n      break;\n    default:\n      run(&r);\n  }"));

    // Blank lines separate the top-level declarations.
    assert!(formatted.contains("};\n\nmain() {") || formatted.contains("};\n\nclass"));
}

#[test]
fn reparse_preserves_structure() {
    fn shape(statements: &[Stmt]) -> Vec<std::mem::Discriminant<Stmt>> {
        statements
            .iter()
            .filter(|s| !matches!(s, Stmt::BlankLine))
            .map(std::mem::discriminant)
            .collect()
    }

    let first = parse_source(PANEL_SCRIPT).unwrap();
    let formatted = format_source(PANEL_SCRIPT).unwrap();
    let second = parse_source(&formatted).unwrap();

    assert_eq!(shape(&first.statements), shape(&second.statements));
}
