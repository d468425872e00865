//! Canonical re-emission of AST nodes.
//!
//! Every node formats itself back into source text: two spaces per indent
//! level, binary operators spaced, access chains and calls tight, blocks
//! as `{\n ... \n}`. Inside a statement sequence a serialized statement
//! that does not already end in `;`, a newline or `}` gets a trailing `;`;
//! dividers, comments and blank-line markers are exempt and pass through
//! verbatim. Consecutive blank-line markers collapse to a single blank
//! line.

use crate::ast::*;

/// Two spaces per indentation level.
pub fn indent(level: usize) -> String {
    "  ".repeat(level)
}

/// Joins a statement sequence, applying the trailing-semicolon rule and
/// collapsing consecutive blank-line markers.
pub fn join_statements(statements: &[Stmt], level: usize) -> String {
    let mut lines = Vec::new();
    let mut previous_was_blank = false;

    for statement in statements {
        if matches!(statement, Stmt::BlankLine) {
            if !previous_was_blank {
                lines.push(String::new());
            }
            previous_was_blank = true;
        } else {
            lines.push(statement.format_terminated(level));
            previous_was_blank = false;
        }
    }

    lines.join("\n")
}

/// Renders a block body inside braces at the given outer level.
fn braced(body: &Block, level: usize) -> String {
    let inner = join_statements(&body.statements, level + 1);
    if inner.is_empty() {
        format!("{{\n{}}}", indent(level))
    } else {
        format!("{{\n{inner}\n{}}}", indent(level))
    }
}

/// Renders a loop or clause body that is either a block or a single
/// statement: blocks open on the same line, single statements drop to the
/// next line one level deeper.
fn body_or_statement(body: &Stmt, level: usize) -> String {
    match body {
        Stmt::Block(block) => format!(" {}", braced(block, level)),
        other => format!("\n{}", other.format_terminated(level + 1)),
    }
}

impl Program {
    /// Re-emits the whole program at the left margin.
    pub fn format(&self) -> String {
        join_statements(&self.statements, 0)
            .trim_matches('\n')
            .to_string()
    }
}

impl Stmt {
    /// Serialized form with the trailing-semicolon rule applied.
    pub fn format_terminated(&self, level: usize) -> String {
        let text = self.format(level);
        match self {
            // Dividers, comments and blank lines pass through verbatim, and
            // the `#uses` directive never takes a semicolon.
            Stmt::Divider(_)
            | Stmt::Comment(_)
            | Stmt::MultilineComment(_)
            | Stmt::BlankLine
            | Stmt::Library(_) => text,
            _ => {
                if text.ends_with(';') || text.ends_with('\n') || text.ends_with('}') {
                    text
                } else {
                    format!("{text};")
                }
            }
        }
    }

    /// Serialized form of this statement at the given indent level.
    pub fn format(&self, level: usize) -> String {
        let pad = indent(level);
        match self {
            Stmt::Library(import) => format!("{pad}#uses {}", import.name),
            Stmt::Declaration(decl) => format!("{pad}{};", decl.format_bare()),
            Stmt::Function(func) => func.format(level),
            Stmt::Enum(decl) => decl.format(level),
            Stmt::Struct(decl) => decl.format(level),
            Stmt::Class(decl) => decl.format(level),
            Stmt::Assignment(assign) => format!("{pad}{};", assign.format_bare()),
            Stmt::Compound(assign) => format!("{pad}{};", assign.format_bare()),
            Stmt::Increment(inc) => format!("{pad}{};", inc.format_bare()),
            Stmt::If(stmt) => stmt.format(level),
            Stmt::While(stmt) => format!(
                "{pad}while ({}){}",
                stmt.condition.format(),
                body_or_statement(&stmt.body, level)
            ),
            Stmt::DoWhile(stmt) => format!(
                "{pad}do {} while ({});",
                braced(&stmt.body, level),
                stmt.condition.format()
            ),
            Stmt::For(stmt) => stmt.format(level),
            Stmt::Switch(stmt) => stmt.format(level),
            Stmt::Return(None) => format!("{pad}return;"),
            Stmt::Return(Some(expr)) => format!("{pad}return {};", expr.format()),
            Stmt::Break => format!("{pad}break;"),
            Stmt::Continue => format!("{pad}continue;"),
            Stmt::Try(stmt) => stmt.format(level),
            Stmt::Block(block) => format!("{pad}{}", braced(block, level)),
            Stmt::Expr(expr) => format!("{pad}{}", expr.format()),
            Stmt::Divider(text) => format!("{pad}{text}"),
            Stmt::Comment(text) => format!("{pad}//{text}"),
            Stmt::MultilineComment(lines) => {
                let mut out = format!("{pad}/*\n");
                for line in lines {
                    out.push_str(&indent(level + 1));
                    out.push_str(line);
                    out.push('\n');
                }
                out.push_str(&pad);
                out.push_str("*/");
                out
            }
            Stmt::BlankLine => String::new(),
        }
    }
}

impl Declaration {
    /// The declaration without indentation or trailing semicolon, as used
    /// in `for` initialization slots.
    pub fn format_bare(&self) -> String {
        let mut out = String::new();
        if self.is_const {
            out.push_str("const ");
        }
        if let Some(access) = self.access {
            out.push_str(access.as_str());
            out.push(' ');
        }
        if let Some(modifier) = self.modifiers.first() {
            out.push_str(modifier.as_str());
            out.push(' ');
        }
        if let Some(ty) = &self.ty {
            out.push_str(&ty.format());
            out.push(' ');
        }

        let entries: Vec<String> = self.entries.iter().map(DeclEntry::format).collect();
        out.push_str(&entries.join(", "));
        out
    }
}

impl DeclEntry {
    fn format(&self) -> String {
        let mut out = self.name.clone();
        if let Some(init) = &self.init {
            out.push_str(" = ");
            if let Some(comment) = &self.before_comment {
                out.push_str(&format!("//{comment} "));
            }
            out.push_str(&init.format());
        }
        if let Some(comment) = &self.after_comment {
            out.push_str(&format!(" //{comment}"));
        }
        out
    }
}

impl FunctionDecl {
    fn format(&self, level: usize) -> String {
        let mut out = indent(level);
        if let Some(access) = self.access {
            out.push_str(access.as_str());
            out.push(' ');
        }
        if let Some(modifier) = self.modifier {
            out.push_str(modifier.as_str());
            out.push(' ');
        }
        if let Some(ty) = &self.return_type {
            out.push_str(&ty.format());
            out.push(' ');
        }
        out.push_str(self.name.as_str());
        out.push('(');
        let params: Vec<String> = self.params.iter().map(Param::format).collect();
        out.push_str(&params.join(", "));
        out.push_str(") ");
        out.push_str(&braced(&self.body, level));
        out
    }
}

impl Param {
    fn format(&self) -> String {
        let mut out = String::new();
        if self.is_const {
            out.push_str("const ");
        }
        out.push_str(&self.ty.format());
        out.push(' ');
        if self.is_pointer {
            out.push('&');
        }
        out.push_str(&self.name);
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(&default.format());
        }
        out
    }
}

impl EnumDecl {
    fn format(&self, level: usize) -> String {
        let pad = indent(level);
        let mut out = format!("{pad}enum {} {{\n", self.name);
        let values: Vec<String> = self
            .values
            .iter()
            .map(|value| match &value.value {
                Some(number) => format!("{}{} = {number}", indent(level + 1), value.name),
                None => format!("{}{}", indent(level + 1), value.name),
            })
            .collect();
        out.push_str(&values.join(",\n"));
        out.push_str(&format!("\n{pad}}};"));
        out
    }
}

impl StructDecl {
    fn format(&self, level: usize) -> String {
        let mut out = format!("{}struct {}", indent(level), self.name);
        if let Some(parent) = &self.parent {
            out.push_str(&format!(" : {}", parent.format()));
        }
        out.push(' ');
        out.push_str(&braced(&self.body, level));
        out.push(';');
        out
    }
}

impl ClassDecl {
    fn format(&self, level: usize) -> String {
        let mut out = format!("{}class {}", indent(level), self.name);
        if let Some(parent) = &self.parent {
            out.push_str(&format!(" : {}", parent.format()));
        }
        out.push(' ');
        out.push_str(&braced(&self.body, level));
        out.push(';');
        out
    }
}

impl Assignment {
    pub fn format_bare(&self) -> String {
        format!("{} = {}", self.target.format(), self.value.format())
    }
}

impl CompoundAssignment {
    pub fn format_bare(&self) -> String {
        format!(
            "{} {} {}",
            self.target.format(),
            self.op.as_str(),
            self.value.format()
        )
    }
}

impl Increment {
    pub fn format_bare(&self) -> String {
        if self.prefix {
            format!("{}{}", self.op.as_str(), self.target.format())
        } else {
            format!("{}{}", self.target.format(), self.op.as_str())
        }
    }
}

impl IfStmt {
    fn format(&self, level: usize) -> String {
        let pad = indent(level);
        // With any else-if/else clause, inline branches are wrapped in
        // braces so the chain re-parses as one statement.
        let wrap_inline = self.has_clauses();

        let mut out = format!("{pad}if ({})", self.condition.format());
        out.push_str(&clause_body(
            self.then_block.as_ref(),
            self.inline.as_deref(),
            level,
            wrap_inline,
        ));

        for clause in &self.else_ifs {
            out.push_str(&format!(" else if ({})", clause.condition.format()));
            out.push_str(&clause_body(
                clause.block.as_ref(),
                clause.inline.as_deref(),
                level,
                wrap_inline,
            ));
        }

        if let Some(clause) = &self.else_clause {
            out.push_str(" else");
            out.push_str(&clause_body(
                clause.block.as_ref(),
                clause.inline.as_deref(),
                level,
                wrap_inline,
            ));
        }

        out
    }
}

/// Renders one if/else-if/else clause body. `wrap_inline` forces an inline
/// statement into braces.
fn clause_body(
    block: Option<&Block>,
    inline: Option<&Stmt>,
    level: usize,
    wrap_inline: bool,
) -> String {
    match (block, inline) {
        (Some(block), _) => format!(" {}", braced(block, level)),
        (None, Some(statement)) => {
            if wrap_inline {
                let inner = statement.format_terminated(level + 1);
                format!(" {{\n{inner}\n{}}}", indent(level))
            } else {
                format!("\n{}", statement.format_terminated(level + 1))
            }
        }
        (None, None) => String::new(),
    }
}

impl ForLoop {
    fn format(&self, level: usize) -> String {
        let init = match &self.init {
            ForInit::Declaration(decl) => decl.format_bare(),
            ForInit::Step(step) => step.format_bare(),
            ForInit::Ident(name) => name.clone(),
        };
        let mut header = format!(
            "{}for ({init}; {};",
            indent(level),
            self.condition.format()
        );
        if let Some(step) = &self.step {
            header.push(' ');
            header.push_str(&step.format_bare());
        }
        header.push(')');
        header.push_str(&body_or_statement(&self.body, level));
        header
    }
}

impl ForStep {
    pub fn format_bare(&self) -> String {
        match self {
            ForStep::Assign(assign) => assign.format_bare(),
            ForStep::Compound(assign) => assign.format_bare(),
            ForStep::Increment(inc) => inc.format_bare(),
        }
    }
}

impl SwitchStmt {
    fn format(&self, level: usize) -> String {
        let pad = indent(level);
        let mut out = format!("{pad}switch ({}) {{\n", self.scrutinee.format());
        for case in &self.cases {
            out.push_str(&case.format(level + 1));
            out.push('\n');
        }
        out.push_str(&pad);
        out.push('}');
        out
    }
}

impl CaseClause {
    fn format(&self, level: usize) -> String {
        let label = if self.is_default {
            format!("{}default:", indent(level))
        } else {
            let value = self.value.as_ref().map(Expr::format).unwrap_or_default();
            format!("{}case {value}:", indent(level))
        };
        let inner = join_statements(&self.body.statements, level + 1);
        if inner.is_empty() {
            label
        } else {
            format!("{label}\n{inner}")
        }
    }
}

impl TryStmt {
    fn format(&self, level: usize) -> String {
        let mut out = format!("{}try {}", indent(level), braced(&self.try_block, level));
        out.push_str(&format!(" catch {}", braced(&self.catch_block, level)));
        if let Some(finally_block) = &self.finally_block {
            out.push_str(&format!(" finally {}", braced(finally_block, level)));
        }
        out
    }
}

impl Expr {
    /// Serialized form of this expression. Expressions carry no
    /// indentation; the enclosing statement supplies it.
    pub fn format(&self) -> String {
        match self {
            Expr::Number(number) => {
                if number.is_negative {
                    format!("-{}", number.lexeme)
                } else {
                    number.lexeme.clone()
                }
            }
            Expr::Bool(value) => (if *value { "true" } else { "false" }).to_string(),
            Expr::Char(lexeme) => lexeme.clone(),
            Expr::Str(literal) => literal.lexeme.clone(),
            Expr::Ident(ident) => ident.name.clone(),
            Expr::Global(name) => format!("${name}"),
            Expr::Pointer(name) => format!("&{name}"),
            Expr::Unary(unary) => format!("{}{}", unary.op.as_str(), unary.operand.format()),
            Expr::Binary(binary) => format!(
                "{} {} {}",
                binary.left.format(),
                binary.op.as_str(),
                binary.right.format()
            ),
            Expr::Ternary(ternary) => format!(
                "{} ? {} : {}",
                ternary.condition.format(),
                ternary.if_true.format(),
                ternary.if_false.format()
            ),
            Expr::Attribute(access) => {
                format!("{}.{}", access.object.format(), access.attribute)
            }
            Expr::Index(access) => {
                format!("{}[{}]", access.object.format(), access.index.format())
            }
            Expr::Call(call) => {
                let args: Vec<String> = call.args.iter().map(Expr::format).collect();
                format!("{}({})", call.callee.format(), args.join(", "))
            }
            Expr::StaticAccess(access) => {
                format!("{}::{}", access.type_name, access.member.format())
            }
            Expr::EnumAccess(access) => format!("{}::{}", access.enum_name, access.variant),
            Expr::ClassInit(init) => {
                let args: Vec<String> = init.args.iter().map(Expr::format).collect();
                let prefix = if init.is_new { "new " } else { "" };
                format!("{prefix}{}({})", init.ty.format(), args.join(", "))
            }
            Expr::Cast(cast) => format!("({}){}", cast.ty.format(), cast.operand.format()),
            Expr::Grouping(inner) => format!("({})", inner.format()),
        }
    }
}

impl TypeExpr {
    pub fn format(&self) -> String {
        match self {
            TypeExpr::Atomic(atomic) => atomic.name.clone(),
            TypeExpr::Template(template) => {
                let inner: Vec<String> = template.inner.iter().map(TypeExpr::format).collect();
                format!("{}<{}>", template.keyword, inner.join(", "))
            }
        }
    }
}
