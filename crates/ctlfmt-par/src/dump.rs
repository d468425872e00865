//! Human-readable AST dumps.
//!
//! `ctlfmt <file> -a <out>` writes this rendering: one node per line, two
//! spaces of indentation per tree level, children beneath their parent.
//! The dump is diagnostic output, not source text; `emit` handles
//! re-emission.

use crate::ast::*;

impl Program {
    /// Renders the whole program as an indented node tree.
    pub fn tree(&self) -> String {
        let mut out = TreeWriter::new();
        out.line(0, "Program");
        for statement in &self.statements {
            statement.tree(&mut out, 1);
        }
        out.finish()
    }
}

struct TreeWriter {
    buf: String,
}

impl TreeWriter {
    fn new() -> Self {
        Self { buf: String::new() }
    }

    fn line(&mut self, level: usize, text: impl AsRef<str>) {
        for _ in 0..level {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    fn finish(self) -> String {
        self.buf
    }
}

impl Stmt {
    fn tree(&self, out: &mut TreeWriter, level: usize) {
        match self {
            Stmt::Library(import) => out.line(level, format!("Library({})", import.name)),
            Stmt::Declaration(decl) => decl.tree(out, level),
            Stmt::Function(func) => func.tree(out, level),
            Stmt::Enum(decl) => {
                out.line(level, format!("Enum({})", decl.name));
                for value in &decl.values {
                    match &value.value {
                        Some(number) => out.line(level + 1, format!("{} = {number}", value.name)),
                        None => out.line(level + 1, value.name.clone()),
                    }
                }
            }
            Stmt::Struct(decl) => {
                match &decl.parent {
                    Some(parent) => {
                        out.line(level, format!("Struct({} : {})", decl.name, parent.format()))
                    }
                    None => out.line(level, format!("Struct({})", decl.name)),
                }
                decl.body.tree(out, level + 1);
            }
            Stmt::Class(decl) => {
                match &decl.parent {
                    Some(parent) => {
                        out.line(level, format!("Class({} : {})", decl.name, parent.format()))
                    }
                    None => out.line(level, format!("Class({})", decl.name)),
                }
                decl.body.tree(out, level + 1);
            }
            Stmt::Assignment(assign) => {
                out.line(level, "Assignment");
                assign.target.tree(out, level + 1);
                assign.value.tree(out, level + 1);
            }
            Stmt::Compound(assign) => {
                out.line(level, format!("CompoundAssignment({})", assign.op.as_str()));
                assign.target.tree(out, level + 1);
                assign.value.tree(out, level + 1);
            }
            Stmt::Increment(inc) => {
                let position = if inc.prefix { "prefix" } else { "postfix" };
                out.line(level, format!("Increment({}, {position})", inc.op.as_str()));
                inc.target.tree(out, level + 1);
            }
            Stmt::If(stmt) => stmt.tree(out, level),
            Stmt::While(stmt) => {
                out.line(level, "While");
                out.line(level + 1, "condition:");
                stmt.condition.tree(out, level + 2);
                stmt.body.tree(out, level + 1);
            }
            Stmt::DoWhile(stmt) => {
                out.line(level, "DoWhile");
                stmt.body.tree(out, level + 1);
                out.line(level + 1, "condition:");
                stmt.condition.tree(out, level + 2);
            }
            Stmt::For(stmt) => {
                out.line(level, "For");
                out.line(level + 1, "init:");
                match &stmt.init {
                    ForInit::Declaration(decl) => decl.tree(out, level + 2),
                    ForInit::Step(step) => step.tree(out, level + 2),
                    ForInit::Ident(name) => out.line(level + 2, format!("Ident({name})")),
                }
                out.line(level + 1, "condition:");
                stmt.condition.tree(out, level + 2);
                if let Some(step) = &stmt.step {
                    out.line(level + 1, "step:");
                    step.tree(out, level + 2);
                }
                stmt.body.tree(out, level + 1);
            }
            Stmt::Switch(stmt) => {
                out.line(level, "Switch");
                stmt.scrutinee.tree(out, level + 1);
                for case in &stmt.cases {
                    if case.is_default {
                        out.line(level + 1, "Default");
                    } else {
                        out.line(level + 1, "Case");
                        if let Some(value) = &case.value {
                            value.tree(out, level + 2);
                        }
                    }
                    case.body.tree(out, level + 2);
                }
            }
            Stmt::Return(None) => out.line(level, "Return"),
            Stmt::Return(Some(expr)) => {
                out.line(level, "Return");
                expr.tree(out, level + 1);
            }
            Stmt::Break => out.line(level, "Break"),
            Stmt::Continue => out.line(level, "Continue"),
            Stmt::Try(stmt) => {
                out.line(level, "Try");
                stmt.try_block.tree(out, level + 1);
                out.line(level + 1, "catch:");
                stmt.catch_block.tree(out, level + 2);
                if let Some(finally_block) = &stmt.finally_block {
                    out.line(level + 1, "finally:");
                    finally_block.tree(out, level + 2);
                }
            }
            Stmt::Block(block) => block.tree(out, level),
            Stmt::Expr(expr) => expr.tree(out, level),
            Stmt::Divider(text) => out.line(level, format!("Divider({text})")),
            Stmt::Comment(text) => out.line(level, format!("Comment({text})")),
            Stmt::MultilineComment(lines) => {
                out.line(level, format!("MultilineComment({} lines)", lines.len()))
            }
            Stmt::BlankLine => out.line(level, "BlankLine"),
        }
    }
}

impl Block {
    fn tree(&self, out: &mut TreeWriter, level: usize) {
        out.line(level, "Block");
        for statement in &self.statements {
            statement.tree(out, level + 1);
        }
    }
}

impl Declaration {
    fn tree(&self, out: &mut TreeWriter, level: usize) {
        let mut header = String::from("Declaration");
        if self.is_const {
            header.push_str(" const");
        }
        if let Some(access) = self.access {
            header.push(' ');
            header.push_str(access.as_str());
        }
        if let Some(modifier) = self.modifiers.first() {
            header.push(' ');
            header.push_str(modifier.as_str());
        }
        out.line(level, header);

        if let Some(ty) = &self.ty {
            out.line(level + 1, format!("type: {}", ty.format()));
        }
        for entry in &self.entries {
            out.line(level + 1, format!("name: {}", entry.name));
            if let Some(init) = &entry.init {
                init.tree(out, level + 2);
            }
        }
    }
}

impl FunctionDecl {
    fn tree(&self, out: &mut TreeWriter, level: usize) {
        let mut header = format!("Function({})", self.name.as_str());
        if self.is_constructor {
            header.push_str(" constructor");
        }
        if let Some(access) = self.access {
            header.push(' ');
            header.push_str(access.as_str());
        }
        if let Some(modifier) = self.modifier {
            header.push(' ');
            header.push_str(modifier.as_str());
        }
        out.line(level, header);

        if let Some(ty) = &self.return_type {
            out.line(level + 1, format!("returns: {}", ty.format()));
        }
        for param in &self.params {
            let mut line = format!("param: {} {}", param.ty.format(), param.name);
            if param.is_pointer {
                line.push_str(" &");
            }
            if param.is_const {
                line.push_str(" const");
            }
            out.line(level + 1, line);
            if let Some(default) = &param.default {
                default.tree(out, level + 2);
            }
        }
        self.body.tree(out, level + 1);
    }
}

impl IfStmt {
    fn tree(&self, out: &mut TreeWriter, level: usize) {
        out.line(level, "If");
        out.line(level + 1, "condition:");
        self.condition.tree(out, level + 2);
        if let Some(block) = &self.then_block {
            block.tree(out, level + 1);
        }
        if let Some(inline) = &self.inline {
            inline.tree(out, level + 1);
        }
        for clause in &self.else_ifs {
            out.line(level + 1, "ElseIf");
            out.line(level + 2, "condition:");
            clause.condition.tree(out, level + 3);
            if let Some(block) = &clause.block {
                block.tree(out, level + 2);
            }
            if let Some(inline) = &clause.inline {
                inline.tree(out, level + 2);
            }
        }
        if let Some(clause) = &self.else_clause {
            out.line(level + 1, "Else");
            if let Some(block) = &clause.block {
                block.tree(out, level + 2);
            }
            if let Some(inline) = &clause.inline {
                inline.tree(out, level + 2);
            }
        }
    }
}

impl ForStep {
    fn tree(&self, out: &mut TreeWriter, level: usize) {
        match self {
            ForStep::Assign(assign) => {
                out.line(level, "Assignment");
                assign.target.tree(out, level + 1);
                assign.value.tree(out, level + 1);
            }
            ForStep::Compound(assign) => {
                out.line(level, format!("CompoundAssignment({})", assign.op.as_str()));
                assign.target.tree(out, level + 1);
                assign.value.tree(out, level + 1);
            }
            ForStep::Increment(inc) => {
                let position = if inc.prefix { "prefix" } else { "postfix" };
                out.line(level, format!("Increment({}, {position})", inc.op.as_str()));
                inc.target.tree(out, level + 1);
            }
        }
    }
}

impl Expr {
    fn tree(&self, out: &mut TreeWriter, level: usize) {
        match self {
            Expr::Number(number) => {
                let mut line = format!("Number({})", number.lexeme);
                if number.is_negative {
                    line.push_str(" negative");
                }
                if number.is_float {
                    line.push_str(" float");
                }
                out.line(level, line);
            }
            Expr::Bool(value) => out.line(level, format!("Bool({value})")),
            Expr::Char(lexeme) => out.line(level, format!("Char({lexeme})")),
            Expr::Str(literal) => out.line(level, format!("String({})", literal.lexeme)),
            Expr::Ident(ident) => out.line(level, format!("Ident({})", ident.name)),
            Expr::Global(name) => out.line(level, format!("Global(${name})")),
            Expr::Pointer(name) => out.line(level, format!("Pointer(&{name})")),
            Expr::Unary(unary) => {
                out.line(level, format!("Unary({})", unary.op.as_str()));
                unary.operand.tree(out, level + 1);
            }
            Expr::Binary(binary) => {
                out.line(level, format!("Binary({})", binary.op.as_str()));
                binary.left.tree(out, level + 1);
                binary.right.tree(out, level + 1);
            }
            Expr::Ternary(ternary) => {
                out.line(level, "Ternary");
                ternary.condition.tree(out, level + 1);
                ternary.if_true.tree(out, level + 1);
                ternary.if_false.tree(out, level + 1);
            }
            Expr::Attribute(access) => {
                out.line(level, format!("Attribute(.{})", access.attribute));
                access.object.tree(out, level + 1);
            }
            Expr::Index(access) => {
                out.line(level, "Index");
                access.object.tree(out, level + 1);
                access.index.tree(out, level + 1);
            }
            Expr::Call(call) => {
                out.line(level, "Call");
                call.callee.tree(out, level + 1);
                for arg in &call.args {
                    arg.tree(out, level + 1);
                }
            }
            Expr::StaticAccess(access) => {
                out.line(level, format!("StaticAccess({}::)", access.type_name));
                access.member.tree(out, level + 1);
            }
            Expr::EnumAccess(access) => out.line(
                level,
                format!("EnumAccess({}::{})", access.enum_name, access.variant),
            ),
            Expr::ClassInit(init) => {
                let header = if init.is_new {
                    format!("ClassInit(new {})", init.ty.format())
                } else {
                    format!("ClassInit({})", init.ty.format())
                };
                out.line(level, header);
                for arg in &init.args {
                    arg.tree(out, level + 1);
                }
            }
            Expr::Cast(cast) => {
                out.line(level, format!("Cast({})", cast.ty.format()));
                cast.operand.tree(out, level + 1);
            }
            Expr::Grouping(inner) => {
                out.line(level, "Grouping");
                inner.tree(out, level + 1);
            }
        }
    }
}
