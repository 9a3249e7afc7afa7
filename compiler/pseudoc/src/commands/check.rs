//! The `check` command: parse an IR document without executing it.

use pseudo_eval::TraceError;
use pseudo_ir::{Node, NodeKind, Program};

use super::read_source;

/// What `check` found in a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Top-level statements.
    pub statements: usize,
    /// Nodes at any depth.
    pub nodes: usize,
    /// Unrecognized nodes as `(line, kind)`, in document order.
    pub unsupported: Vec<(Option<u32>, String)>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.unsupported.is_empty()
    }
}

/// Parse `source` and walk every node.
///
/// Only malformed JSON is an error here; unrecognized nodes are collected
/// in the report since execution may never reach them.
pub fn check_source(source: &str) -> Result<CheckReport, TraceError> {
    let program = Program::from_json(source)?;
    let mut report = CheckReport {
        statements: program.program.len(),
        ..CheckReport::default()
    };
    walk_all(&program.program, &mut report);
    Ok(report)
}

fn walk_all(nodes: &[Node], report: &mut CheckReport) {
    for node in nodes {
        walk(node, report);
    }
}

fn walk(node: &Node, report: &mut CheckReport) {
    report.nodes += 1;
    match &node.kind {
        NodeKind::VariableDeclaration { value, .. }
        | NodeKind::PrintStatement { value }
        | NodeKind::ReturnStatement { value } => walk(value, report),
        NodeKind::IfStatement {
            condition,
            consequent,
            alternate,
        } => {
            walk(condition, report);
            walk_all(consequent, report);
            if let Some(alternate) = alternate {
                walk_all(alternate, report);
            }
        }
        NodeKind::LoopUntil { condition, body } => {
            walk(condition, report);
            walk_all(body, report);
        }
        NodeKind::LoopFromTo { range, body, .. } => {
            walk(&range.start, report);
            walk(&range.end, report);
            walk_all(body, report);
        }
        NodeKind::FunctionDeclaration { body, .. } => walk_all(body, report),
        NodeKind::Expression { left, right, .. } => {
            for operand in [left, right].into_iter().flatten() {
                walk(operand, report);
            }
        }
        NodeKind::SubstringExpression { start, end, .. } => {
            walk(start, report);
            walk(end, report);
        }
        NodeKind::Unsupported { kind } => report.unsupported.push((node.line, kind.clone())),
        NodeKind::Identifier { .. }
        | NodeKind::NumberLiteral { .. }
        | NodeKind::StringLiteral { .. }
        | NodeKind::BooleanLiteral { .. }
        | NodeKind::LengthExpression { .. } => {}
    }
}

/// Check a file (or stdin for `-`). Exits 1 if it is malformed or holds
/// unsupported nodes.
pub fn check_file(path: &str) {
    let source = read_source(path);
    let report = match check_source(&source) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    if !report.is_ok() {
        for (line, kind) in &report.unsupported {
            match line {
                Some(line) => eprintln!("error: line {line}: unsupported IR node '{kind}'"),
                None => eprintln!("error: unsupported IR node '{kind}'"),
            }
        }
        std::process::exit(1);
    }

    println!(
        "OK: {path} ({} statements, {} nodes)",
        report.statements, report.nodes
    );
}
