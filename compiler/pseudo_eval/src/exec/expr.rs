//! Expression evaluation.
//!
//! Pure with respect to the symbol table: expressions read variables but
//! never declare them.

use pseudo_ir::{Node, NodeKind};

use crate::errors::{invalid_operand, unsupported_node, TraceError, TraceResult};
use crate::operators::{evaluate_binary, evaluate_not, quoted};
use crate::stack::ensure_sufficient_stack;
use crate::symbol_table::SymbolTable;
use crate::value::{SubstringValue, Value};

/// Evaluate an expression node.
///
/// Identifiers read the plain value of a variable; only a substring
/// expression itself yields a [`Value::Substring`].
pub fn evaluate(node: &Node, table: &SymbolTable) -> TraceResult<Value> {
    ensure_sufficient_stack(|| match &node.kind {
        NodeKind::Identifier { name } => Ok(table.get(name)?.value.clone().into_primitive()),
        NodeKind::NumberLiteral { value } => Ok(Value::Number(*value)),
        NodeKind::StringLiteral { value } => Ok(Value::String(value.clone())),
        NodeKind::BooleanLiteral { value } => Ok(Value::Boolean(*value)),
        NodeKind::Expression {
            left,
            operator,
            right,
        } => {
            if operator.is_unary() {
                let operand = right
                    .as_deref()
                    .or(left.as_deref())
                    .ok_or_else(|| unsupported_node("Expression"))?;
                return Ok(evaluate_not(&evaluate(operand, table)?));
            }
            let (Some(left), Some(right)) = (left, right) else {
                return Err(unsupported_node("Expression"));
            };
            let left = evaluate(left, table)?.into_primitive();
            let right = evaluate(right, table)?.into_primitive();
            evaluate_binary(left, right, *operator)
        }
        NodeKind::LengthExpression { source } => length_of(source, table),
        NodeKind::SubstringExpression { string, start, end } => {
            substring_of(string, start, end, table)
        }
        other => Err(unsupported_node(other.name())),
    })
}

/// Evaluate a condition to its truth value.
#[inline]
pub fn evaluate_condition(node: &Node, table: &SymbolTable) -> TraceResult<bool> {
    Ok(evaluate(node, table)?.is_truthy())
}

/// Evaluate an expression that must produce a number.
pub fn evaluate_number(node: &Node, table: &SymbolTable, context: &str) -> TraceResult<f64> {
    let value = evaluate(node, table)?;
    value
        .to_number()
        .ok_or_else(|| invalid_operand(context, quoted(&value)))
}

/// Character count of a variable's current string value.
pub fn length_of(source: &str, table: &SymbolTable) -> TraceResult<Value> {
    let entry = table.get(source)?;
    let count = match entry.value.as_text() {
        Some(text) => text.chars().count(),
        None => entry.value.to_string().chars().count(),
    };
    Ok(Value::Number(count as f64))
}

/// Slice `[start, end)` of a variable's current string value.
///
/// The source is looked up before the bounds are evaluated, so an
/// undeclared source is reported even when the bounds are also invalid.
/// Bounds are truncated to integers and clamped to the string.
pub fn substring_of(
    source: &str,
    start: &Node,
    end: &Node,
    table: &SymbolTable,
) -> TraceResult<Value> {
    let entry = table.get(source)?;
    let start = index_of(start, table)?;
    let end = index_of(end, table)?;
    if start > end {
        return Err(TraceError::InvalidSubstringRange(start, end));
    }

    let text = match entry.value.as_text() {
        Some(text) => text.to_string(),
        None => entry.value.to_string(),
    };
    let len = text.chars().count();
    let clamp = |i: i64| usize::try_from(i).unwrap_or(0).min(len);
    let (lo, hi) = (clamp(start), clamp(end));
    let result: String = text.chars().skip(lo).take(hi - lo).collect();

    Ok(Value::Substring(SubstringValue {
        source: source.to_string(),
        start,
        end,
        result,
    }))
}

fn index_of(node: &Node, table: &SymbolTable) -> TraceResult<i64> {
    let n = evaluate_number(node, table, "substring")?;
    Ok(n.trunc() as i64)
}
