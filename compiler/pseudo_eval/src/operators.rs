//! Operator implementations for the evaluator.
//!
//! Direct enum dispatch over [`Operator`]; the operator set is closed, so
//! an exhaustive match is preferred over a table of function pointers.
//!
//! Coercion rules:
//! - `+` concatenates when both sides are strings, or when a string side
//!   is not numeric; otherwise it adds.
//! - `- * /` coerce both sides to numbers.
//! - Ordering comparisons compare two strings lexicographically and
//!   coerce anything else to numbers. `==`/`!=` fall back to comparing
//!   display text when coercion is impossible.
//! - `and`/`or` use truthiness.

use std::cmp::Ordering;

use pseudo_ir::Operator;

use crate::errors::{invalid_operand, TraceError, TraceResult};
use crate::value::Value;

/// Apply a binary operator.
///
/// `Operator::Not` is rejected here; use [`evaluate_not`].
pub fn evaluate_binary(left: Value, right: Value, op: Operator) -> TraceResult<Value> {
    match op {
        Operator::Add => add(left, right),
        Operator::Sub => arith(&left, &right, op, |a, b| a - b),
        Operator::Mul => arith(&left, &right, op, |a, b| a * b),
        Operator::Div => {
            let (a, b) = numbers(&left, &right, op)?;
            if b == 0.0 {
                return Err(TraceError::DivisionByZero);
            }
            Ok(Value::Number(a / b))
        }
        Operator::Eq => Ok(Value::Boolean(loosely_equal(&left, &right))),
        Operator::NotEq => Ok(Value::Boolean(!loosely_equal(&left, &right))),
        Operator::Lt => compare(&left, &right, op).map(|o| Value::Boolean(o.is_lt())),
        Operator::LtEq => compare(&left, &right, op).map(|o| Value::Boolean(o.is_le())),
        Operator::Gt => compare(&left, &right, op).map(|o| Value::Boolean(o.is_gt())),
        Operator::GtEq => compare(&left, &right, op).map(|o| Value::Boolean(o.is_ge())),
        Operator::And => Ok(Value::Boolean(left.is_truthy() && right.is_truthy())),
        Operator::Or => Ok(Value::Boolean(left.is_truthy() || right.is_truthy())),
        Operator::Not => Err(invalid_operand(op.as_symbol(), "two operands")),
    }
}

/// Logical negation.
#[inline]
pub fn evaluate_not(operand: &Value) -> Value {
    Value::Boolean(!operand.is_truthy())
}

fn add(left: Value, right: Value) -> TraceResult<Value> {
    let concat = match (left.as_text(), right.as_text()) {
        (Some(_), Some(_)) => true,
        (Some(_), None) => left.to_number().is_none(),
        (None, Some(_)) => right.to_number().is_none(),
        (None, None) => false,
    };
    if concat {
        return Ok(Value::String(format!("{left}{right}")));
    }
    arith(&left, &right, Operator::Add, |a, b| a + b)
}

#[inline]
fn arith(left: &Value, right: &Value, op: Operator, f: fn(f64, f64) -> f64) -> TraceResult<Value> {
    let (a, b) = numbers(left, right, op)?;
    Ok(Value::Number(f(a, b)))
}

fn numbers(left: &Value, right: &Value, op: Operator) -> TraceResult<(f64, f64)> {
    let a = left
        .to_number()
        .ok_or_else(|| invalid_operand(op.as_symbol(), quoted(left)))?;
    let b = right
        .to_number()
        .ok_or_else(|| invalid_operand(op.as_symbol(), quoted(right)))?;
    Ok((a, b))
}

fn compare(left: &Value, right: &Value, op: Operator) -> TraceResult<Ordering> {
    if let (Some(a), Some(b)) = (left.as_text(), right.as_text()) {
        return Ok(a.cmp(b));
    }
    let (a, b) = numbers(left, right, op)?;
    a.partial_cmp(&b)
        .ok_or_else(|| invalid_operand(op.as_symbol(), format!("{a} and {b}")))
}

fn loosely_equal(left: &Value, right: &Value) -> bool {
    if let (Some(a), Some(b)) = (left.as_text(), right.as_text()) {
        return a == b;
    }
    match (left.to_number(), right.to_number()) {
        (Some(a), Some(b)) => a == b,
        _ => left.to_string() == right.to_string(),
    }
}

/// Operand text for error messages: strings quoted, everything else as displayed.
pub(crate) fn quoted(value: &Value) -> String {
    match value.as_text() {
        Some(text) => format!("\"{text}\""),
        None => value.to_string(),
    }
}
