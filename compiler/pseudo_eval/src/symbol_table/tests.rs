#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::errors::TraceError;
use crate::value::SubstringValue;

#[test]
fn test_declare_then_get() {
    let mut table = SymbolTable::new();
    table.declare("x", Value::Number(10.0));

    let entry = table.get("x").unwrap();
    assert_eq!(entry.ty, ValueType::Number);
    assert_eq!(entry.value, Value::Number(10.0));
}

#[test]
fn test_redeclare_overwrites_type_and_value() {
    let mut table = SymbolTable::new();
    table.declare("x", Value::Number(1.0));
    table.declare("x", Value::string("one"));

    assert_eq!(table.len(), 1);
    let entry = table.get("x").unwrap();
    assert_eq!(entry.ty, ValueType::String);
    assert_eq!(entry.value, Value::string("one"));
}

#[test]
fn test_missing_name_is_undeclared() {
    let table = SymbolTable::new();
    assert_eq!(
        table.get("ghost"),
        Err(TraceError::UndeclaredVariable("ghost".to_string()))
    );
    assert!(!table.contains("ghost"));
    assert!(table.is_empty());
}

#[test]
fn test_substring_entry_is_string_typed() {
    let mut table = SymbolTable::new();
    let sub = Value::Substring(SubstringValue {
        source: "s".to_string(),
        start: 0,
        end: 2,
        result: "he".to_string(),
    });
    table.declare("t", sub.clone());

    let entry = table.get("t").unwrap();
    assert_eq!(entry.ty, ValueType::String);
    assert_eq!(entry.value, sub);
}
