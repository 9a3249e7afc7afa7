//! Runtime values for the trace compiler.
//!
//! A value is either a primitive (number, string, boolean) or a
//! [`SubstringValue`], the composite that remembers which substring
//! operation produced a string. Composites are only created by substring
//! expressions and stored as-is in the symbol table; every other read sees
//! the plain `result` string.

use std::fmt;

use serde::{Serialize, Serializer};

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f64),
    String(String),
    Boolean(bool),
    Substring(SubstringValue),
}

/// Result of a substring expression, kept whole so chained substrings and
/// frame descriptions can see where it came from.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "operation", rename = "substring")]
pub struct SubstringValue {
    /// Name of the variable the substring was taken from.
    pub source: String,
    pub start: i64,
    pub end: i64,
    pub result: String,
}

/// Type tag recorded in the symbol table and in `set` frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Number,
    String,
    Boolean,
}

impl ValueType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    #[inline]
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Number(_) => ValueType::Number,
            Value::String(_) | Value::Substring(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
        }
    }

    /// The value as seen by ordinary reads: substrings collapse to their
    /// result string.
    pub fn into_primitive(self) -> Value {
        match self {
            Value::Substring(sub) => Value::String(sub.result),
            other => other,
        }
    }

    /// String content, if this is a string or a substring result.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            Value::Substring(sub) => Some(&sub.result),
            Value::Number(_) | Value::Boolean(_) => None,
        }
    }

    /// Truthiness used by conditions and logical operators.
    ///
    /// `false`, `0` and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Boolean(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Substring(sub) => !sub.result.is_empty(),
        }
    }

    /// Numeric coercion: booleans map to 1/0, strings parse after trimming
    /// (the empty string is 0).
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::String(_) | Value::Substring(_) => {
                let text = self.as_text()?.trim();
                if text.is_empty() {
                    Some(0.0)
                } else {
                    text.parse::<f64>().ok().filter(|n| n.is_finite())
                }
            }
        }
    }
}

/// Write a number the way the playback client expects: integral values
/// without a fractional part.
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < MAX_EXACT_INT {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Substring(sub) => f.write_str(&sub.result),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < MAX_EXACT_INT => {
                serializer.serialize_i64(*n as i64)
            }
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Substring(sub) => sub.serialize(serializer),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integral_numbers_serialize_as_integers() {
        assert_eq!(serde_json::to_value(Value::Number(10.0)).unwrap(), json!(10));
        assert_eq!(serde_json::to_value(Value::Number(-3.0)).unwrap(), json!(-3));
        assert_eq!(serde_json::to_value(Value::Number(3.5)).unwrap(), json!(3.5));
    }

    #[test]
    fn number_display() {
        assert_eq!(Value::Number(10.0).to_string(), "10");
        assert_eq!(Value::Number(0.25).to_string(), "0.25");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
    }

    #[test]
    fn substring_serializes_as_composite() {
        let value = Value::Substring(SubstringValue {
            source: "word".to_string(),
            start: 1,
            end: 3,
            result: "el".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&value).unwrap(),
            json!({"operation": "substring", "source": "word", "start": 1, "end": 3, "result": "el"})
        );
        assert_eq!(value.value_type(), ValueType::String);
        assert_eq!(value.to_string(), "el");
        assert_eq!(value.into_primitive(), Value::string("el"));
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::string(" 42 ").to_number(), Some(42.0));
        assert_eq!(Value::string("").to_number(), Some(0.0));
        assert_eq!(Value::string("abc").to_number(), None);
        assert_eq!(Value::string("inf").to_number(), None);
        assert_eq!(Value::Boolean(true).to_number(), Some(1.0));
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Number(0.0).is_truthy());
        assert!(Value::Number(2.0).is_truthy());
        assert!(!Value::string("").is_truthy());
        assert!(Value::string("a").is_truthy());
        assert!(!Value::Boolean(false).is_truthy());
    }

    #[test]
    fn value_type_names() {
        assert_eq!(
            serde_json::to_value(ValueType::Boolean).unwrap(),
            json!("boolean")
        );
        assert_eq!(ValueType::Number.to_string(), "number");
    }
}
