//! Action frames and the finished trace.
//!
//! A frame serializes flat: `{ line, operation, ...fields, timestamp,
//! description }`. Descriptions are derived from the action alone, so the
//! wording for each operation lives in one place.

use serde::Serialize;

use crate::value::{Value, ValueType};

/// Which loop a `loop_end` closes. Only affects the description.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopKind {
    While,
    FromTo,
}

/// One observable execution step.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum Action {
    #[serde(rename_all = "camelCase")]
    Set {
        var_name: String,
        #[serde(rename = "type")]
        ty: ValueType,
        value: Value,
    },
    #[serde(rename_all = "camelCase")]
    Print {
        is_literal: bool,
        var_name: Option<String>,
        literal: Value,
    },
    If {
        condition: String,
        result: bool,
    },
    Endif,
    While {
        condition: String,
    },
    LoopFromTo {
        condition: String,
    },
    LoopEnd {
        #[serde(skip)]
        kind: LoopKind,
    },
    #[serde(rename_all = "camelCase")]
    Define {
        var_name: String,
        params: Vec<String>,
        body: Vec<ActionFrame>,
    },
    Return {
        value: String,
    },
}

impl Action {
    /// The `operation` tag as serialized.
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::Set { .. } => "set",
            Self::Print { .. } => "print",
            Self::If { .. } => "if",
            Self::Endif => "endif",
            Self::While { .. } => "while",
            Self::LoopFromTo { .. } => "loop_from_to",
            Self::LoopEnd { .. } => "loop_end",
            Self::Define { .. } => "define",
            Self::Return { .. } => "return",
        }
    }

    /// Human-readable description shown in the playback log.
    pub fn description(&self) -> String {
        match self {
            Self::Set {
                var_name,
                value: Value::Substring(sub),
                ..
            } => {
                if sub.start == sub.end {
                    format!(
                        "Set variable {var_name} to an empty string as start and end indices are identical."
                    )
                } else {
                    format!(
                        "Set variable {var_name} to a substring of {} from index {} to {}.",
                        sub.source, sub.start, sub.end
                    )
                }
            }
            Self::Set {
                var_name, value, ..
            } => format!("Set variable {var_name} to {value}."),
            Self::Print {
                var_name: Some(name),
                is_literal: false,
                ..
            } => format!("Printed {name}."),
            Self::Print { literal, .. } => format!("Printed {literal}."),
            Self::If { condition, .. } => format!("Checked if {condition}."),
            Self::Endif => "End of if statement.".to_string(),
            Self::While { condition } => format!("while loop with condition {condition}."),
            Self::LoopFromTo { condition } => {
                format!("loop from_to loop with condition {condition}.")
            }
            Self::LoopEnd {
                kind: LoopKind::While,
            } => "End of while loop".to_string(),
            Self::LoopEnd {
                kind: LoopKind::FromTo,
            } => "End of loop from_to loop".to_string(),
            Self::Define {
                var_name, params, ..
            } => format!(
                "Defined function {var_name} with parameters {}",
                params.join(", ")
            ),
            Self::Return { value } => format!("Returned {value}."),
        }
    }
}

/// A timestamped, described action at a source line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActionFrame {
    pub line: u32,
    #[serde(flatten)]
    pub action: Action,
    pub timestamp: u64,
    pub description: String,
}

impl ActionFrame {
    pub fn new(line: u32, action: Action, timestamp: u64) -> Self {
        let description = action.description();
        ActionFrame {
            line,
            action,
            timestamp,
            description,
        }
    }

    pub fn operation(&self) -> &'static str {
        self.action.operation()
    }
}

/// The finished trace: `{ "actionFrames": [...] }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trace {
    pub action_frames: Vec<ActionFrame>,
}

impl Trace {
    pub fn frames(&self) -> &[ActionFrame] {
        &self.action_frames
    }

    pub fn len(&self) -> usize {
        self.action_frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.action_frames.is_empty()
    }

    /// Everything the program printed, in order, including prints inside
    /// function bodies.
    pub fn printed_output(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_prints(&self.action_frames, &mut out);
        out
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn collect_prints(frames: &[ActionFrame], out: &mut Vec<String>) {
    for frame in frames {
        match &frame.action {
            Action::Print { literal, .. } => out.push(literal.to_string()),
            Action::Define { body, .. } => collect_prints(body, out),
            _ => {}
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use crate::value::SubstringValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn set_frame_shape() {
        let frame = ActionFrame::new(
            1,
            Action::Set {
                var_name: "x".to_string(),
                ty: ValueType::Number,
                value: Value::Number(10.0),
            },
            7,
        );
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({
                "line": 1,
                "operation": "set",
                "varName": "x",
                "type": "number",
                "value": 10,
                "timestamp": 7,
                "description": "Set variable x to 10."
            })
        );
    }

    #[test]
    fn print_frame_shapes() {
        let literal = ActionFrame::new(
            2,
            Action::Print {
                is_literal: true,
                var_name: None,
                literal: Value::string("hi"),
            },
            0,
        );
        assert_eq!(
            serde_json::to_value(&literal).unwrap(),
            json!({
                "line": 2,
                "operation": "print",
                "isLiteral": true,
                "varName": null,
                "literal": "hi",
                "timestamp": 0,
                "description": "Printed hi."
            })
        );

        let variable = Action::Print {
            is_literal: false,
            var_name: Some("x".to_string()),
            literal: Value::Number(3.0),
        };
        assert_eq!(variable.description(), "Printed x.");
    }

    #[test]
    fn closing_frames_have_no_fields() {
        let frame = ActionFrame::new(
            9,
            Action::LoopEnd {
                kind: LoopKind::FromTo,
            },
            3,
        );
        assert_eq!(
            serde_json::to_value(&frame).unwrap(),
            json!({
                "line": 9,
                "operation": "loop_end",
                "timestamp": 3,
                "description": "End of loop from_to loop"
            })
        );
        assert_eq!(Action::Endif.description(), "End of if statement.");
        assert_eq!(
            Action::LoopEnd {
                kind: LoopKind::While
            }
            .description(),
            "End of while loop"
        );
    }

    #[test]
    fn substring_descriptions() {
        let set = |start, end, result: &str| Action::Set {
            var_name: "t".to_string(),
            ty: ValueType::String,
            value: Value::Substring(SubstringValue {
                source: "s".to_string(),
                start,
                end,
                result: result.to_string(),
            }),
        };
        assert_eq!(
            set(0, 3, "abc").description(),
            "Set variable t to a substring of s from index 0 to 3."
        );
        assert_eq!(
            set(2, 2, "").description(),
            "Set variable t to an empty string as start and end indices are identical."
        );
    }

    #[test]
    fn loop_headers_and_define() {
        assert_eq!(
            Action::While {
                condition: "x <= 5".to_string()
            }
            .description(),
            "while loop with condition x <= 5."
        );
        assert_eq!(
            Action::LoopFromTo {
                condition: "i <= 10".to_string()
            }
            .description(),
            "loop from_to loop with condition i <= 10."
        );
        assert_eq!(
            Action::Define {
                var_name: "add".to_string(),
                params: vec!["a".to_string(), "b".to_string()],
                body: vec![],
            }
            .description(),
            "Defined function add with parameters a, b"
        );
    }

    #[test]
    fn trace_document_and_printed_output() {
        let print = |v: Value| {
            ActionFrame::new(
                1,
                Action::Print {
                    is_literal: true,
                    var_name: None,
                    literal: v,
                },
                0,
            )
        };
        let trace = Trace {
            action_frames: vec![
                print(Value::Number(1.0)),
                ActionFrame::new(
                    2,
                    Action::Define {
                        var_name: "f".to_string(),
                        params: vec![],
                        body: vec![print(Value::string("inner"))],
                    },
                    0,
                ),
            ],
        };
        assert_eq!(trace.printed_output(), vec!["1", "inner"]);
        let doc: serde_json::Value = serde_json::from_str(&trace.to_json().unwrap()).unwrap();
        assert_eq!(doc["actionFrames"][1]["body"][0]["literal"], json!("inner"));
        assert_eq!(trace.len(), 2);
    }
}
