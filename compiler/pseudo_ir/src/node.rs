//! IR nodes and the program document.
//!
//! Nodes arrive as JSON objects tagged by `"type"`, each with an optional
//! `"line"`. Deserialization never fails on an unrecognized shape: it yields
//! [`NodeKind::Unsupported`] naming the offending kind, and the executor
//! turns that into an error when (and only when) it reaches the node.

use serde::{Deserialize, Deserializer};

use crate::Operator;

/// A parsed program: `{ "program": [Node, ...] }`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Program {
    pub program: Vec<Node>,
}

impl Program {
    pub fn new(program: Vec<Node>) -> Self {
        Program { program }
    }

    /// Parse an IR document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// A single IR node with its optional source line.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub line: Option<u32>,
    pub kind: NodeKind,
}

/// Bounds of a `LoopFromTo`, both inclusive.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoopRange {
    pub start: Box<Node>,
    pub end: Box<Node>,
}

/// Every node shape the parser produces.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    // Statements
    VariableDeclaration {
        name: String,
        value: Box<Node>,
    },
    PrintStatement {
        value: Box<Node>,
    },
    IfStatement {
        condition: Box<Node>,
        consequent: Vec<Node>,
        alternate: Option<Vec<Node>>,
    },
    /// `condition` is the *until* condition: the loop stops once it holds.
    LoopUntil {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    #[serde(rename_all = "camelCase")]
    LoopFromTo {
        loop_variable: String,
        range: LoopRange,
        body: Vec<Node>,
    },
    FunctionDeclaration {
        name: String,
        #[serde(default)]
        params: Vec<String>,
        body: Vec<Node>,
    },
    ReturnStatement {
        value: Box<Node>,
    },

    // Expressions
    /// Binary expression, or unary `not` with its operand in `right`
    /// (or `left` when `right` is absent).
    Expression {
        left: Option<Box<Node>>,
        operator: Operator,
        right: Option<Box<Node>>,
    },
    Identifier {
        #[serde(alias = "value")]
        name: String,
    },
    NumberLiteral {
        value: f64,
    },
    StringLiteral {
        value: String,
    },
    BooleanLiteral {
        value: bool,
    },
    LengthExpression {
        source: String,
    },
    SubstringExpression {
        string: String,
        start: Box<Node>,
        end: Box<Node>,
    },

    /// A shape not recognized while reading the IR.
    #[serde(skip)]
    Unsupported {
        kind: String,
    },
}

impl NodeKind {
    /// The `"type"` tag of this node.
    pub fn name(&self) -> &str {
        match self {
            Self::VariableDeclaration { .. } => "VariableDeclaration",
            Self::PrintStatement { .. } => "PrintStatement",
            Self::IfStatement { .. } => "IfStatement",
            Self::LoopUntil { .. } => "LoopUntil",
            Self::LoopFromTo { .. } => "LoopFromTo",
            Self::FunctionDeclaration { .. } => "FunctionDeclaration",
            Self::ReturnStatement { .. } => "ReturnStatement",
            Self::Expression { .. } => "Expression",
            Self::Identifier { .. } => "Identifier",
            Self::NumberLiteral { .. } => "NumberLiteral",
            Self::StringLiteral { .. } => "StringLiteral",
            Self::BooleanLiteral { .. } => "BooleanLiteral",
            Self::LengthExpression { .. } => "LengthExpression",
            Self::SubstringExpression { .. } => "SubstringExpression",
            Self::Unsupported { kind } => kind,
        }
    }
}

/// Tagged object form, read before falling back to `Unsupported`.
#[derive(Deserialize)]
struct TaggedNode {
    #[serde(default)]
    line: Option<u32>,
    #[serde(flatten)]
    kind: NodeKind,
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(Node::from_json_value(&raw))
    }
}

impl Node {
    /// Convert a loose JSON value into a node.
    ///
    /// Bare JSON scalars are accepted as literals, so ranges and substring
    /// bounds may be written as plain numbers.
    pub fn from_json_value(raw: &serde_json::Value) -> Node {
        use serde_json::Value;

        match raw {
            Value::Number(n) => match n.as_f64() {
                Some(value) => Node::number(value),
                None => Node::unsupported("NumberLiteral"),
            },
            Value::String(s) => Node::string(s.clone()),
            Value::Bool(b) => Node::boolean(*b),
            Value::Object(fields) => match TaggedNode::deserialize(raw) {
                Ok(tagged) => Node {
                    line: tagged.line,
                    kind: tagged.kind,
                },
                Err(_) => Node {
                    line: fields
                        .get("line")
                        .and_then(Value::as_u64)
                        .and_then(|l| u32::try_from(l).ok()),
                    kind: NodeKind::Unsupported {
                        kind: fields
                            .get("type")
                            .and_then(Value::as_str)
                            .unwrap_or("<untagged>")
                            .to_string(),
                    },
                },
            },
            Value::Array(_) => Node::unsupported("<array>"),
            Value::Null => Node::unsupported("<null>"),
        }
    }

    pub fn new(kind: NodeKind) -> Self {
        Node { line: None, kind }
    }

    /// Attach a source line.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn unsupported(kind: impl Into<String>) -> Self {
        Node::new(NodeKind::Unsupported { kind: kind.into() })
    }

    // Expression constructors

    pub fn identifier(name: impl Into<String>) -> Self {
        Node::new(NodeKind::Identifier { name: name.into() })
    }

    pub fn number(value: f64) -> Self {
        Node::new(NodeKind::NumberLiteral { value })
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::new(NodeKind::StringLiteral {
            value: value.into(),
        })
    }

    pub fn boolean(value: bool) -> Self {
        Node::new(NodeKind::BooleanLiteral { value })
    }

    pub fn binary(left: Node, operator: Operator, right: Node) -> Self {
        Node::new(NodeKind::Expression {
            left: Some(Box::new(left)),
            operator,
            right: Some(Box::new(right)),
        })
    }

    pub fn not(operand: Node) -> Self {
        Node::new(NodeKind::Expression {
            left: None,
            operator: Operator::Not,
            right: Some(Box::new(operand)),
        })
    }

    pub fn length(source: impl Into<String>) -> Self {
        Node::new(NodeKind::LengthExpression {
            source: source.into(),
        })
    }

    pub fn substring(string: impl Into<String>, start: Node, end: Node) -> Self {
        Node::new(NodeKind::SubstringExpression {
            string: string.into(),
            start: Box::new(start),
            end: Box::new(end),
        })
    }

    // Statement constructors

    pub fn declare(name: impl Into<String>, value: Node) -> Self {
        Node::new(NodeKind::VariableDeclaration {
            name: name.into(),
            value: Box::new(value),
        })
    }

    pub fn print(value: Node) -> Self {
        Node::new(NodeKind::PrintStatement {
            value: Box::new(value),
        })
    }

    pub fn if_else(condition: Node, consequent: Vec<Node>, alternate: Option<Vec<Node>>) -> Self {
        Node::new(NodeKind::IfStatement {
            condition: Box::new(condition),
            consequent,
            alternate,
        })
    }

    pub fn loop_until(condition: Node, body: Vec<Node>) -> Self {
        Node::new(NodeKind::LoopUntil {
            condition: Box::new(condition),
            body,
        })
    }

    pub fn loop_from_to(variable: impl Into<String>, start: Node, end: Node, body: Vec<Node>) -> Self {
        Node::new(NodeKind::LoopFromTo {
            loop_variable: variable.into(),
            range: LoopRange {
                start: Box::new(start),
                end: Box::new(end),
            },
            body,
        })
    }

    pub fn function(name: impl Into<String>, params: Vec<String>, body: Vec<Node>) -> Self {
        Node::new(NodeKind::FunctionDeclaration {
            name: name.into(),
            params,
            body,
        })
    }

    pub fn ret(value: Node) -> Self {
        Node::new(NodeKind::ReturnStatement {
            value: Box::new(value),
        })
    }
}
