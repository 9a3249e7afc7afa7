//! Errors raised while generating a trace.
//!
//! Every error aborts generation as a whole: the executor never returns a
//! partial frame list. Callers turn these into user-facing responses using
//! [`TraceError::kind`] and the `Display` message.

use thiserror::Error;

/// Result of a trace-generation step.
pub type TraceResult<T> = Result<T, TraceError>;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum TraceError {
    /// An identifier, length source or substring source used before any
    /// declaration.
    #[error("Variable '{0}' is not declared.")]
    UndeclaredVariable(String),

    #[error(
        "Invalid substring operation: 'start' index ({0}) cannot be greater than 'end' index ({1})."
    )]
    InvalidSubstringRange(i64, i64),

    /// The executor met an IR shape it does not understand. This is a
    /// parser/executor contract mismatch rather than a user error.
    #[error("Unsupported IR node: {0}")]
    UnsupportedNode(String),

    #[error("Cannot apply '{operator}' to {value}.")]
    InvalidOperand { operator: String, value: String },

    #[error("Division by zero.")]
    DivisionByZero,

    #[error("Loop at line {line} exceeded the iteration limit of {limit}.")]
    IterationLimitExceeded { limit: usize, line: u32 },

    /// The IR document itself could not be read.
    #[error("Invalid IR document: {0}")]
    InvalidJson(String),
}

impl TraceError {
    /// Stable machine-readable category.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UndeclaredVariable(_) => "UndeclaredVariable",
            Self::InvalidSubstringRange(..) => "InvalidSubstringRange",
            Self::UnsupportedNode(_) => "UnsupportedNode",
            Self::InvalidOperand { .. } => "InvalidOperand",
            Self::DivisionByZero => "DivisionByZero",
            Self::IterationLimitExceeded { .. } => "IterationLimitExceeded",
            Self::InvalidJson(_) => "InvalidJson",
        }
    }

    /// Whether this is an internal contract error rather than a fault in
    /// the user's program.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::UnsupportedNode(_) | Self::InvalidJson(_))
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(err: serde_json::Error) -> Self {
        TraceError::InvalidJson(err.to_string())
    }
}

// Constructors, so call sites read like the condition they report.

#[cold]
pub fn undeclared_variable(name: &str) -> TraceError {
    TraceError::UndeclaredVariable(name.to_string())
}

#[cold]
pub fn unsupported_node(kind: &str) -> TraceError {
    TraceError::UnsupportedNode(kind.to_string())
}

#[cold]
pub fn invalid_operand(operator: &str, value: impl std::fmt::Display) -> TraceError {
    TraceError::InvalidOperand {
        operator: operator.to_string(),
        value: value.to_string(),
    }
}
