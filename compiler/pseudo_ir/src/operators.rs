//! Expression Operators
//!
//! Every operator an `Expression` node can carry. `Not` is the only unary
//! operator; all others are binary.

use serde::Deserialize;

/// Operators accepted in `Expression` nodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Deserialize)]
pub enum Operator {
    // Arithmetic
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,

    // Comparison
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = ">=")]
    GtEq,
    #[serde(rename = "<=")]
    LtEq,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,

    // Logical
    #[serde(rename = "and", alias = "&&")]
    And,
    #[serde(rename = "or", alias = "||")]
    Or,
    #[serde(rename = "not", alias = "!")]
    Not,
}

impl Operator {
    /// Returns the symbol used when rendering condition strings.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::GtEq => ">=",
            Self::LtEq => "<=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "!",
        }
    }

    /// Returns `true` for the unary `not`.
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Not)
    }

    /// The comparison that holds exactly when `self` does not.
    ///
    /// `None` for non-comparison operators.
    pub const fn flipped(self) -> Option<Self> {
        match self {
            Self::Gt => Some(Self::LtEq),
            Self::LtEq => Some(Self::Gt),
            Self::Lt => Some(Self::GtEq),
            Self::GtEq => Some(Self::Lt),
            Self::Eq => Some(Self::NotEq),
            Self::NotEq => Some(Self::Eq),
            _ => None,
        }
    }

    /// Binding strength used to parenthesize nested operands.
    ///
    /// Higher binds tighter.
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Gt | Self::Lt | Self::GtEq | Self::LtEq | Self::Eq | Self::NotEq => 3,
            Self::Add | Self::Sub => 4,
            Self::Mul | Self::Div => 5,
            Self::Not => 6,
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;

    #[test]
    fn flipped_is_an_involution() {
        for op in [
            Operator::Gt,
            Operator::Lt,
            Operator::GtEq,
            Operator::LtEq,
            Operator::Eq,
            Operator::NotEq,
        ] {
            assert_eq!(op.flipped().and_then(Operator::flipped), Some(op));
        }
    }

    #[test]
    fn flipped_pairs() {
        assert_eq!(Operator::Gt.flipped(), Some(Operator::LtEq));
        assert_eq!(Operator::Lt.flipped(), Some(Operator::GtEq));
        assert_eq!(Operator::Eq.flipped(), Some(Operator::NotEq));
        assert_eq!(Operator::And.flipped(), None);
        assert_eq!(Operator::Add.flipped(), None);
    }

    #[test]
    fn deserializes_aliases() {
        let op: Operator = serde_json::from_str("\"&&\"").unwrap();
        assert_eq!(op, Operator::And);
        let op: Operator = serde_json::from_str("\"!\"").unwrap();
        assert_eq!(op, Operator::Not);
        let op: Operator = serde_json::from_str("\"<=\"").unwrap();
        assert_eq!(op, Operator::LtEq);
    }

    #[test]
    fn rejects_unknown_operator() {
        assert!(serde_json::from_str::<Operator>("\"%\"").is_err());
    }
}
