//! Condition strings and until-condition inversion.
//!
//! Rendering is kept apart from evaluation: a condition string is a pure
//! function of the expression's shape and the operands' source text, never
//! of runtime values. The playback client displays these strings verbatim.

use pseudo_ir::{Node, NodeKind, Operator};

use crate::stack::ensure_sufficient_stack;
use crate::value::format_number;

/// Render one operator application from already-rendered operand text.
///
/// Binary operators render infix (`x <= 5`); `not` renders as `!operand`
/// and ignores `left`.
pub fn render_condition(op: Operator, left: &str, right: &str) -> String {
    if op.is_unary() {
        format!("{}{right}", op.as_symbol())
    } else {
        format!("{left} {} {right}", op.as_symbol())
    }
}

/// Source text of an expression node, as used in condition strings.
///
/// Identifiers render as their name, string literals quoted, nested
/// expressions recursively with parentheses only where precedence needs
/// them.
pub fn condition_text(node: &Node) -> String {
    ensure_sufficient_stack(|| match &node.kind {
        NodeKind::Identifier { name } => name.clone(),
        NodeKind::NumberLiteral { value } => format_number(*value),
        NodeKind::StringLiteral { value } => format!("\"{value}\""),
        NodeKind::BooleanLiteral { value } => value.to_string(),
        NodeKind::LengthExpression { source } => format!("length of {source}"),
        NodeKind::SubstringExpression { string, start, end } => format!(
            "substring of {string} from {} to {}",
            condition_text(start),
            condition_text(end)
        ),
        NodeKind::Expression {
            left,
            operator,
            right,
        } => {
            if operator.is_unary() {
                let operand = right.as_deref().or(left.as_deref());
                let text = operand_text(operand, *operator, true);
                render_condition(*operator, "", &text)
            } else {
                let left_text = operand_text(left.as_deref(), *operator, false);
                let right_text = operand_text(right.as_deref(), *operator, true);
                render_condition(*operator, &left_text, &right_text)
            }
        }
        other => other.name().to_string(),
    })
}

fn operand_text(operand: Option<&Node>, parent: Operator, is_right: bool) -> String {
    let Some(node) = operand else {
        return "?".to_string();
    };
    let text = condition_text(node);
    match binary_operator(node) {
        Some(child) if needs_parens(parent, child, is_right) => format!("({text})"),
        _ => text,
    }
}

fn binary_operator(node: &Node) -> Option<Operator> {
    match &node.kind {
        NodeKind::Expression { operator, .. } if !operator.is_unary() => Some(*operator),
        _ => None,
    }
}

fn needs_parens(parent: Operator, child: Operator, is_right: bool) -> bool {
    let (p, c) = (parent.precedence(), child.precedence());
    if c != p {
        return c < p;
    }
    // Equal precedence: only the right side of a non-associative operator.
    is_right
        && !matches!(
            parent,
            Operator::Add | Operator::Mul | Operator::And | Operator::Or
        )
}

/// Turn an *until* condition into the condition that keeps the loop going.
///
/// Comparisons flip their operator (`>` to `<=`, `==` to `!=`, ...), `not x`
/// unwraps to `x`, `and`/`or` distribute the negation, and anything else is
/// wrapped in `not`. The node's line is preserved.
pub fn negate_condition(node: &Node) -> Node {
    let negated = ensure_sufficient_stack(|| match &node.kind {
        NodeKind::BooleanLiteral { value } => Node::boolean(!value),
        NodeKind::Expression {
            left,
            operator,
            right,
        } => match (left.as_deref(), *operator, right.as_deref()) {
            (_, Operator::Not, Some(operand)) | (Some(operand), Operator::Not, None) => {
                operand.clone()
            }
            (Some(l), Operator::And, Some(r)) => {
                Node::binary(negate_condition(l), Operator::Or, negate_condition(r))
            }
            (Some(l), Operator::Or, Some(r)) => {
                Node::binary(negate_condition(l), Operator::And, negate_condition(r))
            }
            (Some(l), op, Some(r)) => match op.flipped() {
                Some(flipped) => Node::binary(l.clone(), flipped, r.clone()),
                None => Node::not(node.clone()),
            },
            _ => Node::not(node.clone()),
        },
        _ => Node::not(node.clone()),
    });
    Node {
        line: node.line,
        kind: negated.kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cmp(name: &str, op: Operator, n: f64) -> Node {
        Node::binary(Node::identifier(name), op, Node::number(n))
    }

    #[test]
    fn render_binary_and_unary() {
        assert_eq!(render_condition(Operator::LtEq, "x", "5"), "x <= 5");
        assert_eq!(render_condition(Operator::And, "a", "b"), "a and b");
        assert_eq!(render_condition(Operator::Not, "", "isTrue"), "!isTrue");
    }

    #[test]
    fn text_keeps_operand_order() {
        let node = Node::binary(Node::number(5.0), Operator::Gt, Node::identifier("x"));
        assert_eq!(condition_text(&node), "5 > x");
    }

    #[test]
    fn text_of_literals() {
        let node = Node::binary(Node::identifier("name"), Operator::Eq, Node::string("Bob"));
        assert_eq!(condition_text(&node), "name == \"Bob\"");
        assert_eq!(condition_text(&Node::not(Node::identifier("isTrue"))), "!isTrue");
        assert_eq!(condition_text(&Node::boolean(true)), "true");
        assert_eq!(condition_text(&Node::number(2.5)), "2.5");
    }

    #[test]
    fn text_parenthesizes_by_precedence() {
        let sum = Node::binary(Node::identifier("x"), Operator::Add, Node::number(1.0));
        let node = Node::binary(sum.clone(), Operator::Mul, Node::number(2.0));
        assert_eq!(condition_text(&node), "(x + 1) * 2");

        let node = Node::binary(sum.clone(), Operator::LtEq, Node::number(5.0));
        assert_eq!(condition_text(&node), "x + 1 <= 5");

        let node = Node::binary(Node::number(10.0), Operator::Sub, sum);
        assert_eq!(condition_text(&node), "10 - (x + 1)");

        let node = Node::not(cmp("x", Operator::Gt, 1.0));
        assert_eq!(condition_text(&node), "!(x > 1)");
    }

    #[test]
    fn text_of_string_operations() {
        assert_eq!(condition_text(&Node::length("word")), "length of word");
        let node = Node::substring("word", Node::number(0.0), Node::identifier("n"));
        assert_eq!(condition_text(&node), "substring of word from 0 to n");
    }

    #[test]
    fn negate_flips_comparisons() {
        let until = cmp("x", Operator::Gt, 5.0).at_line(4);
        let negated = negate_condition(&until);
        assert_eq!(condition_text(&negated), "x <= 5");
        assert_eq!(negated.line, Some(4));

        assert_eq!(
            condition_text(&negate_condition(&cmp("x", Operator::GtEq, 3.0))),
            "x < 3"
        );
        assert_eq!(
            condition_text(&negate_condition(&cmp("x", Operator::Eq, 3.0))),
            "x != 3"
        );
    }

    #[test]
    fn negate_logical() {
        let until = Node::binary(
            cmp("x", Operator::Gt, 5.0),
            Operator::And,
            cmp("y", Operator::Lt, 2.0),
        );
        assert_eq!(
            condition_text(&negate_condition(&until)),
            "x <= 5 or y >= 2"
        );

        let until = Node::binary(
            cmp("x", Operator::Gt, 5.0),
            Operator::Or,
            cmp("y", Operator::Lt, 2.0),
        );
        assert_eq!(
            condition_text(&negate_condition(&until)),
            "x <= 5 and y >= 2"
        );
    }

    #[test]
    fn negate_unwraps_not_and_wraps_others() {
        let until = Node::not(Node::identifier("running"));
        assert_eq!(condition_text(&negate_condition(&until)), "running");

        let until = Node::identifier("done");
        assert_eq!(condition_text(&negate_condition(&until)), "!done");

        assert_eq!(
            negate_condition(&Node::boolean(false)),
            Node::boolean(true)
        );
    }
}
