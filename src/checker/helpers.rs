//! Small node inspections shared by the checking rules.

use exprcheck_core::lang::operators::{self, OperatorId};
use exprcheck_core::types::Type;
use exprcheck_syntax::ast::{Node, NodeKind};

/// Whether `node` is an integer literal, or `+ - * /` / unary `+ -` arithmetic built only from integer literals.
pub(crate) fn is_integer_arithmetic(node: &Node) -> bool {
    match &node.kind {
        NodeKind::Integer { .. } => true,
        NodeKind::Unary { operator, node } => {
            matches!(operators::prefix_from_str(operator), Some(OperatorId::Plus | OperatorId::Minus))
                && is_integer_arithmetic(node)
        }
        NodeKind::Binary { operator, left, right } => {
            matches!(
                operators::infix_from_str(operator),
                Some(OperatorId::Plus | OperatorId::Minus | OperatorId::Star | OperatorId::Slash)
            ) && is_integer_arithmetic(left)
                && is_integer_arithmetic(right)
        }
        _ => false,
    }
}

/// Write `ty` onto every node of an integer-literal arithmetic chain (see [`is_integer_arithmetic`]).
pub(crate) fn coerce_integer_literals(node: &mut Node, ty: &Type) {
    node.ty = Some(ty.clone());
    match &mut node.kind {
        NodeKind::Unary { node, .. } => coerce_integer_literals(node, ty),
        NodeKind::Binary { left, right, .. } => {
            coerce_integer_literals(left, ty);
            coerce_integer_literals(right, ty);
        }
        _ => {}
    }
}

/// How a member property is spelled in diagnostics.
pub(crate) fn describe_property(property: &Node) -> String {
    match &property.kind {
        NodeKind::String { value } | NodeKind::Identifier { value } => value.clone(),
        NodeKind::Integer { value } => value.to_string(),
        NodeKind::Float { value } => value.to_string(),
        NodeKind::Bool { value } => value.to_string(),
        NodeKind::Nil => "nil".to_string(),
        _ => "<expression>".to_string(),
    }
}

/// The name a callee is called by: the identifier, or the member name for `x.name(...)`.
pub(crate) fn callee_name(callee: &Node) -> String {
    match &callee.kind {
        NodeKind::Identifier { value } => value.clone(),
        NodeKind::Member { property, .. } => describe_property(property),
        _ => "<expression>".to_string(),
    }
}
