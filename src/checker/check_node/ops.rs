//! Check unary, binary and regex-match operators.
//!
//! Binary operators first try the environment's operator overloads; only when none accepts the operand types does
//! the fixed rule table apply. Numeric results widen with [`combined`], the same rule the runtime uses to coerce
//! operands, and `**` always yields `float`.

use exprcheck_core::lang::operators::{self, OperatorId};
use exprcheck_core::types::{Type, combined, comparable};
use exprcheck_syntax::ast::{Node, Span};

use super::typed;
use crate::checker::diagnostics::errors;
use crate::checker::{CheckCx, Checker, Inferred};

impl Checker<'_> {
    pub(in crate::checker) fn check_unary(
        &self,
        cx: &mut CheckCx,
        span: Span,
        operator: &str,
        operand: &mut Node,
    ) -> Inferred {
        let (ty, _) = self.visit(operand, cx);

        match operators::prefix_from_str(operator) {
            Some(OperatorId::Not) if ty.is_bool() => typed(Type::Bool),
            Some(OperatorId::Plus | OperatorId::Minus) if ty.is_number() => typed(ty),
            Some(_) => cx.error(span, errors::mismatched_type(operator, &ty)),
            None => cx.error(span, errors::unknown_operator(operator)),
        }
    }

    /// Type-check a binary operation: left operand, then right, then overloads, then the rule table.
    pub(in crate::checker) fn check_binary(
        &self,
        cx: &mut CheckCx,
        span: Span,
        operator: &str,
        left: &mut Node,
        right: &mut Node,
    ) -> Inferred {
        let (lhs, _) = self.visit(left, cx);
        let (rhs, _) = self.visit(right, cx);

        if let Some(overload) = self.config.find_operator_overload(operator, &lhs, &rhs) {
            tracing::debug!(operator, function = %overload.name, "selected operator overload");
            return typed(overload.result);
        }

        let Some(op) = operators::infix_from_str(operator) else {
            return cx.error(span, errors::unknown_operator(operator));
        };

        match binary_result(op, &lhs, &rhs) {
            Some(ty) => typed(ty),
            None => cx.error(span, errors::mismatched_types(operator, &lhs, &rhs)),
        }
    }

    pub(in crate::checker) fn check_matches(
        &self,
        cx: &mut CheckCx,
        span: Span,
        left: &mut Node,
        right: &mut Node,
    ) -> Inferred {
        let (lhs, _) = self.visit(left, cx);
        let (rhs, _) = self.visit(right, cx);

        if lhs.is_string() && rhs.is_string() {
            return typed(Type::Bool);
        }
        cx.error(span, errors::mismatched_types("matches", &lhs, &rhs))
    }
}

/// Result type of a built-in binary operator, or `None` if the operand types are not accepted.
pub(crate) fn binary_result(op: OperatorId, lhs: &Type, rhs: &Type) -> Option<Type> {
    let numeric = lhs.is_number() && rhs.is_number();
    let strings = lhs.is_string() && rhs.is_string();

    match op {
        OperatorId::EqEq | OperatorId::NotEq => (numeric || comparable(lhs, rhs)).then_some(Type::Bool),
        OperatorId::Or | OperatorId::And => (lhs.is_bool() && rhs.is_bool()).then_some(Type::Bool),
        OperatorId::In | OperatorId::NotIn => {
            ((lhs.is_string() && rhs.is_struct()) || rhs.is_map() || rhs.is_array()).then_some(Type::Bool)
        }
        OperatorId::Lt | OperatorId::Gt | OperatorId::LtEq | OperatorId::GtEq => {
            (numeric || strings || (lhs.is_time() && rhs.is_time())).then_some(Type::Bool)
        }
        OperatorId::Minus => {
            if numeric {
                Some(combined(lhs, rhs))
            } else if lhs.is_time() && rhs.is_time() {
                Some(Type::Duration)
            } else {
                None
            }
        }
        OperatorId::Star | OperatorId::Slash => numeric.then(|| combined(lhs, rhs)),
        OperatorId::StarStar => numeric.then_some(Type::Float),
        OperatorId::Percent => (lhs.is_integer() && rhs.is_integer()).then(|| combined(lhs, rhs)),
        OperatorId::Plus => {
            if numeric {
                Some(combined(lhs, rhs))
            } else if strings {
                Some(Type::String)
            } else if (lhs.is_time() && rhs.is_duration()) || (lhs.is_duration() && rhs.is_time()) {
                Some(Type::Time)
            } else {
                None
            }
        }
        OperatorId::Contains | OperatorId::StartsWith | OperatorId::EndsWith => strings.then_some(Type::Bool),
        OperatorId::DotDot => (lhs.is_integer() && rhs.is_integer()).then(|| Type::array(Type::Int)),
        OperatorId::Not => None,
    }
}
