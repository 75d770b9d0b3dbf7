//! Check the conditional (ternary) expression.

use exprcheck_core::types::Type;
use exprcheck_syntax::ast::Node;

use super::typed;
use crate::checker::diagnostics::errors;
use crate::checker::{CheckCx, Checker, Inferred};

impl Checker<'_> {
    /// Type-check `cond ? exp1 : exp2`.
    ///
    /// ## Notes
    /// - A non-boolean condition is reported before either branch is visited.
    /// - A `nil` branch takes the other branch's type; otherwise `exp1`'s type wins when it is assignable to
    ///   `exp2`'s, and the result is dynamic when the branches disagree.
    pub(in crate::checker) fn check_conditional(
        &self,
        cx: &mut CheckCx,
        cond: &mut Node,
        exp1: &mut Node,
        exp2: &mut Node,
    ) -> Inferred {
        let (cond_ty, _) = self.visit(cond, cx);
        if !cond_ty.is_bool() {
            return cx.error(cond.span, errors::non_bool_condition(&cond_ty));
        }

        let (t1, _) = self.visit(exp1, cx);
        let (t2, _) = self.visit(exp2, cx);

        match (t1.is_nil(), t2.is_nil()) {
            (true, false) => typed(t2),
            (false, true) | (true, true) => typed(t1),
            (false, false) if t1.assignable_to(&t2) => typed(t1),
            (false, false) => typed(Type::Dynamic),
        }
    }
}
