//! Visit nodes and infer their types.
//!
//! This module owns the visiting entrypoint (`visit`) and delegates to one rule per node kind, grouped in themed
//! submodules. Rules return [`Type::Dynamic`] on error (via [`CheckCx::error`]) so the traversal always completes.
//!
//! ## See also
//! - [`super::Checker`]: the driver that runs the visit from the root.

use exprcheck_core::types::Type;
use exprcheck_syntax::ast::{Node, NodeKind};

use super::{BindingInfo, CheckCx, Checker, Inferred};

mod access;
mod basics;
mod builtins;
mod calls;
mod collections;
mod control_flow;
mod ops;

impl Checker<'_> {
    /// Infer the type of `node`, write it onto the node, and return it with its binding info.
    ///
    /// Children are visited depth-first, left to right, in the order each rule documents.
    pub(crate) fn visit(&self, node: &mut Node, cx: &mut CheckCx) -> Inferred {
        let span = node.span;
        let (ty, info) = match &mut node.kind {
            NodeKind::Nil => typed(Type::Nil),
            NodeKind::Identifier { value } => self.check_identifier(cx, span, value),
            NodeKind::Integer { .. } => typed(Type::Int),
            NodeKind::Float { .. } => typed(Type::Float),
            NodeKind::Bool { .. } => typed(Type::Bool),
            NodeKind::String { .. } => typed(Type::String),
            NodeKind::Constant { value } => typed(value.type_of()),
            NodeKind::Unary { operator, node: operand } => self.check_unary(cx, span, operator, operand),
            NodeKind::Binary { operator, left, right } => self.check_binary(cx, span, operator, left, right),
            NodeKind::Matches { left, right } => self.check_matches(cx, span, left, right),
            NodeKind::Member { node: base, property } => self.check_member(cx, span, base, property),
            NodeKind::Slice { node: base, from, to } => {
                self.check_slice(cx, base, from.as_deref_mut(), to.as_deref_mut())
            }
            NodeKind::Call {
                callee,
                arguments,
                fast,
            } => self.check_call(cx, span, callee, arguments, fast),
            NodeKind::Builtin { name, arguments } => self.check_builtin(cx, span, name, arguments),
            NodeKind::Closure { node: body } => self.check_closure(cx, body),
            NodeKind::Pointer => self.check_pointer(cx, span),
            NodeKind::Conditional { cond, exp1, exp2 } => self.check_conditional(cx, cond, exp1, exp2),
            NodeKind::Array { nodes } => self.check_array(cx, nodes),
            NodeKind::Map { pairs } => self.check_map(cx, pairs),
            NodeKind::Pair { key, value } => self.check_pair(cx, key, value),
        };
        node.ty = Some(ty.clone());
        (ty, info)
    }
}

/// A successful result that is not a bound method.
pub(crate) fn typed(ty: Type) -> Inferred {
    (ty, BindingInfo::default())
}
