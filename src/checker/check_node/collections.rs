//! Check array, map and pair literals.
//!
//! Elements are visited for their diagnostics and annotations only: literals are typed `[]any` and
//! `map[string]any` whatever their contents.

use exprcheck_core::types::Type;
use exprcheck_syntax::ast::Node;

use super::typed;
use crate::checker::{CheckCx, Checker, Inferred};

impl Checker<'_> {
    pub(in crate::checker) fn check_array(&self, cx: &mut CheckCx, nodes: &mut [Node]) -> Inferred {
        for node in nodes {
            self.visit(node, cx);
        }
        typed(Type::any_array())
    }

    pub(in crate::checker) fn check_map(&self, cx: &mut CheckCx, pairs: &mut [Node]) -> Inferred {
        for pair in pairs {
            self.visit(pair, cx);
        }
        typed(Type::any_map())
    }

    /// A pair has no value of its own: its type is `nil`.
    pub(in crate::checker) fn check_pair(&self, cx: &mut CheckCx, key: &mut Node, value: &mut Node) -> Inferred {
        self.visit(key, cx);
        self.visit(value, cx);
        typed(Type::Nil)
    }
}
