//! Static type checker for expression trees.
//!
//! Infers and validates the type of every node of a [`Tree`] against an environment [`Config`], writes each
//! inferred type back onto its node, and reports the first type error found, bound to its source location.
//!
//! ## Notes
//!
//! - **Single traversal**: one depth-first, left-to-right visit per node kind (see `check_node`). Every visited node
//!   gets its type written to [`Node::ty`](exprcheck_syntax::ast::Node::ty), including on error paths, where the type
//!   is [`Type::Dynamic`].
//! - **First error wins**: the first diagnostic recorded under the traversal order is the one surfaced. Later error
//!   sites still return [`Type::Dynamic`] so the walk completes without cascading messages.
//! - **Per-check state**: each call to [`Checker::check`] owns its diagnostics slot and collection scope stack
//!   ([`CheckCx`]); the [`Config`] is only borrowed, so concurrent checks can share one config.
//!
//! ## Examples
//!
//! ```rust
//! use exprcheck::checker;
//! use exprcheck::env::Config;
//! use exprcheck_core::types::Type;
//! use exprcheck_syntax::ast::{Node, Tree};
//!
//! let config = Config::new().with_variable("price", Type::Float).with_strict(true);
//! let mut tree = Tree::new("price * 2", Node::binary("*", Node::identifier("price"), Node::integer(2)));
//! assert_eq!(checker::check(&mut tree, &config).unwrap(), Type::Float);
//! assert_eq!(tree.node.ty, Some(Type::Float));
//! ```

mod check_node;
pub mod diagnostics;
mod helpers;
mod scope;

#[cfg(test)]
mod tests;

use exprcheck_core::types::{Type, TypeCategory};
use exprcheck_syntax::ast::{Span, Tree};
use exprcheck_syntax::diagnostics::BoundError;
use miette::Diagnostic;
use thiserror::Error;

use crate::env::Config;
use diagnostics::Diagnostics;
use scope::ScopeStack;

/// Auxiliary fact produced alongside a node's type and consumed by the parent rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingInfo {
    /// The node resolves to a receiver-bound method: call arguments start after the receiver.
    pub method: bool,
}

/// What a visit produces.
pub(crate) type Inferred = (Type, BindingInfo);

/// Errors returned by [`Checker::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum CheckError {
    /// A type error inside the expression.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] BoundError),

    /// The expression checked, but its type is not the category the caller declared.
    #[error("expected {expected}, but got {found}")]
    #[diagnostic(code(exprcheck::unexpected_type))]
    UnexpectedType { expected: TypeCategory, found: Type },
}

/// Mutable state of one check run.
#[derive(Debug, Default)]
pub(crate) struct CheckCx {
    pub(crate) diagnostics: Diagnostics,
    pub(crate) scopes: ScopeStack,
}

impl CheckCx {
    /// Record a diagnostic (if none is recorded yet) and return the error-path result.
    pub(crate) fn error(&mut self, span: Span, message: String) -> Inferred {
        if self.diagnostics.report(span, &message) {
            tracing::debug!(start = span.start, end = span.end, %message, "recorded type error");
        }
        (Type::Dynamic, BindingInfo::default())
    }
}

/// Type checker bound to an environment configuration.
///
/// ## Notes
/// - The checker holds no per-run state: [`check`](Self::check) can be called repeatedly, and re-checking a tree
///   produces the same annotations and outcome.
#[derive(Debug, Clone, Copy)]
pub struct Checker<'cfg> {
    pub(crate) config: &'cfg Config,
}

impl<'cfg> Checker<'cfg> {
    pub fn new(config: &'cfg Config) -> Self {
        Self { config }
    }

    /// Check a tree and return the type of its root.
    ///
    /// ## Parameters
    /// - `tree`: the expression; every visited node's `ty` (and every call's `fast` marker) is written.
    ///
    /// ## Returns
    /// - (`Type`): the inferred root type.
    /// - [`CheckError::Type`] with the first diagnostic bound to `tree.source`.
    /// - [`CheckError::UnexpectedType`] when [`Config::expect`] is set and the root type does not satisfy it.
    #[tracing::instrument(skip_all, fields(strict = self.config.strict, source_len = tree.source.len()))]
    pub fn check(&self, tree: &mut Tree) -> Result<Type, CheckError> {
        let mut cx = CheckCx::default();
        let (ty, _) = self.visit(&mut tree.node, &mut cx);

        if let Some(error) = cx.diagnostics.into_first() {
            return Err(CheckError::Type(error.bind(&tree.source)));
        }

        if let Some(expected) = self.config.expect {
            check_expected(expected, &ty)?;
        }

        tracing::debug!(%ty, "expression checked");
        Ok(ty)
    }
}

/// Check `tree` against `config`. See [`Checker::check`].
pub fn check(tree: &mut Tree, config: &Config) -> Result<Type, CheckError> {
    Checker::new(config).check(tree)
}

/// A numeric expectation accepts either numeric category; any other expectation requires an exact match.
fn check_expected(expected: TypeCategory, found: &Type) -> Result<(), CheckError> {
    let satisfied = if expected.is_numeric() {
        found.is_number()
    } else {
        found.category() == expected
    };
    if satisfied {
        Ok(())
    } else {
        Err(CheckError::UnexpectedType {
            expected,
            found: found.clone(),
        })
    }
}
