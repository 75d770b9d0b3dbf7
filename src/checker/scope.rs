//! Stack of collections iterated by enclosing builtin closures.

use exprcheck_core::types::Type;

use super::CheckCx;

#[derive(Debug, Default)]
pub struct ScopeStack {
    collections: Vec<Type>,
}

impl ScopeStack {
    /// The innermost iterated collection, if any.
    pub fn top(&self) -> Option<&Type> {
        self.collections.last()
    }

    pub fn depth(&self) -> usize {
        self.collections.len()
    }

    fn push(&mut self, collection: Type) {
        self.collections.push(collection);
    }

    fn pop(&mut self) -> Option<Type> {
        self.collections.pop()
    }
}

impl CheckCx {
    /// Run `f` with `collection` as the innermost iterated collection.
    ///
    /// The collection is popped when `f` returns, whatever `f` reported.
    pub(crate) fn within_collection<R>(&mut self, collection: Type, f: impl FnOnce(&mut Self) -> R) -> R {
        tracing::trace!(%collection, depth = self.scopes.depth(), "enter collection scope");
        self.scopes.push(collection);
        let out = f(self);
        let popped = self.scopes.pop();
        tracing::trace!(depth = self.scopes.depth(), "leave collection scope");
        debug_assert!(popped.is_some(), "collection scope popped more than pushed");
        out
    }
}
