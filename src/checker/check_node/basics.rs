//! Resolve identifiers against the environment registry.

use exprcheck_core::types::Type;
use exprcheck_syntax::ast::Span;

use super::typed;
use crate::checker::diagnostics::errors;
use crate::checker::{BindingInfo, CheckCx, Checker, Inferred};

impl Checker<'_> {
    /// Resolve an identifier.
    ///
    /// ## Notes
    /// - Without a registry every name is dynamic.
    /// - Unknown names fall back to the configured default type (or dynamic) unless the config is strict.
    pub(in crate::checker) fn check_identifier(&self, cx: &mut CheckCx, span: Span, name: &str) -> Inferred {
        let Some(types) = &self.config.types else {
            return typed(Type::Dynamic);
        };

        match types.get(name) {
            Some(binding) if binding.ambiguous => cx.error(span, errors::ambiguous_identifier(name)),
            Some(binding) => (binding.ty.clone(), BindingInfo { method: binding.method }),
            None if !self.config.strict => typed(self.config.default_type.clone().unwrap_or(Type::Dynamic)),
            None => cx.error(span, errors::unknown_name(name)),
        }
    }
}
