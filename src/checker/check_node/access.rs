//! Check member access and slicing.

use exprcheck_core::types::Type;
use exprcheck_syntax::ast::{Node, NodeKind, Span};

use super::typed;
use crate::checker::diagnostics::errors;
use crate::checker::helpers::describe_property;
use crate::checker::{BindingInfo, CheckCx, Checker, Inferred};

impl Checker<'_> {
    /// Type-check `base.property` / `base[property]`.
    ///
    /// ## Notes
    /// - A literal property naming a method of the base resolves to that method. It is receiver-bound unless the base
    ///   is dynamic: interface methods carry no receiver parameter to skip.
    /// - Map keys are not checked against the key type.
    pub(in crate::checker) fn check_member(
        &self,
        cx: &mut CheckCx,
        span: Span,
        base: &mut Node,
        property: &mut Node,
    ) -> Inferred {
        let (base_ty, _) = self.visit(base, cx);
        let (prop_ty, _) = self.visit(property, cx);

        let name = match &property.kind {
            NodeKind::String { value } => Some(value.as_str()),
            _ => None,
        };

        if let Some(method) = name.and_then(|name| base_ty.method(name)) {
            let info = BindingInfo {
                method: !base_ty.is_dynamic(),
            };
            return (Type::function(method.clone()), info);
        }

        match &base_ty {
            ty if ty.is_dynamic() => typed(Type::Dynamic),
            Type::Map(_, value) => typed((**value).clone()),
            Type::Array(elem) => {
                if prop_ty.is_integer() {
                    typed((**elem).clone())
                } else {
                    cx.error(property.span, errors::invalid_index(&prop_ty, &base_ty))
                }
            }
            Type::Struct(descriptor) => match name.and_then(|name| descriptor.field(name)) {
                Some(field) => typed(field.clone()),
                None => cx.error(span, errors::no_field(&base_ty, &describe_property(property))),
            },
            _ => cx.error(span, errors::no_field(&base_ty, &describe_property(property))),
        }
    }

    /// Type-check `base[from:to]`. Both bounds are optional; the result is the base type.
    pub(in crate::checker) fn check_slice(
        &self,
        cx: &mut CheckCx,
        base: &mut Node,
        from: Option<&mut Node>,
        to: Option<&mut Node>,
    ) -> Inferred {
        let (ty, _) = self.visit(base, cx);

        for bound in [from, to].into_iter().flatten() {
            let (bound_ty, _) = self.visit(bound, cx);
            if !bound_ty.is_integer() {
                return cx.error(bound.span, errors::non_integer_slice_index(&bound_ty));
            }
        }

        typed(ty)
    }
}
