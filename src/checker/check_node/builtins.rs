//! Check builtins, closures and the implicit element reference (`#`).
//!
//! The higher-order builtins push their collection onto the scope stack while their closure is checked, so `#`
//! inside the closure body resolves to the collection's element type.

use exprcheck_core::lang::builtins::{self, BuiltinFnId, BuiltinFnInfo, BuiltinKind};
use exprcheck_core::types::{FunctionSignature, Type};
use exprcheck_syntax::ast::{Node, Span};

use super::typed;
use crate::checker::diagnostics::errors;
use crate::checker::{CheckCx, Checker, Inferred};

impl Checker<'_> {
    pub(in crate::checker) fn check_builtin(
        &self,
        cx: &mut CheckCx,
        span: Span,
        name: &str,
        arguments: &mut [Node],
    ) -> Inferred {
        let Some(id) = builtins::from_str(name) else {
            return cx.error(span, errors::unknown_builtin(name));
        };
        let info = builtins::info_for(id);

        match (info.kind, arguments) {
            (BuiltinKind::Unary, [argument]) => self.check_len(cx, span, argument),
            (BuiltinKind::HigherOrder, [collection, closure]) => self.check_higher_order(cx, info, collection, closure),
            (_, arguments) => cx.error(span, errors::builtin_arity(name, info.arity, arguments.len())),
        }
    }

    fn check_len(&self, cx: &mut CheckCx, span: Span, argument: &mut Node) -> Inferred {
        let (ty, _) = self.visit(argument, cx);
        if ty.is_array() || ty.is_map() || ty.is_string() {
            return typed(Type::Int);
        }
        cx.error(span, errors::invalid_len_argument(&ty))
    }

    /// `all`, `none`, `any`, `one`, `filter`, `map` and `count` over an array.
    fn check_higher_order(
        &self,
        cx: &mut CheckCx,
        info: &BuiltinFnInfo,
        collection: &mut Node,
        closure: &mut Node,
    ) -> Inferred {
        let (collection_ty, _) = self.visit(collection, cx);
        if !collection_ty.is_array() {
            return cx.error(collection.span, errors::builtin_takes_array(info.canonical, &collection_ty));
        }

        let (closure_ty, _) = cx.within_collection(collection_ty.clone(), |cx| self.visit(closure, cx));

        let output = match &closure_ty {
            ty if ty.is_dynamic() => Type::Dynamic,
            Type::Function(signature) => match (signature.params.as_slice(), signature.outputs.as_slice()) {
                ([input], [output]) if input.is_dynamic() => output.clone(),
                _ => return cx.error(closure.span, errors::closure_shape()),
            },
            _ => return cx.error(closure.span, errors::closure_shape()),
        };

        if info.requires_predicate && !output.is_bool() {
            return cx.error(closure.span, errors::closure_should_return_bool(&output));
        }

        let result = match info.id {
            BuiltinFnId::All | BuiltinFnId::None | BuiltinFnId::Any | BuiltinFnId::One => Type::Bool,
            BuiltinFnId::Len | BuiltinFnId::Count => Type::Int,
            BuiltinFnId::Filter => match &collection_ty {
                Type::Array(elem) => Type::array((**elem).clone()),
                _ => Type::any_array(),
            },
            BuiltinFnId::Map => Type::array(output),
        };
        typed(result)
    }

    /// A closure is a function from the current element (dynamic) to its body's type.
    pub(in crate::checker) fn check_closure(&self, cx: &mut CheckCx, body: &mut Node) -> Inferred {
        let (body_ty, _) = self.visit(body, cx);
        typed(Type::function(FunctionSignature::new(vec![Type::Dynamic], vec![body_ty])))
    }

    /// `#`: the element type of the innermost iterated collection.
    pub(in crate::checker) fn check_pointer(&self, cx: &mut CheckCx, span: Span) -> Inferred {
        let Some(collection) = cx.scopes.top().cloned() else {
            return cx.error(span, errors::pointer_outside_closure());
        };
        match &collection {
            Type::Array(elem) => typed((**elem).clone()),
            ty if ty.is_dynamic() => typed(Type::Dynamic),
            _ => cx.error(span, errors::pointer_over_non_array(&collection)),
        }
    }
}
