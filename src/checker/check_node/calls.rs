//! Check calls against function and method signatures.
//!
//! ## Notes
//! - A receiver-bound method's signature starts with its receiver: the effective input count and the parameter
//!   offset both drop by one.
//! - For variadic signatures the last parameter is the element type of the tail; every argument at or past it is
//!   checked against that element type.
//! - Integer literal arithmetic passed to an `int`/`float` parameter takes the parameter's type, so `f(1)` is
//!   accepted for `f(float)`.

use exprcheck_core::types::{FunctionSignature, Type};
use exprcheck_syntax::ast::{Node, Span};

use super::typed;
use crate::checker::diagnostics::errors;
use crate::checker::helpers::{callee_name, coerce_integer_literals, is_integer_arithmetic};
use crate::checker::{CheckCx, Checker, Inferred};

impl Checker<'_> {
    /// Type-check a call: callee first, then the signature, then each argument in order.
    pub(in crate::checker) fn check_call(
        &self,
        cx: &mut CheckCx,
        span: Span,
        callee: &mut Node,
        arguments: &mut [Node],
        fast: &mut bool,
    ) -> Inferred {
        let (callee_ty, info) = self.visit(callee, cx);
        let name = callee_name(callee);

        match &callee_ty {
            ty if ty.is_dynamic() => {
                // Nothing to check against; arguments still get their annotations.
                for argument in arguments.iter_mut() {
                    self.visit(argument, cx);
                }
                typed(Type::Dynamic)
            }
            Type::Function(signature) => {
                *fast = is_fast_variadic(signature, info.method);
                self.check_signature(cx, span, signature, info.method, &name, arguments)
            }
            _ => cx.error(span, errors::not_callable(&name, &callee_ty)),
        }
    }

    /// Check a call's arity and arguments against `signature` and return its first output.
    fn check_signature(
        &self,
        cx: &mut CheckCx,
        span: Span,
        signature: &FunctionSignature,
        method: bool,
        name: &str,
        arguments: &mut [Node],
    ) -> Inferred {
        let result = match signature.outputs.as_slice() {
            [] => return cx.error(span, errors::no_return_value(name)),
            [first] | [first, _] => first.clone(),
            _ => return cx.error(span, errors::too_many_return_values(name)),
        };

        let receiver = usize::from(method);
        let num_in = signature.params.len().saturating_sub(receiver);

        if signature.variadic {
            if arguments.len() < num_in.saturating_sub(1) {
                return cx.error(span, errors::not_enough_arguments(name));
            }
        } else if arguments.len() > num_in {
            return cx.error(span, errors::too_many_arguments(name));
        } else if arguments.len() < num_in {
            return cx.error(span, errors::not_enough_arguments(name));
        }

        for (i, argument) in arguments.iter_mut().enumerate() {
            let (mut arg_ty, _) = self.visit(argument, cx);

            let param = if signature.variadic && i + 1 >= num_in {
                signature.params.last()
            } else {
                signature.params.get(i + receiver)
            };
            let Some(param) = param else {
                continue;
            };

            if matches!(param, Type::Int | Type::Float) && is_integer_arithmetic(argument) {
                coerce_integer_literals(argument, param);
                arg_ty = param.clone();
            }

            if arg_ty.is_nil() {
                continue;
            }

            if !arg_ty.assignable_to(param) && !arg_ty.is_dynamic() {
                return cx.error(argument.span, errors::cannot_use_as_argument(&arg_ty, param, name));
            }
        }

        typed(result)
    }
}

/// Whether a call can pass its variadic tail as a single `[]any` without converting each argument.
///
/// The shape is `func(...any) any` or `func(...any) (any, error)`, with a receiver in front for methods.
pub(crate) fn is_fast_variadic(signature: &FunctionSignature, method: bool) -> bool {
    let receiver = usize::from(method);
    let outputs_fit = match signature.outputs.as_slice() {
        [out] => out.is_dynamic(),
        [out, err] => out.is_dynamic() && matches!(err, Type::Interface(iface) if iface.name == "error"),
        _ => false,
    };
    signature.variadic
        && signature.params.len() == receiver + 1
        && outputs_fit
        && signature.params.last().is_some_and(Type::is_dynamic)
}
