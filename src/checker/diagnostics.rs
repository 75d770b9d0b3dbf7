//! First-error diagnostics slot and the checker's message catalog.

use exprcheck_core::types::Type;
use exprcheck_syntax::ast::Span;
use exprcheck_syntax::diagnostics::SourceError;

/// Holds at most one diagnostic per check run: the first one reported.
#[derive(Debug, Default)]
pub struct Diagnostics {
    first: Option<SourceError>,
}

impl Diagnostics {
    /// Record `message` at `span` unless a diagnostic is already recorded.
    ///
    /// Returns `true` if this call recorded it.
    pub fn report(&mut self, span: Span, message: &str) -> bool {
        if self.first.is_some() {
            return false;
        }
        self.first = Some(SourceError::new(message, span));
        true
    }

    pub fn has_error(&self) -> bool {
        self.first.is_some()
    }

    pub fn into_first(self) -> Option<SourceError> {
        self.first
    }
}

// ============================================================================
// Error catalog
// ============================================================================

/// Message constructors for every diagnostic the checker emits.
pub mod errors {
    use super::Type;

    pub fn unknown_name(name: &str) -> String {
        format!("unknown name {}", name)
    }

    pub fn ambiguous_identifier(name: &str) -> String {
        format!("ambiguous identifier {}", name)
    }

    pub fn unknown_operator(operator: &str) -> String {
        format!("unknown operator ({})", operator)
    }

    pub fn mismatched_type(operator: &str, operand: &Type) -> String {
        format!("invalid operation: {} (mismatched type {})", operator, operand)
    }

    pub fn mismatched_types(operator: &str, lhs: &Type, rhs: &Type) -> String {
        format!("invalid operation: {} (mismatched types {} and {})", operator, lhs, rhs)
    }

    pub fn invalid_index(index: &Type, base: &Type) -> String {
        format!("invalid operation: cannot use {} as index to {}", index, base)
    }

    pub fn no_field(base: &Type, property: &str) -> String {
        format!("type {} has no field {}", base, property)
    }

    pub fn non_integer_slice_index(bound: &Type) -> String {
        format!("invalid operation: non-integer slice index {}", bound)
    }

    pub fn not_callable(name: &str, ty: &Type) -> String {
        format!("cannot call non-function {} (type {})", name, ty)
    }

    pub fn no_return_value(name: &str) -> String {
        format!("func {} doesn't return value", name)
    }

    pub fn too_many_return_values(name: &str) -> String {
        format!("func {} returns more then two values", name)
    }

    pub fn not_enough_arguments(name: &str) -> String {
        format!("not enough arguments to call {}", name)
    }

    pub fn too_many_arguments(name: &str) -> String {
        format!("too many arguments to call {}", name)
    }

    pub fn cannot_use_as_argument(arg: &Type, param: &Type, name: &str) -> String {
        format!("cannot use {} as argument (type {}) to call {}", arg, param, name)
    }

    pub fn unknown_builtin(name: &str) -> String {
        format!("unknown builtin {}", name)
    }

    pub fn builtin_arity(name: &str, expected: usize, found: usize) -> String {
        let plural = if expected == 1 { "" } else { "s" };
        format!("builtin {} expects {} argument{} (got {})", name, expected, plural, found)
    }

    pub fn builtin_takes_array(name: &str, found: &Type) -> String {
        format!("builtin {} takes only array (got {})", name, found)
    }

    pub fn invalid_len_argument(found: &Type) -> String {
        format!("invalid argument for len (type {})", found)
    }

    pub fn closure_shape() -> String {
        "closure should have one input and one output".to_string()
    }

    pub fn closure_should_return_bool(found: &Type) -> String {
        format!("closure should return boolean (got {})", found)
    }

    pub fn pointer_outside_closure() -> String {
        "cannot use pointer accessor outside closure".to_string()
    }

    pub fn pointer_over_non_array(collection: &Type) -> String {
        format!("cannot use {} as array", collection)
    }

    pub fn non_bool_condition(found: &Type) -> String {
        format!("non-bool expression (type {}) used as condition", found)
    }
}
