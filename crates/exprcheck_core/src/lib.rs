//! Provide the type model, numeric policy and language vocabulary shared by the exprcheck type checker.
//!
//! This crate is intentionally small and dependency-light. It contains deterministic helpers that both:
//! - the checker uses to infer and validate expression types, and
//! - the runtime that executes checked expressions uses to coerce operands the same way.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global state, and no AST types.
//! - Current scope: type descriptors ([`types`]), numeric widening ([`widen`]), and the operator/builtin
//!   registries ([`lang`]).

pub mod lang;
pub mod types;

/// Represent the numeric category used by the widening policy.
///
/// This is not a concrete runtime type. It exists to describe "int-like" and "float-like" behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericTy {
    Int,
    Float,
}

/// Determine the numeric result category of an arithmetic operation over two numeric operands.
///
/// ## Parameters
/// - `lhs`: numeric category of the left operand.
/// - `rhs`: numeric category of the right operand.
///
/// ## Returns
/// - (`NumericTy`): `Float` if either operand is `Float`, otherwise `Int`.
///
/// ## Notes
/// - The runtime coerces operands with exactly this rule, so checked and executed result types agree.
/// - `**` is not widened: it always yields `Float` (see the binary operator rules in the checker).
///
/// ## Examples
/// ```rust
/// use exprcheck_core::{widen, NumericTy};
///
/// assert_eq!(widen(NumericTy::Int, NumericTy::Int), NumericTy::Int);
/// assert_eq!(widen(NumericTy::Int, NumericTy::Float), NumericTy::Float);
/// ```
pub fn widen(lhs: NumericTy, rhs: NumericTy) -> NumericTy {
    if lhs == NumericTy::Float || rhs == NumericTy::Float {
        NumericTy::Float
    } else {
        NumericTy::Int
    }
}
