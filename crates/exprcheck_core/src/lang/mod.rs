//! Expression language vocabulary registries.
//!
//! Callers work with **stable IDs** ([`operators::OperatorId`], [`builtins::BuiltinFnId`]) instead of comparing raw
//! operator symbols and builtin names across the checker, and look up spellings/metadata via the registry tables.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The parser that produces trees owns syntax; registries only describe spellings and checking metadata.
//!
//! ## Examples
//! ```rust
//! use exprcheck_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("&&"), Some(OperatorId::And));
//! assert_eq!(operators::as_str(OperatorId::And), "and");
//! ```

pub mod builtins;
pub mod operators;
