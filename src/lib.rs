#![forbid(unsafe_code)]
//! Static type checker for an embeddable expression language.
//!
//! Given a parsed expression tree and a description of the evaluation environment, the checker infers the type of
//! every node, writes it back onto the tree, and reports the first type error with its source location. Evaluation
//! and parsing live elsewhere; this crate only decides whether an expression is well-typed.
//!
//! - [`env`]: the environment registry (names to types, operator overloads, strictness, expected result).
//! - [`checker`]: the traversal and its typing rules.
//! - [`cli`]: the `exprcheck` command.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a checker bug (logic error), use `.expect("INVARIANT: reason")` with
//!   a clear explanation.

pub mod checker;
pub mod cli;
pub mod env;

pub use exprcheck_core::types;
pub use exprcheck_syntax::{ast, diagnostics};

pub use checker::{CheckError, Checker, check};
pub use env::{Binding, Config, ConfigError};
