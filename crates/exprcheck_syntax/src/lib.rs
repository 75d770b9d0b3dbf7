//! Expression trees consumed by the exprcheck type checker.
//!
//! The parser is not part of this workspace: trees are built programmatically (see the constructors on
//! [`ast::Node`]) or deserialized from JSON produced by an external parser.
//!
//! ## Notes
//! - This crate is "syntax-only": it does not resolve names or infer types. It only carries the out-of-band type
//!   annotation slot ([`ast::Node::ty`]) that the checker fills in.
//! - Type descriptors come from [`exprcheck_core::types`].
//!
//! ## Examples
//! ```rust
//! use exprcheck_syntax::ast::{Node, Tree};
//!
//! let tree = Tree::new("1 + 2", Node::binary("+", Node::integer(1), Node::integer(2)));
//! assert_eq!(tree.node.children().len(), 2);
//! ```

pub mod ast;
pub mod diagnostics;
