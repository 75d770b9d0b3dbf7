//! Builtin function vocabulary.
//!
//! Builtins are not environment functions: they are resolved by name on their own node kind, and the higher-order
//! ones (`all`, `none`, `any`, `one`, `filter`, `map`, `count`) take a collection plus a closure over its elements.
//!
//! ## Examples
//! ```rust
//! use exprcheck_core::lang::builtins::{self, BuiltinFnId};
//!
//! assert_eq!(builtins::from_str("filter"), Some(BuiltinFnId::Filter));
//! assert_eq!(builtins::info_for(BuiltinFnId::Len).arity, 1);
//! assert!(builtins::info_for(BuiltinFnId::All).is_predicate());
//! ```

/// Stable identifier for a builtin function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFnId {
    Len,
    All,
    None,
    Any,
    One,
    Filter,
    Map,
    Count,
}

/// Shape of a builtin's arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinKind {
    /// A single collection or string argument.
    Unary,
    /// A collection followed by a closure evaluated per element.
    HigherOrder,
}

/// Metadata for a builtin function.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinFnInfo {
    pub id: BuiltinFnId,
    pub canonical: &'static str,
    pub arity: usize,
    pub kind: BuiltinKind,
    /// The closure must return `bool`.
    pub requires_predicate: bool,
}

impl BuiltinFnInfo {
    /// `all`, `none`, `any` and `one`: boolean predicates reducing to a single `bool`.
    pub fn is_predicate(&self) -> bool {
        matches!(
            self.id,
            BuiltinFnId::All | BuiltinFnId::None | BuiltinFnId::Any | BuiltinFnId::One
        )
    }
}

/// Registry of all builtin functions.
pub const BUILTIN_FUNCTIONS: &[BuiltinFnInfo] = &[
    info(BuiltinFnId::Len, "len", 1, BuiltinKind::Unary, false),
    info(BuiltinFnId::All, "all", 2, BuiltinKind::HigherOrder, true),
    info(BuiltinFnId::None, "none", 2, BuiltinKind::HigherOrder, true),
    info(BuiltinFnId::Any, "any", 2, BuiltinKind::HigherOrder, true),
    info(BuiltinFnId::One, "one", 2, BuiltinKind::HigherOrder, true),
    info(BuiltinFnId::Filter, "filter", 2, BuiltinKind::HigherOrder, true),
    info(BuiltinFnId::Map, "map", 2, BuiltinKind::HigherOrder, false),
    info(BuiltinFnId::Count, "count", 2, BuiltinKind::HigherOrder, true),
];

/// Return the full metadata entry for a builtin.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: BuiltinFnId) -> &'static BuiltinFnInfo {
    BUILTIN_FUNCTIONS
        .iter()
        .find(|b| b.id == id)
        .expect("INVARIANT: every BuiltinFnId has a registry entry")
}

pub fn as_str(id: BuiltinFnId) -> &'static str {
    info_for(id).canonical
}

/// Resolve a builtin name. Matching is case-sensitive.
pub fn from_str(name: &str) -> Option<BuiltinFnId> {
    BUILTIN_FUNCTIONS.iter().find(|b| b.canonical == name).map(|b| b.id)
}

const fn info(
    id: BuiltinFnId,
    canonical: &'static str,
    arity: usize,
    kind: BuiltinKind,
    requires_predicate: bool,
) -> BuiltinFnInfo {
    BuiltinFnInfo {
        id,
        canonical,
        arity,
        kind,
        requires_predicate,
    }
}
