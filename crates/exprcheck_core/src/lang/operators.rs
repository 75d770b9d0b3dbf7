//! Operator vocabulary.
//!
//! This module defines the canonical operator set (symbol operators like `+` and word operators like `and`)
//! along with the fixity the checker uses to tell unary from binary position.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - Several operators have synonym spellings (`and`/`&&`, `not`/`!`). The first spelling is canonical and is the
//!   one returned by [`as_str`].
//! - `+` and `-` are both prefix and infix ([`Fixity::Either`]).
//! - Regex matching (`matches`) is not listed: it has its own node kind.
//!
//! ## Examples
//! ```rust
//! use exprcheck_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("not in"), Some(OperatorId::NotIn));
//! assert_eq!(operators::infix_from_str("&&"), Some(OperatorId::And));
//! assert_eq!(operators::prefix_from_str("-"), Some(OperatorId::Minus));
//! assert_eq!(operators::prefix_from_str("*"), None);
//! ```

/// Define whether an operator is infix (binary), prefix (unary), or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    Either,
}

impl Fixity {
    pub fn allows_infix(self) -> bool {
        matches!(self, Fixity::Infix | Fixity::Either)
    }

    pub fn allows_prefix(self) -> bool {
        matches!(self, Fixity::Prefix | Fixity::Either)
    }
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Logical
    Or,
    And,
    Not,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,

    // Membership / string tests
    In,
    NotIn,
    Contains,
    StartsWith,
    EndsWith,

    // Ranges
    DotDot,

    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
}

/// Metadata for an operator.
///
/// ## Notes
/// - `spellings` may contain multiple accepted spellings for the same operator id (synonyms).
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spellings: &'static [&'static str],
    pub fixity: Fixity,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Logical
    op(OperatorId::Or, &["or", "||"], Fixity::Infix),
    op(OperatorId::And, &["and", "&&"], Fixity::Infix),
    op(OperatorId::Not, &["not", "!"], Fixity::Prefix),
    // Comparison
    op(OperatorId::EqEq, &["=="], Fixity::Infix),
    op(OperatorId::NotEq, &["!="], Fixity::Infix),
    op(OperatorId::Lt, &["<"], Fixity::Infix),
    op(OperatorId::Gt, &[">"], Fixity::Infix),
    op(OperatorId::LtEq, &["<="], Fixity::Infix),
    op(OperatorId::GtEq, &[">="], Fixity::Infix),
    // Membership / string tests
    op(OperatorId::In, &["in"], Fixity::Infix),
    op(OperatorId::NotIn, &["not in"], Fixity::Infix),
    op(OperatorId::Contains, &["contains"], Fixity::Infix),
    op(OperatorId::StartsWith, &["startsWith"], Fixity::Infix),
    op(OperatorId::EndsWith, &["endsWith"], Fixity::Infix),
    // Ranges
    op(OperatorId::DotDot, &[".."], Fixity::Infix),
    // Arithmetic
    op(OperatorId::Plus, &["+"], Fixity::Either),
    op(OperatorId::Minus, &["-"], Fixity::Either),
    op(OperatorId::Star, &["*"], Fixity::Infix),
    op(OperatorId::Slash, &["/"], Fixity::Infix),
    op(OperatorId::Percent, &["%"], Fixity::Infix),
    op(OperatorId::StarStar, &["**"], Fixity::Infix),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS
        .iter()
        .find(|o| o.id == id)
        .expect("INVARIANT: every OperatorId has a registry entry")
}

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spellings[0]
}

/// Resolve an operator spelling to its identifier, regardless of fixity.
///
/// ## Returns
/// - `Some(OperatorId)` if the spelling exists in [`OPERATORS`].
/// - `None` otherwise.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&spelling)
        })
        .map(|o| o.id)
}

/// Resolve a spelling used in infix (binary) position.
pub fn infix_from_str(spelling: &str) -> Option<OperatorId> {
    from_str(spelling).filter(|id| info_for(*id).fixity.allows_infix())
}

/// Resolve a spelling used in prefix (unary) position.
pub fn prefix_from_str(spelling: &str) -> Option<OperatorId> {
    from_str(spelling).filter(|id| info_for(*id).fixity.allows_prefix())
}

// --- helpers -----------------------------------------------------------------

const fn op(id: OperatorId, spellings: &'static [&'static str], fixity: Fixity) -> OperatorInfo {
    OperatorInfo { id, spellings, fixity }
}
