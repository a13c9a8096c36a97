//! Stable identifiers for graph entities.
//!
//! Every node, link and declaration lives in an arena owned by
//! [`crate::SymbolGraph`] and is addressed by a `u32` index. Ids are never
//! reused; removed entities are tombstoned.

use serde::Serialize;
use smallvec::SmallVec;
use tsg_common::limits::TYPE_ARGUMENT_INLINE_CAPACITY;

/// Identity of a node (symbol, type or signature).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a directed link.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LinkId(pub u32);

impl LinkId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Identity of a declaration attached to a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeclId(pub u32);

impl DeclId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opaque handle into the external syntax tree.
///
/// The graph never dereferences it; the checker uses it to re-derive the
/// syntax behind a declaration when a specialization needs re-resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct AstRef(pub u32);

/// Ordered list of type arguments (or type parameters).
pub type TypeArgumentList = SmallVec<[SymbolId; TYPE_ARGUMENT_INLINE_CAPACITY]>;

/// Key of a specialization cache: the ordered identities of the final
/// type arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpecializationKey(pub TypeArgumentList);

impl SpecializationKey {
    pub fn new(args: &[SymbolId]) -> Self {
        Self(args.iter().copied().collect())
    }

    #[inline]
    pub fn arguments(&self) -> &[SymbolId] {
        &self.0
    }
}
