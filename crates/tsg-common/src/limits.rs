//! Centralized limits and thresholds for the symbol graph.
//!
//! Recursion limits for graph walks are expressed through
//! [`crate::recursion::RecursionProfile`]; the constants here are the
//! single source of truth the profiles read from.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting of specialization requests.
///
/// Specializing a generic type specializes its members, which may in turn
/// name other generic types. Self-referential generics are cut off by the
/// specialization cache; this limit catches the expansions that the cache
/// cannot, e.g. a member whose type argument grows on every level:
///
/// ```text
/// interface Grow<T> { next: Grow<Box<T>> }
/// ```
///
/// When exceeded the engine posts an "excessively deep" diagnostic and
/// yields the dynamic type for the offending position.
pub const MAX_SPECIALIZATION_DEPTH: u32 = 50;

/// Maximum depth when walking extends/implements chains for member and
/// signature lookup. Legal hierarchies are acyclic, but a binder may
/// transiently produce `A extends B, B extends A`.
pub const MAX_MEMBER_LOOKUP_DEPTH: u32 = 64;

/// Maximum depth for rendering a type to text.
///
/// Deeper structure is rendered as `...`.
pub const MAX_FORMAT_DEPTH: u32 = 20;

/// Maximum depth for external-visibility computation through container and
/// export-assignment chains.
pub const MAX_VISIBILITY_DEPTH: u32 = 64;

/// Maximum number of nodes visited by a single structural walk
/// (free type parameter collection, wrapped-parameter checks).
pub const MAX_TRAVERSAL_NODES: u32 = 100_000;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Inline capacity for type-argument lists.
///
/// Almost every generic in practice takes at most four arguments, so
/// specialization keys of this size never allocate.
pub const TYPE_ARGUMENT_INLINE_CAPACITY: usize = 4;
