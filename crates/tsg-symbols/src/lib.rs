//! The symbol/type graph of the tsg checker.
//!
//! Every named or anonymous entity the checker reasons about (variables,
//! members, classes, interfaces, modules, signatures, type parameters,
//! arrays, primitives) is a node in one [`SymbolGraph`]. Relationships are
//! typed, bidirectional [`Link`]s; everything derived from them (member
//! indices, signature lists, free type parameters) is cached on the node
//! and dropped when the links change.
//!
//! Generic nodes keep a cache of their specializations keyed by argument
//! identity. The specialization engine itself lives in `tsg-solver`; this
//! crate only provides the storage and the invariants it relies on.

pub mod declaration;
pub mod flags;
pub mod format;
pub mod generics;
pub mod graph;
pub mod ids;
pub mod links;
pub mod members;
pub mod naming;
pub mod resolution;
pub mod signatures;
pub mod symbol;
pub mod visibility;

pub use declaration::Declaration;
pub use flags::{DeclFlags, LinkKind, SymbolFlags, SymbolKind};
pub use format::TypeFormatter;
pub use graph::{SymbolGraph, WellKnownTypes};
pub use ids::{AstRef, DeclId, LinkId, SpecializationKey, SymbolId, TypeArgumentList};
pub use links::Link;
pub use symbol::{
    ErrorTypeInfo, ExportAssignment, ResolutionState, Symbol, SymbolData, TypeCategory,
    TypeVariableInfo,
};
