//! Generic Specialization Engine
//!
//! Turns generic declarations in a [`tsg_symbols::SymbolGraph`] into
//! concrete clones. It uses:
//!
//! - **Substitution frames**: a stack of type-parameter maps, searched
//!   innermost first
//! - **Per-root caches**: clones are keyed by argument identity and
//!   registered before they are populated, so recursive generics close
//!   over themselves
//! - **Depth limit**: runaway expansion is reported once and yields `any`
//!
//! Key guarantees:
//! - Specializing twice with the same arguments returns the same node
//! - Non-generic input comes back unchanged
//! - Specializing with a generic's own parameters returns the root
mod options;
mod specialize;
mod substitution;

pub use options::SpecializationOptions;
pub use specialize::{Specializer, instantiate_signature, specialize_type, specialize_type_to_any};
pub use substitution::{SubstitutionContext, TypeSubstitution};
pub use tsg_common::limits::MAX_SPECIALIZATION_DEPTH;
