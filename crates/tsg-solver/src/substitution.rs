//! Type parameter substitution maps.
//!
//! A [`TypeSubstitution`] maps the type parameters of one generic to their
//! replacements. Specializing a generic pushes one frame on the
//! [`SubstitutionContext`]; nested specializations push further frames, and
//! lookups search innermost first.

use rustc_hash::FxHashMap;
use tsg_symbols::SymbolId;

/// Replacement map for one generic's type parameters.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    map: FxHashMap<SymbolId, SymbolId>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pair `params` with `args` positionally. Extra entries on either side
    /// are ignored.
    pub fn from_args(params: &[SymbolId], args: &[SymbolId]) -> Self {
        let map = params
            .iter()
            .copied()
            .zip(args.iter().copied())
            .collect();
        Self { map }
    }

    pub fn insert(&mut self, param: SymbolId, replacement: SymbolId) {
        self.map.insert(param, replacement);
    }

    #[inline]
    pub fn get(&self, param: SymbolId) -> Option<SymbolId> {
        self.map.get(&param).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// A frame whose every entry maps a parameter to itself changes nothing.
    pub fn is_identity(&self) -> bool {
        self.map.iter().all(|(param, replacement)| param == replacement)
    }
}

/// Stack of substitution frames threaded through one specialization call
/// tree, plus the "specializing to any" mode in which every unmapped type
/// parameter becomes `any`.
#[derive(Debug, Default)]
pub struct SubstitutionContext {
    frames: Vec<TypeSubstitution>,
    specializing_to_any: bool,
}

impl SubstitutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, frame: TypeSubstitution) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) {
        let popped = self.frames.pop();
        debug_assert!(popped.is_some(), "substitution frame popped from empty context");
    }

    /// Innermost mapping for `param`.
    pub fn lookup(&self, param: SymbolId) -> Option<SymbolId> {
        self.frames.iter().rev().find_map(|frame| frame.get(param))
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_specializing_to_any(&self) -> bool {
        self.specializing_to_any
    }

    pub(crate) fn set_specializing_to_any(&mut self, value: bool) -> bool {
        std::mem::replace(&mut self.specializing_to_any, value)
    }
}

#[cfg(test)]
#[path = "../tests/substitution_tests.rs"]
mod tests;
