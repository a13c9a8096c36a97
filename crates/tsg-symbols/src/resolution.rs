//! Resolution state, rebinding generations and invalidation.
//!
//! The checker marks a node `Resolving` while it computes its type
//! information and `Resolved` once done; a node requested while
//! `Resolving` is part of a cycle. Invalidation resets a node (and every
//! clone derived from it) so that it is re-resolved on next use.

use crate::graph::SymbolGraph;
use crate::ids::SymbolId;
use crate::symbol::ResolutionState;
use tracing::debug;

impl SymbolGraph {
    pub fn start_resolving(&mut self, symbol: SymbolId) {
        self.symbol_mut(symbol).state = ResolutionState::Resolving;
    }

    /// Mark resolved. A freshly resolved node may be invalidated again,
    /// so this also re-arms the specialization invalidation latch.
    pub fn set_resolved(&mut self, symbol: SymbolId) {
        let node = self.symbol_mut(symbol);
        node.state = ResolutionState::Resolved;
        if let Some(generic) = node.generic_state_mut() {
            generic.invalidated_specializations = false;
        }
    }

    pub fn set_unresolved(&mut self, symbol: SymbolId) {
        let node = self.symbol_mut(symbol);
        node.state = ResolutionState::Unresolved;
        node.bound_generation = None;
    }

    /// Primitives and string constants are always resolved; error types
    /// never are.
    pub fn is_resolved(&self, symbol: SymbolId) -> bool {
        if self.is_primitive(symbol) {
            return true;
        }
        if self.is_error(symbol) {
            return false;
        }
        self.symbol(symbol).state == ResolutionState::Resolved
    }

    #[inline]
    pub fn is_resolving(&self, symbol: SymbolId) -> bool {
        self.symbol(symbol).state == ResolutionState::Resolving
    }

    /// Stamp the node as bound under the current generation.
    pub fn set_bound(&mut self, symbol: SymbolId) {
        let generation = self.generation();
        self.symbol_mut(symbol).bound_generation = Some(generation);
    }

    /// Bound under the current generation. Bumping the generation makes
    /// every node report unbound.
    pub fn is_bound(&self, symbol: SymbolId) -> bool {
        self.symbol(symbol).bound_generation == Some(self.generation())
    }

    pub fn set_being_specialized(&mut self, symbol: SymbolId, value: bool) {
        self.symbol_mut(symbol).being_specialized = value;
    }

    /// Reset a node to unresolved and drop everything derived from it.
    ///
    /// Cascades to a class's constructor method, a container's instance
    /// value and (once per resolution) every cached specialization.
    ///
    /// # Panics
    ///
    /// Invalidating a node that is in the middle of being specialized is an
    /// engine bug.
    pub fn invalidate(&mut self, symbol: SymbolId) {
        assert!(
            !self.symbol(symbol).being_specialized,
            "cannot invalidate {symbol:?} while it is being specialized"
        );
        debug!(symbol = symbol.0, name = %self.name(symbol), "SymbolGraph::invalidate");

        self.set_unresolved(symbol);
        if let Some(info) = self.symbol(symbol).type_info() {
            info.caches.clear();
        }
        for decl in self.symbol(symbol).declarations.clone() {
            self.declarations[decl.index()].reset_errors();
        }

        if let Some(ctor) = self.constructor_method(symbol) {
            if ctor != symbol && !self.symbol(ctor).being_specialized {
                self.invalidate(ctor);
            }
        }
        if let Some(instance) = self.instance_symbol(symbol) {
            if instance != symbol && !self.symbol(instance).being_specialized {
                self.invalidate(instance);
            }
        }

        let clones = match self.symbol_mut(symbol).generic_state_mut() {
            Some(generic) if !generic.invalidated_specializations => {
                generic.invalidated_specializations = true;
                generic.specializations.values().copied().collect::<Vec<_>>()
            }
            _ => Vec::new(),
        };
        for clone in clones {
            if clone != symbol && !self.symbol(clone).being_specialized {
                self.invalidate(clone);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/resolution_tests.rs"]
mod tests;
