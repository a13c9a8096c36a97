//! External visibility: can a node be named from outside its declaring
//! module? Used when emitting declaration files and by diagnostics that
//! must not reference unexported names.

use crate::flags::{DeclFlags, SymbolKind};
use crate::graph::SymbolGraph;
use crate::ids::SymbolId;
use smallvec::SmallVec;
use tsg_common::limits::MAX_VISIBILITY_DEPTH;

type SeenList = SmallVec<[SymbolId; 8]>;

impl SymbolGraph {
    pub fn is_externally_visible(&self, symbol: SymbolId) -> bool {
        let mut seen = SeenList::new();
        self.is_visible_from(symbol, &mut seen)
    }

    /// A symbol already on `seen` is treated as visible; that cuts cycles
    /// through aliases, associated containers and export assignments.
    fn is_visible_from(&self, symbol: SymbolId, seen: &mut SeenList) -> bool {
        if seen.contains(&symbol) || seen.len() as u32 >= MAX_VISIBILITY_DEPTH {
            return true;
        }
        seen.push(symbol);

        if self.is_primitive(symbol) {
            return true;
        }

        if let (Some(root), Some(args)) = (self.root(symbol), self.type_arguments(symbol)) {
            let args: SmallVec<[SymbolId; 4]> = args.iter().copied().collect();
            return self.is_visible_from(root, seen)
                && args.into_iter().all(|arg| self.is_visible_from(arg, seen));
        }

        if self.is_type(symbol) {
            if let Some(associated) = self.associated_container(symbol) {
                return self.is_visible_from(associated, seen);
            }
        }

        if self.is_private_member(symbol) {
            return false;
        }

        let Some(container) = self.container(symbol) else {
            return true;
        };

        let module = if self.kind(container).contains(SymbolKind::DYNAMIC_MODULE) {
            Some(container)
        } else {
            self.associated_container(container)
                .filter(|&c| self.kind(c).contains(SymbolKind::DYNAMIC_MODULE))
        };
        if let Some(module) = module {
            if self.is_used_in_export_assignment(module, symbol) {
                return true;
            }
        }

        if !self.any_declaration_has_flag(symbol, DeclFlags::EXPORTED)
            && !self
                .kind(symbol)
                .intersects(SymbolKind::PROPERTY | SymbolKind::METHOD)
        {
            return false;
        }

        self.is_visible_from(container, seen)
    }

    /// Whether `symbol` is one of the targets of `container`'s export
    /// assignment, following assignments that re-export another container.
    pub fn is_used_in_export_assignment(&self, container: SymbolId, symbol: SymbolId) -> bool {
        let Some(info) = self.symbol(container).type_info() else {
            return false;
        };
        if info.export_assignment.is_empty() || info.in_export_walk.get() {
            return false;
        }
        let assignment = info.export_assignment;
        if [assignment.value, assignment.type_symbol, assignment.container]
            .contains(&Some(symbol))
        {
            return true;
        }

        info.in_export_walk.set(true);
        let used = assignment
            .container
            .filter(|&next| next != container && self.is_container(next))
            .is_some_and(|next| self.is_used_in_export_assignment(next, symbol));
        info.in_export_walk.set(false);
        used
    }
}

#[cfg(test)]
#[path = "../tests/visibility_tests.rs"]
mod tests;
