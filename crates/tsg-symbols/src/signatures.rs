//! Parameters and return types of signature nodes.

use crate::flags::{LinkKind, SymbolFlags};
use crate::graph::SymbolGraph;
use crate::ids::SymbolId;
use smallvec::SmallVec;

impl SymbolGraph {
    /// Append a parameter. `flags` carries `OPTIONAL` / `VARIADIC`.
    pub fn add_parameter(&mut self, signature: SymbolId, parameter: SymbolId, flags: SymbolFlags) {
        assert!(
            self.is_signature(signature),
            "{signature:?} is not a signature node"
        );
        self.add_flags(parameter, flags);
        self.connect(signature, parameter, LinkKind::Parameter);
        if self
            .type_of(parameter)
            .is_some_and(|ty| ty != parameter && self.mentions_type_parameters(ty))
        {
            self.mark_generic_parameter(signature);
        }
    }

    pub fn parameters(&self, signature: SymbolId) -> SmallVec<[SymbolId; 4]> {
        self.outgoing_targets(signature, LinkKind::Parameter)
    }

    pub fn set_return_type(&mut self, signature: SymbolId, ty: SymbolId) {
        assert!(
            self.is_signature(signature),
            "{signature:?} is not a signature node"
        );
        for link in self.outgoing_links(signature, LinkKind::ReturnType) {
            self.disconnect(link);
        }
        self.connect(signature, ty, LinkKind::ReturnType);
        if self.mentions_type_parameters(ty) {
            self.mark_generic_parameter(signature);
        }
    }

    #[inline]
    pub fn return_type(&self, signature: SymbolId) -> Option<SymbolId> {
        self.first_target(signature, LinkKind::ReturnType)
    }

    pub fn is_optional(&self, symbol: SymbolId) -> bool {
        self.flags(symbol).contains(SymbolFlags::OPTIONAL)
    }

    pub fn is_variadic(&self, symbol: SymbolId) -> bool {
        self.flags(symbol).contains(SymbolFlags::VARIADIC)
    }

    pub fn has_variadic_parameter(&self, signature: SymbolId) -> bool {
        self.parameters(signature)
            .last()
            .is_some_and(|&p| self.is_variadic(p))
    }

    /// Number of leading parameters a call must supply.
    pub fn min_argument_count(&self, signature: SymbolId) -> usize {
        self.parameters(signature)
            .iter()
            .take_while(|&&p| !self.is_optional(p) && !self.is_variadic(p))
            .count()
    }
}
