//! Type parameters, generic-ness and the per-root specialization cache.
//!
//! A node is *generic* when it declares type parameters, is an array, or
//! (transitively) has a member or signature whose type mentions a type
//! parameter. The last two are tracked as flags that are set as the binder
//! types members and parameters; see [`SymbolGraph::set_type`].
//!
//! A node is *fixed* when nothing in it can still be substituted.

use crate::flags::LinkKind;
use crate::graph::SymbolGraph;
use crate::ids::{SpecializationKey, SymbolId, TypeArgumentList};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};
use tsg_common::{RecursionGuard, RecursionProfile};

impl SymbolGraph {
    // =========================================================================
    // Type parameters
    // =========================================================================

    /// Append a formal type parameter to a type or signature.
    pub fn add_type_parameter(&mut self, owner: SymbolId, param: SymbolId) {
        assert!(
            self.is_type_parameter(param),
            "{param:?} is not a type parameter"
        );
        self.connect(owner, param, LinkKind::TypeParameter);
        if self.is_signature(owner) {
            self.propagate_generic(owner);
        }
    }

    /// Formal type parameters in declaration order. Clones report their
    /// root's list.
    pub fn type_parameters(&self, owner: SymbolId) -> TypeArgumentList {
        self.outgoing_targets(owner, LinkKind::TypeParameter)
            .into_iter()
            .collect()
    }

    pub fn find_type_parameter(&self, owner: SymbolId, name: &str) -> Option<SymbolId> {
        self.outgoing_targets(owner, LinkKind::TypeParameter)
            .into_iter()
            .find(|&p| self.symbol(p).name == name)
    }

    pub fn set_constraint(&mut self, param: SymbolId, constraint: SymbolId) {
        if let Some(info) = self.symbol_mut(param).type_info_mut() {
            info.constraint = Some(constraint);
        }
    }

    pub fn constraint(&self, param: SymbolId) -> Option<SymbolId> {
        self.symbol(param).type_info().and_then(|info| info.constraint)
    }

    // =========================================================================
    // Generic-ness
    // =========================================================================

    pub fn is_generic(&self, ty: SymbolId) -> bool {
        if self.is_signature(ty) {
            return self.is_generic_signature(ty);
        }
        let Some(info) = self.symbol(ty).type_info() else {
            return false;
        };
        info.has_generic_member
            || info.has_generic_signature
            || self.is_array(ty)
            || !self.type_parameters(ty).is_empty()
    }

    pub fn is_generic_signature(&self, signature: SymbolId) -> bool {
        self.symbol(signature)
            .signature_info()
            .is_some_and(|info| info.has_generic_parameter)
            || !self.type_parameters(signature).is_empty()
    }

    /// Whether substitution can no longer change `ty`.
    pub fn is_fixed(&self, ty: SymbolId) -> bool {
        if self.is_type_parameter(ty) {
            return false;
        }
        if let Some(var) = self.type_variable_info(ty) {
            return var.fixed;
        }
        if !self.is_generic(ty) {
            return true;
        }
        if self.is_array(ty) && self.type_arguments(ty).is_none() {
            return self
                .array_element_type(ty)
                .is_none_or(|element| element != ty && self.is_fixed(element));
        }
        match self.type_arguments(ty) {
            Some(args) => args.iter().all(|&arg| arg != ty && self.is_fixed(arg)),
            None => false,
        }
    }

    /// Whether a value typed as `ty` makes its owner generic.
    #[inline]
    pub fn mentions_type_parameters(&self, ty: SymbolId) -> bool {
        (self.is_type(ty) || self.is_signature(ty)) && !self.is_fixed(ty)
    }

    pub fn has_generic_member(&self, ty: SymbolId) -> bool {
        self.symbol(ty)
            .type_info()
            .is_some_and(|info| info.has_generic_member)
    }

    pub fn has_generic_signature(&self, ty: SymbolId) -> bool {
        self.symbol(ty)
            .type_info()
            .is_some_and(|info| info.has_generic_signature)
    }

    /// Mark `ty` as having a member whose type mentions a type parameter.
    pub fn mark_generic_member(&mut self, ty: SymbolId) {
        if self.set_generic_member_flag(ty) {
            self.propagate_generic(ty);
        }
    }

    /// Mark `ty` as having a signature that mentions a type parameter.
    pub fn mark_generic_signature(&mut self, ty: SymbolId) {
        if self.set_generic_signature_flag(ty) {
            self.propagate_generic(ty);
        }
    }

    /// Mark `signature` as having a parameter or return type that mentions
    /// a type parameter.
    pub fn mark_generic_parameter(&mut self, signature: SymbolId) {
        if self.set_generic_parameter_flag(signature) {
            self.propagate_generic(signature);
        }
    }

    /// `value` is now typed by something generic.
    pub(crate) fn note_generic_value(&mut self, value: SymbolId) {
        self.propagate_generic(value);
    }

    /// `ty` just received a generic signature.
    pub(crate) fn note_generic_holder(&mut self, ty: SymbolId) {
        self.mark_generic_signature(ty);
    }

    fn set_generic_member_flag(&mut self, ty: SymbolId) -> bool {
        let Some(info) = self.symbol_mut(ty).type_info_mut() else {
            return false;
        };
        info.caches.free_type_parameters.replace(None);
        !std::mem::replace(&mut info.has_generic_member, true)
    }

    fn set_generic_signature_flag(&mut self, ty: SymbolId) -> bool {
        let Some(info) = self.symbol_mut(ty).type_info_mut() else {
            return false;
        };
        info.caches.free_type_parameters.replace(None);
        !std::mem::replace(&mut info.has_generic_signature, true)
    }

    fn set_generic_parameter_flag(&mut self, signature: SymbolId) -> bool {
        let Some(info) = self.symbol_mut(signature).signature_info_mut() else {
            return false;
        };
        !std::mem::replace(&mut info.has_generic_parameter, true)
    }

    /// Walk from a node that now mentions a type parameter to everything
    /// that uses it: containers of values typed by it, signatures taking or
    /// returning it, and types holding those signatures. Flags that were
    /// already set stop the walk.
    fn propagate_generic(&mut self, start: SymbolId) {
        let mut work = vec![start];
        let mut visited: FxHashSet<SymbolId> = FxHashSet::default();
        while let Some(node) = work.pop() {
            if !visited.insert(node) {
                continue;
            }
            if self.is_signature(node) {
                for kind in [
                    LinkKind::CallSignature,
                    LinkKind::ConstructSignature,
                    LinkKind::IndexSignature,
                ] {
                    for holder in self.incoming_sources(node, kind) {
                        if self.set_generic_signature_flag(holder) {
                            work.push(holder);
                        }
                    }
                }
            } else if self.is_type(node) {
                work.extend(self.incoming_sources(node, LinkKind::TypedAs));
                for signature in self.incoming_sources(node, LinkKind::ReturnType) {
                    if self.set_generic_parameter_flag(signature) {
                        work.push(signature);
                    }
                }
            } else {
                for container in self.outgoing_targets(node, LinkKind::ContainedBy) {
                    if self.set_generic_member_flag(container) {
                        trace!(container = container.0, member = node.0, "generic member");
                        work.push(container);
                    }
                }
                for signature in self.incoming_sources(node, LinkKind::Parameter) {
                    if self.set_generic_parameter_flag(signature) {
                        work.push(signature);
                    }
                }
            }
        }
    }

    // =========================================================================
    // Type arguments
    // =========================================================================

    /// Arguments a clone was created for; `None` on base nodes.
    pub fn type_arguments(&self, node: SymbolId) -> Option<&[SymbolId]> {
        self.symbol(node)
            .generic_state()
            .and_then(|state| state.type_arguments.as_deref())
    }

    pub fn set_type_arguments(&mut self, clone: SymbolId, args: &[SymbolId]) {
        if let Some(state) = self.symbol_mut(clone).generic_state_mut() {
            state.type_arguments = Some(args.iter().copied().collect());
        }
    }

    /// A clone's arguments, or a base node's own formal parameters.
    pub fn type_arguments_or_parameters(&self, node: SymbolId) -> TypeArgumentList {
        match self.type_arguments(node) {
            Some(args) => args.iter().copied().collect(),
            None => self.type_parameters(node),
        }
    }

    /// Type parameters that `ty` refers to without declaring them itself,
    /// e.g. the `T` an anonymous `{ value: T }` captures from its enclosing
    /// declaration. A generic root contributes its own formal parameters.
    pub fn free_type_parameters(&self, ty: SymbolId) -> TypeArgumentList {
        if let Some(info) = self.symbol(ty).type_info() {
            if let Some(cached) = info.caches.free_type_parameters.borrow().as_ref() {
                return cached.clone();
            }
        }

        let mut found = TypeArgumentList::new();
        let mut guard = RecursionGuard::with_profile(RecursionProfile::StructuralTraversal);
        self.collect_free_type_parameters(ty, &mut found, &mut guard);

        if let Some(info) = self.symbol(ty).type_info() {
            info.caches.free_type_parameters.replace(Some(found.clone()));
        }
        found
    }

    fn collect_free_type_parameters(
        &self,
        node: SymbolId,
        found: &mut TypeArgumentList,
        guard: &mut RecursionGuard<SymbolId>,
    ) {
        if self.is_type_parameter(node) {
            if !found.contains(&node) {
                found.push(node);
            }
            return;
        }
        if !self.is_type(node) && !self.is_signature(node) {
            if let Some(ty) = self.member_type(node) {
                self.collect_free_type_parameters(ty, found, guard);
            }
            return;
        }
        if !guard.enter(node).is_entered() {
            return;
        }

        if let Some(args) = self.type_arguments(node) {
            for &arg in args {
                self.collect_free_type_parameters(arg, found, guard);
            }
        } else if self.is_signature(node) {
            let mut inner = TypeArgumentList::new();
            for parameter in self.parameters(node) {
                self.collect_free_type_parameters(parameter, &mut inner, guard);
            }
            if let Some(ret) = self.return_type(node) {
                self.collect_free_type_parameters(ret, &mut inner, guard);
            }
            let own = self.type_parameters(node);
            for param in inner {
                if !own.contains(&param) && !found.contains(&param) {
                    found.push(param);
                }
            }
        } else if !self.type_parameters(node).is_empty() {
            for param in self.type_parameters(node) {
                if !found.contains(&param) {
                    found.push(param);
                }
            }
        } else if self.is_generic(node) {
            for member in self.members(node) {
                self.collect_free_type_parameters(member, found, guard);
            }
            let signatures = self
                .call_signatures(node, false)
                .into_iter()
                .chain(self.construct_signatures(node, false))
                .chain(self.index_signatures(node, false));
            for signature in signatures {
                self.collect_free_type_parameters(signature, found, guard);
            }
            for base in self.extended_types(node) {
                self.collect_free_type_parameters(base, found, guard);
            }
        }

        guard.leave(node);
    }

    /// Whether `ty` is, or transitively carries as a type argument, one of
    /// `params`. A bare type parameter only counts if it is in `params`.
    pub fn wraps_type_parameter(&self, ty: SymbolId, params: &[SymbolId]) -> bool {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::StructuralTraversal);
        self.wraps_type_parameter_in(ty, params, &mut guard)
    }

    fn wraps_type_parameter_in(
        &self,
        ty: SymbolId,
        params: &[SymbolId],
        guard: &mut RecursionGuard<SymbolId>,
    ) -> bool {
        if self.is_type_parameter(ty) {
            return params.contains(&ty);
        }
        if !guard.enter(ty).is_entered() {
            return false;
        }
        let wraps = match self.type_arguments(ty) {
            Some(args) => args
                .iter()
                .any(|&arg| self.wraps_type_parameter_in(arg, params, guard)),
            None if self.root(ty).is_none()
                && self.type_parameters(ty).is_empty()
                && self.is_generic(ty) =>
            {
                self.free_type_parameters(ty)
                    .iter()
                    .any(|p| params.contains(p))
            }
            None => false,
        };
        guard.leave(ty);
        wraps
    }

    // =========================================================================
    // Specialization cache
    // =========================================================================

    /// Register `clone` as the specialization of `root` for `args`.
    pub fn add_specialization(&mut self, root: SymbolId, args: &[SymbolId], clone: SymbolId) {
        let key = SpecializationKey::new(args);
        let Some(state) = self.symbol_mut(root).generic_state_mut() else {
            panic!("specialization registered on non-generic node {root:?}");
        };
        assert!(
            !state.specializations.contains_key(&key),
            "duplicate specialization of {root:?} for {args:?}"
        );
        state.specializations.insert(key, clone);
        self.connect(root, clone, LinkKind::SpecializedTo);
        trace!(root = root.0, clone = clone.0, args = ?args, "add_specialization");
    }

    pub fn get_specialization(&self, root: SymbolId, args: &[SymbolId]) -> Option<SymbolId> {
        let state = self.symbol(root).generic_state()?;
        state
            .specializations
            .get(&SpecializationKey::new(args))
            .copied()
    }

    /// Drop a cache entry (and its `SpecializedTo` link). Returns the
    /// evicted clone.
    pub fn evict_specialization(&mut self, root: SymbolId, args: &[SymbolId]) -> Option<SymbolId> {
        let key = SpecializationKey::new(args);
        let clone = self
            .symbol_mut(root)
            .generic_state_mut()?
            .specializations
            .shift_remove(&key)?;
        self.disconnect_between(root, clone, LinkKind::SpecializedTo);
        debug!(root = root.0, clone = clone.0, "evict_specialization");
        Some(clone)
    }

    /// Cached clones of `root` in creation order.
    pub fn specializations(&self, root: SymbolId) -> Vec<SymbolId> {
        self.symbol(root)
            .generic_state()
            .map(|state| state.specializations.values().copied().collect())
            .unwrap_or_default()
    }

    pub fn specialization_count(&self, root: SymbolId) -> usize {
        self.symbol(root)
            .generic_state()
            .map_or(0, |state| state.specializations.len())
    }
}

#[cfg(test)]
#[path = "../tests/generics_tests.rs"]
mod tests;
