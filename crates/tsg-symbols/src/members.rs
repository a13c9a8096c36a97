//! Members, nested types, base types and signature lists.
//!
//! Everything here is derived from links. Name indices and signature lists
//! are built lazily on first use, kept in the type's [`TypeCaches`], and
//! dropped whenever the underlying links change or the type is
//! invalidated.
//!
//! Alias types never hold members; every query here forwards through the
//! alias chain first.
//!
//! [`TypeCaches`]: crate::symbol::TypeCaches

use crate::flags::{DeclFlags, LinkKind, SymbolKind};
use crate::graph::SymbolGraph;
use crate::ids::SymbolId;
use crate::symbol::ExportAssignment;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::trace;
use tsg_common::{RecursionGuard, RecursionProfile};

impl SymbolGraph {
    // =========================================================================
    // Aliases
    // =========================================================================

    /// One hop through an alias.
    pub fn alias_target(&self, alias: SymbolId) -> Option<SymbolId> {
        if !self.is_alias(alias) {
            return None;
        }
        self.first_target(alias, LinkKind::Aliases)
    }

    /// Follow aliases until a non-alias node. Cyclic or dangling alias
    /// chains stop at the last alias reached.
    pub fn resolve_alias(&self, ty: SymbolId) -> SymbolId {
        let mut current = ty;
        let mut seen: SmallVec<[SymbolId; 4]> = SmallVec::new();
        while let Some(target) = self.alias_target(current) {
            if seen.contains(&target) {
                break;
            }
            seen.push(current);
            current = target;
        }
        current
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Attach `member` to `ty` and make `ty` its container.
    pub fn add_member(&mut self, ty: SymbolId, member: SymbolId, private: bool) {
        assert!(
            !self.is_alias(ty),
            "alias type {ty:?} cannot hold member {member:?}"
        );
        let kind = if private {
            LinkKind::PrivateMember
        } else {
            LinkKind::PublicMember
        };
        self.connect(ty, member, kind);
        self.set_container(member, ty);

        if self
            .type_of(member)
            .is_some_and(|member_ty| member_ty != member && self.mentions_type_parameters(member_ty))
        {
            self.note_generic_value(member);
        }
    }

    /// Detach `member` from `ty`. Lookups afterwards no longer find it.
    pub fn remove_member(&mut self, ty: SymbolId, member: SymbolId) {
        self.disconnect_between(ty, member, LinkKind::PublicMember);
        self.disconnect_between(ty, member, LinkKind::PrivateMember);
        self.disconnect_between(member, ty, LinkKind::ContainedBy);
    }

    /// Nested (type-level) member of a container, looked up separately from
    /// value members.
    pub fn add_enclosed_type(&mut self, container: SymbolId, nested: SymbolId) {
        assert!(
            !self.is_alias(container),
            "alias type {container:?} cannot enclose {nested:?}"
        );
        self.connect(container, nested, LinkKind::EnclosedType);
        self.set_container(nested, container);
    }

    pub fn remove_enclosed_type(&mut self, container: SymbolId, nested: SymbolId) {
        self.disconnect_between(container, nested, LinkKind::EnclosedType);
        self.disconnect_between(nested, container, LinkKind::ContainedBy);
    }

    /// A node has at most one container; re-parenting drops the old edge.
    pub fn set_container(&mut self, symbol: SymbolId, container: SymbolId) {
        for link in self.outgoing_links(symbol, LinkKind::ContainedBy) {
            self.disconnect(link);
        }
        self.connect(symbol, container, LinkKind::ContainedBy);
    }

    #[inline]
    pub fn container(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.first_target(symbol, LinkKind::ContainedBy)
    }

    /// Own value members in declaration order.
    pub fn members(&self, ty: SymbolId) -> SmallVec<[SymbolId; 4]> {
        let ty = self.resolve_alias(ty);
        self.symbol(ty)
            .outgoing
            .iter()
            .filter_map(|&id| self.link(id))
            .filter(|l| l.kind.is_member())
            .map(|l| l.dest)
            .collect()
    }

    pub fn member_count(&self, ty: SymbolId) -> usize {
        self.members(ty).len()
    }

    /// Private by link or by declaration.
    pub fn is_private_member(&self, member: SymbolId) -> bool {
        self.any_declaration_has_flag(member, DeclFlags::PRIVATE)
            || self
                .symbol(member)
                .incoming
                .iter()
                .filter_map(|&id| self.link(id))
                .any(|l| l.kind == LinkKind::PrivateMember)
    }

    /// Find a value member by name.
    ///
    /// Looks at the type's own members first, then (when `look_in_parent`)
    /// each extended type depth-first with the first match winning, then
    /// through a container's export assignment, and finally falls back to a
    /// nested type of the same name.
    pub fn find_member(&self, ty: SymbolId, name: &str, look_in_parent: bool) -> Option<SymbolId> {
        let ty = self.resolve_alias(ty);
        let mut guard = RecursionGuard::with_profile(RecursionProfile::MemberLookup);
        let found = self.find_member_in(ty, name, look_in_parent, &mut guard);
        found.or_else(|| self.find_nested_type(ty, name, SymbolKind::empty()))
    }

    fn find_member_in(
        &self,
        ty: SymbolId,
        name: &str,
        look_in_parent: bool,
        guard: &mut RecursionGuard<SymbolId>,
    ) -> Option<SymbolId> {
        if !guard.enter(ty).is_entered() {
            return None;
        }

        let mut found = self.own_member_by_name(ty, name);

        if found.is_none() && look_in_parent {
            for base in self.extended_types(ty) {
                let base = self.resolve_alias(base);
                found = self.find_member_in(base, name, true, guard);
                if found.is_some() {
                    break;
                }
            }
        }

        if found.is_none() && self.is_container(ty) {
            found = self.find_member_through_export(ty, name, guard);
        }

        guard.leave(ty);
        found
    }

    fn own_member_by_name(&self, ty: SymbolId, name: &str) -> Option<SymbolId> {
        let info = self.symbol(ty).type_info()?;
        let mut cache = info.caches.member_by_name.borrow_mut();
        let index = cache.get_or_insert_with(|| {
            trace!(ty = ty.0, "building member name cache");
            let mut index = FxHashMap::default();
            for member in self.members(ty) {
                index
                    .entry(self.symbol(member).name.clone())
                    .or_insert(member);
            }
            index
        });
        index.get(name).copied()
    }

    fn find_member_through_export(
        &self,
        container: SymbolId,
        name: &str,
        guard: &mut RecursionGuard<SymbolId>,
    ) -> Option<SymbolId> {
        let info = self.symbol(container).type_info()?;
        if info.export_assignment.is_empty() || info.in_export_walk.get() {
            return None;
        }
        info.in_export_walk.set(true);
        let assignment = info.export_assignment;
        let found = [assignment.container, assignment.type_symbol]
            .into_iter()
            .flatten()
            .filter(|&target| target != container)
            .find_map(|target| {
                let target = self.resolve_alias(target);
                self.find_member_in(target, name, true, guard)
            });
        info.in_export_walk.set(false);
        found
    }

    /// Find a nested type by name, optionally restricted to `kind_filter`
    /// (an empty filter accepts every kind).
    pub fn find_nested_type(
        &self,
        ty: SymbolId,
        name: &str,
        kind_filter: SymbolKind,
    ) -> Option<SymbolId> {
        let ty = self.resolve_alias(ty);
        let info = self.symbol(ty).type_info()?;
        let mut cache = info.caches.nested_type_by_name.borrow_mut();
        let index = cache.get_or_insert_with(|| {
            let mut index = FxHashMap::default();
            for nested in self.outgoing_targets(ty, LinkKind::EnclosedType) {
                index
                    .entry(self.symbol(nested).name.clone())
                    .or_insert(nested);
            }
            index
        });
        let found = index.get(name).copied()?;
        if kind_filter.is_empty() || self.kind(found).intersects(kind_filter) {
            Some(found)
        } else {
            None
        }
    }

    pub fn find_nested_container(&self, ty: SymbolId, name: &str) -> Option<SymbolId> {
        self.find_nested_type(ty, name, SymbolKind::SOME_CONTAINER)
    }

    pub fn enclosed_types(&self, ty: SymbolId) -> SmallVec<[SymbolId; 4]> {
        let ty = self.resolve_alias(ty);
        self.outgoing_targets(ty, LinkKind::EnclosedType)
    }

    /// Nodes whose `ContainedBy` edge points at `container`, by name.
    pub fn find_contained_member(&self, container: SymbolId, name: &str) -> Option<SymbolId> {
        let info = self.symbol(container).type_info()?;
        let mut cache = info.caches.contained_members.borrow_mut();
        let index = cache.get_or_insert_with(|| self.build_contained_index(container));
        index.get(name).and_then(|entries| entries.first().copied())
    }

    pub fn contained_members(&self, container: SymbolId) -> Vec<SymbolId> {
        let Some(info) = self.symbol(container).type_info() else {
            return Vec::new();
        };
        let mut cache = info.caches.contained_members.borrow_mut();
        let index = cache.get_or_insert_with(|| self.build_contained_index(container));
        let mut all: Vec<SymbolId> = index.values().flatten().copied().collect();
        all.sort();
        all
    }

    fn build_contained_index(
        &self,
        container: SymbolId,
    ) -> FxHashMap<String, SmallVec<[SymbolId; 1]>> {
        let mut index: FxHashMap<String, SmallVec<[SymbolId; 1]>> = FxHashMap::default();
        for member in self.incoming_sources(container, LinkKind::ContainedBy) {
            index
                .entry(self.symbol(member).name.clone())
                .or_default()
                .push(member);
        }
        index
    }

    /// Every member visible on `ty`: own members first, then inherited
    /// members whose name is not already present, recursing through
    /// extended types. An empty `kind_mask` accepts every kind.
    pub fn get_all_members(
        &self,
        ty: SymbolId,
        kind_mask: SymbolKind,
        include_private: bool,
    ) -> Vec<SymbolId> {
        let mut result = Vec::new();
        let mut names: FxHashSet<String> = FxHashSet::default();
        let mut guard = RecursionGuard::with_profile(RecursionProfile::MemberLookup);
        self.collect_all_members(
            self.resolve_alias(ty),
            kind_mask,
            include_private,
            &mut result,
            &mut names,
            &mut guard,
        );
        result
    }

    fn collect_all_members(
        &self,
        ty: SymbolId,
        kind_mask: SymbolKind,
        include_private: bool,
        result: &mut Vec<SymbolId>,
        names: &mut FxHashSet<String>,
        guard: &mut RecursionGuard<SymbolId>,
    ) {
        if !guard.enter(ty).is_entered() {
            return;
        }
        for member in self.members(ty) {
            let symbol = self.symbol(member);
            if !kind_mask.is_empty() && !symbol.kind.intersects(kind_mask) {
                continue;
            }
            if !include_private && self.is_private_member(member) {
                continue;
            }
            if names.insert(symbol.name.clone()) {
                result.push(member);
            }
        }
        for base in self.extended_types(ty) {
            let base = self.resolve_alias(base);
            self.collect_all_members(base, kind_mask, include_private, result, names, guard);
        }
        guard.leave(ty);
    }

    // =========================================================================
    // Base types
    // =========================================================================

    pub fn add_extended_type(&mut self, ty: SymbolId, base: SymbolId) {
        self.connect(ty, base, LinkKind::Extends);
    }

    pub fn remove_extended_type(&mut self, ty: SymbolId, base: SymbolId) {
        self.disconnect_between(ty, base, LinkKind::Extends);
    }

    pub fn extended_types(&self, ty: SymbolId) -> SmallVec<[SymbolId; 4]> {
        self.outgoing_targets(self.resolve_alias(ty), LinkKind::Extends)
    }

    pub fn add_implemented_type(&mut self, ty: SymbolId, interface: SymbolId) {
        self.connect(ty, interface, LinkKind::Implements);
    }

    pub fn remove_implemented_type(&mut self, ty: SymbolId, interface: SymbolId) {
        self.disconnect_between(ty, interface, LinkKind::Implements);
    }

    pub fn implemented_types(&self, ty: SymbolId) -> SmallVec<[SymbolId; 4]> {
        self.outgoing_targets(self.resolve_alias(ty), LinkKind::Implements)
    }

    /// Whether `potential_base` is `ty` itself (modulo specialization) or is
    /// reachable through extends/implements. A cycle in the hierarchy
    /// counts as reaching the base.
    pub fn has_base(&self, ty: SymbolId, potential_base: SymbolId) -> bool {
        let mut visited: FxHashSet<SymbolId> = FxHashSet::default();
        self.has_base_in(ty, potential_base, &mut visited)
    }

    fn has_base_in(
        &self,
        ty: SymbolId,
        potential_base: SymbolId,
        visited: &mut FxHashSet<SymbolId>,
    ) -> bool {
        if ty == potential_base
            || self.root(ty) == Some(potential_base)
            || self.root(potential_base) == Some(ty)
        {
            return true;
        }
        if !visited.insert(ty) {
            return true;
        }
        let bases = self
            .extended_types(ty)
            .into_iter()
            .chain(self.implemented_types(ty));
        for base in bases {
            if self.has_base_in(base, potential_base, visited) {
                return true;
            }
        }
        visited.remove(&ty);
        false
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    pub fn add_call_signature(&mut self, ty: SymbolId, signature: SymbolId) {
        self.add_signature(ty, signature, LinkKind::CallSignature);
    }

    pub fn add_construct_signature(&mut self, ty: SymbolId, signature: SymbolId) {
        self.add_signature(ty, signature, LinkKind::ConstructSignature);
    }

    pub fn add_index_signature(&mut self, ty: SymbolId, signature: SymbolId) {
        self.add_signature(ty, signature, LinkKind::IndexSignature);
    }

    fn add_signature(&mut self, ty: SymbolId, signature: SymbolId, kind: LinkKind) {
        assert!(
            self.is_signature(signature),
            "{signature:?} is not a signature node"
        );
        assert!(!self.is_alias(ty), "alias type {ty:?} cannot hold signatures");
        self.connect(ty, signature, kind);
        if self.is_generic_signature(signature) {
            self.note_generic_holder(ty);
        }
    }

    /// Remove `signature` from whichever signature list of `ty` holds it.
    pub fn remove_signature(&mut self, ty: SymbolId, signature: SymbolId) {
        for kind in [
            LinkKind::CallSignature,
            LinkKind::ConstructSignature,
            LinkKind::IndexSignature,
        ] {
            self.disconnect_between(ty, signature, kind);
        }
    }

    /// Call signatures, optionally followed by those inherited from
    /// extended types. A base that itself derives from `ty` is skipped so
    /// that transiently cyclic hierarchies do not loop.
    pub fn call_signatures(&self, ty: SymbolId, collect_base: bool) -> Vec<SymbolId> {
        self.signatures_of(ty, LinkKind::CallSignature, collect_base)
    }

    pub fn construct_signatures(&self, ty: SymbolId, collect_base: bool) -> Vec<SymbolId> {
        self.signatures_of(ty, LinkKind::ConstructSignature, collect_base)
    }

    pub fn index_signatures(&self, ty: SymbolId, collect_base: bool) -> Vec<SymbolId> {
        self.signatures_of(ty, LinkKind::IndexSignature, collect_base)
    }

    fn signatures_of(&self, ty: SymbolId, kind: LinkKind, collect_base: bool) -> Vec<SymbolId> {
        let ty = self.resolve_alias(ty);
        let mut signatures = self.own_signatures(ty, kind);
        if collect_base {
            for base in self.extended_types(ty) {
                let base = self.resolve_alias(base);
                if self.has_base(base, ty) {
                    continue;
                }
                signatures.extend(self.signatures_of(base, kind, true));
            }
        }
        signatures
    }

    fn own_signatures(&self, ty: SymbolId, kind: LinkKind) -> Vec<SymbolId> {
        let Some(info) = self.symbol(ty).type_info() else {
            return Vec::new();
        };
        let cell = match kind {
            LinkKind::CallSignature => &info.caches.call_signatures,
            LinkKind::ConstructSignature => &info.caches.construct_signatures,
            _ => &info.caches.index_signatures,
        };
        cell.borrow_mut()
            .get_or_insert_with(|| self.outgoing_targets(ty, kind).into_vec())
            .clone()
    }

    // =========================================================================
    // Classes and containers
    // =========================================================================

    pub fn set_constructor_method(&mut self, class: SymbolId, method: SymbolId) {
        assert!(self.is_class(class), "constructor method set on non-class {class:?}");
        if let Some(info) = self.symbol_mut(class).type_info_mut() {
            info.constructor_method = Some(method);
        }
    }

    pub fn constructor_method(&self, class: SymbolId) -> Option<SymbolId> {
        self.symbol(class)
            .type_info()
            .and_then(|info| info.constructor_method)
    }

    pub fn set_has_default_constructor(&mut self, class: SymbolId, value: bool) {
        if let Some(info) = self.symbol_mut(class).type_info_mut() {
            info.has_default_constructor = value;
        }
    }

    pub fn has_default_constructor(&self, class: SymbolId) -> bool {
        self.symbol(class)
            .type_info()
            .is_some_and(|info| info.has_default_constructor)
    }

    /// Value-side counterpart of a container.
    pub fn set_instance_symbol(&mut self, container: SymbolId, instance: SymbolId) {
        assert!(
            self.is_container(container),
            "instance symbol set on non-container {container:?}"
        );
        if let Some(info) = self.symbol_mut(container).type_info_mut() {
            info.instance_symbol = Some(instance);
        }
    }

    pub fn instance_symbol(&self, container: SymbolId) -> Option<SymbolId> {
        self.symbol(container)
            .type_info()
            .and_then(|info| info.instance_symbol)
    }

    pub fn set_export_assignment(&mut self, container: SymbolId, assignment: ExportAssignment) {
        assert!(
            self.is_container(container),
            "export assignment on non-container {container:?}"
        );
        if let Some(info) = self.symbol_mut(container).type_info_mut() {
            info.export_assignment = assignment;
            info.caches.member_by_name.replace(None);
        }
    }

    pub fn export_assignment(&self, container: SymbolId) -> ExportAssignment {
        self.symbol(container)
            .type_info()
            .map(|info| info.export_assignment)
            .unwrap_or_default()
    }

    /// Link an instance type to the container it is the value side of.
    pub fn set_associated_container(&mut self, ty: SymbolId, container: SymbolId) {
        if let Some(info) = self.symbol_mut(ty).type_info_mut() {
            info.associated_container = Some(container);
        }
    }

    pub fn associated_container(&self, ty: SymbolId) -> Option<SymbolId> {
        self.symbol(ty)
            .type_info()
            .and_then(|info| info.associated_container)
    }

    // =========================================================================
    // Arrays and accessors
    // =========================================================================

    pub fn array_element_type(&self, array: SymbolId) -> Option<SymbolId> {
        if !self.is_array(array) {
            return None;
        }
        self.first_target(array, LinkKind::ArrayOf)
    }

    pub fn set_getter(&mut self, accessor: SymbolId, getter: SymbolId) {
        assert!(self.is_accessor(accessor), "{accessor:?} is not an accessor");
        for link in self.outgoing_links(accessor, LinkKind::GetterFunction) {
            self.disconnect(link);
        }
        self.connect(accessor, getter, LinkKind::GetterFunction);
    }

    pub fn set_setter(&mut self, accessor: SymbolId, setter: SymbolId) {
        assert!(self.is_accessor(accessor), "{accessor:?} is not an accessor");
        for link in self.outgoing_links(accessor, LinkKind::SetterFunction) {
            self.disconnect(link);
        }
        self.connect(accessor, setter, LinkKind::SetterFunction);
    }

    pub fn getter(&self, accessor: SymbolId) -> Option<SymbolId> {
        self.first_target(accessor, LinkKind::GetterFunction)
    }

    pub fn setter(&self, accessor: SymbolId) -> Option<SymbolId> {
        self.first_target(accessor, LinkKind::SetterFunction)
    }

    /// Type of a member: the accessor type for accessors, the `TypedAs`
    /// target otherwise.
    pub fn member_type(&self, member: SymbolId) -> Option<SymbolId> {
        if self.is_accessor(member) {
            self.accessor_type(member)
        } else {
            self.type_of(member)
        }
    }

    /// Explicit type if set, else the getter's return type, else the
    /// setter's first parameter type.
    pub fn accessor_type(&self, accessor: SymbolId) -> Option<SymbolId> {
        if let Some(ty) = self.first_target(accessor, LinkKind::TypedAs) {
            return Some(ty);
        }
        let from_getter = self.getter(accessor).and_then(|getter| {
            let fn_type = self.type_of(getter)?;
            let signature = *self.call_signatures(fn_type, false).first()?;
            self.return_type(signature)
        });
        from_getter.or_else(|| {
            let setter = self.setter(accessor)?;
            let fn_type = self.type_of(setter)?;
            let signature = *self.call_signatures(fn_type, false).first()?;
            let parameter = *self.parameters(signature).first()?;
            self.type_of(parameter)
        })
    }
}

#[cfg(test)]
#[path = "../tests/members_tests.rs"]
mod tests;
