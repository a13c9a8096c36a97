//! Generic specialization.
//!
//! Specializing a generic root with a list of type arguments produces a
//! *clone*: a node of the same category whose members, signatures and base
//! types have every type parameter replaced according to the substitution
//! context. Clones are cached on the root keyed by argument identity, so
//! asking twice for `Box<number>` yields the same node.
//!
//! ## Termination
//!
//! Self-referential generics (`interface Node<T> { next: Node<T> }`) are
//! handled by registering the clone in the cache *before* its members are
//! populated: specializing `next` finds the in-progress clone and reuses
//! it. Expansions the cache cannot catch are cut off either by the
//! wrapped-self-reference check (`interface X<T> { a: X<T[]> }`) or, as a
//! last resort, by the depth limit. A clone whose population hit the depth
//! limit is never cached: it and every clone built beneath it are evicted
//! and left unresolved, so a later shallower request rebuilds them whole.

use crate::options::SpecializationOptions;
use crate::substitution::{SubstitutionContext, TypeSubstitution};
use smallvec::SmallVec;
use tracing::{debug, trace};
use tsg_common::{Diagnostic, DiagnosticSink, DepthCounter, diagnostic_codes};
use tsg_symbols::{
    DeclFlags, LinkKind, SymbolFlags, SymbolGraph, SymbolId, SymbolKind, TypeArgumentList,
    TypeCategory,
};

/// Specialization engine bound to one graph and one diagnostic sink for
/// the duration of a checking step.
pub struct Specializer<'a> {
    graph: &'a mut SymbolGraph,
    sink: &'a mut dyn DiagnosticSink,
    context: SubstitutionContext,
    depth: DepthCounter,
    options: SpecializationOptions,
    reported_depth: bool,
    /// Number of depth cut-offs so far.
    truncations: u32,
    /// `(root, clone)` pairs built in the current outermost expansion.
    built: Vec<(SymbolId, SymbolId)>,
}

impl<'a> Specializer<'a> {
    pub fn new(graph: &'a mut SymbolGraph, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self::with_options(graph, sink, SpecializationOptions::default())
    }

    pub fn with_options(
        graph: &'a mut SymbolGraph,
        sink: &'a mut dyn DiagnosticSink,
        options: SpecializationOptions,
    ) -> Self {
        Self {
            graph,
            sink,
            context: SubstitutionContext::new(),
            depth: DepthCounter::new(options.max_depth),
            options,
            reported_depth: false,
            truncations: 0,
            built: Vec::new(),
        }
    }

    #[inline]
    pub fn graph(&self) -> &SymbolGraph {
        self.graph
    }

    #[inline]
    pub fn context(&self) -> &SubstitutionContext {
        &self.context
    }

    /// Run `f` with `frame` pushed on the substitution context. The frame
    /// is popped on every exit path of `f`.
    pub fn with_substitution<R>(
        &mut self,
        frame: TypeSubstitution,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.context.push(frame);
        let result = f(self);
        self.context.pop();
        result
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    /// Specialize `ty`.
    ///
    /// With `Some(args)` the root of `ty` is specialized with exactly those
    /// arguments. With `None` the arguments are derived from `ty` itself
    /// (a clone's own arguments, a root's formal parameters or an anonymous
    /// type's free parameters) and substituted through the current context.
    ///
    /// Non-generic types, primitives and error types are returned
    /// unchanged.
    pub fn specialize_type(&mut self, ty: SymbolId, args: Option<&[SymbolId]>) -> SymbolId {
        let ty = self.graph.resolve_alias(ty);
        if self.graph.is_type_parameter(ty) {
            return self.substitute_type_parameter(ty);
        }
        if !self.graph.is_generic(ty)
            || self.graph.is_primitive(ty)
            || self.graph.is_error(ty)
            || self.graph.is_type_variable(ty)
        {
            return ty;
        }

        // Only expansions of generics count towards the limit.
        if !self.depth.enter() {
            return self.report_too_deep(ty);
        }
        let result = self.specialize_generic(ty, args);
        self.depth.leave();
        result
    }

    /// Specialize with a sparse argument list; gaps become `any`.
    pub fn specialize_type_with_gaps(
        &mut self,
        ty: SymbolId,
        args: &[Option<SymbolId>],
    ) -> SymbolId {
        let any = self.graph.any_type();
        let filled: TypeArgumentList = args.iter().map(|arg| arg.unwrap_or(any)).collect();
        self.specialize_type(ty, Some(&filled))
    }

    /// Specialize `ty` with every type parameter replaced by `any`.
    pub fn specialize_type_to_any(&mut self, ty: SymbolId) -> SymbolId {
        let previous = self.context.set_specializing_to_any(true);
        let result = self.specialize_type(ty, None);
        self.context.set_specializing_to_any(previous);
        result
    }

    /// Canonical array type with the given element type.
    pub fn array_of(&mut self, element: SymbolId) -> SymbolId {
        let array_root = self.graph.well_known().array;
        if let Some(existing) = self.probe_cache(array_root, &[element]) {
            return existing;
        }

        let name = self.graph.name(array_root).to_string();
        let clone = self
            .graph
            .create_type_with_category(name, SymbolKind::ARRAY, TypeCategory::Array);
        self.graph.connect(clone, element, LinkKind::ArrayOf);
        let formal = self.graph.type_parameters(array_root);
        let frame = TypeSubstitution::from_args(&formal, &[element]);
        self.build_clone(array_root, clone, &[element], frame, |this| {
            this.populate_type(array_root, clone);
        });
        clone
    }

    /// Specialize a signature under the current substitution context.
    ///
    /// The signature's own type parameters are kept; only the type
    /// parameters it captures from enclosing generics are substituted.
    pub fn specialize_signature(&mut self, signature: SymbolId) -> SymbolId {
        if !self.graph.is_generic_signature(signature) {
            return signature;
        }
        let root = self.graph.root_or_self(signature);
        let free = self.graph.free_type_parameters(root);
        if free.is_empty() {
            return signature;
        }
        // Instantiations carry a longer key and are already past the point
        // where captured parameters could change.
        let source: TypeArgumentList = match self.graph.type_arguments(signature) {
            Some(existing) if existing.len() == free.len() => existing.iter().copied().collect(),
            Some(_) => return signature,
            None => free.clone(),
        };
        let args: TypeArgumentList = source
            .iter()
            .map(|&param| self.specialize_type(param, None))
            .collect();
        let is_clone = self.graph.type_arguments(signature).is_some();
        if args == source && (!is_clone || self.is_live(signature)) {
            return signature;
        }
        if args == free {
            return root;
        }

        if let Some(existing) = self.probe_cache(root, &args) {
            return existing;
        }
        let kind = self.graph.kind(root);
        let clone = self.graph.create_signature(kind);
        let frame = TypeSubstitution::from_args(&free, &args);
        self.build_clone(root, clone, &args, frame, |this| {
            this.populate_signature(root, clone, true);
        });
        clone
    }

    /// Substitute a generic signature's own type parameters with `args`,
    /// e.g. after inference at a call site. Missing arguments become
    /// `any`; extra ones are ignored.
    ///
    /// `signature` may be a specialization (the `m` of `Box<number>`); the
    /// parameters it captured keep their specialized arguments.
    pub fn instantiate_signature(&mut self, signature: SymbolId, args: &[SymbolId]) -> SymbolId {
        let root = self.graph.root_or_self(signature);
        let own = self.graph.type_parameters(root);
        if own.is_empty() {
            return signature;
        }
        let free = self.graph.free_type_parameters(root);
        let captured: TypeArgumentList = match self.graph.type_arguments(signature) {
            Some(existing) if existing.len() == free.len() => existing.iter().copied().collect(),
            // Already an instantiation.
            Some(_) => return signature,
            None => free.clone(),
        };
        let any = self.graph.any_type();
        let own_args: TypeArgumentList = (0..own.len())
            .map(|i| args.get(i).copied().unwrap_or(any))
            .collect();
        if own_args == own {
            return signature;
        }

        // Keyed after the captured arguments so that instantiations never
        // collide with specializations of the same signature.
        let mut key = captured.clone();
        key.extend(own_args.iter().copied());
        if let Some(existing) = self.probe_cache(root, &key) {
            return existing;
        }

        let mut frame = TypeSubstitution::from_args(&free, &captured);
        for (&param, &arg) in own.iter().zip(own_args.iter()) {
            frame.insert(param, arg);
        }
        let kind = self.graph.kind(root);
        let clone = self.graph.create_signature(kind);
        self.build_clone(root, clone, &key, frame, |this| {
            this.populate_signature(root, clone, false);
        });
        clone
    }

    // =========================================================================
    // Types
    // =========================================================================

    fn specialize_generic(&mut self, ty: SymbolId, args: Option<&[SymbolId]>) -> SymbolId {
        if self.graph.is_signature(ty) {
            return self.specialize_signature(ty);
        }
        if args.is_none()
            && self.graph.is_array(ty)
            && self.graph.array_element_type(ty).is_some()
        {
            return self.specialize_array(ty);
        }

        let root = self.graph.root_or_self(ty);
        let formal = self.graph.type_parameters(root);
        let params: TypeArgumentList = if formal.is_empty() {
            self.graph.free_type_parameters(root)
        } else {
            formal.clone()
        };

        let mut final_args: TypeArgumentList = match args {
            Some(explicit) => self.normalize_arguments(root, &formal, explicit),
            None => {
                let source: TypeArgumentList = match self.graph.type_arguments(ty) {
                    Some(existing) => existing.iter().copied().collect(),
                    None => params.clone(),
                };
                source
                    .iter()
                    .map(|&arg| self.specialize_type(arg, None))
                    .collect()
            }
        };

        if final_args.is_empty() {
            return ty;
        }
        // A stale clone falls through to the cache, which rebuilds it.
        if args.is_none()
            && self
                .graph
                .type_arguments(ty)
                .is_some_and(|existing| existing == final_args.as_slice())
            && self.is_live(ty)
        {
            return ty;
        }
        if final_args == params {
            return root;
        }
        if root == self.graph.well_known().array {
            return self.array_of(final_args[0]);
        }

        if let Some(existing) = self.probe_cache(root, &final_args) {
            return existing;
        }

        if !formal.is_empty() && self.replace_self_references(root, &formal, &mut final_args) {
            if let Some(existing) = self.probe_cache(root, &final_args) {
                return existing;
            }
        }

        debug!(
            root = root.0,
            name = %self.graph.name(root),
            args = ?final_args.as_slice(),
            "specialize_type: creating clone"
        );
        let name = self.graph.name(root).to_string();
        let kind = self.graph.kind(root);
        let category = self.graph.type_category(root).unwrap_or(TypeCategory::Object);
        let clone = self.graph.create_type_with_category(name, kind, category);
        let frame = TypeSubstitution::from_args(&params, &final_args);
        self.build_clone(root, clone, &final_args, frame, |this| {
            this.populate_type(root, clone);
        });
        clone
    }

    fn specialize_array(&mut self, array: SymbolId) -> SymbolId {
        let Some(element) = self.graph.array_element_type(array) else {
            return array;
        };
        let specialized = self.specialize_type(element, None);
        if specialized == element {
            return array;
        }
        self.array_of(specialized)
    }

    /// Pad missing arguments with `any`; report and drop extra ones.
    fn normalize_arguments(
        &mut self,
        root: SymbolId,
        formal: &[SymbolId],
        explicit: &[SymbolId],
    ) -> TypeArgumentList {
        if formal.is_empty() {
            return explicit.iter().copied().collect();
        }
        if explicit.len() > formal.len() && self.options.report_excess_arguments {
            let name = self.graph.full_name(root);
            let count = formal.len().to_string();
            self.post_at_declaration(
                root,
                diagnostic_codes::GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS,
                &[&name, &count],
                false,
            );
        }
        let any = self.graph.any_type();
        (0..formal.len())
            .map(|i| explicit.get(i).copied().unwrap_or(any))
            .collect()
    }

    /// Replace arguments that are the root itself, or that wrap one of the
    /// root's own parameters, with `any`. Returns whether anything changed.
    fn replace_self_references(
        &mut self,
        root: SymbolId,
        formal: &[SymbolId],
        args: &mut TypeArgumentList,
    ) -> bool {
        let any = self.graph.any_type();
        let offending: SmallVec<[usize; 4]> = args
            .iter()
            .enumerate()
            .filter(|&(_, &arg)| {
                !self.graph.is_type_parameter(arg)
                    && (arg == root || self.graph.wraps_type_parameter(arg, formal))
            })
            .map(|(i, _)| i)
            .collect();
        if offending.is_empty() {
            return false;
        }

        if self.options.report_self_reference {
            let name = self.graph.full_name(root);
            self.post_at_declaration(
                root,
                diagnostic_codes::GENERIC_TYPE_REFERENCES_ITSELF_WITH_WRAPPED_TYPE_PARAMETER,
                &[&name],
                true,
            );
        }
        for i in offending {
            trace!(root = root.0, position = i, "wrapped self reference replaced by any");
            args[i] = any;
        }
        true
    }

    fn populate_type(&mut self, root: SymbolId, clone: SymbolId) {
        for param in self.graph.type_parameters(root) {
            self.graph.add_type_parameter(clone, param);
        }

        for base in self.graph.extended_types(root) {
            let base = self.specialize_type(base, None);
            self.graph.add_extended_type(clone, base);
        }
        for interface in self.graph.implemented_types(root) {
            let interface = self.specialize_type(interface, None);
            self.graph.add_implemented_type(clone, interface);
        }

        for signature in self.graph.call_signatures(root, false) {
            let specialized = self.specialize_signature(signature);
            self.graph.add_call_signature(clone, specialized);
        }
        for signature in self.graph.construct_signatures(root, false) {
            let specialized = self.specialize_signature(signature);
            self.graph.add_construct_signature(clone, specialized);
        }
        for signature in self.graph.index_signatures(root, false) {
            let specialized = self.specialize_signature(signature);
            self.graph.add_index_signature(clone, specialized);
        }

        let member_links: SmallVec<[(SymbolId, bool); 8]> = self
            .graph
            .outgoing_links(root, LinkKind::PublicMember)
            .into_iter()
            .chain(self.graph.outgoing_links(root, LinkKind::PrivateMember))
            .filter_map(|id| self.graph.link(id))
            .map(|link| (link.dest, link.kind == LinkKind::PrivateMember))
            .collect();
        for (member, private) in member_links {
            let specialized = self.specialize_member(member);
            self.graph.add_member(clone, specialized, private);
        }

        if self.graph.is_class(root) {
            if let Some(ctor) = self.graph.constructor_method(root) {
                let unbound_without_type =
                    !self.graph.is_bound(root) && self.graph.type_of(ctor).is_none();
                if !unbound_without_type {
                    let specialized = self.specialize_member(ctor);
                    self.graph.set_constructor_method(clone, specialized);
                }
            }
            let has_default = self.graph.has_default_constructor(root);
            self.graph.set_has_default_constructor(clone, has_default);
        }

        if let Some(container) = self.graph.associated_container(root) {
            self.graph.set_associated_container(clone, container);
        }
    }

    /// Copy of a member (or parameter) with its type specialized.
    fn specialize_member(&mut self, member: SymbolId) -> SymbolId {
        let name = self.graph.name(member).to_string();
        let flags = self.graph.flags(member);

        let copy = if self.graph.is_accessor(member) {
            let copy = self.graph.create_accessor(name);
            if let Some(getter) = self.graph.getter(member) {
                let getter = self.specialize_member(getter);
                self.graph.set_getter(copy, getter);
            }
            if let Some(setter) = self.graph.setter(member) {
                let setter = self.specialize_member(setter);
                self.graph.set_setter(copy, setter);
            }
            copy
        } else {
            let kind = self.graph.kind(member);
            self.graph.create_symbol(name, kind)
        };
        self.graph.add_flags(copy, flags | SymbolFlags::SYNTHESIZED);
        self.graph.set_root(copy, member);

        if let Some(ty) = self.graph.first_target(member, LinkKind::TypedAs) {
            let specialized = self.specialize_type(ty, None);
            self.graph.set_type(copy, specialized);
        }
        if self.graph.is_resolved(member) {
            self.graph.set_resolved(copy);
        }
        copy
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    fn populate_signature(&mut self, root: SymbolId, clone: SymbolId, keep_type_parameters: bool) {
        if keep_type_parameters {
            for param in self.graph.type_parameters(root) {
                self.graph.add_type_parameter(clone, param);
            }
        }
        for parameter in self.graph.parameters(root) {
            let flags = self.graph.flags(parameter);
            let specialized = self.specialize_member(parameter);
            let position = flags & (SymbolFlags::OPTIONAL | SymbolFlags::VARIADIC);
            self.graph.add_parameter(clone, specialized, position);
        }
        if let Some(ret) = self.graph.return_type(root) {
            let ret = self.specialize_type(ret, None);
            self.graph.set_return_type(clone, ret);
        }
    }

    // =========================================================================
    // Type parameters
    // =========================================================================

    fn substitute_type_parameter(&self, param: SymbolId) -> SymbolId {
        match self.context.lookup(param) {
            Some(replacement) if self.should_substitute(replacement, param) => replacement,
            Some(_) => param,
            None if self.context.is_specializing_to_any() => self.graph.any_type(),
            None => param,
        }
    }

    /// Whether type parameter `target` may be replaced by `replacement`.
    ///
    /// When the replacement is itself a type parameter declared inside the
    /// scope that declares `target`, substituting would capture it; that
    /// is refused unless a static member sits between the two scopes.
    fn should_substitute(&self, replacement: SymbolId, target: SymbolId) -> bool {
        if replacement == target {
            return false;
        }
        if !self.graph.is_type_parameter(replacement) {
            return true;
        }
        let parent_of = |symbol: SymbolId| {
            self.graph
                .first_declaration(symbol)
                .and_then(|decl| decl.parent)
        };
        let target_parent = parent_of(target);
        let mut scope = parent_of(replacement);
        if scope == target_parent {
            return true;
        }
        while let Some(decl_id) = scope {
            let decl = self.graph.declaration(decl_id);
            if decl.has_flag(DeclFlags::STATIC) {
                return true;
            }
            if Some(decl_id) == target_parent {
                return false;
            }
            scope = decl.parent;
        }
        true
    }

    // =========================================================================
    // Cache and clone lifecycle
    // =========================================================================

    /// A cached clone that is resolved or still under construction is
    /// reused; a stale one is evicted.
    fn probe_cache(&mut self, root: SymbolId, args: &[SymbolId]) -> Option<SymbolId> {
        let existing = self.graph.get_specialization(root, args)?;
        if self.is_live(existing) {
            trace!(root = root.0, clone = existing.0, "specialization cache hit");
            return Some(existing);
        }
        debug!(root = root.0, clone = existing.0, "evicting stale specialization");
        self.graph.evict_specialization(root, args);
        None
    }

    /// Resolved, or still under construction further up the stack.
    fn is_live(&self, clone: SymbolId) -> bool {
        self.graph.is_resolved(clone) || self.graph.symbol(clone).is_being_specialized()
    }

    /// Register `clone` under `key`, populate it with `frame` pushed, and
    /// complete it. If the depth limit cut anything off meanwhile, the
    /// clone and everything built beneath it are dropped from the cache.
    fn build_clone(
        &mut self,
        root: SymbolId,
        clone: SymbolId,
        key: &[SymbolId],
        frame: TypeSubstitution,
        populate: impl FnOnce(&mut Self),
    ) {
        let mark = self.built.len();
        let truncations = self.truncations;
        self.begin_clone(root, clone, key);
        self.with_substitution(frame, populate);
        self.finish_clone(root, clone);

        if self.truncations != truncations {
            self.discard_built(mark);
        } else if mark == 0 {
            self.built.clear();
        }
    }

    fn discard_built(&mut self, mark: usize) {
        for (root, clone) in self.built.split_off(mark) {
            let key: TypeArgumentList = self
                .graph
                .type_arguments(clone)
                .map(|args| args.iter().copied().collect())
                .unwrap_or_default();
            if self.graph.get_specialization(root, &key) == Some(clone) {
                self.graph.evict_specialization(root, &key);
            }
            self.graph.set_unresolved(clone);
            debug!(root = root.0, clone = clone.0, "discarding depth-truncated clone");
        }
    }

    fn begin_clone(&mut self, root: SymbolId, clone: SymbolId, args: &[SymbolId]) {
        let flags = self.graph.flags(root);
        self.graph.add_flags(clone, flags | SymbolFlags::SYNTHESIZED);
        self.graph.set_root(clone, root);
        self.graph.set_type_arguments(clone, args);
        self.graph.set_being_specialized(clone, true);
        self.graph.start_resolving(clone);
        self.graph.add_specialization(root, args, clone);
        self.built.push((root, clone));
    }

    fn finish_clone(&mut self, root: SymbolId, clone: SymbolId) {
        self.graph.set_resolved(clone);
        self.graph.set_being_specialized(clone, false);
        if self.graph.is_bound(root) {
            self.graph.set_bound(clone);
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    fn report_too_deep(&mut self, ty: SymbolId) -> SymbolId {
        self.truncations += 1;
        if !self.reported_depth {
            self.reported_depth = true;
            let root = self.graph.root_or_self(ty);
            debug!(symbol = ty.0, depth = self.depth.depth(), "specialization depth exceeded");
            self.post_at_declaration(
                root,
                diagnostic_codes::TYPE_INSTANTIATION_EXCESSIVELY_DEEP,
                &[],
                false,
            );
        }
        self.graph.any_type()
    }

    /// Post `code` at the first declaration of `symbol`, optionally also
    /// recording it on that declaration.
    fn post_at_declaration(&mut self, symbol: SymbolId, code: u32, args: &[&str], record: bool) {
        let target = self.graph.declarations(symbol).first().copied();
        let diagnostic = match target {
            Some(decl) => {
                let location = &self.graph.declaration(decl).location;
                Diagnostic::from_code(
                    location.file.clone(),
                    location.span.start,
                    location.span.len(),
                    code,
                    args,
                )
            }
            None => Diagnostic::from_code(String::new(), 0, 0, code, args),
        };
        if record {
            if let Some(decl) = target {
                self.graph.record_declaration_diagnostic(decl, diagnostic.clone());
            }
        }
        self.sink.post(diagnostic);
    }
}

// =============================================================================
// Convenience functions
// =============================================================================

/// Specialize `ty` with a one-off engine.
pub fn specialize_type(
    graph: &mut SymbolGraph,
    sink: &mut dyn DiagnosticSink,
    ty: SymbolId,
    args: Option<&[SymbolId]>,
) -> SymbolId {
    Specializer::new(graph, sink).specialize_type(ty, args)
}

pub fn specialize_type_to_any(
    graph: &mut SymbolGraph,
    sink: &mut dyn DiagnosticSink,
    ty: SymbolId,
) -> SymbolId {
    Specializer::new(graph, sink).specialize_type_to_any(ty)
}

pub fn instantiate_signature(
    graph: &mut SymbolGraph,
    sink: &mut dyn DiagnosticSink,
    signature: SymbolId,
    args: &[SymbolId],
) -> SymbolId {
    Specializer::new(graph, sink).instantiate_signature(signature, args)
}

#[cfg(test)]
#[path = "../tests/specialize_tests.rs"]
mod tests;
