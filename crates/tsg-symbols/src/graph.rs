//! The symbol graph arena and the node model.
//!
//! `SymbolGraph` owns every node, link and declaration of a checking
//! session. Nodes are created here (by the binder, or by the
//! specialization engine for clones) and exposed through a capability API:
//! `is_type`, `is_signature`, `is_array`, ... dispatch on the node's data
//! rather than on a type hierarchy.

use crate::declaration::Declaration;
use crate::flags::{DeclFlags, LinkKind, SymbolFlags, SymbolKind};
use crate::ids::{DeclId, SymbolId};
use crate::links::Link;
use crate::symbol::{
    ErrorTypeInfo, ResolutionState, SignatureInfo, Symbol, SymbolData, TypeCategory, TypeInfo,
    TypeVariableInfo,
};
use tracing::{debug, trace};
use tsg_common::Diagnostic;

/// Types every graph is created with.
#[derive(Clone, Copy, Debug)]
pub struct WellKnownTypes {
    pub any: SymbolId,
    pub number: SymbolId,
    pub string: SymbolId,
    pub boolean: SymbolId,
    pub void: SymbolId,
    pub null: SymbolId,
    pub undefined: SymbolId,
    /// Canonical generic `Array<T>` root.
    pub array: SymbolId,
    /// The `T` of [`Self::array`].
    pub array_element: SymbolId,
}

pub struct SymbolGraph {
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) links: Vec<Option<Link>>,
    pub(crate) declarations: Vec<Declaration>,
    generation: u32,
    next_type_variable_id: u32,
    well_known: WellKnownTypes,
}

impl Default for SymbolGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolGraph {
    pub fn new() -> Self {
        let placeholder = SymbolId(0);
        let mut graph = Self {
            symbols: Vec::new(),
            links: Vec::new(),
            declarations: Vec::new(),
            generation: 0,
            next_type_variable_id: 1,
            well_known: WellKnownTypes {
                any: placeholder,
                number: placeholder,
                string: placeholder,
                boolean: placeholder,
                void: placeholder,
                null: placeholder,
                undefined: placeholder,
                array: placeholder,
                array_element: placeholder,
            },
        };

        let any = graph.create_primitive_type("any");
        let number = graph.create_primitive_type("number");
        let string = graph.create_primitive_type("string");
        let boolean = graph.create_primitive_type("boolean");
        let void = graph.create_primitive_type("void");
        let null = graph.create_primitive_type("null");
        let undefined = graph.create_primitive_type("undefined");

        let array = graph.create_type("Array", SymbolKind::INTERFACE);
        let array_element = graph.create_type_parameter("T");
        graph.add_type_parameter(array, array_element);
        graph.add_flags(array, SymbolFlags::SYNTHESIZED);
        graph.add_flags(array_element, SymbolFlags::SYNTHESIZED);
        graph.set_resolved(array_element);
        graph.set_resolved(array);

        graph.well_known = WellKnownTypes {
            any,
            number,
            string,
            boolean,
            void,
            null,
            undefined,
            array,
            array_element,
        };
        graph
    }

    // =========================================================================
    // Arena access
    // =========================================================================

    fn alloc(&mut self, name: String, kind: SymbolKind, data: SymbolData) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        trace!(symbol = id.0, name = %name, kind = ?kind, "SymbolGraph::alloc");
        self.symbols.push(Symbol::new(id, name, kind, data));
        id
    }

    /// Panics on an id from another graph.
    #[inline]
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    #[inline]
    pub(crate) fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    #[inline]
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    #[inline]
    pub fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    #[inline]
    pub fn any_type(&self) -> SymbolId {
        self.well_known.any
    }

    #[inline]
    pub fn name(&self, id: SymbolId) -> &str {
        &self.symbol(id).name
    }

    #[inline]
    pub fn kind(&self, id: SymbolId) -> SymbolKind {
        self.symbol(id).kind
    }

    #[inline]
    pub fn flags(&self, id: SymbolId) -> SymbolFlags {
        self.symbol(id).flags
    }

    pub fn add_flags(&mut self, id: SymbolId, flags: SymbolFlags) {
        self.symbol_mut(id).flags |= flags;
    }

    #[inline]
    pub fn root(&self, id: SymbolId) -> Option<SymbolId> {
        self.symbol(id).root
    }

    /// The node itself for base nodes, its generic root for clones.
    pub fn root_or_self(&self, id: SymbolId) -> SymbolId {
        self.root(id).unwrap_or(id)
    }

    pub fn set_root(&mut self, clone: SymbolId, root: SymbolId) {
        assert!(
            self.symbol(clone).declarations.is_empty(),
            "a node with its own declarations cannot become a specialization clone"
        );
        let root = self.root_or_self(root);
        self.symbol_mut(clone).root = Some(root);
    }

    // =========================================================================
    // Rebinding generations
    // =========================================================================

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Start a new rebinding generation; every node reports unbound until
    /// bound again.
    pub fn bump_generation(&mut self) -> u32 {
        self.generation += 1;
        debug!(generation = self.generation, "SymbolGraph::bump_generation");
        self.generation
    }

    // =========================================================================
    // Node creation
    // =========================================================================

    /// Create a value node (variable, property, parameter, function, ...).
    pub fn create_symbol(&mut self, name: impl Into<String>, kind: SymbolKind) -> SymbolId {
        self.alloc(name.into(), kind, SymbolData::Value)
    }

    /// Create an interface/object/function type node.
    pub fn create_type(&mut self, name: impl Into<String>, kind: SymbolKind) -> SymbolId {
        self.create_type_with_category(name, kind, TypeCategory::Object)
    }

    pub fn create_type_with_category(
        &mut self,
        name: impl Into<String>,
        kind: SymbolKind,
        category: TypeCategory,
    ) -> SymbolId {
        self.alloc(
            name.into(),
            kind,
            SymbolData::Type(Box::new(TypeInfo::new(category))),
        )
    }

    pub fn create_class_type(&mut self, name: impl Into<String>) -> SymbolId {
        self.create_type_with_category(name, SymbolKind::CLASS, TypeCategory::Class)
    }

    /// `kind` must be one of the container kinds (module, dynamic module, enum).
    pub fn create_container_type(&mut self, name: impl Into<String>, kind: SymbolKind) -> SymbolId {
        assert!(
            SymbolKind::SOME_CONTAINER.contains(kind) && !kind.is_empty(),
            "container type created with non-container kind {kind:?}"
        );
        self.create_type_with_category(name, kind, TypeCategory::Container)
    }

    pub fn create_alias_type(&mut self, name: impl Into<String>, target: SymbolId) -> SymbolId {
        let alias =
            self.create_type_with_category(name, SymbolKind::TYPE_ALIAS, TypeCategory::Alias);
        self.connect(alias, target, LinkKind::Aliases);
        alias
    }

    pub fn create_type_parameter(&mut self, name: impl Into<String>) -> SymbolId {
        self.create_type_with_category(name, SymbolKind::TYPE_PARAMETER, TypeCategory::TypeParameter)
    }

    /// Inference placeholder; ids come from the graph-owned counter.
    pub fn create_type_variable(&mut self, name: impl Into<String>) -> SymbolId {
        let var_id = self.next_type_variable_id;
        self.next_type_variable_id += 1;
        let id =
            self.create_type_with_category(name, SymbolKind::TYPE_VARIABLE, TypeCategory::TypeVariable);
        self.add_flags(id, SymbolFlags::SYNTHESIZED);
        if let Some(info) = self.symbol_mut(id).type_info_mut() {
            info.type_variable = Some(TypeVariableInfo {
                id: var_id,
                fixed: false,
            });
        }
        id
    }

    /// Primitives are resolved by construction.
    pub fn create_primitive_type(&mut self, name: impl Into<String>) -> SymbolId {
        let id = self.create_type_with_category(name, SymbolKind::PRIMITIVE, TypeCategory::Primitive);
        self.symbol_mut(id).state = ResolutionState::Resolved;
        id
    }

    pub fn create_string_constant_type(&mut self, value: impl Into<String>) -> SymbolId {
        let value = value.into();
        let id = self.create_type_with_category(
            format!("\"{value}\""),
            SymbolKind::PRIMITIVE,
            TypeCategory::StringConstant,
        );
        let symbol = self.symbol_mut(id);
        symbol.state = ResolutionState::Resolved;
        if let Some(info) = symbol.type_info_mut() {
            info.string_value = Some(value);
        }
        id
    }

    /// Error types are permanently unresolved and behave as `any`.
    pub fn create_error_type(
        &mut self,
        diagnostic: Option<Diagnostic>,
        delegate: Option<SymbolId>,
    ) -> SymbolId {
        let id = self.create_type_with_category("error", SymbolKind::ERROR_TYPE, TypeCategory::Error);
        if let Some(info) = self.symbol_mut(id).type_info_mut() {
            info.error = Some(ErrorTypeInfo {
                diagnostic,
                delegate,
            });
        }
        id
    }

    /// `kind` is one of the signature kinds.
    pub fn create_signature(&mut self, kind: SymbolKind) -> SymbolId {
        assert!(
            SymbolKind::SOME_SIGNATURE.contains(kind) && !kind.is_empty(),
            "signature created with non-signature kind {kind:?}"
        );
        self.alloc(
            String::new(),
            kind,
            SymbolData::Signature(Box::default()),
        )
    }

    pub fn create_accessor(&mut self, name: impl Into<String>) -> SymbolId {
        self.alloc(name.into(), SymbolKind::PROPERTY, SymbolData::Accessor)
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    #[inline]
    pub fn type_category(&self, id: SymbolId) -> Option<TypeCategory> {
        self.symbol(id).type_info().map(TypeInfo::category)
    }

    #[inline]
    pub fn is_type(&self, id: SymbolId) -> bool {
        matches!(self.symbol(id).data, SymbolData::Type(_))
    }

    #[inline]
    pub fn is_signature(&self, id: SymbolId) -> bool {
        matches!(self.symbol(id).data, SymbolData::Signature(_))
    }

    #[inline]
    pub fn is_accessor(&self, id: SymbolId) -> bool {
        matches!(self.symbol(id).data, SymbolData::Accessor)
    }

    #[inline]
    pub fn is_array(&self, id: SymbolId) -> bool {
        self.type_category(id) == Some(TypeCategory::Array)
    }

    #[inline]
    pub fn is_class(&self, id: SymbolId) -> bool {
        self.type_category(id) == Some(TypeCategory::Class)
    }

    #[inline]
    pub fn is_container(&self, id: SymbolId) -> bool {
        self.type_category(id) == Some(TypeCategory::Container)
    }

    #[inline]
    pub fn is_alias(&self, id: SymbolId) -> bool {
        self.type_category(id) == Some(TypeCategory::Alias)
    }

    #[inline]
    pub fn is_type_parameter(&self, id: SymbolId) -> bool {
        self.type_category(id) == Some(TypeCategory::TypeParameter)
    }

    #[inline]
    pub fn is_type_variable(&self, id: SymbolId) -> bool {
        self.type_category(id) == Some(TypeCategory::TypeVariable)
    }

    /// Primitive and string-constant types.
    #[inline]
    pub fn is_primitive(&self, id: SymbolId) -> bool {
        matches!(
            self.type_category(id),
            Some(TypeCategory::Primitive | TypeCategory::StringConstant)
        )
    }

    #[inline]
    pub fn is_string_constant(&self, id: SymbolId) -> bool {
        self.type_category(id) == Some(TypeCategory::StringConstant)
    }

    #[inline]
    pub fn is_error(&self, id: SymbolId) -> bool {
        self.type_category(id) == Some(TypeCategory::Error)
    }

    #[inline]
    pub fn is_any(&self, id: SymbolId) -> bool {
        id == self.well_known.any
    }

    #[inline]
    pub fn is_function(&self, id: SymbolId) -> bool {
        self.kind(id).intersects(SymbolKind::SOME_FUNCTION)
    }

    /// Payload of an error type.
    pub fn error_info(&self, id: SymbolId) -> Option<&ErrorTypeInfo> {
        self.symbol(id).type_info().and_then(|info| info.error.as_ref())
    }

    pub fn string_constant_value(&self, id: SymbolId) -> Option<&str> {
        self.symbol(id)
            .type_info()
            .and_then(|info| info.string_value.as_deref())
    }

    pub fn type_variable_info(&self, id: SymbolId) -> Option<TypeVariableInfo> {
        self.symbol(id).type_info().and_then(|info| info.type_variable)
    }

    /// Mark an inference placeholder as fixed.
    pub fn fix_type_variable(&mut self, id: SymbolId) {
        if let Some(var) = self
            .symbol_mut(id)
            .type_info_mut()
            .and_then(|info| info.type_variable.as_mut())
        {
            var.fixed = true;
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Register a declaration that is not (yet) bound to a node, e.g. a
    /// script or a parent scope.
    pub fn declare(&mut self, declaration: Declaration) -> DeclId {
        let id = DeclId(self.declarations.len() as u32);
        self.declarations.push(declaration);
        id
    }

    #[inline]
    pub fn declaration(&self, id: DeclId) -> &Declaration {
        &self.declarations[id.index()]
    }

    /// Attach a declaration to a base node.
    ///
    /// Specialization clones delegate declarations to their root and
    /// reject new ones.
    pub fn add_declaration(&mut self, symbol: SymbolId, decl: DeclId) {
        assert!(
            self.symbol(symbol).root.is_none(),
            "cannot add a declaration to specialization clone {symbol:?}"
        );
        let symbol_data = self.symbol_mut(symbol);
        if !symbol_data.declarations.contains(&decl) {
            symbol_data.declarations.push(decl);
        }
        self.declarations[decl.index()].symbol = Some(symbol);
    }

    /// Declarations of the node, delegated to the root for clones.
    pub fn declarations(&self, symbol: SymbolId) -> &[DeclId] {
        let owner = self.root_or_self(symbol);
        &self.symbol(owner).declarations
    }

    pub fn first_declaration(&self, symbol: SymbolId) -> Option<&Declaration> {
        self.declarations(symbol)
            .first()
            .map(|&decl| self.declaration(decl))
    }

    pub fn any_declaration_has_flag(&self, symbol: SymbolId, flag: DeclFlags) -> bool {
        self.declarations(symbol)
            .iter()
            .any(|&decl| self.declaration(decl).has_flag(flag))
    }

    /// Detach a declaration. Removing the last declaration of a base node
    /// removes the node from the graph.
    pub fn remove_declaration(&mut self, symbol: SymbolId, decl: DeclId) {
        let owner = self.symbol_mut(symbol);
        let before = owner.declarations.len();
        owner.declarations.retain(|d| *d != decl);
        if owner.declarations.len() == before {
            return;
        }
        self.declarations[decl.index()].symbol = None;
        debug!(symbol = symbol.0, decl = decl.0, "SymbolGraph::remove_declaration");

        if self.symbol(symbol).declarations.is_empty() && self.symbol(symbol).root.is_none() {
            self.remove_symbol(symbol);
        }
    }

    pub fn record_declaration_diagnostic(&mut self, decl: DeclId, diagnostic: Diagnostic) {
        self.declarations[decl.index()].add_diagnostic(diagnostic);
    }

    /// Sever every link of a node and tombstone it.
    pub fn remove_symbol(&mut self, symbol: SymbolId) {
        debug!(symbol = symbol.0, "SymbolGraph::remove_symbol");
        let mut all: Vec<_> = self.symbol(symbol).outgoing.clone();
        all.extend(self.symbol(symbol).incoming.iter().copied());
        for link in all {
            self.disconnect(link);
        }
        let node = self.symbol_mut(symbol);
        node.removed = true;
        node.state = ResolutionState::Unresolved;
        node.bound_generation = None;
        if let Some(generic) = node.generic_state_mut() {
            generic.specializations.clear();
        }
        if let Some(info) = node.type_info() {
            info.caches.clear();
        }
    }

    // =========================================================================
    // Types of values
    // =========================================================================

    /// Set the type of a value node.
    ///
    /// Type nodes are their own type; setting one is a binder bug.
    pub fn set_type(&mut self, symbol: SymbolId, ty: SymbolId) {
        assert!(
            !self.is_type(symbol),
            "cannot set the type of type node {symbol:?} to {ty:?}"
        );
        for link in self.outgoing_links(symbol, LinkKind::TypedAs) {
            self.disconnect(link);
        }
        self.connect(symbol, ty, LinkKind::TypedAs);

        if self.mentions_type_parameters(ty) {
            self.note_generic_value(symbol);
        }
        for container in self.outgoing_targets(symbol, LinkKind::ContainedBy) {
            if let Some(info) = self.symbol(container).type_info() {
                info.caches.free_type_parameters.replace(None);
            }
        }
    }

    /// Type nodes are their own type.
    pub fn type_of(&self, symbol: SymbolId) -> Option<SymbolId> {
        if self.is_type(symbol) {
            return Some(symbol);
        }
        self.first_target(symbol, LinkKind::TypedAs)
    }
}

#[cfg(test)]
#[path = "../tests/graph_tests.rs"]
mod tests;
