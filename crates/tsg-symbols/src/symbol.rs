//! Node storage.
//!
//! One concrete [`Symbol`] struct covers every node variant. What varies
//! between a class, an array, an alias or a signature is carried as data in
//! [`SymbolData`] and dispatched on by the graph, rather than through a
//! hierarchy of node types.

use crate::flags::{SymbolFlags, SymbolKind};
use crate::ids::{DeclId, LinkId, SpecializationKey, SymbolId, TypeArgumentList};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use tsg_common::Diagnostic;

/// Resolution state of a node's type information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResolutionState {
    #[default]
    Unresolved,
    Resolving,
    Resolved,
}

/// Structural category of a type node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    /// Interfaces, object literals, function and constructor types.
    Object,
    Class,
    /// Modules and namespaces.
    Container,
    Alias,
    Array,
    TypeParameter,
    /// Placeholder synthesized during inference.
    TypeVariable,
    Primitive,
    StringConstant,
    Error,
}

/// A node of the graph.
#[derive(Debug)]
pub struct Symbol {
    pub(crate) id: SymbolId,
    pub(crate) name: String,
    pub(crate) kind: SymbolKind,
    pub(crate) flags: SymbolFlags,
    pub(crate) declarations: SmallVec<[DeclId; 1]>,
    /// Generic node this one was cloned from.
    pub(crate) root: Option<SymbolId>,
    pub(crate) state: ResolutionState,
    /// Rebinding generation this node was last bound under.
    pub(crate) bound_generation: Option<u32>,
    pub(crate) being_specialized: bool,
    pub(crate) removed: bool,
    pub(crate) outgoing: Vec<LinkId>,
    pub(crate) incoming: Vec<LinkId>,
    pub(crate) data: SymbolData,
}

#[derive(Debug)]
pub enum SymbolData {
    /// Variables, properties, parameters, functions: typed through a
    /// `TypedAs` link.
    Value,
    /// Property with getter/setter links.
    Accessor,
    Type(Box<TypeInfo>),
    Signature(Box<SignatureInfo>),
}

impl Symbol {
    pub(crate) fn new(id: SymbolId, name: String, kind: SymbolKind, data: SymbolData) -> Self {
        Self {
            id,
            name,
            kind,
            flags: SymbolFlags::empty(),
            declarations: SmallVec::new(),
            root: None,
            state: ResolutionState::Unresolved,
            bound_generation: None,
            being_specialized: false,
            removed: false,
            outgoing: Vec::new(),
            incoming: Vec::new(),
            data,
        }
    }

    #[inline]
    pub fn id(&self) -> SymbolId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    #[inline]
    pub fn flags(&self) -> SymbolFlags {
        self.flags
    }

    #[inline]
    pub fn root(&self) -> Option<SymbolId> {
        self.root
    }

    #[inline]
    pub fn state(&self) -> ResolutionState {
        self.state
    }

    #[inline]
    pub fn is_being_specialized(&self) -> bool {
        self.being_specialized
    }

    #[inline]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    #[inline]
    pub fn data(&self) -> &SymbolData {
        &self.data
    }

    pub(crate) fn type_info(&self) -> Option<&TypeInfo> {
        match &self.data {
            SymbolData::Type(info) => Some(info),
            _ => None,
        }
    }

    pub(crate) fn type_info_mut(&mut self) -> Option<&mut TypeInfo> {
        match &mut self.data {
            SymbolData::Type(info) => Some(info),
            _ => None,
        }
    }

    pub(crate) fn signature_info(&self) -> Option<&SignatureInfo> {
        match &self.data {
            SymbolData::Signature(info) => Some(info),
            _ => None,
        }
    }

    pub(crate) fn signature_info_mut(&mut self) -> Option<&mut SignatureInfo> {
        match &mut self.data {
            SymbolData::Signature(info) => Some(info),
            _ => None,
        }
    }

    /// Specialization state shared by types and signatures.
    pub(crate) fn generic_state(&self) -> Option<&GenericState> {
        match &self.data {
            SymbolData::Type(info) => Some(&info.generic),
            SymbolData::Signature(info) => Some(&info.generic),
            _ => None,
        }
    }

    pub(crate) fn generic_state_mut(&mut self) -> Option<&mut GenericState> {
        match &mut self.data {
            SymbolData::Type(info) => Some(&mut info.generic),
            SymbolData::Signature(info) => Some(&mut info.generic),
            _ => None,
        }
    }
}

/// Specialization bookkeeping carried by both type and signature nodes.
#[derive(Debug, Default)]
pub struct GenericState {
    /// Arguments this clone was created for.
    pub(crate) type_arguments: Option<TypeArgumentList>,
    /// Clones keyed by argument identity. Only populated on roots.
    pub(crate) specializations: IndexMap<SpecializationKey, SymbolId>,
    /// Latch that stops invalidation from re-entering the cache walk.
    /// Reset whenever the node is freshly resolved.
    pub(crate) invalidated_specializations: bool,
}

#[derive(Debug)]
pub struct TypeInfo {
    pub(crate) category: TypeCategory,
    pub(crate) generic: GenericState,
    pub(crate) has_generic_member: bool,
    pub(crate) has_generic_signature: bool,
    /// Type parameters only.
    pub(crate) constraint: Option<SymbolId>,
    /// Type variables only.
    pub(crate) type_variable: Option<TypeVariableInfo>,
    /// Classes only.
    pub(crate) constructor_method: Option<SymbolId>,
    pub(crate) has_default_constructor: bool,
    /// Containers only.
    pub(crate) instance_symbol: Option<SymbolId>,
    pub(crate) export_assignment: ExportAssignment,
    /// Re-entrancy flag for export-assignment chain walks.
    pub(crate) in_export_walk: Cell<bool>,
    /// Value-side container this (instance) type belongs to.
    pub(crate) associated_container: Option<SymbolId>,
    /// Error types only.
    pub(crate) error: Option<ErrorTypeInfo>,
    /// String-constant types only.
    pub(crate) string_value: Option<String>,
    pub(crate) caches: TypeCaches,
}

impl TypeInfo {
    pub(crate) fn new(category: TypeCategory) -> Self {
        Self {
            category,
            generic: GenericState::default(),
            has_generic_member: false,
            has_generic_signature: false,
            constraint: None,
            type_variable: None,
            constructor_method: None,
            has_default_constructor: false,
            instance_symbol: None,
            export_assignment: ExportAssignment::default(),
            in_export_walk: Cell::new(false),
            associated_container: None,
            error: None,
            string_value: None,
            caches: TypeCaches::default(),
        }
    }

    #[inline]
    pub fn category(&self) -> TypeCategory {
        self.category
    }
}

/// Targets of a container's `export =` assignment, one per meaning.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportAssignment {
    pub value: Option<SymbolId>,
    pub type_symbol: Option<SymbolId>,
    pub container: Option<SymbolId>,
}

impl ExportAssignment {
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.type_symbol.is_none() && self.container.is_none()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeVariableInfo {
    pub id: u32,
    pub fixed: bool,
}

/// Payload of an error type.
#[derive(Clone, Debug)]
pub struct ErrorTypeInfo {
    pub diagnostic: Option<Diagnostic>,
    /// Type rendered in messages in place of the error type.
    pub delegate: Option<SymbolId>,
}

/// Lazily built indices derived from a type's links. All of them can be
/// dropped at any time and rebuilt from the links alone.
#[derive(Debug, Default)]
pub(crate) struct TypeCaches {
    pub(crate) member_by_name: RefCell<Option<FxHashMap<String, SymbolId>>>,
    pub(crate) nested_type_by_name: RefCell<Option<FxHashMap<String, SymbolId>>>,
    pub(crate) contained_members: RefCell<Option<FxHashMap<String, SmallVec<[SymbolId; 1]>>>>,
    pub(crate) call_signatures: RefCell<Option<Vec<SymbolId>>>,
    pub(crate) construct_signatures: RefCell<Option<Vec<SymbolId>>>,
    pub(crate) index_signatures: RefCell<Option<Vec<SymbolId>>>,
    pub(crate) free_type_parameters: RefCell<Option<TypeArgumentList>>,
}

impl TypeCaches {
    pub(crate) fn clear(&self) {
        self.member_by_name.replace(None);
        self.nested_type_by_name.replace(None);
        self.contained_members.replace(None);
        self.call_signatures.replace(None);
        self.construct_signatures.replace(None);
        self.index_signatures.replace(None);
        self.free_type_parameters.replace(None);
    }
}

#[derive(Debug, Default)]
pub struct SignatureInfo {
    pub(crate) generic: GenericState,
    /// Some parameter or the return type mentions a type parameter.
    pub(crate) has_generic_parameter: bool,
}
