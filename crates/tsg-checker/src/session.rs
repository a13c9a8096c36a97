//! Checking session: owns the graph for one checking pass.
//!
//! The session is the single owner of a [`SymbolGraph`], so two sessions
//! never share node ids, type-variable counters or caches. It collects the
//! diagnostics the engine posts, remembers the types the checker computed
//! for expressions and positions, and answers [`TypeQuery`] requests.

use crate::options::CheckerOptions;
use crate::query::{TypeFlags, TypeQuery, type_flags};
use rustc_hash::FxHashMap;
use tracing::debug;
use tsg_common::Diagnostic;
use tsg_solver::Specializer;
use tsg_symbols::{AstRef, DeclId, LinkKind, SymbolGraph, SymbolId, SymbolKind};

pub struct CheckerSession {
    graph: SymbolGraph,
    diagnostics: Vec<Diagnostic>,
    options: CheckerOptions,
    /// Expression node per syntax position. The node's type is the
    /// expression's type; contributing symbols link to it.
    expression_nodes: FxHashMap<AstRef, SymbolId>,
    contextual_types: FxHashMap<AstRef, SymbolId>,
}

impl Default for CheckerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerSession {
    pub fn new() -> Self {
        Self::with_options(CheckerOptions::default())
    }

    pub fn with_options(options: CheckerOptions) -> Self {
        Self {
            graph: SymbolGraph::new(),
            diagnostics: Vec::new(),
            options,
            expression_nodes: FxHashMap::default(),
            contextual_types: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn graph(&self) -> &SymbolGraph {
        &self.graph
    }

    /// Mutable access for the binder side.
    #[inline]
    pub fn graph_mut(&mut self) -> &mut SymbolGraph {
        &mut self.graph
    }

    #[inline]
    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn diagnostics_to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.diagnostics)
    }

    /// Start a new pass: every node reports unbound until the binder
    /// touches it again, and per-pass expression data is dropped.
    pub fn begin_pass(&mut self) -> u32 {
        let generation = self.graph.bump_generation();
        self.expression_nodes.clear();
        self.contextual_types.clear();
        debug!(generation, "CheckerSession::begin_pass");
        generation
    }

    // =========================================================================
    // Specialization
    // =========================================================================

    /// Engine bound to this session's graph and diagnostic list.
    pub fn specializer(&mut self) -> Specializer<'_> {
        let options = self.options.specialization_options();
        Specializer::with_options(&mut self.graph, &mut self.diagnostics, options)
    }

    pub fn specialize_type(&mut self, ty: SymbolId, args: Option<&[SymbolId]>) -> SymbolId {
        self.specializer().specialize_type(ty, args)
    }

    pub fn specialize_type_to_any(&mut self, ty: SymbolId) -> SymbolId {
        self.specializer().specialize_type_to_any(ty)
    }

    pub fn instantiate_signature(&mut self, signature: SymbolId, args: &[SymbolId]) -> SymbolId {
        self.specializer().instantiate_signature(signature, args)
    }

    pub fn array_of(&mut self, element: SymbolId) -> SymbolId {
        self.specializer().array_of(element)
    }

    // =========================================================================
    // Expression and contextual types
    // =========================================================================

    /// Record the type computed for an expression, and the symbols whose
    /// types it was derived from. Re-recording replaces both.
    pub fn record_expression_type(
        &mut self,
        expr: AstRef,
        ty: SymbolId,
        contributors: &[SymbolId],
    ) -> SymbolId {
        let node = match self.expression_nodes.get(&expr) {
            Some(&node) => {
                for source in self.graph.incoming_sources(node, LinkKind::ContributesToExpression) {
                    self.graph
                        .disconnect_between(source, node, LinkKind::ContributesToExpression);
                }
                node
            }
            None => {
                let node = self.graph.create_symbol("", SymbolKind::EXPRESSION);
                self.expression_nodes.insert(expr, node);
                node
            }
        };
        self.graph.set_type(node, ty);
        for &contributor in contributors {
            self.graph
                .connect(contributor, node, LinkKind::ContributesToExpression);
        }
        self.graph.set_resolved(node);
        debug!(expr = expr.0, node = node.0, ty = ty.0, "record_expression_type");
        node
    }

    /// Symbols an expression's recorded type was derived from.
    pub fn expression_contributors(&self, expr: AstRef) -> Vec<SymbolId> {
        self.expression_nodes
            .get(&expr)
            .map(|&node| {
                self.graph
                    .incoming_sources(node, LinkKind::ContributesToExpression)
                    .into_vec()
            })
            .unwrap_or_default()
    }

    pub fn record_contextual_type(&mut self, position: AstRef, ty: SymbolId) {
        self.contextual_types.insert(position, ty);
    }

    /// Invalidate `symbol` and forget the expression types it contributed
    /// to, so they are recomputed.
    pub fn invalidate(&mut self, symbol: SymbolId) {
        let stale = self
            .graph
            .outgoing_targets(symbol, LinkKind::ContributesToExpression);
        self.graph.invalidate(symbol);
        for node in stale {
            self.graph.set_unresolved(node);
        }
    }
}

impl TypeQuery for CheckerSession {
    fn type_of_declaration(&self, decl: DeclId) -> Option<SymbolId> {
        let symbol = self.graph.declaration(decl).symbol()?;
        self.graph.type_of(symbol)
    }

    /// Expressions whose contributors were invalidated report no type
    /// until recorded again.
    fn type_of_expression(&self, expr: AstRef) -> Option<SymbolId> {
        let node = *self.expression_nodes.get(&expr)?;
        if !self.graph.is_resolved(node) {
            return None;
        }
        self.graph.type_of(node)
    }

    fn type_has_flags(&self, ty: SymbolId, flags: TypeFlags) -> bool {
        type_flags(&self.graph, ty).intersects(flags)
    }

    fn contextual_type_at(&self, position: AstRef) -> Option<SymbolId> {
        self.contextual_types.get(&position).copied()
    }

    fn type_to_string(&self, ty: SymbolId) -> String {
        self.graph.type_to_string(ty)
    }
}
