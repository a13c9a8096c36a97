//! Declarations: the link from a node back to user-authored source.
//!
//! Declarations are produced by the binder. The graph only needs three
//! things from them: where they are (for diagnostics), what encloses them
//! (for visibility and type-parameter shadowing), and a handle the checker
//! can use to re-derive the syntax.

use crate::flags::{DeclFlags, SymbolKind};
use crate::ids::{AstRef, DeclId, SymbolId};
use tsg_common::{Diagnostic, SourceLocation};

#[derive(Clone, Debug)]
pub struct Declaration {
    pub name: String,
    pub kind: SymbolKind,
    pub flags: DeclFlags,
    pub location: SourceLocation,
    pub parent: Option<DeclId>,
    pub ast: Option<AstRef>,
    /// Node this declaration is bound to.
    pub(crate) symbol: Option<SymbolId>,
    /// Diagnostics attributed to this declaration during the current pass.
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: SymbolKind, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            kind,
            flags: DeclFlags::empty(),
            location,
            parent: None,
            ast: None,
            symbol: None,
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: DeclFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: DeclId) -> Self {
        self.parent = Some(parent);
        self
    }

    #[must_use]
    pub fn with_ast(mut self, ast: AstRef) -> Self {
        self.ast = Some(ast);
        self
    }

    #[inline]
    pub fn symbol(&self) -> Option<SymbolId> {
        self.symbol
    }

    #[inline]
    pub fn has_flag(&self, flag: DeclFlags) -> bool {
        self.flags.intersects(flag)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub(crate) fn reset_errors(&mut self) {
        self.diagnostics.clear();
    }
}
