//! Qualified and display names.

use crate::flags::SymbolKind;
use crate::format::TypeFormatter;
use crate::graph::SymbolGraph;
use crate::ids::SymbolId;
use smallvec::SmallVec;

fn is_quoted(name: &str) -> bool {
    name.len() >= 2
        && ((name.starts_with('"') && name.ends_with('"'))
            || (name.starts_with('\'') && name.ends_with('\'')))
}

impl SymbolGraph {
    /// The node followed by its chain of containers, outermost last. Types
    /// that belong to a module's value side are replaced by that module;
    /// parameters end the chain.
    pub fn path_to_root(&self, symbol: SymbolId) -> SmallVec<[SymbolId; 8]> {
        let mut path: SmallVec<[SymbolId; 8]> = SmallVec::new();
        let mut node = Some(symbol);
        while let Some(mut current) = node {
            if self.is_type(current) {
                if let Some(associated) = self.associated_container(current) {
                    current = associated;
                }
            }
            if path.contains(&current) {
                break;
            }
            path.push(current);
            if self.kind(current).contains(SymbolKind::PARAMETER) {
                break;
            }
            node = self.container(current);
        }
        path
    }

    /// Dotted name of `symbol` relative to `scope`, without type arguments.
    ///
    /// Qualification stops at `scope`, at aliases, at script/global nodes,
    /// and at dynamic modules whose name is not quoted.
    pub fn scoped_path(&self, symbol: SymbolId, scope: Option<SymbolId>) -> String {
        let path = self.path_to_root(symbol);
        let mut segments: SmallVec<[&str; 8]> = SmallVec::new();
        segments.push(self.name(path[0]));
        for &ancestor in path.iter().skip(1) {
            if Some(ancestor) == scope || self.is_alias(ancestor) {
                break;
            }
            let kind = self.kind(ancestor);
            if kind.intersects(SymbolKind::SCRIPT | SymbolKind::GLOBAL) {
                break;
            }
            let name = self.name(ancestor);
            if name.is_empty() {
                break;
            }
            if kind.contains(SymbolKind::DYNAMIC_MODULE) && !is_quoted(name) {
                break;
            }
            segments.push(name);
        }
        segments.reverse();
        segments.join(".")
    }

    /// Qualified name with a rendered type argument (or parameter) list.
    pub fn scoped_name(
        &self,
        symbol: SymbolId,
        scope: Option<SymbolId>,
        skip_type_parameters: bool,
        use_constraint: bool,
    ) -> String {
        let owner = self.root_or_self(symbol);
        let mut name = self.scoped_path(owner, scope);
        if skip_type_parameters {
            return name;
        }
        let mut formatter = TypeFormatter::new(self)
            .with_scope(scope)
            .with_constraints(use_constraint);
        if let Some(args) = self.type_arguments(symbol) {
            if !args.is_empty() {
                name.push_str(&formatter.format_argument_list(args));
            }
        } else {
            let params = self.type_parameters(symbol);
            if !params.is_empty() {
                name.push_str(&formatter.format_parameter_list(&params));
            }
        }
        name
    }

    pub fn full_name(&self, symbol: SymbolId) -> String {
        self.scoped_name(symbol, None, false, false)
    }

    /// Unqualified name with type arguments; used in diagnostics that
    /// already establish the scope.
    pub fn display_name(&self, symbol: SymbolId) -> String {
        let owner = self.root_or_self(symbol);
        let mut name = self.name(owner).to_string();
        let mut formatter = TypeFormatter::new(self);
        if let Some(args) = self.type_arguments(symbol) {
            if !args.is_empty() {
                name.push_str(&formatter.format_argument_list(args));
            }
        } else {
            let params = self.type_parameters(symbol);
            if !params.is_empty() {
                name.push_str(&formatter.format_parameter_list(&params));
            }
        }
        name
    }

    /// Render any node as a type string.
    pub fn type_to_string(&self, ty: SymbolId) -> String {
        TypeFormatter::new(self).format(ty)
    }
}

#[cfg(test)]
#[path = "../tests/naming_tests.rs"]
mod tests;
