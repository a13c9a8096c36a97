//! Read-only type queries.
//!
//! Consumers such as lint rules only need to ask what type an expression or
//! declaration has and what kind of type it is. [`TypeQuery`] is that
//! surface; nothing reachable through it can mutate the graph.

use bitflags::bitflags;
use tsg_symbols::{AstRef, DeclId, SymbolGraph, SymbolId, SymbolKind, TypeCategory};

bitflags! {
    /// Coarse classification of a type.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TypeFlags: u16 {
        const ANY = 1 << 0;
        const STRING_LIKE = 1 << 1;
        const NUMBER_LIKE = 1 << 2;
        const BOOLEAN_LIKE = 1 << 3;
        const VOID_LIKE = 1 << 4;
        const NULLABLE = 1 << 5;
        const PRIMITIVE = 1 << 6;
        const OBJECT = 1 << 7;
        const TYPE_PARAMETER = 1 << 8;
        const ARRAY = 1 << 9;
        const ERROR = 1 << 10;
    }
}

pub trait TypeQuery {
    /// Type of the node a declaration is bound to.
    fn type_of_declaration(&self, decl: DeclId) -> Option<SymbolId>;

    /// Type recorded for an expression during checking.
    fn type_of_expression(&self, expr: AstRef) -> Option<SymbolId>;

    /// Whether `ty` has any of `flags`.
    fn type_has_flags(&self, ty: SymbolId, flags: TypeFlags) -> bool;

    /// Expected type at a position, if the checker recorded one.
    fn contextual_type_at(&self, position: AstRef) -> Option<SymbolId>;

    fn type_to_string(&self, ty: SymbolId) -> String;
}

/// Classify `ty`. Aliases are classified as their target; error types count
/// as `any`.
pub fn type_flags(graph: &SymbolGraph, ty: SymbolId) -> TypeFlags {
    let ty = graph.resolve_alias(ty);
    let wk = graph.well_known();
    let Some(category) = graph.type_category(ty) else {
        return TypeFlags::empty();
    };
    match category {
        TypeCategory::Error => TypeFlags::ERROR | TypeFlags::ANY,
        TypeCategory::StringConstant => TypeFlags::STRING_LIKE | TypeFlags::PRIMITIVE,
        TypeCategory::Primitive => {
            let kind = if ty == wk.any {
                TypeFlags::ANY
            } else if ty == wk.string {
                TypeFlags::STRING_LIKE
            } else if ty == wk.number {
                TypeFlags::NUMBER_LIKE
            } else if ty == wk.boolean {
                TypeFlags::BOOLEAN_LIKE
            } else if ty == wk.void {
                TypeFlags::VOID_LIKE
            } else if ty == wk.null || ty == wk.undefined {
                TypeFlags::NULLABLE
            } else {
                TypeFlags::empty()
            };
            kind | TypeFlags::PRIMITIVE
        }
        TypeCategory::TypeParameter | TypeCategory::TypeVariable => TypeFlags::TYPE_PARAMETER,
        TypeCategory::Array => TypeFlags::ARRAY | TypeFlags::OBJECT,
        // Enum values are numbers.
        TypeCategory::Container if graph.kind(ty).contains(SymbolKind::ENUM) => {
            TypeFlags::NUMBER_LIKE | TypeFlags::OBJECT
        }
        _ => TypeFlags::OBJECT,
    }
}

#[cfg(test)]
#[path = "../tests/query_tests.rs"]
mod tests;
