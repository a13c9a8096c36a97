//! Kind tags and flag sets for nodes, declarations and links.

use bitflags::bitflags;

bitflags! {
    /// Kind tag of a node or declaration.
    ///
    /// Single bits name concrete kinds; the `SOME_*` masks group them by
    /// capability and are what lookups filter with.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SymbolKind: u32 {
        const GLOBAL = 1 << 0;
        const PRIMITIVE = 1 << 1;
        const CONTAINER = 1 << 2;
        const CLASS = 1 << 3;
        const INTERFACE = 1 << 4;
        const DYNAMIC_MODULE = 1 << 5;
        const ENUM = 1 << 6;
        const TYPE_ALIAS = 1 << 7;
        const OBJECT_LITERAL = 1 << 8;
        const VARIABLE = 1 << 9;
        const CATCH_VARIABLE = 1 << 10;
        const PARAMETER = 1 << 11;
        const PROPERTY = 1 << 12;
        const TYPE_PARAMETER = 1 << 13;
        const FUNCTION = 1 << 14;
        const CONSTRUCTOR_METHOD = 1 << 15;
        const METHOD = 1 << 16;
        const FUNCTION_EXPRESSION = 1 << 17;
        const GET_ACCESSOR = 1 << 18;
        const SET_ACCESSOR = 1 << 19;
        const CALL_SIGNATURE = 1 << 20;
        const CONSTRUCT_SIGNATURE = 1 << 21;
        const INDEX_SIGNATURE = 1 << 22;
        const OBJECT_TYPE = 1 << 23;
        const FUNCTION_TYPE = 1 << 24;
        const CONSTRUCTOR_TYPE = 1 << 25;
        const ENUM_MEMBER = 1 << 26;
        const ERROR_TYPE = 1 << 27;
        const EXPRESSION = 1 << 28;
        const ARRAY = 1 << 29;
        const TYPE_VARIABLE = 1 << 30;
        const SCRIPT = 1 << 31;

        const SOME_FUNCTION = Self::FUNCTION.bits()
            | Self::CONSTRUCTOR_METHOD.bits()
            | Self::METHOD.bits()
            | Self::FUNCTION_EXPRESSION.bits()
            | Self::GET_ACCESSOR.bits()
            | Self::SET_ACCESSOR.bits();

        const SOME_VALUE = Self::VARIABLE.bits()
            | Self::CATCH_VARIABLE.bits()
            | Self::PARAMETER.bits()
            | Self::PROPERTY.bits()
            | Self::ENUM_MEMBER.bits()
            | Self::EXPRESSION.bits()
            | Self::SOME_FUNCTION.bits();

        const SOME_TYPE = Self::PRIMITIVE.bits()
            | Self::CONTAINER.bits()
            | Self::CLASS.bits()
            | Self::INTERFACE.bits()
            | Self::DYNAMIC_MODULE.bits()
            | Self::ENUM.bits()
            | Self::TYPE_ALIAS.bits()
            | Self::OBJECT_LITERAL.bits()
            | Self::TYPE_PARAMETER.bits()
            | Self::OBJECT_TYPE.bits()
            | Self::FUNCTION_TYPE.bits()
            | Self::CONSTRUCTOR_TYPE.bits()
            | Self::ERROR_TYPE.bits()
            | Self::ARRAY.bits()
            | Self::TYPE_VARIABLE.bits();

        const SOME_SIGNATURE = Self::CALL_SIGNATURE.bits()
            | Self::CONSTRUCT_SIGNATURE.bits()
            | Self::INDEX_SIGNATURE.bits();

        const SOME_CONTAINER = Self::CONTAINER.bits()
            | Self::DYNAMIC_MODULE.bits()
            | Self::ENUM.bits();

        const SOME_INSTANTIABLE = Self::CLASS.bits()
            | Self::INTERFACE.bits()
            | Self::OBJECT_TYPE.bits()
            | Self::FUNCTION_TYPE.bits()
            | Self::CONSTRUCTOR_TYPE.bits()
            | Self::OBJECT_LITERAL.bits()
            | Self::ARRAY.bits();
    }
}

bitflags! {
    /// Flags carried by a declaration.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeclFlags: u32 {
        const EXPORTED = 1 << 0;
        const PRIVATE = 1 << 1;
        const PUBLIC = 1 << 2;
        const AMBIENT = 1 << 3;
        const STATIC = 1 << 4;
        const OPTIONAL = 1 << 5;
        const REST = 1 << 6;
        const SIGNATURE = 1 << 7;
    }
}

bitflags! {
    /// Per-node flags that are not resolution state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SymbolFlags: u8 {
        /// Optional parameter or property.
        const OPTIONAL = 1 << 0;
        /// Rest parameter.
        const VARIADIC = 1 << 1;
        /// Created by the engine or the graph rather than from a declaration.
        const SYNTHESIZED = 1 << 2;
    }
}

/// Relationship kind of a directed link.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
    TypedAs,
    ContainedBy,
    PublicMember,
    PrivateMember,
    EnclosedType,
    Extends,
    Implements,
    CallSignature,
    ConstructSignature,
    IndexSignature,
    Parameter,
    TypeParameter,
    ReturnType,
    SpecializedTo,
    ArrayOf,
    Aliases,
    GetterFunction,
    SetterFunction,
    ContributesToExpression,
}

impl LinkKind {
    /// Value-side member links of a type.
    #[inline]
    pub const fn is_member(self) -> bool {
        matches!(self, Self::PublicMember | Self::PrivateMember)
    }

    #[inline]
    pub const fn is_signature(self) -> bool {
        matches!(
            self,
            Self::CallSignature | Self::ConstructSignature | Self::IndexSignature
        )
    }
}
