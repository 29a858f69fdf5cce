//! Node labels of the flang parse-tree dump
//!
//! The dump prints C++ parse-tree class names (`TypeDeclarationStmt`,
//! `ArrayElement`, ...). Labels are matched case-insensitively with `-` and `_`
//! ignored, so `array-element`, `Array_Element` and `ArrayElement` are one tag.
//! Anything not listed here is kept as [`Tag::Other`] and passed through.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

macro_rules! define_tags {
    ($($variant:ident),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum Tag {
            $($variant,)*
            Other(String),
        }

        impl Tag {
            pub fn as_str(&self) -> &str {
                match self {
                    $(Tag::$variant => stringify!($variant),)*
                    Tag::Other(text) => text,
                }
            }
        }

        static TAGS: Lazy<HashMap<String, Tag>> = Lazy::new(|| {
            let mut map = HashMap::new();
            $(map.insert(normalize(stringify!($variant)), Tag::$variant);)*
            map
        });
    };
}

define_tags! {
    // Program structure
    Program,
    ProgramUnit,
    Module,
    ModuleStmt,
    MainProgram,
    ProgramStmt,
    SubroutineSubprogram,
    FunctionSubprogram,
    SubroutineStmt,
    FunctionStmt,
    Subroutine,
    Function,
    DummyArg,
    Suffix,
    PrefixSpec,
    Elemental,
    Pure,
    Recursive,
    ModuleSubprogramPart,
    ModuleSubprogram,
    InternalSubprogramPart,
    InternalSubprogram,
    SpecificationPart,
    ExecutionPart,
    Name,

    // USE and accessibility
    UseStmt,
    ModuleNature,
    Only,
    Rename,
    Names,
    GenericSpec,
    DefinedOperator,
    IntrinsicOperator,
    DefinedOpName,
    Assignment,
    AccessStmt,
    AccessSpec,
    AccessId,
    Kind,

    // Declarations
    TypeDeclarationStmt,
    DeclarationTypeSpec,
    IntrinsicTypeSpec,
    IntegerTypeSpec,
    Real,
    DoublePrecision,
    Complex,
    Logical,
    Character,
    Type,
    Class,
    ClassStar,
    TypeStar,
    DerivedTypeSpec,
    KindSelector,
    AttrSpec,
    Optional,
    IntentSpec,
    Intent,
    ArraySpec,
    ExplicitShapeSpec,
    AssumedShapeSpec,
    DeferredShapeSpecList,
    AssumedSizeSpec,
    AssumedRankSpec,
    ImpliedShapeSpec,
    Int,
    EntityDecl,
    OptionalStmt,
    IntentStmt,
    DimensionStmt,
    Declaration,

    // Derived types
    DerivedTypeDef,
    DerivedTypeStmt,
    TypeAttrSpec,
    Extends,
    Abstract,
    ComponentDefStmt,
    DataComponentDefStmt,
    ComponentAttrSpec,
    ComponentArraySpec,
    ComponentDecl,

    // Interfaces
    InterfaceBlock,
    InterfaceStmt,
    InterfaceSpecification,
    InterfaceBody,
    ProcedureStmt,

    // Calls and expressions
    CallStmt,
    Call,
    ProcedureDesignator,
    ProcComponentRef,
    ActualArgSpec,
    Keyword,
    ActualArg,
    Expr,
    Designator,
    DataRef,
    ArrayElement,
    StructureComponent,
    Substring,
    SectionSubscript,
    SubscriptTriplet,
    Integer,
    FunctionReference,
    LiteralConstant,
    IntLiteralConstant,
    RealLiteralConstant,
    LogicalLiteralConstant,
    CharLiteralConstant,
    ComplexLiteralConstant,
    BOZLiteralConstant,
    ArrayConstructor,
}

impl Tag {
    pub fn parse(text: &str) -> Tag {
        TAGS.get(&normalize(text))
            .cloned()
            .unwrap_or_else(|| Tag::Other(text.to_string()))
    }

    pub fn is_other(&self) -> bool {
        matches!(self, Tag::Other(_))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
