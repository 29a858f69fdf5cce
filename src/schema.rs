//! Graph data model: program units, argument descriptors, call sites and edges
//!
//! Everything here is plain data owned by the [`NodeRegistry`](crate::registry::NodeRegistry)
//! or the [`CodeGraph`](crate::graph::CodeGraph). Relationships are stored as
//! [`EntityId`] pairs so that cyclic module dependencies are ordinary data.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use crate::diagnostics::Diagnostic;

/// Current schema version for serialized graphs
pub const SCHEMA_VERSION: &str = "1.0";

// FNV-1a constants for 64-bit hash
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Compute a stable FNV-1a hash (deterministic across runs and platforms)
///
/// Used for generating entity identities that do not depend on ingestion order.
pub fn fnv1a_hash(data: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in data.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Stable identity of a program unit
///
/// Derived from `kind:qualified_name`, so the same unit gets the same id in a
/// file-local graph and in any merged graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub fn for_unit(kind: UnitKind, qualified_name: &str) -> Self {
        Self(fnv1a_hash(&format!("{}:{}", kind.as_str(), qualified_name)))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Kind of a program unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Module,
    Program,
    Subroutine,
    Function,
    Interface,
    DerivedType,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitKind::Module => "module",
            UnitKind::Program => "program",
            UnitKind::Subroutine => "subroutine",
            UnitKind::Function => "function",
            UnitKind::Interface => "interface",
            UnitKind::DerivedType => "derived_type",
        }
    }

    /// Subroutines and functions: the things a call can land on
    pub fn is_procedure(&self) -> bool {
        matches!(self, UnitKind::Subroutine | UnitKind::Function)
    }

    /// Whether two kinds may legally share a qualified name.
    ///
    /// A generic interface may be named like one of its specific procedures,
    /// or like a derived type whose structure constructor it overrides.
    pub fn may_share_name_with(&self, other: UnitKind) -> bool {
        match (*self, other) {
            (UnitKind::Interface, k) | (k, UnitKind::Interface) => matches!(
                k,
                UnitKind::Subroutine | UnitKind::Function | UnitKind::DerivedType
            ),
            _ => false,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a variable, dummy argument or expression
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Integer,
    /// REAL and DOUBLE PRECISION; kinds never take part in matching
    Real,
    Complex,
    Logical,
    Character,
    Derived(String),
    /// CLASS(name), or CLASS(*) when `None`
    Class(Option<String>),
    #[default]
    Unknown,
}

impl DataType {
    pub fn is_known(&self) -> bool {
        !matches!(self, DataType::Unknown)
    }

    /// Whether a dummy of this type accepts an actual argument of type `actual`.
    ///
    /// Unknown on either side accepts.
    pub fn accepts(&self, actual: &DataType) -> bool {
        match (self, actual) {
            (DataType::Unknown, _) | (_, DataType::Unknown) => true,
            (DataType::Class(None), _) => true,
            (DataType::Class(Some(_)), DataType::Derived(_) | DataType::Class(_)) => true,
            (dummy, actual) => dummy == actual,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Integer => f.write_str("integer"),
            DataType::Real => f.write_str("real"),
            DataType::Complex => f.write_str("complex"),
            DataType::Logical => f.write_str("logical"),
            DataType::Character => f.write_str("character"),
            DataType::Derived(name) => write!(f, "type({})", name),
            DataType::Class(Some(name)) => write!(f, "class({})", name),
            DataType::Class(None) => f.write_str("class(*)"),
            DataType::Unknown => f.write_str("unknown"),
        }
    }
}

/// Array rank; `Known(0)` is a scalar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Known(u32),
    #[default]
    Unknown,
}

impl Rank {
    pub const SCALAR: Rank = Rank::Known(0);

    pub fn is_known(&self) -> bool {
        matches!(self, Rank::Known(_))
    }

    /// Exact match when both sides are known, otherwise compatible
    pub fn compatible(&self, other: &Rank) -> bool {
        match (self, other) {
            (Rank::Known(a), Rank::Known(b)) => a == b,
            _ => true,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Known(r) => write!(f, "{}", r),
            Rank::Unknown => f.write_str("?"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    In,
    Out,
    InOut,
}

impl Intent {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "in" => Some(Intent::In),
            "out" => Some(Intent::Out),
            "inout" | "in_out" | "in out" => Some(Intent::InOut),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Private,
}

/// A declared entity of a scope (local variable, dummy, module variable)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub rank: Rank,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
}

impl VariableDecl {
    /// A scalar of unknown type; statements refine it as they are seen
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rank: Rank::SCALAR,
            ..Default::default()
        }
    }

    pub fn is_array(&self) -> bool {
        self.rank != Rank::SCALAR
    }
}

/// Dummy argument of a subprogram
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArgumentDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub rank: Rank,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

impl ArgumentDescriptor {
    /// A dummy with no declaration in the subprogram's specification part
    pub fn undeclared(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl From<&VariableDecl> for ArgumentDescriptor {
    fn from(decl: &VariableDecl) -> Self {
        Self {
            name: decl.name.clone(),
            ty: decl.ty.clone(),
            kind: decl.kind.clone(),
            rank: decl.rank,
            optional: decl.optional,
            intent: decl.intent,
        }
    }
}

/// Data component of a derived type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub rank: Rank,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProcedureFlags {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub elemental: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pure: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub recursive: bool,
}

/// Ordered dummy list plus prefix flags of a subroutine or function
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signature {
    pub args: Vec<ArgumentDescriptor>,
    #[serde(default)]
    pub flags: ProcedureFlags,
}

impl Signature {
    pub fn total(&self) -> usize {
        self.args.len()
    }

    pub fn required(&self) -> usize {
        self.args.iter().filter(|a| !a.optional).count()
    }

    pub fn arg_names(&self) -> Vec<&str> {
        self.args.iter().map(|a| a.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub default_access: Access,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub public: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub private: BTreeSet<String>,
    /// `USE, INTRINSIC ::` module (iso_c_binding and friends)
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub intrinsic: bool,
}

impl ModuleInfo {
    pub fn is_public(&self, name: &str) -> bool {
        if self.private.contains(name) {
            return false;
        }
        if self.public.contains(name) {
            return true;
        }
        self.default_access == Access::Public
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub signature: Signature,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    pub result_type: DataType,
    pub result_rank: Rank,
}

/// Procedure listed by an interface block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceMember {
    pub name: String,
    /// Resolved procedure; `None` while the procedure is not in the registry
    pub target: Option<EntityId>,
    /// Declared by an interface body rather than a MODULE PROCEDURE statement
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub body: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InterfaceInfo {
    /// Generic spec as written: a name, `operator(+)` or `assignment(=)`
    pub generic: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_abstract: bool,
    pub members: Vec<InterfaceMember>,
}

impl InterfaceInfo {
    pub fn resolved_members(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.members.iter().filter_map(|m| m.target)
    }

    pub fn has_unresolved(&self) -> bool {
        self.members.iter().any(|m| m.target.is_none())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DerivedTypeInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,
    pub components: Vec<ComponentDescriptor>,
}

/// Kind-specific payload of a program unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitPayload {
    Module(ModuleInfo),
    Program,
    Subroutine(Signature),
    Function(FunctionInfo),
    Interface(InterfaceInfo),
    DerivedType(DerivedTypeInfo),
}

impl UnitPayload {
    pub fn empty(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Module => UnitPayload::Module(ModuleInfo::default()),
            UnitKind::Program => UnitPayload::Program,
            UnitKind::Subroutine => UnitPayload::Subroutine(Signature::default()),
            UnitKind::Function => UnitPayload::Function(FunctionInfo::default()),
            UnitKind::Interface => UnitPayload::Interface(InterfaceInfo::default()),
            UnitKind::DerivedType => UnitPayload::DerivedType(DerivedTypeInfo::default()),
        }
    }

    pub fn kind(&self) -> UnitKind {
        match self {
            UnitPayload::Module(_) => UnitKind::Module,
            UnitPayload::Program => UnitKind::Program,
            UnitPayload::Subroutine(_) => UnitKind::Subroutine,
            UnitPayload::Function(_) => UnitKind::Function,
            UnitPayload::Interface(_) => UnitKind::Interface,
            UnitPayload::DerivedType(_) => UnitKind::DerivedType,
        }
    }

    pub fn signature(&self) -> Option<&Signature> {
        match self {
            UnitPayload::Subroutine(sig) => Some(sig),
            UnitPayload::Function(info) => Some(&info.signature),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    /// Line in the dump file
    pub line: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// A module, program, subprogram, interface or derived type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramUnit {
    pub id: EntityId,
    pub name: String,
    pub qualified_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    /// False for a module only known from USE statements
    pub defined: bool,
    /// Losing side of a name/kind conflict; excluded from name lookup
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub shadow: bool,
    pub payload: UnitPayload,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub variables: BTreeMap<String, VariableDecl>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

impl ProgramUnit {
    pub fn new(id: EntityId, kind: UnitKind, qualified_name: &str, parent: Option<EntityId>) -> Self {
        let name = qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(qualified_name)
            .to_string();
        Self {
            id,
            name,
            qualified_name: qualified_name.to_string(),
            parent,
            location: None,
            defined: false,
            shadow: false,
            payload: UnitPayload::empty(kind),
            variables: BTreeMap::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn kind(&self) -> UnitKind {
        self.payload.kind()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.payload.signature()
    }

    pub fn source_file(&self) -> Option<&PathBuf> {
        self.location.as_ref().map(|l| &l.file)
    }
}

/// `local => remote` pair of an ONLY list or rename list
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UseName {
    pub local: String,
    pub remote: String,
}

impl UseName {
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            local: name.clone(),
            remote: name,
        }
    }
}

/// USE statement: scope unit → module
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UseEdge {
    pub from: EntityId,
    pub to: EntityId,
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only: Option<Vec<UseName>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub renames: Vec<UseName>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub intrinsic: bool,
    /// Entities the using module republishes with an explicit PUBLIC statement
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub reexport: bool,
    pub location: SourceLocation,
}

impl UseEdge {
    /// Name in the used module that `local` refers to through this clause
    pub fn remote_name<'a>(&'a self, local: &'a str) -> Option<&'a str> {
        if let Some(only) = &self.only {
            return only
                .iter()
                .find(|n| n.local == local)
                .map(|n| n.remote.as_str());
        }
        if let Some(rename) = self.renames.iter().find(|n| n.local == local) {
            return Some(rename.remote.as_str());
        }
        // A renamed entity is no longer visible under its original name
        if self.renames.iter().any(|n| n.remote == local) {
            return None;
        }
        Some(local)
    }
}

/// Syntactic form of a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallForm {
    /// CALL statement
    Call,
    /// Function reference inside an expression
    FunctionReference,
    /// `call obj%proc(...)`; the binding is never resolved here
    TypeBound,
}

/// One subscript of a subscripted name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subscript {
    /// `lo:hi:stride` with any part omitted
    Triplet,
    /// A bare name: a scalar index, or a vector subscript when it names an array
    Name(String),
    /// Array constructor used as vector subscript
    ArrayValued,
    Scalar,
}

/// Syntactic shape of an actual argument, kept so descriptors can be
/// recomputed against a merged registry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentExpr {
    Name(String),
    Subscripted {
        base: String,
        subscripts: Vec<Subscript>,
        /// Rendered by the front end as a function reference
        call_shaped: bool,
    },
    Component {
        field: String,
    },
    Literal(DataType),
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActualArgument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    pub expr: ArgumentExpr,
}

impl ActualArgument {
    pub fn positional(expr: ArgumentExpr) -> Self {
        Self {
            keyword: None,
            expr,
        }
    }

    pub fn keyword(keyword: impl Into<String>, expr: ArgumentExpr) -> Self {
        Self {
            keyword: Some(keyword.into()),
            expr,
        }
    }
}

/// Unresolved seed of a Calls edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallSite {
    pub caller: EntityId,
    /// Callee name as written (`%proc` for type-bound calls)
    pub callee: String,
    pub form: CallForm,
    pub arguments: Vec<ActualArgument>,
    pub location: SourceLocation,
}

impl CallSite {
    /// Canonical ordering key for call edges
    pub fn sort_key(&self) -> (EntityId, &PathBuf, usize, &str) {
        (
            self.caller,
            &self.location.file,
            self.location.line,
            self.callee.as_str(),
        )
    }
}

/// Minimal syntactic shape of an argument, enough for resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum ExpressionDescriptor {
    NamedVariable {
        name: String,
        #[serde(rename = "type")]
        ty: DataType,
        rank: Rank,
    },
    ArrayElementOrSlice {
        base: String,
        base_type: DataType,
        base_rank: Rank,
        scalar_subscripts: u32,
        array_subscripts: u32,
    },
    StructureComponent {
        field: String,
    },
    Literal {
        #[serde(rename = "type")]
        ty: DataType,
    },
    Unclassified,
}

impl ExpressionDescriptor {
    pub fn data_type(&self) -> DataType {
        match self {
            ExpressionDescriptor::NamedVariable { ty, .. } => ty.clone(),
            ExpressionDescriptor::ArrayElementOrSlice { base_type, .. } => base_type.clone(),
            ExpressionDescriptor::Literal { ty } => ty.clone(),
            ExpressionDescriptor::StructureComponent { .. } | ExpressionDescriptor::Unclassified => {
                DataType::Unknown
            }
        }
    }

    /// Rank of the argument value. A section keeps one dimension per triplet
    /// or vector subscript; each scalar subscript drops one.
    pub fn rank(&self) -> Rank {
        match self {
            ExpressionDescriptor::NamedVariable { rank, .. } => *rank,
            ExpressionDescriptor::ArrayElementOrSlice {
                base_rank,
                scalar_subscripts,
                ..
            } => match base_rank {
                Rank::Known(r) => r
                    .checked_sub(*scalar_subscripts)
                    .map(Rank::Known)
                    .unwrap_or(Rank::Unknown),
                Rank::Unknown => Rank::Unknown,
            },
            ExpressionDescriptor::Literal { .. } => Rank::SCALAR,
            ExpressionDescriptor::StructureComponent { .. } | ExpressionDescriptor::Unclassified => {
                Rank::Unknown
            }
        }
    }
}

/// Resolution status of a Calls edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "targets", rename_all = "snake_case")]
pub enum CallStatus {
    /// Only before the resolution pass has run
    Pending,
    Resolved(EntityId),
    /// Two or more surviving candidates, sorted
    Ambiguous(Vec<EntityId>),
    Unknown,
}

impl CallStatus {
    pub fn from_survivors(mut survivors: Vec<EntityId>) -> Self {
        survivors.sort();
        survivors.dedup();
        match survivors.len() {
            0 => CallStatus::Unknown,
            1 => CallStatus::Resolved(survivors[0]),
            _ => CallStatus::Ambiguous(survivors),
        }
    }

    /// Resolved target, ambiguous candidates, or nothing
    pub fn targets(&self) -> &[EntityId] {
        match self {
            CallStatus::Resolved(id) => std::slice::from_ref(id),
            CallStatus::Ambiguous(ids) => ids,
            CallStatus::Pending | CallStatus::Unknown => &[],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CallStatus::Pending => "pending",
            CallStatus::Resolved(_) => "resolved",
            CallStatus::Ambiguous(_) => "ambiguous",
            CallStatus::Unknown => "unknown",
        }
    }
}

/// Calls edge: a call site with its resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge {
    pub site: CallSite,
    pub status: CallStatus,
    /// Interfaces whose members formed the candidate set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub via_interfaces: Vec<EntityId>,
    /// Argument descriptors computed by the latest resolution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptors: Vec<ExpressionDescriptor>,
}

impl CallEdge {
    pub fn pending(site: CallSite) -> Self {
        Self {
            site,
            status: CallStatus::Pending,
            via_interfaces: Vec::new(),
            descriptors: Vec::new(),
        }
    }
}
