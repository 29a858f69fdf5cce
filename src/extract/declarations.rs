//! Specification-part constructs: type declarations, attribute statements,
//! USE, access control, derived types and interface blocks

use super::Extractor;
use crate::schema::{
    Access, ComponentDescriptor, DataType, EntityId, Intent, InterfaceMember, Rank, SourceLocation,
    UnitKind, UnitPayload, UseEdge, UseName,
};
use crate::tree::{Tag, TreeNode};

/// Attributes collected from the `AttrSpec` children of a declaration
#[derive(Debug, Default)]
struct Attributes {
    optional: bool,
    intent: Option<Intent>,
    rank: Option<Rank>,
    access: Option<Access>,
}

impl Attributes {
    fn from_stmt(stmt: &TreeNode, attr_tag: &Tag) -> Self {
        let mut attrs = Attributes::default();
        for spec in stmt.children_tagged(attr_tag) {
            for attr in &spec.children {
                match &attr.tag {
                    Tag::Optional => attrs.optional = true,
                    Tag::IntentSpec | Tag::Intent => attrs.intent = intent_of(attr),
                    Tag::ArraySpec | Tag::ComponentArraySpec => attrs.rank = Some(array_rank(attr)),
                    Tag::AccessSpec => attrs.access = access_of(attr),
                    _ => {}
                }
            }
        }
        attrs
    }
}

fn intent_of(node: &TreeNode) -> Option<Intent> {
    node.find(&Tag::Intent)
        .and_then(|n| n.value.as_deref())
        .and_then(Intent::parse)
}

pub(super) fn access_of(node: &TreeNode) -> Option<Access> {
    let value = node.find(&Tag::Kind)?.value.as_deref()?;
    match value.to_ascii_lowercase().as_str() {
        "public" => Some(Access::Public),
        "private" => Some(Access::Private),
        _ => None,
    }
}

/// Rank of an `ArraySpec` or `ComponentArraySpec`
pub(super) fn array_rank(spec: &TreeNode) -> Rank {
    let mut rank = 0u32;
    for dim in &spec.children {
        match &dim.tag {
            // A lower bound on an assumed-shape dimension is still one dimension
            Tag::ExplicitShapeSpec | Tag::AssumedShapeSpec | Tag::ImpliedShapeSpec => rank += 1,
            Tag::DeferredShapeSpecList => {
                let count = dim
                    .find(&Tag::Int)
                    .and_then(|n| n.value.as_deref())
                    .and_then(|v| v.trim().parse::<u32>().ok());
                match count {
                    Some(n) => rank += n,
                    None => return Rank::Unknown,
                }
            }
            Tag::AssumedSizeSpec => {
                rank += dim.children_tagged(&Tag::ExplicitShapeSpec).count() as u32 + 1;
            }
            Tag::AssumedRankSpec => return Rank::Unknown,
            _ => {}
        }
    }
    Rank::Known(rank)
}

/// Type and kind text of a `DeclarationTypeSpec`
pub(super) fn declared_type(spec: &TreeNode) -> (DataType, Option<String>) {
    let Some(inner) = spec.children.first() else {
        return (DataType::Unknown, None);
    };
    match &inner.tag {
        Tag::IntrinsicTypeSpec => {
            let Some(base) = inner.children.first() else {
                return (DataType::Unknown, None);
            };
            let ty = match &base.tag {
                Tag::IntegerTypeSpec => DataType::Integer,
                Tag::Real | Tag::DoublePrecision => DataType::Real,
                Tag::Complex => DataType::Complex,
                Tag::Logical => DataType::Logical,
                Tag::Character => DataType::Character,
                Tag::Other(name) if name.eq_ignore_ascii_case("DoubleComplex") => DataType::Complex,
                _ => DataType::Unknown,
            };
            let kind = match &base.tag {
                Tag::DoublePrecision => Some("double".to_string()),
                Tag::Character => None,
                _ => base.find(&Tag::KindSelector).and_then(kind_text),
            };
            (ty, kind)
        }
        Tag::Type => (
            derived_name(inner).map(DataType::Derived).unwrap_or(DataType::Unknown),
            None,
        ),
        Tag::Class => (DataType::Class(derived_name(inner)), None),
        // CLASS(*) and TYPE(*) take anything
        Tag::ClassStar | Tag::TypeStar => (DataType::Class(None), None),
        _ => (DataType::Unknown, None),
    }
}

fn derived_name(node: &TreeNode) -> Option<String> {
    node.find(&Tag::DerivedTypeSpec)?.name()
}

/// Leaf values of a kind selector, e.g. `dp` or `8`
fn kind_text(selector: &TreeNode) -> Option<String> {
    fn leaves(node: &TreeNode, out: &mut String) {
        if let Some(value) = &node.value {
            out.push_str(&value.to_ascii_lowercase());
        }
        for child in &node.children {
            leaves(child, out);
        }
    }
    let mut text = String::new();
    leaves(selector, &mut text);
    (!text.is_empty()).then_some(text)
}

/// Name of a generic spec: a plain name, `operator(+)` or `assignment(=)`
pub(super) fn generic_spec_name(spec: &TreeNode) -> Option<String> {
    if let Some(name) = spec.name() {
        return Some(name);
    }
    if spec.find(&Tag::Assignment).is_some() {
        return Some("assignment(=)".to_string());
    }
    if let Some(op) = spec.find(&Tag::IntrinsicOperator).and_then(|n| n.value.as_deref()) {
        return Some(format!("operator({})", operator_symbol(op)));
    }
    if let Some(defined) = spec.find(&Tag::DefinedOpName) {
        let name = defined.find(&Tag::Name).and_then(TreeNode::lowered_value)?;
        return Some(format!("operator(.{}.)", name.trim_matches('.')));
    }
    None
}

fn operator_symbol(op: &str) -> String {
    let symbol = match op.to_ascii_lowercase().as_str() {
        "power" => "**",
        "multiply" => "*",
        "divide" => "/",
        "add" => "+",
        "subtract" => "-",
        "concat" => "//",
        "lt" => "<",
        "le" => "<=",
        "eq" => "==",
        "ne" => "/=",
        "ge" => ">=",
        "gt" => ">",
        "not" => ".not.",
        "and" => ".and.",
        "or" => ".or.",
        "eqv" => ".eqv.",
        "neqv" => ".neqv.",
        other => return other.to_string(),
    };
    symbol.to_string()
}

impl Extractor<'_> {
    pub(super) fn specification_part(&mut self, scope: EntityId, node: &TreeNode) {
        match &node.tag {
            Tag::UseStmt => self.use_stmt(scope, node),
            Tag::TypeDeclarationStmt => self.type_declaration(scope, node),
            Tag::AccessStmt => self.access_stmt(scope, node),
            Tag::OptionalStmt => {
                for name in node.find_all(&Tag::Name).into_iter().filter_map(TreeNode::lowered_value) {
                    if let Some(decl) = self.registry.variable_entry(scope, &name) {
                        decl.optional = true;
                    }
                }
            }
            Tag::IntentStmt => {
                let intent = intent_of(node);
                for name in node.names() {
                    if let Some(decl) = self.registry.variable_entry(scope, &name) {
                        decl.intent = intent;
                    }
                }
            }
            Tag::DimensionStmt => {
                for decl_node in node.find_all(&Tag::Declaration) {
                    let (Some(name), Some(spec)) = (decl_node.name(), decl_node.child(&Tag::ArraySpec)) else {
                        continue;
                    };
                    let rank = array_rank(spec);
                    if let Some(decl) = self.registry.variable_entry(scope, &name) {
                        decl.rank = rank;
                    }
                }
            }
            Tag::DerivedTypeDef => self.derived_type(scope, node),
            Tag::InterfaceBlock => self.interface_block(scope, node),
            _ => {
                for child in &node.children {
                    self.specification_part(scope, child);
                }
            }
        }
    }

    fn type_declaration(&mut self, scope: EntityId, stmt: &TreeNode) {
        let (ty, kind) = stmt
            .child(&Tag::DeclarationTypeSpec)
            .map(declared_type)
            .unwrap_or((DataType::Unknown, None));
        let attrs = Attributes::from_stmt(stmt, &Tag::AttrSpec);

        for entity in stmt.children_tagged(&Tag::EntityDecl) {
            let Some(name) = entity.name() else {
                continue;
            };
            let rank = entity.child(&Tag::ArraySpec).map(array_rank).or(attrs.rank);
            if let Some(decl) = self.registry.variable_entry(scope, &name) {
                decl.ty = ty.clone();
                decl.kind = kind.clone();
                if let Some(rank) = rank {
                    decl.rank = rank;
                }
                decl.optional |= attrs.optional;
                if attrs.intent.is_some() {
                    decl.intent = attrs.intent;
                }
                if attrs.access.is_some() {
                    decl.access = attrs.access;
                }
            }
            if let Some(access) = attrs.access {
                self.record_access(scope, &name, access);
            }
        }
    }

    fn record_access(&mut self, scope: EntityId, name: &str, access: Access) {
        if let Some(UnitPayload::Module(info)) = self.registry.unit_mut(scope).map(|u| &mut u.payload) {
            match access {
                Access::Public => info.public.insert(name.to_string()),
                Access::Private => info.private.insert(name.to_string()),
            };
        }
    }

    fn access_stmt(&mut self, scope: EntityId, stmt: &TreeNode) {
        let Some(access) = stmt.child(&Tag::AccessSpec).and_then(access_of) else {
            return;
        };
        let names: Vec<String> = stmt
            .children_tagged(&Tag::AccessId)
            .filter_map(|id| match id.child(&Tag::GenericSpec) {
                Some(spec) => generic_spec_name(spec),
                None => id.find(&Tag::Name).and_then(TreeNode::lowered_value),
            })
            .collect();

        if names.is_empty() {
            if let Some(UnitPayload::Module(info)) = self.registry.unit_mut(scope).map(|u| &mut u.payload) {
                info.default_access = access;
            }
            return;
        }
        for name in names {
            if let Some(decl) = self
                .registry
                .unit_mut(scope)
                .and_then(|u| u.variables.get_mut(&name))
            {
                decl.access = Some(access);
            }
            self.record_access(scope, &name, access);
        }
    }

    fn use_stmt(&mut self, scope: EntityId, stmt: &TreeNode) {
        let Some(module_name) = stmt.name() else {
            return;
        };
        let intrinsic = stmt
            .child(&Tag::ModuleNature)
            .and_then(|n| n.value.as_deref())
            .is_some_and(|v| v.eq_ignore_ascii_case("intrinsic"));

        let mut only: Option<Vec<UseName>> = None;
        let mut renames = Vec::new();
        for child in &stmt.children {
            match &child.tag {
                Tag::Only => {
                    let list = only.get_or_insert_with(Vec::new);
                    if let Some(rename) = child.child(&Tag::Rename) {
                        list.extend(rename_pair(rename));
                    } else if let Some(spec) = child.child(&Tag::GenericSpec) {
                        list.extend(generic_spec_name(spec).map(UseName::same));
                    } else if let Some(name) = child.name() {
                        list.push(UseName::same(name));
                    }
                }
                Tag::Rename => renames.extend(rename_pair(child)),
                _ => {}
            }
        }

        let to = self.stub_module(&module_name, stmt.line);
        if intrinsic {
            if let Some(unit) = self.registry.unit_mut(to).filter(|u| !u.defined) {
                if let UnitPayload::Module(info) = &mut unit.payload {
                    info.intrinsic = true;
                }
            }
        }
        tracing::debug!("[EXTRACT] use {} from {}", module_name, scope);
        self.registry.add_use(UseEdge {
            from: scope,
            to,
            module: module_name,
            only,
            renames,
            intrinsic,
            reexport: false,
            location: SourceLocation::new(self.file, stmt.line),
        });
    }

    fn derived_type(&mut self, scope: EntityId, def: &TreeNode) {
        let Some(stmt) = def.child(&Tag::DerivedTypeStmt) else {
            return;
        };
        let Some(name) = stmt.name() else {
            return;
        };
        let extends = stmt
            .children_tagged(&Tag::TypeAttrSpec)
            .find_map(|attr| attr.find(&Tag::Extends))
            .and_then(|ext| ext.find(&Tag::Name))
            .and_then(TreeNode::lowered_value);
        if let Some(access) = stmt
            .children_tagged(&Tag::TypeAttrSpec)
            .find_map(|attr| attr.child(&Tag::AccessSpec).and_then(access_of))
        {
            self.record_access(scope, &name, access);
        }

        let mut components = Vec::new();
        for comp_stmt in def.find_all(&Tag::DataComponentDefStmt) {
            let (ty, kind) = comp_stmt
                .child(&Tag::DeclarationTypeSpec)
                .map(declared_type)
                .unwrap_or((DataType::Unknown, None));
            let attrs = Attributes::from_stmt(comp_stmt, &Tag::ComponentAttrSpec);
            for decl in comp_stmt.find_all(&Tag::ComponentDecl) {
                let Some(comp_name) = decl.name() else {
                    continue;
                };
                let rank = decl
                    .child(&Tag::ComponentArraySpec)
                    .map(array_rank)
                    .or(attrs.rank)
                    .unwrap_or(Rank::SCALAR);
                components.push(ComponentDescriptor {
                    name: comp_name,
                    ty: ty.clone(),
                    kind: kind.clone(),
                    rank,
                });
            }
        }

        let qualified = self.qualified_in(scope, &name);
        let id = self.intern_unit(&qualified, UnitKind::DerivedType, Some(scope), def.line);
        if let Some(UnitPayload::DerivedType(info)) = self.registry.unit_mut(id).map(|u| &mut u.payload) {
            info.extends = extends;
            info.components = components;
        }
    }

    fn interface_block(&mut self, scope: EntityId, block: &TreeNode) {
        let stmt = block.child(&Tag::InterfaceStmt);
        let is_abstract = stmt.is_some_and(|s| s.find(&Tag::Abstract).is_some());
        let generic = stmt
            .and_then(|s| s.child(&Tag::GenericSpec))
            .and_then(generic_spec_name);

        let bodies: Vec<&TreeNode> = block
            .find_all(&Tag::InterfaceBody)
            .into_iter()
            .flat_map(|body| body.children.iter())
            .filter(|n| matches!(n.tag, Tag::Subroutine | Tag::Function))
            .collect();

        let Some(generic) = generic else {
            // Unnamed and abstract interfaces declare procedures of the enclosing scope
            for body in bodies {
                self.subprogram(body, Some(scope));
            }
            return;
        };

        let qualified = self.qualified_in(scope, &generic);
        let id = self.intern_unit(&qualified, UnitKind::Interface, Some(scope), block.line);

        let mut members = Vec::new();
        for proc_stmt in block.find_all(&Tag::ProcedureStmt) {
            for name in proc_stmt.names() {
                members.push(InterfaceMember {
                    name,
                    target: None,
                    body: false,
                });
            }
        }
        for body in bodies {
            if let Some(proc_id) = self.subprogram(body, Some(id)) {
                let name = self
                    .registry
                    .unit(proc_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_default();
                members.push(InterfaceMember {
                    name,
                    target: Some(proc_id),
                    body: true,
                });
            }
        }

        tracing::debug!("[EXTRACT] interface {} with {} members", qualified, members.len());
        if let Some(UnitPayload::Interface(info)) = self.registry.unit_mut(id).map(|u| &mut u.payload) {
            info.generic = generic;
            info.is_abstract = is_abstract;
            for member in members {
                if !info.members.iter().any(|m| m.name == member.name) {
                    info.members.push(member);
                }
            }
        }
    }
}

fn rename_pair(rename: &TreeNode) -> Option<UseName> {
    let names = rename.find(&Tag::Names)?.names();
    match names.as_slice() {
        [local, remote, ..] => Some(UseName {
            local: local.clone(),
            remote: remote.clone(),
        }),
        _ => None,
    }
}
