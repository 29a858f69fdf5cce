//! Arena of program units with scope-aware name lookup
//!
//! Every unit of a file (or of a merged forest) is interned here under an
//! [`EntityId`] derived from its kind and qualified name. Containment is kept
//! as a parent id on each unit plus a child index; USE statements are kept
//! per using scope. Lookups follow Fortran's host and use association rules
//! closely enough for call resolution, without type inference.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{FlinspectError, Result};
use crate::schema::{
    EntityId, ModuleInfo, ProgramUnit, UnitKind, UnitPayload, UseEdge, VariableDecl,
};

/// Separator between the components of a qualified name
pub const SCOPE_SEP: &str = "::";

pub fn qualify(container: Option<&str>, name: &str) -> String {
    match container {
        Some(outer) => format!("{}{}{}", outer, SCOPE_SEP, name),
        None => name.to_string(),
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NodeRegistry {
    units: BTreeMap<EntityId, ProgramUnit>,
    /// Qualified name → non-shadow units
    #[serde(skip)]
    by_qualified: BTreeMap<String, Vec<EntityId>>,
    /// Contains edges, parent → children
    #[serde(skip)]
    children: BTreeMap<EntityId, BTreeSet<EntityId>>,
    /// Uses edges grouped by the using scope
    uses: BTreeMap<EntityId, Vec<UseEdge>>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit, or return the existing one with the same kind and name.
    ///
    /// Fails with `NameKindConflict` when a visible unit of a different kind
    /// already owns the qualified name and the two kinds may not share it.
    pub fn intern(
        &mut self,
        qualified_name: &str,
        kind: UnitKind,
        parent: Option<EntityId>,
    ) -> Result<EntityId> {
        let id = EntityId::for_unit(kind, qualified_name);
        if let Some(existing) = self.units.get(&id) {
            if existing.qualified_name != qualified_name {
                return Err(FlinspectError::QueryError {
                    message: format!(
                        "identity collision between '{}' and '{}'",
                        existing.qualified_name, qualified_name
                    ),
                });
            }
            return Ok(id);
        }

        if let Some(conflict) = self
            .find(qualified_name)
            .iter()
            .filter_map(|other| self.units.get(other))
            .find(|other| !other.kind().may_share_name_with(kind))
        {
            return Err(FlinspectError::NameKindConflict {
                name: qualified_name.to_string(),
                existing: conflict.kind(),
                requested: kind,
            });
        }

        self.insert(ProgramUnit::new(id, kind, qualified_name, parent));
        Ok(id)
    }

    /// Register the losing unit of a name/kind conflict.
    ///
    /// Shadows keep their containment but are invisible to name lookup.
    pub fn intern_shadow(
        &mut self,
        qualified_name: &str,
        kind: UnitKind,
        parent: Option<EntityId>,
        conflict: &FlinspectError,
    ) -> EntityId {
        let id = EntityId::for_unit(kind, qualified_name);
        if self.units.contains_key(&id) {
            return id;
        }
        let mut unit = ProgramUnit::new(id, kind, qualified_name, parent);
        unit.shadow = true;
        unit.diagnostics
            .push(Diagnostic::new(DiagnosticKind::NameKindConflict, conflict.to_string()).on(id));
        tracing::debug!("[REGISTRY] shadowing {} '{}'", kind, qualified_name);
        self.insert(unit);
        id
    }

    /// Insert a fully built unit, replacing any unit with the same id
    pub(crate) fn insert(&mut self, unit: ProgramUnit) {
        let id = unit.id;
        if let Some(old) = self.units.remove(&id) {
            self.unindex(&old);
        }
        if !unit.shadow {
            self.by_qualified
                .entry(unit.qualified_name.clone())
                .or_default()
                .push(id);
        }
        if let Some(parent) = unit.parent {
            self.children.entry(parent).or_default().insert(id);
        }
        self.units.insert(id, unit);
    }

    fn unindex(&mut self, unit: &ProgramUnit) {
        if let Some(ids) = self.by_qualified.get_mut(&unit.qualified_name) {
            ids.retain(|i| *i != unit.id);
            if ids.is_empty() {
                self.by_qualified.remove(&unit.qualified_name);
            }
        }
        if let Some(parent) = unit.parent {
            if let Some(kids) = self.children.get_mut(&parent) {
                kids.remove(&unit.id);
            }
        }
    }

    pub fn add_use(&mut self, edge: UseEdge) {
        let edges = self.uses.entry(edge.from).or_default();
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn unit(&self, id: EntityId) -> Option<&ProgramUnit> {
        self.units.get(&id)
    }

    pub fn unit_mut(&mut self, id: EntityId) -> Option<&mut ProgramUnit> {
        self.units.get_mut(&id)
    }

    pub fn units(&self) -> impl Iterator<Item = &ProgramUnit> {
        self.units.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.units.keys().copied()
    }

    pub(crate) fn into_units(self) -> impl Iterator<Item = ProgramUnit> {
        self.units.into_values()
    }

    /// Non-shadow units with the given qualified name
    pub fn find(&self, qualified_name: &str) -> &[EntityId] {
        self.by_qualified
            .get(qualified_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find_kind(&self, qualified_name: &str, kind: UnitKind) -> Option<EntityId> {
        self.find(qualified_name)
            .iter()
            .copied()
            .find(|id| self.units.get(id).is_some_and(|u| u.kind() == kind))
    }

    pub fn children(&self, id: EntityId) -> impl Iterator<Item = EntityId> + '_ {
        self.children.get(&id).into_iter().flatten().copied()
    }

    pub fn uses_from(&self, id: EntityId) -> &[UseEdge] {
        self.uses.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn uses_from_mut(&mut self, id: EntityId) -> impl Iterator<Item = &mut UseEdge> {
        self.uses.get_mut(&id).into_iter().flatten()
    }

    pub fn all_uses(&self) -> impl Iterator<Item = &UseEdge> {
        self.uses.values().flatten()
    }

    /// Scope chain from `scope` outwards, `scope` first
    pub fn scope_chain(&self, scope: EntityId) -> Vec<EntityId> {
        let mut chain = Vec::new();
        let mut current = Some(scope);
        while let Some(id) = current {
            if chain.contains(&id) {
                break;
            }
            chain.push(id);
            current = self.units.get(&id).and_then(|u| u.parent);
        }
        chain
    }

    /// Outermost container of a unit
    pub fn top_level(&self, id: EntityId) -> EntityId {
        self.scope_chain(id).last().copied().unwrap_or(id)
    }

    /// Get or create the declaration of `name` in `scope`
    pub fn variable_entry(&mut self, scope: EntityId, name: &str) -> Option<&mut VariableDecl> {
        let unit = self.units.get_mut(&scope)?;
        Some(
            unit.variables
                .entry(name.to_string())
                .or_insert_with(|| VariableDecl::new(name)),
        )
    }

    pub fn module_info(&self, id: EntityId) -> Option<&ModuleInfo> {
        match &self.units.get(&id)?.payload {
            UnitPayload::Module(info) => Some(info),
            _ => None,
        }
    }

    /// Whether `name` is accessible from outside `module`
    pub fn is_public(&self, module: EntityId, name: &str) -> bool {
        self.module_info(module)
            .map(|info| info.is_public(name))
            .unwrap_or(true)
    }

    /// Units that `name` can denote inside `scope`.
    ///
    /// Host association first (innermost scope wins), then the public
    /// entities of modules reached through USE clauses of any enclosing
    /// scope, then global external units.
    pub fn resolve_name(&self, scope: EntityId, name: &str) -> Vec<EntityId> {
        let chain = self.scope_chain(scope);

        for id in &chain {
            let Some(unit) = self.units.get(id) else {
                continue;
            };
            let mut hits = self.find(&qualify(Some(&unit.qualified_name), name)).to_vec();
            if unit.parent.is_none() && unit.name == name && !unit.shadow {
                hits.push(*id);
            }
            if !hits.is_empty() {
                hits.sort();
                hits.dedup();
                return hits;
            }
        }

        let mut hits = Vec::new();
        let mut visited = HashSet::new();
        for id in &chain {
            for edge in self.uses_from(*id) {
                self.collect_use_hits(edge, name, &mut hits, &mut visited);
            }
        }
        if !hits.is_empty() {
            hits.sort();
            hits.dedup();
            return hits;
        }

        let mut global: Vec<EntityId> = self
            .find(name)
            .iter()
            .copied()
            .filter(|id| {
                self.units
                    .get(id)
                    .is_some_and(|u| u.parent.is_none() && u.kind() != UnitKind::Module)
            })
            .collect();
        global.sort();
        global
    }

    fn collect_use_hits(
        &self,
        edge: &UseEdge,
        local: &str,
        hits: &mut Vec<EntityId>,
        visited: &mut HashSet<(EntityId, String)>,
    ) {
        let Some(remote) = edge.remote_name(local) else {
            return;
        };
        if !visited.insert((edge.to, remote.to_string())) {
            return;
        }
        let Some(module) = self.units.get(&edge.to) else {
            return;
        };
        if !self.is_public(edge.to, remote) {
            return;
        }
        hits.extend_from_slice(self.find(&qualify(Some(&module.qualified_name), remote)));
        for inner in self.uses_from(edge.to).iter().filter(|e| e.reexport) {
            self.collect_use_hits(inner, remote, hits, visited);
        }
    }

    /// Declaration `name` denotes inside `scope`: local, host, then
    /// public module variables reached through USE
    pub fn lookup_variable(&self, scope: EntityId, name: &str) -> Option<&VariableDecl> {
        let chain = self.scope_chain(scope);
        for id in &chain {
            if let Some(decl) = self.units.get(id).and_then(|u| u.variables.get(name)) {
                return Some(decl);
            }
        }
        let mut visited = HashSet::new();
        chain.iter().find_map(|id| {
            self.uses_from(*id)
                .iter()
                .find_map(|edge| self.use_variable(edge, name, &mut visited))
        })
    }

    fn use_variable<'a>(
        &'a self,
        edge: &UseEdge,
        local: &str,
        visited: &mut HashSet<(EntityId, String)>,
    ) -> Option<&'a VariableDecl> {
        let remote = edge.remote_name(local)?;
        if !visited.insert((edge.to, remote.to_string())) {
            return None;
        }
        if !self.is_public(edge.to, remote) {
            return None;
        }
        if let Some(decl) = self.units.get(&edge.to).and_then(|m| m.variables.get(remote)) {
            return Some(decl);
        }
        self.uses_from(edge.to)
            .iter()
            .filter(|e| e.reexport)
            .find_map(|inner| self.use_variable(inner, remote, visited))
    }

    /// Whether the scope chain or transitive USE reach of `scope` touches any of `ids`
    pub fn depends_on_any(&self, scope: EntityId, ids: &HashSet<EntityId>) -> bool {
        let mut seen = HashSet::new();
        let mut stack = self.scope_chain(scope);
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            if ids.contains(&id) {
                return true;
            }
            for edge in self.uses_from(id) {
                stack.push(edge.to);
            }
        }
        false
    }
}
