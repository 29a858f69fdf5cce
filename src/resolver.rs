//! Call resolution against overloaded generic interfaces
//!
//! Only syntactically recoverable facts are used: the declared type and rank
//! of names in the calling scope, the number of actual arguments and their
//! keywords. Missing information never eliminates a candidate, so the result
//! errs towards `Ambiguous` rather than a wrong `Resolved`.

use rayon::prelude::*;
use std::collections::BTreeSet;

use crate::registry::NodeRegistry;
use crate::schema::{
    ActualArgument, ArgumentExpr, CallEdge, CallForm, CallSite, CallStatus, DataType, EntityId,
    ExpressionDescriptor, ProgramUnit, Rank, Signature, Subscript, UnitPayload,
};

/// Resolve interface members that still lack a target.
///
/// Returns the interfaces whose member set changed.
pub fn resolve_interfaces(registry: &mut NodeRegistry) -> Vec<EntityId> {
    let mut updates: Vec<(EntityId, usize, EntityId)> = Vec::new();
    for unit in registry.units() {
        let UnitPayload::Interface(info) = &unit.payload else {
            continue;
        };
        let Some(container) = unit.parent else {
            continue;
        };
        for (idx, member) in info.members.iter().enumerate() {
            if member.target.is_some() {
                continue;
            }
            let target = registry
                .resolve_name(container, &member.name)
                .into_iter()
                .find(|id| registry.unit(*id).is_some_and(|u| u.kind().is_procedure()));
            if let Some(target) = target {
                updates.push((unit.id, idx, target));
            }
        }
    }

    let mut changed = BTreeSet::new();
    for (iface, idx, target) in updates {
        if let Some(UnitPayload::Interface(info)) = registry.unit_mut(iface).map(|u| &mut u.payload) {
            if let Some(member) = info.members.get_mut(idx) {
                member.target = Some(target);
                changed.insert(iface);
            }
        }
    }
    if !changed.is_empty() {
        tracing::debug!("[RESOLVE] {} interfaces gained members", changed.len());
    }
    changed.into_iter().collect()
}

/// Read-only resolver over a populated registry
pub struct Resolver<'r> {
    registry: &'r NodeRegistry,
}

impl<'r> Resolver<'r> {
    pub fn new(registry: &'r NodeRegistry) -> Self {
        Self { registry }
    }

    /// Resolve one call site. `None` means the site was an array reference
    /// that only looked like a function call.
    pub fn resolve(&self, site: CallSite) -> Option<CallEdge> {
        if site.form == CallForm::FunctionReference && self.is_array(site.caller, &site.callee) {
            tracing::debug!("[RESOLVE] dismissing array reference {}", site.callee);
            return None;
        }

        let descriptors: Vec<ExpressionDescriptor> = site
            .arguments
            .iter()
            .map(|arg| self.describe(site.caller, &arg.expr))
            .collect();
        let (candidates, via_interfaces) = self.candidates(&site);

        let mut survivors: Vec<(EntityId, bool, bool)> = candidates
            .iter()
            .filter_map(|id| self.registry.unit(*id))
            .filter_map(|unit| {
                let signature = unit.signature()?;
                let certain = self.fit(signature, &site.arguments, &descriptors)?;
                Some((unit.id, signature.flags.elemental, certain))
            })
            .collect();
        // A non-elemental specific wins over an elemental one only when it
        // matched on declared types and ranks alone
        if survivors.iter().any(|(_, elemental, certain)| !elemental && *certain) {
            survivors.retain(|(_, elemental, _)| !elemental);
        }

        let status = CallStatus::from_survivors(survivors.into_iter().map(|(id, _, _)| id).collect());
        tracing::debug!(
            "[RESOLVE] {} from {} ({} candidates): {}",
            site.callee,
            site.caller,
            candidates.len(),
            status.label()
        );
        Some(CallEdge {
            site,
            status,
            via_interfaces,
            descriptors,
        })
    }

    /// Candidate procedures and the interfaces they came through
    pub fn candidates(&self, site: &CallSite) -> (Vec<EntityId>, Vec<EntityId>) {
        if site.form == CallForm::TypeBound {
            return (Vec::new(), Vec::new());
        }
        let mut procedures = BTreeSet::new();
        let mut interfaces = BTreeSet::new();
        for hit in self.registry.resolve_name(site.caller, &site.callee) {
            let Some(unit) = self.registry.unit(hit) else {
                continue;
            };
            match &unit.payload {
                UnitPayload::Interface(info) => {
                    interfaces.insert(hit);
                    procedures.extend(info.resolved_members().filter(|id| self.is_callable(*id)));
                }
                UnitPayload::Subroutine(_) | UnitPayload::Function(_) => {
                    procedures.insert(hit);
                }
                _ => {}
            }
        }
        (procedures.into_iter().collect(), interfaces.into_iter().collect())
    }

    fn is_callable(&self, id: EntityId) -> bool {
        self.registry
            .unit(id)
            .is_some_and(|u: &ProgramUnit| !u.shadow && u.kind().is_procedure())
    }

    fn is_array(&self, scope: EntityId, name: &str) -> bool {
        self.registry
            .lookup_variable(scope, name)
            .is_some_and(|decl| decl.is_array())
    }

    /// Descriptor of an actual argument as seen from `scope`
    pub fn describe(&self, scope: EntityId, expr: &ArgumentExpr) -> ExpressionDescriptor {
        match expr {
            ArgumentExpr::Name(name) => {
                let decl = self.registry.lookup_variable(scope, name);
                ExpressionDescriptor::NamedVariable {
                    name: name.clone(),
                    ty: decl.map(|d| d.ty.clone()).unwrap_or_default(),
                    rank: decl.map(|d| d.rank).unwrap_or(Rank::Unknown),
                }
            }
            ArgumentExpr::Subscripted {
                base,
                subscripts,
                call_shaped,
            } => {
                let decl = self.registry.lookup_variable(scope, base);
                // A call-shaped reference is an array access only on a declared array
                if *call_shaped && !decl.is_some_and(|d| d.is_array()) {
                    return ExpressionDescriptor::Unclassified;
                }
                let array_subscripts = subscripts
                    .iter()
                    .filter(|s| match s {
                        Subscript::Triplet | Subscript::ArrayValued => true,
                        Subscript::Name(name) => self.is_array(scope, name),
                        Subscript::Scalar => false,
                    })
                    .count() as u32;
                ExpressionDescriptor::ArrayElementOrSlice {
                    base: base.clone(),
                    base_type: decl.map(|d| d.ty.clone()).unwrap_or_default(),
                    base_rank: decl.map(|d| d.rank).unwrap_or(Rank::Unknown),
                    scalar_subscripts: subscripts.len() as u32 - array_subscripts,
                    array_subscripts,
                }
            }
            ArgumentExpr::Component { field } => ExpressionDescriptor::StructureComponent {
                field: field.clone(),
            },
            ArgumentExpr::Literal(ty) => ExpressionDescriptor::Literal { ty: ty.clone() },
            ArgumentExpr::Other => ExpressionDescriptor::Unclassified,
        }
    }

    /// Arity, keyword and type/rank filters for one candidate.
    ///
    /// `None` eliminates the candidate. `Some(certain)` keeps it, where
    /// `certain` holds when every bound pair was checked on known type and
    /// rank on both sides.
    fn fit(
        &self,
        signature: &Signature,
        arguments: &[ActualArgument],
        descriptors: &[ExpressionDescriptor],
    ) -> Option<bool> {
        let count = arguments.len();
        if count < signature.required() || count > signature.total() {
            return None;
        }
        let binding = bind_arguments(signature, arguments)?;
        let mut certain = true;
        for (dummy_idx, arg_idx) in binding {
            let dummy = &signature.args[dummy_idx];
            let actual = &descriptors[arg_idx];
            let actual_type = actual.data_type();
            if !dummy.ty.accepts(&actual_type) {
                return None;
            }
            certain &= matches!(dummy.ty, DataType::Class(None))
                || (dummy.ty.is_known() && actual_type.is_known());
            if signature.flags.elemental && dummy.rank == Rank::SCALAR {
                certain &= actual.rank().is_known();
                continue;
            }
            let actual_rank = actual.rank();
            if !dummy.rank.compatible(&actual_rank) {
                return None;
            }
            certain &= dummy.rank.is_known() && actual_rank.is_known();
        }
        Some(certain)
    }
}

/// Bind actual arguments to dummies in call order.
///
/// A positional argument takes the next unbound dummy; a keyword must name
/// an unbound dummy. Returns `(dummy index, argument index)` pairs, or
/// `None` when the call cannot bind to this signature.
pub fn bind_arguments(signature: &Signature, arguments: &[ActualArgument]) -> Option<Vec<(usize, usize)>> {
    let mut bound: Vec<bool> = vec![false; signature.args.len()];
    let mut pairs = Vec::with_capacity(arguments.len());
    let mut next = 0;
    for (arg_idx, arg) in arguments.iter().enumerate() {
        let dummy_idx = match &arg.keyword {
            Some(keyword) => {
                let idx = signature.args.iter().position(|d| &d.name == keyword)?;
                if bound[idx] {
                    return None;
                }
                idx
            }
            None => {
                while next < bound.len() && bound[next] {
                    next += 1;
                }
                if next >= bound.len() {
                    return None;
                }
                next
            }
        };
        bound[dummy_idx] = true;
        pairs.push((dummy_idx, arg_idx));
    }
    Some(pairs)
}

/// Resolve a batch of sites in parallel, dropping dismissed array references
pub fn resolve_sites(registry: &NodeRegistry, sites: Vec<CallSite>) -> Vec<CallEdge> {
    let resolver = Resolver::new(registry);
    let mut edges: Vec<CallEdge> = sites
        .into_par_iter()
        .filter_map(|site| resolver.resolve(site))
        .collect();
    sort_edges(&mut edges);
    edges
}

/// Canonical edge order: caller, file, line, callee
pub fn sort_edges(edges: &mut Vec<CallEdge>) {
    edges.sort_by(|a, b| {
        a.site
            .sort_key()
            .cmp(&b.site.sort_key())
            .then_with(|| a.site.cmp(&b.site))
    });
    edges.dedup_by(|a, b| a.site == b.site);
}
