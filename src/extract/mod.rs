//! Construct extraction: dump trees → registry entities and raw call sites
//!
//! The extractor walks each top-level tree once. Program units are interned
//! as they are met, specification parts fill in declarations, and executable
//! parts contribute unresolved [`CallSite`]s. Resolution happens later, once
//! the registry holds every unit of the file.

mod calls;
mod declarations;

use std::path::Path;

use crate::config::IngestConfig;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::registry::{qualify, NodeRegistry};
use crate::schema::{
    ArgumentDescriptor, CallSite, DataType, EntityId, FunctionInfo, ProcedureFlags, Rank, Signature,
    SourceLocation, UnitKind, UnitPayload,
};
use crate::tree::{Tag, TreeNode};

/// Options the extractor takes from the ingestion configuration
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    pub track_function_references: bool,
    pub skip_intrinsics: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            track_function_references: true,
            skip_intrinsics: true,
        }
    }
}

impl From<&IngestConfig> for ExtractOptions {
    fn from(config: &IngestConfig) -> Self {
        Self {
            track_function_references: config.track_function_references,
            skip_intrinsics: config.skip_intrinsics,
        }
    }
}

/// Everything extracted from one dump file
#[derive(Debug, Default)]
pub struct FileExtraction {
    pub registry: NodeRegistry,
    pub call_sites: Vec<CallSite>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Dummy list and prefix of a SUBROUTINE or FUNCTION statement
struct ProcedureHeader {
    name: String,
    dummies: Vec<String>,
    flags: ProcedureFlags,
    result: Option<String>,
    prefix_type: Option<DataType>,
}

pub struct Extractor<'a> {
    file: &'a Path,
    options: ExtractOptions,
    registry: NodeRegistry,
    call_sites: Vec<CallSite>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Extractor<'a> {
    pub fn new(file: &'a Path, options: ExtractOptions) -> Self {
        Self {
            file,
            options,
            registry: NodeRegistry::new(),
            call_sites: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Extract one top-level tree yielded by the reader
    pub fn extract_tree(&mut self, node: &TreeNode) {
        match &node.tag {
            Tag::Module => self.module(node),
            Tag::MainProgram => self.main_program(node),
            Tag::SubroutineSubprogram | Tag::FunctionSubprogram => {
                self.subprogram(node, None);
            }
            Tag::Program | Tag::ProgramUnit | Tag::Other(_) => {
                for child in &node.children {
                    self.extract_tree(child);
                }
            }
            _ => {}
        }
    }

    pub fn finish(mut self) -> FileExtraction {
        self.mark_reexports();
        tracing::debug!(
            "[EXTRACT] {}: {} units, {} call sites",
            self.file.display(),
            self.registry.len(),
            self.call_sites.len()
        );
        FileExtraction {
            registry: self.registry,
            call_sites: self.call_sites,
            diagnostics: self.diagnostics,
        }
    }

    /// Intern a defined unit; a name/kind clash turns it into a shadow
    fn intern_unit(
        &mut self,
        qualified_name: &str,
        kind: UnitKind,
        parent: Option<EntityId>,
        line: usize,
    ) -> EntityId {
        let id = match self.registry.intern(qualified_name, kind, parent) {
            Ok(id) => id,
            Err(conflict) => {
                tracing::warn!("[EXTRACT] {}:{}: {}", self.file.display(), line, conflict);
                self.registry.intern_shadow(qualified_name, kind, parent, &conflict)
            }
        };
        let file = self.file;
        if let Some(unit) = self.registry.unit_mut(id) {
            if unit.defined {
                unit.diagnostics.push(
                    Diagnostic::new(
                        DiagnosticKind::DuplicateDefinition,
                        format!("{} '{}' is defined more than once", kind, qualified_name),
                    )
                    .at(file, line)
                    .on(id),
                );
            } else {
                unit.defined = true;
                unit.location = Some(SourceLocation::new(file, line));
                if let Some(diag) = unit.diagnostics.iter_mut().find(|d| d.file.is_none()) {
                    diag.file = Some(file.to_path_buf());
                    diag.line = Some(line);
                }
            }
        }
        id
    }

    /// Module known only from a USE statement
    fn stub_module(&mut self, name: &str, line: usize) -> EntityId {
        match self.registry.intern(name, UnitKind::Module, None) {
            Ok(id) => id,
            Err(conflict) => {
                tracing::warn!("[EXTRACT] {}:{}: {}", self.file.display(), line, conflict);
                self.registry.intern_shadow(name, UnitKind::Module, None, &conflict)
            }
        }
    }

    fn qualified_in(&self, scope: EntityId, name: &str) -> String {
        let container = self.registry.unit(scope).map(|u| u.qualified_name.as_str());
        qualify(container, name)
    }

    fn module(&mut self, node: &TreeNode) {
        let Some(stmt) = node.child(&Tag::ModuleStmt) else {
            return;
        };
        let Some(name) = stmt.name() else {
            return;
        };
        let id = self.intern_unit(&name, UnitKind::Module, None, stmt.line);
        tracing::debug!("[EXTRACT] module {}", name);

        if let Some(spec) = node.child(&Tag::SpecificationPart) {
            self.specification_part(id, spec);
        }
        if let Some(part) = node.child(&Tag::ModuleSubprogramPart) {
            self.contained(id, part);
        }
    }

    fn main_program(&mut self, node: &TreeNode) {
        let stmt = node.child(&Tag::ProgramStmt);
        // A main program without a PROGRAM statement is anonymous
        let name = stmt.and_then(TreeNode::name).unwrap_or_else(|| "$main".to_string());
        let line = stmt.map(|s| s.line).unwrap_or(node.line);
        let id = self.intern_unit(&name, UnitKind::Program, None, line);

        if let Some(spec) = node.child(&Tag::SpecificationPart) {
            self.specification_part(id, spec);
        }
        if let Some(exec) = node.child(&Tag::ExecutionPart) {
            self.execution_part(id, exec);
        }
        if let Some(part) = node.child(&Tag::InternalSubprogramPart) {
            self.contained(id, part);
        }
    }

    /// Subprograms after a CONTAINS statement
    fn contained(&mut self, host: EntityId, part: &TreeNode) {
        for child in &part.children {
            match &child.tag {
                Tag::ModuleSubprogram | Tag::InternalSubprogram => {
                    for sub in &child.children {
                        self.subprogram(sub, Some(host));
                    }
                }
                Tag::SubroutineSubprogram | Tag::FunctionSubprogram => {
                    self.subprogram(child, Some(host));
                }
                _ => {}
            }
        }
    }

    /// Subroutine or function definition, or an interface body
    fn subprogram(&mut self, node: &TreeNode, parent: Option<EntityId>) -> Option<EntityId> {
        let (kind, stmt) = match &node.tag {
            Tag::SubroutineSubprogram | Tag::Subroutine => {
                (UnitKind::Subroutine, node.child(&Tag::SubroutineStmt)?)
            }
            Tag::FunctionSubprogram | Tag::Function => (UnitKind::Function, node.child(&Tag::FunctionStmt)?),
            _ => return None,
        };
        let header = procedure_header(stmt, kind)?;
        let qualified = match parent {
            Some(p) => self.qualified_in(p, &header.name),
            None => header.name.clone(),
        };
        let id = self.intern_unit(&qualified, kind, parent, stmt.line);
        tracing::debug!("[EXTRACT] {} {} ({} dummies)", kind, qualified, header.dummies.len());

        if let Some(spec) = node.child(&Tag::SpecificationPart) {
            self.specification_part(id, spec);
        }

        let payload = {
            let Some(unit) = self.registry.unit(id) else {
                return Some(id);
            };
            let args: Vec<ArgumentDescriptor> = header
                .dummies
                .iter()
                .map(|dummy| {
                    unit.variables
                        .get(dummy)
                        .map(ArgumentDescriptor::from)
                        .unwrap_or_else(|| ArgumentDescriptor::undeclared(dummy.as_str()))
                })
                .collect();
            let signature = Signature {
                args,
                flags: header.flags,
            };
            match kind {
                UnitKind::Function => {
                    let result_name = header.result.clone().unwrap_or_else(|| header.name.clone());
                    let result_decl = unit.variables.get(&result_name);
                    UnitPayload::Function(FunctionInfo {
                        signature,
                        result: header.result.clone(),
                        result_type: result_decl
                            .map(|d| d.ty.clone())
                            .filter(DataType::is_known)
                            .or(header.prefix_type.clone())
                            .unwrap_or_default(),
                        result_rank: result_decl.map(|d| d.rank).unwrap_or(Rank::SCALAR),
                    })
                }
                _ => UnitPayload::Subroutine(signature),
            }
        };
        if let Some(unit) = self.registry.unit_mut(id) {
            unit.payload = payload;
        }

        if let Some(exec) = node.child(&Tag::ExecutionPart) {
            self.execution_part(id, exec);
        }
        if let Some(part) = node.child(&Tag::InternalSubprogramPart) {
            self.contained(id, part);
        }
        Some(id)
    }

    /// Flag module USE clauses whose ONLY list republishes a PUBLIC name
    fn mark_reexports(&mut self) {
        let modules: Vec<(EntityId, Vec<String>)> = self
            .registry
            .units()
            .filter_map(|u| match &u.payload {
                UnitPayload::Module(info) if !info.public.is_empty() => {
                    Some((u.id, info.public.iter().cloned().collect()))
                }
                _ => None,
            })
            .collect();
        for (id, public) in modules {
            for edge in self.registry.uses_from_mut(id) {
                if let Some(only) = &edge.only {
                    edge.reexport = only.iter().any(|n| public.contains(&n.local));
                }
            }
        }
    }
}

fn procedure_header(stmt: &TreeNode, kind: UnitKind) -> Option<ProcedureHeader> {
    let mut flags = ProcedureFlags::default();
    let mut prefix_type = None;
    for prefix in stmt.children_tagged(&Tag::PrefixSpec) {
        for spec in &prefix.children {
            match &spec.tag {
                Tag::Elemental => flags.elemental = true,
                Tag::Pure => flags.pure = true,
                Tag::Recursive => flags.recursive = true,
                Tag::DeclarationTypeSpec => prefix_type = Some(declarations::declared_type(spec).0),
                _ => {}
            }
        }
    }

    let names = stmt.names();
    let (name, dummies) = match kind {
        // FunctionStmt lists the function name followed by its dummies
        UnitKind::Function => {
            let (first, rest) = names.split_first()?;
            (first.clone(), rest.to_vec())
        }
        _ => {
            let name = names.first()?.clone();
            let dummies = stmt
                .children_tagged(&Tag::DummyArg)
                .filter_map(TreeNode::name)
                .collect();
            (name, dummies)
        }
    };
    let result = stmt
        .child(&Tag::Suffix)
        .and_then(|s| s.find(&Tag::Name))
        .and_then(TreeNode::lowered_value);

    Some(ProcedureHeader {
        name,
        dummies,
        flags,
        result,
        prefix_type,
    })
}

/// Extract every tree of a file
pub fn extract_trees<'t>(
    file: &Path,
    options: ExtractOptions,
    trees: impl IntoIterator<Item = &'t TreeNode>,
) -> FileExtraction {
    let mut extractor = Extractor::new(file, options);
    for tree in trees {
        extractor.extract_tree(tree);
    }
    extractor.finish()
}
