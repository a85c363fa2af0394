//! Build orchestration: module cache, tree-shaking expansion and output.
//!
//! Expansion runs on an explicit work list. Every statement has a visit state
//! for the lifetime of the bundler, so a statement is emitted at most once and
//! a dependency on a statement that is still being expanded (mutual
//! recursion) is skipped instead of looping.

use crate::error::BundleError;
use crate::module::{ExportTarget, Module};
use crate::resolver::{FileReader, FsReader, PathResolver, Resolver};
use esroll_common::ModuleId;
use esroll_common::limits::MAX_REEXPORT_HOPS;
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Options for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleOptions {
    /// Entry module id, used as-is.
    pub entry: PathBuf,
    /// Where the caller should write the bundle. The library never writes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl BundleOptions {
    pub fn new(entry: impl Into<PathBuf>) -> Self {
        BundleOptions {
            entry: entry.into(),
            output: None,
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// A statement of a fetched module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StatementRef {
    pub module: ModuleId,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Emitted,
}

enum Task {
    Expand(StatementRef),
    Emit(StatementRef),
    Define(ModuleId, String),
}

/// One step of resolving a name to the statement that defines it.
enum Lookup {
    /// A name in scope at the top level of a module.
    Local(ModuleId, String),
    /// A name in a module's export table.
    Export(ModuleId, String),
}

pub struct Bundler {
    options: BundleOptions,
    resolver: Box<dyn Resolver>,
    reader: Box<dyn FileReader>,
    /// Canonical id -> module; a module's `ModuleId` is its position here.
    modules: IndexMap<PathBuf, Module, FxBuildHasher>,
    visits: FxHashMap<StatementRef, Visit>,
}

impl Bundler {
    /// A bundler reading from disk with [`PathResolver`].
    pub fn new(options: BundleOptions) -> Self {
        Self::with_io(options, PathResolver, FsReader)
    }

    pub fn with_io(
        options: BundleOptions,
        resolver: impl Resolver + 'static,
        reader: impl FileReader + 'static,
    ) -> Self {
        Bundler {
            options,
            resolver: Box::new(resolver),
            reader: Box::new(reader),
            modules: IndexMap::default(),
            visits: FxHashMap::default(),
        }
    }

    pub fn options(&self) -> &BundleOptions {
        &self.options
    }

    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.get_index(id.index()).map(|(_, module)| module)
    }

    pub fn module_by_path(&self, path: &Path) -> Option<&Module> {
        self.modules.get(path)
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    fn module_ref(&self, id: ModuleId) -> Result<&Module, BundleError> {
        self.module(id).ok_or_else(|| BundleError::NotFound {
            path: PathBuf::from(format!("<module {}>", id.0)),
        })
    }

    /// Fetch the entry module, expand it and render the bundle.
    pub fn build(&mut self) -> Result<String, BundleError> {
        let entry = self.options.entry.to_string_lossy().into_owned();
        let entry = self.fetch_module(&entry, None)?;
        let statements = self.expand_all_statements(entry)?;
        debug!(
            modules = self.modules.len(),
            statements = statements.len(),
            "expanded bundle"
        );
        self.generate(&statements)
    }

    /// Return the module for `importee`, reading and analysing it on first
    /// use. Without an importer, `importee` is the module id itself.
    pub fn fetch_module(
        &mut self,
        importee: &str,
        importer: Option<&Path>,
    ) -> Result<ModuleId, BundleError> {
        let id = match importer {
            Some(importer) => self.resolver.resolve(importer, importee),
            None => PathBuf::from(importee),
        };
        if let Some(index) = self.modules.get_index_of(&id) {
            trace!(module = %id.display(), "module cache hit");
            return Ok(ModuleId(index as u32));
        }

        debug!(module = %id.display(), importee, "fetching module");
        let source = self.reader.read(&id)?;
        let module_id = ModuleId(self.modules.len() as u32);
        let module = Module::parse(module_id, id.clone(), source)?;
        self.modules.insert(id, module);
        Ok(module_id)
    }

    /// Expand every statement of `module` that carries code, in source order.
    /// Imports and export lists are skipped.
    pub fn expand_all_statements(
        &mut self,
        module: ModuleId,
    ) -> Result<Vec<StatementRef>, BundleError> {
        let count = self.module_ref(module)?.statements.len() as u32;
        let mut result = Vec::new();
        for index in 0..count {
            if self.module_ref(module)?.is_declaration_only(index) {
                continue;
            }
            let statements = self.run(Task::Expand(StatementRef { module, index }))?;
            result.extend(statements);
        }
        Ok(result)
    }

    /// The statements `statement` depends on, followed by `statement`.
    /// Statements already emitted by this bundler are left out.
    pub fn expand_statement(
        &mut self,
        statement: StatementRef,
    ) -> Result<Vec<StatementRef>, BundleError> {
        self.run(Task::Expand(statement))
    }

    /// The statements needed to bring `name` into scope at the top level of
    /// `module`. A name that is neither defined nor imported there is
    /// external and yields nothing.
    pub fn define(&mut self, module: ModuleId, name: &str) -> Result<Vec<StatementRef>, BundleError> {
        self.run(Task::Define(module, name.to_string()))
    }

    fn run(&mut self, task: Task) -> Result<Vec<StatementRef>, BundleError> {
        let mut emitted = Vec::new();
        let mut work = vec![task];
        while let Some(task) = work.pop() {
            match task {
                Task::Expand(statement) => {
                    if self.visits.contains_key(&statement) {
                        continue;
                    }
                    let Some(depends_on) = self
                        .module_ref(statement.module)?
                        .statement(statement.index)
                        .map(|s| s.depends_on.iter().rev().cloned().collect::<Vec<_>>())
                    else {
                        continue;
                    };
                    self.visits.insert(statement, Visit::InProgress);
                    work.push(Task::Emit(statement));
                    work.extend(
                        depends_on
                            .into_iter()
                            .map(|name| Task::Define(statement.module, name)),
                    );
                }
                Task::Emit(statement) => {
                    self.visits.insert(statement, Visit::Emitted);
                    emitted.push(statement);
                }
                Task::Define(module, name) => {
                    if let Some(statement) = self.resolve_definition(module, &name)? {
                        match self.visits.get(&statement) {
                            Some(Visit::InProgress) => {
                                trace!(module = module.0, name = %name, "dependency already in progress")
                            }
                            Some(Visit::Emitted) => {}
                            None => work.push(Task::Expand(statement)),
                        }
                    }
                }
            }
        }
        Ok(emitted)
    }

    /// Follow imports, re-exports and `export *` from `name` in `module` to
    /// the statement that defines it.
    fn resolve_definition(
        &mut self,
        module: ModuleId,
        name: &str,
    ) -> Result<Option<StatementRef>, BundleError> {
        let mut seen: FxHashSet<(ModuleId, String, bool)> = FxHashSet::default();
        let mut lookup = Lookup::Local(module, name.to_string());

        loop {
            let (id, current, is_export) = match &lookup {
                Lookup::Local(id, name) => (*id, name, false),
                Lookup::Export(id, name) => (*id, name, true),
            };
            if seen.len() >= MAX_REEXPORT_HOPS || !seen.insert((id, current.clone(), is_export)) {
                return Err(BundleError::CircularReexport {
                    module: self.module_ref(id)?.path.clone(),
                    name: current.clone(),
                });
            }

            lookup = match lookup {
                Lookup::Local(id, name) => {
                    let module = self.module_ref(id)?;
                    if let Some(&index) = module.definitions.get(&name) {
                        return Ok(Some(StatementRef { module: id, index }));
                    }
                    let Some(import) = module.imports.get(&name) else {
                        return Ok(None);
                    };
                    if import.name == "*" {
                        return Err(BundleError::UnsupportedNamespace {
                            module: module.path.clone(),
                            name,
                        });
                    }
                    let (source, imported) = (import.source.clone(), import.name.clone());
                    let importer = module.path.clone();
                    let target = self.fetch_module(&source, Some(&importer))?;
                    trace!(
                        from = %importer.display(),
                        local = %name,
                        source = %source,
                        imported = %imported,
                        "following import"
                    );
                    Lookup::Export(target, imported)
                }
                Lookup::Export(id, name) => self.follow_export(id, name)?,
            };
        }
    }

    fn follow_export(&mut self, id: ModuleId, name: String) -> Result<Lookup, BundleError> {
        let module = self.module_ref(id)?;
        let importer = module.path.clone();
        match module.exports.get(&name) {
            Some(export) => match &export.target {
                ExportTarget::Local { .. } => Ok(Lookup::Local(id, export.local_name.clone())),
                ExportTarget::Reexport {
                    source,
                    name: imported,
                } => {
                    let (source, imported) = (source.clone(), imported.clone());
                    let target = self.fetch_module(&source, Some(&importer))?;
                    trace!(
                        from = %importer.display(),
                        exported = %name,
                        source = %source,
                        imported = %imported,
                        "following re-export"
                    );
                    Ok(Lookup::Export(target, imported))
                }
                ExportTarget::Namespace { .. } => Err(BundleError::UnsupportedNamespace {
                    module: importer,
                    name,
                }),
            },
            None => match self.find_star_export(id, &name)? {
                Some(target) => Ok(Lookup::Export(target, name)),
                None => Err(BundleError::ExportNotFound {
                    module: importer,
                    name,
                }),
            },
        }
    }

    /// The first module reachable through `export *` from `module` whose own
    /// export table has `name`. `default` is never re-exported this way.
    fn find_star_export(
        &mut self,
        module: ModuleId,
        name: &str,
    ) -> Result<Option<ModuleId>, BundleError> {
        if name == "default" {
            return Ok(None);
        }
        let mut visited: FxHashSet<ModuleId> = FxHashSet::default();
        let mut stack = vec![module];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            let module = self.module_ref(current)?;
            let importer = module.path.clone();
            let sources = module.star_exports.clone();
            let mut next = Vec::with_capacity(sources.len());
            for source in &sources {
                let target = self.fetch_module(source, Some(&importer))?;
                if self.module_ref(target)?.exports.contains_key(name) {
                    return Ok(Some(target));
                }
                next.push(target);
            }
            stack.extend(next.into_iter().rev());
        }
        Ok(None)
    }

    /// Concatenate the emitted text of `statements`, one per line.
    pub fn generate(&self, statements: &[StatementRef]) -> Result<String, BundleError> {
        let mut code = String::new();
        for statement in statements {
            let module = self.module_ref(statement.module)?;
            if let Some(text) = module.emitted_text(statement.index) {
                code.push_str(&text);
                code.push('\n');
            }
        }
        Ok(code)
    }
}
