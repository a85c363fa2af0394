//! A parsed module and its import, export and definition tables.

use crate::error::BundleError;
use esroll_binder::Statement;
use esroll_common::{ModuleId, SourceText};
use esroll_parser::{NodeArena, NodeData, NodeIndex, ParsedModule, collect_binding_names, parse_module};
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Insertion-ordered map keyed by binding name.
pub type NameMap<V> = IndexMap<String, V, FxBuildHasher>;

/// Where an imported local name comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBinding {
    /// Specifier as written in the import.
    pub source: String,
    /// Name exported by the source module: `default`, `*` for a namespace
    /// import, or the imported name.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportTarget {
    /// Bound in this module under `local_name`.
    Local {
        /// Statement that carries the export, if it declares the binding.
        statement: Option<u32>,
    },
    /// `export { name as x } from 'source'`
    Reexport { source: String, name: String },
    /// `export * as x from 'source'`
    Namespace { source: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBinding {
    pub local_name: String,
    pub target: ExportTarget,
}

impl ExportBinding {
    fn local(local_name: impl Into<String>, statement: Option<u32>) -> Self {
        ExportBinding {
            local_name: local_name.into(),
            target: ExportTarget::Local { statement },
        }
    }
}

#[derive(Debug)]
pub struct Module {
    pub id: ModuleId,
    /// Canonical id the module was fetched under.
    pub path: PathBuf,
    pub source: SourceText,
    pub arena: NodeArena,
    pub statements: Vec<Statement>,
    /// Local name -> origin.
    pub imports: NameMap<ImportBinding>,
    /// Exported name -> binding.
    pub exports: NameMap<ExportBinding>,
    /// Sources of `export * from` declarations, in order.
    pub star_exports: Vec<String>,
    /// Top-level name -> index of the last statement defining it.
    pub definitions: NameMap<u32>,
}

impl Module {
    /// Parse `source` and run import, export and statement analysis.
    pub fn parse(id: ModuleId, path: PathBuf, source: String) -> Result<Module, BundleError> {
        let text: Arc<str> = Arc::from(source);
        let ParsedModule { arena, root, .. } = parse_module(Arc::clone(&text))
            .map_err(|diagnostic| BundleError::parse(&path, &text, &diagnostic))?;
        let source = SourceText::new(text);

        let body: &[NodeIndex] = match arena.data(root) {
            Some(NodeData::Program { body }) => body,
            _ => &[],
        };
        let statements = body
            .iter()
            .enumerate()
            .map(|(index, node)| Statement::new(id, index as u32, *node, &arena, &source))
            .collect();

        let mut module = Module {
            id,
            path,
            source,
            arena,
            statements,
            imports: NameMap::default(),
            exports: NameMap::default(),
            star_exports: Vec::new(),
            definitions: NameMap::default(),
        };
        module.analyse()?;
        Ok(module)
    }

    fn analyse(&mut self) -> Result<(), BundleError> {
        self.collect_imports()?;
        self.collect_exports();

        for statement in &mut self.statements {
            statement.analyse(&self.arena);
        }
        for statement in &self.statements {
            for name in &statement.defines {
                self.definitions.insert(name.clone(), statement.index);
            }
        }

        debug!(
            module = %self.path.display(),
            statements = self.statements.len(),
            imports = self.imports.len(),
            exports = self.exports.len(),
            star_exports = self.star_exports.len(),
            definitions = self.definitions.len(),
            "analysed module"
        );
        Ok(())
    }

    fn collect_imports(&mut self) -> Result<(), BundleError> {
        for statement in &self.statements {
            let Some(NodeData::ImportDeclaration { specifiers, source }) =
                self.arena.data(statement.node)
            else {
                continue;
            };
            for specifier in specifiers {
                if self.imports.contains_key(&specifier.local) {
                    return Err(BundleError::DuplicateBinding {
                        module: self.path.clone(),
                        name: specifier.local.clone(),
                    });
                }
                self.imports.insert(
                    specifier.local.clone(),
                    ImportBinding {
                        source: source.clone(),
                        name: specifier.imported.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    fn collect_exports(&mut self) {
        for statement in &self.statements {
            let index = statement.index;
            match self.arena.data(statement.node) {
                Some(NodeData::ExportDefaultDeclaration { declaration }) => {
                    match declared_name(&self.arena, *declaration) {
                        Some(name) => {
                            self.exports
                                .insert("default".to_string(), ExportBinding::local(name, Some(index)));
                        }
                        None => {
                            self.exports.insert(
                                "default".to_string(),
                                ExportBinding::local("default", Some(index)),
                            );
                            self.definitions.insert("default".to_string(), index);
                        }
                    }
                }
                Some(NodeData::ExportNamedDeclaration {
                    declaration,
                    specifiers,
                    source,
                }) => {
                    if declaration.is_some() {
                        for name in declaration_names(&self.arena, *declaration) {
                            self.exports
                                .insert(name.clone(), ExportBinding::local(name, Some(index)));
                        }
                        continue;
                    }
                    for specifier in specifiers {
                        let binding = match source {
                            Some(source) => {
                                self.imports
                                    .entry(specifier.local.clone())
                                    .or_insert_with(|| ImportBinding {
                                        source: source.clone(),
                                        name: specifier.local.clone(),
                                    });
                                ExportBinding {
                                    local_name: specifier.local.clone(),
                                    target: ExportTarget::Reexport {
                                        source: source.clone(),
                                        name: specifier.local.clone(),
                                    },
                                }
                            }
                            None => ExportBinding::local(specifier.local.clone(), None),
                        };
                        self.exports.insert(specifier.exported.clone(), binding);
                    }
                }
                Some(NodeData::ExportAllDeclaration { exported, source }) => match exported {
                    Some(name) => {
                        self.exports.insert(
                            name.clone(),
                            ExportBinding {
                                local_name: name.clone(),
                                target: ExportTarget::Namespace {
                                    source: source.clone(),
                                },
                            },
                        );
                    }
                    None => self.star_exports.push(source.clone()),
                },
                _ => {}
            }
        }
    }

    pub fn statement(&self, index: u32) -> Option<&Statement> {
        self.statements.get(index as usize)
    }

    /// Text of a statement as it appears in a bundle: the `export` keyword in
    /// front of an inline declaration is stripped, as is `export default` in
    /// front of a named function or class.
    ///
    /// `export default <expression>` and anonymous default declarations are
    /// emitted verbatim, so a module that imports such a default gets no
    /// binding for it in the bundle.
    pub fn emitted_text(&self, index: u32) -> Option<String> {
        let statement = self.statement(index)?;
        let mut text = statement.source.clone();
        let declaration = match self.arena.data(statement.node) {
            Some(NodeData::ExportNamedDeclaration { declaration, .. }) if declaration.is_some() => {
                Some(*declaration)
            }
            Some(NodeData::ExportDefaultDeclaration { declaration })
                if declared_name(&self.arena, *declaration).is_some() =>
            {
                Some(*declaration)
            }
            _ => None,
        };
        if let Some(start) = declaration.and_then(|d| self.arena.get(d)).map(|n| n.pos) {
            text.remove(statement.span.start, start);
        }
        Some(text.to_string())
    }

    /// True for statements that carry no code of their own: imports and
    /// export lists (`export { a }`, `export { a } from`, `export * from`).
    pub fn is_declaration_only(&self, index: u32) -> bool {
        self.statement(index).is_some_and(|statement| {
            statement.is_import_declaration || statement.is_export_list(&self.arena)
        })
    }
}

/// Name of a function or class declaration, if it has one.
fn declared_name(arena: &NodeArena, declaration: NodeIndex) -> Option<String> {
    let id = match arena.data(declaration)? {
        NodeData::FunctionDeclaration(function) => function.id,
        NodeData::ClassDeclaration(class) => class.id,
        _ => return None,
    };
    arena
        .data(id)
        .and_then(NodeData::identifier_name)
        .map(str::to_string)
}

/// Every name bound by an inline export declaration.
fn declaration_names(arena: &NodeArena, declaration: NodeIndex) -> Vec<String> {
    match arena.data(declaration) {
        Some(NodeData::VariableDeclaration { declarations, .. }) => declarations
            .iter()
            .filter_map(|d| match arena.data(*d) {
                Some(NodeData::VariableDeclarator { id, .. }) => Some(*id),
                _ => None,
            })
            .flat_map(|id| collect_binding_names(arena, id))
            .collect(),
        _ => declared_name(arena, declaration).into_iter().collect(),
    }
}
