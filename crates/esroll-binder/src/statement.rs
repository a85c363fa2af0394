//! Top-level statements and their scope analysis.

use crate::analysis::{BindingCollector, ReferenceCollector, ScopeTable};
use crate::scope::{Scope, ScopeArena};
use esroll_common::{ModuleId, SourceText, Span};
use esroll_parser::{NodeArena, NodeData, NodeIndex, walk};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use tracing::trace;

/// Insertion-ordered set of identifier names.
pub type NameSet = IndexSet<String, FxBuildHasher>;

/// One top-level statement of a module.
#[derive(Debug, Clone)]
pub struct Statement {
    pub node: NodeIndex,
    /// Position among the module's top-level statements.
    pub index: u32,
    pub module: ModuleId,
    pub span: Span,
    pub kind: &'static str,
    /// Editable copy of this statement's text.
    pub source: SourceText,
    pub is_import_declaration: bool,
    pub is_export_declaration: bool,
    /// The statement's own root scope. Nested scopes are dropped after analysis.
    pub scope: Scope,
    pub defines: NameSet,
    pub depends_on: NameSet,
}

impl Statement {
    pub fn new(
        module: ModuleId,
        index: u32,
        node: NodeIndex,
        arena: &NodeArena,
        module_source: &SourceText,
    ) -> Statement {
        let (span, kind, is_import, is_export) = match arena.get(node) {
            Some(n) => (
                n.span(),
                n.data.kind_name(),
                n.data.is_import_declaration(),
                n.data.is_export_declaration(),
            ),
            None => (Span::default(), "Unknown", false, false),
        };
        Statement {
            node,
            index,
            module,
            span,
            kind,
            source: module_source.snip(span.start, span.end),
            is_import_declaration: is_import,
            is_export_declaration: is_export,
            scope: ScopeArena::new().into_root(),
            defines: NameSet::default(),
            depends_on: NameSet::default(),
        }
    }

    /// Compute `defines` and `depends_on`. Import declarations are left
    /// empty.
    pub fn analyse(&mut self, arena: &NodeArena) {
        if self.is_import_declaration {
            return;
        }

        let mut scopes = ScopeArena::new();
        let mut scope_of = ScopeTable::default();
        let mut defines = NameSet::default();
        let mut depends_on = NameSet::default();

        walk(
            arena,
            self.node,
            &mut BindingCollector::new(&mut scopes, &mut scope_of, &mut defines),
        );
        walk(
            arena,
            self.node,
            &mut ReferenceCollector::new(&scopes, &scope_of, &mut depends_on),
        );

        trace!(
            module = self.module.0,
            index = self.index,
            kind = self.kind,
            scopes = scopes.len(),
            defines = ?defines,
            depends_on = ?depends_on,
            "analysed statement"
        );

        self.scope = scopes.into_root();
        self.defines = defines;
        self.depends_on = depends_on;
    }

    /// True for `export ... { ... } from`, `export * from` and plain
    /// `export { ... }` lists, which carry no code of their own.
    pub fn is_export_list(&self, arena: &NodeArena) -> bool {
        match arena.data(self.node) {
            Some(NodeData::ExportNamedDeclaration { declaration, .. }) => declaration.is_none(),
            Some(NodeData::ExportAllDeclaration { .. }) => true,
            _ => false,
        }
    }

    pub fn summary(&self) -> StatementSummary {
        StatementSummary {
            index: self.index,
            kind: self.kind,
            start: self.span.start,
            end: self.span.end,
            is_import_declaration: self.is_import_declaration,
            is_export_declaration: self.is_export_declaration,
            defines: self.defines.iter().cloned().collect(),
            depends_on: self.depends_on.iter().cloned().collect(),
        }
    }
}

/// Serializable view of a statement's analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementSummary {
    pub index: u32,
    pub kind: &'static str,
    pub start: u32,
    pub end: u32,
    pub is_import_declaration: bool,
    pub is_export_declaration: bool,
    pub defines: Vec<String>,
    pub depends_on: Vec<String>,
}
