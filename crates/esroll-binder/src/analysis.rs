//! The two traversals behind [`Statement::analyse`](crate::Statement::analyse).
//!
//! Pass 1 (`BindingCollector`) creates scopes and binds names, recording
//! which node opened which scope. Pass 2 (`ReferenceCollector`) replays the
//! same scope cursor from that side table and resolves every identifier
//! reference.

use crate::scope::{ScopeArena, ScopeId};
use crate::statement::NameSet;
use esroll_parser::{NodeArena, NodeData, NodeIndex, Visitor, collect_binding_names};
use rustc_hash::FxHashMap;

pub(crate) type ScopeTable = FxHashMap<NodeIndex, ScopeId>;

pub(crate) struct BindingCollector<'a> {
    scopes: &'a mut ScopeArena,
    scope_of: &'a mut ScopeTable,
    defines: &'a mut NameSet,
    current: ScopeId,
}

impl<'a> BindingCollector<'a> {
    pub(crate) fn new(
        scopes: &'a mut ScopeArena,
        scope_of: &'a mut ScopeTable,
        defines: &'a mut NameSet,
    ) -> Self {
        BindingCollector {
            scopes,
            scope_of,
            defines,
            current: ScopeId::ROOT,
        }
    }

    fn declare(&mut self, name: &str, is_block_declaration: bool) {
        let landed = self.scopes.add(self.current, name, is_block_declaration);
        if landed == ScopeId::ROOT {
            self.defines.insert(name.to_string());
        }
    }

    /// Open a child scope for `node` and seed it with `names`.
    fn enter_scope<I>(&mut self, node: NodeIndex, is_block_scope: bool, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        let scope = self.scopes.push(self.current, is_block_scope);
        for name in names {
            self.scopes.add(scope, &name, true);
        }
        self.scope_of.insert(node, scope);
        self.current = scope;
    }

    fn parameter_names(arena: &NodeArena, params: &[NodeIndex]) -> Vec<String> {
        params
            .iter()
            .flat_map(|p| collect_binding_names(arena, *p))
            .collect()
    }
}

impl Visitor for BindingCollector<'_> {
    fn enter(&mut self, arena: &NodeArena, index: NodeIndex, _parent: NodeIndex) {
        let Some(data) = arena.data(index) else {
            return;
        };
        match data {
            NodeData::FunctionDeclaration(function) => {
                if let Some(name) = arena.data(function.id).and_then(NodeData::identifier_name) {
                    self.declare(name, false);
                }
                let params = Self::parameter_names(arena, &function.params);
                self.enter_scope(index, false, params);
            }
            NodeData::FunctionExpression(function) => {
                let mut names: Vec<String> = arena
                    .data(function.id)
                    .and_then(NodeData::identifier_name)
                    .map(str::to_string)
                    .into_iter()
                    .collect();
                names.extend(Self::parameter_names(arena, &function.params));
                self.enter_scope(index, false, names);
            }
            NodeData::ArrowFunctionExpression { params, .. } => {
                let params = Self::parameter_names(arena, params);
                self.enter_scope(index, false, params);
            }
            NodeData::ClassDeclaration(class) => {
                if let Some(name) = arena.data(class.id).and_then(NodeData::identifier_name) {
                    self.declare(name, false);
                }
            }
            NodeData::ClassExpression(class) => {
                if let Some(name) = arena.data(class.id).and_then(NodeData::identifier_name) {
                    self.enter_scope(index, true, [name.to_string()]);
                }
            }
            NodeData::CatchClause { param, .. } => {
                let names = if param.is_some() {
                    collect_binding_names(arena, *param)
                } else {
                    Vec::new()
                };
                self.enter_scope(index, true, names);
            }
            NodeData::BlockStatement { .. }
            | NodeData::StaticBlock { .. }
            | NodeData::ForStatement { .. }
            | NodeData::ForInStatement { .. }
            | NodeData::ForOfStatement { .. }
            | NodeData::SwitchStatement { .. } => {
                self.enter_scope(index, true, std::iter::empty());
            }
            NodeData::VariableDeclaration { kind, declarations } => {
                let is_block = kind.is_block_scoped();
                for declarator in declarations {
                    let Some(NodeData::VariableDeclarator { id, .. }) = arena.data(*declarator)
                    else {
                        continue;
                    };
                    for name in collect_binding_names(arena, *id) {
                        self.declare(&name, is_block);
                    }
                }
            }
            _ => {}
        }
    }

    fn leave(&mut self, _arena: &NodeArena, index: NodeIndex, _parent: NodeIndex) {
        if let Some(scope) = self.scope_of.get(&index) {
            self.current = self.scopes.parent(*scope).unwrap_or(ScopeId::ROOT);
        }
    }
}

pub(crate) struct ReferenceCollector<'a> {
    scopes: &'a ScopeArena,
    scope_of: &'a ScopeTable,
    depends_on: &'a mut NameSet,
    current: ScopeId,
}

impl<'a> ReferenceCollector<'a> {
    pub(crate) fn new(
        scopes: &'a ScopeArena,
        scope_of: &'a ScopeTable,
        depends_on: &'a mut NameSet,
    ) -> Self {
        ReferenceCollector {
            scopes,
            scope_of,
            depends_on,
            current: ScopeId::ROOT,
        }
    }
}

/// `foo` in `bar.foo` names a property, not a binding.
fn is_static_member_property(arena: &NodeArena, index: NodeIndex, parent: NodeIndex) -> bool {
    matches!(
        arena.data(parent),
        Some(NodeData::MemberExpression { property, computed: false, .. }) if *property == index
    )
}

impl Visitor for ReferenceCollector<'_> {
    fn enter(&mut self, arena: &NodeArena, index: NodeIndex, parent: NodeIndex) {
        if let Some(scope) = self.scope_of.get(&index) {
            self.current = *scope;
        }
        let Some(NodeData::Identifier { name }) = arena.data(index) else {
            return;
        };
        if is_static_member_property(arena, index, parent) {
            return;
        }
        if !self.scopes.contains(self.current, name) && !self.depends_on.contains(name.as_str()) {
            self.depends_on.insert(name.clone());
        }
    }

    fn leave(&mut self, _arena: &NodeArena, index: NodeIndex, _parent: NodeIndex) {
        if let Some(scope) = self.scope_of.get(&index) {
            self.current = self.scopes.parent(*scope).unwrap_or(ScopeId::ROOT);
        }
    }
}
