//! Lexical scopes for a single statement.
//!
//! Scopes live in a [`ScopeArena`] and refer to their parent by [`ScopeId`].
//! The arena always starts with a root scope at [`ScopeId::ROOT`], which is
//! never a block scope.

use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub parent: Option<ScopeId>,
    /// 0 at the root.
    pub depth: u32,
    pub is_block_scope: bool,
    names: FxHashSet<String>,
}

impl Scope {
    fn new(parent: Option<ScopeId>, depth: u32, is_block_scope: bool) -> Scope {
        Scope {
            parent,
            depth,
            is_block_scope,
            names: FxHashSet::default(),
        }
    }

    /// True if `name` was bound directly in this scope.
    pub fn has_own(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ScopeArena {
    scopes: Vec<Scope>,
}

impl ScopeArena {
    /// An arena holding only the root scope.
    pub fn new() -> ScopeArena {
        ScopeArena {
            scopes: vec![Scope::new(None, 0, false)],
        }
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    pub fn root(&self) -> &Scope {
        &self.scopes[ScopeId::ROOT.index()]
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Create a child of `parent`.
    pub fn push(&mut self, parent: ScopeId, is_block_scope: bool) -> ScopeId {
        let depth = self.get(parent).map_or(0, |p| p.depth + 1);
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(Some(parent), depth, is_block_scope));
        id
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.get(id).and_then(|s| s.parent)
    }

    /// Bind `name` starting at `scope` and return the scope it landed in.
    ///
    /// A non-block binding (`var`, function, class) made in a block scope
    /// moves up to the nearest non-block ancestor.
    pub fn add(&mut self, scope: ScopeId, name: &str, is_block_declaration: bool) -> ScopeId {
        let mut target = scope;
        if !is_block_declaration {
            while let Some(current) = self.get(target) {
                match current.parent {
                    Some(parent) if current.is_block_scope => target = parent,
                    _ => break,
                }
            }
        }
        if let Some(landing) = self.scopes.get_mut(target.index()) {
            if !landing.names.contains(name) {
                landing.names.insert(name.to_string());
            }
        }
        target
    }

    /// Nearest scope from `scope` upward that bound `name` directly.
    pub fn find_defining_scope(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut cursor = Some(scope);
        while let Some(id) = cursor {
            let current = self.get(id)?;
            if current.has_own(name) {
                return Some(id);
            }
            cursor = current.parent;
        }
        None
    }

    pub fn contains(&self, scope: ScopeId, name: &str) -> bool {
        self.find_defining_scope(scope, name).is_some()
    }

    /// Drop every scope except the root.
    pub fn into_root(mut self) -> Scope {
        self.scopes.truncate(1);
        self.scopes
            .pop()
            .unwrap_or_else(|| Scope::new(None, 0, false))
    }
}

impl Default for ScopeArena {
    fn default() -> Self {
        Self::new()
    }
}
