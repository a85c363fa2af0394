use crate::scope::*;

#[test]
fn test_root_is_not_block_scope() {
    let arena = ScopeArena::new();
    let root = arena.root();
    assert!(!root.is_block_scope);
    assert_eq!(root.depth, 0);
    assert!(root.parent.is_none());
}

#[test]
fn test_depth_follows_parent() {
    let mut arena = ScopeArena::new();
    let a = arena.push(ScopeId::ROOT, false);
    let b = arena.push(a, true);
    assert_eq!(arena.get(a).map(|s| s.depth), Some(1));
    assert_eq!(arena.get(b).map(|s| s.depth), Some(2));
    assert_eq!(arena.parent(b), Some(a));
}

#[test]
fn test_var_hoists_out_of_nested_blocks() {
    let mut arena = ScopeArena::new();
    let function = arena.push(ScopeId::ROOT, false);
    let block = arena.push(function, true);
    let inner = arena.push(block, true);

    assert_eq!(arena.add(inner, "v", false), function);
    assert_eq!(arena.add(inner, "l", true), inner);
    assert!(arena.get(function).is_some_and(|s| s.has_own("v")));
    assert!(!arena.get(block).is_some_and(|s| s.has_own("v")));
}

#[test]
fn test_block_directly_under_root_hoists_to_root() {
    let mut arena = ScopeArena::new();
    let block = arena.push(ScopeId::ROOT, true);
    assert_eq!(arena.add(block, "x", false), ScopeId::ROOT);
    assert!(arena.root().has_own("x"));
}

#[test]
fn test_find_defining_scope_returns_nearest() {
    let mut arena = ScopeArena::new();
    arena.add(ScopeId::ROOT, "x", true);
    let block = arena.push(ScopeId::ROOT, true);
    arena.add(block, "x", true);
    let inner = arena.push(block, true);

    assert_eq!(arena.find_defining_scope(inner, "x"), Some(block));
    assert_eq!(arena.find_defining_scope(ScopeId::ROOT, "x"), Some(ScopeId::ROOT));
    assert_eq!(arena.find_defining_scope(inner, "y"), None);
    assert!(arena.contains(inner, "x"));
    assert!(!arena.contains(inner, "y"));
}

#[test]
fn test_duplicate_add_keeps_single_name() {
    let mut arena = ScopeArena::new();
    arena.add(ScopeId::ROOT, "x", false);
    arena.add(ScopeId::ROOT, "x", true);
    assert_eq!(arena.root().len(), 1);
}

#[test]
fn test_into_root_keeps_only_root_names() {
    let mut arena = ScopeArena::new();
    arena.add(ScopeId::ROOT, "top", true);
    let block = arena.push(ScopeId::ROOT, true);
    arena.add(block, "nested", true);
    let root = arena.into_root();
    assert!(root.has_own("top"));
    assert!(!root.has_own("nested"));
}
