use crate::error::BundleError;
use crate::resolver::*;
use std::path::{Path, PathBuf};

#[test]
fn test_resolves_sibling_and_appends_js() {
    let resolved = PathResolver.resolve(Path::new("/src/main.js"), "./util");
    assert_eq!(resolved, PathBuf::from("/src/util.js"));
}

#[test]
fn test_resolves_parent_directories() {
    let resolved = PathResolver.resolve(Path::new("/src/app/main.js"), "../lib/./x");
    assert_eq!(resolved, PathBuf::from("/src/lib/x.js"));
}

#[test]
fn test_keeps_existing_extension() {
    let resolved = PathResolver.resolve(Path::new("/src/main.js"), "./data.mjs");
    assert_eq!(resolved, PathBuf::from("/src/data.mjs"));
}

#[test]
fn test_relative_importer_keeps_leading_parent() {
    let resolved = PathResolver.resolve(Path::new("main.js"), "../shared/x");
    assert_eq!(resolved, PathBuf::from("../shared/x.js"));
}

#[test]
fn test_normalize_path_collapses_segments() {
    assert_eq!(normalize_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
    assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
    assert_eq!(normalize_path(Path::new("../../a")), PathBuf::from("../../a"));
}

#[test]
fn test_memory_reader_serves_inserted_files() {
    let reader = MemoryReader::new().with_file("/a.js", "let a;");
    assert_eq!(reader.len(), 1);
    assert_eq!(reader.read(Path::new("/a.js")).expect("read"), "let a;");
    assert!(matches!(
        reader.read(Path::new("/b.js")),
        Err(BundleError::NotFound { path }) if path == Path::new("/b.js")
    ));
}

#[test]
fn test_fs_reader_reports_missing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.js");
    assert!(matches!(
        FsReader.read(&missing),
        Err(BundleError::NotFound { path }) if path == missing
    ));
}
