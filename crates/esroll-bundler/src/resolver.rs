//! Module id resolution and source loading.
//!
//! A module id is a normalized path. It is only used as a cache key and as
//! the argument handed to a [`FileReader`].

use crate::error::BundleError;
use rustc_hash::FxHashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Maps an import specifier to the id of the module it names.
pub trait Resolver {
    fn resolve(&self, importer: &Path, importee: &str) -> PathBuf;
}

/// Loads the source text of a module id.
pub trait FileReader {
    fn read(&self, id: &Path) -> Result<String, BundleError>;
}

/// Resolves specifiers relative to the importing file.
///
/// `./b` imported from `src/a.js` becomes `src/b.js`: the specifier is joined
/// to the importer's directory, `.` and `..` segments are collapsed, and
/// `.js` is appended when the result has no extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathResolver;

impl Resolver for PathResolver {
    fn resolve(&self, importer: &Path, importee: &str) -> PathBuf {
        let base = importer.parent().unwrap_or_else(|| Path::new(""));
        let joined = normalize_path(&base.join(importee));
        if joined.extension().is_some() {
            return joined;
        }
        let mut with_extension = joined.into_os_string();
        with_extension.push(".js");
        PathBuf::from(with_extension)
    }
}

/// Collapse `.` and `..` without touching the filesystem. Leading `..`
/// segments of a relative path are kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            Component::RootDir | Component::Normal(_) | Component::Prefix(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }

    normalized
}

/// Reads modules from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read(&self, id: &Path) -> Result<String, BundleError> {
        std::fs::read_to_string(id).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => BundleError::NotFound {
                path: id.to_path_buf(),
            },
            _ => BundleError::Io {
                path: id.to_path_buf(),
                source,
            },
        })
    }
}

/// Serves modules from an in-memory map keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    files: FxHashMap<PathBuf, String>,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<PathBuf>, source: impl Into<String>) {
        self.files.insert(id.into(), source.into());
    }

    pub fn with_file(mut self, id: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.insert(id, source);
        self
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FileReader for MemoryReader {
    fn read(&self, id: &Path) -> Result<String, BundleError> {
        self.files
            .get(id)
            .cloned()
            .ok_or_else(|| BundleError::NotFound {
                path: id.to_path_buf(),
            })
    }
}
