//! Errors raised while building a bundle. Every variant aborts the build.

use esroll_common::LineMap;
use esroll_parser::ParseDiagnostic;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum BundleError {
    /// The same local name is imported twice in one module.
    DuplicateBinding {
        /// Module containing the imports
        module: PathBuf,
        /// The repeated local name
        name: String,
    },
    /// A module was asked for a name it does not export.
    ExportNotFound {
        /// Module that was searched
        module: PathBuf,
        /// Requested export name
        name: String,
    },
    /// A namespace import or `export * as ns` was used as a value.
    UnsupportedNamespace {
        /// Module that holds the namespace binding
        module: PathBuf,
        /// Local or exported name of the namespace
        name: String,
    },
    /// Following imports and re-exports for a name revisited the same binding.
    CircularReexport {
        /// Module where the cycle closed
        module: PathBuf,
        /// Name being resolved there
        name: String,
    },
    /// The reader has no file for this id.
    NotFound {
        path: PathBuf,
    },
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        file: PathBuf,
        /// 1-based
        line: u32,
        /// 1-based
        column: u32,
        message: String,
    },
}

impl BundleError {
    /// Attach a file and line/column to a parser diagnostic.
    pub fn parse(file: &Path, source: &str, diagnostic: &ParseDiagnostic) -> BundleError {
        let location = LineMap::build(source).location(diagnostic.span.start);
        BundleError::Parse {
            file: file.to_path_buf(),
            line: location.line,
            column: location.column,
            message: diagnostic.message.clone(),
        }
    }

    /// The file this error is about.
    pub fn path(&self) -> &Path {
        match self {
            BundleError::DuplicateBinding { module, .. }
            | BundleError::ExportNotFound { module, .. }
            | BundleError::UnsupportedNamespace { module, .. }
            | BundleError::CircularReexport { module, .. } => module,
            BundleError::NotFound { path } | BundleError::Io { path, .. } => path,
            BundleError::Parse { file, .. } => file,
        }
    }
}

impl fmt::Display for BundleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleError::DuplicateBinding { module, name } => write!(
                f,
                "Duplicated import '{name}' in '{}'.",
                module.display()
            ),
            BundleError::ExportNotFound { module, name } => write!(
                f,
                "Module '{}' has no exported member '{name}'.",
                module.display()
            ),
            BundleError::UnsupportedNamespace { module, name } => write!(
                f,
                "Namespace binding '{name}' in '{}' cannot be bundled.",
                module.display()
            ),
            BundleError::CircularReexport { module, name } => write!(
                f,
                "Circular re-export of '{name}' detected in '{}'.",
                module.display()
            ),
            BundleError::NotFound { path } => {
                write!(f, "Cannot find module '{}'.", path.display())
            }
            BundleError::Io { path, source } => {
                write!(f, "Failed to read '{}': {source}", path.display())
            }
            BundleError::Parse {
                file,
                line,
                column,
                message,
            } => write!(f, "{}:{line}:{column}: {message}", file.display()),
        }
    }
}

impl std::error::Error for BundleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BundleError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
