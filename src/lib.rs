//! esroll: a tree-shaking bundler for ECMAScript modules.
//!
//! The pipeline is split across workspace crates and re-exported here:
//!
//! - [`scanner`]: tokens, trivia, template and regex re-scanning
//! - [`parser`]: the module AST (`NodeArena` + `NodeData`) and its walker
//! - [`binder`]: per-statement scope analysis (`defines` / `depends_on`)
//! - [`bundler`]: module graph, expansion and code generation
//!
//! ```ignore
//! let code = esroll::bundle(esroll::BundleOptions::new("src/main.js"))?;
//! print!("{code}");
//! ```

pub use esroll_binder as binder;
pub use esroll_bundler as bundler;
pub use esroll_common as common;
pub use esroll_parser as parser;
pub use esroll_scanner as scanner;

pub use esroll_binder::{Statement, StatementSummary};
pub use esroll_bundler::{
    BundleError, BundleOptions, Bundler, FileReader, FsReader, MemoryReader, Module, PathResolver,
    Resolver,
};
pub use esroll_common::{LineMap, Location, ModuleId, SourceText, Span};

// Tracing subscriber setup for the binary
pub mod tracing_config;
#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;

/// Bundle `options.entry` from disk and return the code.
pub fn bundle(options: BundleOptions) -> Result<String, BundleError> {
    Bundler::new(options).build()
}
