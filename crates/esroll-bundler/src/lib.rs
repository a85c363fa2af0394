//! Tree-shaking bundler for ECMAScript modules.
//!
//! Starting from an entry module, the [`Bundler`] pulls in only the top-level
//! statements the entry transitively reads, following imports and re-exports
//! across files, and concatenates their source in dependency order.
//!
//! ```ignore
//! let reader = MemoryReader::new()
//!     .with_file("/src/main.js", "import { f } from './lib'; f();")
//!     .with_file("/src/lib.js", "export function f() {}\nexport function unused() {}");
//! let mut bundler = Bundler::with_io(BundleOptions::new("/src/main.js"), PathResolver, reader);
//! assert_eq!(bundler.build()?, "function f() {}\nf();\n");
//! ```

pub mod error;
pub use error::BundleError;

pub mod resolver;
pub use resolver::{FileReader, FsReader, MemoryReader, PathResolver, Resolver};

pub mod module;
pub use module::{ExportBinding, ExportTarget, ImportBinding, Module, NameMap};

pub mod bundler;
pub use bundler::{BundleOptions, Bundler, StatementRef};

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;
#[cfg(test)]
#[path = "tests/module_tests.rs"]
mod module_tests;
#[cfg(test)]
#[path = "tests/bundler_tests.rs"]
mod bundler_tests;
