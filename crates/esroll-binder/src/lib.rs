//! Scope analysis for esroll.
//!
//! Each top-level statement of a module is analysed in isolation:
//! - `defines`: names bound directly at the statement's root scope
//! - `depends_on`: identifiers the statement reads but does not bind
//!
//! The bundler uses these two sets to pull in exactly the statements an entry
//! module needs.

pub mod scope;
pub use scope::{Scope, ScopeArena, ScopeId};

mod analysis;

pub mod statement;
pub use statement::{NameSet, Statement, StatementSummary};

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;
#[cfg(test)]
#[path = "tests/statement_tests.rs"]
mod statement_tests;
