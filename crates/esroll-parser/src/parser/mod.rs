//! ECMAScript module parser.

pub mod node;
pub mod node_arena;
pub mod walker;

mod state;
mod state_declarations;
mod state_expressions;
mod state_statements;

pub use node::{
    Class, ExportSpecifier, Function, ImportSpecifier, Literal, MethodKind, Node, NodeData,
    NodeIndex, PropertyKey, PropertyKind, VarKind,
};
pub use node_arena::NodeArena;
pub use state::{ParseDiagnostic, ParseResult, ParsedModule, ParserState, parse_module};
pub use walker::{Visitor, children, collect_binding_names, walk};

#[cfg(test)]
#[path = "tests/parser_tests.rs"]
mod parser_tests;
#[cfg(test)]
#[path = "tests/walker_tests.rs"]
mod walker_tests;
