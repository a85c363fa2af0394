//! ECMAScript module parser and AST for the esroll bundler.
//!
//! This crate provides:
//! - `parser::node` - AST node types (`NodeData`, `NodeIndex`)
//! - `parser::node_arena` - arena storage for nodes
//! - `ParserState` / `parse_module` - recursive descent parser
//! - `parser::walker` - traversal and binding-name helpers

pub mod parser;

pub use parser::*;
