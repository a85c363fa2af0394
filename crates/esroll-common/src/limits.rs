//! Centralized limits for the esroll pipeline.
//!
//! # Categories
//!
//! - **Recursion Depths**: the parser and the AST walker recurse on source
//!   nesting; everything downstream of them runs on explicit work lists.
//! - **Capacity Limits**: pre-allocation sizes.

/// Maximum syntactic nesting the parser accepts before giving up.
///
/// Each nested expression or statement adds a frame to the recursive descent
/// parser and later to the scope walker. Past this depth the parser reports
/// an error instead of overflowing the stack.
///
/// ```javascript
/// // Deeply nested parentheses / array literals / blocks:
/// const x = ((((((((((((((((((((1))))))))))))))))))));
/// ```
pub const MAX_PARSE_DEPTH: u32 = 500;

/// Maximum number of re-export hops followed while resolving one name.
///
/// Alias cycles are detected exactly. A chain longer than this is reported
/// as a circular re-export as well.
pub const MAX_REEXPORT_HOPS: usize = 10_000;

/// Nodes pre-allocated per byte of source text (rough ratio for JS sources).
pub const NODES_PER_SOURCE_BYTE_DIVISOR: usize = 4;
