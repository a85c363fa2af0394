//! Common types and utilities for the esroll bundler.
//!
//! This crate provides foundational types used across all esroll crates:
//! - Source spans (`Span`)
//! - Line/column lookup for byte offsets (`LineMap`, `Location`)
//! - The editable source-text view used when emitting statements (`SourceText`)
//! - Module identifiers shared by the binder and the bundler (`ModuleId`)
//! - Parser and resolver limits

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position types for line/column source locations
pub mod position;
pub use position::{LineMap, Location};

// Editable view over a module's source text
pub mod source_text;
pub use source_text::SourceText;

// Module identity inside a build
pub mod module_id;
pub use module_id::ModuleId;

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "tests/position_tests.rs"]
mod position_tests;
#[cfg(test)]
#[path = "tests/source_text_tests.rs"]
mod source_text_tests;
