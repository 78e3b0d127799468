//! Common types and utilities for the mudz analysis engine.
//!
//! This crate provides foundational types used across all mudz crates:
//! - Source ranges (`TextRange`) over byte offsets
//! - Named source positions and line/column conversion (`SourcePosition`, `LineMap`)
//! - Diagnostics rendered from parse sentinels
//! - Analysis limits and thresholds

// TextRange - half-open byte ranges with closed-range queries
pub mod span;
pub use span::TextRange;

// Position/Range types for source locations
pub mod position;
pub use position::{LineMap, Position, Range, SourcePosition};

// Diagnostics
pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/position_tests.rs"]
mod position_tests;
#[cfg(test)]
#[path = "../tests/span_tests.rs"]
mod span_tests;
#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod diagnostics_tests;
