//! Common types and utilities shared by the tsg crates.
//!
//! This crate provides foundational types used across the symbol graph,
//! the specialization engine and the checker session:
//! - Diagnostics and message templates
//! - Source spans and locations
//! - Centralized limits
//! - Recursion guards for cyclic graph walks

// Diagnostics - user-facing messages posted by the engine
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticRelatedInformation,
    DiagnosticSink, diagnostic_codes, format_message, get_message_template,
};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{SourceLocation, Span};

// Centralized limits and thresholds
pub mod limits;

// Recursion guards shared by lookups, formatting and specialization
pub mod recursion;
pub use recursion::{DepthCounter, RecursionGuard, RecursionProfile, RecursionResult};
