//! Checking session and query surface over the tsg symbol graph.
//!
//! A [`CheckerSession`] owns one graph and everything tied to a checking
//! pass: options, collected diagnostics, and the expression and contextual
//! types the checker recorded. Read-only consumers go through
//! [`TypeQuery`].

pub mod options;
pub mod query;
pub mod session;
pub mod tracing_config;

pub use options::CheckerOptions;
pub use query::{TypeFlags, TypeQuery, type_flags};
pub use session::CheckerSession;
pub use tracing_config::{LogFormat, TracingConfig, init_tracing};
