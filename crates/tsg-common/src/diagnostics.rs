//! Diagnostic types and message lookup.
//!
//! Diagnostics are the only user-facing error channel of the symbol graph.
//! The specialization engine never aborts on bad input; it posts a
//! diagnostic through a [`DiagnosticSink`] and substitutes the dynamic type.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g., "see also" locations).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A diagnostic message with optional related information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related information spans (e.g., where a generic was declared)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
            related_information: Vec::new(),
        }
    }

    /// Create an error diagnostic from a registered code and its arguments.
    ///
    /// Falls back to the raw arguments joined by spaces when the code has no
    /// registered template.
    #[must_use]
    pub fn from_code(file: String, start: u32, length: u32, code: u32, args: &[&str]) -> Self {
        let message = match get_message_template(code) {
            Some(template) => format_message(template, args),
            None => args.join(" "),
        };
        let category = get_diagnostic_category(code).unwrap_or(DiagnosticCategory::Error);
        Self {
            file,
            start,
            length,
            message_text: message,
            category,
            code,
            related_information: Vec::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, file: String, start: u32, length: u32, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }
}

// =============================================================================
// Sinks
// =============================================================================

/// Receiver for diagnostics posted while the graph is being resolved or
/// specialized. Supplied by the caller that drives the checking pass.
pub trait DiagnosticSink {
    fn post(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn post(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

// =============================================================================
// Message table
// =============================================================================

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const GENERIC_TYPE_REFERENCES_ITSELF_WITH_WRAPPED_TYPE_PARAMETER: u32 = 2312;
    pub const GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS: u32 = 2314;
    pub const TYPE_INSTANTIATION_EXCESSIVELY_DEEP: u32 = 2589;
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::GENERIC_TYPE_REFERENCES_ITSELF_WITH_WRAPPED_TYPE_PARAMETER,
        category: DiagnosticCategory::Error,
        message: "A generic type may not reference itself with a wrapped form of its own type parameters: '{0}'.",
    },
    DiagnosticMessage {
        code: diagnostic_codes::GENERIC_TYPE_REQUIRES_TYPE_ARGUMENTS,
        category: DiagnosticCategory::Error,
        message: "Generic type '{0}' requires {1} type argument(s).",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_INSTANTIATION_EXCESSIVELY_DEEP,
        category: DiagnosticCategory::Error,
        message: "Type instantiation is excessively deep and possibly infinite.",
    },
];

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
///
/// Returns the template string with `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

/// Get the category for a diagnostic code.
#[must_use]
pub fn get_diagnostic_category(code: u32) -> Option<DiagnosticCategory> {
    get_diagnostic_message(code).map(|m| m.category)
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
