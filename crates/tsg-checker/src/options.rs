//! Checker configuration.

use serde::Deserialize;
use tsg_common::limits::MAX_SPECIALIZATION_DEPTH;
use tsg_solver::SpecializationOptions;

/// Options for one checking session.
///
/// Deserializes from the `camelCase` keys used in project configuration
/// files; absent keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerOptions {
    /// Report generics specialized with a wrapped form of their own type
    /// parameters.
    pub report_self_reference: bool,
    /// Report type argument lists longer than the generic's parameter list.
    pub report_excess_type_arguments: bool,
    pub max_specialization_depth: u32,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        Self {
            report_self_reference: true,
            report_excess_type_arguments: true,
            max_specialization_depth: MAX_SPECIALIZATION_DEPTH,
        }
    }
}

impl CheckerOptions {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Engine options derived from these settings. A zero depth limit is
    /// treated as unset.
    pub fn specialization_options(&self) -> SpecializationOptions {
        let max_depth = if self.max_specialization_depth == 0 {
            MAX_SPECIALIZATION_DEPTH
        } else {
            self.max_specialization_depth
        };
        SpecializationOptions {
            max_depth,
            report_self_reference: self.report_self_reference,
            report_excess_arguments: self.report_excess_type_arguments,
        }
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
