//! Engine configuration.

use tsg_common::limits::MAX_SPECIALIZATION_DEPTH;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpecializationOptions {
    /// Nesting limit for specialization requests. Exceeding it posts an
    /// "excessively deep" diagnostic and yields `any`.
    pub max_depth: u32,
    /// Post a diagnostic when a generic is specialized with a wrapped form
    /// of its own type parameter. The offending argument becomes `any`
    /// either way.
    pub report_self_reference: bool,
    /// Post a diagnostic when more type arguments are supplied than the
    /// generic declares.
    pub report_excess_arguments: bool,
}

impl Default for SpecializationOptions {
    fn default() -> Self {
        Self {
            max_depth: MAX_SPECIALIZATION_DEPTH,
            report_self_reference: true,
            report_excess_arguments: true,
        }
    }
}
