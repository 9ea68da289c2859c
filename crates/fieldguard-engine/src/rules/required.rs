use super::{traverse, Rule, RuleContext};
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{FieldValue, RequiredSpec, Validatable};
use fieldguard_types::{messages, ConfigurationError, FieldPath};
use std::sync::Arc;

/// Presence check. Text must be non-blank; any other present scalar counts
/// as provided. Containers must be non-empty, with each text element
/// non-blank.
pub(crate) struct RequiredRule {
    attr: Arc<ResolvedAttribute>,
    spec: RequiredSpec,
}

impl RequiredRule {
    pub(crate) fn new(attr: Arc<ResolvedAttribute>, spec: RequiredSpec) -> Self {
        Self { attr, spec }
    }
}

impl Rule for RequiredRule {
    fn perform(
        &self,
        instance: &dyn Validatable,
        _ctx: &RuleContext<'_>,
        prefix: &FieldPath,
        errors: &mut Vec<String>,
    ) -> Result<(), ConfigurationError> {
        let name = traverse::resolve_name(prefix, self.spec.name, self.attr.name);
        let value = self.attr.read(instance)?;

        traverse::each_scalar(&name, &value, true, errors, |name, value, errors| {
            if let FieldValue::Text(text) = value {
                messages::require(name, Some(*text), errors);
            }
            Ok(())
        })
    }
}
