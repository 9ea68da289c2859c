use super::{traverse, Rule, RuleContext};
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{FieldValue, LengthSpec, Validatable};
use fieldguard_types::{messages, ConfigurationError, FieldPath};
use std::sync::Arc;

/// Character-count bounds for text. Absent values are skipped unless the
/// rule is marked required; non-text shapes are a configuration defect.
pub(crate) struct LengthRule {
    attr: Arc<ResolvedAttribute>,
    spec: LengthSpec,
}

impl LengthRule {
    pub(crate) fn new(attr: Arc<ResolvedAttribute>, spec: LengthSpec) -> Self {
        Self { attr, spec }
    }
}

impl Rule for LengthRule {
    fn perform(
        &self,
        instance: &dyn Validatable,
        _ctx: &RuleContext<'_>,
        prefix: &FieldPath,
        errors: &mut Vec<String>,
    ) -> Result<(), ConfigurationError> {
        let name = traverse::resolve_name(prefix, self.spec.name, self.attr.name);
        let value = self.attr.read(instance)?;
        let spec = self.spec;

        traverse::each_scalar(&name, &value, spec.required, errors, |name, value, errors| {
            let FieldValue::Text(text) = value else {
                return Err(ConfigurationError::UnsupportedValue {
                    rule: "length",
                    attribute: name.to_string(),
                    actual: value.shape(),
                });
            };

            if spec.required {
                messages::require(name, Some(*text), errors);
            }
            if let Some(min) = spec.min {
                messages::min_length(name, Some(*text), min, errors);
            }
            if let Some(max) = spec.max {
                messages::max_length(name, Some(*text), max, errors);
            }
            Ok(())
        })
    }
}
