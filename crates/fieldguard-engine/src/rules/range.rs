use super::{traverse, Rule, RuleContext};
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{Bound, FieldValue, RangeSpec, Validatable};
use fieldguard_types::{messages, ConfigurationError, FieldPath};
use std::sync::Arc;

/// Inclusive numeric bounds over integer and float values. Integer values
/// against integer bounds compare exactly; mixed comparisons promote to
/// float.
pub(crate) struct RangeRule {
    attr: Arc<ResolvedAttribute>,
    spec: RangeSpec,
}

impl RangeRule {
    pub(crate) fn new(attr: Arc<ResolvedAttribute>, spec: RangeSpec) -> Self {
        Self { attr, spec }
    }
}

fn check_min(name: &FieldPath, value: &FieldValue<'_>, min: Bound, errors: &mut Vec<String>) {
    match (value, min) {
        (FieldValue::Int(actual), Bound::Int(min)) => {
            messages::greater_than_or_equal(name, *actual, min, errors);
        }
        (FieldValue::Int(actual), Bound::Float(min)) => {
            messages::greater_than_or_equal(name, *actual as f64, min, errors);
        }
        (FieldValue::Float(actual), Bound::Int(min)) => {
            messages::greater_than_or_equal(name, *actual, min as f64, errors);
        }
        (FieldValue::Float(actual), Bound::Float(min)) => {
            messages::greater_than_or_equal(name, *actual, min, errors);
        }
        _ => {}
    }
}

fn check_max(name: &FieldPath, value: &FieldValue<'_>, max: Bound, errors: &mut Vec<String>) {
    match (value, max) {
        (FieldValue::Int(actual), Bound::Int(max)) => {
            messages::less_than_or_equal(name, *actual, max, errors);
        }
        (FieldValue::Int(actual), Bound::Float(max)) => {
            messages::less_than_or_equal(name, *actual as f64, max, errors);
        }
        (FieldValue::Float(actual), Bound::Int(max)) => {
            messages::less_than_or_equal(name, *actual, max as f64, errors);
        }
        (FieldValue::Float(actual), Bound::Float(max)) => {
            messages::less_than_or_equal(name, *actual, max, errors);
        }
        _ => {}
    }
}

impl Rule for RangeRule {
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

        traverse::each_scalar(&name, &value, !spec.nullable, errors, |name, value, errors| {
            if !matches!(value, FieldValue::Int(_) | FieldValue::Float(_)) {
                return Err(ConfigurationError::UnsupportedValue {
                    rule: "range",
                    attribute: name.to_string(),
                    actual: value.shape(),
                });
            }

            if let Some(min) = spec.min {
                check_min(name, value, min, errors);
            }
            if let Some(max) = spec.max {
                check_max(name, value, max, errors);
            }
            Ok(())
        })
    }
}
