use super::{traverse, Rule, RuleContext};
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{CollectionSpec, FieldValue, Validatable};
use fieldguard_types::{messages, ConfigurationError, FieldPath};
use std::sync::Arc;

/// Container-level size bounds, checked once against the whole container,
/// never per element. Scalar shapes are a configuration defect.
pub(crate) struct CollectionRule {
    attr: Arc<ResolvedAttribute>,
    spec: CollectionSpec,
}

impl CollectionRule {
    pub(crate) fn new(attr: Arc<ResolvedAttribute>, spec: CollectionSpec) -> Self {
        Self { attr, spec }
    }
}

impl Rule for CollectionRule {
    fn perform(
        &self,
        instance: &dyn Validatable,
        _ctx: &RuleContext<'_>,
        prefix: &FieldPath,
        errors: &mut Vec<String>,
    ) -> Result<(), ConfigurationError> {
        let name = traverse::resolve_name(prefix, self.spec.name, self.attr.name);
        let value = self.attr.read(instance)?;

        match &value {
            FieldValue::Absent => {
                if !self.spec.nullable {
                    messages::required(&name, errors);
                }
                Ok(())
            }
            FieldValue::Sequence(items) | FieldValue::Map(items) => {
                if let Some(min) = self.spec.min_size {
                    messages::greater_than_or_equal(&name, items.len(), min, errors);
                }
                if let Some(max) = self.spec.max_size {
                    messages::less_than_or_equal(&name, items.len(), max, errors);
                }
                Ok(())
            }
            scalar => Err(ConfigurationError::UnsupportedValue {
                rule: "collection",
                attribute: name.to_string(),
                actual: scalar.shape(),
            }),
        }
    }
}
