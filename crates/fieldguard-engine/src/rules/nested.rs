use super::{traverse, Rule, RuleContext};
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{FieldValue, NestedSpec, Validatable};
use fieldguard_types::{ConfigurationError, FieldPath};
use std::sync::Arc;

/// Recurses validation into composite-valued attributes under the dotted
/// path `prefix.attribute` (indexed for containers). Absent elements are
/// skipped; all recursive errors land in the same flat list. Recursion
/// halts only at self-validating types; the engine performs no cycle
/// detection.
pub(crate) struct NestedRule {
    attr: Arc<ResolvedAttribute>,
    spec: NestedSpec,
}

impl NestedRule {
    pub(crate) fn new(attr: Arc<ResolvedAttribute>, spec: NestedSpec) -> Self {
        Self { attr, spec }
    }
}

impl Rule for NestedRule {
    fn perform(
        &self,
        instance: &dyn Validatable,
        ctx: &RuleContext<'_>,
        prefix: &FieldPath,
        errors: &mut Vec<String>,
    ) -> Result<(), ConfigurationError> {
        let name = traverse::resolve_name(prefix, self.spec.name, self.attr.name);
        let value = self.attr.read(instance)?;

        match &value {
            FieldValue::Absent => Ok(()),
            FieldValue::Composite(child) => {
                child.with(|child| ctx.engine.validate_value(child, &name, errors))
            }
            FieldValue::Sequence(items) | FieldValue::Map(items) => {
                for (index, item) in items.iter().enumerate() {
                    match item {
                        FieldValue::Absent => {}
                        FieldValue::Composite(child) => child.with(|child| {
                            ctx.engine.validate_value(child, &name.indexed(index), errors)
                        })?,
                        other => {
                            return Err(ConfigurationError::UnsupportedValue {
                                rule: "nested",
                                attribute: name.indexed(index).to_string(),
                                actual: other.shape(),
                            });
                        }
                    }
                }
                Ok(())
            }
            other => Err(ConfigurationError::UnsupportedValue {
                rule: "nested",
                attribute: name.to_string(),
                actual: other.shape(),
            }),
        }
    }
}
