use super::{traverse, Rule, RuleContext};
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{FieldValue, PatternSpec, Validatable};
use fieldguard_types::{messages, ConfigurationError, FieldPath};
use regex::Regex;
use std::sync::Arc;

/// Full-string regular-expression match. The pattern compiles once at
/// instantiation; an unparsable pattern is a configuration error surfaced
/// before any value is checked.
pub(crate) struct PatternRule {
    attr: Arc<ResolvedAttribute>,
    spec: PatternSpec,
    // Anchored form; error messages always cite the configured pattern.
    regex: Regex,
}

impl PatternRule {
    pub(crate) fn new(
        attr: Arc<ResolvedAttribute>,
        spec: PatternSpec,
    ) -> Result<Self, ConfigurationError> {
        let regex = Regex::new(&format!("^(?:{})$", spec.pattern)).map_err(|err| {
            ConfigurationError::InvalidPattern {
                attribute: attr.name.to_string(),
                reason: err.to_string(),
            }
        })?;
        Ok(Self { attr, spec, regex })
    }
}

impl Rule for PatternRule {
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
        let regex = &self.regex;

        traverse::each_scalar(&name, &value, !spec.nullable, errors, |name, value, errors| {
            let FieldValue::Text(text) = value else {
                return Err(ConfigurationError::UnsupportedValue {
                    rule: "pattern",
                    attribute: name.to_string(),
                    actual: value.shape(),
                });
            };

            if !spec.nullable {
                messages::require(name, Some(*text), errors);
            }
            if !regex.is_match(text) {
                messages::pattern_mismatch(name, spec.pattern, spec.message, errors);
            }
            Ok(())
        })
    }
}
