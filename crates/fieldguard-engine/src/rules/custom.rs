use super::{traverse, Rule, RuleContext};
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{CustomSpec, Validatable};
use fieldguard_types::{ConfigurationError, FieldPath};
use std::sync::Arc;

/// Hands the whole instance to a user check, reported under the attribute's
/// resolved name. Absence policy is entirely the check's business.
pub(crate) struct CustomRule {
    attr: Arc<ResolvedAttribute>,
    spec: CustomSpec,
}

impl CustomRule {
    pub(crate) fn new(attr: Arc<ResolvedAttribute>, spec: CustomSpec) -> Self {
        Self { attr, spec }
    }
}

impl Rule for CustomRule {
    fn perform(
        &self,
        instance: &dyn Validatable,
        _ctx: &RuleContext<'_>,
        prefix: &FieldPath,
        errors: &mut Vec<String>,
    ) -> Result<(), ConfigurationError> {
        let name = traverse::resolve_name(prefix, self.spec.name, self.attr.name);
        (self.spec.check)(instance, &name, errors);
        Ok(())
    }
}
