//! The closed rule set.
//!
//! One module per rule kind; [`instantiate`] is the provider: a match over
//! the configuration tag that binds a rule to its attribute. Construction
//! failures (an unparsable pattern, a rule aimed at a shape it can never
//! check) are configuration errors and never reach the data-error list.

use crate::engine::ValidationEngine;
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{RuleSpec, Validatable};
use fieldguard_types::{ConfigurationError, FieldPath};
use std::sync::Arc;

mod collection;
mod custom;
mod date;
mod length;
mod nested;
mod pattern;
mod range;
mod required;
pub(crate) mod traverse;

#[cfg(test)]
mod tests;

/// A live rule bound to one attribute of one type. Stateless with respect to
/// the values it checks; instances are cached and shared across calls.
pub trait Rule: Send + Sync {
    fn perform(
        &self,
        instance: &dyn Validatable,
        ctx: &RuleContext<'_>,
        prefix: &FieldPath,
        errors: &mut Vec<String>,
    ) -> Result<(), ConfigurationError>;
}

/// Hands rules the engine for nested recursion.
pub struct RuleContext<'e> {
    pub(crate) engine: &'e ValidationEngine,
}

pub(crate) fn instantiate(
    attr: Arc<ResolvedAttribute>,
    spec: &RuleSpec,
) -> Result<Arc<dyn Rule>, ConfigurationError> {
    Ok(match spec {
        RuleSpec::Required(spec) => Arc::new(required::RequiredRule::new(attr, *spec)),
        RuleSpec::Length(spec) => Arc::new(length::LengthRule::new(attr, *spec)),
        RuleSpec::Range(spec) => Arc::new(range::RangeRule::new(attr, *spec)),
        RuleSpec::Pattern(spec) => Arc::new(pattern::PatternRule::new(attr, *spec)?),
        RuleSpec::Date(spec) => Arc::new(date::DateRule::new(attr, *spec)),
        RuleSpec::Collection(spec) => Arc::new(collection::CollectionRule::new(attr, *spec)),
        RuleSpec::Nested(spec) => Arc::new(nested::NestedRule::new(attr, *spec)),
        RuleSpec::Custom(spec) => Arc::new(custom::CustomRule::new(attr, *spec)),
    })
}
