//! Container traversal shared by the scalar rules.
//!
//! One rule configuration covers both the scalar and the
//! container-of-scalars shape of an attribute: sequences, sets, and map
//! values expand into per-element checks named `attribute[index]` in
//! iteration order. Container-level requiredness is settled once, before any
//! expansion.

use fieldguard_model::FieldValue;
use fieldguard_types::{messages, ConfigurationError, FieldPath};

/// The rule-level name override replaces the attribute name; the recursion
/// prefix applies to whichever wins.
pub(crate) fn resolve_name(
    prefix: &FieldPath,
    name_override: Option<&'static str>,
    attr_name: &'static str,
) -> FieldPath {
    prefix.child(name_override.unwrap_or(attr_name))
}

/// Dispatches `check` over the scalar or over each container element.
///
/// `required` controls the container-level precheck: an absent value, or a
/// required-and-empty container, yields exactly one `is required` error and
/// no expansion.
pub(crate) fn each_scalar<F>(
    name: &FieldPath,
    value: &FieldValue<'_>,
    required: bool,
    errors: &mut Vec<String>,
    mut check: F,
) -> Result<(), ConfigurationError>
where
    F: FnMut(&FieldPath, &FieldValue<'_>, &mut Vec<String>) -> Result<(), ConfigurationError>,
{
    match value {
        FieldValue::Absent => {
            if required {
                messages::required(name, errors);
            }
            Ok(())
        }
        FieldValue::Sequence(items) | FieldValue::Map(items) => {
            if required && items.is_empty() {
                messages::required(name, errors);
                return Ok(());
            }
            for (index, item) in items.iter().enumerate() {
                check(&name.indexed(index), item, errors)?;
            }
            Ok(())
        }
        scalar => check(name, scalar, errors),
    }
}
