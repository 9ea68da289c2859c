//! The fixed error-message grammar.
//!
//! Every data-validation error is one of these sentence templates. Helpers
//! append to the caller's error list; a `None`/empty value is treated as
//! missing only where the template says so; absence policy stays with the
//! individual rules.

use crate::path::FieldPath;
use std::fmt::Display;

/// Missing means absent or blank after trimming.
pub fn require(name: &FieldPath, value: Option<&str>, errors: &mut Vec<String>) {
    if value.is_none_or(|v| v.trim().is_empty()) {
        errors.push(format!("{name} is required"));
    }
}

pub fn required(name: &FieldPath, errors: &mut Vec<String>) {
    errors.push(format!("{name} is required"));
}

pub fn max_length(name: &FieldPath, value: Option<&str>, max: usize, errors: &mut Vec<String>) {
    let Some(value) = value else { return };
    if value.chars().count() > max {
        errors.push(format!("{name} is limited to {max} characters"));
    }
}

pub fn min_length(name: &FieldPath, value: Option<&str>, min: usize, errors: &mut Vec<String>) {
    let Some(value) = value else { return };
    if value.chars().count() < min {
        errors.push(format!("{name} must contain at least {min} characters"));
    }
}

/// Inclusive upper bound: `actual == max` passes.
pub fn less_than_or_equal<T: PartialOrd + Display>(
    name: &FieldPath,
    actual: T,
    max: T,
    errors: &mut Vec<String>,
) {
    if actual > max {
        errors.push(format!("{name} must be less-than or equal-to {max}"));
    }
}

/// Inclusive lower bound: `actual == min` passes.
pub fn greater_than_or_equal<T: PartialOrd + Display>(
    name: &FieldPath,
    actual: T,
    min: T,
    errors: &mut Vec<String>,
) {
    if actual < min {
        errors.push(format!("{name} must be greater-than or equal-to {min}"));
    }
}

/// The override message, when configured, is appended after the name instead
/// of the stock pattern sentence.
pub fn pattern_mismatch(
    name: &FieldPath,
    pattern: &str,
    message: Option<&str>,
    errors: &mut Vec<String>,
) {
    match message.filter(|m| !m.trim().is_empty()) {
        Some(message) => errors.push(format!("{name} {message}")),
        None => errors.push(format!(
            "{name} does not match the regular expression pattern: {pattern}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name() -> FieldPath {
        FieldPath::new("field")
    }

    #[test]
    fn require_treats_blank_as_missing() {
        let mut errors = Vec::new();
        require(&name(), Some("   "), &mut errors);
        require(&name(), None, &mut errors);
        require(&name(), Some("ok"), &mut errors);
        assert_eq!(errors, vec!["field is required", "field is required"]);
    }

    #[test]
    fn length_helpers_skip_missing_values() {
        let mut errors = Vec::new();
        max_length(&name(), None, 3, &mut errors);
        min_length(&name(), None, 3, &mut errors);
        assert!(errors.is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut errors = Vec::new();
        less_than_or_equal(&name(), 5, 5, &mut errors);
        greater_than_or_equal(&name(), 5, 5, &mut errors);
        assert!(errors.is_empty());

        less_than_or_equal(&name(), 6, 5, &mut errors);
        assert_eq!(errors, vec!["field must be less-than or equal-to 5"]);
    }

    #[test]
    fn pattern_override_replaces_stock_sentence() {
        let mut errors = Vec::new();
        pattern_mismatch(&name(), "[a-z]+", Some("must be lowercase"), &mut errors);
        pattern_mismatch(&name(), "[a-z]+", None, &mut errors);
        assert_eq!(
            errors,
            vec![
                "field must be lowercase",
                "field does not match the regular expression pattern: [a-z]+",
            ]
        );
    }
}
