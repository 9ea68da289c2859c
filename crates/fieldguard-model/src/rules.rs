use crate::validatable::Validatable;
use fieldguard_types::FieldPath;

/// Declarative rule configuration attached to an attribute.
///
/// A closed, tagged set: the engine dispatches on the tag, there is no
/// provider indirection. Every variant carries an optional display-name
/// override; the override replaces the attribute's declared name and is
/// still prefixed when validation recurses.
#[derive(Clone, Copy, Debug)]
pub enum RuleSpec {
    Required(RequiredSpec),
    Length(LengthSpec),
    Range(RangeSpec),
    Pattern(PatternSpec),
    Date(DateSpec),
    Collection(CollectionSpec),
    Nested(NestedSpec),
    Custom(CustomSpec),
}

impl RuleSpec {
    pub fn required() -> Self {
        RuleSpec::Required(RequiredSpec::default())
    }

    pub fn nested() -> Self {
        RuleSpec::Nested(NestedSpec::default())
    }

    pub fn custom(check: CustomCheck) -> Self {
        RuleSpec::Custom(CustomSpec { check, name: None })
    }

    /// Stable tag used in cache traces and configuration errors.
    pub fn kind(&self) -> &'static str {
        match self {
            RuleSpec::Required(_) => "required",
            RuleSpec::Length(_) => "length",
            RuleSpec::Range(_) => "range",
            RuleSpec::Pattern(_) => "pattern",
            RuleSpec::Date(_) => "date",
            RuleSpec::Collection(_) => "collection",
            RuleSpec::Nested(_) => "nested",
            RuleSpec::Custom(_) => "custom",
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self, RuleSpec::Nested(_))
    }

    pub fn name_override(&self) -> Option<&'static str> {
        match self {
            RuleSpec::Required(s) => s.name,
            RuleSpec::Length(s) => s.name,
            RuleSpec::Range(s) => s.name,
            RuleSpec::Pattern(s) => s.name,
            RuleSpec::Date(s) => s.name,
            RuleSpec::Collection(s) => s.name,
            RuleSpec::Nested(s) => s.name,
            RuleSpec::Custom(s) => s.name,
        }
    }
}

/// The value must be present; text must be non-blank. Containers must be
/// non-empty, and each text element non-blank.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequiredSpec {
    pub name: Option<&'static str>,
}

/// Character-count bounds for textual values. Absent values are skipped
/// unless `required` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct LengthSpec {
    pub required: bool,
    pub min: Option<usize>,
    pub max: Option<usize>,
    pub name: Option<&'static str>,
}

/// Numeric bound, integer or float. Comparisons are inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Bound {
    Int(i64),
    Float(f64),
}

/// Inclusive numeric bounds. `nullable` decides what absence means; there is
/// no engine-wide null policy.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeSpec {
    pub nullable: bool,
    pub min: Option<Bound>,
    pub max: Option<Bound>,
    pub name: Option<&'static str>,
}

/// Full-string regular-expression match. The configured `message`, when set,
/// replaces the stock sentence after the name.
#[derive(Clone, Copy, Debug)]
pub struct PatternSpec {
    pub pattern: &'static str,
    pub nullable: bool,
    pub message: Option<&'static str>,
    pub name: Option<&'static str>,
}

impl PatternSpec {
    pub fn new(pattern: &'static str) -> Self {
        Self {
            pattern,
            nullable: false,
            message: None,
            name: None,
        }
    }
}

/// Timestamp placement relative to now. `past`/`future` alone exclude today;
/// combined with `present` they include it.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateSpec {
    pub required: bool,
    pub past: bool,
    pub present: bool,
    pub future: bool,
    pub name: Option<&'static str>,
}

/// Container-level size bounds, checked once before any per-element
/// expansion. Nullable by default: an absent container passes unless
/// `nullable` is cleared.
#[derive(Clone, Copy, Debug)]
pub struct CollectionSpec {
    pub nullable: bool,
    pub min_size: Option<usize>,
    pub max_size: Option<usize>,
    pub name: Option<&'static str>,
}

impl Default for CollectionSpec {
    fn default() -> Self {
        Self {
            nullable: true,
            min_size: None,
            max_size: None,
            name: None,
        }
    }
}

/// Recurses validation into composite-valued attributes; absent elements are
/// skipped. Recursion halts at self-validating types only.
#[derive(Clone, Copy, Debug, Default)]
pub struct NestedSpec {
    pub name: Option<&'static str>,
}

/// One-off check over the whole instance, reported under the attribute's
/// resolved name.
pub type CustomCheck = fn(&dyn Validatable, &FieldPath, &mut Vec<String>);

#[derive(Clone, Copy, Debug)]
pub struct CustomSpec {
    pub check: CustomCheck,
    pub name: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_defaults_to_nullable() {
        assert!(CollectionSpec::default().nullable);
    }

    #[test]
    fn kinds_are_stable_tags() {
        assert_eq!(RuleSpec::required().kind(), "required");
        assert_eq!(RuleSpec::nested().kind(), "nested");
        assert_eq!(
            RuleSpec::Length(LengthSpec::default()).kind(),
            "length"
        );
    }
}
