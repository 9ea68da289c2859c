use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical dotted attribute path used in error messages.
///
/// Normalization rules are intentionally simple and deterministic:
/// - segments joined with `.`
/// - container elements suffixed with `[index]`
/// - the root path is empty and contributes no separator
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn root() -> Self {
        FieldPath(String::new())
    }

    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let mut v = s.as_ref();
        while let Some(rest) = v.strip_prefix('.') {
            v = rest;
        }
        FieldPath(v.trim_end_matches('.').to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends a named segment, dot-joined unless this path is the root.
    pub fn child(&self, name: &str) -> FieldPath {
        if self.0.is_empty() {
            FieldPath::new(name)
        } else {
            FieldPath(format!("{}.{}", self.0, name))
        }
    }

    /// Appends a positional element suffix: `name` becomes `name[index]`.
    pub fn indexed(&self, index: usize) -> FieldPath {
        FieldPath(format!("{}[{}]", self.0, index))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        FieldPath::new(value)
    }
}
