use crate::validatable::Validatable;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use time::OffsetDateTime;

/// Borrowed view of one attribute's current value.
///
/// Accessors normalize the owning struct's field into this shape; the engine
/// and the rules dispatch on it. `Map` carries the map's *values* in
/// iteration order; element names never depend on key text.
pub enum FieldValue<'a> {
    Absent,
    Text(&'a str),
    Int(i64),
    Float(f64),
    Timestamp(OffsetDateTime),
    Composite(Composite<'a>),
    Sequence(Vec<FieldValue<'a>>),
    Map(Vec<FieldValue<'a>>),
}

impl<'a> FieldValue<'a> {
    pub fn text(value: &'a str) -> Self {
        FieldValue::Text(value)
    }

    /// `None` maps to `Absent`.
    pub fn opt_text(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Text)
    }

    pub fn int(value: impl Into<i64>) -> Self {
        FieldValue::Int(value.into())
    }

    pub fn opt_int(value: Option<i64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Int)
    }

    pub fn float(value: f64) -> Self {
        FieldValue::Float(value)
    }

    pub fn opt_float(value: Option<f64>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Float)
    }

    pub fn timestamp(value: OffsetDateTime) -> Self {
        FieldValue::Timestamp(value)
    }

    pub fn opt_timestamp(value: Option<OffsetDateTime>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::Timestamp)
    }

    pub fn composite(value: &'a dyn Validatable) -> Self {
        FieldValue::Composite(Composite::Borrowed(value))
    }

    /// A child held behind `Rc<RefCell<_>>`, as object graphs with
    /// back-references require.
    pub fn shared(value: Rc<RefCell<dyn Validatable>>) -> Self {
        FieldValue::Composite(Composite::Shared(value))
    }

    pub fn sequence(items: impl IntoIterator<Item = FieldValue<'a>>) -> Self {
        FieldValue::Sequence(items.into_iter().collect())
    }

    /// Ordered sequence of text elements.
    pub fn texts(items: impl IntoIterator<Item = &'a str>) -> Self {
        FieldValue::Sequence(items.into_iter().map(FieldValue::Text).collect())
    }

    /// Build the map view from the map's values, in iteration order.
    pub fn map_values(values: impl IntoIterator<Item = FieldValue<'a>>) -> Self {
        FieldValue::Map(values.into_iter().collect())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// Shape label used in configuration-error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            FieldValue::Absent => "absent",
            FieldValue::Text(_) => "text",
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::Timestamp(_) => "timestamp",
            FieldValue::Composite(_) => "composite",
            FieldValue::Sequence(_) => "sequence",
            FieldValue::Map(_) => "map",
        }
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Absent => f.write_str("Absent"),
            FieldValue::Text(v) => f.debug_tuple("Text").field(v).finish(),
            FieldValue::Int(v) => f.debug_tuple("Int").field(v).finish(),
            FieldValue::Float(v) => f.debug_tuple("Float").field(v).finish(),
            FieldValue::Timestamp(v) => f.debug_tuple("Timestamp").field(v).finish(),
            FieldValue::Composite(v) => f.debug_tuple("Composite").field(v).finish(),
            FieldValue::Sequence(items) => f.debug_tuple("Sequence").field(items).finish(),
            FieldValue::Map(items) => f.debug_tuple("Map").field(items).finish(),
        }
    }
}

/// A nested validatable value: plain-owned children borrow; graph children
/// (including upgraded `Weak` back-references) share.
pub enum Composite<'a> {
    Borrowed(&'a dyn Validatable),
    Shared(Rc<RefCell<dyn Validatable>>),
}

impl Composite<'_> {
    /// Runs `f` against the child value, holding any interior borrow only
    /// for the duration of the call.
    pub fn with<R>(&self, f: impl FnOnce(&dyn Validatable) -> R) -> R {
        match self {
            Composite::Borrowed(value) => f(*value),
            Composite::Shared(cell) => f(&*cell.borrow()),
        }
    }
}

impl fmt::Debug for Composite<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = self.with(|v| v.declaration().name());
        f.debug_tuple("Composite").field(&type_name).finish()
    }
}

/// Mutable view used only by the encoding pass.
pub enum FieldMut<'a> {
    /// Every textual slot of the attribute (one for a scalar, one per
    /// element for containers of text).
    Texts(Vec<&'a mut String>),
    /// Every child of a composite attribute, for encoder descent.
    Children(Vec<CompositeMut<'a>>),
}

pub enum CompositeMut<'a> {
    Borrowed(&'a mut dyn Validatable),
    Shared(Rc<RefCell<dyn Validatable>>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_helpers_map_none_to_absent() {
        assert!(FieldValue::opt_text(None).is_absent());
        assert!(FieldValue::opt_int(None).is_absent());
        assert!(matches!(
            FieldValue::opt_text(Some("x")),
            FieldValue::Text("x")
        ));
    }

    #[test]
    fn shape_labels_are_stable() {
        assert_eq!(FieldValue::Absent.shape(), "absent");
        assert_eq!(FieldValue::int(3).shape(), "integer");
        assert_eq!(FieldValue::texts(["a"]).shape(), "sequence");
    }
}
