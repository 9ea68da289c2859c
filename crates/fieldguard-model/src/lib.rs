//! Declarative descriptor model for validatable types.
//!
//! A modeled type declares, once and statically, the ordered list of its
//! validatable attributes: a bound accessor producing a [`value::FieldValue`]
//! view, the rule configurations attached to that attribute, and any encoder
//! descriptors for the sanitization pass. The engine consumes these tables;
//! nothing here performs validation itself.

#![forbid(unsafe_code)]

pub mod declare;
pub mod rules;
pub mod validatable;
pub mod value;

pub use declare::{
    attribute, AttributeBuilder, AttributeDecl, Extension, Getter, MutGetter, TypeCheck,
    TypeDeclaration, TypeDeclarationBuilder,
};
pub use rules::{
    Bound, CollectionSpec, CustomCheck, CustomSpec, DateSpec, LengthSpec, NestedSpec, PatternSpec,
    RangeSpec, RequiredSpec, RuleSpec,
};
pub use validatable::{Declared, SelfValidating, Validatable};
pub use value::{Composite, CompositeMut, FieldMut, FieldValue};
