//! Static type declarations.
//!
//! The declaration table replaces runtime introspection: each modeled type
//! builds its `TypeDeclaration` exactly once (typically behind a
//! `std::sync::LazyLock` static) listing attributes in declaration order.
//! Accessors are bound closures over the concrete type; the builder wraps
//! them with the downcast from `dyn Validatable`, and a mismatch there
//! surfaces as a [`MetadataError`], never as a data error.

use crate::rules::RuleSpec;
use crate::validatable::{Declared, Validatable};
use crate::value::{CompositeMut, FieldMut, FieldValue};
use fieldguard_encoders::EncoderKind;
use fieldguard_types::MetadataError;
use std::any::{type_name, Any};
use std::marker::PhantomData;

pub type Getter =
    Box<dyn for<'a> Fn(&'a dyn Validatable) -> Result<FieldValue<'a>, MetadataError> + Send + Sync>;
pub type MutGetter =
    Box<dyn for<'a> Fn(&'a mut dyn Validatable) -> Result<FieldMut<'a>, MetadataError> + Send + Sync>;
pub type TypeCheck =
    Box<dyn Fn(&dyn Validatable, &mut Vec<String>) -> Result<(), MetadataError> + Send + Sync>;

type Projection = Box<
    dyn for<'a> Fn(&'a dyn Validatable) -> Result<&'a dyn Validatable, MetadataError> + Send + Sync,
>;
type ProjectionMut = Box<
    dyn for<'a> Fn(&'a mut dyn Validatable) -> Result<&'a mut dyn Validatable, MetadataError>
        + Send
        + Sync,
>;

fn expect_ref<'a, T: Validatable>(
    value: &'a dyn Validatable,
    attribute: &'static str,
) -> Result<&'a T, MetadataError> {
    (value as &dyn Any).downcast_ref::<T>().ok_or_else(|| {
        MetadataError::new(
            type_name::<T>(),
            attribute,
            "instance is not of the declaring type",
        )
    })
}

fn expect_mut<'a, T: Validatable>(
    value: &'a mut dyn Validatable,
    attribute: &'static str,
) -> Result<&'a mut T, MetadataError> {
    (value as &mut dyn Any).downcast_mut::<T>().ok_or_else(|| {
        MetadataError::new(
            type_name::<T>(),
            attribute,
            "instance is not of the declaring type",
        )
    })
}

/// One modeled type: its name, its ordered attribute declarations, an
/// optional base-type extension, and an optional type-level rule.
/// Immutable once built.
pub struct TypeDeclaration {
    name: &'static str,
    attributes: Vec<AttributeDecl>,
    extension: Option<Extension>,
    type_rule: Option<TypeCheck>,
}

impl TypeDeclaration {
    pub fn builder<T: Validatable>(name: &'static str) -> TypeDeclarationBuilder<T> {
        TypeDeclarationBuilder {
            name,
            attributes: Vec::new(),
            extension: None,
            type_rule: None,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn attributes(&self) -> &[AttributeDecl] {
        &self.attributes
    }

    pub fn extension(&self) -> Option<&Extension> {
        self.extension.as_ref()
    }

    pub fn type_rule(&self) -> Option<&TypeCheck> {
        self.type_rule.as_ref()
    }
}

/// Base-type link: the base declaration plus the projections onto the
/// embedded base value. The resolver appends the base's attributes after the
/// extending type's own.
pub struct Extension {
    base: &'static TypeDeclaration,
    project: Projection,
    project_mut: ProjectionMut,
}

impl Extension {
    pub fn base(&self) -> &'static TypeDeclaration {
        self.base
    }

    pub fn apply<'a>(
        &self,
        value: &'a dyn Validatable,
    ) -> Result<&'a dyn Validatable, MetadataError> {
        (self.project)(value)
    }

    pub fn apply_mut<'a>(
        &self,
        value: &'a mut dyn Validatable,
    ) -> Result<&'a mut dyn Validatable, MetadataError> {
        (self.project_mut)(value)
    }
}

/// One named, typed slot on its owning declaration.
pub struct AttributeDecl {
    name: &'static str,
    get: Getter,
    get_mut: Option<MutGetter>,
    rules: Vec<RuleSpec>,
    encoders: Vec<EncoderKind>,
    computed: bool,
    transient: bool,
}

impl AttributeDecl {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }

    pub fn encoders(&self) -> &[EncoderKind] {
        &self.encoders
    }

    /// Computed and transient attributes exist in the declaration but are
    /// excluded from resolution.
    pub fn is_excluded(&self) -> bool {
        self.computed || self.transient
    }

    pub fn read<'a>(&self, value: &'a dyn Validatable) -> Result<FieldValue<'a>, MetadataError> {
        (self.get)(value)
    }

    /// The mutable view, when the declaration provides one. Only the
    /// encoding pass uses this.
    pub fn write<'a>(
        &self,
        value: &'a mut dyn Validatable,
    ) -> Result<Option<FieldMut<'a>>, MetadataError> {
        match &self.get_mut {
            Some(get_mut) => get_mut(value).map(Some),
            None => Ok(None),
        }
    }
}

/// Entry point for declaring an attribute: the name and the bound read
/// accessor, producing the [`FieldValue`] view of the current value.
pub fn attribute<T, F>(name: &'static str, get: F) -> AttributeBuilder<T>
where
    T: Validatable,
    F: for<'a> Fn(&'a T) -> FieldValue<'a> + Send + Sync + 'static,
{
    let get: Getter = Box::new(move |value| Ok(get(expect_ref::<T>(value, name)?)));
    AttributeBuilder {
        decl: AttributeDecl {
            name,
            get,
            get_mut: None,
            rules: Vec::new(),
            encoders: Vec::new(),
            computed: false,
            transient: false,
        },
        _marker: PhantomData,
    }
}

pub struct AttributeBuilder<T> {
    decl: AttributeDecl,
    _marker: PhantomData<fn(T)>,
}

impl<T: Validatable> AttributeBuilder<T> {
    /// Attaches a rule configuration. Declaration order is execution order.
    pub fn rule(mut self, spec: RuleSpec) -> Self {
        self.decl.rules.push(spec);
        self
    }

    /// Attaches encoder descriptors together with the mutable accessor
    /// yielding every textual slot of this attribute. Encoders run in the
    /// given order.
    pub fn encoded<I, F>(mut self, kinds: I, slots: F) -> Self
    where
        I: IntoIterator<Item = EncoderKind>,
        F: for<'a> Fn(&'a mut T) -> Vec<&'a mut String> + Send + Sync + 'static,
    {
        let name = self.decl.name;
        self.decl.encoders.extend(kinds);
        self.decl.get_mut = Some(Box::new(move |value| {
            Ok(FieldMut::Texts(slots(expect_mut::<T>(value, name)?)))
        }));
        self
    }

    /// Mutable traversal into the children of a composite attribute, used by
    /// the encoding pass to descend through Nested rules.
    pub fn children<F>(mut self, children: F) -> Self
    where
        F: for<'a> Fn(&'a mut T) -> Vec<CompositeMut<'a>> + Send + Sync + 'static,
    {
        let name = self.decl.name;
        self.decl.get_mut = Some(Box::new(move |value| {
            Ok(FieldMut::Children(children(expect_mut::<T>(value, name)?)))
        }));
        self
    }

    /// Marks the attribute as derived from other state; excluded from
    /// resolution.
    pub fn computed(mut self) -> Self {
        self.decl.computed = true;
        self
    }

    /// Marks the attribute as process-local; excluded from resolution.
    pub fn transient(mut self) -> Self {
        self.decl.transient = true;
        self
    }

    fn build(self) -> AttributeDecl {
        self.decl
    }
}

pub struct TypeDeclarationBuilder<T> {
    name: &'static str,
    attributes: Vec<AttributeDecl>,
    extension: Option<Extension>,
    type_rule: Option<TypeCheck>,
    _marker: PhantomData<fn(T)>,
}

impl<T: Validatable> TypeDeclarationBuilder<T> {
    pub fn attribute(mut self, attribute: AttributeBuilder<T>) -> Self {
        self.attributes.push(attribute.build());
        self
    }

    /// Declares that `T` extends a base type embedded in it. The base's
    /// attributes are appended after `T`'s own, accessed through the given
    /// projections.
    pub fn extends<B, P, Q>(mut self, project: P, project_mut: Q) -> Self
    where
        B: Declared + Validatable,
        P: for<'a> Fn(&'a T) -> &'a B + Send + Sync + 'static,
        Q: for<'a> Fn(&'a mut T) -> &'a mut B + Send + Sync + 'static,
    {
        self.extension = Some(Extension {
            base: <B as Declared>::declaration(),
            project: Box::new(move |value| {
                Ok(project(expect_ref::<T>(value, "<extension>")?) as &dyn Validatable)
            }),
            project_mut: Box::new(move |value| {
                Ok(project_mut(expect_mut::<T>(value, "<extension>")?) as &mut dyn Validatable)
            }),
        });
        self
    }

    /// Attaches the optional object-wide rule, run once after all attribute
    /// rules.
    pub fn type_rule<F>(mut self, check: F) -> Self
    where
        F: Fn(&T, &mut Vec<String>) + Send + Sync + 'static,
    {
        self.type_rule = Some(Box::new(move |value, errors| {
            check(expect_ref::<T>(value, "<type rule>")?, errors);
            Ok(())
        }));
        self
    }

    pub fn build(self) -> TypeDeclaration {
        TypeDeclaration {
            name: self.name,
            attributes: self.attributes,
            extension: self.extension,
            type_rule: self.type_rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::LazyLock;

    struct Sample {
        label: Option<String>,
        cached_len: usize,
    }

    impl Declared for Sample {
        fn declaration() -> &'static TypeDeclaration {
            static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
                TypeDeclaration::builder::<Sample>("Sample")
                    .attribute(
                        attribute("label", |s: &Sample| {
                            FieldValue::opt_text(s.label.as_deref())
                        })
                        .rule(RuleSpec::required()),
                    )
                    .attribute(
                        attribute("cachedLen", |s: &Sample| FieldValue::int(s.cached_len as i64))
                            .computed(),
                    )
                    .build()
            });
            &DECL
        }
    }

    impl Validatable for Sample {
        fn declaration(&self) -> &'static TypeDeclaration {
            <Sample as Declared>::declaration()
        }
    }

    #[test]
    fn declaration_preserves_order_and_flags() {
        let decl = <Sample as Declared>::declaration();
        assert_eq!(decl.name(), "Sample");
        assert_eq!(decl.attributes().len(), 2);
        assert!(!decl.attributes()[0].is_excluded());
        assert!(decl.attributes()[1].is_excluded());
    }

    #[test]
    fn accessors_read_through_the_dyn_boundary() {
        let sample = Sample {
            label: Some("x".to_string()),
            cached_len: 1,
        };
        let decl = <Sample as Declared>::declaration();
        let value = decl.attributes()[0].read(&sample).unwrap();
        assert!(matches!(value, FieldValue::Text("x")));
    }

    #[test]
    fn mismatched_instance_is_a_metadata_error() {
        struct Other;
        impl Declared for Other {
            fn declaration() -> &'static TypeDeclaration {
                static DECL: LazyLock<TypeDeclaration> =
                    LazyLock::new(|| TypeDeclaration::builder::<Other>("Other").build());
                &DECL
            }
        }
        impl Validatable for Other {
            fn declaration(&self) -> &'static TypeDeclaration {
                <Other as Declared>::declaration()
            }
        }

        let other = Other;
        let err = <Sample as Declared>::declaration().attributes()[0]
            .read(&other)
            .unwrap_err();
        assert_eq!(err.attribute, "label");
    }
}
