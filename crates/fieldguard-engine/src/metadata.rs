//! Metadata resolution: flattening a declaration chain into the ordered
//! attribute list the engine iterates.
//!
//! A resolved type lists the type's own attributes first, then the extension
//! chain's, in declaration order, with every inherited accessor composed
//! through the extension projections. Attributes flagged computed or
//! transient are excluded. Resolution is deterministic; the registry caches
//! the result per type name for the process lifetime.

use fieldguard_encoders::EncoderKind;
use fieldguard_model::{
    AttributeDecl, Extension, FieldMut, FieldValue, RuleSpec, TypeCheck, TypeDeclaration,
    Validatable,
};
use fieldguard_types::MetadataError;
use std::sync::Arc;

/// One attribute of a resolved type, bound to the concrete type's accessors.
pub struct ResolvedAttribute {
    /// Declaring type (differs from the resolved type for inherited
    /// attributes).
    pub owner: &'static str,
    pub name: &'static str,
    pub rules: &'static [RuleSpec],
    pub encoders: &'static [EncoderKind],
    access: Access,
}

enum Access {
    Direct(&'static AttributeDecl),
    Projected {
        extension: &'static Extension,
        inner: Arc<ResolvedAttribute>,
    },
}

impl ResolvedAttribute {
    pub fn read<'a>(&self, value: &'a dyn Validatable) -> Result<FieldValue<'a>, MetadataError> {
        match &self.access {
            Access::Direct(decl) => decl.read(value),
            Access::Projected { extension, inner } => inner.read(extension.apply(value)?),
        }
    }

    pub fn write<'a>(
        &self,
        value: &'a mut dyn Validatable,
    ) -> Result<Option<FieldMut<'a>>, MetadataError> {
        match &self.access {
            Access::Direct(decl) => decl.write(value),
            Access::Projected { extension, inner } => inner.write(extension.apply_mut(value)?),
        }
    }

    pub fn has_nested_rule(&self) -> bool {
        self.rules.iter().any(RuleSpec::is_nested)
    }
}

/// Flattened, cached form of one concrete type.
pub struct ResolvedType {
    pub name: &'static str,
    pub attributes: Vec<Arc<ResolvedAttribute>>,
    pub type_rule: Option<&'static TypeCheck>,
}

/// Flattens `decl` over an already-resolved base (when the declaration
/// extends one). The caller resolves the base first so the whole chain is
/// cached level by level.
pub(crate) fn flatten(
    decl: &'static TypeDeclaration,
    base: Option<Arc<ResolvedType>>,
) -> ResolvedType {
    let mut attributes: Vec<Arc<ResolvedAttribute>> = Vec::new();

    for attr in decl.attributes() {
        if attr.is_excluded() {
            continue;
        }
        attributes.push(Arc::new(ResolvedAttribute {
            owner: decl.name(),
            name: attr.name(),
            rules: attr.rules(),
            encoders: attr.encoders(),
            access: Access::Direct(attr),
        }));
    }

    if let (Some(extension), Some(base)) = (decl.extension(), base) {
        for inherited in &base.attributes {
            attributes.push(Arc::new(ResolvedAttribute {
                owner: inherited.owner,
                name: inherited.name,
                rules: inherited.rules,
                encoders: inherited.encoders,
                access: Access::Projected {
                    extension,
                    inner: inherited.clone(),
                },
            }));
        }
    }

    ResolvedType {
        name: decl.name(),
        attributes,
        type_rule: decl.type_rule(),
    }
}
