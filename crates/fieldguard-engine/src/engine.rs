use crate::registry::Registry;
use crate::rules::RuleContext;
use fieldguard_model::{CompositeMut, FieldMut, Validatable};
use fieldguard_types::{
    ConfigurationError, FieldPath, ValidationError, ValidationFailure, ValidationReport,
};
use std::sync::Arc;
use time::OffsetDateTime;

/// The validation engine: a stateless orchestrator over an injected
/// [`Registry`].
///
/// `validate` runs the encoding pass once, then either hands control to the
/// value's self-validating implementation or walks the resolved attribute
/// list, running each attribute's rules in declaration order and the
/// type-level rule last. Nested rules recurse back into the engine;
/// everything lands in one flat error list.
pub struct ValidationEngine {
    registry: Arc<Registry>,
}

impl ValidationEngine {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Validates the value, returning the error messages. An empty list
    /// means the value is valid. Broken metadata surfaces as the `Err` arm,
    /// never as entries in the list.
    pub fn validate(
        &self,
        value: &mut dyn Validatable,
    ) -> Result<Vec<String>, ConfigurationError> {
        self.validate_prefixed(value, &FieldPath::root())
    }

    /// Like [`validate`](Self::validate), with every produced name
    /// dot-prefixed. This is the entry point recursive callers use.
    pub fn validate_prefixed(
        &self,
        value: &mut dyn Validatable,
        prefix: &FieldPath,
    ) -> Result<Vec<String>, ConfigurationError> {
        self.encode(value)?;
        let mut errors = Vec::new();
        self.validate_value(value, prefix, &mut errors)?;
        Ok(errors)
    }

    /// Validates and raises: a non-empty result becomes a
    /// [`ValidationFailure`].
    pub fn validate_and_raise(&self, value: &mut dyn Validatable) -> Result<(), ValidationError> {
        let errors = self
            .validate(value)
            .map_err(ValidationError::Configuration)?;
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Invalid(ValidationFailure::new(errors)))
        }
    }

    /// Validates and wraps the outcome in the serializable report envelope.
    pub fn report(
        &self,
        value: &mut dyn Validatable,
    ) -> Result<ValidationReport, ConfigurationError> {
        let started_at = OffsetDateTime::now_utc();
        let type_name = value.declaration().name();
        let errors = self.validate(value)?;
        Ok(ValidationReport::new(
            type_name,
            errors,
            started_at,
            OffsetDateTime::now_utc(),
        ))
    }

    /// The sanitization pass: rewrites every encoded textual slot through its
    /// encoders in declaration order, then descends through Nested-rule
    /// attributes that provide a mutable traversal. Descent encodes a
    /// self-validating child's own slots but never its children.
    ///
    /// `validate` runs this exactly once before any rule observes the value.
    /// Encoders are not idempotent; calling `encode` again re-escapes.
    pub fn encode(&self, value: &mut dyn Validatable) -> Result<(), ConfigurationError> {
        let resolved = self.registry.resolve_type(value.declaration());

        for attr in &resolved.attributes {
            if attr.encoders.is_empty() {
                continue;
            }
            let Some(slots) = attr.write(value)? else {
                continue;
            };
            match slots {
                FieldMut::Texts(slots) => {
                    for slot in slots {
                        for kind in attr.encoders {
                            let encoded = fieldguard_encoders::resolve(*kind).encode(slot);
                            *slot = encoded;
                        }
                    }
                }
                FieldMut::Children(_) => {
                    return Err(ConfigurationError::UnsupportedValue {
                        rule: "encode",
                        attribute: attr.name.to_string(),
                        actual: "composite",
                    });
                }
            }
        }

        if value.as_self_validating().is_some() {
            return Ok(());
        }

        for attr in &resolved.attributes {
            if !attr.has_nested_rule() {
                continue;
            }
            let Some(slots) = attr.write(value)? else {
                continue;
            };
            if let FieldMut::Children(children) = slots {
                for child in children {
                    match child {
                        CompositeMut::Borrowed(child) => self.encode(child)?,
                        CompositeMut::Shared(cell) => self.encode(&mut *cell.borrow_mut())?,
                    }
                }
            }
        }

        Ok(())
    }

    /// Post-encode traversal of one value. Nested rules re-enter here, so
    /// children are never re-encoded.
    pub(crate) fn validate_value(
        &self,
        value: &dyn Validatable,
        prefix: &FieldPath,
        errors: &mut Vec<String>,
    ) -> Result<(), ConfigurationError> {
        if let Some(own) = value.as_self_validating() {
            tracing::trace!(
                type_name = value.declaration().name(),
                "delegating to self-validating type"
            );
            if let Err(failure) = own.validate_self() {
                errors.extend(failure.errors);
            }
            return Ok(());
        }

        let resolved = self.registry.resolve_type(value.declaration());
        tracing::trace!(
            type_name = resolved.name,
            attributes = resolved.attributes.len(),
            "validating attributes"
        );

        let ctx = RuleContext { engine: self };
        for attr in &resolved.attributes {
            for rule in self.registry.rules_for(resolved.name, attr)? {
                rule.perform(value, &ctx, prefix, errors)?;
            }
        }

        if let Some(check) = resolved.type_rule {
            check(value, errors)?;
        }

        Ok(())
    }
}
