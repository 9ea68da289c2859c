use thiserror::Error;

/// The value being checked is invalid. Carries the flat message list a
/// `validate` call produced.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("validation failed: {}", .errors.join("; "))]
pub struct ValidationFailure {
    pub errors: Vec<String>,
}

impl ValidationFailure {
    pub fn new(errors: Vec<String>) -> Self {
        Self { errors }
    }

    pub fn of<S: Into<String>>(message: S) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }
}

/// An attribute accessor could not view the instance it was handed.
///
/// This is a metadata defect (wrong projection, declaration attached to the
/// wrong type), never a property of the data being validated.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("metadata for {type_name}.{attribute} is inaccessible: {reason}")]
pub struct MetadataError {
    pub type_name: String,
    pub attribute: String,
    pub reason: String,
}

impl MetadataError {
    pub fn new(
        type_name: impl Into<String>,
        attribute: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }
}

/// The validation metadata itself is malformed.
///
/// Kept strictly apart from [`ValidationFailure`]: callers must be able to
/// tell "your object is invalid" from "your validation setup is broken".
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("invalid pattern for {attribute}: {reason}")]
    InvalidPattern { attribute: String, reason: String },

    #[error("rule {rule} on {attribute} cannot apply to {actual} values")]
    UnsupportedValue {
        rule: &'static str,
        attribute: String,
        actual: &'static str,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

/// Umbrella for the raising entry point: either the data failed validation
/// or the setup did.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Invalid(#[from] ValidationFailure),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_displays_joined_messages() {
        let failure = ValidationFailure::new(vec!["a is required".into(), "b is required".into()]);
        assert_eq!(
            failure.to_string(),
            "validation failed: a is required; b is required"
        );
    }

    #[test]
    fn configuration_errors_are_not_failures() {
        let err: ValidationError = ConfigurationError::InvalidPattern {
            attribute: "email".into(),
            reason: "unclosed group".into(),
        }
        .into();
        assert!(matches!(err, ValidationError::Configuration(_)));
    }
}
