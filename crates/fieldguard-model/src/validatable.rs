use crate::declare::TypeDeclaration;
use fieldguard_types::ValidationFailure;
use std::any::Any;

/// Contract every modeled value satisfies.
///
/// Implementations delegate `declaration` to [`Declared::declaration`] and,
/// when the type owns its validation wholly, surface the escape hatch through
/// `as_self_validating`.
pub trait Validatable: Any {
    fn declaration(&self) -> &'static TypeDeclaration;

    /// Capability query for the self-validating escape hatch. Types that
    /// implement [`SelfValidating`] return `Some(self)` here.
    fn as_self_validating(&self) -> Option<&dyn SelfValidating> {
        None
    }
}

/// Static access to a type's declaration, used where no instance exists yet
/// (extension chains, registries warmed at startup).
pub trait Declared: Sized + 'static {
    fn declaration() -> &'static TypeDeclaration;
}

/// The escape hatch: one no-argument operation that fully replaces
/// field/rule-based processing for the implementing type.
///
/// Failure is signaled through the `Result`, never by appending to a shared
/// list; the engine merges the carried messages into its flat result. The
/// engine performs no cycle detection: object graphs with back-references
/// must make the cycle-closing type self-validating, or validation will not
/// terminate.
pub trait SelfValidating {
    fn validate_self(&self) -> Result<(), ValidationFailure>;
}
