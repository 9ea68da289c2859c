//! The explicit registry: metadata-by-type and rules-by-attribute caches.
//!
//! Constructed once at startup and injected into every engine that should
//! share cached metadata. Both caches are compute-if-absent: lookups hold a
//! read lock only, construction happens outside any lock, and the first
//! insert wins, so racing threads converge on one stored instance per key.
//! Nothing is ever invalidated; the declaration tables are static for the
//! process.

use crate::metadata::{self, ResolvedAttribute, ResolvedType};
use crate::rules::{self, Rule};
use fieldguard_model::TypeDeclaration;
use fieldguard_types::ConfigurationError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Cache key for rule instances: concrete type, declaring type, attribute,
/// rule ordinal. Stable names replace opaque reflective identity.
type RuleKey = (&'static str, &'static str, &'static str, usize);

#[derive(Default)]
pub struct Registry {
    metadata: RwLock<HashMap<&'static str, Arc<ResolvedType>>>,
    rules: RwLock<HashMap<RuleKey, Arc<dyn Rule>>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Resolves (or fetches from cache) the flattened attribute list for a
    /// declaration. Extension chains resolve level by level so every base
    /// type is cached under its own name too.
    pub fn resolve_type(&self, decl: &'static TypeDeclaration) -> Arc<ResolvedType> {
        if let Some(resolved) = self.metadata.read().get(decl.name()) {
            return resolved.clone();
        }

        tracing::debug!(type_name = decl.name(), "resolving type metadata");
        let base = decl.extension().map(|ext| self.resolve_type(ext.base()));
        let computed = Arc::new(metadata::flatten(decl, base));

        self.metadata
            .write()
            .entry(decl.name())
            .or_insert(computed)
            .clone()
    }

    /// Resolves the rule instances for one attribute, in declaration order.
    /// Each instance is cached per (type, owner, attribute, ordinal) and
    /// reused across every value of that type.
    pub(crate) fn rules_for(
        &self,
        type_name: &'static str,
        attr: &Arc<ResolvedAttribute>,
    ) -> Result<Vec<Arc<dyn Rule>>, ConfigurationError> {
        attr.rules
            .iter()
            .enumerate()
            .map(|(ordinal, spec)| {
                let key = (type_name, attr.owner, attr.name, ordinal);

                if let Some(rule) = self.rules.read().get(&key) {
                    return Ok(rule.clone());
                }

                tracing::debug!(
                    type_name,
                    attribute = attr.name,
                    rule = spec.kind(),
                    ordinal,
                    "instantiating rule"
                );
                let constructed = rules::instantiate(attr.clone(), spec)?;

                Ok(self
                    .rules
                    .write()
                    .entry(key)
                    .or_insert(constructed)
                    .clone())
            })
            .collect()
    }

    /// Cache sizes, exposed for tests and diagnostics.
    pub fn cached_types(&self) -> usize {
        self.metadata.read().len()
    }

    pub fn cached_rules(&self) -> usize {
        self.rules.read().len()
    }
}
