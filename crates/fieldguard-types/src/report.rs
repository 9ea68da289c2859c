use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for fieldguard reports.
pub const SCHEMA_REPORT_V1: &str = "fieldguard.report.v1";

/// Serializable outcome of one top-level `validate` call.
///
/// The engine itself hands back a plain `Vec<String>`; this envelope exists
/// for callers that persist or transport outcomes and want a stable shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,

    /// Declared name of the validated type.
    pub type_name: String,

    pub valid: bool,
    pub errors: Vec<String>,

    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
}

impl ValidationReport {
    pub fn new(
        type_name: impl Into<String>,
        errors: Vec<String>,
        started_at: OffsetDateTime,
        finished_at: OffsetDateTime,
    ) -> Self {
        Self {
            schema: SCHEMA_REPORT_V1.to_string(),
            type_name: type_name.into(),
            valid: errors.is_empty(),
            errors,
            started_at,
            finished_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn round_trips_with_schema_tag() {
        let report = ValidationReport::new(
            "Contact",
            vec!["name is required".to_string()],
            datetime!(2026-01-02 03:04:05 UTC),
            datetime!(2026-01-02 03:04:06 UTC),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["schema"], SCHEMA_REPORT_V1);
        assert_eq!(json["valid"], false);
        assert_eq!(json["started_at"], "2026-01-02T03:04:05Z");

        let back: ValidationReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report);
    }
}
