use super::{traverse, Rule, RuleContext};
use crate::metadata::ResolvedAttribute;
use fieldguard_model::{DateSpec, FieldValue, Validatable};
use fieldguard_types::{ConfigurationError, FieldPath};
use std::sync::Arc;
use time::macros::time;
use time::{Duration, OffsetDateTime, Time};

/// Timestamp placement relative to now (UTC).
///
/// `past`/`future` alone exclude today entirely; combined with `present`
/// they admit it. The future-or-present check tolerates a few milliseconds
/// of clock skew so "now" itself passes.
pub(crate) struct DateRule {
    attr: Arc<ResolvedAttribute>,
    spec: DateSpec,
}

impl DateRule {
    pub(crate) fn new(attr: Arc<ResolvedAttribute>, spec: DateSpec) -> Self {
        Self { attr, spec }
    }
}

fn check_placement(
    name: &FieldPath,
    value: OffsetDateTime,
    spec: DateSpec,
    errors: &mut Vec<String>,
) {
    let now = OffsetDateTime::now_utc();

    if spec.past && spec.present {
        if value > now {
            errors.push(format!("{name} must be today or in the past"));
        }
    } else if spec.future && spec.present {
        if value < now - Duration::milliseconds(10) {
            errors.push(format!("{name} must be today or in the future"));
        }
    } else if spec.past {
        let start_of_today = now.replace_time(Time::MIDNIGHT);
        if value >= start_of_today {
            errors.push(format!("{name} must be in the past"));
        }
    } else if spec.future {
        let end_of_today = now.replace_time(time!(23:59:59.999));
        if value <= end_of_today {
            errors.push(format!("{name} must be in the future"));
        }
    }
}

impl Rule for DateRule {
    fn perform(
        &self,
        instance: &dyn Validatable,
        _ctx: &RuleContext<'_>,
        prefix: &FieldPath,
        errors: &mut Vec<String>,
    ) -> Result<(), ConfigurationError> {
        let name = traverse::resolve_name(prefix, self.spec.name, self.attr.name);
        let value = self.attr.read(instance)?;
        let spec = self.spec;

        traverse::each_scalar(&name, &value, spec.required, errors, |name, value, errors| {
            let FieldValue::Timestamp(ts) = value else {
                return Err(ConfigurationError::UnsupportedValue {
                    rule: "date",
                    attribute: name.to_string(),
                    actual: value.shape(),
                });
            };

            check_placement(name, *ts, spec, errors);
            Ok(())
        })
    }
}
