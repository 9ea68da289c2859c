use crate::test_support::{
    engine, BadPattern, Contact, Coupon, Event, Misconfigured, Order, OrderLine,
};
use fieldguard_types::ConfigurationError;
use time::{Duration, OffsetDateTime};

#[test]
fn length_names_the_violated_bound() {
    let engine = engine();

    let mut contact = Contact::valid();
    contact.code = Some("x".to_string());
    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["code must contain at least 2 characters"]
    );

    contact.code = Some("toolong".to_string());
    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["code is limited to 5 characters"]
    );

    for ok in ["ab", "abc", "abcde"] {
        contact.code = Some(ok.to_string());
        assert!(engine.validate(&mut contact).unwrap().is_empty());
    }
}

#[test]
fn length_skips_absent_unless_required() {
    let engine = engine();
    let mut contact = Contact::valid();

    contact.code = None;
    assert!(engine.validate(&mut contact).unwrap().is_empty());

    contact.display_name = None;
    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["display name is required"]
    );
}

#[test]
fn required_uses_the_override_name() {
    let engine = engine();
    let mut contact = Contact::valid();
    contact.display_name = Some("   ".to_string());

    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["display name is required"]
    );
}

#[test]
fn range_bounds_are_inclusive() {
    let engine = engine();
    let mut contact = Contact::valid();

    for ok in [13, 77, 120] {
        contact.age = Some(ok);
        assert!(engine.validate(&mut contact).unwrap().is_empty());
    }

    contact.age = Some(12);
    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["age must be greater-than or equal-to 13"]
    );

    contact.age = Some(121);
    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["age must be less-than or equal-to 120"]
    );
}

#[test]
fn collection_size_is_checked_once_before_expansion() {
    let engine = engine();
    let mut contact = Contact::valid();

    contact.tags = vec!["a", "b", "c", "d"].into_iter().map(String::from).collect();
    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["tags must be less-than or equal-to 3"]
    );

    contact.tags = vec!["ok".to_string(), "overlong".to_string()];
    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["tags[1] is limited to 3 characters"]
    );
}

#[test]
fn empty_required_collection_reports_once() {
    let engine = engine();
    let mut contact = Contact::valid();
    contact.tags = Vec::new();

    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["tags must be greater-than or equal-to 2"]
    );
}

#[test]
fn map_elements_are_named_by_value_position() {
    let engine = engine();
    let mut contact = Contact::valid();
    contact.labels.insert("alpha".to_string(), "was here".to_string());
    contact.labels.insert("beta".to_string(), "ok".to_string());
    contact.labels.insert("gamma".to_string(), "barely too long".to_string());

    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec![
            "labels[0] is limited to 5 characters",
            "labels[2] is limited to 5 characters",
        ]
    );
}

#[test]
fn pattern_reports_stock_sentence() {
    let engine = engine();
    let mut contact = Contact::valid();
    contact.email = Some("not-an-email".to_string());

    assert_eq!(
        engine.validate(&mut contact).unwrap(),
        vec!["email does not match the regular expression pattern: [A-Za-z0-9.]+@[A-Za-z0-9.]+"]
    );
}

#[test]
fn unparsable_pattern_is_a_configuration_error() {
    let engine = engine();
    let mut value = BadPattern {
        field: Some("anything".to_string()),
    };

    let err = engine.validate(&mut value).unwrap_err();
    assert!(matches!(err, ConfigurationError::InvalidPattern { .. }));
}

#[test]
fn rule_on_impossible_shape_is_a_configuration_error() {
    let engine = engine();
    let mut value = Misconfigured { count: 7 };

    let err = engine.validate(&mut value).unwrap_err();
    assert!(matches!(
        err,
        ConfigurationError::UnsupportedValue { rule: "length", .. }
    ));
}

#[test]
fn date_placement_checks() {
    let engine = engine();
    let now = OffsetDateTime::now_utc();
    let mut event = Event::empty();

    event.created_at = Some(now - Duration::hours(1));
    assert!(engine.validate(&mut event).unwrap().is_empty());
    event.created_at = Some(now + Duration::days(1));
    assert_eq!(
        engine.validate(&mut event).unwrap(),
        vec!["createdAt must be today or in the past"]
    );

    let mut event = Event::empty();
    event.scheduled_for = Some(now + Duration::hours(1));
    assert!(engine.validate(&mut event).unwrap().is_empty());
    event.scheduled_for = Some(now - Duration::days(1));
    assert_eq!(
        engine.validate(&mut event).unwrap(),
        vec!["scheduledFor must be today or in the future"]
    );

    let mut event = Event::empty();
    event.archived_on = Some(now - Duration::days(2));
    assert!(engine.validate(&mut event).unwrap().is_empty());
    event.archived_on = Some(now);
    assert_eq!(
        engine.validate(&mut event).unwrap(),
        vec!["archivedOn must be in the past"]
    );

    let mut event = Event::empty();
    event.expires_on = Some(now + Duration::days(2));
    assert!(engine.validate(&mut event).unwrap().is_empty());
    event.expires_on = Some(now);
    assert_eq!(
        engine.validate(&mut event).unwrap(),
        vec!["expiresOn must be in the future"]
    );
}

#[test]
fn custom_rule_sees_the_whole_instance() {
    let engine = engine();
    let mut coupon = Coupon {
        code: None,
        percent: Some(60),
    };
    assert_eq!(
        engine.validate(&mut coupon).unwrap(),
        vec!["couponTerms requires a code for discounts over 50"]
    );

    coupon.code = Some("SAVE60".to_string());
    assert!(engine.validate(&mut coupon).unwrap().is_empty());
}

#[test]
fn nested_rule_prefixes_child_errors() {
    let engine = engine();
    let mut order = Order::valid();
    order.lines.push(OrderLine {
        sku: None,
        quantity: Some(0),
    });

    assert_eq!(
        engine.validate(&mut order).unwrap(),
        vec![
            "lines[1].sku is required",
            "lines[1].quantity must be greater-than or equal-to 1",
        ]
    );
}

#[test]
fn nested_rule_skips_absent_children() {
    let engine = engine();
    let mut order = Order::valid();
    order.shipping = None;

    assert!(engine.validate(&mut order).unwrap().is_empty());
}
