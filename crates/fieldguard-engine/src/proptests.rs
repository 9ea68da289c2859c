//! Property-based tests for the engine.
//!
//! These use proptest to verify invariants around:
//! - Length bounds deciding errors exactly at the configured limits
//! - Inclusive numeric bounds
//! - Determinism of repeated validation
//! - Element naming under container expansion

use crate::test_support::{engine, Contact};
use proptest::prelude::*;

fn arb_code() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{0,8}").unwrap()
}

fn arb_tag() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z]{1,6}").unwrap()
}

proptest! {
    #[test]
    fn length_errors_exactly_outside_bounds(code in arb_code()) {
        let engine = engine();
        let mut contact = Contact::valid();
        let len = code.chars().count();
        contact.code = Some(code);

        let errors = engine.validate(&mut contact).unwrap();
        let expected = usize::from(len < 2) + usize::from(len > 5);
        prop_assert_eq!(errors.len(), expected);
    }

    #[test]
    fn range_bounds_are_inclusive(age in -200i64..400) {
        let engine = engine();
        let mut contact = Contact::valid();
        contact.age = Some(age);

        let errors = engine.validate(&mut contact).unwrap();
        prop_assert_eq!(errors.is_empty(), (13..=120).contains(&age));
    }

    #[test]
    fn validation_is_deterministic(code in arb_code(), age in -50i64..200) {
        let engine = engine();
        let mut contact = Contact::valid();
        contact.code = Some(code);
        contact.age = Some(age);

        let first = engine.validate(&mut contact).unwrap();
        let second = engine.validate(&mut contact).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn element_errors_carry_their_index(tags in prop::collection::vec(arb_tag(), 2..=3)) {
        let engine = engine();
        let mut contact = Contact::valid();
        contact.tags = tags.clone();

        let errors = engine.validate(&mut contact).unwrap();
        let over: Vec<usize> = tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| tag.chars().count() > 3)
            .map(|(index, _)| index)
            .collect();

        prop_assert_eq!(errors.len(), over.len());
        for (error, index) in errors.iter().zip(over) {
            let prefix = format!("tags[{}]", index);
            prop_assert!(error.starts_with(&prefix));
        }
    }
}
