//! Object-graph scenarios: nested recursion, extension chains, and the
//! self-validating escape hatch closing cycles.

use fieldguard_engine::test_support::{engine, Address, Employee, Node, Order, Person, Terminal};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[test]
fn nested_errors_merge_into_one_flat_list() {
    let engine = engine();
    let mut order = Order::valid();
    order.reference = None;
    order.shipping = Some(Box::new(Address {
        city: None,
        note: String::new(),
    }));

    assert_eq!(
        engine.validate(&mut order).unwrap(),
        vec!["reference is required", "shipping.city is required"]
    );
}

#[test]
fn deeply_nested_names_keep_the_full_path() {
    let engine = engine();
    let mut order = Order::valid();
    order.lines[0].sku = None;

    assert_eq!(
        engine.validate(&mut order).unwrap(),
        vec!["lines[0].sku is required"]
    );
}

#[test]
fn extension_appends_base_attributes_after_own() {
    let engine = engine();
    let mut employee = Employee {
        person: Person { full_name: None },
        grade: Some(12),
    };

    assert_eq!(
        engine.validate(&mut employee).unwrap(),
        vec![
            "grade must be less-than or equal-to 9",
            "fullName is required",
        ]
    );
}

#[test]
fn extension_reads_through_the_projection() {
    let engine = engine();
    let mut employee = Employee {
        person: Person {
            full_name: Some("Grace".to_string()),
        },
        grade: Some(5),
    };

    assert!(engine.validate(&mut employee).unwrap().is_empty());
}

#[test]
fn base_type_still_validates_standalone() {
    let engine = engine();
    let mut person = Person { full_name: None };

    assert_eq!(
        engine.validate(&mut person).unwrap(),
        vec!["fullName is required"]
    );
}

#[test]
fn cyclic_graph_terminates_when_one_side_self_validates() {
    let engine = engine();

    let root = Rc::new(RefCell::new(Node {
        label: Some("root".to_string()),
        next: None,
    }));
    let terminal = Rc::new(RefCell::new(Terminal {
        owner: Some(Rc::downgrade(&root)),
        accept: true,
        checks: Cell::new(0),
    }));
    root.borrow_mut().next = Some(terminal.clone());

    let errors = engine.validate(&mut *root.borrow_mut()).unwrap();
    assert!(errors.is_empty());
    // The escape hatch fired exactly once, and the Terminal's declared
    // attributes were never traversed (its ghost attribute stayed silent).
    assert_eq!(terminal.borrow().checks.get(), 1);
}

#[test]
fn self_validation_failure_messages_join_the_flat_list() {
    let engine = engine();

    let root = Rc::new(RefCell::new(Node {
        label: None,
        next: None,
    }));
    let terminal = Rc::new(RefCell::new(Terminal {
        owner: Some(Rc::downgrade(&root)),
        accept: false,
        checks: Cell::new(0),
    }));
    root.borrow_mut().next = Some(terminal.clone());

    let errors = engine.validate(&mut *root.borrow_mut()).unwrap();
    assert_eq!(errors, vec!["label is required", "terminal rejected"]);
    assert_eq!(terminal.borrow().checks.get(), 1);
}

#[test]
fn self_validating_value_at_the_top_level_fires_once() {
    let engine = engine();
    let mut terminal = Terminal::accepting();

    assert!(engine.validate(&mut terminal).unwrap().is_empty());
    assert_eq!(terminal.checks.get(), 1);

    assert!(engine.validate(&mut terminal).unwrap().is_empty());
    assert_eq!(terminal.checks.get(), 2);
}

#[test]
fn self_validating_failure_at_the_top_level() {
    let engine = engine();
    let mut terminal = Terminal::accepting();
    terminal.accept = false;

    assert_eq!(
        engine.validate(&mut terminal).unwrap(),
        vec!["terminal rejected"]
    );
}
