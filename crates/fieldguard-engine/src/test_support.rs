//! Shared fixture types for engine tests.
//!
//! These model the shapes the engine must handle: scalar rules, containers,
//! maps, encoding, base-type extension, nested graphs, and the
//! self-validating escape hatch.

use crate::{Registry, ValidationEngine};
use fieldguard_encoders::EncoderKind;
use fieldguard_model::{
    attribute, Bound, CollectionSpec, CompositeMut, CustomSpec, DateSpec, Declared, FieldValue,
    LengthSpec, PatternSpec, RangeSpec, RuleSpec, SelfValidating, TypeDeclaration, Validatable,
};
use fieldguard_types::{FieldPath, ValidationFailure};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::sync::{Arc, LazyLock};
use time::OffsetDateTime;

pub fn engine() -> ValidationEngine {
    ValidationEngine::new(Arc::new(Registry::new()))
}

// A type whose attributes carry no rules at all.
pub struct Unruled {
    pub note: String,
}

impl Declared for Unruled {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Unruled>("Unruled")
                .attribute(attribute("note", |u: &Unruled| FieldValue::text(&u.note)))
                .build()
        });
        &DECL
    }
}

impl Validatable for Unruled {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Unruled as Declared>::declaration()
    }
}

pub fn unruled() -> Unruled {
    Unruled {
        note: "anything".to_string(),
    }
}

/// The scalar-and-container workhorse fixture.
pub struct Contact {
    pub display_name: Option<String>,
    pub code: Option<String>,
    pub email: Option<String>,
    pub age: Option<i64>,
    pub tags: Vec<String>,
    pub labels: BTreeMap<String, String>,
    pub handles_consistent: bool,
    pub revision: u64,
}

impl Contact {
    pub fn valid() -> Self {
        Contact {
            display_name: Some("Ada".to_string()),
            code: Some("abc".to_string()),
            email: Some("ada@example.org".to_string()),
            age: Some(30),
            tags: vec!["a".to_string(), "b".to_string()],
            labels: BTreeMap::new(),
            handles_consistent: true,
            revision: 0,
        }
    }
}

impl Declared for Contact {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Contact>("Contact")
                .attribute(
                    attribute("displayName", |c: &Contact| {
                        FieldValue::opt_text(c.display_name.as_deref())
                    })
                    .rule(RuleSpec::Length(LengthSpec {
                        required: true,
                        max: Some(25),
                        name: Some("display name"),
                        ..Default::default()
                    })),
                )
                .attribute(
                    attribute("code", |c: &Contact| FieldValue::opt_text(c.code.as_deref()))
                        .rule(RuleSpec::Length(LengthSpec {
                            min: Some(2),
                            max: Some(5),
                            ..Default::default()
                        })),
                )
                .attribute(
                    attribute("email", |c: &Contact| {
                        FieldValue::opt_text(c.email.as_deref())
                    })
                    .rule(RuleSpec::Pattern(PatternSpec {
                        nullable: true,
                        ..PatternSpec::new("[A-Za-z0-9.]+@[A-Za-z0-9.]+")
                    })),
                )
                .attribute(
                    attribute("age", |c: &Contact| FieldValue::opt_int(c.age)).rule(
                        RuleSpec::Range(RangeSpec {
                            nullable: true,
                            min: Some(Bound::Int(13)),
                            max: Some(Bound::Int(120)),
                            ..Default::default()
                        }),
                    ),
                )
                .attribute(
                    attribute("tags", |c: &Contact| {
                        FieldValue::texts(c.tags.iter().map(String::as_str))
                    })
                    .rule(RuleSpec::Collection(CollectionSpec {
                        nullable: false,
                        min_size: Some(2),
                        max_size: Some(3),
                        ..Default::default()
                    }))
                    .rule(RuleSpec::Length(LengthSpec {
                        max: Some(3),
                        ..Default::default()
                    })),
                )
                .attribute(
                    attribute("labels", |c: &Contact| {
                        FieldValue::map_values(c.labels.values().map(|v| FieldValue::text(v)))
                    })
                    .rule(RuleSpec::Length(LengthSpec {
                        max: Some(5),
                        ..Default::default()
                    })),
                )
                .attribute(
                    attribute("revision", |c: &Contact| FieldValue::int(c.revision as i64))
                        .transient(),
                )
                .type_rule(|c: &Contact, errors| {
                    if !c.handles_consistent {
                        errors.push("handles are inconsistent".to_string());
                    }
                })
                .build()
        });
        &DECL
    }
}

impl Validatable for Contact {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Contact as Declared>::declaration()
    }
}

/// Encoding fixture: one attribute per encoder kind, plus a stacked pair and
/// a length rule that observes the encoded text.
pub struct Post {
    pub title: String,
    pub script: String,
    pub summary: String,
    pub feed_entry: String,
    pub slug: String,
}

impl Post {
    pub fn new(text: &str) -> Self {
        Post {
            title: text.to_string(),
            script: text.to_string(),
            summary: text.to_string(),
            feed_entry: text.to_string(),
            slug: text.to_string(),
        }
    }
}

fn slug_encoder(input: &str) -> String {
    format!("slug:{input}")
}

impl Declared for Post {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Post>("Post")
                .attribute(
                    attribute("title", |p: &Post| FieldValue::text(&p.title))
                        .rule(RuleSpec::Length(LengthSpec {
                            max: Some(10),
                            ..Default::default()
                        }))
                        .encoded([EncoderKind::Html], |p: &mut Post| vec![&mut p.title]),
                )
                .attribute(
                    attribute("script", |p: &Post| FieldValue::text(&p.script))
                        .encoded([EncoderKind::Javascript], |p: &mut Post| {
                            vec![&mut p.script]
                        }),
                )
                .attribute(
                    attribute("summary", |p: &Post| FieldValue::text(&p.summary)).encoded(
                        [EncoderKind::Javascript, EncoderKind::Html],
                        |p: &mut Post| vec![&mut p.summary],
                    ),
                )
                .attribute(
                    attribute("feedEntry", |p: &Post| FieldValue::text(&p.feed_entry))
                        .encoded([EncoderKind::Xml], |p: &mut Post| vec![&mut p.feed_entry]),
                )
                .attribute(
                    attribute("slug", |p: &Post| FieldValue::text(&p.slug)).encoded(
                        [EncoderKind::Custom(slug_encoder)],
                        |p: &mut Post| vec![&mut p.slug],
                    ),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Post {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Post as Declared>::declaration()
    }
}

// Nested-graph fixtures.

pub struct Address {
    pub city: Option<String>,
    pub note: String,
}

impl Declared for Address {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Address>("Address")
                .attribute(
                    attribute("city", |a: &Address| FieldValue::opt_text(a.city.as_deref()))
                        .rule(RuleSpec::required()),
                )
                .attribute(
                    attribute("note", |a: &Address| FieldValue::text(&a.note))
                        .encoded([EncoderKind::Html], |a: &mut Address| vec![&mut a.note]),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Address {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Address as Declared>::declaration()
    }
}

pub struct OrderLine {
    pub sku: Option<String>,
    pub quantity: Option<i64>,
}

impl Declared for OrderLine {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<OrderLine>("OrderLine")
                .attribute(
                    attribute("sku", |l: &OrderLine| FieldValue::opt_text(l.sku.as_deref()))
                        .rule(RuleSpec::required()),
                )
                .attribute(
                    attribute("quantity", |l: &OrderLine| FieldValue::opt_int(l.quantity)).rule(
                        RuleSpec::Range(RangeSpec {
                            nullable: true,
                            min: Some(Bound::Int(1)),
                            ..Default::default()
                        }),
                    ),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for OrderLine {
    fn declaration(&self) -> &'static TypeDeclaration {
        <OrderLine as Declared>::declaration()
    }
}

pub struct Order {
    pub reference: Option<String>,
    pub lines: Vec<OrderLine>,
    pub shipping: Option<Box<Address>>,
}

impl Order {
    pub fn valid() -> Self {
        Order {
            reference: Some("ord-1".to_string()),
            lines: vec![OrderLine {
                sku: Some("sku-1".to_string()),
                quantity: Some(1),
            }],
            shipping: None,
        }
    }
}

impl Declared for Order {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Order>("Order")
                .attribute(
                    attribute("reference", |o: &Order| {
                        FieldValue::opt_text(o.reference.as_deref())
                    })
                    .rule(RuleSpec::required()),
                )
                .attribute(
                    attribute("lines", |o: &Order| {
                        FieldValue::sequence(
                            o.lines
                                .iter()
                                .map(|line| FieldValue::composite(line as &dyn Validatable)),
                        )
                    })
                    .rule(RuleSpec::nested()),
                )
                .attribute(
                    attribute("shipping", |o: &Order| match &o.shipping {
                        Some(address) => FieldValue::composite(&**address),
                        None => FieldValue::Absent,
                    })
                    .rule(RuleSpec::nested())
                    .children(|o: &mut Order| {
                        o.shipping
                            .as_deref_mut()
                            .map(|address| CompositeMut::Borrowed(address as &mut dyn Validatable))
                            .into_iter()
                            .collect()
                    }),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Order {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Order as Declared>::declaration()
    }
}

// Extension fixtures: Employee embeds Person and appends its attributes.

pub struct Person {
    pub full_name: Option<String>,
}

impl Declared for Person {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Person>("Person")
                .attribute(
                    attribute("fullName", |p: &Person| {
                        FieldValue::opt_text(p.full_name.as_deref())
                    })
                    .rule(RuleSpec::Length(LengthSpec {
                        required: true,
                        max: Some(10),
                        ..Default::default()
                    })),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Person {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Person as Declared>::declaration()
    }
}

pub struct Employee {
    pub person: Person,
    pub grade: Option<i64>,
}

impl Declared for Employee {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Employee>("Employee")
                .attribute(
                    attribute("grade", |e: &Employee| FieldValue::opt_int(e.grade)).rule(
                        RuleSpec::Range(RangeSpec {
                            nullable: true,
                            min: Some(Bound::Int(1)),
                            max: Some(Bound::Int(9)),
                            ..Default::default()
                        }),
                    ),
                )
                .extends::<Person, _, _>(|e: &Employee| &e.person, |e: &mut Employee| &mut e.person)
                .build()
        });
        &DECL
    }
}

impl Validatable for Employee {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Employee as Declared>::declaration()
    }
}

// Cyclic-graph fixtures: Node points at Terminal, Terminal points back at
// Node. Terminal is self-validating, which is what makes the cycle safe.

pub struct Node {
    pub label: Option<String>,
    pub next: Option<Rc<RefCell<Terminal>>>,
}

impl Declared for Node {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Node>("Node")
                .attribute(
                    attribute("label", |n: &Node| FieldValue::opt_text(n.label.as_deref()))
                        .rule(RuleSpec::required()),
                )
                .attribute(
                    attribute("next", |n: &Node| match &n.next {
                        Some(terminal) => FieldValue::shared(terminal.clone()),
                        None => FieldValue::Absent,
                    })
                    .rule(RuleSpec::nested()),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Node {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Node as Declared>::declaration()
    }
}

pub struct Terminal {
    pub owner: Option<Weak<RefCell<Node>>>,
    pub accept: bool,
    pub checks: Cell<usize>,
}

impl Terminal {
    pub fn accepting() -> Self {
        Terminal {
            owner: None,
            accept: true,
            checks: Cell::new(0),
        }
    }
}

impl Declared for Terminal {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Terminal>("Terminal")
                // Would fire if the engine ever traversed this type's
                // attributes instead of delegating to validate_self.
                .attribute(
                    attribute("ghost", |_t: &Terminal| FieldValue::Absent)
                        .rule(RuleSpec::required()),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Terminal {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Terminal as Declared>::declaration()
    }

    fn as_self_validating(&self) -> Option<&dyn SelfValidating> {
        Some(self)
    }
}

impl SelfValidating for Terminal {
    fn validate_self(&self) -> Result<(), ValidationFailure> {
        self.checks.set(self.checks.get() + 1);
        if self.accept {
            Ok(())
        } else {
            Err(ValidationFailure::of("terminal rejected"))
        }
    }
}

// Date fixture: one attribute per placement combination, all optional so a
// test can exercise them one at a time.

pub struct Event {
    pub created_at: Option<OffsetDateTime>,
    pub scheduled_for: Option<OffsetDateTime>,
    pub archived_on: Option<OffsetDateTime>,
    pub expires_on: Option<OffsetDateTime>,
}

impl Event {
    pub fn empty() -> Self {
        Event {
            created_at: None,
            scheduled_for: None,
            archived_on: None,
            expires_on: None,
        }
    }
}

impl Declared for Event {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Event>("Event")
                .attribute(
                    attribute("createdAt", |e: &Event| {
                        FieldValue::opt_timestamp(e.created_at)
                    })
                    .rule(RuleSpec::Date(DateSpec {
                        past: true,
                        present: true,
                        ..Default::default()
                    })),
                )
                .attribute(
                    attribute("scheduledFor", |e: &Event| {
                        FieldValue::opt_timestamp(e.scheduled_for)
                    })
                    .rule(RuleSpec::Date(DateSpec {
                        future: true,
                        present: true,
                        ..Default::default()
                    })),
                )
                .attribute(
                    attribute("archivedOn", |e: &Event| {
                        FieldValue::opt_timestamp(e.archived_on)
                    })
                    .rule(RuleSpec::Date(DateSpec {
                        past: true,
                        ..Default::default()
                    })),
                )
                .attribute(
                    attribute("expiresOn", |e: &Event| {
                        FieldValue::opt_timestamp(e.expires_on)
                    })
                    .rule(RuleSpec::Date(DateSpec {
                        future: true,
                        ..Default::default()
                    })),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Event {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Event as Declared>::declaration()
    }
}

// Custom-rule fixture.

pub struct Coupon {
    pub code: Option<String>,
    pub percent: Option<i64>,
}

fn coupon_terms(value: &dyn Validatable, name: &FieldPath, errors: &mut Vec<String>) {
    let Some(coupon) = (value as &dyn Any).downcast_ref::<Coupon>() else {
        return;
    };
    if coupon.percent.unwrap_or(0) > 50 && coupon.code.is_none() {
        errors.push(format!("{name} requires a code for discounts over 50"));
    }
}

impl Declared for Coupon {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Coupon>("Coupon")
                .attribute(
                    attribute("percent", |c: &Coupon| FieldValue::opt_int(c.percent))
                        .rule(RuleSpec::Range(RangeSpec {
                            nullable: true,
                            min: Some(Bound::Int(0)),
                            max: Some(Bound::Int(100)),
                            ..Default::default()
                        }))
                        .rule(RuleSpec::Custom(CustomSpec {
                            check: coupon_terms,
                            name: Some("couponTerms"),
                        })),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Coupon {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Coupon as Declared>::declaration()
    }
}

// Deliberately broken declarations, for the configuration-error paths.

pub struct Misconfigured {
    pub count: i64,
}

impl Declared for Misconfigured {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<Misconfigured>("Misconfigured")
                .attribute(
                    attribute("count", |m: &Misconfigured| FieldValue::int(m.count)).rule(
                        RuleSpec::Length(LengthSpec {
                            max: Some(3),
                            ..Default::default()
                        }),
                    ),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for Misconfigured {
    fn declaration(&self) -> &'static TypeDeclaration {
        <Misconfigured as Declared>::declaration()
    }
}

pub struct BadPattern {
    pub field: Option<String>,
}

impl Declared for BadPattern {
    fn declaration() -> &'static TypeDeclaration {
        static DECL: LazyLock<TypeDeclaration> = LazyLock::new(|| {
            TypeDeclaration::builder::<BadPattern>("BadPattern")
                .attribute(
                    attribute("field", |b: &BadPattern| {
                        FieldValue::opt_text(b.field.as_deref())
                    })
                    .rule(RuleSpec::Pattern(PatternSpec::new("("))),
                )
                .build()
        });
        &DECL
    }
}

impl Validatable for BadPattern {
    fn declaration(&self) -> &'static TypeDeclaration {
        <BadPattern as Declared>::declaration()
    }
}
