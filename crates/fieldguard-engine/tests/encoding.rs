//! The sanitization pass: in-place rewrites, ordering, and descent.

use fieldguard_engine::test_support::{engine, Address, Order, Post};

#[test]
fn encode_rewrites_each_kind_in_place() {
    let engine = engine();
    let mut post = Post::new("");
    post.title = "\"><script>alert('XSS')</script>".to_string();
    post.script = "'; alert(1); //".to_string();
    post.feed_entry = "a<b & 'c'".to_string();
    post.slug = "hello".to_string();

    engine.encode(&mut post).unwrap();

    assert_eq!(
        post.title,
        "&#34;&gt;&lt;script&gt;alert(&#39;XSS&#39;)&lt;/script&gt;"
    );
    assert_eq!(post.script, "\\x27; alert(1); \\/\\/");
    assert_eq!(post.feed_entry, "a&lt;b &amp; &apos;c&apos;");
    assert_eq!(post.slug, "slug:hello");
}

#[test]
fn stacked_encoders_run_in_declaration_order() {
    let engine = engine();
    let input = "';alert(1)//--></SCRIPT>";
    let mut post = Post::new("");
    post.summary = input.to_string();

    engine.encode(&mut post).unwrap();

    // JavaScript first, then HTML: equivalent to the composed web encoder.
    let mut web = Post::new("");
    web.script = input.to_string();
    engine.encode(&mut web).unwrap();
    let js_only = web.script;
    assert_eq!(
        post.summary,
        fieldguard_encoders::resolve(fieldguard_encoders::EncoderKind::Html).encode(&js_only)
    );
}

#[test]
fn rules_observe_the_encoded_value() {
    let engine = engine();
    let mut post = Post::new("");
    // Eight raw characters, nineteen once HTML-encoded: the length rule runs
    // after the pass and must see the encoded text.
    post.title = "<b>x</b>".to_string();

    assert_eq!(
        engine.validate(&mut post).unwrap(),
        vec!["title is limited to 10 characters"]
    );
    assert_eq!(post.title, "&lt;b&gt;x&lt;/b&gt;");
}

#[test]
fn encoding_twice_is_not_idempotent() {
    let engine = engine();
    let mut post = Post::new("");
    post.title = "<b>".to_string();

    engine.encode(&mut post).unwrap();
    assert_eq!(post.title, "&lt;b&gt;");

    engine.encode(&mut post).unwrap();
    assert_eq!(post.title, "&amp;lt;b&amp;gt;");
}

#[test]
fn encode_descends_into_nested_children() {
    let engine = engine();
    let mut order = Order::valid();
    order.shipping = Some(Box::new(Address {
        city: Some("Lyon".to_string()),
        note: "<gate code 5>".to_string(),
    }));

    assert!(engine.validate(&mut order).unwrap().is_empty());
    assert_eq!(
        order.shipping.as_ref().unwrap().note,
        "&lt;gate code 5&gt;"
    );
}

#[test]
fn validate_runs_the_pass_exactly_once() {
    let engine = engine();
    let mut order = Order::valid();
    order.shipping = Some(Box::new(Address {
        city: Some("Lyon".to_string()),
        note: "<x>".to_string(),
    }));

    engine.validate(&mut order).unwrap();
    assert_eq!(order.shipping.as_ref().unwrap().note, "&lt;x&gt;");
}
