//! Guarded View Invariant Tests
//!
//! - Nested reads return the same view while it is alive
//! - Rejected writes never touch the data
//! - Quiet sessions drop invalid writes without failing
//! - Sessions are independent of one another

use std::rc::Rc;

use shapeguard::guard::{to_guarded_view, Field, GuardError, GuardOptions, GuardedView, WriteOutcome};
use shapeguard::record::RecordFactory;
use shapeguard::schema::Schema;
use shapeguard::value::Value;
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn location_schema() -> Schema {
    Schema::object([(
        "loc",
        Schema::object([("lat", Schema::number()), ("lng", Schema::number())]),
    )])
}

fn location() -> Value {
    Value::from(json!({"loc": {"lat": 52.5, "lng": 13.4}}))
}

fn nested(view: &Rc<GuardedView>, key: &str) -> Rc<GuardedView> {
    match view.get(key) {
        Field::View(v) => v,
        Field::Value(v) => panic!("expected a nested view, got {v:?}"),
    }
}

// =============================================================================
// Rejection Tests
// =============================================================================

/// Assigning a string to loc.lat is rejected and lat keeps its value.
#[test]
fn test_strict_nested_write_rejected() {
    let data = location();
    let root = to_guarded_view(location_schema(), &data, false).unwrap();
    let loc = nested(&root, "loc");

    let err = loc.set("lat", Value::from("north")).unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.validation().map(|e| e.expected()), Some("number"));

    assert_eq!(loc.get("lat").as_f64(), Some(52.5));
    assert_eq!(data.field("loc").field("lat"), Value::from(52.5));
}

/// Quiet sessions report apparent success and leave the data alone.
#[test]
fn test_quiet_nested_write_ignored() {
    let data = location();
    let root = to_guarded_view(location_schema(), &data, true).unwrap();
    let loc = nested(&root, "loc");

    assert_eq!(loc.set("lat", Value::from("north")).unwrap(), WriteOutcome::Ignored);
    assert_eq!(loc.get("lat").as_f64(), Some(52.5));
}

/// Valid writes are visible through the caller's handle.
#[test]
fn test_valid_write_commits_to_shared_data() {
    let data = location();
    let root = to_guarded_view(location_schema(), &data, false).unwrap();

    assert_eq!(
        nested(&root, "loc").set("lng", Value::from(0)).unwrap(),
        WriteOutcome::Committed
    );
    assert_eq!(data.field("loc").field("lng"), Value::from(0));
}

/// Replacing a whole sub-object is validated against its subtree.
#[test]
fn test_replace_nested_object() {
    let data = location();
    let root = to_guarded_view(location_schema(), &data, false).unwrap();

    let bad = Value::from(json!({"lat": 1}));
    assert!(root.set("loc", bad).is_err());

    let good = Value::from(json!({"lat": 1, "lng": 2}));
    root.set("loc", good.clone()).unwrap();
    assert!(nested(&root, "loc").value().same(&good));
}

/// Array element writes use the element schema.
#[test]
fn test_array_element_write() {
    let schema = Schema::object([("tags", Schema::array_of(Schema::string()))]);
    let data = Value::from(json!({"tags": ["a"]}));
    let root = to_guarded_view(schema, &data, false).unwrap();
    let tags = nested(&root, "tags");

    assert!(tags.set(0usize, Value::from(1)).is_err());
    tags.set(1usize, Value::from("b")).unwrap();
    assert_eq!(tags.len(), 2);

    assert!(matches!(
        tags.set(5usize, Value::from("z")),
        Err(GuardError::IndexOutOfBounds { index: 5, len: 2 })
    ));
}

/// Wrapping a non-composite is refused.
#[test]
fn test_wrap_scalar_refused() {
    let err = to_guarded_view(Schema::number(), &Value::from(1), false).unwrap_err();
    assert!(matches!(err, GuardError::NotComposite(_)));
}

// =============================================================================
// Identity Tests
// =============================================================================

/// Two reads of the same nested field yield the same view.
#[test]
fn test_nested_view_identity_stable() {
    let data = location();
    let root = to_guarded_view(location_schema(), &data, false).unwrap();

    let first = nested(&root, "loc");
    let second = nested(&root, "loc");
    assert!(GuardedView::ptr_eq(&first, &second));
}

/// Primitive fields come back raw.
#[test]
fn test_primitive_reads_are_raw() {
    let data = location();
    let root = to_guarded_view(location_schema(), &data, false).unwrap();
    let loc = nested(&root, "loc");

    assert!(matches!(loc.get("lat"), Field::Value(Value::Number(_))));
    assert!(loc.get("alt").is_undefined());
}

/// Separate root wraps do not share views.
#[test]
fn test_sessions_are_independent() {
    let data = location();
    let a = to_guarded_view(location_schema(), &data, false).unwrap();
    let b = to_guarded_view(location_schema(), &data, true).unwrap();

    let loc_a = nested(&a, "loc");
    let loc_b = nested(&b, "loc");
    assert!(!GuardedView::ptr_eq(&loc_a, &loc_b));
    assert!(loc_a.value().same(loc_b.value()));

    // Each keeps its own policy.
    assert!(loc_a.set("lat", Value::from("x")).is_err());
    assert!(loc_b.set("lat", Value::from("x")).is_ok());
}

/// Dropped nested views are not kept alive by the session.
#[test]
fn test_dropped_views_released() {
    let data = location();
    let root = to_guarded_view(location_schema(), &data, false).unwrap();

    let loc = nested(&root, "loc");
    assert_eq!(root.live_views(), 1);
    drop(loc);
    assert_eq!(root.live_views(), 0);
}

// =============================================================================
// Record Factory Tests
// =============================================================================

#[test]
fn test_record_factory_guards_records() {
    let factory = RecordFactory::new(location_schema(), GuardOptions::strict())
        .with_defaults(Value::from(json!({"loc": {"lat": 0, "lng": 0}})));

    let record = factory.build(&Value::object(Vec::<(String, Value)>::new())).unwrap();
    let loc = nested(&record, "loc");
    assert_eq!(loc.get("lat").as_f64(), Some(0.0));
    assert!(loc.set("lat", Value::Null).is_err());
}
