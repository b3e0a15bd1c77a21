use super::*;
use crate::error::ErrorClass;
use fieldkit_primitives::MapperOrdering;

#[test]
fn try_new_rejects_empty_names() {
    let err = ColumnIdentifier::try_new("", "name").unwrap_err();
    assert_eq!(err.class, ErrorClass::InvalidArgument);
    assert_eq!(err.origin, ErrorOrigin::Column);

    let err = ColumnIdentifier::try_new("person", "").unwrap_err();
    assert!(err.message.contains("person"));
}

#[test]
fn identifier_display_includes_schema_when_set() {
    let id = ColumnIdentifier::new("person", "name");
    assert_eq!(id.to_string(), "person.name");

    let id = id.with_schema("crm");
    assert_eq!(id.to_string(), "crm.person.name");
    assert_eq!(id.schema(), Some("crm"));
}

#[test]
fn empty_schema_is_no_schema() {
    let id = ColumnIdentifier::new("person", "name").with_schema("");
    assert_eq!(id, ColumnIdentifier::new("person", "name"));
}

#[test]
fn identifier_serde_round_trip() {
    let id = ColumnIdentifier::new("person", "age").with_schema("crm");
    let json = serde_json::to_string(&id).unwrap();
    let back: ColumnIdentifier = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}

#[test]
fn identity_mapper_retains_order() {
    let mapper = IdentityMapper;
    assert_eq!(TypeMapper::<i32, i32>::to_exposed(&mapper, 7), 7);
    assert_eq!(TypeMapper::<i32, i32>::ordering(&mapper), MapperOrdering::Retain);
}

#[test]
fn fn_mapper_converts_both_ways() {
    let cents = FnMapper::new("cents", |c: i64| c as f64 / 100.0, |d: f64| (d * 100.0).round() as i64)
        .with_ordering(MapperOrdering::Retain);

    assert!((cents.to_exposed(1_250) - 12.5).abs() < f64::EPSILON);
    assert_eq!(cents.to_stored(3.99), 399);
    assert_eq!(cents.label(), "cents");
    assert_eq!(cents.ordering(), MapperOrdering::Retain);
}
