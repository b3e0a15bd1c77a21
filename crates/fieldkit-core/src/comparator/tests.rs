use super::*;
use crate::{
    column::{ColumnIdentifier, IdentityMapper},
    error::ErrorClass,
    field::{
        BoolField, DoubleField, Field, HasComparableOperators, IntField, ReferenceField,
        StringField,
    },
};

#[derive(Clone, Debug, Default, PartialEq)]
struct Row {
    rank: i32,
    score: f64,
    active: bool,
    label: Option<String>,
    blob: Option<Vec<u8>>,
}

fn row(rank: i32, label: Option<&str>) -> Row {
    Row {
        rank,
        label: label.map(str::to_string),
        ..Row::default()
    }
}

fn rank() -> IntField<Row> {
    IntField::create(
        ColumnIdentifier::new("row", "rank"),
        |r: &Row| r.rank,
        |r: &mut Row, v| r.rank = v,
        IdentityMapper,
        false,
    )
}

fn score() -> DoubleField<Row> {
    DoubleField::create(
        ColumnIdentifier::new("row", "score"),
        |r: &Row| r.score,
        |r: &mut Row, v| r.score = v,
        IdentityMapper,
        false,
    )
}

fn label() -> StringField<Row> {
    StringField::create(
        ColumnIdentifier::new("row", "label"),
        |r: &Row| r.label.as_ref(),
        |r: &mut Row, v| r.label = v,
        IdentityMapper,
        false,
    )
}

fn labels(rows: &[Row]) -> Vec<Option<&str>> {
    rows.iter().map(|r| r.label.as_deref()).collect()
}

#[test]
fn nulls_last_by_default() {
    let mut rows = vec![row(0, None), row(0, Some("b")), row(0, Some("a"))];
    label().comparator().sort(&mut rows);

    assert_eq!(labels(&rows), vec![Some("a"), Some("b"), None]);
}

#[test]
fn nulls_first_when_requested() {
    let mut rows = vec![row(0, Some("b")), row(0, None), row(0, Some("a"))];
    let cmp = label().comparator_null_first();
    cmp.sort(&mut rows);

    assert_eq!(cmp.null_order(), NullOrder::First);
    assert_eq!(labels(&rows), vec![None, Some("a"), Some("b")]);
}

#[test]
fn reversal_keeps_null_placement() {
    let mut rows = vec![row(0, Some("a")), row(0, None), row(0, Some("c"))];
    let cmp = label().comparator().reversed();
    cmp.sort(&mut rows);

    assert!(cmp.is_reversed());
    assert_eq!(labels(&rows), vec![Some("c"), Some("a"), None]);
    assert!(!cmp.reversed().is_reversed());
}

#[test]
fn string_order_is_by_code_point() {
    let mut rows = vec![row(0, Some("b")), row(0, Some("B")), row(0, Some("a"))];
    label().comparator().sort(&mut rows);

    assert_eq!(labels(&rows), vec![Some("B"), Some("a"), Some("b")]);
}

#[test]
fn double_order_is_total() {
    let mut rows: Vec<Row> = [f64::NAN, 1.0, -0.0, 0.0, f64::NEG_INFINITY]
        .into_iter()
        .map(|score| Row {
            score,
            ..Row::default()
        })
        .collect();
    score().comparator().sort(&mut rows);

    let scores: Vec<f64> = rows.iter().map(|r| r.score).collect();
    assert_eq!(scores[0], f64::NEG_INFINITY);
    assert!(scores[1].is_sign_negative() && scores[1] == 0.0);
    assert!(scores[2].is_sign_positive() && scores[2] == 0.0);
    assert!((scores[3] - 1.0).abs() < f64::EPSILON);
    assert!(scores[4].is_nan());
}

#[test]
fn chained_comparator_breaks_ties_in_order() {
    let mut rows = vec![row(2, Some("a")), row(1, Some("b")), row(1, Some("a"))];
    let cmp = rank().comparator().then(label().comparator().reversed());
    cmp.sort(&mut rows);

    let keys: Vec<(i32, Option<&str>)> = rows.iter().map(|r| (r.rank, r.label.as_deref())).collect();
    assert_eq!(keys, vec![(1, Some("b")), (1, Some("a")), (2, Some("a"))]);
    assert_eq!(cmp.parts().len(), 2);
}

#[test]
fn sort_is_stable() {
    let mut rows = vec![row(1, Some("first")), row(0, None), row(1, Some("second"))];
    rank().comparator().sort(&mut rows);

    assert_eq!(labels(&rows), vec![None, Some("first"), Some("second")]);
}

#[test]
fn reversed_chain_reverses_every_part() {
    let cmp = Comparator::from(rank().comparator()).then(score().comparator());
    let reversed = cmp.reversed();

    assert!(reversed.parts().iter().all(FieldComparator::is_reversed));
    assert_eq!(
        reversed.compare(&row(1, None), &row(2, None)),
        Ordering::Greater
    );
}

#[test]
fn try_combine_rejects_empty_chain() {
    let err = Comparator::<Row>::try_combine(Vec::new()).unwrap_err();

    assert_eq!(err.class, ErrorClass::InvalidArgument);
    assert_eq!(err.origin, ErrorOrigin::Comparator);

    let ok = Comparator::try_combine([rank().comparator(), label().comparator()]).unwrap();
    assert_eq!(ok.compare(&row(1, Some("a")), &row(1, Some("a"))), Ordering::Equal);
}

#[test]
fn comparator_reports_its_field() {
    let cmp = rank().comparator();

    assert_eq!(cmp.field().identifier.column(), "rank");
    assert_eq!(cmp.field(), rank().info());
}

#[test]
fn bool_comparator_puts_false_first() {
    let active = BoolField::create(
        ColumnIdentifier::new("row", "active"),
        |r: &Row| r.active,
        |r: &mut Row, v| r.active = v,
        IdentityMapper,
        false,
    );
    let on = Row {
        active: true,
        ..Row::default()
    };

    assert_eq!(active.comparator().compare(&Row::default(), &on), Ordering::Less);
}

//
// ValueComparator
//

#[test]
fn value_comparator_sorts_through_dynamic_values() {
    let field: Arc<dyn Field<Row>> = Arc::new(label());
    let cmp = ValueComparator::new(field).with_null_order(NullOrder::First);
    let mut rows = vec![row(0, Some("b")), row(0, None), row(0, Some("a"))];

    cmp.try_sort(&mut rows).unwrap();
    assert_eq!(labels(&rows), vec![None, Some("a"), Some("b")]);
    assert_eq!(
        cmp.try_compare(&row(0, Some("a")), &row(0, Some("b"))).unwrap(),
        Ordering::Less
    );
}

#[test]
fn value_comparator_rejects_unordered_kinds() {
    let blob: ReferenceField<Row, Vec<u8>, Vec<u8>> = ReferenceField::create(
        ColumnIdentifier::new("row", "blob"),
        |r: &Row| r.blob.as_ref(),
        |r: &mut Row, v| r.blob = v,
        IdentityMapper,
        false,
    );
    let cmp = ValueComparator::<Row>::new(Arc::new(blob));
    let mut rows = vec![
        Row {
            blob: Some(vec![2]),
            ..Row::default()
        },
        Row {
            blob: Some(vec![1]),
            ..Row::default()
        },
    ];
    let before = rows.clone();

    let err = cmp.try_sort(&mut rows).unwrap_err();
    assert_eq!(err.class, ErrorClass::Unsupported);
    assert_eq!(rows, before);
    assert!(cmp.try_compare(&before[0], &before[1]).is_err());
}

#[test]
fn value_comparator_agrees_with_typed_comparator() {
    let typed = rank().comparator();
    let dynamic = ValueComparator::<Row>::new(Arc::new(rank()));
    let (a, b) = (row(3, None), row(7, None));

    assert_eq!(dynamic.try_compare(&a, &b).unwrap(), typed.compare(&a, &b));
    assert_eq!(dynamic.try_compare(&b, &a).unwrap(), typed.compare(&b, &a));
}
