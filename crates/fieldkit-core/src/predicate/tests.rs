use super::*;
use crate::{
    column::{ColumnIdentifier, IdentityMapper},
    field::{HasComparableOperators, HasStringOperators, IntField, StringField},
    value::Value,
};
use fieldkit_primitives::Inclusion;

#[derive(Clone, Debug, Default)]
struct Order {
    qty: i32,
    sku: Option<String>,
}

fn order(qty: i32, sku: Option<&str>) -> Order {
    Order {
        qty,
        sku: sku.map(str::to_string),
    }
}

fn qty() -> IntField<Order> {
    IntField::create(
        ColumnIdentifier::new("order", "qty"),
        |o: &Order| o.qty,
        |o: &mut Order, v| o.qty = v,
        IdentityMapper,
        false,
    )
}

fn sku() -> StringField<Order> {
    StringField::create(
        ColumnIdentifier::new("order", "sku"),
        |o: &Order| o.sku.as_ref(),
        |o: &mut Order, v| o.sku = v,
        IdentityMapper,
        false,
    )
}

//
// PredicateType
//

#[test]
fn complement_is_an_involution() {
    for ty in PredicateType::ALL {
        assert_ne!(ty.complement(), *ty, "{ty} is its own complement");
        assert_eq!(ty.complement().complement(), *ty);
    }
}

#[test]
fn ordering_complements_swap_direction() {
    assert_eq!(PredicateType::GreaterThan.complement(), PredicateType::LessOrEqual);
    assert_eq!(PredicateType::LessThan.complement(), PredicateType::GreaterOrEqual);
    assert_eq!(PredicateType::AlwaysTrue.complement(), PredicateType::AlwaysFalse);
}

#[test]
fn tags_and_labels_are_unique() {
    let mut tags: Vec<u8> = PredicateType::ALL.iter().map(|t| t.tag()).collect();
    tags.sort_unstable();
    tags.dedup();
    assert_eq!(tags.len(), PredicateType::ALL.len());

    let mut labels: Vec<&str> = PredicateType::ALL.iter().map(|t| t.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    assert_eq!(labels.len(), PredicateType::ALL.len());
}

#[test]
fn display_matches_label() {
    for t in PredicateType::ALL {
        assert_eq!(t.to_string(), t.label());
    }
}

#[test]
fn classification_helpers() {
    assert!(PredicateType::LessThan.is_binary());
    assert!(!PredicateType::Between.is_binary());
    assert!(PredicateType::NotContainsIgnoreCase.is_case_insensitive());
    assert!(!PredicateType::Contains.is_case_insensitive());
    assert!(PredicateType::AlwaysFalse.is_constant());
    assert_eq!(PredicateType::StartsWithIgnoreCase.to_string(), "starts_with_ignore_case");
}

#[test]
fn predicate_type_serializes_by_name() {
    let json = serde_json::to_string(&PredicateType::NotIn).unwrap();
    assert_eq!(json, "\"NotIn\"");
}

//
// FieldPredicate
//

#[test]
fn negation_keeps_base_type_and_flips_result() {
    let pred = qty().greater_than(3);
    let negated = pred.negate();

    assert_eq!(negated.base_type(), PredicateType::GreaterThan);
    assert_eq!(negated.predicate_type(), PredicateType::LessOrEqual);
    assert!(negated.is_negated());
    assert!(negated.test(&order(3, None)));
    assert!(!negated.test(&order(4, None)));

    let twice = negated.negate();
    assert_eq!(twice.predicate_type(), PredicateType::GreaterThan);
    assert!(!twice.is_negated());
}

#[test]
fn not_operator_negates() {
    let pred = !sku().equal("a");

    assert_eq!(pred.predicate_type(), PredicateType::NotEqual);
    assert!(pred.test(&order(0, None)));
}

#[test]
fn operand_accessors() {
    let pred = qty().between(1, 9, Inclusion::StartInclusiveEndInclusive);

    assert_eq!(pred.operands().len(), 2);
    assert_eq!(pred.operand().and_then(Operand::as_value), Some(&Value::Int(1)));
    assert_eq!(pred.field().identifier.column(), "qty");
}

#[test]
fn to_fn_detaches_the_test() {
    let keep = qty().less_than(5).negate().to_fn();
    let orders = vec![order(1, None), order(5, None), order(8, None)];

    let kept: Vec<i32> = orders.iter().filter(|o| keep(o)).map(|o| o.qty).collect();
    assert_eq!(kept, vec![5, 8]);
}

//
// Predicate
//

#[test]
fn and_or_evaluate_and_flatten() {
    let small = qty().less_than(10);
    let abc = sku().starts_with("abc");
    let empty = sku().is_null();

    let both = small & abc.clone() & qty().greater_than(0);
    assert!(matches!(&both, Predicate::And(children) if children.len() == 3));
    assert!(both.test(&order(5, Some("abc-1"))));
    assert!(!both.test(&order(5, Some("xyz"))));

    let either = abc | empty;
    assert!(matches!(&either, Predicate::Or(children) if children.len() == 2));
    assert!(either.test(&order(0, None)));
    assert!(!either.test(&order(0, Some("x"))));
}

#[test]
fn empty_connectives() {
    let all: Predicate<Order> = Predicate::all(Vec::<FieldPredicate<Order>>::new());
    let any: Predicate<Order> = Predicate::any(Vec::<FieldPredicate<Order>>::new());

    assert!(all.test(&order(0, None)));
    assert!(!any.test(&order(0, None)));
}

#[test]
fn negate_applies_de_morgan() {
    let pred = qty().greater_than(1).and(sku().equal("a"));
    let negated = pred.negate();

    let Predicate::Or(children) = &negated else {
        panic!("expected a disjunction, got {negated:?}");
    };
    let types: Vec<_> = negated.leaves().iter().map(|p| p.predicate_type()).collect();
    assert_eq!(children.len(), 2);
    assert_eq!(types, vec![PredicateType::LessOrEqual, PredicateType::NotEqual]);

    for sample in [order(0, None), order(2, Some("a")), order(2, Some("b"))] {
        assert_eq!(negated.test(&sample), !pred.test(&sample));
    }
}

#[test]
fn leaves_are_depth_first() {
    let pred = Predicate::any([
        qty().equal(1).and(qty().equal(2)),
        Predicate::from(qty().equal(3)),
    ]);

    let ops: Vec<_> = pred
        .leaves()
        .iter()
        .filter_map(|p| p.operand().and_then(Operand::as_value).cloned())
        .collect();
    assert_eq!(ops, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
}

//
// fingerprint
//

#[test]
fn fingerprint_is_structural() {
    let a = qty().greater_than(3).and(sku().contains("x"));
    let b = qty().greater_than(3).and(sku().contains("x"));

    assert_eq!(a.fingerprint(), b.fingerprint());
}

#[test]
fn fingerprint_distinguishes_operands_negation_and_shape() {
    let base = qty().greater_than(3);

    assert_ne!(base.fingerprint(), qty().greater_than(4).fingerprint());
    assert_ne!(base.fingerprint(), base.negate().fingerprint());
    assert_ne!(base.fingerprint(), qty().less_or_equal(3).fingerprint());

    let and = qty().equal(1).and(qty().equal(2));
    let or = qty().equal(1).or(qty().equal(2));
    assert_ne!(and.fingerprint(), or.fingerprint());
}

#[test]
fn fingerprint_includes_inclusion() {
    let closed = qty().between(1, 2, Inclusion::StartInclusiveEndInclusive);
    let open = qty().between(1, 2, Inclusion::StartExclusiveEndExclusive);

    assert_ne!(closed.fingerprint(), open.fingerprint());
}

#[test]
fn field_and_tree_fingerprints_agree_for_a_leaf() {
    let leaf = sku().ends_with("z");

    assert_eq!(leaf.fingerprint(), Predicate::from(leaf.clone()).fingerprint());
}
