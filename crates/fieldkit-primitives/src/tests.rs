use crate::{ALL_EXPRESSION_KINDS, ExpressionKind, PROMOTION_KINDS, UnaryOp};

use ExpressionKind::{BigDecimal, Boolean, Byte, Double, Float, Int, Long, Short, String};

#[test]
fn promotion_table_matches_fixed_widening_rules() {
    // rows: lhs, columns: rhs, in PROMOTION_KINDS order
    let expected = [
        [Short, Int, Int, Long, Float, Double],
        [Int, Int, Int, Long, Float, Double],
        [Int, Int, Int, Long, Float, Double],
        [Long, Long, Long, Long, Double, Double],
        [Float, Float, Float, Double, Float, Double],
        [Double, Double, Double, Double, Double, Double],
    ];

    for (row, lhs) in PROMOTION_KINDS.iter().enumerate() {
        for (col, rhs) in PROMOTION_KINDS.iter().enumerate() {
            assert_eq!(
                lhs.promote(*rhs),
                Some(expected[row][col]),
                "{lhs} op {rhs}"
            );
        }
    }
}

#[test]
fn nullability_is_infectious_in_promotion() {
    assert_eq!(
        Byte.nullable().promote(Byte),
        Some(ExpressionKind::ShortNullable)
    );
    assert_eq!(
        Int.promote(Long.nullable()),
        Some(ExpressionKind::LongNullable)
    );
    assert_eq!(Int.promote(Long), Some(Long));
}

#[test]
fn non_numeric_pairs_do_not_promote() {
    assert_eq!(Boolean.promote(Int), None);
    assert_eq!(String.promote(String), None);
    assert_eq!(BigDecimal.promote(Double), None);
    assert_eq!(BigDecimal.promote(Int), Some(BigDecimal));
}

#[test]
fn division_always_yields_double() {
    for lhs in PROMOTION_KINDS {
        for rhs in PROMOTION_KINDS {
            assert_eq!(lhs.quotient(rhs), Some(Double));
        }
    }
    assert_eq!(Byte.quotient(Int.nullable()), Some(ExpressionKind::DoubleNullable));
}

#[test]
fn floor_division_stays_integral() {
    assert_eq!(Byte.floor_quotient(Byte), Some(Short));
    assert_eq!(Int.floor_quotient(Long), Some(Long));
    assert_eq!(Int.floor_quotient(Double), None);
    assert_eq!(Float.floor_quotient(Int), None);
}

#[test]
fn unary_kinds() {
    assert_eq!(Int.unary(UnaryOp::Sign), Some(Byte));
    assert_eq!(Long.unary(UnaryOp::Negate), Some(Long));
    assert_eq!(Short.unary(UnaryOp::Sqrt), Some(Double));
    assert_eq!(
        Int.nullable().unary(UnaryOp::Abs),
        Some(ExpressionKind::IntNullable)
    );
    assert_eq!(String.unary(UnaryOp::Negate), None);
}

#[test]
fn nullable_mapping_round_trips_for_every_kind() {
    for kind in ALL_EXPRESSION_KINDS {
        assert_eq!(kind.nullable().non_null(), kind.non_null());
        assert!(kind.nullable().is_nullable());
        assert!(!kind.non_null().is_nullable());
        assert_eq!(kind.label(), kind.nullable().label());
    }
}

#[test]
fn display_marks_nullable_kinds() {
    assert_eq!(Int.to_string(), "int");
    assert_eq!(Int.nullable().to_string(), "int_nullable");
    assert_eq!(BigDecimal.to_string(), "big_decimal");
}

#[test]
fn reference_kind_has_no_natural_order() {
    assert!(!ExpressionKind::Reference.supports_ordering());
    assert!(ExpressionKind::Enum.supports_ordering());
}
