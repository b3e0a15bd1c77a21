use crate::{
    error::{Error, ErrorOrigin},
    value::{Value, ValueEnum, tag::canonical_tag},
};
use rust_decimal::Decimal;
use std::cmp::Ordering;

///
/// TotalOrd
///
/// Natural total order of a scalar. Floating kinds order `-0.0` before
/// `0.0`, place NaN above every other value and treat all NaNs as equal.
///

pub trait TotalOrd {
    fn total_cmp(&self, other: &Self) -> Ordering;
}

macro_rules! impl_total_ord_via_ord {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TotalOrd for $ty {
                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    };
}

impl_total_ord_via_ord!(bool, i8, i16, i32, i64, char, Decimal, str, String);

impl TotalOrd for f32 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => f32::total_cmp(self, other),
        }
    }
}

impl TotalOrd for f64 {
    fn total_cmp(&self, other: &Self) -> Ordering {
        match (self.is_nan(), other.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => f64::total_cmp(self, other),
        }
    }
}

/// Total canonical comparator used by keyed collection and fingerprints.
///
/// Ordering rules:
/// 1. Canonical variant rank
/// 2. Variant-specific comparison for same-ranked values
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.canonical_rank().cmp(&right.canonical_rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Strict comparator for identical orderable variants.
///
/// Mixed variants and variants without a natural order are unsupported.
pub fn strict_order_cmp(left: &Value, right: &Value) -> Result<Ordering, Error> {
    match (left, right) {
        (Value::Blob(_), _) | (_, Value::Blob(_)) | (Value::List(_), _) | (_, Value::List(_)) => {
            Err(Error::unsupported(
                ErrorOrigin::Comparator,
                format!(
                    "no natural order between {} and {}",
                    canonical_tag(left).label(),
                    canonical_tag(right).label()
                ),
            ))
        }
        _ if left.canonical_rank() != right.canonical_rank() => Err(Error::unsupported(
            ErrorOrigin::Comparator,
            format!(
                "cannot order {} against {}",
                canonical_tag(left).label(),
                canonical_tag(right).label()
            ),
        )),
        _ => Ok(canonical_cmp_same_rank(left, right)),
    }
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    #[allow(clippy::match_same_arms)]
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Byte(a), Value::Byte(b)) => a.cmp(b),
        (Value::Short(a), Value::Short(b)) => a.cmp(b),
        (Value::Char(a), Value::Char(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Long(a), Value::Long(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => TotalOrd::total_cmp(a, b),
        (Value::Double(a), Value::Double(b)) => TotalOrd::total_cmp(a, b),
        (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Enum(a), Value::Enum(b)) => canonical_cmp_value_enum(a, b),
        (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_value_list(a, b),
        (Value::Null, Value::Null) => Ordering::Equal,
        _ => Ordering::Equal,
    }
}

fn canonical_cmp_value_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

// Enums of the same domain order by ordinal; different domains by path.
fn canonical_cmp_value_enum(left: &ValueEnum, right: &ValueEnum) -> Ordering {
    left.path
        .cmp(&right.path)
        .then(left.ordinal.cmp(&right.ordinal))
        .then_with(|| left.name.cmp(&right.name))
}
