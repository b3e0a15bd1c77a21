use crate::{
    comparator::{FieldComparator, Presence},
    error::{Error, ErrorOrigin},
    field::{Accessor, Field},
    predicate::{FieldPredicate, Operand, PredicateType},
    value::{FieldValue, TotalOrd, fold},
};
use fieldkit_primitives::{CaseFold, Inclusion, NullOrder};
use std::cmp::Ordering;

///
/// HasComparableOperators
///
/// Predicates and comparators over a field with a natural order. Every
/// predicate here is false on an absent value; the `not_*` forms are exact
/// negations and therefore true on an absent value.
///

pub trait HasComparableOperators<E: 'static>: Field<E> {
    type Item: Clone + TotalOrd + FieldValue + Send + Sync + 'static;

    fn accessor(&self) -> Accessor<E, Self::Item>;

    fn equal(&self, value: impl Into<Self::Item>) -> FieldPredicate<E> {
        literal_predicate(self, PredicateType::Equal, value.into(), Ordering::is_eq)
    }

    fn not_equal(&self, value: impl Into<Self::Item>) -> FieldPredicate<E> {
        self.equal(value).negate()
    }

    fn less_than(&self, value: impl Into<Self::Item>) -> FieldPredicate<E> {
        literal_predicate(self, PredicateType::LessThan, value.into(), Ordering::is_lt)
    }

    fn less_or_equal(&self, value: impl Into<Self::Item>) -> FieldPredicate<E> {
        literal_predicate(self, PredicateType::LessOrEqual, value.into(), Ordering::is_le)
    }

    fn greater_than(&self, value: impl Into<Self::Item>) -> FieldPredicate<E> {
        literal_predicate(self, PredicateType::GreaterThan, value.into(), Ordering::is_gt)
    }

    fn greater_or_equal(&self, value: impl Into<Self::Item>) -> FieldPredicate<E> {
        literal_predicate(self, PredicateType::GreaterOrEqual, value.into(), Ordering::is_ge)
    }

    fn between(
        &self,
        start: impl Into<Self::Item>,
        end: impl Into<Self::Item>,
        inclusion: Inclusion,
    ) -> FieldPredicate<E> {
        let (start, end) = (start.into(), end.into());
        let operands = vec![
            Operand::Value(start.to_value()),
            Operand::Value(end.to_value()),
        ];
        let get = self.accessor();

        FieldPredicate::build(
            self.info().clone(),
            PredicateType::Between,
            operands,
            move |e| {
                get(e).is_some_and(|v| {
                    let lower = TotalOrd::total_cmp(&*v, &start);
                    let upper = TotalOrd::total_cmp(&*v, &end);
                    let after_start = if inclusion.is_start_inclusive() {
                        lower.is_ge()
                    } else {
                        lower.is_gt()
                    };
                    let before_end = if inclusion.is_end_inclusive() {
                        upper.is_le()
                    } else {
                        upper.is_lt()
                    };

                    after_start && before_end
                })
            },
        )
        .with_inclusion(inclusion)
    }

    fn not_between(
        &self,
        start: impl Into<Self::Item>,
        end: impl Into<Self::Item>,
        inclusion: Inclusion,
    ) -> FieldPredicate<E> {
        self.between(start, end, inclusion).negate()
    }

    fn in_(&self, values: impl IntoIterator<Item = impl Into<Self::Item>>) -> FieldPredicate<E> {
        let values: Vec<Self::Item> = values.into_iter().map(Into::into).collect();
        let operands = values.iter().map(|v| Operand::Value(v.to_value())).collect();
        let get = self.accessor();

        FieldPredicate::build(self.info().clone(), PredicateType::In, operands, move |e| {
            get(e).is_some_and(|v| {
                values
                    .iter()
                    .any(|candidate| TotalOrd::total_cmp(&*v, candidate).is_eq())
            })
        })
    }

    fn not_in(&self, values: impl IntoIterator<Item = impl Into<Self::Item>>) -> FieldPredicate<E> {
        self.in_(values).negate()
    }

    fn is_null(&self) -> FieldPredicate<E> {
        let get = self.accessor();

        FieldPredicate::build(self.info().clone(), PredicateType::IsNull, Vec::new(), move |e| {
            get(e).is_none()
        })
    }

    fn is_not_null(&self) -> FieldPredicate<E> {
        self.is_null().negate()
    }

    /// Equality against another field of the same entity.
    fn equal_field<F>(&self, other: &F) -> FieldPredicate<E>
    where
        F: HasComparableOperators<E, Item = Self::Item>,
    {
        field_predicate(self, other, PredicateType::Equal, Ordering::is_eq)
    }

    /// Binary comparison against another field of the same entity.
    fn compare_field<F>(
        &self,
        predicate_type: PredicateType,
        other: &F,
    ) -> Result<FieldPredicate<E>, Error>
    where
        F: HasComparableOperators<E, Item = Self::Item>,
    {
        let predicate = match predicate_type {
            PredicateType::Equal => field_predicate(self, other, predicate_type, Ordering::is_eq),
            PredicateType::NotEqual => {
                field_predicate(self, other, PredicateType::Equal, Ordering::is_eq).negate()
            }
            PredicateType::LessThan => field_predicate(self, other, predicate_type, Ordering::is_lt),
            PredicateType::LessOrEqual => {
                field_predicate(self, other, predicate_type, Ordering::is_le)
            }
            PredicateType::GreaterThan => {
                field_predicate(self, other, predicate_type, Ordering::is_gt)
            }
            PredicateType::GreaterOrEqual => {
                field_predicate(self, other, predicate_type, Ordering::is_ge)
            }
            other_type => {
                return Err(Error::invalid_argument(
                    ErrorOrigin::Predicate,
                    format!("{other_type} is not a binary field comparison"),
                ));
            }
        };

        Ok(predicate)
    }

    /// Natural order, absent values last.
    fn comparator(&self) -> FieldComparator<E> {
        self.comparator_null_last()
    }

    fn comparator_null_first(&self) -> FieldComparator<E> {
        field_comparator(self, NullOrder::First)
    }

    fn comparator_null_last(&self) -> FieldComparator<E> {
        field_comparator(self, NullOrder::Last)
    }
}

fn literal_predicate<E, F>(
    field: &F,
    predicate_type: PredicateType,
    value: F::Item,
    accept: fn(Ordering) -> bool,
) -> FieldPredicate<E>
where
    E: 'static,
    F: HasComparableOperators<E> + ?Sized,
{
    let operands = vec![Operand::Value(value.to_value())];
    let get = field.accessor();

    FieldPredicate::build(field.info().clone(), predicate_type, operands, move |e| {
        get(e).is_some_and(|v| accept(TotalOrd::total_cmp(&*v, &value)))
    })
}

fn field_predicate<E, F, G>(
    field: &F,
    other: &G,
    predicate_type: PredicateType,
    accept: fn(Ordering) -> bool,
) -> FieldPredicate<E>
where
    E: 'static,
    F: HasComparableOperators<E> + ?Sized,
    G: HasComparableOperators<E, Item = F::Item> + ?Sized,
{
    let operands = vec![Operand::Field(other.info().clone())];
    let (left, right) = (field.accessor(), other.accessor());

    FieldPredicate::build(field.info().clone(), predicate_type, operands, move |e| {
        match (left(e), right(e)) {
            (Some(a), Some(b)) => accept(TotalOrd::total_cmp(&*a, &*b)),
            _ => false,
        }
    })
}

fn field_comparator<E, F>(field: &F, null_order: NullOrder) -> FieldComparator<E>
where
    E: 'static,
    F: HasComparableOperators<E> + ?Sized,
{
    let get = field.accessor();

    FieldComparator::new(field.info().clone(), null_order, move |a, b| {
        match (get(a), get(b)) {
            (Some(x), Some(y)) => Presence::Both(TotalOrd::total_cmp(&*x, &*y)),
            (None, Some(_)) => Presence::LeftAbsent,
            (Some(_), None) => Presence::RightAbsent,
            (None, None) => Presence::BothAbsent,
        }
    })
}

///
/// HasStringOperators
///
/// Text predicates. Case-insensitive forms fold both sides with the
/// field's [`CaseFold`]; the needle is folded once, at construction.
///

pub trait HasStringOperators<E: 'static>: HasComparableOperators<E, Item = String> {
    fn case_fold(&self) -> CaseFold;

    fn equal_ignore_case(&self, value: impl Into<String>) -> FieldPredicate<E> {
        text_predicate(self, PredicateType::EqualIgnoreCase, value.into(), |v, n| v == n)
    }

    fn not_equal_ignore_case(&self, value: impl Into<String>) -> FieldPredicate<E> {
        self.equal_ignore_case(value).negate()
    }

    fn starts_with(&self, value: impl Into<String>) -> FieldPredicate<E> {
        text_predicate(self, PredicateType::StartsWith, value.into(), |v, n| v.starts_with(n))
    }

    fn not_starts_with(&self, value: impl Into<String>) -> FieldPredicate<E> {
        self.starts_with(value).negate()
    }

    fn starts_with_ignore_case(&self, value: impl Into<String>) -> FieldPredicate<E> {
        text_predicate(
            self,
            PredicateType::StartsWithIgnoreCase,
            value.into(),
            |v, n| v.starts_with(n),
        )
    }

    fn not_starts_with_ignore_case(&self, value: impl Into<String>) -> FieldPredicate<E> {
        self.starts_with_ignore_case(value).negate()
    }

    fn ends_with(&self, value: impl Into<String>) -> FieldPredicate<E> {
        text_predicate(self, PredicateType::EndsWith, value.into(), |v, n| v.ends_with(n))
    }

    fn not_ends_with(&self, value: impl Into<String>) -> FieldPredicate<E> {
        self.ends_with(value).negate()
    }

    fn ends_with_ignore_case(&self, value: impl Into<String>) -> FieldPredicate<E> {
        text_predicate(
            self,
            PredicateType::EndsWithIgnoreCase,
            value.into(),
            |v, n| v.ends_with(n),
        )
    }

    fn not_ends_with_ignore_case(&self, value: impl Into<String>) -> FieldPredicate<E> {
        self.ends_with_ignore_case(value).negate()
    }

    fn contains(&self, value: impl Into<String>) -> FieldPredicate<E> {
        text_predicate(self, PredicateType::Contains, value.into(), |v, n| v.contains(n))
    }

    fn not_contains(&self, value: impl Into<String>) -> FieldPredicate<E> {
        self.contains(value).negate()
    }

    fn contains_ignore_case(&self, value: impl Into<String>) -> FieldPredicate<E> {
        text_predicate(
            self,
            PredicateType::ContainsIgnoreCase,
            value.into(),
            |v, n| v.contains(n),
        )
    }

    fn not_contains_ignore_case(&self, value: impl Into<String>) -> FieldPredicate<E> {
        self.contains_ignore_case(value).negate()
    }

    fn is_empty(&self) -> FieldPredicate<E> {
        let get = self.accessor();

        FieldPredicate::build(self.info().clone(), PredicateType::IsEmpty, Vec::new(), move |e| {
            get(e).is_some_and(|v| v.is_empty())
        })
    }

    fn is_not_empty(&self) -> FieldPredicate<E> {
        self.is_empty().negate()
    }
}

fn text_predicate<E, F>(
    field: &F,
    predicate_type: PredicateType,
    needle: String,
    matches: fn(&str, &str) -> bool,
) -> FieldPredicate<E>
where
    E: 'static,
    F: HasStringOperators<E> + ?Sized,
{
    let operands = vec![Operand::Value(needle.to_value())];
    let get = field.accessor();

    let fold_with = predicate_type
        .is_case_insensitive()
        .then(|| field.case_fold());
    let needle = match fold_with {
        Some(case) => fold(&needle, case).into_owned(),
        None => needle,
    };

    FieldPredicate::build(field.info().clone(), predicate_type, operands, move |e| {
        get(e).is_some_and(|v| match fold_with {
            Some(case) => matches(&fold(&v, case), &needle),
            None => matches(&v, &needle),
        })
    })
}
