use crate::{
    column::{ColumnIdentifier, TypeMapper},
    comparator::{FieldComparator, Presence},
    expr::{EnumDomain, ToEnumNullable, ordinal_cmp},
    field::{Field, FieldInfo, ReferenceField},
    obs::sink::{self, CollapseShape, MetricsEvent},
    predicate::{FieldPredicate, Operand, PredicateType},
    value::Value,
};
use derive_more::Deref;
use fieldkit_primitives::{ExpressionKind, Inclusion, MapperOrdering, NullOrder};
use std::fmt;

///
/// EnumField
///
/// Nullable column over a finite enum domain. Range and membership
/// predicates are resolved against `EnumDomain::VALUES` up front and
/// returned in the smallest shape that expresses the match:
///
/// - no constant matches: an always-false predicate
/// - one constant matches: an equality
/// - several match: a membership test
///
/// Negated forms negate the collapsed predicate, so translators see
/// always-true, not-equal and not-in respectively.
///

#[derive(Deref)]
pub struct EnumField<E, D, V> {
    inner: ReferenceField<E, D, V>,
}

impl<E, D, V> Clone for EnumField<E, D, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E, D, V> fmt::Debug for EnumField<E, D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumField").field(&self.inner).finish()
    }
}

impl<E, D, V> EnumField<E, D, V>
where
    E: 'static,
    D: 'static,
    V: EnumDomain,
{
    pub fn create(
        identifier: ColumnIdentifier,
        getter: impl for<'a> Fn(&'a E) -> Option<&'a V> + Send + Sync + 'static,
        setter: impl Fn(&mut E, Option<V>) + Send + Sync + 'static,
        type_mapper: impl TypeMapper<D, V> + 'static,
        unique: bool,
    ) -> Self {
        Self {
            inner: ReferenceField::with_kind(
                identifier,
                ExpressionKind::EnumNullable,
                getter,
                setter,
                type_mapper,
                unique,
            ),
        }
    }

    /// The column as a nullable enum expression.
    #[must_use]
    pub fn expression(&self) -> ToEnumNullable<E, V> {
        let get = self.inner.borrowed();
        ToEnumNullable::new(move |e| get(e).map(|v| *v))
    }

    /// Single equality; never collapsed.
    #[must_use]
    pub fn equal(&self, value: V) -> FieldPredicate<E> {
        let get = self.inner.borrowed();

        FieldPredicate::build(
            self.info().clone(),
            PredicateType::Equal,
            vec![Operand::Value(value.to_value())],
            move |e| get(e).is_some_and(|v| *v == value),
        )
    }

    #[must_use]
    pub fn not_equal(&self, value: V) -> FieldPredicate<E> {
        self.equal(value).negate()
    }

    #[must_use]
    pub fn less_than(&self, value: V) -> FieldPredicate<E> {
        self.collapse_where(PredicateType::LessThan, |c| ordinal_cmp(c, value).is_lt())
    }

    #[must_use]
    pub fn less_or_equal(&self, value: V) -> FieldPredicate<E> {
        self.collapse_where(PredicateType::LessOrEqual, |c| ordinal_cmp(c, value).is_le())
    }

    #[must_use]
    pub fn greater_than(&self, value: V) -> FieldPredicate<E> {
        self.collapse_where(PredicateType::GreaterThan, |c| ordinal_cmp(c, value).is_gt())
    }

    #[must_use]
    pub fn greater_or_equal(&self, value: V) -> FieldPredicate<E> {
        self.collapse_where(PredicateType::GreaterOrEqual, |c| ordinal_cmp(c, value).is_ge())
    }

    #[must_use]
    pub fn between(&self, start: V, end: V, inclusion: Inclusion) -> FieldPredicate<E> {
        self.collapse_where(PredicateType::Between, |c| {
            let lower = ordinal_cmp(c, start);
            let upper = ordinal_cmp(c, end);
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
    }

    #[must_use]
    pub fn not_between(&self, start: V, end: V, inclusion: Inclusion) -> FieldPredicate<E> {
        self.between(start, end, inclusion).negate()
    }

    pub fn in_(&self, values: impl IntoIterator<Item = V>) -> FieldPredicate<E> {
        let wanted: Vec<V> = values.into_iter().collect();
        self.collapse_where(PredicateType::In, |c| wanted.contains(&c))
    }

    pub fn not_in(&self, values: impl IntoIterator<Item = V>) -> FieldPredicate<E> {
        self.in_(values).negate()
    }

    /// Ordinal order, absent values last.
    #[must_use]
    pub fn comparator(&self) -> FieldComparator<E> {
        self.comparator_null_last()
    }

    #[must_use]
    pub fn comparator_null_first(&self) -> FieldComparator<E> {
        self.ordinal_comparator(NullOrder::First)
    }

    #[must_use]
    pub fn comparator_null_last(&self) -> FieldComparator<E> {
        self.ordinal_comparator(NullOrder::Last)
    }

    fn ordinal_comparator(&self, null_order: NullOrder) -> FieldComparator<E> {
        let get = self.inner.borrowed();

        FieldComparator::new(self.info().clone(), null_order, move |a, b| {
            match (get(a), get(b)) {
                (Some(x), Some(y)) => Presence::Both(ordinal_cmp(*x, *y)),
                (None, Some(_)) => Presence::LeftAbsent,
                (Some(_), None) => Presence::RightAbsent,
                (None, None) => Presence::BothAbsent,
            }
        })
    }

    // Enumerate the domain in ordinal order and collapse the matches.
    fn collapse_where(&self, requested: PredicateType, keep: impl Fn(V) -> bool) -> FieldPredicate<E> {
        let matches: Vec<V> = V::VALUES.iter().copied().filter(|c| keep(*c)).collect();

        let (predicate, shape) = match matches.as_slice() {
            [] => (
                FieldPredicate::constant(self.info().clone(), false),
                CollapseShape::Constant,
            ),
            [single] => (self.equal(*single), CollapseShape::Single),
            _ => (self.membership(matches.clone()), CollapseShape::Membership),
        };

        log::debug!(
            "{} {requested} on {} collapsed to {} ({} of {} constants)",
            V::PATH,
            self.info().identifier,
            predicate.predicate_type(),
            matches.len(),
            V::VALUES.len()
        );
        sink::record(MetricsEvent::EnumPredicateCollapsed {
            enum_path: V::PATH,
            shape,
        });

        predicate
    }

    fn membership(&self, values: Vec<V>) -> FieldPredicate<E> {
        let operands = values
            .iter()
            .map(|v| Operand::Value(v.to_value()))
            .collect();
        let get = self.inner.borrowed();

        FieldPredicate::build(self.info().clone(), PredicateType::In, operands, move |e| {
            get(e).is_some_and(|v| values.contains(&*v))
        })
    }
}

impl<E, D, V> Field<E> for EnumField<E, D, V>
where
    E: 'static,
    D: 'static,
    V: EnumDomain,
{
    fn info(&self) -> &FieldInfo {
        self.inner.field_info()
    }

    fn mapper_ordering(&self) -> MapperOrdering {
        self.inner.stored_ordering()
    }

    fn value_of(&self, entity: &E) -> Value {
        self.inner.get(entity).map_or(Value::Null, |v| v.to_value())
    }
}
