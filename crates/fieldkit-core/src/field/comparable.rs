use crate::{
    column::{ColumnIdentifier, TypeMapper},
    field::{Accessor, Field, FieldInfo, HasComparableOperators, ReferenceField},
    value::{FieldValue, TotalOrd, Value},
};
use derive_more::Deref;
use fieldkit_primitives::{ExpressionKind, MapperOrdering};
use rust_decimal::Decimal;
use std::fmt;

///
/// ComparableValue
///
/// Value types a nullable ordered column may expose, with the kind the
/// column reports.
///

pub trait ComparableValue: Clone + TotalOrd + FieldValue + Send + Sync + 'static {
    const KIND: ExpressionKind;
}

macro_rules! comparable_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ComparableValue for $ty {
                const KIND: ExpressionKind = ExpressionKind::$kind;
            }
        )*
    };
}

comparable_value! {
    bool => BooleanNullable,
    i8 => ByteNullable,
    i16 => ShortNullable,
    char => CharNullable,
    i32 => IntNullable,
    i64 => LongNullable,
    f32 => FloatNullable,
    f64 => DoubleNullable,
    Decimal => BigDecimalNullable,
    String => StringNullable,
}

///
/// ComparableField
///
/// Nullable column whose value has a natural order. Dereferences to the
/// underlying [`ReferenceField`] for getters, setters and mapping.
///

#[derive(Deref)]
pub struct ComparableField<E, D, V> {
    inner: ReferenceField<E, D, V>,
}

/// Nullable decimal column.
pub type DecimalField<E, D = Decimal> = ComparableField<E, D, Decimal>;

impl<E, D, V> Clone for ComparableField<E, D, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E, D, V> fmt::Debug for ComparableField<E, D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComparableField").field(&self.inner).finish()
    }
}

impl<E, D, V> ComparableField<E, D, V>
where
    E: 'static,
    D: 'static,
    V: ComparableValue,
{
    pub fn create(
        identifier: ColumnIdentifier,
        getter: impl for<'a> Fn(&'a E) -> Option<&'a V> + Send + Sync + 'static,
        setter: impl Fn(&mut E, Option<V>) + Send + Sync + 'static,
        type_mapper: impl TypeMapper<D, V> + 'static,
        unique: bool,
    ) -> Self {
        Self {
            inner: ReferenceField::with_kind(identifier, V::KIND, getter, setter, type_mapper, unique),
        }
    }
}

impl<E, D, V> Field<E> for ComparableField<E, D, V>
where
    E: 'static,
    D: 'static,
    V: ComparableValue,
{
    fn info(&self) -> &FieldInfo {
        self.inner.field_info()
    }

    fn mapper_ordering(&self) -> MapperOrdering {
        self.inner.stored_ordering()
    }

    fn value_of(&self, entity: &E) -> Value {
        self.inner.value_of(entity)
    }
}

impl<E, D, V> HasComparableOperators<E> for ComparableField<E, D, V>
where
    E: 'static,
    D: 'static,
    V: ComparableValue,
{
    type Item = V;

    fn accessor(&self) -> Accessor<E, V> {
        self.inner.borrowed()
    }
}
