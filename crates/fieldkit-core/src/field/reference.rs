use crate::{
    column::{ColumnIdentifier, TypeMapper},
    field::{Accessor, Field, FieldInfo, accessor},
    predicate::{FieldPredicate, PredicateType},
    value::{FieldValue, Value},
};
use fieldkit_primitives::{ExpressionKind, MapperOrdering};
use std::{borrow::Cow, fmt, sync::Arc};

type Getter<E, V> = Arc<dyn for<'a> Fn(&'a E) -> Option<&'a V> + Send + Sync>;
type Setter<E, V> = Arc<dyn Fn(&mut E, Option<V>) + Send + Sync>;

///
/// ReferenceField
///
/// Nullable column holding a value with no natural order. The getter
/// borrows from the entity; only presence can be tested.
///

pub struct ReferenceField<E, D, V> {
    info: FieldInfo,
    getter: Getter<E, V>,
    setter: Setter<E, V>,
    mapper: Arc<dyn TypeMapper<D, V>>,
}

impl<E, D, V> Clone for ReferenceField<E, D, V> {
    fn clone(&self) -> Self {
        Self {
            info: self.info.clone(),
            getter: Arc::clone(&self.getter),
            setter: Arc::clone(&self.setter),
            mapper: Arc::clone(&self.mapper),
        }
    }
}

impl<E, D, V> fmt::Debug for ReferenceField<E, D, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferenceField")
            .field("identifier", &self.info.identifier)
            .field("kind", &self.info.kind)
            .field("unique", &self.info.unique)
            .finish_non_exhaustive()
    }
}

impl<E, D, V> ReferenceField<E, D, V>
where
    E: 'static,
    D: 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn create(
        identifier: ColumnIdentifier,
        getter: impl for<'a> Fn(&'a E) -> Option<&'a V> + Send + Sync + 'static,
        setter: impl Fn(&mut E, Option<V>) + Send + Sync + 'static,
        type_mapper: impl TypeMapper<D, V> + 'static,
        unique: bool,
    ) -> Self {
        Self::with_kind(
            identifier,
            ExpressionKind::ReferenceNullable,
            getter,
            setter,
            type_mapper,
            unique,
        )
    }

    // Shared by the ordered families, which report their own kind.
    pub(crate) fn with_kind(
        identifier: ColumnIdentifier,
        kind: ExpressionKind,
        getter: impl for<'a> Fn(&'a E) -> Option<&'a V> + Send + Sync + 'static,
        setter: impl Fn(&mut E, Option<V>) + Send + Sync + 'static,
        type_mapper: impl TypeMapper<D, V> + 'static,
        unique: bool,
    ) -> Self {
        Self {
            info: FieldInfo::new(identifier, kind, unique),
            getter: Arc::new(getter),
            setter: Arc::new(setter),
            mapper: Arc::new(type_mapper),
        }
    }

    pub fn get<'a>(&self, entity: &'a E) -> Option<&'a V> {
        (self.getter)(entity)
    }

    pub fn set(&self, entity: &mut E, value: Option<V>) {
        (self.setter)(entity, value);
    }

    /// Current value in its stored representation; absent stays absent.
    pub fn get_stored(&self, entity: &E) -> Option<D> {
        (self.getter)(entity).map(|v| self.mapper.to_stored(v.clone()))
    }

    pub fn set_stored(&self, entity: &mut E, stored: Option<D>) {
        let value = stored.map(|d| self.mapper.to_exposed(d));
        (self.setter)(entity, value);
    }

    #[must_use]
    pub fn type_mapper(&self) -> &dyn TypeMapper<D, V> {
        &*self.mapper
    }

    #[must_use]
    pub fn is_null(&self) -> FieldPredicate<E> {
        let getter = Arc::clone(&self.getter);

        FieldPredicate::build(
            self.info.clone(),
            PredicateType::IsNull,
            Vec::new(),
            move |e| getter(e).is_none(),
        )
    }

    #[must_use]
    pub fn is_not_null(&self) -> FieldPredicate<E> {
        self.is_null().negate()
    }

    /// Borrowing accessor used by the ordered families.
    pub(crate) fn borrowed(&self) -> Accessor<E, V> {
        let getter = Arc::clone(&self.getter);
        accessor(move |e| getter(e).map(Cow::Borrowed))
    }

    pub(crate) const fn field_info(&self) -> &FieldInfo {
        &self.info
    }

    pub(crate) fn stored_ordering(&self) -> MapperOrdering {
        self.mapper.ordering()
    }
}

impl<E, D, V> Field<E> for ReferenceField<E, D, V>
where
    E: 'static,
    D: 'static,
    V: Clone + FieldValue + Send + Sync + 'static,
{
    fn info(&self) -> &FieldInfo {
        &self.info
    }

    fn mapper_ordering(&self) -> MapperOrdering {
        self.mapper.ordering()
    }

    fn value_of(&self, entity: &E) -> Value {
        (self.getter)(entity).map_or(Value::Null, FieldValue::to_value)
    }
}
