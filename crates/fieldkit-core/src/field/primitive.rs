use crate::{
    column::{ColumnIdentifier, TypeMapper},
    expr::{ToBool, ToByte, ToChar, ToDouble, ToFloat, ToInt, ToLong, ToShort},
    field::{Accessor, Field, FieldInfo, HasComparableOperators, accessor},
    value::Value,
};
use fieldkit_primitives::{ExpressionKind, MapperOrdering};
use std::{borrow::Cow, fmt, sync::Arc};

///
/// primitive_field
///
/// Template for a non-null primitive column. `D` is the stored
/// representation and defaults to the exposed primitive.
///

macro_rules! primitive_field {
    ($($name:ident, $prim:ty, $expr:ident, $kind:ident, $variant:ident;)*) => {
        $(
            #[doc = concat!("Non-null `", stringify!($prim), "` column.")]
            pub struct $name<E, D = $prim> {
                info: FieldInfo,
                getter: Arc<dyn Fn(&E) -> $prim + Send + Sync>,
                setter: Arc<dyn Fn(&mut E, $prim) + Send + Sync>,
                mapper: Arc<dyn TypeMapper<D, $prim>>,
            }

            impl<E, D> Clone for $name<E, D> {
                fn clone(&self) -> Self {
                    Self {
                        info: self.info.clone(),
                        getter: Arc::clone(&self.getter),
                        setter: Arc::clone(&self.setter),
                        mapper: Arc::clone(&self.mapper),
                    }
                }
            }

            impl<E, D> fmt::Debug for $name<E, D> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($name))
                        .field("identifier", &self.info.identifier)
                        .field("unique", &self.info.unique)
                        .field("mapper", &self.mapper.label())
                        .finish_non_exhaustive()
                }
            }

            impl<E: 'static, D: 'static> $name<E, D> {
                pub fn create(
                    identifier: ColumnIdentifier,
                    getter: impl Fn(&E) -> $prim + Send + Sync + 'static,
                    setter: impl Fn(&mut E, $prim) + Send + Sync + 'static,
                    type_mapper: impl TypeMapper<D, $prim> + 'static,
                    unique: bool,
                ) -> Self {
                    Self {
                        info: FieldInfo::new(identifier, ExpressionKind::$kind, unique),
                        getter: Arc::new(getter),
                        setter: Arc::new(setter),
                        mapper: Arc::new(type_mapper),
                    }
                }

                pub fn get(&self, entity: &E) -> $prim {
                    (self.getter)(entity)
                }

                pub fn set(&self, entity: &mut E, value: $prim) {
                    (self.setter)(entity, value);
                }

                /// Current value in its stored representation.
                pub fn get_stored(&self, entity: &E) -> D {
                    self.mapper.to_stored((self.getter)(entity))
                }

                /// Assign from the stored representation.
                pub fn set_stored(&self, entity: &mut E, stored: D) {
                    (self.setter)(entity, self.mapper.to_exposed(stored));
                }

                #[must_use]
                pub fn type_mapper(&self) -> &dyn TypeMapper<D, $prim> {
                    &*self.mapper
                }

                /// The column as a typed expression.
                #[must_use]
                pub fn expression(&self) -> $expr<E> {
                    let getter = Arc::clone(&self.getter);
                    $expr::new(move |e| getter(e))
                }
            }

            impl<E: 'static, D: 'static> Field<E> for $name<E, D> {
                fn info(&self) -> &FieldInfo {
                    &self.info
                }

                fn mapper_ordering(&self) -> MapperOrdering {
                    self.mapper.ordering()
                }

                fn value_of(&self, entity: &E) -> Value {
                    Value::$variant((self.getter)(entity))
                }
            }

            impl<E: 'static, D: 'static> HasComparableOperators<E> for $name<E, D> {
                type Item = $prim;

                fn accessor(&self) -> Accessor<E, $prim> {
                    let getter = Arc::clone(&self.getter);
                    accessor(move |e| Some(Cow::Owned(getter(e))))
                }
            }
        )*
    };
}

primitive_field! {
    BoolField, bool, ToBool, Boolean, Bool;
    ByteField, i8, ToByte, Byte, Byte;
    ShortField, i16, ToShort, Short, Short;
    CharField, char, ToChar, Char, Char;
    IntField, i32, ToInt, Int, Int;
    LongField, i64, ToLong, Long, Long;
    FloatField, f32, ToFloat, Float, Float;
    DoubleField, f64, ToDouble, Double, Double;
}
