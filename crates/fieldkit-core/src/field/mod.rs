//! Module: field
//! Responsibility: typed column accessors and the predicates and comparators
//! built from them.
//!
//! Does not own: column naming (`column`) or predicate structure
//! (`predicate`).
//!
//! Invariants:
//! - Predicates on an absent value are false unless built as a negation.
//! - Ordering predicates and comparators use `TotalOrd` on present values.
//! - Enum range predicates collapse over the finite domain before a
//!   predicate is returned.

pub mod collect;
mod comparable;
mod enums;
mod foreign;
mod info;
mod ops;
mod primitive;
mod reference;
mod string;

#[cfg(test)]
mod tests;

use crate::{column::ColumnIdentifier, value::Value};
use fieldkit_primitives::{ExpressionKind, MapperOrdering};
use std::{borrow::Cow, sync::Arc};

// re-exports
pub use comparable::{ComparableField, ComparableValue, DecimalField};
pub use enums::EnumField;
pub use foreign::{
    BoolForeignKeyField, ByteForeignKeyField, CharForeignKeyField, ComparableForeignKeyField,
    DoubleForeignKeyField, EnumForeignKeyField, FindBackwards, FindFrom, FloatForeignKeyField,
    ForeignKeyField, IntForeignKeyField, KeyedField, LongForeignKeyField, ShortForeignKeyField,
    StringForeignKeyField,
};
pub use info::FieldInfo;
pub use ops::{HasComparableOperators, HasStringOperators};
pub use primitive::{
    BoolField, ByteField, CharField, DoubleField, FloatField, IntField, LongField, ShortField,
};
pub use reference::ReferenceField;
pub use string::StringField;

/// Shared read access to a field's exposed value: owned for primitive
/// columns, borrowed from the entity for reference columns.
pub type Accessor<E, V> = Arc<dyn for<'a> Fn(&'a E) -> Option<Cow<'a, V>> + Send + Sync>;

// Closures must reach the higher-ranked bound directly to infer their
// signature, so accessors are always built through here.
pub(crate) fn accessor<E, V: Clone>(
    f: impl for<'a> Fn(&'a E) -> Option<Cow<'a, V>> + Send + Sync + 'static,
) -> Accessor<E, V> {
    Arc::new(f)
}

///
/// Field
///
/// Object-safe view of a field: where it reads from, what it yields, and
/// its value as a dynamic [`Value`].
///

pub trait Field<E>: Send + Sync {
    fn info(&self) -> &FieldInfo;

    fn identifier(&self) -> &ColumnIdentifier {
        &self.info().identifier
    }

    /// Declared by the schema; stored and reported, never enforced.
    fn is_unique(&self) -> bool {
        self.info().unique
    }

    fn kind(&self) -> ExpressionKind {
        self.info().kind
    }

    fn mapper_ordering(&self) -> MapperOrdering;

    /// Current value; `Value::Null` when the column is absent.
    fn value_of(&self, entity: &E) -> Value;
}
