//! Core runtime for fieldkit: typed expressions over entities, fields bound
//! to columns, and the predicate/comparator algebra built on top of them.
#![warn(unreachable_pub)]

#[macro_use]
pub(crate) mod macros;

// public exports are one module level down
pub mod cast;
pub mod column;
pub mod comparator;
pub mod error;
pub mod expr;
pub mod field;
pub mod obs;
pub mod predicate;
pub mod value;

// re-exports
pub use error::{Error, ErrorClass, ErrorOrigin};
pub use fieldkit_primitives::{
    CaseFold, ExpressionKind, Inclusion, KindFamily, MapperOrdering, NullOrder, UnaryOp,
};

///
/// Prelude
///
/// Expression kinds, field families and the operator traits needed to call
/// them. Errors and observability stay behind their modules.
///

pub mod prelude {
    pub use crate::{
        column::{ColumnIdentifier, IdentityMapper, TypeMapper},
        comparator::{Comparator, FieldComparator},
        enum_domain,
        expr::{
            Divide, DivideFloor, EnumDomain, Expression, HasCompare, HasHash, Minus, Multiply,
            Plus, Pow, ToBool, ToBoolNullable, ToByte, ToByteNullable, ToChar, ToCharNullable,
            ToDecimal, ToDecimalNullable, ToDouble, ToDoubleNullable, ToEnum, ToEnumNullable,
            ToFloat, ToFloatNullable, ToInt, ToIntNullable, ToLong, ToLongNullable, ToShort,
            ToShortNullable, ToStr, ToStrNullable,
        },
        field::{
            BoolField, ByteField, CharField, ComparableField, DecimalField, DoubleField,
            EnumField, Field, FloatField, ForeignKeyField, HasComparableOperators,
            HasStringOperators, IntField, KeyedField, LongField, ReferenceField, ShortField,
            StringField,
        },
        predicate::{FieldPredicate, Predicate, PredicateType},
        value::Value,
    };
    pub use fieldkit_primitives::{CaseFold, ExpressionKind, Inclusion, NullOrder};
}
