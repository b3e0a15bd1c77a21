mod compare;
mod hash;
mod tag;
mod text;


use crate::expr::EnumDomain;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

// re-exports
pub use compare::{TotalOrd, canonical_cmp, strict_order_cmp};
pub use hash::{CANONICAL_NAN_F32, CANONICAL_NAN_F64, HashCode, f32_bits, f64_bits};
pub use tag::{ValueTag, canonical_rank, canonical_tag};
pub use text::{char_len, fold};

///
/// Value
///
/// Dynamic value used for predicate operands, keyed collection and
/// translator introspection. `Eq` and `Ord` follow the canonical order:
/// variant rank first, then the natural order within a variant.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Char(char),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    Text(String),
    Enum(ValueEnum),
    Blob(Vec<u8>),
    List(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn canonical_rank(&self) -> u8 {
        canonical_rank(self)
    }

    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        canonical_tag(self)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Canonical hash code of the carried scalar; `Null` hashes to 0.
    #[must_use]
    pub fn hash_code(&self) -> i64 {
        match self {
            Self::Null => 0,
            Self::Bool(v) => v.hash_code(),
            Self::Byte(v) => v.hash_code(),
            Self::Short(v) => v.hash_code(),
            Self::Char(v) => v.hash_code(),
            Self::Int(v) => v.hash_code(),
            Self::Long(v) => v.hash_code(),
            Self::Float(v) => v.hash_code(),
            Self::Double(v) => v.hash_code(),
            Self::Decimal(v) => v.hash_code(),
            Self::Text(v) => v.hash_code(),
            Self::Enum(v) => i64::from(v.ordinal),
            Self::Blob(bytes) => i64::from(
                bytes
                    .iter()
                    .fold(1_i32, |acc, b| acc.wrapping_mul(31).wrapping_add(i32::from(*b as i8))),
            ),
            Self::List(items) => i64::from(items.iter().fold(1_i32, |acc, item| {
                #[allow(clippy::cast_possible_truncation)]
                let code = item.hash_code() as i32;
                acc.wrapping_mul(31).wrapping_add(code)
            })),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        canonical_cmp(self, other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        canonical_cmp(self, other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::Char(v) => write!(f, "'{v}'"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Enum(v) => write!(f, "{v}"),
            Self::Blob(bytes) => write!(f, "blob[{}]", bytes.len()),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
        }
    }
}

///
/// ValueEnum
///
/// Enum constant carried as a value: the domain path, the constant name and
/// its ordinal within the domain.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct ValueEnum {
    pub path: String,
    pub name: String,
    pub ordinal: u32,
}

impl ValueEnum {
    #[must_use]
    pub fn new(path: impl Into<String>, name: impl Into<String>, ordinal: u32) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            ordinal,
        }
    }

    /// Describe one constant of an enum domain.
    #[must_use]
    pub fn from_domain<E: EnumDomain>(value: E) -> Self {
        Self::new(E::PATH, value.name(), value.ordinal())
    }
}

impl fmt::Display for ValueEnum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.path, self.name)
    }
}

///
/// FieldValue
///
/// Conversion from a field's exposed value into a dynamic [`Value`].
///

pub trait FieldValue {
    fn to_value(&self) -> Value;
}

macro_rules! impl_field_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$variant(*self)
                }
            }
        )*
    };
}

impl_field_value! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    char => Char,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Decimal => Decimal,
}

impl FieldValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl FieldValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl FieldValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Blob(self.clone())
    }
}

impl FieldValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or(Value::Null, FieldValue::to_value)
    }
}
