//! Typed expressions: pure functions from an entity to a value of one fixed
//! kind.
//!
//! Every kind is a concrete struct generated from a shared template, so the
//! value type is never erased. Capabilities are split into small traits:
//! [`Expression`] for the kind tag, [`HasHash`] and [`HasCompare`] for the
//! canonical hash and order, and one trait per binary arithmetic operator,
//! keyed by the right-hand operand type.

mod arith;
mod enums;
mod kind;
mod numeric;
mod text;


use fieldkit_primitives::ExpressionKind;
use std::cmp::Ordering;

// re-exports
pub use enums::{EnumDomain, ToEnum, ToEnumNullable};
pub(crate) use enums::ordinal_cmp;
pub use kind::{
    ToBool, ToBoolNullable, ToByte, ToByteNullable, ToChar, ToCharNullable, ToDecimal,
    ToDecimalNullable, ToDouble, ToDoubleNullable, ToFloat, ToFloatNullable, ToInt,
    ToIntNullable, ToLong, ToLongNullable, ToShort, ToShortNullable,
};
pub use text::{ToStr, ToStrNullable};

///
/// Expression
///

pub trait Expression<T> {
    /// Fixed kind tag, used by translators for dispatch.
    fn kind(&self) -> ExpressionKind;
}

///
/// HasHash
///

pub trait HasHash<T> {
    /// Canonical hash of the extracted value; absent values hash to 0.
    fn hash(&self, entity: &T) -> i64;
}

///
/// HasCompare
///

pub trait HasCompare<T> {
    /// Three-way comparison of the values extracted from two entities.
    ///
    /// Absent values sort after every present value.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

///
/// ARITHMETIC
///
/// Result kinds follow `ExpressionKind::promote`; a nullable operand on
/// either side makes the result nullable.
///

pub trait Plus<Rhs> {
    type Output;

    fn plus(&self, rhs: Rhs) -> Self::Output;
}

pub trait Minus<Rhs> {
    type Output;

    fn minus(&self, rhs: Rhs) -> Self::Output;
}

pub trait Multiply<Rhs> {
    type Output;

    fn multiply(&self, rhs: Rhs) -> Self::Output;
}

/// True division; the result is always a double.
pub trait Divide<Rhs> {
    type Output;

    fn divide(&self, rhs: Rhs) -> Self::Output;
}

/// Floor division over integral kinds, rounding toward negative infinity.
///
/// Evaluation panics on a zero divisor, like Rust integer division.
pub trait DivideFloor<Rhs> {
    type Output;

    fn divide_floor(&self, rhs: Rhs) -> Self::Output;
}

/// Exponentiation; the result is always a double.
pub trait Pow<Rhs> {
    type Output;

    fn pow(&self, rhs: Rhs) -> Self::Output;
}
