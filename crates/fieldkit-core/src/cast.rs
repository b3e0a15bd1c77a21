//! Numeric conversions between value kinds.
//!
//! Widening is exact. Narrowing between integers keeps the low-order bits.
//! Floating values convert to `int`/`long` by truncating toward zero,
//! saturating at the range bounds and mapping NaN to zero; conversions to
//! `byte`/`short` go through `int` first. Decimals truncate their integral
//! part and keep its low-order bits.

use crate::{
    error::{Error, ErrorOrigin},
    value::Value,
};
use fieldkit_primitives::ExpressionKind;
use num_traits::ToPrimitive;
use rust_decimal::Decimal;

///
/// Convert
///
/// Infallible conversion under the cast rules above.
///

pub trait Convert<To> {
    fn convert(self) -> To;
}

macro_rules! convert_as {
    ($($from:ty => [$($to:ty),* $(,)?];)*) => {
        $($(
            impl Convert<$to> for $from {
                #[inline]
                #[allow(
                    clippy::cast_lossless,
                    clippy::cast_possible_truncation,
                    clippy::cast_possible_wrap,
                    clippy::cast_precision_loss,
                    clippy::unnecessary_cast
                )]
                fn convert(self) -> $to {
                    self as $to
                }
            }
        )*)*
    };
}

macro_rules! convert_float_narrow {
    ($($from:ty => [$($to:ty),* $(,)?];)*) => {
        $($(
            impl Convert<$to> for $from {
                #[inline]
                #[allow(clippy::cast_possible_truncation)]
                fn convert(self) -> $to {
                    (self as i32) as $to
                }
            }
        )*)*
    };
}

macro_rules! convert_decimal_from {
    ($($from:ty),* $(,)?) => {
        $(
            impl Convert<Decimal> for $from {
                #[inline]
                fn convert(self) -> Decimal {
                    Decimal::from(self)
                }
            }
        )*
    };
}

convert_as! {
    i8 => [i8, i16, i32, i64, f32, f64];
    i16 => [i8, i16, i32, i64, f32, f64];
    i32 => [i8, i16, i32, i64, f32, f64];
    i64 => [i8, i16, i32, i64, f32, f64];
    f32 => [i32, i64, f32, f64];
    f64 => [i32, i64, f32, f64];
}

convert_float_narrow! {
    f32 => [i8, i16];
    f64 => [i8, i16];
}

convert_decimal_from!(i8, i16, i32, i64);

impl Convert<Decimal> for Decimal {
    #[inline]
    fn convert(self) -> Decimal {
        self
    }
}

impl Convert<i64> for Decimal {
    #[allow(clippy::cast_possible_truncation)]
    fn convert(self) -> i64 {
        self.trunc().to_i128().map_or(0, |v| v as i64)
    }
}

macro_rules! convert_decimal_narrow {
    ($($to:ty),* $(,)?) => {
        $(
            impl Convert<$to> for Decimal {
                #[allow(clippy::cast_possible_truncation)]
                fn convert(self) -> $to {
                    Convert::<i64>::convert(self) as $to
                }
            }
        )*
    };
}

convert_decimal_narrow!(i8, i16, i32);

impl Convert<f32> for Decimal {
    fn convert(self) -> f32 {
        self.to_f32().unwrap_or(0.0)
    }
}

impl Convert<f64> for Decimal {
    fn convert(self) -> f64 {
        self.to_f64().unwrap_or(0.0)
    }
}

/// Apply the cast rules to a dynamic value.
///
/// `Null` passes through unchanged. The target must be a numeric kind
/// (nullability is ignored); the source must be a numeric value.
pub fn cast_value(value: &Value, target: ExpressionKind) -> Result<Value, Error> {
    let target = target.non_null();
    if !target.is_numeric() {
        return Err(Error::invalid_argument(
            ErrorOrigin::Cast,
            format!("cast target must be numeric, got {target}"),
        ));
    }

    let cast = match *value {
        Value::Null => return Ok(Value::Null),
        Value::Byte(v) => cast_from(v, target),
        Value::Short(v) => cast_from(v, target),
        Value::Int(v) => cast_from(v, target),
        Value::Long(v) => cast_from(v, target),
        Value::Float(v) => cast_from_float(v, target),
        Value::Double(v) => cast_from_float(v, target),
        Value::Decimal(v) => cast_from_decimal(v, target),
        _ => None,
    };

    cast.ok_or_else(|| {
        Error::unsupported(
            ErrorOrigin::Cast,
            format!("cannot cast {} to {target}", value.tag().label()),
        )
    })
}

fn cast_from<V>(value: V, target: ExpressionKind) -> Option<Value>
where
    V: Convert<i8>
        + Convert<i16>
        + Convert<i32>
        + Convert<i64>
        + Convert<f32>
        + Convert<f64>
        + Convert<Decimal>
        + Copy,
{
    let cast = match target {
        ExpressionKind::Byte => Value::Byte(value.convert()),
        ExpressionKind::Short => Value::Short(value.convert()),
        ExpressionKind::Int => Value::Int(value.convert()),
        ExpressionKind::Long => Value::Long(value.convert()),
        ExpressionKind::Float => Value::Float(value.convert()),
        ExpressionKind::Double => Value::Double(value.convert()),
        ExpressionKind::BigDecimal => Value::Decimal(value.convert()),
        _ => return None,
    };

    Some(cast)
}

fn cast_from_float<V>(value: V, target: ExpressionKind) -> Option<Value>
where
    V: Convert<i8> + Convert<i16> + Convert<i32> + Convert<i64> + Convert<f32> + Convert<f64> + Copy,
{
    let cast = match target {
        ExpressionKind::Byte => Value::Byte(value.convert()),
        ExpressionKind::Short => Value::Short(value.convert()),
        ExpressionKind::Int => Value::Int(value.convert()),
        ExpressionKind::Long => Value::Long(value.convert()),
        ExpressionKind::Float => Value::Float(value.convert()),
        ExpressionKind::Double => Value::Double(value.convert()),
        ExpressionKind::BigDecimal => {
            let wide: f64 = value.convert();
            Value::Decimal(Decimal::from_f64_retain(wide)?)
        }
        _ => return None,
    };

    Some(cast)
}

fn cast_from_decimal(value: Decimal, target: ExpressionKind) -> Option<Value> {
    let cast = match target {
        ExpressionKind::Byte => Value::Byte(value.convert()),
        ExpressionKind::Short => Value::Short(value.convert()),
        ExpressionKind::Int => Value::Int(value.convert()),
        ExpressionKind::Long => Value::Long(value.convert()),
        ExpressionKind::Float => Value::Float(value.convert()),
        ExpressionKind::Double => Value::Double(value.convert()),
        ExpressionKind::BigDecimal => Value::Decimal(value),
        _ => return None,
    };

    Some(cast)
}

///
/// TESTS
///
