//! Binary arithmetic between expressions and literals.
//!
//! Each row of the tables below names the left operand kind, the right
//! operand kind and the promoted result kind. One row expands to six impls:
//! a non-null or nullable left side, combined with a literal, a non-null
//! expression or a nullable expression on the right.

use crate::{
    cast::Convert,
    expr::{
        Divide, DivideFloor, Minus, Multiply, Plus, Pow, ToByte, ToByteNullable, ToDecimal,
        ToDecimalNullable, ToDouble, ToDoubleNullable, ToFloat, ToFloatNullable, ToInt,
        ToIntNullable, ToLong, ToLongNullable, ToShort, ToShortNullable,
    },
};
use rust_decimal::Decimal;
use std::sync::Arc;

///
/// KERNELS
///

/// Sum, difference and product in the promoted type.
///
/// Integers wrap, floats follow IEEE 754, decimals saturate.
pub(crate) trait Arith: Copy {
    fn add(self, rhs: Self) -> Self;
    fn sub(self, rhs: Self) -> Self;
    fn mul(self, rhs: Self) -> Self;
}

macro_rules! arith_int {
    ($($ty:ty),*) => {
        $(
            impl Arith for $ty {
                fn add(self, rhs: Self) -> Self {
                    self.wrapping_add(rhs)
                }

                fn sub(self, rhs: Self) -> Self {
                    self.wrapping_sub(rhs)
                }

                fn mul(self, rhs: Self) -> Self {
                    self.wrapping_mul(rhs)
                }
            }

            impl FloorDiv for $ty {
                fn floor_div(self, rhs: Self) -> Self {
                    let quotient = self.wrapping_div(rhs);
                    if self.wrapping_rem(rhs) != 0 && ((self ^ rhs) < 0) {
                        quotient.wrapping_sub(1)
                    } else {
                        quotient
                    }
                }
            }
        )*
    };
}

macro_rules! arith_float {
    ($($ty:ty),*) => {
        $(
            impl Arith for $ty {
                fn add(self, rhs: Self) -> Self {
                    self + rhs
                }

                fn sub(self, rhs: Self) -> Self {
                    self - rhs
                }

                fn mul(self, rhs: Self) -> Self {
                    self * rhs
                }
            }
        )*
    };
}

arith_int!(i16, i32, i64);
arith_float!(f32, f64);

impl Arith for Decimal {
    fn add(self, rhs: Self) -> Self {
        self.saturating_add(rhs)
    }

    fn sub(self, rhs: Self) -> Self {
        self.saturating_sub(rhs)
    }

    fn mul(self, rhs: Self) -> Self {
        self.saturating_mul(rhs)
    }
}

/// Integer division rounding toward negative infinity.
pub(crate) trait FloorDiv: Copy {
    fn floor_div(self, rhs: Self) -> Self;
}

/// Double-only kernels behind `divide` and `pow`.
pub(crate) trait Real: Copy {
    fn quot(self, rhs: Self) -> Self;
    fn power(self, rhs: Self) -> Self;
}

impl Real for f64 {
    fn quot(self, rhs: Self) -> Self {
        self / rhs
    }

    fn power(self, rhs: Self) -> Self {
        self.powf(rhs)
    }
}

///
/// binary_op
///
/// Expand one (left, right, result) row for one operator.
///

macro_rules! binary_op {
    (
        $op:ident :: $method:ident => $kernel:ident :: $kfn:ident;
        $l:ident, $ln:ident;
        $r:ident, $rn:ident, $rp:ty;
        $o:ident, $on:ident, $p:ty
    ) => {
        impl<T: 'static> $op<$rp> for $l<T> {
            type Output = $o<T>;

            fn $method(&self, rhs: $rp) -> $o<T> {
                let f = Arc::clone(&self.f);
                let rhs: $p = Convert::<$p>::convert(rhs);
                $o::new(move |e| <$p as $kernel>::$kfn(Convert::<$p>::convert(f(e)), rhs))
            }
        }

        impl<'r, T: 'static> $op<&'r $r<T>> for $l<T> {
            type Output = $o<T>;

            fn $method(&self, rhs: &'r $r<T>) -> $o<T> {
                let (f, g) = (Arc::clone(&self.f), Arc::clone(&rhs.f));
                $o::new(move |e| {
                    <$p as $kernel>::$kfn(Convert::<$p>::convert(f(e)), Convert::<$p>::convert(g(e)))
                })
            }
        }

        impl<'r, T: 'static> $op<&'r $rn<T>> for $l<T> {
            type Output = $on<T>;

            fn $method(&self, rhs: &'r $rn<T>) -> $on<T> {
                let (f, g) = (Arc::clone(&self.f), Arc::clone(&rhs.f));
                $on::new(move |e| {
                    g(e).map(|b| {
                        <$p as $kernel>::$kfn(Convert::<$p>::convert(f(e)), Convert::<$p>::convert(b))
                    })
                })
            }
        }

        impl<T: 'static> $op<$rp> for $ln<T> {
            type Output = $on<T>;

            fn $method(&self, rhs: $rp) -> $on<T> {
                let f = Arc::clone(&self.f);
                let rhs: $p = Convert::<$p>::convert(rhs);
                $on::new(move |e| f(e).map(|a| <$p as $kernel>::$kfn(Convert::<$p>::convert(a), rhs)))
            }
        }

        impl<'r, T: 'static> $op<&'r $r<T>> for $ln<T> {
            type Output = $on<T>;

            fn $method(&self, rhs: &'r $r<T>) -> $on<T> {
                let (f, g) = (Arc::clone(&self.f), Arc::clone(&rhs.f));
                $on::new(move |e| {
                    f(e).map(|a| {
                        <$p as $kernel>::$kfn(Convert::<$p>::convert(a), Convert::<$p>::convert(g(e)))
                    })
                })
            }
        }

        impl<'r, T: 'static> $op<&'r $rn<T>> for $ln<T> {
            type Output = $on<T>;

            fn $method(&self, rhs: &'r $rn<T>) -> $on<T> {
                let (f, g) = (Arc::clone(&self.f), Arc::clone(&rhs.f));
                $on::new(move |e| match (f(e), g(e)) {
                    (Some(a), Some(b)) => Some(<$p as $kernel>::$kfn(
                        Convert::<$p>::convert(a),
                        Convert::<$p>::convert(b),
                    )),
                    _ => None,
                })
            }
        }
    };
}

///
/// promoted_rows
///
/// `plus`, `minus` and `multiply` share one promotion table.
///

macro_rules! promoted_rows {
    ($(
        ($l:ident, $ln:ident) x ($r:ident, $rn:ident, $rp:ty) => ($o:ident, $on:ident, $p:ty);
    )*) => {
        $(
            binary_op!(Plus::plus => Arith::add; $l, $ln; $r, $rn, $rp; $o, $on, $p);
            binary_op!(Minus::minus => Arith::sub; $l, $ln; $r, $rn, $rp; $o, $on, $p);
            binary_op!(Multiply::multiply => Arith::mul; $l, $ln; $r, $rn, $rp; $o, $on, $p);
        )*
    };
}

promoted_rows! {
    (ToByte, ToByteNullable) x (ToByte, ToByteNullable, i8) => (ToShort, ToShortNullable, i16);
    (ToByte, ToByteNullable) x (ToShort, ToShortNullable, i16) => (ToInt, ToIntNullable, i32);
    (ToByte, ToByteNullable) x (ToInt, ToIntNullable, i32) => (ToInt, ToIntNullable, i32);
    (ToByte, ToByteNullable) x (ToLong, ToLongNullable, i64) => (ToLong, ToLongNullable, i64);
    (ToByte, ToByteNullable) x (ToFloat, ToFloatNullable, f32) => (ToFloat, ToFloatNullable, f32);
    (ToByte, ToByteNullable) x (ToDouble, ToDoubleNullable, f64) => (ToDouble, ToDoubleNullable, f64);

    (ToShort, ToShortNullable) x (ToByte, ToByteNullable, i8) => (ToInt, ToIntNullable, i32);
    (ToShort, ToShortNullable) x (ToShort, ToShortNullable, i16) => (ToInt, ToIntNullable, i32);
    (ToShort, ToShortNullable) x (ToInt, ToIntNullable, i32) => (ToInt, ToIntNullable, i32);
    (ToShort, ToShortNullable) x (ToLong, ToLongNullable, i64) => (ToLong, ToLongNullable, i64);
    (ToShort, ToShortNullable) x (ToFloat, ToFloatNullable, f32) => (ToFloat, ToFloatNullable, f32);
    (ToShort, ToShortNullable) x (ToDouble, ToDoubleNullable, f64) => (ToDouble, ToDoubleNullable, f64);

    (ToInt, ToIntNullable) x (ToByte, ToByteNullable, i8) => (ToInt, ToIntNullable, i32);
    (ToInt, ToIntNullable) x (ToShort, ToShortNullable, i16) => (ToInt, ToIntNullable, i32);
    (ToInt, ToIntNullable) x (ToInt, ToIntNullable, i32) => (ToInt, ToIntNullable, i32);
    (ToInt, ToIntNullable) x (ToLong, ToLongNullable, i64) => (ToLong, ToLongNullable, i64);
    (ToInt, ToIntNullable) x (ToFloat, ToFloatNullable, f32) => (ToFloat, ToFloatNullable, f32);
    (ToInt, ToIntNullable) x (ToDouble, ToDoubleNullable, f64) => (ToDouble, ToDoubleNullable, f64);

    (ToLong, ToLongNullable) x (ToByte, ToByteNullable, i8) => (ToLong, ToLongNullable, i64);
    (ToLong, ToLongNullable) x (ToShort, ToShortNullable, i16) => (ToLong, ToLongNullable, i64);
    (ToLong, ToLongNullable) x (ToInt, ToIntNullable, i32) => (ToLong, ToLongNullable, i64);
    (ToLong, ToLongNullable) x (ToLong, ToLongNullable, i64) => (ToLong, ToLongNullable, i64);
    (ToLong, ToLongNullable) x (ToFloat, ToFloatNullable, f32) => (ToDouble, ToDoubleNullable, f64);
    (ToLong, ToLongNullable) x (ToDouble, ToDoubleNullable, f64) => (ToDouble, ToDoubleNullable, f64);

    (ToFloat, ToFloatNullable) x (ToByte, ToByteNullable, i8) => (ToFloat, ToFloatNullable, f32);
    (ToFloat, ToFloatNullable) x (ToShort, ToShortNullable, i16) => (ToFloat, ToFloatNullable, f32);
    (ToFloat, ToFloatNullable) x (ToInt, ToIntNullable, i32) => (ToFloat, ToFloatNullable, f32);
    (ToFloat, ToFloatNullable) x (ToLong, ToLongNullable, i64) => (ToDouble, ToDoubleNullable, f64);
    (ToFloat, ToFloatNullable) x (ToFloat, ToFloatNullable, f32) => (ToFloat, ToFloatNullable, f32);
    (ToFloat, ToFloatNullable) x (ToDouble, ToDoubleNullable, f64) => (ToDouble, ToDoubleNullable, f64);

    (ToDouble, ToDoubleNullable) x (ToByte, ToByteNullable, i8) => (ToDouble, ToDoubleNullable, f64);
    (ToDouble, ToDoubleNullable) x (ToShort, ToShortNullable, i16) => (ToDouble, ToDoubleNullable, f64);
    (ToDouble, ToDoubleNullable) x (ToInt, ToIntNullable, i32) => (ToDouble, ToDoubleNullable, f64);
    (ToDouble, ToDoubleNullable) x (ToLong, ToLongNullable, i64) => (ToDouble, ToDoubleNullable, f64);
    (ToDouble, ToDoubleNullable) x (ToFloat, ToFloatNullable, f32) => (ToDouble, ToDoubleNullable, f64);
    (ToDouble, ToDoubleNullable) x (ToDouble, ToDoubleNullable, f64) => (ToDouble, ToDoubleNullable, f64);

    (ToDecimal, ToDecimalNullable) x (ToByte, ToByteNullable, i8) => (ToDecimal, ToDecimalNullable, Decimal);
    (ToDecimal, ToDecimalNullable) x (ToShort, ToShortNullable, i16) => (ToDecimal, ToDecimalNullable, Decimal);
    (ToDecimal, ToDecimalNullable) x (ToInt, ToIntNullable, i32) => (ToDecimal, ToDecimalNullable, Decimal);
    (ToDecimal, ToDecimalNullable) x (ToLong, ToLongNullable, i64) => (ToDecimal, ToDecimalNullable, Decimal);
    (ToDecimal, ToDecimalNullable) x (ToDecimal, ToDecimalNullable, Decimal) => (ToDecimal, ToDecimalNullable, Decimal);
    (ToByte, ToByteNullable) x (ToDecimal, ToDecimalNullable, Decimal) => (ToDecimal, ToDecimalNullable, Decimal);
    (ToShort, ToShortNullable) x (ToDecimal, ToDecimalNullable, Decimal) => (ToDecimal, ToDecimalNullable, Decimal);
    (ToInt, ToIntNullable) x (ToDecimal, ToDecimalNullable, Decimal) => (ToDecimal, ToDecimalNullable, Decimal);
    (ToLong, ToLongNullable) x (ToDecimal, ToDecimalNullable, Decimal) => (ToDecimal, ToDecimalNullable, Decimal);
}

///
/// floor_rows
///
/// `divide_floor` over integral kinds, same promotion as `plus`.
///

macro_rules! floor_rows {
    ($(
        ($l:ident, $ln:ident) x ($r:ident, $rn:ident, $rp:ty) => ($o:ident, $on:ident, $p:ty);
    )*) => {
        $(
            binary_op!(DivideFloor::divide_floor => FloorDiv::floor_div; $l, $ln; $r, $rn, $rp; $o, $on, $p);
        )*
    };
}

floor_rows! {
    (ToByte, ToByteNullable) x (ToByte, ToByteNullable, i8) => (ToShort, ToShortNullable, i16);
    (ToByte, ToByteNullable) x (ToShort, ToShortNullable, i16) => (ToInt, ToIntNullable, i32);
    (ToByte, ToByteNullable) x (ToInt, ToIntNullable, i32) => (ToInt, ToIntNullable, i32);
    (ToByte, ToByteNullable) x (ToLong, ToLongNullable, i64) => (ToLong, ToLongNullable, i64);

    (ToShort, ToShortNullable) x (ToByte, ToByteNullable, i8) => (ToInt, ToIntNullable, i32);
    (ToShort, ToShortNullable) x (ToShort, ToShortNullable, i16) => (ToInt, ToIntNullable, i32);
    (ToShort, ToShortNullable) x (ToInt, ToIntNullable, i32) => (ToInt, ToIntNullable, i32);
    (ToShort, ToShortNullable) x (ToLong, ToLongNullable, i64) => (ToLong, ToLongNullable, i64);

    (ToInt, ToIntNullable) x (ToByte, ToByteNullable, i8) => (ToInt, ToIntNullable, i32);
    (ToInt, ToIntNullable) x (ToShort, ToShortNullable, i16) => (ToInt, ToIntNullable, i32);
    (ToInt, ToIntNullable) x (ToInt, ToIntNullable, i32) => (ToInt, ToIntNullable, i32);
    (ToInt, ToIntNullable) x (ToLong, ToLongNullable, i64) => (ToLong, ToLongNullable, i64);

    (ToLong, ToLongNullable) x (ToByte, ToByteNullable, i8) => (ToLong, ToLongNullable, i64);
    (ToLong, ToLongNullable) x (ToShort, ToShortNullable, i16) => (ToLong, ToLongNullable, i64);
    (ToLong, ToLongNullable) x (ToInt, ToIntNullable, i32) => (ToLong, ToLongNullable, i64);
    (ToLong, ToLongNullable) x (ToLong, ToLongNullable, i64) => (ToLong, ToLongNullable, i64);
}

///
/// real_rows
///
/// `divide` against every primitive numeric kind and `pow` against int and
/// double exponents, all yielding double.
///

macro_rules! real_rows {
    (@divide $l:ident, $ln:ident; $( ($r:ident, $rn:ident, $rp:ty) )*) => {
        $(
            binary_op!(Divide::divide => Real::quot; $l, $ln; $r, $rn, $rp; ToDouble, ToDoubleNullable, f64);
        )*
    };

    (@pow $l:ident, $ln:ident; $( ($r:ident, $rn:ident, $rp:ty) )*) => {
        $(
            binary_op!(Pow::pow => Real::power; $l, $ln; $r, $rn, $rp; ToDouble, ToDoubleNullable, f64);
        )*
    };

    ($( ($l:ident, $ln:ident) ),* $(,)?) => {
        $(
            real_rows!(@divide $l, $ln;
                (ToByte, ToByteNullable, i8)
                (ToShort, ToShortNullable, i16)
                (ToInt, ToIntNullable, i32)
                (ToLong, ToLongNullable, i64)
                (ToFloat, ToFloatNullable, f32)
                (ToDouble, ToDoubleNullable, f64)
            );
            real_rows!(@pow $l, $ln;
                (ToInt, ToIntNullable, i32)
                (ToDouble, ToDoubleNullable, f64)
            );
        )*
    };
}

real_rows! {
    (ToByte, ToByteNullable),
    (ToShort, ToShortNullable),
    (ToInt, ToIntNullable),
    (ToLong, ToLongNullable),
    (ToFloat, ToFloatNullable),
    (ToDouble, ToDoubleNullable),
}
