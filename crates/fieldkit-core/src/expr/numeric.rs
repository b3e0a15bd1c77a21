use crate::{
    cast::Convert,
    expr::{
        ToByte, ToByteNullable, ToDecimal, ToDecimalNullable, ToDouble, ToDoubleNullable,
        ToFloat, ToFloatNullable, ToInt, ToIntNullable, ToLong, ToLongNullable, ToShort,
        ToShortNullable,
    },
};
use rust_decimal::Decimal;
use std::sync::Arc;

///
/// Unary
///
/// Unary kernels. Integer negation and absolute value wrap at the minimum
/// value; `sign` of zero and of NaN is zero.
///

pub(crate) trait Unary: Copy {
    fn negate(self) -> Self;
    fn abs(self) -> Self;
    fn sign(self) -> i8;
}

macro_rules! unary_int {
    ($($ty:ty),*) => {
        $(
            impl Unary for $ty {
                fn negate(self) -> Self {
                    self.wrapping_neg()
                }

                fn abs(self) -> Self {
                    self.wrapping_abs()
                }

                #[allow(clippy::cast_possible_truncation)]
                fn sign(self) -> i8 {
                    self.signum() as i8
                }
            }
        )*
    };
}

macro_rules! unary_float {
    ($($ty:ty),*) => {
        $(
            impl Unary for $ty {
                fn negate(self) -> Self {
                    -self
                }

                fn abs(self) -> Self {
                    <$ty>::abs(self)
                }

                fn sign(self) -> i8 {
                    if self.is_nan() || self == 0.0 {
                        0
                    } else if self.is_sign_negative() {
                        -1
                    } else {
                        1
                    }
                }
            }
        )*
    };
}

unary_int!(i8, i16, i32, i64);
unary_float!(f32, f64);

impl Unary for Decimal {
    fn negate(self) -> Self {
        -self
    }

    fn abs(self) -> Self {
        Self::abs(&self)
    }

    fn sign(self) -> i8 {
        if self.is_zero() {
            0
        } else if self.is_sign_negative() {
            -1
        } else {
            1
        }
    }
}

///
/// numeric_unary
///
/// `negate`, `abs` and `sign` for one numeric kind and its nullable form.
///

macro_rules! numeric_unary {
    ($($name:ident, $nullable:ident;)*) => {
        $(
            impl<T: 'static> $name<T> {
                /// Arithmetic negation; wraps at the minimum integer value.
                #[must_use]
                pub fn negate(&self) -> Self {
                    let f = Arc::clone(&self.f);
                    Self::new(move |e| Unary::negate(f(e)))
                }

                /// Absolute value; wraps at the minimum integer value.
                #[must_use]
                pub fn abs(&self) -> Self {
                    let f = Arc::clone(&self.f);
                    Self::new(move |e| Unary::abs(f(e)))
                }

                /// `-1`, `0` or `1`.
                #[must_use]
                pub fn sign(&self) -> ToByte<T> {
                    let f = Arc::clone(&self.f);
                    ToByte::new(move |e| Unary::sign(f(e)))
                }
            }

            impl<T: 'static> $nullable<T> {
                #[must_use]
                pub fn negate(&self) -> Self {
                    let f = Arc::clone(&self.f);
                    Self::new(move |e| f(e).map(Unary::negate))
                }

                #[must_use]
                pub fn abs(&self) -> Self {
                    let f = Arc::clone(&self.f);
                    Self::new(move |e| f(e).map(Unary::abs))
                }

                #[must_use]
                pub fn sign(&self) -> ToByteNullable<T> {
                    let f = Arc::clone(&self.f);
                    ToByteNullable::new(move |e| f(e).map(Unary::sign))
                }
            }
        )*
    };
}

numeric_unary! {
    ToByte, ToByteNullable;
    ToShort, ToShortNullable;
    ToInt, ToIntNullable;
    ToLong, ToLongNullable;
    ToFloat, ToFloatNullable;
    ToDouble, ToDoubleNullable;
    ToDecimal, ToDecimalNullable;
}

///
/// numeric_sqrt
///

macro_rules! numeric_sqrt {
    ($($name:ident, $nullable:ident;)*) => {
        $(
            impl<T: 'static> $name<T> {
                #[must_use]
                pub fn sqrt(&self) -> ToDouble<T> {
                    let f = Arc::clone(&self.f);
                    ToDouble::new(move |e| Convert::<f64>::convert(f(e)).sqrt())
                }
            }

            impl<T: 'static> $nullable<T> {
                #[must_use]
                pub fn sqrt(&self) -> ToDoubleNullable<T> {
                    let f = Arc::clone(&self.f);
                    ToDoubleNullable::new(move |e| f(e).map(|v| Convert::<f64>::convert(v).sqrt()))
                }
            }
        )*
    };
}

numeric_sqrt! {
    ToByte, ToByteNullable;
    ToShort, ToShortNullable;
    ToInt, ToIntNullable;
    ToLong, ToLongNullable;
    ToFloat, ToFloatNullable;
    ToDouble, ToDoubleNullable;
}

///
/// numeric_casts
///
/// One `as_<kind>` method per cast target, on both the non-null and the
/// nullable form of the source kind.
///

macro_rules! numeric_casts {
    (
        $name:ident, $nullable:ident;
        $( $method:ident => $target:ident, $target_nullable:ident, $prim:ty );* $(;)?
    ) => {
        impl<T: 'static> $name<T> {
            $(
                #[must_use]
                pub fn $method(&self) -> $target<T> {
                    let f = Arc::clone(&self.f);
                    $target::new(move |e| Convert::<$prim>::convert(f(e)))
                }
            )*
        }

        impl<T: 'static> $nullable<T> {
            $(
                #[must_use]
                pub fn $method(&self) -> $target_nullable<T> {
                    let f = Arc::clone(&self.f);
                    $target_nullable::new(move |e| f(e).map(Convert::<$prim>::convert))
                }
            )*
        }
    };
}

macro_rules! all_numeric_casts {
    ($($name:ident, $nullable:ident;)*) => {
        $(
            numeric_casts! {
                $name, $nullable;
                as_byte => ToByte, ToByteNullable, i8;
                as_short => ToShort, ToShortNullable, i16;
                as_int => ToInt, ToIntNullable, i32;
                as_long => ToLong, ToLongNullable, i64;
                as_float => ToFloat, ToFloatNullable, f32;
                as_double => ToDouble, ToDoubleNullable, f64;
            }
        )*
    };
}

all_numeric_casts! {
    ToByte, ToByteNullable;
    ToShort, ToShortNullable;
    ToInt, ToIntNullable;
    ToLong, ToLongNullable;
    ToFloat, ToFloatNullable;
    ToDouble, ToDoubleNullable;
    ToDecimal, ToDecimalNullable;
}

macro_rules! decimal_casts {
    ($($name:ident, $nullable:ident;)*) => {
        $(
            numeric_casts! {
                $name, $nullable;
                as_decimal => ToDecimal, ToDecimalNullable, Decimal;
            }
        )*
    };
}

decimal_casts! {
    ToByte, ToByteNullable;
    ToShort, ToShortNullable;
    ToInt, ToIntNullable;
    ToLong, ToLongNullable;
}
