use crate::{
    error::Error,
    expr::{Expression, HasCompare, HasHash, ToStr},
    value::{HashCode, TotalOrd},
};
use fieldkit_primitives::ExpressionKind;
use rust_decimal::Decimal;
use std::{cmp::Ordering, fmt, sync::Arc};

///
/// scalar_expression
///
/// Template for one scalar kind: the non-null expression, its nullable
/// counterpart, and the shared extraction/mapping/composition surface.
///

macro_rules! scalar_expression {
    (
        $name:ident, $nullable:ident, $prim:ty,
        kind = $kind:ident, nullable_kind = $nkind:ident, apply = $apply:ident
    ) => {
        #[doc = concat!("Expression yielding a non-null `", stringify!($prim), "`.")]
        pub struct $name<T> {
            pub(crate) f: Arc<dyn Fn(&T) -> $prim + Send + Sync>,
        }

        impl<T> Clone for $name<T> {
            fn clone(&self) -> Self {
                Self {
                    f: Arc::clone(&self.f),
                }
            }
        }

        impl<T> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("kind", &ExpressionKind::$kind)
                    .finish_non_exhaustive()
            }
        }

        impl<T: 'static> $name<T> {
            pub fn new(f: impl Fn(&T) -> $prim + Send + Sync + 'static) -> Self {
                Self { f: Arc::new(f) }
            }

            #[must_use]
            pub fn constant(value: $prim) -> Self {
                Self::new(move |_| value)
            }

            pub fn $apply(&self, entity: &T) -> $prim {
                (self.f)(entity)
            }

            #[must_use]
            pub fn map(&self, op: impl Fn($prim) -> $prim + Send + Sync + 'static) -> Self {
                let f = Arc::clone(&self.f);
                Self::new(move |e| op(f(e)))
            }

            pub fn map_to_bool(&self, op: impl Fn($prim) -> bool + Send + Sync + 'static) -> ToBool<T> {
                let f = Arc::clone(&self.f);
                ToBool::new(move |e| op(f(e)))
            }

            pub fn map_to_int(&self, op: impl Fn($prim) -> i32 + Send + Sync + 'static) -> ToInt<T> {
                let f = Arc::clone(&self.f);
                ToInt::new(move |e| op(f(e)))
            }

            pub fn map_to_long(&self, op: impl Fn($prim) -> i64 + Send + Sync + 'static) -> ToLong<T> {
                let f = Arc::clone(&self.f);
                ToLong::new(move |e| op(f(e)))
            }

            pub fn map_to_double(
                &self,
                op: impl Fn($prim) -> f64 + Send + Sync + 'static,
            ) -> ToDouble<T> {
                let f = Arc::clone(&self.f);
                ToDouble::new(move |e| op(f(e)))
            }

            pub fn map_to_str(&self, op: impl Fn($prim) -> String + Send + Sync + 'static) -> ToStr<T> {
                let f = Arc::clone(&self.f);
                ToStr::owned(move |e| op(f(e)))
            }

            /// Rebind the input: evaluate `upstream` first, then this expression.
            pub fn compose<V: 'static>(
                &self,
                upstream: impl for<'a> Fn(&'a V) -> &'a T + Send + Sync + 'static,
            ) -> $name<V> {
                let f = Arc::clone(&self.f);
                $name::new(move |v| f(upstream(v)))
            }

            /// Rebind the input through an upstream step that may produce nothing.
            pub fn compose_nullable<V: 'static>(
                &self,
                upstream: impl for<'a> Fn(&'a V) -> Option<&'a T> + Send + Sync + 'static,
            ) -> $nullable<V> {
                let f = Arc::clone(&self.f);
                $nullable::new(move |v| upstream(v).map(|t| f(t)))
            }

            /// View this expression as its nullable counterpart; never absent.
            #[must_use]
            pub fn to_nullable(&self) -> $nullable<T> {
                let f = Arc::clone(&self.f);
                $nullable::new(move |e| Some(f(e)))
            }
        }

        impl<T> Expression<T> for $name<T> {
            fn kind(&self) -> ExpressionKind {
                ExpressionKind::$kind
            }
        }

        impl<T> HasHash<T> for $name<T> {
            fn hash(&self, entity: &T) -> i64 {
                HashCode::hash_code(&(self.f)(entity))
            }
        }

        impl<T> HasCompare<T> for $name<T> {
            fn compare(&self, left: &T, right: &T) -> Ordering {
                TotalOrd::total_cmp(&(self.f)(left), &(self.f)(right))
            }
        }

        #[doc = concat!("Expression yielding an optional `", stringify!($prim), "`.")]
        pub struct $nullable<T> {
            pub(crate) f: Arc<dyn Fn(&T) -> Option<$prim> + Send + Sync>,
        }

        impl<T> Clone for $nullable<T> {
            fn clone(&self) -> Self {
                Self {
                    f: Arc::clone(&self.f),
                }
            }
        }

        impl<T> fmt::Debug for $nullable<T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($nullable))
                    .field("kind", &ExpressionKind::$nkind)
                    .finish_non_exhaustive()
            }
        }

        impl<T: 'static> $nullable<T> {
            pub fn new(f: impl Fn(&T) -> Option<$prim> + Send + Sync + 'static) -> Self {
                Self { f: Arc::new(f) }
            }

            /// Expression that is absent for every entity.
            #[must_use]
            pub fn absent() -> Self {
                Self::new(|_| None)
            }

            #[must_use]
            pub fn constant(value: $prim) -> Self {
                Self::new(move |_| Some(value))
            }

            pub fn apply(&self, entity: &T) -> Option<$prim> {
                (self.f)(entity)
            }

            /// Extract the value, failing with *value required* when absent.
            pub fn $apply(&self, entity: &T) -> Result<$prim, Error> {
                (self.f)(entity).ok_or_else(|| Error::value_required(ExpressionKind::$nkind))
            }

            pub fn is_null(&self, entity: &T) -> bool {
                (self.f)(entity).is_none()
            }

            pub fn is_not_null(&self, entity: &T) -> bool {
                (self.f)(entity).is_some()
            }

            /// Collapse to the non-null kind, substituting `fallback` when absent.
            #[must_use]
            pub fn or_else(&self, fallback: $prim) -> $name<T> {
                let f = Arc::clone(&self.f);
                $name::new(move |e| f(e).unwrap_or(fallback))
            }

            /// Collapse to the non-null kind, evaluating `fallback` when absent.
            pub fn or_else_get(&self, fallback: &$name<T>) -> $name<T> {
                let (f, g) = (Arc::clone(&self.f), Arc::clone(&fallback.f));
                $name::new(move |e| f(e).unwrap_or_else(|| g(e)))
            }

            /// Collapse to the non-null kind.
            ///
            /// # Panics
            ///
            /// The returned expression panics with the *value required* error
            /// when evaluated on an entity for which this expression is absent.
            #[must_use]
            pub fn or_throw(&self) -> $name<T> {
                let f = Arc::clone(&self.f);
                $name::new(move |e| match f(e) {
                    Some(value) => value,
                    None => panic!("{}", Error::value_required(ExpressionKind::$nkind)),
                })
            }

            /// Apply `op` to present values; absence short-circuits.
            #[must_use]
            pub fn map_if_present(&self, op: impl Fn($prim) -> $prim + Send + Sync + 'static) -> Self {
                let f = Arc::clone(&self.f);
                Self::new(move |e| f(e).map(&op))
            }

            pub fn map_to_bool_if_present(
                &self,
                op: impl Fn($prim) -> bool + Send + Sync + 'static,
            ) -> ToBoolNullable<T> {
                let f = Arc::clone(&self.f);
                ToBoolNullable::new(move |e| f(e).map(&op))
            }

            pub fn map_to_int_if_present(
                &self,
                op: impl Fn($prim) -> i32 + Send + Sync + 'static,
            ) -> ToIntNullable<T> {
                let f = Arc::clone(&self.f);
                ToIntNullable::new(move |e| f(e).map(&op))
            }

            pub fn map_to_long_if_present(
                &self,
                op: impl Fn($prim) -> i64 + Send + Sync + 'static,
            ) -> ToLongNullable<T> {
                let f = Arc::clone(&self.f);
                ToLongNullable::new(move |e| f(e).map(&op))
            }

            pub fn map_to_double_if_present(
                &self,
                op: impl Fn($prim) -> f64 + Send + Sync + 'static,
            ) -> ToDoubleNullable<T> {
                let f = Arc::clone(&self.f);
                ToDoubleNullable::new(move |e| f(e).map(&op))
            }

            pub fn compose<V: 'static>(
                &self,
                upstream: impl for<'a> Fn(&'a V) -> &'a T + Send + Sync + 'static,
            ) -> $nullable<V> {
                let f = Arc::clone(&self.f);
                $nullable::new(move |v| f(upstream(v)))
            }

            pub fn compose_nullable<V: 'static>(
                &self,
                upstream: impl for<'a> Fn(&'a V) -> Option<&'a T> + Send + Sync + 'static,
            ) -> $nullable<V> {
                let f = Arc::clone(&self.f);
                $nullable::new(move |v| upstream(v).and_then(|t| f(t)))
            }
        }

        impl<T> Expression<T> for $nullable<T> {
            fn kind(&self) -> ExpressionKind {
                ExpressionKind::$nkind
            }
        }

        impl<T> HasHash<T> for $nullable<T> {
            fn hash(&self, entity: &T) -> i64 {
                (self.f)(entity).map_or(0, |value| HashCode::hash_code(&value))
            }
        }

        impl<T> HasCompare<T> for $nullable<T> {
            fn compare(&self, left: &T, right: &T) -> Ordering {
                match ((self.f)(left), (self.f)(right)) {
                    (Some(a), Some(b)) => TotalOrd::total_cmp(&a, &b),
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                }
            }
        }
    };
}

scalar_expression!(ToBool, ToBoolNullable, bool, kind = Boolean, nullable_kind = BooleanNullable, apply = apply_as_bool);
scalar_expression!(ToByte, ToByteNullable, i8, kind = Byte, nullable_kind = ByteNullable, apply = apply_as_byte);
scalar_expression!(ToShort, ToShortNullable, i16, kind = Short, nullable_kind = ShortNullable, apply = apply_as_short);
scalar_expression!(ToChar, ToCharNullable, char, kind = Char, nullable_kind = CharNullable, apply = apply_as_char);
scalar_expression!(ToInt, ToIntNullable, i32, kind = Int, nullable_kind = IntNullable, apply = apply_as_int);
scalar_expression!(ToLong, ToLongNullable, i64, kind = Long, nullable_kind = LongNullable, apply = apply_as_long);
scalar_expression!(ToFloat, ToFloatNullable, f32, kind = Float, nullable_kind = FloatNullable, apply = apply_as_float);
scalar_expression!(ToDouble, ToDoubleNullable, f64, kind = Double, nullable_kind = DoubleNullable, apply = apply_as_double);
scalar_expression!(ToDecimal, ToDecimalNullable, Decimal, kind = BigDecimal, nullable_kind = BigDecimalNullable, apply = apply_as_decimal);

///
/// BOOLEAN
///

impl<T: 'static> ToBool<T> {
    #[must_use]
    pub fn negate(&self) -> Self {
        let f = Arc::clone(&self.f);
        Self::new(move |e| !f(e))
    }

    pub fn and(&self, other: &Self) -> Self {
        let (f, g) = (Arc::clone(&self.f), Arc::clone(&other.f));
        Self::new(move |e| f(e) && g(e))
    }

    pub fn or(&self, other: &Self) -> Self {
        let (f, g) = (Arc::clone(&self.f), Arc::clone(&other.f));
        Self::new(move |e| f(e) || g(e))
    }
}

impl<T: 'static> ToBoolNullable<T> {
    #[must_use]
    pub fn negate(&self) -> Self {
        let f = Arc::clone(&self.f);
        Self::new(move |e| f(e).map(|b| !b))
    }
}

///
/// CHAR
///

impl<T: 'static> ToChar<T> {
    /// Unicode code point of the character.
    #[must_use]
    pub fn as_int(&self) -> ToInt<T> {
        let f = Arc::clone(&self.f);
        ToInt::new(move |e| code_point(f(e)))
    }
}

impl<T: 'static> ToCharNullable<T> {
    #[must_use]
    pub fn as_int(&self) -> ToIntNullable<T> {
        let f = Arc::clone(&self.f);
        ToIntNullable::new(move |e| f(e).map(code_point))
    }
}

// Scalar values stop at 0x10FFFF, so the conversion never saturates.
fn code_point(c: char) -> i32 {
    i32::try_from(u32::from(c)).unwrap_or(i32::MAX)
}
