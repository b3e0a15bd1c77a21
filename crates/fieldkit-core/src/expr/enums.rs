use crate::{
    error::Error,
    expr::{Expression, HasCompare, HasHash, ToInt, ToIntNullable, ToStr, ToStrNullable},
    value::{Value, ValueEnum},
};
use fieldkit_primitives::ExpressionKind;
use std::{borrow::Cow, cmp::Ordering, fmt, sync::Arc};

///
/// EnumDomain
///
/// A finite, ordered set of enum constants. `VALUES` lists every constant
/// in ordinal order; range predicates over enum fields enumerate it.
///
/// Usually implemented through [`enum_domain!`](crate::enum_domain).
///

pub trait EnumDomain: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Stable path identifying the domain, e.g. `"shop::Status"`.
    const PATH: &'static str;

    /// Every constant, in ordinal order.
    const VALUES: &'static [Self];

    fn name(self) -> &'static str;

    /// Position of the constant within `VALUES`.
    fn ordinal(self) -> u32 {
        let index = Self::VALUES
            .iter()
            .position(|v| *v == self)
            .unwrap_or(Self::VALUES.len());

        u32::try_from(index).unwrap_or(u32::MAX)
    }

    #[must_use]
    fn from_name(name: &str) -> Option<Self> {
        Self::VALUES.iter().copied().find(|v| v.name() == name)
    }

    #[must_use]
    fn from_ordinal(ordinal: u32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::VALUES.get(index).copied())
    }

    fn to_value(self) -> Value {
        Value::Enum(ValueEnum::from_domain(self))
    }
}

/// Ordinal order between two constants of the same domain.
pub(crate) fn ordinal_cmp<E: EnumDomain>(left: E, right: E) -> Ordering {
    left.ordinal().cmp(&right.ordinal())
}

fn ordinal_i32<E: EnumDomain>(value: E) -> i32 {
    i32::try_from(value.ordinal()).unwrap_or(i32::MAX)
}

///
/// ToEnum
///
/// Expression yielding a non-null enum constant.
///

pub struct ToEnum<T, E> {
    pub(crate) f: Arc<dyn Fn(&T) -> E + Send + Sync>,
}

impl<T, E> Clone for ToEnum<T, E> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T, E: EnumDomain> fmt::Debug for ToEnum<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToEnum")
            .field("kind", &ExpressionKind::Enum)
            .field("domain", &E::PATH)
            .finish_non_exhaustive()
    }
}

impl<T: 'static, E: EnumDomain> ToEnum<T, E> {
    pub fn new(f: impl Fn(&T) -> E + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    #[must_use]
    pub fn constant(value: E) -> Self {
        Self::new(move |_| value)
    }

    pub fn apply_as_enum(&self, entity: &T) -> E {
        (self.f)(entity)
    }

    #[must_use]
    pub fn as_ordinal(&self) -> ToInt<T> {
        let f = Arc::clone(&self.f);
        ToInt::new(move |e| ordinal_i32(f(e)))
    }

    #[must_use]
    pub fn as_name(&self) -> ToStr<T> {
        let f = Arc::clone(&self.f);
        ToStr::from_cow(move |e| Cow::Borrowed(f(e).name()))
    }

    #[must_use]
    pub fn map(&self, op: impl Fn(E) -> E + Send + Sync + 'static) -> Self {
        let f = Arc::clone(&self.f);
        Self::new(move |e| op(f(e)))
    }

    pub fn compose<V: 'static>(
        &self,
        upstream: impl for<'a> Fn(&'a V) -> &'a T + Send + Sync + 'static,
    ) -> ToEnum<V, E> {
        let f = Arc::clone(&self.f);
        ToEnum::new(move |v| f(upstream(v)))
    }

    pub fn compose_nullable<V: 'static>(
        &self,
        upstream: impl for<'a> Fn(&'a V) -> Option<&'a T> + Send + Sync + 'static,
    ) -> ToEnumNullable<V, E> {
        let f = Arc::clone(&self.f);
        ToEnumNullable::new(move |v| upstream(v).map(|t| f(t)))
    }

    #[must_use]
    pub fn to_nullable(&self) -> ToEnumNullable<T, E> {
        let f = Arc::clone(&self.f);
        ToEnumNullable::new(move |e| Some(f(e)))
    }
}

impl<T, E: EnumDomain> Expression<T> for ToEnum<T, E> {
    fn kind(&self) -> ExpressionKind {
        ExpressionKind::Enum
    }
}

impl<T, E: EnumDomain> HasHash<T> for ToEnum<T, E> {
    fn hash(&self, entity: &T) -> i64 {
        i64::from((self.f)(entity).ordinal())
    }
}

impl<T, E: EnumDomain> HasCompare<T> for ToEnum<T, E> {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        ordinal_cmp((self.f)(left), (self.f)(right))
    }
}

///
/// ToEnumNullable
///

pub struct ToEnumNullable<T, E> {
    pub(crate) f: Arc<dyn Fn(&T) -> Option<E> + Send + Sync>,
}

impl<T, E> Clone for ToEnumNullable<T, E> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T, E: EnumDomain> fmt::Debug for ToEnumNullable<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToEnumNullable")
            .field("kind", &ExpressionKind::EnumNullable)
            .field("domain", &E::PATH)
            .finish_non_exhaustive()
    }
}

impl<T: 'static, E: EnumDomain> ToEnumNullable<T, E> {
    pub fn new(f: impl Fn(&T) -> Option<E> + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    #[must_use]
    pub fn absent() -> Self {
        Self::new(|_| None)
    }

    pub fn apply(&self, entity: &T) -> Option<E> {
        (self.f)(entity)
    }

    pub fn apply_as_enum(&self, entity: &T) -> Result<E, Error> {
        (self.f)(entity).ok_or_else(|| Error::value_required(ExpressionKind::EnumNullable))
    }

    pub fn is_null(&self, entity: &T) -> bool {
        (self.f)(entity).is_none()
    }

    pub fn is_not_null(&self, entity: &T) -> bool {
        (self.f)(entity).is_some()
    }

    #[must_use]
    pub fn or_else(&self, fallback: E) -> ToEnum<T, E> {
        let f = Arc::clone(&self.f);
        ToEnum::new(move |e| f(e).unwrap_or(fallback))
    }

    pub fn or_else_get(&self, fallback: &ToEnum<T, E>) -> ToEnum<T, E> {
        let (f, g) = (Arc::clone(&self.f), Arc::clone(&fallback.f));
        ToEnum::new(move |e| f(e).unwrap_or_else(|| g(e)))
    }

    /// Collapse to the non-null kind.
    ///
    /// # Panics
    ///
    /// The returned expression panics with the *value required* error when
    /// evaluated on an entity for which this expression is absent.
    #[must_use]
    pub fn or_throw(&self) -> ToEnum<T, E> {
        let f = Arc::clone(&self.f);
        ToEnum::new(move |e| match f(e) {
            Some(value) => value,
            None => panic!("{}", Error::value_required(ExpressionKind::EnumNullable)),
        })
    }

    #[must_use]
    pub fn as_ordinal(&self) -> ToIntNullable<T> {
        let f = Arc::clone(&self.f);
        ToIntNullable::new(move |e| f(e).map(ordinal_i32))
    }

    #[must_use]
    pub fn as_name(&self) -> ToStrNullable<T> {
        let f = Arc::clone(&self.f);
        ToStrNullable::from_cow(move |e| f(e).map(|v| Cow::Borrowed(v.name())))
    }

    #[must_use]
    pub fn map_if_present(&self, op: impl Fn(E) -> E + Send + Sync + 'static) -> Self {
        let f = Arc::clone(&self.f);
        Self::new(move |e| f(e).map(&op))
    }

    pub fn compose<V: 'static>(
        &self,
        upstream: impl for<'a> Fn(&'a V) -> &'a T + Send + Sync + 'static,
    ) -> ToEnumNullable<V, E> {
        let f = Arc::clone(&self.f);
        ToEnumNullable::new(move |v| f(upstream(v)))
    }

    pub fn compose_nullable<V: 'static>(
        &self,
        upstream: impl for<'a> Fn(&'a V) -> Option<&'a T> + Send + Sync + 'static,
    ) -> ToEnumNullable<V, E> {
        let f = Arc::clone(&self.f);
        ToEnumNullable::new(move |v| upstream(v).and_then(|t| f(t)))
    }
}

impl<T, E: EnumDomain> Expression<T> for ToEnumNullable<T, E> {
    fn kind(&self) -> ExpressionKind {
        ExpressionKind::EnumNullable
    }
}

impl<T, E: EnumDomain> HasHash<T> for ToEnumNullable<T, E> {
    fn hash(&self, entity: &T) -> i64 {
        (self.f)(entity).map_or(0, |v| i64::from(v.ordinal()))
    }
}

impl<T, E: EnumDomain> HasCompare<T> for ToEnumNullable<T, E> {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        match ((self.f)(left), (self.f)(right)) {
            (Some(a), Some(b)) => ordinal_cmp(a, b),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        }
    }
}
