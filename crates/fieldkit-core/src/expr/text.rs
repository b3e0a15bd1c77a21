use crate::{
    error::Error,
    expr::{
        Expression, HasCompare, HasHash, ToBool, ToBoolNullable, ToDouble, ToDoubleNullable,
        ToInt, ToIntNullable,
    },
    value::{HashCode, char_len},
};
use fieldkit_primitives::ExpressionKind;
use std::{borrow::Cow, cmp::Ordering, fmt, sync::Arc};

type TextFn<T> = Arc<dyn for<'a> Fn(&'a T) -> Cow<'a, str> + Send + Sync>;
type NullableTextFn<T> = Arc<dyn for<'a> Fn(&'a T) -> Option<Cow<'a, str>> + Send + Sync>;

///
/// ToStr
///
/// Expression yielding a non-null string. Values borrowed from the entity
/// stay borrowed; derived values are owned.
///

pub struct ToStr<T> {
    pub(crate) f: TextFn<T>,
}

impl<T> Clone for ToStr<T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T> fmt::Debug for ToStr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToStr")
            .field("kind", &ExpressionKind::String)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> ToStr<T> {
    /// Expression borrowing a string slice from the entity.
    pub fn new(f: impl for<'a> Fn(&'a T) -> &'a str + Send + Sync + 'static) -> Self {
        Self::from_cow(move |e| Cow::Borrowed(f(e)))
    }

    /// Expression computing an owned string from the entity.
    pub fn owned(f: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self::from_cow(move |e| Cow::Owned(f(e)))
    }

    pub fn from_cow(f: impl for<'a> Fn(&'a T) -> Cow<'a, str> + Send + Sync + 'static) -> Self {
        Self { f: Arc::new(f) }
    }

    #[must_use]
    pub fn constant(value: impl Into<String>) -> Self {
        let value: Arc<str> = Arc::from(value.into());
        Self::owned(move |_| value.to_string())
    }

    pub fn apply_as_string<'a>(&self, entity: &'a T) -> Cow<'a, str> {
        (self.f)(entity)
    }

    /// Number of Unicode scalar values.
    #[must_use]
    pub fn length(&self) -> ToInt<T> {
        let f = Arc::clone(&self.f);
        ToInt::new(move |e| char_len(&f(e)))
    }

    #[must_use]
    pub fn to_lower_case(&self) -> Self {
        let f = Arc::clone(&self.f);
        Self::owned(move |e| f(e).to_lowercase())
    }

    #[must_use]
    pub fn to_upper_case(&self) -> Self {
        let f = Arc::clone(&self.f);
        Self::owned(move |e| f(e).to_uppercase())
    }

    #[must_use]
    pub fn is_empty(&self) -> ToBool<T> {
        let f = Arc::clone(&self.f);
        ToBool::new(move |e| f(e).is_empty())
    }

    #[must_use]
    pub fn map(&self, op: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        let f = Arc::clone(&self.f);
        Self::owned(move |e| op(&f(e)))
    }

    pub fn map_to_bool(&self, op: impl Fn(&str) -> bool + Send + Sync + 'static) -> ToBool<T> {
        let f = Arc::clone(&self.f);
        ToBool::new(move |e| op(&f(e)))
    }

    pub fn map_to_int(&self, op: impl Fn(&str) -> i32 + Send + Sync + 'static) -> ToInt<T> {
        let f = Arc::clone(&self.f);
        ToInt::new(move |e| op(&f(e)))
    }

    pub fn map_to_double(&self, op: impl Fn(&str) -> f64 + Send + Sync + 'static) -> ToDouble<T> {
        let f = Arc::clone(&self.f);
        ToDouble::new(move |e| op(&f(e)))
    }

    pub fn compose<V: 'static>(
        &self,
        upstream: impl for<'a> Fn(&'a V) -> &'a T + Send + Sync + 'static,
    ) -> ToStr<V> {
        let f = Arc::clone(&self.f);
        ToStr::from_cow(move |v| f(upstream(v)))
    }

    pub fn compose_nullable<V: 'static>(
        &self,
        upstream: impl for<'a> Fn(&'a V) -> Option<&'a T> + Send + Sync + 'static,
    ) -> ToStrNullable<V> {
        let f = Arc::clone(&self.f);
        ToStrNullable::from_cow(move |v| upstream(v).map(|t| f(t)))
    }

    #[must_use]
    pub fn to_nullable(&self) -> ToStrNullable<T> {
        let f = Arc::clone(&self.f);
        ToStrNullable::from_cow(move |e| Some(f(e)))
    }
}

impl<T> Expression<T> for ToStr<T> {
    fn kind(&self) -> ExpressionKind {
        ExpressionKind::String
    }
}

impl<T> HasHash<T> for ToStr<T> {
    fn hash(&self, entity: &T) -> i64 {
        HashCode::hash_code(&*(self.f)(entity))
    }
}

impl<T> HasCompare<T> for ToStr<T> {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.f)(left).cmp(&(self.f)(right))
    }
}

///
/// ToStrNullable
///

pub struct ToStrNullable<T> {
    pub(crate) f: NullableTextFn<T>,
}

impl<T> Clone for ToStrNullable<T> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
        }
    }
}

impl<T> fmt::Debug for ToStrNullable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToStrNullable")
            .field("kind", &ExpressionKind::StringNullable)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> ToStrNullable<T> {
    pub fn new(f: impl for<'a> Fn(&'a T) -> Option<&'a str> + Send + Sync + 'static) -> Self {
        Self::from_cow(move |e| f(e).map(Cow::Borrowed))
    }

    pub fn owned(f: impl Fn(&T) -> Option<String> + Send + Sync + 'static) -> Self {
        Self::from_cow(move |e| f(e).map(Cow::Owned))
    }

    pub fn from_cow(
        f: impl for<'a> Fn(&'a T) -> Option<Cow<'a, str>> + Send + Sync + 'static,
    ) -> Self {
        Self { f: Arc::new(f) }
    }

    #[must_use]
    pub fn absent() -> Self {
        Self::from_cow(|_| None)
    }

    pub fn apply<'a>(&self, entity: &'a T) -> Option<Cow<'a, str>> {
        (self.f)(entity)
    }

    pub fn apply_as_string<'a>(&self, entity: &'a T) -> Result<Cow<'a, str>, Error> {
        (self.f)(entity).ok_or_else(|| Error::value_required(ExpressionKind::StringNullable))
    }

    pub fn is_null(&self, entity: &T) -> bool {
        (self.f)(entity).is_none()
    }

    pub fn is_not_null(&self, entity: &T) -> bool {
        (self.f)(entity).is_some()
    }

    pub fn or_else(&self, fallback: impl Into<String>) -> ToStr<T> {
        let f = Arc::clone(&self.f);
        let fallback: Arc<str> = Arc::from(fallback.into());
        ToStr::from_cow(move |e| f(e).unwrap_or_else(|| Cow::Owned(fallback.to_string())))
    }

    pub fn or_else_get(&self, fallback: &ToStr<T>) -> ToStr<T> {
        let (f, g) = (Arc::clone(&self.f), Arc::clone(&fallback.f));
        ToStr::from_cow(move |e| f(e).unwrap_or_else(|| g(e)))
    }

    /// Collapse to the non-null kind.
    ///
    /// # Panics
    ///
    /// The returned expression panics with the *value required* error when
    /// evaluated on an entity for which this expression is absent.
    #[must_use]
    pub fn or_throw(&self) -> ToStr<T> {
        let f = Arc::clone(&self.f);
        ToStr::from_cow(move |e| match f(e) {
            Some(value) => value,
            None => panic!("{}", Error::value_required(ExpressionKind::StringNullable)),
        })
    }

    #[must_use]
    pub fn length(&self) -> ToIntNullable<T> {
        let f = Arc::clone(&self.f);
        ToIntNullable::new(move |e| f(e).map(|s| char_len(&s)))
    }

    #[must_use]
    pub fn to_lower_case(&self) -> Self {
        let f = Arc::clone(&self.f);
        Self::owned(move |e| f(e).map(|s| s.to_lowercase()))
    }

    #[must_use]
    pub fn to_upper_case(&self) -> Self {
        let f = Arc::clone(&self.f);
        Self::owned(move |e| f(e).map(|s| s.to_uppercase()))
    }

    #[must_use]
    pub fn is_empty(&self) -> ToBoolNullable<T> {
        let f = Arc::clone(&self.f);
        ToBoolNullable::new(move |e| f(e).map(|s| s.is_empty()))
    }

    #[must_use]
    pub fn map_if_present(&self, op: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        let f = Arc::clone(&self.f);
        Self::owned(move |e| f(e).map(|s| op(&s)))
    }

    pub fn map_to_int_if_present(
        &self,
        op: impl Fn(&str) -> i32 + Send + Sync + 'static,
    ) -> ToIntNullable<T> {
        let f = Arc::clone(&self.f);
        ToIntNullable::new(move |e| f(e).map(|s| op(&s)))
    }

    pub fn map_to_double_if_present(
        &self,
        op: impl Fn(&str) -> f64 + Send + Sync + 'static,
    ) -> ToDoubleNullable<T> {
        let f = Arc::clone(&self.f);
        ToDoubleNullable::new(move |e| f(e).map(|s| op(&s)))
    }

    pub fn compose<V: 'static>(
        &self,
        upstream: impl for<'a> Fn(&'a V) -> &'a T + Send + Sync + 'static,
    ) -> ToStrNullable<V> {
        let f = Arc::clone(&self.f);
        ToStrNullable::from_cow(move |v| f(upstream(v)))
    }

    pub fn compose_nullable<V: 'static>(
        &self,
        upstream: impl for<'a> Fn(&'a V) -> Option<&'a T> + Send + Sync + 'static,
    ) -> ToStrNullable<V> {
        let f = Arc::clone(&self.f);
        ToStrNullable::from_cow(move |v| upstream(v).and_then(|t| f(t)))
    }
}

impl<T> Expression<T> for ToStrNullable<T> {
    fn kind(&self) -> ExpressionKind {
        ExpressionKind::StringNullable
    }
}

impl<T> HasHash<T> for ToStrNullable<T> {
    fn hash(&self, entity: &T) -> i64 {
        (self.f)(entity).map_or(0, |s| HashCode::hash_code(&*s))
    }
}

impl<T> HasCompare<T> for ToStrNullable<T> {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        match ((self.f)(left), (self.f)(right)) {
            (Some(a), Some(b)) => a.cmp(&b),
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
        }
    }
}
