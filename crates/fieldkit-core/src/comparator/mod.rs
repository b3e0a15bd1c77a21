//! Module: comparator
//! Responsibility: orderings over entities derived from field values.
//!
//! Invariants:
//! - Present values use the same total order as `HasCompare::compare`.
//! - Reversal flips present values only; absent placement is fixed by
//!   `NullOrder`.
//! - Sorting is stable.

mod value;

#[cfg(test)]
mod tests;

use crate::{
    error::{Error, ErrorOrigin},
    field::FieldInfo,
    obs::sink::{self, MetricsEvent},
};
use fieldkit_primitives::NullOrder;
use std::{cmp::Ordering, fmt, sync::Arc};

// re-exports
pub use value::ValueComparator;

///
/// Presence
///
/// Outcome of reading the compared field from two entities.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Presence {
    Both(Ordering),
    LeftAbsent,
    RightAbsent,
    BothAbsent,
}

///
/// FieldComparator
///

pub struct FieldComparator<E> {
    field: FieldInfo,
    null_order: NullOrder,
    reversed: bool,
    cmp: Arc<dyn Fn(&E, &E) -> Presence + Send + Sync>,
}

impl<E> Clone for FieldComparator<E> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            null_order: self.null_order,
            reversed: self.reversed,
            cmp: Arc::clone(&self.cmp),
        }
    }
}

impl<E> fmt::Debug for FieldComparator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldComparator")
            .field("field", &self.field.identifier)
            .field("null_order", &self.null_order)
            .field("reversed", &self.reversed)
            .finish_non_exhaustive()
    }
}

impl<E> FieldComparator<E> {
    pub(crate) fn new(
        field: FieldInfo,
        null_order: NullOrder,
        cmp: impl Fn(&E, &E) -> Presence + Send + Sync + 'static,
    ) -> Self {
        sink::record(MetricsEvent::ComparatorBuilt { kind: field.kind });

        Self {
            field,
            null_order,
            reversed: false,
            cmp: Arc::new(cmp),
        }
    }

    pub fn compare(&self, left: &E, right: &E) -> Ordering {
        let absent_first = matches!(self.null_order, NullOrder::First);

        match (self.cmp)(left, right) {
            Presence::Both(ord) if self.reversed => ord.reverse(),
            Presence::Both(ord) => ord,
            Presence::BothAbsent => Ordering::Equal,
            Presence::LeftAbsent if absent_first => Ordering::Less,
            Presence::LeftAbsent => Ordering::Greater,
            Presence::RightAbsent if absent_first => Ordering::Greater,
            Presence::RightAbsent => Ordering::Less,
        }
    }

    /// Same field and null placement, present values in reverse order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            reversed: !self.reversed,
            ..self.clone()
        }
    }

    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    #[must_use]
    pub const fn null_order(&self) -> NullOrder {
        self.null_order
    }

    #[must_use]
    pub const fn field(&self) -> &FieldInfo {
        &self.field
    }

    /// Combine with a tie-breaker.
    #[must_use]
    pub fn then(self, next: impl Into<Comparator<E>>) -> Comparator<E> {
        Comparator::from(self).then(next)
    }

    /// Stable sort in place.
    pub fn sort(&self, items: &mut [E]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

///
/// Comparator
///
/// Lexicographic chain of field comparators; later entries only break ties
/// left by earlier ones. Never empty.
///

pub struct Comparator<E> {
    parts: Vec<FieldComparator<E>>,
}

impl<E> Clone for Comparator<E> {
    fn clone(&self) -> Self {
        Self {
            parts: self.parts.clone(),
        }
    }
}

impl<E> fmt::Debug for Comparator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.parts).finish()
    }
}

impl<E> Comparator<E> {
    /// Chain comparators in priority order; fails on an empty list.
    pub fn try_combine(parts: impl IntoIterator<Item = FieldComparator<E>>) -> Result<Self, Error> {
        let parts: Vec<_> = parts.into_iter().collect();
        if parts.is_empty() {
            return Err(Error::invalid_argument(
                ErrorOrigin::Comparator,
                "comparator chain requires at least one field comparator",
            ));
        }

        Ok(Self { parts })
    }

    pub fn compare(&self, left: &E, right: &E) -> Ordering {
        self.parts
            .iter()
            .map(|part| part.compare(left, right))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    #[must_use]
    pub fn then(mut self, next: impl Into<Self>) -> Self {
        self.parts.extend(next.into().parts);
        self
    }

    /// Every entry reversed; null placement is kept per entry.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            parts: self.parts.iter().map(FieldComparator::reversed).collect(),
        }
    }

    #[must_use]
    pub fn parts(&self) -> &[FieldComparator<E>] {
        &self.parts
    }

    /// Stable sort in place.
    pub fn sort(&self, items: &mut [E]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

impl<E> From<FieldComparator<E>> for Comparator<E> {
    fn from(part: FieldComparator<E>) -> Self {
        Self { parts: vec![part] }
    }
}
