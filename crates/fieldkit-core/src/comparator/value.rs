use crate::{
    error::{Error, ErrorOrigin},
    field::Field,
    value::{Value, strict_order_cmp},
};
use fieldkit_primitives::NullOrder;
use std::{cmp::Ordering, fmt, sync::Arc};

///
/// ValueComparator
///
/// Orders entities by the dynamic value of any field. Fields whose kind has
/// no natural order are accepted at construction and rejected when a
/// comparison is attempted.
///

pub struct ValueComparator<E> {
    field: Arc<dyn Field<E>>,
    null_order: NullOrder,
}

impl<E> Clone for ValueComparator<E> {
    fn clone(&self) -> Self {
        Self {
            field: Arc::clone(&self.field),
            null_order: self.null_order,
        }
    }
}

impl<E> fmt::Debug for ValueComparator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueComparator")
            .field("field", self.field.identifier())
            .field("null_order", &self.null_order)
            .finish()
    }
}

impl<E> ValueComparator<E> {
    #[must_use]
    pub fn new(field: Arc<dyn Field<E>>) -> Self {
        Self {
            field,
            null_order: NullOrder::Last,
        }
    }

    #[must_use]
    pub const fn with_null_order(mut self, null_order: NullOrder) -> Self {
        self.null_order = null_order;
        self
    }

    pub fn try_compare(&self, left: &E, right: &E) -> Result<Ordering, Error> {
        self.ensure_orderable()?;

        self.compare_values(&self.field.value_of(left), &self.field.value_of(right))
    }

    /// Stable sort in place; the slice is untouched on error.
    pub fn try_sort(&self, items: &mut [E]) -> Result<(), Error> {
        self.ensure_orderable()?;

        let keys: Vec<Value> = items.iter().map(|e| self.field.value_of(e)).collect();
        for pair in keys.iter().filter(|v| !v.is_null()).collect::<Vec<_>>().windows(2) {
            strict_order_cmp(pair[0], pair[1])?;
        }

        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| {
            self.compare_values(&keys[a], &keys[b])
                .unwrap_or(Ordering::Equal)
        });
        apply_permutation(items, &mut order);

        Ok(())
    }

    fn ensure_orderable(&self) -> Result<(), Error> {
        let kind = self.field.kind();
        if kind.supports_ordering() {
            return Ok(());
        }

        Err(Error::unsupported(
            ErrorOrigin::Comparator,
            format!(
                "field {} of kind {kind} has no natural order",
                self.field.identifier()
            ),
        ))
    }

    fn compare_values(&self, left: &Value, right: &Value) -> Result<Ordering, Error> {
        let absent_first = matches!(self.null_order, NullOrder::First);

        match (left.is_null(), right.is_null()) {
            (true, true) => Ok(Ordering::Equal),
            (true, false) if absent_first => Ok(Ordering::Less),
            (true, false) => Ok(Ordering::Greater),
            (false, true) if absent_first => Ok(Ordering::Greater),
            (false, true) => Ok(Ordering::Less),
            (false, false) => strict_order_cmp(left, right),
        }
    }
}

// Move `items[order[i]]` to position `i`, following each cycle once.
fn apply_permutation<T>(items: &mut [T], order: &mut [usize]) {
    for start in 0..order.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            items.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}
