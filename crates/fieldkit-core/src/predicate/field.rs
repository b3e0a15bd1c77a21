use crate::{
    field::FieldInfo,
    obs::sink::{self, MetricsEvent},
    predicate::PredicateType,
    value::Value,
};
use fieldkit_primitives::Inclusion;
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

///
/// Operand
///
/// Right-hand side of a field predicate: a literal or another field.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Operand {
    Value(Value),
    Field(FieldInfo),
}

impl Operand {
    #[must_use]
    pub const fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(v) => Some(v),
            Self::Field(_) => None,
        }
    }
}

///
/// FieldPredicate
///
/// A test over one field of an entity, with enough structure for a
/// translator to rebuild it: the field, the base predicate type, operands,
/// range inclusion and whether the result is negated.
///
/// Negation flips the test and reports the complementary type; the base
/// type and operands are kept as built.
///

pub struct FieldPredicate<E> {
    field: FieldInfo,
    base: PredicateType,
    operands: Vec<Operand>,
    inclusion: Option<Inclusion>,
    negated: bool,
    test: Arc<dyn Fn(&E) -> bool + Send + Sync>,
}

impl<E> Clone for FieldPredicate<E> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            base: self.base,
            operands: self.operands.clone(),
            inclusion: self.inclusion,
            negated: self.negated,
            test: Arc::clone(&self.test),
        }
    }
}

impl<E> fmt::Debug for FieldPredicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPredicate")
            .field("field", &self.field.identifier)
            .field("type", &self.predicate_type())
            .field("operands", &self.operands)
            .field("inclusion", &self.inclusion)
            .finish_non_exhaustive()
    }
}

impl<E> FieldPredicate<E> {
    pub(crate) fn build(
        field: FieldInfo,
        base: PredicateType,
        operands: Vec<Operand>,
        test: impl Fn(&E) -> bool + Send + Sync + 'static,
    ) -> Self {
        sink::record(MetricsEvent::PredicateBuilt { predicate: base });

        Self {
            field,
            base,
            operands,
            inclusion: None,
            negated: false,
            test: Arc::new(test),
        }
    }

    /// Predicate that ignores the entity; used when enum collapsing leaves
    /// nothing (or everything) to test.
    pub(crate) fn constant(field: FieldInfo, value: bool) -> Self {
        let base = if value {
            PredicateType::AlwaysTrue
        } else {
            PredicateType::AlwaysFalse
        };

        Self::build(field, base, Vec::new(), move |_| value)
    }

    #[must_use]
    pub(crate) fn with_inclusion(mut self, inclusion: Inclusion) -> Self {
        self.inclusion = Some(inclusion);
        self
    }

    #[must_use]
    pub const fn field(&self) -> &FieldInfo {
        &self.field
    }

    /// Effective type: the complement of the base type when negated.
    #[must_use]
    pub const fn predicate_type(&self) -> PredicateType {
        if self.negated {
            self.base.complement()
        } else {
            self.base
        }
    }

    /// Type the predicate was built as, before any negation.
    #[must_use]
    pub const fn base_type(&self) -> PredicateType {
        self.base
    }

    #[must_use]
    pub fn operands(&self) -> &[Operand] {
        &self.operands
    }

    /// First operand, for the binary predicate types.
    #[must_use]
    pub fn operand(&self) -> Option<&Operand> {
        self.operands.first()
    }

    #[must_use]
    pub const fn inclusion(&self) -> Option<Inclusion> {
        self.inclusion
    }

    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.negated
    }

    pub fn test(&self, entity: &E) -> bool {
        (self.test)(entity) != self.negated
    }

    /// Exact logical complement of this predicate.
    #[must_use]
    pub fn negate(&self) -> Self {
        let mut negated = self.clone();
        negated.negated = !self.negated;

        log::trace!(
            "negated {} on {} -> {}",
            self.predicate_type(),
            self.field.identifier,
            negated.predicate_type()
        );
        sink::record(MetricsEvent::PredicateNegated {
            predicate: negated.predicate_type(),
        });

        negated
    }

    /// Detached test closure, for callers that need a plain `Fn(&E) -> bool`.
    #[must_use]
    pub fn to_fn(&self) -> impl Fn(&E) -> bool + Send + Sync + 'static
    where
        E: 'static,
    {
        let (test, negated) = (Arc::clone(&self.test), self.negated);
        move |e| test(e) != negated
    }
}
