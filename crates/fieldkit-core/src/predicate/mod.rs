//! Module: predicate
//! Responsibility: boolean tests over entities that keep their structure
//! visible to translators.
//!
//! Invariants:
//! - `negate` is an exact logical complement, including on absent values.
//! - `and`/`or` flatten nested nodes of the same connective.
//! - Fingerprints depend on structure only, never on closure identity.

mod field;
mod fingerprint;
mod kind;

#[cfg(test)]
mod tests;

use std::{
    fmt,
    ops::{BitAnd, BitOr, Not},
};

// re-exports
pub use field::{FieldPredicate, Operand};
pub use kind::PredicateType;

///
/// Predicate
///
/// Tree of field predicates joined by conjunction and disjunction.
/// An empty `And` is true; an empty `Or` is false.
///

pub enum Predicate<E> {
    Field(FieldPredicate<E>),
    And(Vec<Self>),
    Or(Vec<Self>),
}

impl<E> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(p) => Self::Field(p.clone()),
            Self::And(children) => Self::And(children.clone()),
            Self::Or(children) => Self::Or(children.clone()),
        }
    }
}

impl<E> fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(p) => p.fmt(f),
            Self::And(children) => f.debug_tuple("And").field(children).finish(),
            Self::Or(children) => f.debug_tuple("Or").field(children).finish(),
        }
    }
}

impl<E> Predicate<E> {
    pub fn test(&self, entity: &E) -> bool {
        match self {
            Self::Field(p) => p.test(entity),
            Self::And(children) => children.iter().all(|c| c.test(entity)),
            Self::Or(children) => children.iter().any(|c| c.test(entity)),
        }
    }

    /// Logical complement, pushed down to the leaves by De Morgan.
    #[must_use]
    pub fn negate(&self) -> Self {
        match self {
            Self::Field(p) => Self::Field(p.negate()),
            Self::And(children) => Self::Or(children.iter().map(Self::negate).collect()),
            Self::Or(children) => Self::And(children.iter().map(Self::negate).collect()),
        }
    }

    #[must_use]
    pub fn and(self, other: impl Into<Self>) -> Self {
        let mut children = self.into_and_children();
        children.extend(other.into().into_and_children());

        Self::And(children)
    }

    #[must_use]
    pub fn or(self, other: impl Into<Self>) -> Self {
        let mut children = self.into_or_children();
        children.extend(other.into().into_or_children());

        Self::Or(children)
    }

    /// Conjunction of every predicate yielded; true when empty.
    pub fn all(predicates: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        Self::And(
            predicates
                .into_iter()
                .flat_map(|p| p.into().into_and_children())
                .collect(),
        )
    }

    /// Disjunction of every predicate yielded; false when empty.
    pub fn any(predicates: impl IntoIterator<Item = impl Into<Self>>) -> Self {
        Self::Or(
            predicates
                .into_iter()
                .flat_map(|p| p.into().into_or_children())
                .collect(),
        )
    }

    /// Field predicates in depth-first order.
    #[must_use]
    pub fn leaves(&self) -> Vec<&FieldPredicate<E>> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    /// SHA-256 digest of the predicate structure.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint::fingerprint(self)
    }

    /// Detached test closure.
    #[must_use]
    pub fn to_fn(self) -> impl Fn(&E) -> bool + Send + Sync + 'static
    where
        E: 'static,
    {
        move |e| self.test(e)
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a FieldPredicate<E>>) {
        match self {
            Self::Field(p) => out.push(p),
            Self::And(children) | Self::Or(children) => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    fn into_and_children(self) -> Vec<Self> {
        match self {
            Self::And(children) => children,
            other => vec![other],
        }
    }

    fn into_or_children(self) -> Vec<Self> {
        match self {
            Self::Or(children) => children,
            other => vec![other],
        }
    }
}

impl<E> FieldPredicate<E> {
    /// SHA-256 digest of this predicate's structure.
    #[must_use]
    pub fn fingerprint(&self) -> [u8; 32] {
        fingerprint::fingerprint_field(self)
    }

    #[must_use]
    pub fn and(self, other: impl Into<Predicate<E>>) -> Predicate<E> {
        Predicate::Field(self).and(other)
    }

    #[must_use]
    pub fn or(self, other: impl Into<Predicate<E>>) -> Predicate<E> {
        Predicate::Field(self).or(other)
    }
}

impl<E> From<FieldPredicate<E>> for Predicate<E> {
    fn from(p: FieldPredicate<E>) -> Self {
        Self::Field(p)
    }
}

///
/// OPERATORS
///

impl<E, R: Into<Self>> BitAnd<R> for Predicate<E> {
    type Output = Self;

    fn bitand(self, rhs: R) -> Self {
        self.and(rhs)
    }
}

impl<E, R: Into<Self>> BitOr<R> for Predicate<E> {
    type Output = Self;

    fn bitor(self, rhs: R) -> Self {
        self.or(rhs)
    }
}

impl<E> Not for Predicate<E> {
    type Output = Self;

    fn not(self) -> Self {
        self.negate()
    }
}

impl<E, R: Into<Predicate<E>>> BitAnd<R> for FieldPredicate<E> {
    type Output = Predicate<E>;

    fn bitand(self, rhs: R) -> Predicate<E> {
        self.and(rhs)
    }
}

impl<E, R: Into<Predicate<E>>> BitOr<R> for FieldPredicate<E> {
    type Output = Predicate<E>;

    fn bitor(self, rhs: R) -> Predicate<E> {
        self.or(rhs)
    }
}

impl<E> Not for FieldPredicate<E> {
    type Output = Self;

    fn not(self) -> Self {
        self.negate()
    }
}
