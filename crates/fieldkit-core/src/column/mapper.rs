use fieldkit_primitives::MapperOrdering;
use std::{fmt, marker::PhantomData, sync::Arc};

///
/// TypeMapper
///
/// Reversible conversion between the representation a column stores and
/// the value a field exposes. Supplied by the schema layer; fields only
/// invoke it.
///

pub trait TypeMapper<Stored, Exposed>: Send + Sync {
    fn to_exposed(&self, stored: Stored) -> Exposed;

    fn to_stored(&self, exposed: Exposed) -> Stored;

    /// How stored order relates to exposed order.
    fn ordering(&self) -> MapperOrdering {
        MapperOrdering::Unspecified
    }

    /// Short label for diagnostics.
    fn label(&self) -> &'static str {
        "custom"
    }
}

///
/// IdentityMapper
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct IdentityMapper;

impl<V> TypeMapper<V, V> for IdentityMapper {
    fn to_exposed(&self, stored: V) -> V {
        stored
    }

    fn to_stored(&self, exposed: V) -> V {
        exposed
    }

    fn ordering(&self) -> MapperOrdering {
        MapperOrdering::Retain
    }

    fn label(&self) -> &'static str {
        "identity"
    }
}

///
/// FnMapper
///
/// Mapper assembled from a pair of closures.
///

pub struct FnMapper<Stored, Exposed> {
    to_exposed: Arc<dyn Fn(Stored) -> Exposed + Send + Sync>,
    to_stored: Arc<dyn Fn(Exposed) -> Stored + Send + Sync>,
    ordering: MapperOrdering,
    label: &'static str,
    _marker: PhantomData<fn(Stored) -> Exposed>,
}

impl<Stored, Exposed> FnMapper<Stored, Exposed> {
    pub fn new(
        label: &'static str,
        to_exposed: impl Fn(Stored) -> Exposed + Send + Sync + 'static,
        to_stored: impl Fn(Exposed) -> Stored + Send + Sync + 'static,
    ) -> Self {
        Self {
            to_exposed: Arc::new(to_exposed),
            to_stored: Arc::new(to_stored),
            ordering: MapperOrdering::Unspecified,
            label,
            _marker: PhantomData,
        }
    }

    #[must_use]
    pub fn with_ordering(mut self, ordering: MapperOrdering) -> Self {
        self.ordering = ordering;
        self
    }
}

impl<Stored, Exposed> Clone for FnMapper<Stored, Exposed> {
    fn clone(&self) -> Self {
        Self {
            to_exposed: Arc::clone(&self.to_exposed),
            to_stored: Arc::clone(&self.to_stored),
            ordering: self.ordering,
            label: self.label,
            _marker: PhantomData,
        }
    }
}

impl<Stored, Exposed> fmt::Debug for FnMapper<Stored, Exposed> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnMapper")
            .field("label", &self.label)
            .field("ordering", &self.ordering)
            .finish_non_exhaustive()
    }
}

impl<Stored, Exposed> TypeMapper<Stored, Exposed> for FnMapper<Stored, Exposed> {
    fn to_exposed(&self, stored: Stored) -> Exposed {
        (self.to_exposed)(stored)
    }

    fn to_stored(&self, exposed: Exposed) -> Stored {
        (self.to_stored)(exposed)
    }

    fn ordering(&self) -> MapperOrdering {
        self.ordering
    }

    fn label(&self) -> &'static str {
        self.label
    }
}
