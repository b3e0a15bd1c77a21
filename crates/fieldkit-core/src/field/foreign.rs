use crate::{
    expr::EnumDomain,
    field::{
        Accessor, BoolField, ByteField, CharField, ComparableField, ComparableValue, DoubleField,
        EnumField, Field, FieldInfo, FloatField, HasComparableOperators, IntField, LongField,
        ShortField, StringField,
    },
    predicate::{FieldPredicate, Operand, PredicateType},
    value::{TotalOrd, Value},
};
use derive_more::Deref;
use std::{borrow::Cow, fmt, sync::Arc};

type Matcher<E, F> = Arc<dyn Fn(&E, &F) -> bool + Send + Sync>;

///
/// KeyedField
///
/// A field that can take part in a foreign-key association: its value can
/// be read as a key, compared for equality, and matched by a predicate.
///

pub trait KeyedField<E: 'static>: Field<E> {
    type Key: Clone + Send + Sync + 'static;

    fn key_accessor(&self) -> Accessor<E, Self::Key>;

    fn key_eq(left: &Self::Key, right: &Self::Key) -> bool;

    fn key_equal(&self, key: Self::Key) -> FieldPredicate<E>;
}

macro_rules! keyed_primitive {
    ($($name:ident),* $(,)?) => {
        $(
            impl<E: 'static, D: 'static> KeyedField<E> for $name<E, D> {
                type Key = <Self as HasComparableOperators<E>>::Item;

                fn key_accessor(&self) -> Accessor<E, Self::Key> {
                    self.accessor()
                }

                fn key_eq(left: &Self::Key, right: &Self::Key) -> bool {
                    TotalOrd::total_cmp(left, right).is_eq()
                }

                fn key_equal(&self, key: Self::Key) -> FieldPredicate<E> {
                    self.equal(key)
                }
            }
        )*
    };
}

keyed_primitive!(
    BoolField,
    ByteField,
    ShortField,
    CharField,
    IntField,
    LongField,
    FloatField,
    DoubleField,
    StringField,
);

impl<E: 'static, D: 'static, V: ComparableValue> KeyedField<E> for ComparableField<E, D, V> {
    type Key = V;

    fn key_accessor(&self) -> Accessor<E, V> {
        self.accessor()
    }

    fn key_eq(left: &V, right: &V) -> bool {
        TotalOrd::total_cmp(left, right).is_eq()
    }

    fn key_equal(&self, key: V) -> FieldPredicate<E> {
        self.equal(key)
    }
}

impl<E: 'static, D: 'static, V: EnumDomain> KeyedField<E> for EnumField<E, D, V> {
    type Key = V;

    fn key_accessor(&self) -> Accessor<E, V> {
        self.borrowed()
    }

    fn key_eq(left: &V, right: &V) -> bool {
        left == right
    }

    fn key_equal(&self, key: V) -> FieldPredicate<E> {
        self.equal(key)
    }
}

///
/// ForeignKeyField
///
/// A local field plus the field it references on a foreign entity. Only the
/// association is recorded; navigation runs over caller-supplied entities.
///

#[derive(Clone, Debug, Deref)]
pub struct ForeignKeyField<F, R> {
    #[deref]
    field: F,
    referenced: R,
}

impl<F, R> ForeignKeyField<F, R> {
    pub const fn new(field: F, referenced: R) -> Self {
        Self { field, referenced }
    }

    #[must_use]
    pub const fn field(&self) -> &F {
        &self.field
    }

    #[must_use]
    pub const fn referenced_field(&self) -> &R {
        &self.referenced
    }

    /// Navigation from a local entity to the foreign entity it references,
    /// searched in `source`.
    pub fn finder<'s, E, FE>(&self, source: &'s [FE]) -> FindFrom<'s, E, FE>
    where
        E: 'static,
        FE: 'static,
        F: KeyedField<E>,
        R: KeyedField<FE, Key = F::Key>,
    {
        FindFrom {
            local: self.field.info().clone(),
            referenced: self.referenced.info().clone(),
            source,
            matches: self.matcher(),
        }
    }

    /// Navigation from a foreign entity back to the local entities that
    /// reference it, searched in `source`.
    pub fn backward_finder<'s, E, FE>(&self, source: &'s [E]) -> FindBackwards<'s, E, FE>
    where
        E: 'static,
        FE: 'static,
        F: KeyedField<E>,
        R: KeyedField<FE, Key = F::Key>,
    {
        FindBackwards {
            local: self.field.info().clone(),
            referenced: self.referenced.info().clone(),
            source,
            matches: self.matcher(),
        }
    }

    /// Equality on the local field against the value `foreign` holds in the
    /// referenced field. An absent foreign value matches nothing.
    pub fn references<E, FE>(&self, foreign: &FE) -> FieldPredicate<E>
    where
        E: 'static,
        FE: 'static,
        F: KeyedField<E>,
        R: KeyedField<FE, Key = F::Key>,
    {
        let key = (self.referenced.key_accessor())(foreign).map(Cow::into_owned);

        match key {
            Some(key) => self.field.key_equal(key),
            None => FieldPredicate::build(
                self.field.info().clone(),
                PredicateType::Equal,
                vec![Operand::Value(Value::Null)],
                |_| false,
            ),
        }
    }

    fn matcher<E, FE>(&self) -> Matcher<E, FE>
    where
        E: 'static,
        FE: 'static,
        F: KeyedField<E>,
        R: KeyedField<FE, Key = F::Key>,
    {
        let (local, referenced) = (self.field.key_accessor(), self.referenced.key_accessor());

        Arc::new(move |entity: &E, foreign: &FE| match (local(entity), referenced(foreign)) {
            (Some(a), Some(b)) => F::key_eq(&*a, &*b),
            _ => false,
        })
    }
}

///
/// FindFrom
///

pub struct FindFrom<'s, E, FE> {
    local: FieldInfo,
    referenced: FieldInfo,
    source: &'s [FE],
    matches: Matcher<E, FE>,
}

impl<'s, E, FE> FindFrom<'s, E, FE> {
    /// First foreign entity whose referenced value equals the local value.
    pub fn find(&self, entity: &E) -> Option<&'s FE> {
        self.source.iter().find(|f| (self.matches)(entity, f))
    }

    #[must_use]
    pub const fn local(&self) -> &FieldInfo {
        &self.local
    }

    #[must_use]
    pub const fn referenced(&self) -> &FieldInfo {
        &self.referenced
    }
}

impl<E, FE> fmt::Debug for FindFrom<'_, E, FE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindFrom")
            .field("local", &self.local.identifier)
            .field("referenced", &self.referenced.identifier)
            .field("source_len", &self.source.len())
            .finish_non_exhaustive()
    }
}

///
/// FindBackwards
///

pub struct FindBackwards<'s, E, FE> {
    local: FieldInfo,
    referenced: FieldInfo,
    source: &'s [E],
    matches: Matcher<E, FE>,
}

impl<'s, E, FE> FindBackwards<'s, E, FE> {
    /// Every local entity referencing `foreign`, in source order.
    pub fn find<'f>(&'f self, foreign: &'f FE) -> impl Iterator<Item = &'s E> + 'f {
        self.source.iter().filter(move |e| (self.matches)(e, foreign))
    }

    #[must_use]
    pub const fn local(&self) -> &FieldInfo {
        &self.local
    }

    #[must_use]
    pub const fn referenced(&self) -> &FieldInfo {
        &self.referenced
    }
}

impl<E, FE> fmt::Debug for FindBackwards<'_, E, FE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FindBackwards")
            .field("local", &self.local.identifier)
            .field("referenced", &self.referenced.identifier)
            .field("source_len", &self.source.len())
            .finish_non_exhaustive()
    }
}

///
/// ALIASES
///
/// `E` is the local entity, `FE` the foreign one; stored representations
/// default to the exposed type on both sides.
///

pub type BoolForeignKeyField<E, FE, D = bool, FD = bool> =
    ForeignKeyField<BoolField<E, D>, BoolField<FE, FD>>;
pub type ByteForeignKeyField<E, FE, D = i8, FD = i8> =
    ForeignKeyField<ByteField<E, D>, ByteField<FE, FD>>;
pub type ShortForeignKeyField<E, FE, D = i16, FD = i16> =
    ForeignKeyField<ShortField<E, D>, ShortField<FE, FD>>;
pub type CharForeignKeyField<E, FE, D = char, FD = char> =
    ForeignKeyField<CharField<E, D>, CharField<FE, FD>>;
pub type IntForeignKeyField<E, FE, D = i32, FD = i32> =
    ForeignKeyField<IntField<E, D>, IntField<FE, FD>>;
pub type LongForeignKeyField<E, FE, D = i64, FD = i64> =
    ForeignKeyField<LongField<E, D>, LongField<FE, FD>>;
pub type FloatForeignKeyField<E, FE, D = f32, FD = f32> =
    ForeignKeyField<FloatField<E, D>, FloatField<FE, FD>>;
pub type DoubleForeignKeyField<E, FE, D = f64, FD = f64> =
    ForeignKeyField<DoubleField<E, D>, DoubleField<FE, FD>>;
pub type StringForeignKeyField<E, FE, D = String, FD = String> =
    ForeignKeyField<StringField<E, D>, StringField<FE, FD>>;
pub type ComparableForeignKeyField<E, FE, D, FD, V> =
    ForeignKeyField<ComparableField<E, D, V>, ComparableField<FE, FD, V>>;
pub type EnumForeignKeyField<E, FE, D, FD, V> =
    ForeignKeyField<EnumField<E, D, V>, EnumField<FE, FD, V>>;
