use crate::{
    column::{ColumnIdentifier, TypeMapper},
    expr::ToStrNullable,
    field::{
        Accessor, ComparableField, Field, FieldInfo, HasComparableOperators, HasStringOperators,
    },
    value::Value,
};
use derive_more::Deref;
use fieldkit_config::Config;
use fieldkit_primitives::{CaseFold, MapperOrdering};
use std::{borrow::Cow, fmt};

///
/// StringField
///
/// Nullable text column with the text predicate family. Case-insensitive
/// predicates use the field's fold, Unicode lowercase unless configured.
///

#[derive(Deref)]
pub struct StringField<E, D = String> {
    #[deref]
    inner: ComparableField<E, D, String>,
    case_fold: CaseFold,
}

impl<E, D> Clone for StringField<E, D> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            case_fold: self.case_fold,
        }
    }
}

impl<E, D> fmt::Debug for StringField<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringField")
            .field("inner", &self.inner)
            .field("case_fold", &self.case_fold)
            .finish()
    }
}

impl<E: 'static, D: 'static> StringField<E, D> {
    pub fn create(
        identifier: ColumnIdentifier,
        getter: impl for<'a> Fn(&'a E) -> Option<&'a String> + Send + Sync + 'static,
        setter: impl Fn(&mut E, Option<String>) + Send + Sync + 'static,
        type_mapper: impl TypeMapper<D, String> + 'static,
        unique: bool,
    ) -> Self {
        Self {
            inner: ComparableField::create(identifier, getter, setter, type_mapper, unique),
            case_fold: CaseFold::default(),
        }
    }

    #[must_use]
    pub fn with_case_fold(mut self, case_fold: CaseFold) -> Self {
        self.case_fold = case_fold;
        self
    }

    /// Apply the text section of a loaded configuration.
    #[must_use]
    pub fn with_config(self, config: &Config) -> Self {
        self.with_case_fold(config.case_fold())
    }

    /// The column as a nullable string expression, borrowing from the entity.
    #[must_use]
    pub fn expression(&self) -> ToStrNullable<E> {
        let get = self.inner.borrowed();
        ToStrNullable::from_cow(move |e| {
            get(e).map(|v| match v {
                Cow::Borrowed(s) => Cow::Borrowed(s.as_str()),
                Cow::Owned(s) => Cow::Owned(s),
            })
        })
    }
}

impl<E: 'static, D: 'static> Field<E> for StringField<E, D> {
    fn info(&self) -> &FieldInfo {
        self.inner.info()
    }

    fn mapper_ordering(&self) -> MapperOrdering {
        self.inner.mapper_ordering()
    }

    fn value_of(&self, entity: &E) -> Value {
        self.inner.value_of(entity)
    }
}

impl<E: 'static, D: 'static> HasComparableOperators<E> for StringField<E, D> {
    type Item = String;

    fn accessor(&self) -> Accessor<E, String> {
        self.inner.accessor()
    }
}

impl<E: 'static, D: 'static> HasStringOperators<E> for StringField<E, D> {
    fn case_fold(&self) -> CaseFold {
        self.case_fold
    }
}
