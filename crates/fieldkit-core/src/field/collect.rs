//! Keyed collection of entities by a field's current value.
//!
//! Keys are the field's [`Value`], so absent columns collect under
//! `Value::Null` like any other key.

use crate::{error::Error, field::Field, value::Value};
use std::collections::{BTreeMap, btree_map::Entry};

/// Collect `entities` keyed by `field`. A repeated key is an error.
pub fn to_map<E, F>(
    field: &F,
    entities: impl IntoIterator<Item = E>,
) -> Result<BTreeMap<Value, E>, Error>
where
    F: Field<E> + ?Sized,
{
    let mut map = BTreeMap::new();

    for entity in entities {
        match map.entry(field.value_of(&entity)) {
            Entry::Vacant(slot) => {
                slot.insert(entity);
            }
            Entry::Occupied(slot) => {
                log::debug!("duplicate key {} on {}", slot.key(), field.identifier());
                return Err(Error::duplicate_key(slot.key().to_string()));
            }
        }
    }

    Ok(map)
}

/// Collect `entities` keyed by `field`, resolving repeated keys with `merge`
/// applied as `merge(existing, incoming)`.
pub fn to_map_merging<E, F>(
    field: &F,
    entities: impl IntoIterator<Item = E>,
    mut merge: impl FnMut(E, E) -> E,
) -> BTreeMap<Value, E>
where
    F: Field<E> + ?Sized,
{
    let mut map: BTreeMap<Value, E> = BTreeMap::new();

    for entity in entities {
        let key = field.value_of(&entity);
        let merged = match map.remove(&key) {
            Some(existing) => merge(existing, entity),
            None => entity,
        };
        map.insert(key, merged);
    }

    map
}

/// Group `entities` by `field`, keeping encounter order within a group.
pub fn group_by<E, F>(field: &F, entities: impl IntoIterator<Item = E>) -> BTreeMap<Value, Vec<E>>
where
    F: Field<E> + ?Sized,
{
    let mut groups: BTreeMap<Value, Vec<E>> = BTreeMap::new();

    for entity in entities {
        groups.entry(field.value_of(&entity)).or_default().push(entity);
    }

    groups
}
