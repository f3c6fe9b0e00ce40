use std::cmp::Ordering;
use std::hash::Hash;

use itertools::Itertools;

use crate::data::Collection;
use crate::objects::ParseObject;

/// `(id, record)` pair as produced by [`prepare_list`].
pub type ListEntry<'a, T> = (&'a str, &'a T);

/// Lists a collection's entries in file order, keeping only production-ready
/// records when `prod_ready_only` is set.
pub fn prepare_list<T: ParseObject>(
    objects: &Collection<T>,
    prod_ready_only: bool,
) -> Vec<ListEntry<'_, T>> {
    objects
        .iter()
        .filter(|(_, object)| !prod_ready_only || object.is_production_ready())
        .map(|(id, object)| (id.as_str(), object))
        .collect()
}

/// [`prepare_list`] followed by a stable sort with `compare`.
pub fn prepare_list_by<'a, T, F>(
    objects: &'a Collection<T>,
    prod_ready_only: bool,
    mut compare: F,
) -> Vec<ListEntry<'a, T>>
where
    T: ParseObject,
    F: FnMut(&ListEntry<'a, T>, &ListEntry<'a, T>) -> Ordering,
{
    prepare_list(objects, prod_ready_only)
        .into_iter()
        .sorted_by(|a, b| compare(a, b))
        .collect()
}

/// Partitions `items` by `key`. Groups appear in the order their first item
/// does, and items keep their relative order within a group.
pub fn group_by<I, K, F>(items: impl IntoIterator<Item = I>, mut key: F) -> Collection<Vec<I>, K>
where
    K: Eq + Hash + Clone,
    F: FnMut(&I) -> K,
{
    let mut groups: Collection<Vec<I>, K> = Collection::new();
    for item in items {
        let group_key = key(&item);
        match groups.get_mut(&group_key) {
            Some(group) => group.push(item),
            None => {
                groups.insert(group_key, vec![item]);
            }
        }
    }
    groups
}

/// Orders groups by key.
pub fn sort_groups<I, K: Ord>(groups: Collection<Vec<I>, K>) -> Vec<(K, Vec<I>)> {
    sort_groups_by(groups, K::cmp)
}

/// Orders groups with `compare` applied to their keys.
pub fn sort_groups_by<I, K, F>(groups: Collection<Vec<I>, K>, mut compare: F) -> Vec<(K, Vec<I>)>
where
    F: FnMut(&K, &K) -> Ordering,
{
    groups
        .into_entries()
        .into_iter()
        .sorted_by(|(a, _), (b, _)| compare(a, b))
        .collect()
}
