use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// An id-keyed set of values that remembers the order entries were read in.
///
/// The data files are JSON objects whose key order carries meaning (the
/// version catalog is newest-first, collections are listed in game order),
/// so lookups go through a side index while iteration follows the file.
#[derive(Debug, Clone)]
pub struct Collection<T, K = String> {
    entries: Vec<(K, T)>,
    index: HashMap<K, usize>,
}

impl<T, K> Default for Collection<T, K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T, K: Eq + Hash + Clone> Collection<T, K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts `value` under `key`. An existing key keeps its position and
    /// has its value replaced; the old value is returned.
    pub fn insert(&mut self, key: K, value: T) -> Option<T> {
        match self.index.get(&key) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut T>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .map(|&position| &mut self.entries[position].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Builds a new collection with the same keys, in the same order.
    pub fn map_values<U, F: FnMut(&K, &T) -> U>(&self, mut f: F) -> Collection<U, K> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), f(key, value)))
            .collect()
    }
}

impl<T, K> Collection<T, K> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<(&K, &T)> {
        self.entries.first().map(|(key, value)| (key, value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &T)> {
        self.entries.iter().map(|(key, value)| (key, value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn into_entries(self) -> Vec<(K, T)> {
        self.entries
    }
}

impl<T: PartialEq, K: PartialEq> PartialEq for Collection<T, K> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<T, K: Eq + Hash + Clone> FromIterator<(K, T)> for Collection<T, K> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut collection = Self::with_capacity(iter.size_hint().0);
        for (key, value) in iter {
            collection.insert(key, value);
        }
        collection
    }
}

impl<T, K> IntoIterator for Collection<T, K> {
    type Item = (K, T);
    type IntoIter = std::vec::IntoIter<(K, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<T: Serialize, K: Serialize> Serialize for Collection<T, K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct CollectionVisitor<T, K>(PhantomData<(T, K)>);

impl<'de, T, K> Visitor<'de> for CollectionVisitor<T, K>
where
    T: Deserialize<'de>,
    K: Deserialize<'de> + Eq + Hash + Clone,
{
    type Value = Collection<T, K>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object keyed by id")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut collection = Collection::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            collection.insert(key, value);
        }
        Ok(collection)
    }
}

impl<'de, T, K> Deserialize<'de> for Collection<T, K>
where
    T: Deserialize<'de>,
    K: Deserialize<'de> + Eq + Hash + Clone,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CollectionVisitor(PhantomData))
    }
}
