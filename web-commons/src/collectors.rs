use crate::error::CommonsError;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A map that iterates in insertion order.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Inserts or replaces a value. A replaced key keeps its position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Inserts a value, failing if the key is already present.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), CommonsError>
    where
        K: Debug,
    {
        if self.index.contains_key(&key) {
            return Err(CommonsError::DuplicateKey(format!("{key:?}")));
        }
        self.insert(key, value);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(entry_ref)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

fn entry_ref<K, V>((k, v): &(K, V)) -> (&K, &V) {
    (k, v)
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::iter::Map<std::slice::Iter<'a, (K, V)>, fn(&'a (K, V)) -> (&'a K, &'a V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries
            .iter()
            .map(entry_ref as fn(&'a (K, V)) -> (&'a K, &'a V))
    }
}

/// Collects items into an [`OrderedMap`], failing on the first repeated key
/// instead of overwriting the earlier value.
pub fn to_ordered_map<T, K, V, I, FK, FV>(
    items: I,
    mut key_fn: FK,
    mut value_fn: FV,
) -> Result<OrderedMap<K, V>, CommonsError>
where
    I: IntoIterator<Item = T>,
    K: Hash + Eq + Clone + Debug,
    FK: FnMut(&T) -> K,
    FV: FnMut(&T) -> V,
{
    let mut map = OrderedMap::new();
    for item in items {
        map.try_insert(key_fn(&item), value_fn(&item))?;
    }
    Ok(map)
}

/// Iterator adapter for [`to_ordered_map`]
pub trait CollectOrdered: Iterator + Sized {
    fn try_collect_ordered<K, V, FK, FV>(
        self,
        key_fn: FK,
        value_fn: FV,
    ) -> Result<OrderedMap<K, V>, CommonsError>
    where
        K: Hash + Eq + Clone + Debug,
        FK: FnMut(&Self::Item) -> K,
        FV: FnMut(&Self::Item) -> V,
    {
        to_ordered_map(self, key_fn, value_fn)
    }
}

impl<I: Iterator> CollectOrdered for I {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Column {
        property: &'static str,
        attribute: &'static str,
    }

    fn columns() -> Vec<Column> {
        vec![
            Column { property: "name", attribute: "sortName" },
            Column { property: "createdAt", attribute: "sortCreated" },
            Column { property: "age", attribute: "sortAge" },
        ]
    }

    #[test]
    fn test_preserves_insertion_order() {
        let map = to_ordered_map(columns(), |c| c.property, |c| c.attribute).unwrap();
        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, vec!["name", "createdAt", "age"]);
        assert_eq!(map.get("age"), Some(&"sortAge"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_duplicate_key_fails() {
        let mut items = columns();
        items.push(Column { property: "name", attribute: "other" });

        let result = to_ordered_map(items, |c| c.property, |c| c.attribute);
        match result {
            Err(CommonsError::DuplicateKey(key)) => assert_eq!(key, "\"name\""),
            other => panic!("expected duplicate key error, got {other:?}"),
        }
    }

    #[test]
    fn test_iterator_adapter() {
        let map = (1..=4)
            .try_collect_ordered(|n| n * 10, |n| n.to_string())
            .unwrap();
        let pairs: Vec<_> = map.into_iter().collect();
        assert_eq!(
            pairs,
            vec![
                (10, "1".to_string()),
                (20, "2".to_string()),
                (30, "3".to_string()),
                (40, "4".to_string()),
            ]
        );

        let err = ["a", "b", "a"].iter().try_collect_ordered(|s| **s, |_| ());
        assert!(matches!(err, Err(CommonsError::DuplicateKey(_))));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = OrderedMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.insert("a", 3), Some(1));

        let entries: Vec<_> = (&map).into_iter().collect();
        assert_eq!(entries, vec![(&"a", &3), (&"b", &2)]);
        assert!(map.try_insert("b", 4).is_err());
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn test_empty() {
        let pairs: Vec<(String, u8)> = Vec::new();
        let map = to_ordered_map(pairs, |p| p.0.clone(), |p| p.1).unwrap();
        assert!(map.is_empty());
        assert!(!map.contains_key("x"));
    }
}
