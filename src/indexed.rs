use std::borrow::Borrow;
use std::fmt;
use std::slice;

use crate::{Error, OrderedMap};

/// A map with O(1) positional access: an insertion-ordered sequence
/// of `(K, V)` entries paired with an [`OrderedMap`] from key to
/// position.
///
/// The sequence and the index always contain exactly the same key
/// set; sequence order is insertion order, not key order. Keyed
/// lookups cost O(log n) for the position plus O(1) for the entry.
/// Removal is the expensive operation here: it is O(n) because every
/// later entry shifts down one position.
///
/// # Examples
///
/// ```
/// let mut log = grove::IndexedMap::new();
/// assert!(log.insert("first", 10));
/// assert!(log.insert("second", 20));
/// assert!(!log.insert("first", 99));
///
/// assert_eq!(log.get_at(0).unwrap(), (&"first", &10));
/// assert_eq!(log.get(&"second"), Some(&20));
/// assert_eq!(log.index_of(&"second"), Some(1));
/// ```
pub struct IndexedMap<K, V> {
    entries: Vec<(K, V)>,
    index: OrderedMap<K, usize>,
}

impl<K, V> Default for IndexedMap<K, V> {
    fn default() -> IndexedMap<K, V> {
        IndexedMap {
            entries: Vec::new(),
            index: OrderedMap::new(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IndexedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IndexedMap ")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K, V> IndexedMap<K, V> {
    /// Create an empty indexed map.
    pub fn new() -> IndexedMap<K, V> {
        IndexedMap::default()
    }

    /// The number of entries.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.entries.len(), self.index.len());
        self.entries.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// The entry at `position`, in O(1). An out-of-range position is
    /// an [`Error::InvalidArgument`], not a panic.
    pub fn get_at(&self, position: usize) -> Result<(&K, &V), Error> {
        self.entries
            .get(position)
            .map(|(k, v)| (k, v))
            .ok_or(Error::InvalidArgument("position is out of range"))
    }

    /// Iterate the entries in insertion order.
    pub fn iter(&self) -> IndexedIter<'_, K, V> {
        IndexedIter {
            inner: self.entries.iter(),
        }
    }
}

impl<K: Ord + Clone, V> IndexedMap<K, V> {
    /// Append an entry, returning `true` if the key was absent. A
    /// duplicate key fails the whole operation without touching the
    /// sequence.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if !self.index.insert(key.clone(), self.entries.len()) {
            return false;
        }
        self.entries.push((key, value));
        true
    }

    /// Look up a value by key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = *self.index.get(key)?;
        self.entries.get(position).map(|(_, v)| v)
    }

    /// The insertion position of `key`, if present.
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.get(key).copied()
    }

    /// Whether the key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Remove the entry for `key`, returning its value. O(n): every
    /// entry inserted after it shifts down one position, and the
    /// index is rewritten to match.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (_, position) = self.index.remove_entry(key)?;
        let (_, value) = self.entries.remove(position);

        for (shifted_key, _) in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut::<K>(shifted_key) {
                *slot -= 1;
            }
        }

        Some(value)
    }
}

impl<K: Clone, V: Clone> IndexedMap<K, V> {
    /// Materialize the entries into a vector, in insertion order.
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.entries.to_vec()
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for IndexedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> IndexedMap<K, V> {
        let mut map = IndexedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// An insertion-order iterator over an [`IndexedMap`].
pub struct IndexedIter<'a, K, V> {
    inner: slice::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IndexedIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::IndexedMap;
    use crate::Error;

    #[test]
    fn positional_access() {
        let mut map = IndexedMap::new();
        assert!(map.insert("b", 2));
        assert!(map.insert("a", 1));
        assert!(map.insert("c", 3));

        // insertion order, not key order
        assert_eq!(map.get_at(0).unwrap(), (&"b", &2));
        assert_eq!(map.get_at(2).unwrap(), (&"c", &3));
        assert_eq!(
            map.get_at(3),
            Err(Error::InvalidArgument("position is out of range"))
        );
    }

    #[test]
    fn duplicate_key_leaves_sequence_untouched() {
        let mut map = IndexedMap::new();
        map.insert("a", 1);
        assert!(!map.insert("a", 99));

        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&"a"), Some(&1));
        assert_eq!(map.get_at(0).unwrap(), (&"a", &1));
    }

    #[test]
    fn removal_reindexes_later_entries() {
        let mut map: IndexedMap<&str, i32> =
            [("a", 1), ("b", 2), ("c", 3), ("d", 4)].into_iter().collect();

        assert_eq!(map.remove(&"b"), Some(2));
        assert_eq!(map.remove(&"b"), None);

        assert_eq!(map.index_of(&"a"), Some(0));
        assert_eq!(map.index_of(&"c"), Some(1));
        assert_eq!(map.index_of(&"d"), Some(2));
        assert_eq!(map.get_at(1).unwrap(), (&"c", &3));
        assert_eq!(map.get(&"d"), Some(&4));
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let map: IndexedMap<i32, i32> = [(5, 50), (1, 10), (3, 30)].into_iter().collect();
        let keys: Vec<i32> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![5, 1, 3]);
    }
}
