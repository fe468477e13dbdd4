use std::borrow::Borrow;
use std::fmt;

use crate::OrderedMap;

/// A bidirectional map: unique keys, unique values, queryable from
/// either side in O(log n).
///
/// Internally two [`OrderedMap`]s (forward `K -> V`, inverse `V -> K`)
/// are kept exact inverses of one another. Every mutation updates both
/// or neither, so no partial state is ever observable: an insert that
/// would collide in *either* direction is refused before anything is
/// touched.
///
/// # Examples
///
/// ```
/// let mut names = grove::BiMap::new();
/// assert!(names.insert(1, "one"));
/// assert!(names.insert(2, "two"));
///
/// // a collision on either side blocks the whole insert
/// assert!(!names.insert(1, "eins"));
/// assert!(!names.insert(3, "one"));
/// assert_eq!(names.len(), 2);
///
/// assert_eq!(names.get_by_key(&1), Some(&"one"));
/// assert_eq!(names.get_by_value(&"two"), Some(&2));
/// ```
pub struct BiMap<K, V> {
    forward: OrderedMap<K, V>,
    inverse: OrderedMap<V, K>,
}

impl<K, V> Default for BiMap<K, V> {
    fn default() -> BiMap<K, V> {
        BiMap {
            forward: OrderedMap::new(),
            inverse: OrderedMap::new(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for BiMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BiMap ")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> BiMap<K, V> {
    /// Create an empty bidirectional map.
    pub fn new() -> BiMap<K, V> {
        BiMap::default()
    }

    /// The number of pairs.
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.forward.len(), self.inverse.len());
        self.forward.len()
    }

    /// Whether the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Drop every pair from both directions.
    pub fn clear(&mut self) {
        self.forward.clear();
        self.inverse.clear();
    }

    /// A lazy iterator over `(&K, &V)` pairs, ascending by key.
    pub fn iter(&self) -> crate::Iter<'_, K, V> {
        self.forward.iter()
    }
}

impl<K: Ord + Clone, V: Ord + Clone> BiMap<K, V> {
    /// Insert a pair, returning `true` if neither the key nor the
    /// value was present in its respective direction. On `false`
    /// nothing is mutated.
    ///
    /// This is stricter than two independent maps: presence in either
    /// direction blocks the insertion, and both checks run before any
    /// mutation so the exact-inverse invariant cannot be torn.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        if self.forward.contains_key(&key) || self.inverse.contains_key(&value) {
            return false;
        }

        let fwd = self.forward.insert(key.clone(), value.clone());
        let inv = self.inverse.insert(value, key);
        debug_assert!(fwd && inv, "presence was checked before mutating");
        true
    }

    /// Look up the value for a key.
    pub fn get_by_key<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.forward.get(key)
    }

    /// Look up the key for a value.
    pub fn get_by_value<Q>(&self, value: &Q) -> Option<&K>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inverse.get(value)
    }

    /// Whether the key is present in the forward direction.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.forward.contains_key(key)
    }

    /// Whether the value is present in the inverse direction.
    pub fn contains_value<Q>(&self, value: &Q) -> bool
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.inverse.contains_key(value)
    }

    /// Remove the pair for a key, returning its value. Both internal
    /// maps are updated, or neither when the key is absent.
    ///
    /// # Examples
    /// ```
    /// let mut pairs = grove::BiMap::new();
    /// pairs.insert('a', 1);
    ///
    /// assert_eq!(pairs.remove_by_key(&'a'), Some(1));
    /// assert_eq!(pairs.get_by_value(&1), None);
    /// assert!(pairs.is_empty());
    /// ```
    pub fn remove_by_key<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (_, value) = self.forward.remove_entry(key)?;
        let unlinked = self.inverse.remove(&value);
        debug_assert!(unlinked, "forward and inverse are exact inverses");
        Some(value)
    }

    /// Remove the pair for a value, returning its key. Both internal
    /// maps are updated, or neither when the value is absent.
    pub fn remove_by_value<Q>(&mut self, value: &Q) -> Option<K>
    where
        V: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let (_, key) = self.inverse.remove_entry(value)?;
        let unlinked = self.forward.remove(&key);
        debug_assert!(unlinked, "forward and inverse are exact inverses");
        Some(key)
    }

    /// Materialize the pairs into a vector, ascending by key.
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.forward.to_vec()
    }
}

impl<K: Ord + Clone, V: Ord + Clone> FromIterator<(K, V)> for BiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> BiMap<K, V> {
        let mut map = BiMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}
