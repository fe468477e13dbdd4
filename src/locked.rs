//! A coarse-grained sharing wrapper for the single-threaded
//! containers.
//!
//! [`Locked`] composes `Arc<parking_lot::Mutex<C>>` around any
//! container instead of threading lock awareness through the container
//! types themselves. Cloning the wrapper clones the handle, not the
//! contents, so clones share one container.

use std::borrow::Borrow;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{debug_delay, Error, OrderedMap, OrderedSet};

/// A cloneable, thread-safe handle to a container behind one mutex.
///
/// Every operation takes the lock, acts, and releases it; the lock
/// acquisition is the linearization point. Traversal snapshots the
/// contents into a `Vec` while holding the lock rather than handing
/// out references into guarded state, so a snapshot is immune to
/// concurrent mutation at the cost of a copy.
///
/// # Examples
///
/// ```
/// use grove::{Locked, OrderedMap};
///
/// let shared: Locked<OrderedMap<u64, &str>> = Locked::default();
/// let writer = shared.clone();
///
/// std::thread::spawn(move || writer.insert(1, "one"))
///     .join()
///     .unwrap();
///
/// assert_eq!(shared.get(&1), Some("one"));
/// ```
pub struct Locked<C> {
    inner: Arc<Mutex<C>>,
}

impl<C> Clone for Locked<C> {
    fn clone(&self) -> Locked<C> {
        Locked {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Default> Default for Locked<C> {
    fn default() -> Locked<C> {
        Locked::new(C::default())
    }
}

impl<C> Locked<C> {
    /// Wrap a container for sharing across threads.
    pub fn new(container: C) -> Locked<C> {
        Locked {
            inner: Arc::new(Mutex::new(container)),
        }
    }

    /// Run a closure with exclusive access to the container.
    ///
    /// The escape hatch for multi-step operations that must be one
    /// linearizable unit. The lock is held for the whole closure, so
    /// keep it short and never touch the same `Locked` from inside.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut guard = self.inner.lock();
        debug_delay();
        f(&mut guard)
    }
}

impl<K: Ord + Clone, V: Clone> Locked<OrderedMap<K, V>> {
    /// Insert a binding, returning `true` if the key was absent.
    pub fn insert(&self, key: K, value: V) -> bool {
        self.with(|map| map.insert(key, value))
    }

    /// A copy of the value bound to `key`. Returns an owned clone
    /// because no reference into the container can outlive the lock.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.with(|map| map.get(key).cloned())
    }

    /// Rebind an existing key, failing with [`Error::KeyNotFound`] if
    /// it is absent.
    pub fn replace(&self, key: &K, value: V) -> Result<(), Error> {
        self.with(|map| {
            if map.replace(key, value) {
                Ok(())
            } else {
                Err(Error::KeyNotFound)
            }
        })
    }

    /// Remove a binding, returning `true` if the key was present.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.with(|map| map.remove(key))
    }

    /// Whether the key was bound at the linearization point.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.with(|map| map.contains_key(key))
    }

    /// The number of bindings at the linearization point.
    pub fn len(&self) -> usize {
        self.with(|map| map.len())
    }

    /// Whether the map was empty at the linearization point.
    pub fn is_empty(&self) -> bool {
        self.with(|map| map.is_empty())
    }

    /// Drop every binding.
    pub fn clear(&self) {
        self.with(|map| map.clear());
    }

    /// A snapshot of the keys in ascending order.
    pub fn keys_ascending(&self) -> Vec<K> {
        self.with(|map| map.keys().cloned().collect())
    }

    /// A snapshot of the values in ascending key order.
    pub fn values_ascending(&self) -> Vec<V> {
        self.with(|map| map.values().cloned().collect())
    }

    /// A snapshot of the entries in ascending key order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.with(|map| map.to_vec())
    }
}

impl<T: Ord + Clone> Locked<OrderedSet<T>> {
    /// Add a member, returning `true` if it was absent.
    pub fn insert(&self, member: T) -> bool {
        self.with(|set| set.insert(member))
    }

    /// Whether the member was present at the linearization point.
    pub fn contains<Q>(&self, member: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.with(|set| set.contains(member))
    }

    /// Remove a member, returning `true` if it was present.
    pub fn remove<Q>(&self, member: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.with(|set| set.remove(member))
    }

    /// The number of members at the linearization point.
    pub fn len(&self) -> usize {
        self.with(|set| set.len())
    }

    /// Whether the set was empty at the linearization point.
    pub fn is_empty(&self) -> bool {
        self.with(|set| set.is_empty())
    }

    /// Drop every member.
    pub fn clear(&self) {
        self.with(|set| set.clear());
    }

    /// A snapshot of the members in ascending order.
    pub fn members_ascending(&self) -> Vec<T> {
        self.with(|set| set.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::Locked;
    use crate::{Error, OrderedMap, OrderedSet};

    #[test]
    fn clones_share_one_container() {
        let shared: Locked<OrderedMap<u8, &str>> = Locked::default();
        let other = shared.clone();

        assert!(shared.insert(1, "one"));
        assert_eq!(other.get(&1), Some("one"));
        assert!(other.remove(&1));
        assert!(shared.is_empty());
    }

    #[test]
    fn replace_requires_presence() {
        let shared: Locked<OrderedMap<u8, u8>> = Locked::default();
        assert_eq!(shared.replace(&1, 10), Err(Error::KeyNotFound));

        shared.insert(1, 10);
        assert_eq!(shared.replace(&1, 11), Ok(()));
        assert_eq!(shared.get(&1), Some(11));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn snapshots_are_ascending_and_detached() {
        let shared: Locked<OrderedMap<i32, i32>> = Locked::default();
        for key in [5, 1, 3] {
            shared.insert(key, key * 10);
        }

        let keys = shared.keys_ascending();
        assert_eq!(keys, vec![1, 3, 5]);
        assert_eq!(shared.values_ascending(), vec![10, 30, 50]);
        assert_eq!(shared.entries(), vec![(1, 10), (3, 30), (5, 50)]);

        // mutating after the snapshot does not disturb it
        shared.clear();
        assert_eq!(keys, vec![1, 3, 5]);
    }

    #[test]
    fn with_makes_compound_steps_atomic() {
        let shared: Locked<OrderedMap<u8, u32>> = Locked::default();
        shared.insert(1, 0);

        let bumped = shared.with(|map| {
            let slot = map.get_mut(&1)?;
            *slot += 1;
            Some(*slot)
        });
        assert_eq!(bumped, Some(1));
    }

    #[test]
    fn shared_set_membership() {
        let shared: Locked<OrderedSet<&str>> = Locked::default();
        assert!(shared.insert("a"));
        assert!(shared.insert("b"));
        assert!(!shared.insert("a"));

        assert!(shared.contains("a"));
        assert!(shared.remove("a"));
        assert!(!shared.contains("a"));
        assert_eq!(shared.members_ascending(), vec!["b"]);
    }
}
