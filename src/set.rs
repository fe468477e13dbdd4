use std::borrow::Borrow;
use std::fmt;

use crate::OrderedMap;

/// An ordered set: an [`OrderedMap`] whose values are `()`.
///
/// Membership operations are O(log n) and iteration is ascending.
/// Like the map it wraps, this type is single-threaded; wrap it in
/// [`Locked`](crate::Locked) to share it.
///
/// # Examples
///
/// ```
/// let mut set = grove::OrderedSet::new();
/// assert!(set.insert(3));
/// assert!(set.insert(1));
/// assert!(!set.insert(3));
///
/// assert!(set.contains(&1));
/// let ascending: Vec<i32> = set.iter().copied().collect();
/// assert_eq!(ascending, vec![1, 3]);
/// ```
pub struct OrderedSet<T> {
    map: OrderedMap<T, ()>,
}

impl<T> Default for OrderedSet<T> {
    fn default() -> OrderedSet<T> {
        OrderedSet {
            map: OrderedMap::new(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OrderedSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderedSet ")?;
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> OrderedSet<T> {
    /// Create an empty set.
    pub fn new() -> OrderedSet<T> {
        OrderedSet::default()
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every member.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// A lazy ascending iterator over the members.
    pub fn iter(&self) -> SetIter<'_, T> {
        SetIter {
            inner: self.map.keys(),
        }
    }

    /// The smallest member.
    pub fn first(&self) -> Option<&T> {
        self.map.first().map(|(k, _)| k)
    }

    /// The largest member.
    pub fn last(&self) -> Option<&T> {
        self.map.last().map(|(k, _)| k)
    }
}

impl<T: Ord> OrderedSet<T> {
    /// Add a member, returning `true` if it was absent.
    pub fn insert(&mut self, member: T) -> bool {
        self.map.insert(member, ())
    }

    /// Whether the member is present.
    pub fn contains<Q>(&self, member: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.contains_key(member)
    }

    /// Remove a member, returning `true` if it was present.
    pub fn remove<Q>(&mut self, member: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.map.remove(member)
    }
}

impl<T: Ord + Clone> OrderedSet<T> {
    /// Grow `self` to the set-theoretic union with `other`.
    ///
    /// Iterates `other` while mutating `self`; the borrow rules make
    /// the two sets necessarily distinct.
    ///
    /// # Examples
    /// ```
    /// let mut a: grove::OrderedSet<i32> = [1, 2].into_iter().collect();
    /// let b: grove::OrderedSet<i32> = [2, 3].into_iter().collect();
    ///
    /// a.union_with(&b);
    /// assert_eq!(a.to_vec(), vec![1, 2, 3]);
    /// ```
    pub fn union_with(&mut self, other: &OrderedSet<T>) {
        for member in other.iter() {
            self.insert(member.clone());
        }
    }

    /// Shrink `self` to the set-theoretic intersection with `other`.
    pub fn intersect_with(&mut self, other: &OrderedSet<T>) {
        let evicted: Vec<T> = self
            .iter()
            .filter(|member| !other.contains(*member))
            .cloned()
            .collect();
        for member in evicted {
            self.remove(&member);
        }
    }

    /// Shrink `self` to the set-theoretic difference `self - other`.
    ///
    /// # Examples
    /// ```
    /// let mut a: grove::OrderedSet<i32> = [1, 2, 3].into_iter().collect();
    /// let b: grove::OrderedSet<i32> = [2].into_iter().collect();
    ///
    /// a.difference_with(&b);
    /// assert_eq!(a.to_vec(), vec![1, 3]);
    /// ```
    pub fn difference_with(&mut self, other: &OrderedSet<T>) {
        for member in other.iter() {
            self.remove(member);
        }
    }

    /// Materialize the members into an ascending vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Ord> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> OrderedSet<T> {
        let mut set = OrderedSet::new();
        for member in iter {
            set.insert(member);
        }
        set
    }
}

impl<T: Ord> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for member in iter {
            self.insert(member);
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> SetIter<'a, T> {
        self.iter()
    }
}

/// A lazy ascending iterator over an [`OrderedSet`].
pub struct SetIter<'a, T> {
    inner: crate::Keys<'a, T, ()>,
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }
}
