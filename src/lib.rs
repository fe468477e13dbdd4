#![cfg_attr(
    test,
    deny(
        missing_docs,
        future_incompatible,
        nonstandard_style,
        rust_2018_idioms,
        trivial_casts,
        trivial_numeric_casts,
        unused_qualifications,
    )
)]
#![cfg_attr(test, deny(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::decimal_literal_representation,
    clippy::doc_markdown,
    clippy::empty_enum,
    clippy::explicit_into_iter_loop,
    clippy::explicit_iter_loop,
    clippy::expl_impl_clone_on_copy,
    clippy::fallible_impl_from,
    clippy::filter_map_next,
    clippy::get_unwrap,
    clippy::map_flatten,
    clippy::match_like_matches_macro,
    clippy::maybe_infinite_iter,
    clippy::mem_forget,
    clippy::mut_mut,
    clippy::needless_borrow,
    clippy::needless_continue,
    clippy::path_buf_push_overwrite,
    clippy::redundant_closure_for_method_calls,
    clippy::shadow_reuse,
    clippy::shadow_same,
    clippy::string_add,
    clippy::string_add_assign,
    clippy::unicode_not_nfc,
    clippy::unimplemented,
    clippy::unseparated_literal_suffix,
    clippy::wildcard_dependencies,
))]

//! Ordered collections backed by an owned AVL tree, plus blocking
//! mutex/condition-variable containers for producer/consumer work.
//!
//! The flagship structure is [`OrderedMap`], a self-balancing binary
//! search tree with O(log n) point operations and a lazy in-order
//! iterator. [`OrderedSet`], [`BiMap`] and [`IndexedMap`] are built on
//! top of it. None of these types lock anything: they are plain owned
//! containers, and `&mut` exclusivity is what makes them safe.
//!
//! For sharing across threads there are two layers:
//!
//! * [`Locked`] wraps any single-threaded container in an
//!   `Arc<Mutex<_>>` and delegates each call under the lock. Iteration
//!   entry points materialize a snapshot while the lock is held, so a
//!   traversal never observes a torn view of the structure.
//! * [`BlockingQueue`], [`BlockingStack`] and [`BlockingBuffer`] add
//!   condition-variable blocking semantics: `put` waits for space on a
//!   bounded container and `get` waits for an element, with every wait
//!   re-checking its predicate in a loop.
//!
//! [`RingBuffer`] is the non-blocking fixed-capacity circular buffer
//! that backs [`BlockingBuffer`], usable on its own when absence is
//! better signaled through return values than through waiting.
//!
//! Within one container instance all operations are linearizable: a
//! single mutex guards every field, so the lock acquisition order is
//! the total order of operations. Nothing here persists, distributes,
//! or retries; those are caller concerns.

#[cfg(not(feature = "fault_injection"))]
#[inline]
pub(crate) const fn debug_delay() {}

/// Induces random jitter inside the blocking primitives' critical
/// paths, shaking out more possible thread interleavings quickly.
/// It gets fully eliminated by the compiler in non-test code.
#[cfg(feature = "fault_injection")]
pub(crate) fn debug_delay() {
    use rand::{thread_rng, Rng};

    if thread_rng().gen_range(0..100) == 0 {
        std::thread::yield_now();
    }
}

mod bimap;
mod blocking;
mod counter;
mod indexed;
mod locked;
mod ring;
mod set;

#[cfg(feature = "serde")]
mod serde;

pub use bimap::BiMap;
pub use blocking::{BlockingBuffer, BlockingQueue, BlockingStack};
pub use counter::{AtomicModuloIndexer, ModuloCounter, OnceFlag};
pub use indexed::IndexedMap;
pub use locked::Locked;
pub use ring::RingBuffer;
pub use set::OrderedSet;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

/// The failure taxonomy shared by every container in this crate.
///
/// Boolean-returning mutators signal "already in the desired state"
/// with `false` rather than an error, so callers can retry without
/// unwinding. `Error` is reserved for genuine contract violations:
/// bad construction arguments, out-of-range indexes, lookups whose
/// contract demands an explicit failure, and operations on state
/// that was never initialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A constructor or operation was handed an argument outside its
    /// domain, such as a zero capacity or an out-of-range index.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A keyed operation whose contract requires an explicit failure
    /// targeted a key that is not present.
    #[error("key not found")]
    KeyNotFound,

    /// A non-blocking read (such as `peek`) found the container empty.
    #[error("container is empty")]
    Empty,

    /// An operation ran against state that requires prior
    /// initialization, or was repeated when it may only happen once.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),
}

type OptNode<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    // height of the subtree rooted here; a leaf has height 1.
    // i8 is plenty: an AVL tree of height 127 would not fit in memory.
    height: i8,
    left: OptNode<K, V>,
    right: OptNode<K, V>,
}

impl<K, V> Node<K, V> {
    fn leaf(key: K, value: V) -> Box<Node<K, V>> {
        Box::new(Node {
            key,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    // positive means left-heavy, negative means right-heavy
    fn balance_factor(&self) -> i8 {
        height(&self.left) - height(&self.right)
    }
}

fn height<K, V>(node: &OptNode<K, V>) -> i8 {
    node.as_ref().map_or(0, |n| n.height)
}

/// Rotation around a left-heavy node: the left child becomes the
/// subtree root. Callers must only rotate a node that has the child
/// the rotation pivots on.
fn rotate_right<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut pivot = root
        .left
        .take()
        .expect("right rotation requires a left child");
    root.left = pivot.right.take();
    root.update_height();
    pivot.right = Some(root);
    pivot.update_height();
    pivot
}

fn rotate_left<K, V>(mut root: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let mut pivot = root
        .right
        .take()
        .expect("left rotation requires a right child");
    root.right = pivot.left.take();
    root.update_height();
    pivot.left = Some(root);
    pivot.update_height();
    pivot
}

/// Recompute this node's height and, if the AVL invariant broke by
/// one insert or remove below it, repair it with the appropriate
/// single or double rotation (LL, RR, LR, RL).
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();
    let bf = node.balance_factor();
    if bf > 1 {
        let left_leans_right = node
            .left
            .as_ref()
            .expect("left-heavy node has a left child")
            .balance_factor()
            < 0;
        if left_leans_right {
            // LR: straighten the kink first
            let left = node.left.take().expect("checked above");
            node.left = Some(rotate_left(left));
        }
        rotate_right(node)
    } else if bf < -1 {
        let right_leans_left = node
            .right
            .as_ref()
            .expect("right-heavy node has a right child")
            .balance_factor()
            > 0;
        if right_leans_left {
            // RL
            let right = node.right.take().expect("checked above");
            node.right = Some(rotate_right(right));
        }
        rotate_left(node)
    } else {
        node
    }
}

fn rebalance_slot<K, V>(slot: &mut OptNode<K, V>) {
    if let Some(node) = slot.take() {
        *slot = Some(rebalance(node));
    }
}

fn insert_node<K: Ord, V>(slot: &mut OptNode<K, V>, key: K, value: V) -> bool {
    let Some(node) = slot else {
        *slot = Some(Node::leaf(key, value));
        return true;
    };

    let inserted = match key.cmp(&node.key) {
        Ordering::Less => insert_node(&mut node.left, key, value),
        Ordering::Greater => insert_node(&mut node.right, key, value),
        Ordering::Equal => false,
    };

    if inserted {
        rebalance_slot(slot);
    }

    inserted
}

/// Unlink the minimum entry of the subtree, rebalancing the unwind
/// path. Used to splice the in-order successor into a removed
/// two-child node.
fn take_min<K, V>(slot: &mut OptNode<K, V>) -> Option<(K, V)> {
    let descend_left = match slot {
        Some(node) => node.left.is_some(),
        None => return None,
    };

    if descend_left {
        let node = slot.as_mut().expect("checked non-empty above");
        let min = take_min(&mut node.left);
        rebalance_slot(slot);
        min
    } else {
        let mut node = slot.take().expect("checked non-empty above");
        *slot = node.right.take();
        Some((node.key, node.value))
    }
}

fn remove_node<K, V, Q>(slot: &mut OptNode<K, V>, key: &Q) -> Option<(K, V)>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
{
    let ordering = match slot {
        Some(node) => key.cmp(node.key.borrow()),
        None => return None,
    };

    if ordering == Ordering::Equal {
        let mut node = slot.take().expect("compared against this node above");
        *slot = match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(lhs), None) => Some(lhs),
            (None, Some(rhs)) => Some(rhs),
            (Some(lhs), Some(rhs)) => {
                let mut right = Some(rhs);
                let (successor_key, successor_value) =
                    take_min(&mut right).expect("two-child node has a right subtree");
                let replacement = Box::new(Node {
                    key: successor_key,
                    value: successor_value,
                    height: 0,
                    left: Some(lhs),
                    right,
                });
                Some(rebalance(replacement))
            }
        };
        return Some((node.key, node.value));
    }

    let node = slot.as_mut().expect("compared against this node above");
    let child = if ordering == Ordering::Less {
        &mut node.left
    } else {
        &mut node.right
    };
    let removed = remove_node(child, key);

    if removed.is_some() {
        rebalance_slot(slot);
    }

    removed
}

/// An ordered map backed by an owned AVL tree.
///
/// Point operations are O(log n) worst case: after every structural
/// change the tree walks back up the modified path, recomputing
/// heights and rotating wherever a node's children differ in height
/// by more than one. In-order iteration yields keys in strictly
/// ascending order and is O(1) to begin.
///
/// This type performs no locking and is not safe for concurrent
/// mutation; in Rust that is not merely a documented precondition but
/// is enforced by `&mut` exclusivity. Wrap it in [`Locked`] to share
/// it between threads.
///
/// # Examples
///
/// ```
/// let mut map = grove::OrderedMap::new();
///
/// // insert declines (returning false) when the key is present
/// assert!(map.insert(1, "one"));
/// assert!(!map.insert(1, "uno"));
/// assert_eq!(map.get(&1), Some(&"one"));
///
/// // replace swaps the value in place, without restructuring
/// assert!(map.replace(&1, "uno"));
/// assert_eq!(map.get(&1), Some(&"uno"));
///
/// // remove reports whether anything came out
/// assert!(map.remove(&1));
/// assert!(!map.remove(&1));
/// ```
pub struct OrderedMap<K, V> {
    root: OptNode<K, V>,
    len: usize,
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> OrderedMap<K, V> {
        OrderedMap { root: None, len: 0 }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OrderedMap ")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> OrderedMap<K, V> {
    /// Create an empty map.
    pub fn new() -> OrderedMap<K, V> {
        OrderedMap::default()
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// A lazy in-order iterator over `(&K, &V)` pairs, ascending by
    /// key. Starting it costs O(log n) to seed the left spine;
    /// exhausting it is O(n). The borrow it holds prevents mutation
    /// for its whole lifetime.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// An ascending iterator over the keys.
    ///
    /// # Examples
    /// ```
    /// let mut map = grove::OrderedMap::new();
    /// for key in [5, 3, 8, 1, 4, 7, 9] {
    ///     map.insert(key, ());
    /// }
    ///
    /// let ascending: Vec<i32> = map.keys().copied().collect();
    /// assert_eq!(ascending, vec![1, 3, 4, 5, 7, 8, 9]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator over the values, ascending by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let mut cursor = self.root.as_deref()?;
        while let Some(left) = cursor.left.as_deref() {
            cursor = left;
        }
        Some((&cursor.key, &cursor.value))
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut cursor = self.root.as_deref()?;
        while let Some(right) = cursor.right.as_deref() {
            cursor = right;
        }
        Some((&cursor.key, &cursor.value))
    }
}

impl<K: Ord, V> OrderedMap<K, V> {
    /// Insert a key-value pair, returning `true` if the key was
    /// absent. A present key leaves the map untouched and returns
    /// `false`; use [`replace`](OrderedMap::replace) to overwrite.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let inserted = insert_node(&mut self.root, key, value);
        if inserted {
            self.len += 1;
        }
        inserted
    }

    /// Look up a value by key.
    ///
    /// # Examples
    /// ```
    /// let mut map = grove::OrderedMap::new();
    /// map.insert("a", 1);
    ///
    /// assert_eq!(map.get("a"), Some(&1));
    /// assert_eq!(map.get("b"), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Look up an entry by key, returning both halves.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cursor = node.left.as_deref(),
                Ordering::Greater => cursor = node.right.as_deref(),
                Ordering::Equal => return Some((&node.key, &node.value)),
            }
        }
        None
    }

    /// A mutable reference to the value for `key`, if present.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => cursor = node.left.as_deref_mut(),
                Ordering::Greater => cursor = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Whether the key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).is_some()
    }

    /// Swap the value for an existing key in place, with no
    /// restructuring. Returns `true` on success and `false` when the
    /// key is absent.
    pub fn replace<Q>(&mut self, key: &Q, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.get_mut(key) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Remove the entry for `key`, returning `true` if it was
    /// present. Two-child nodes are replaced by their in-order
    /// successor, and the tree rebalances along the whole path back
    /// to the root.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).is_some()
    }

    /// Remove the entry for `key`, returning it if it was present.
    ///
    /// # Examples
    /// ```
    /// let mut map = grove::OrderedMap::new();
    /// map.insert(7, "seven");
    ///
    /// assert_eq!(map.remove_entry(&7), Some((7, "seven")));
    /// assert_eq!(map.remove_entry(&7), None);
    /// ```
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let removed = remove_node(&mut self.root, key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Panics if the binary-search-tree ordering, the stored subtree
    /// heights, the AVL balance bound, or the entry count are ever
    /// out of line. Intended for tests and fuzzing harnesses.
    #[doc(hidden)]
    pub fn check_invariants(&self) {
        fn check<K: Ord, V>(node: &Node<K, V>, lo: Option<&K>, hi: Option<&K>) -> (i8, usize) {
            if let Some(lo_key) = lo {
                assert!(*lo_key < node.key, "BST order violated on the left");
            }
            if let Some(hi_key) = hi {
                assert!(node.key < *hi_key, "BST order violated on the right");
            }

            let (left_height, left_count) = node
                .left
                .as_deref()
                .map_or((0, 0), |n| check(n, lo, Some(&node.key)));
            let (right_height, right_count) = node
                .right
                .as_deref()
                .map_or((0, 0), |n| check(n, Some(&node.key), hi));

            assert!(
                (left_height - right_height).abs() <= 1,
                "AVL balance invariant violated"
            );
            let computed = 1 + left_height.max(right_height);
            assert_eq!(computed, node.height, "stored height is stale");

            (computed, 1 + left_count + right_count)
        }

        let counted = self
            .root
            .as_deref()
            .map_or(0, |root| check(root, None, None).1);
        assert_eq!(counted, self.len, "entry count is out of sync");
    }
}

impl<K: Clone, V: Clone> OrderedMap<K, V> {
    /// Materialize the entries into a vector, ascending by key.
    pub fn to_vec(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> OrderedMap<K, V> {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// A lazy in-order traversal of an [`OrderedMap`].
///
/// Holds the left spine of the not-yet-visited portion on an explicit
/// stack, so beginning iteration costs O(log n) pushes and the whole
/// walk is O(n).
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}

/// An ascending iterator over the keys of an [`OrderedMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of an [`OrderedMap`], ascending by key.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;

    #[test]
    fn ascending_traversal_and_balanced_removal() {
        let mut map = OrderedMap::new();
        for key in [5, 3, 8, 1, 4, 7, 9] {
            assert!(map.insert(key, key * 10));
            map.check_invariants();
        }

        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, vec![1, 3, 4, 5, 7, 8, 9]);

        assert!(map.remove(&3));
        map.check_invariants();
        assert!(map.remove(&8));
        map.check_invariants();

        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, vec![1, 4, 5, 7, 9]);
    }

    #[test]
    fn insert_declines_duplicates() {
        let mut map = OrderedMap::new();
        assert!(map.insert(1, "a"));
        assert!(!map.insert(1, "b"));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1), Some(&"a"));
    }

    #[test]
    fn replace_reports_success() {
        // pins the corrected contract: replacing a present key is a
        // success, not a silent false
        let mut map = OrderedMap::new();
        map.insert(1, "a");

        assert!(map.replace(&1, "b"));
        assert_eq!(map.get(&1), Some(&"b"));

        assert!(!map.replace(&2, "c"));
        assert!(!map.contains_key(&2));
        map.check_invariants();
    }

    #[test]
    fn round_trip_leaves_empty() {
        let mut map = OrderedMap::new();
        // a mixed-direction workload: ascending inserts, then removal
        // in an order that exercises both rotations
        for key in 0..512_u32 {
            assert!(map.insert(key, key));
        }
        map.check_invariants();

        for key in (0..512_u32).rev().filter(|k| k % 2 == 1) {
            assert!(map.remove(&key));
            map.check_invariants();
        }
        for key in (0..512_u32).filter(|k| k % 2 == 0) {
            assert!(map.remove(&key));
        }

        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn two_child_removal_splices_successor() {
        let mut map = OrderedMap::new();
        for key in [50, 25, 75, 10, 30, 60, 90, 27, 35] {
            map.insert(key, ());
        }

        // 25 has two children; its successor 27 must take its place
        assert!(map.remove(&25));
        map.check_invariants();

        let keys: Vec<i32> = map.keys().copied().collect();
        assert_eq!(keys, vec![10, 27, 30, 35, 50, 60, 75, 90]);
    }

    #[test]
    fn borrowed_key_queries() {
        let mut map = OrderedMap::new();
        map.insert("alpha".to_string(), 1);
        map.insert("beta".to_string(), 2);

        assert_eq!(map.get("alpha"), Some(&1));
        assert!(map.contains_key("beta"));
        assert!(map.remove("alpha"));
        assert_eq!(map.get("alpha"), None);
    }

    #[test]
    fn first_and_last() {
        let mut map = OrderedMap::new();
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);

        for key in [4, 2, 9, 7] {
            map.insert(key, key);
        }
        assert_eq!(map.first(), Some((&2, &2)));
        assert_eq!(map.last(), Some((&9, &9)));
    }
}
