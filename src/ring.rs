use std::fmt;

use crate::{Error, ModuloCounter};

/// A fixed-capacity circular buffer with non-blocking produce and
/// consume.
///
/// Slots are `Option<T>` with `None` as the empty-slot sentinel; two
/// [`ModuloCounter`] cursors chase each other around the slot array.
/// Both `try_put` and `try_get` are O(1) and signal fullness or
/// emptiness through their return value, never by panicking or
/// blocking. The buffer moves between three states: empty
/// (`len == 0`), partial, and full (`len == capacity`).
///
/// This type does no locking; [`BlockingBuffer`](crate::BlockingBuffer)
/// is the shared, blocking wrapper around it.
///
/// # Examples
///
/// ```
/// let mut ring = grove::RingBuffer::new(2).unwrap();
///
/// assert!(ring.try_put('a').is_ok());
/// assert!(ring.try_put('b').is_ok());
/// // full: the rejected item comes back to the caller
/// assert_eq!(ring.try_put('c'), Err('c'));
///
/// assert_eq!(ring.try_get(), Some('a'));
/// assert!(ring.try_put('c').is_ok());
/// assert_eq!(ring.try_get(), Some('b'));
/// assert_eq!(ring.try_get(), Some('c'));
/// assert_eq!(ring.try_get(), None);
/// ```
pub struct RingBuffer<T> {
    slots: Vec<Option<T>>,
    put_cursor: ModuloCounter,
    take_cursor: ModuloCounter,
    len: usize,
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RingBuffer ")?;
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> RingBuffer<T> {
    /// Create a buffer of the given capacity. Zero capacity is an
    /// [`Error::InvalidArgument`].
    pub fn new(capacity: usize) -> Result<RingBuffer<T>, Error> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be positive"));
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(RingBuffer {
            slots,
            put_cursor: ModuloCounter::new(capacity)?,
            take_cursor: ModuloCounter::new(capacity)?,
            len: 0,
        })
    }

    /// Store an item at the put cursor, or hand it back untouched if
    /// the buffer is full.
    pub fn try_put(&mut self, item: T) -> Result<(), T> {
        if self.len == self.slots.len() {
            return Err(item);
        }

        let slot = self.put_cursor.next();
        debug_assert!(self.slots[slot].is_none(), "free slot at the put cursor");
        self.slots[slot] = Some(item);
        self.len += 1;
        Ok(())
    }

    /// Take the oldest item, clearing its slot, or `None` if the
    /// buffer is empty.
    pub fn try_get(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        let slot = self.take_cursor.next();
        let item = self.slots[slot]
            .take()
            .expect("occupied slot at the take cursor");
        self.len -= 1;
        Some(item)
    }

    /// A view of the oldest item without consuming it.
    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        self.slots[self.take_cursor.peek()].as_ref()
    }

    /// The number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// The fixed slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Drop every item and rewind both cursors.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.put_cursor.reset();
        self.take_cursor.reset();
        self.len = 0;
    }

    /// Iterate the occupied slots from oldest to newest.
    pub fn iter(&self) -> RingIter<'_, T> {
        RingIter {
            ring: self,
            offset: 0,
        }
    }
}

impl<T: PartialEq> RingBuffer<T> {
    /// Whether any occupied slot holds an equal item. O(n).
    pub fn contains(&self, item: &T) -> bool {
        self.iter().any(|held| held == item)
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Materialize the occupied slots into a vector, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

/// An oldest-to-newest iterator over a [`RingBuffer`].
pub struct RingIter<'a, T> {
    ring: &'a RingBuffer<T>,
    offset: usize,
}

impl<'a, T> Iterator for RingIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.offset >= self.ring.len {
            return None;
        }

        let capacity = self.ring.slots.len();
        let slot = (self.ring.take_cursor.peek() + self.offset) % capacity;
        self.offset += 1;
        self.ring.slots[slot].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::RingBuffer;
    use crate::Error;

    #[test]
    fn fifo_order_across_wrap() {
        let mut ring = RingBuffer::new(2).unwrap();

        assert!(ring.try_put("a").is_ok());
        assert!(ring.try_put("b").is_ok());
        assert_eq!(ring.try_put("c"), Err("c"));
        assert!(ring.is_full());

        assert_eq!(ring.try_get(), Some("a"));
        assert!(ring.try_put("c").is_ok());
        assert_eq!(ring.try_get(), Some("b"));
        assert_eq!(ring.try_get(), Some("c"));
        assert_eq!(ring.try_get(), None);
        assert!(ring.is_empty());
    }

    #[test]
    fn rejected_put_mutates_nothing() {
        let mut ring = RingBuffer::new(1).unwrap();
        ring.try_put(1).unwrap();

        assert_eq!(ring.try_put(2), Err(2));
        assert_eq!(ring.len(), 1);
        assert_eq!(ring.peek(), Some(&1));
        assert_eq!(ring.try_get(), Some(1));
    }

    #[test]
    fn zero_capacity_is_refused() {
        assert!(matches!(
            RingBuffer::<u8>::new(0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn snapshot_iteration_is_oldest_first() {
        let mut ring = RingBuffer::new(3).unwrap();
        for item in 1..=3 {
            ring.try_put(item).unwrap();
        }
        // wrap the cursors
        ring.try_get();
        ring.try_put(4).unwrap();

        assert_eq!(ring.to_vec(), vec![2, 3, 4]);
        assert_eq!(ring.peek(), Some(&2));
    }

    #[test]
    fn clear_resets_the_cycle() {
        let mut ring = RingBuffer::new(2).unwrap();
        ring.try_put(1).unwrap();
        ring.try_get();
        ring.try_put(2).unwrap();

        ring.clear();
        assert!(ring.is_empty());
        assert_eq!(ring.try_get(), None);

        ring.try_put(3).unwrap();
        assert_eq!(ring.to_vec(), vec![3]);
    }
}
