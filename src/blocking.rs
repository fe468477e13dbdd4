//! Blocking producer/consumer containers.
//!
//! Each container pairs one `parking_lot::Mutex` around its backing
//! structure with two condition variables: `not_empty`, waited on by
//! consumers, and `not_full`, waited on by producers of bounded
//! variants. Every field is only ever touched under the mutex, so
//! operations on one instance are linearizable in lock acquisition
//! order. Every wait sits in a loop that re-checks its predicate, so
//! spurious wakeups are harmless.
//!
//! No fairness is promised: when several threads are blocked, any one
//! of them may be woken first.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::{debug_delay, Error, RingBuffer};

/// A thread-safe FIFO queue with blocking `put` and `get`.
///
/// Unbounded by default; [`bounded`](BlockingQueue::bounded) adds a
/// capacity at which `put` blocks until a consumer makes room.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// let queue = Arc::new(grove::BlockingQueue::new());
/// let consumer = {
///     let queue = Arc::clone(&queue);
///     std::thread::spawn(move || queue.get())
/// };
///
/// queue.put(42);
/// assert_eq!(consumer.join().unwrap(), 42);
/// ```
pub struct BlockingQueue<T> {
    deque: Mutex<VecDeque<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: Option<usize>,
}

impl<T> Default for BlockingQueue<T> {
    fn default() -> BlockingQueue<T> {
        BlockingQueue::new()
    }
}

impl<T> BlockingQueue<T> {
    /// Create an unbounded queue: `put` never blocks.
    pub fn new() -> BlockingQueue<T> {
        BlockingQueue {
            deque: Mutex::new(VecDeque::new()),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: None,
        }
    }

    /// Create a bounded queue. Zero capacity is an
    /// [`Error::InvalidArgument`].
    pub fn bounded(capacity: usize) -> Result<BlockingQueue<T>, Error> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be positive"));
        }
        Ok(BlockingQueue {
            deque: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: Some(capacity),
        })
    }

    /// Append an item at the tail, waiting for room if the queue is
    /// bounded and full.
    pub fn put(&self, item: T) {
        let mut deque = self.deque.lock();
        if let Some(capacity) = self.capacity {
            while deque.len() >= capacity {
                self.not_full.wait(&mut deque);
            }
        }
        deque.push_back(item);
        debug_delay();
        self.not_empty.notify_one();
    }

    /// Remove and return the head, waiting for an item if the queue
    /// is empty.
    pub fn get(&self) -> T {
        let mut deque = self.deque.lock();
        loop {
            if let Some(item) = deque.pop_front() {
                debug_delay();
                self.not_full.notify_one();
                return item;
            }
            self.not_empty.wait(&mut deque);
        }
    }

    /// Append without blocking, handing the item back if the queue is
    /// full.
    pub fn try_put(&self, item: T) -> Result<(), T> {
        let mut deque = self.deque.lock();
        if let Some(capacity) = self.capacity {
            if deque.len() >= capacity {
                return Err(item);
            }
        }
        deque.push_back(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the head without blocking; `None` when empty.
    pub fn try_get(&self) -> Option<T> {
        let mut deque = self.deque.lock();
        let item = deque.pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Like [`put`](BlockingQueue::put), but give up (returning the
    /// item) if no room appears within `timeout`.
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        let deadline = Instant::now() + timeout;
        let mut deque = self.deque.lock();
        if let Some(capacity) = self.capacity {
            while deque.len() >= capacity {
                let timed_out = self.not_full.wait_until(&mut deque, deadline).timed_out();
                if timed_out && deque.len() >= capacity {
                    return Err(item);
                }
            }
        }
        deque.push_back(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Like [`get`](BlockingQueue::get), but give up (returning
    /// `None`) if no item appears within `timeout`.
    pub fn get_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut deque = self.deque.lock();
        loop {
            if let Some(item) = deque.pop_front() {
                self.not_full.notify_one();
                return Some(item);
            }
            if self.not_empty.wait_until(&mut deque, deadline).timed_out() {
                let item = deque.pop_front();
                if item.is_some() {
                    self.not_full.notify_one();
                }
                return item;
            }
        }
    }

    /// Remove exactly `count` items in FIFO order, waiting whenever
    /// the queue runs dry mid-sequence. The removals between two
    /// waits happen under a single guard, but each wait releases the
    /// lock, so other producers and consumers may interleave there.
    pub fn get_range(&self, count: usize) -> Vec<T> {
        let mut taken = Vec::with_capacity(count);
        let mut deque = self.deque.lock();
        while taken.len() < count {
            match deque.pop_front() {
                Some(item) => {
                    self.not_full.notify_one();
                    taken.push(item);
                }
                None => self.not_empty.wait(&mut deque),
            }
        }
        taken
    }

    /// The number of queued items at the linearization point.
    pub fn len(&self) -> usize {
        self.deque.lock().len()
    }

    /// Whether the queue was empty at the linearization point.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a bounded queue was at capacity at the linearization
    /// point. Unbounded queues are never full.
    pub fn is_full(&self) -> bool {
        match self.capacity {
            Some(capacity) => self.deque.lock().len() >= capacity,
            None => false,
        }
    }

    /// The capacity bound, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Drop every queued item and wake all blocked producers.
    pub fn clear(&self) {
        let mut deque = self.deque.lock();
        deque.clear();
        self.not_full.notify_all();
    }
}

impl<T: PartialEq> BlockingQueue<T> {
    /// Whether an equal item was queued at the linearization point.
    pub fn contains(&self, item: &T) -> bool {
        self.deque.lock().contains(item)
    }
}

impl<T: Clone> BlockingQueue<T> {
    /// A copy of the head without removing it. Never blocks: an empty
    /// queue is an [`Error::Empty`].
    pub fn peek(&self) -> Result<T, Error> {
        self.deque.lock().front().cloned().ok_or(Error::Empty)
    }

    /// A snapshot of the queued items, head first, materialized under
    /// the lock.
    pub fn to_vec(&self) -> Vec<T> {
        self.deque.lock().iter().cloned().collect()
    }
}

/// A thread-safe LIFO stack with blocking `put` and `get`.
///
/// The same locking discipline as [`BlockingQueue`], with the top of
/// a `Vec` as the hot end.
pub struct BlockingStack<T> {
    items: Mutex<Vec<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: Option<usize>,
}

impl<T> Default for BlockingStack<T> {
    fn default() -> BlockingStack<T> {
        BlockingStack::new()
    }
}

impl<T> BlockingStack<T> {
    /// Create an unbounded stack: `put` never blocks.
    pub fn new() -> BlockingStack<T> {
        BlockingStack {
            items: Mutex::new(Vec::new()),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: None,
        }
    }

    /// Create a bounded stack. Zero capacity is an
    /// [`Error::InvalidArgument`].
    pub fn bounded(capacity: usize) -> Result<BlockingStack<T>, Error> {
        if capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be positive"));
        }
        Ok(BlockingStack {
            items: Mutex::new(Vec::with_capacity(capacity)),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity: Some(capacity),
        })
    }

    /// Push onto the top, waiting for room if the stack is bounded
    /// and full.
    pub fn put(&self, item: T) {
        let mut items = self.items.lock();
        if let Some(capacity) = self.capacity {
            while items.len() >= capacity {
                self.not_full.wait(&mut items);
            }
        }
        items.push(item);
        debug_delay();
        self.not_empty.notify_one();
    }

    /// Pop the top, waiting for an item if the stack is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// let stack = grove::BlockingStack::new();
    /// stack.put(1);
    /// stack.put(2);
    ///
    /// // most recent first
    /// assert_eq!(stack.get(), 2);
    /// assert_eq!(stack.get(), 1);
    /// ```
    pub fn get(&self) -> T {
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop() {
                debug_delay();
                self.not_full.notify_one();
                return item;
            }
            self.not_empty.wait(&mut items);
        }
    }

    /// Push without blocking, handing the item back if the stack is
    /// full.
    pub fn try_put(&self, item: T) -> Result<(), T> {
        let mut items = self.items.lock();
        if let Some(capacity) = self.capacity {
            if items.len() >= capacity {
                return Err(item);
            }
        }
        items.push(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Pop the top without blocking; `None` when empty.
    pub fn try_get(&self) -> Option<T> {
        let mut items = self.items.lock();
        let item = items.pop();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Like [`put`](BlockingStack::put), but give up (returning the
    /// item) if no room appears within `timeout`.
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        let deadline = Instant::now() + timeout;
        let mut items = self.items.lock();
        if let Some(capacity) = self.capacity {
            while items.len() >= capacity {
                let timed_out = self.not_full.wait_until(&mut items, deadline).timed_out();
                if timed_out && items.len() >= capacity {
                    return Err(item);
                }
            }
        }
        items.push(item);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Like [`get`](BlockingStack::get), but give up (returning
    /// `None`) if no item appears within `timeout`.
    pub fn get_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut items = self.items.lock();
        loop {
            if let Some(item) = items.pop() {
                self.not_full.notify_one();
                return Some(item);
            }
            if self.not_empty.wait_until(&mut items, deadline).timed_out() {
                let item = items.pop();
                if item.is_some() {
                    self.not_full.notify_one();
                }
                return item;
            }
        }
    }

    /// Pop exactly `count` items in LIFO order, waiting whenever the
    /// stack runs dry mid-sequence. Each wait releases the lock, so
    /// other producers and consumers may interleave there.
    pub fn get_range(&self, count: usize) -> Vec<T> {
        let mut taken = Vec::with_capacity(count);
        let mut items = self.items.lock();
        while taken.len() < count {
            match items.pop() {
                Some(item) => {
                    self.not_full.notify_one();
                    taken.push(item);
                }
                None => self.not_empty.wait(&mut items),
            }
        }
        taken
    }

    /// The number of stacked items at the linearization point.
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether the stack was empty at the linearization point.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a bounded stack was at capacity at the linearization
    /// point. Unbounded stacks are never full.
    pub fn is_full(&self) -> bool {
        match self.capacity {
            Some(capacity) => self.items.lock().len() >= capacity,
            None => false,
        }
    }

    /// The capacity bound, if any.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Drop every stacked item and wake all blocked producers.
    pub fn clear(&self) {
        let mut items = self.items.lock();
        items.clear();
        self.not_full.notify_all();
    }
}

impl<T: PartialEq> BlockingStack<T> {
    /// Whether an equal item was stacked at the linearization point.
    pub fn contains(&self, item: &T) -> bool {
        self.items.lock().contains(item)
    }
}

impl<T: Clone> BlockingStack<T> {
    /// A copy of the top without removing it. Never blocks: an empty
    /// stack is an [`Error::Empty`].
    pub fn peek(&self) -> Result<T, Error> {
        self.items.lock().last().cloned().ok_or(Error::Empty)
    }

    /// A snapshot of the stacked items, top first, materialized under
    /// the lock.
    pub fn to_vec(&self) -> Vec<T> {
        self.items.lock().iter().rev().cloned().collect()
    }
}

/// A thread-safe bounded circular buffer with blocking `put` and
/// `get`.
///
/// The backing [`RingBuffer`] provides the non-blocking O(1) slot
/// mechanics; this wrapper adds the mutex and the two condition
/// variables. Always bounded, unlike the queue and stack.
///
/// # Examples
///
/// ```
/// let buffer = grove::BlockingBuffer::new(2).unwrap();
/// buffer.put('a');
/// buffer.put('b');
///
/// assert_eq!(buffer.try_put('c'), Err('c'));
/// assert_eq!(buffer.get(), 'a');
/// ```
pub struct BlockingBuffer<T> {
    ring: Mutex<RingBuffer<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl<T> BlockingBuffer<T> {
    /// Create a buffer of the given capacity. Zero capacity is an
    /// [`Error::InvalidArgument`].
    pub fn new(capacity: usize) -> Result<BlockingBuffer<T>, Error> {
        Ok(BlockingBuffer {
            ring: Mutex::new(RingBuffer::new(capacity)?),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        })
    }

    /// Store an item, waiting for a free slot while the buffer is
    /// full.
    pub fn put(&self, item: T) {
        let mut ring = self.ring.lock();
        let mut pending = item;
        loop {
            match ring.try_put(pending) {
                Ok(()) => {
                    debug_delay();
                    self.not_empty.notify_one();
                    return;
                }
                Err(rejected) => {
                    pending = rejected;
                    self.not_full.wait(&mut ring);
                }
            }
        }
    }

    /// Take the oldest item, waiting while the buffer is empty.
    pub fn get(&self) -> T {
        let mut ring = self.ring.lock();
        loop {
            if let Some(item) = ring.try_get() {
                debug_delay();
                self.not_full.notify_one();
                return item;
            }
            self.not_empty.wait(&mut ring);
        }
    }

    /// Store without blocking, handing the item back if the buffer is
    /// full.
    pub fn try_put(&self, item: T) -> Result<(), T> {
        let mut ring = self.ring.lock();
        ring.try_put(item).map(|()| {
            self.not_empty.notify_one();
        })
    }

    /// Take the oldest item without blocking; `None` when empty.
    pub fn try_get(&self) -> Option<T> {
        let mut ring = self.ring.lock();
        let item = ring.try_get();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Like [`put`](BlockingBuffer::put), but give up (returning the
    /// item) if no slot frees up within `timeout`.
    pub fn put_timeout(&self, item: T, timeout: Duration) -> Result<(), T> {
        let deadline = Instant::now() + timeout;
        let mut ring = self.ring.lock();
        let mut pending = item;
        loop {
            match ring.try_put(pending) {
                Ok(()) => {
                    self.not_empty.notify_one();
                    return Ok(());
                }
                Err(rejected) => {
                    pending = rejected;
                    let timed_out = self.not_full.wait_until(&mut ring, deadline).timed_out();
                    if timed_out && ring.is_full() {
                        return Err(pending);
                    }
                }
            }
        }
    }

    /// Like [`get`](BlockingBuffer::get), but give up (returning
    /// `None`) if no item appears within `timeout`.
    pub fn get_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut ring = self.ring.lock();
        loop {
            if let Some(item) = ring.try_get() {
                self.not_full.notify_one();
                return Some(item);
            }
            if self.not_empty.wait_until(&mut ring, deadline).timed_out() {
                let item = ring.try_get();
                if item.is_some() {
                    self.not_full.notify_one();
                }
                return item;
            }
        }
    }

    /// Take exactly `count` items in FIFO order, waiting whenever
    /// the buffer runs dry mid-sequence. Each wait releases the
    /// lock, so other producers and consumers may interleave there.
    pub fn get_range(&self, count: usize) -> Vec<T> {
        let mut taken = Vec::with_capacity(count);
        let mut ring = self.ring.lock();
        while taken.len() < count {
            match ring.try_get() {
                Some(item) => {
                    self.not_full.notify_one();
                    taken.push(item);
                }
                None => self.not_empty.wait(&mut ring),
            }
        }
        taken
    }

    /// The number of buffered items at the linearization point.
    pub fn len(&self) -> usize {
        self.ring.lock().len()
    }

    /// Whether the buffer was empty at the linearization point.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the buffer was at capacity at the linearization point.
    pub fn is_full(&self) -> bool {
        self.ring.lock().is_full()
    }

    /// The fixed slot count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drop every buffered item and wake all blocked producers.
    pub fn clear(&self) {
        let mut ring = self.ring.lock();
        ring.clear();
        self.not_full.notify_all();
    }
}

impl<T: PartialEq> BlockingBuffer<T> {
    /// Whether an equal item was buffered at the linearization point.
    pub fn contains(&self, item: &T) -> bool {
        self.ring.lock().contains(item)
    }
}

impl<T: Clone> BlockingBuffer<T> {
    /// A copy of the oldest item without consuming it. Never blocks:
    /// an empty buffer is an [`Error::Empty`].
    pub fn peek(&self) -> Result<T, Error> {
        self.ring.lock().peek().cloned().ok_or(Error::Empty)
    }

    /// A snapshot of the buffered items, oldest first, materialized
    /// under the lock.
    pub fn to_vec(&self) -> Vec<T> {
        self.ring.lock().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::{BlockingBuffer, BlockingQueue, BlockingStack};
    use crate::Error;
    use std::time::Duration;

    #[test]
    fn queue_is_fifo() {
        let queue = BlockingQueue::new();
        queue.put(1);
        queue.put(2);
        queue.put(3);

        assert_eq!(queue.peek(), Ok(1));
        assert_eq!(queue.get(), 1);
        assert_eq!(queue.get_range(2), vec![2, 3]);
        assert!(queue.is_empty());
        assert_eq!(queue.peek(), Err(Error::Empty));
    }

    #[test]
    fn stack_is_lifo() {
        let stack = BlockingStack::new();
        stack.put(1);
        stack.put(2);
        stack.put(3);

        assert_eq!(stack.peek(), Ok(3));
        assert_eq!(stack.get(), 3);
        assert_eq!(stack.get_range(2), vec![2, 1]);
        assert_eq!(stack.try_get(), None);
    }

    #[test]
    fn bounded_try_put_fills_up() {
        let queue = BlockingQueue::bounded(2).unwrap();
        assert!(queue.try_put(1).is_ok());
        assert!(queue.try_put(2).is_ok());
        assert!(queue.is_full());
        assert_eq!(queue.try_put(3), Err(3));

        assert_eq!(queue.try_get(), Some(1));
        assert!(queue.try_put(3).is_ok());
    }

    #[test]
    fn zero_capacity_is_refused() {
        assert!(BlockingQueue::<u8>::bounded(0).is_err());
        assert!(BlockingStack::<u8>::bounded(0).is_err());
        assert!(BlockingBuffer::<u8>::new(0).is_err());
    }

    #[test]
    fn get_timeout_expires_on_empty() {
        let queue: BlockingQueue<u8> = BlockingQueue::new();
        assert_eq!(queue.get_timeout(Duration::from_millis(10)), None);

        let stack: BlockingStack<u8> = BlockingStack::new();
        assert_eq!(stack.get_timeout(Duration::from_millis(10)), None);

        let buffer: BlockingBuffer<u8> = BlockingBuffer::new(1).unwrap();
        assert_eq!(buffer.get_timeout(Duration::from_millis(10)), None);
    }

    #[test]
    fn put_timeout_expires_on_full() {
        let queue = BlockingQueue::bounded(1).unwrap();
        queue.put(1);
        assert_eq!(queue.put_timeout(2, Duration::from_millis(10)), Err(2));

        queue.clear();
        assert_eq!(queue.put_timeout(3, Duration::from_millis(10)), Ok(()));
        assert_eq!(queue.get(), 3);
    }

    #[test]
    fn stack_put_timeout_expires_on_full() {
        let stack = BlockingStack::bounded(1).unwrap();
        stack.put(1);
        assert!(stack.is_full());
        assert_eq!(stack.put_timeout(2, Duration::from_millis(10)), Err(2));

        assert_eq!(stack.get(), 1);
        assert!(!stack.is_full());
        assert_eq!(stack.put_timeout(3, Duration::from_millis(10)), Ok(()));
        assert_eq!(stack.get(), 3);
    }

    #[test]
    fn buffer_put_timeout_expires_on_full() {
        let buffer = BlockingBuffer::new(1).unwrap();
        buffer.put(1);
        assert_eq!(buffer.put_timeout(2, Duration::from_millis(10)), Err(2));

        buffer.clear();
        assert_eq!(buffer.put_timeout(3, Duration::from_millis(10)), Ok(()));
        assert_eq!(buffer.get(), 3);
    }

    #[test]
    fn unbounded_stack_is_never_full() {
        let stack = BlockingStack::new();
        for i in 0..64 {
            stack.put(i);
        }
        assert!(!stack.is_full());
        assert_eq!(stack.put_timeout(64, Duration::from_millis(10)), Ok(()));
    }

    #[test]
    fn buffer_snapshot_and_peek() {
        let buffer = BlockingBuffer::new(3).unwrap();
        buffer.put("a");
        buffer.put("b");

        assert_eq!(buffer.peek(), Ok("a"));
        assert_eq!(buffer.to_vec(), vec!["a", "b"]);
        assert_eq!(buffer.len(), 2);

        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.peek(), Err(Error::Empty));
    }

    #[test]
    fn get_range_of_zero_is_empty() {
        let queue: BlockingQueue<u8> = BlockingQueue::new();
        assert_eq!(queue.get_range(0), Vec::<u8>::new());
    }
}
