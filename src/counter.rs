use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

use crate::Error;

/// A wrap-around counter over the range `0..modulus`.
///
/// `next` hands out the current value and advances, returning to zero
/// after `modulus - 1`. This is the cursor arithmetic behind
/// [`RingBuffer`](crate::RingBuffer), exposed on its own for callers
/// that need round-robin index generation without sharing.
///
/// # Examples
///
/// ```
/// let mut counter = grove::ModuloCounter::new(3).unwrap();
/// assert_eq!(counter.next(), 0);
/// assert_eq!(counter.next(), 1);
/// assert_eq!(counter.next(), 2);
/// assert_eq!(counter.next(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct ModuloCounter {
    value: usize,
    modulus: usize,
}

impl ModuloCounter {
    /// Create a counter cycling through `0..modulus`. A zero modulus
    /// has no representable values and is refused.
    pub fn new(modulus: usize) -> Result<ModuloCounter, Error> {
        if modulus == 0 {
            return Err(Error::InvalidArgument("modulus must be positive"));
        }
        Ok(ModuloCounter { value: 0, modulus })
    }

    /// The current value, then advance modulo the modulus.
    pub fn next(&mut self) -> usize {
        let current = self.value;
        self.value = (current + 1) % self.modulus;
        current
    }

    /// The value `next` would return, without advancing.
    pub fn peek(&self) -> usize {
        self.value
    }

    /// Rewind to zero.
    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// The exclusive upper bound of the cycle.
    pub fn modulus(&self) -> usize {
        self.modulus
    }
}

/// The shared-state sibling of [`ModuloCounter`]: a lock-free
/// wrap-around index generator.
///
/// `next` is a single atomic read-modify-write, so any number of
/// threads can draw indexes concurrently; each value in the cycle is
/// handed out exactly once per revolution.
///
/// # Examples
///
/// ```
/// let indexer = grove::AtomicModuloIndexer::new(4).unwrap();
/// let drawn: Vec<usize> = (0..6).map(|_| indexer.next()).collect();
/// assert_eq!(drawn, vec![0, 1, 2, 3, 0, 1]);
/// ```
#[derive(Debug)]
pub struct AtomicModuloIndexer {
    value: AtomicUsize,
    modulus: usize,
}

impl AtomicModuloIndexer {
    /// Create an indexer cycling through `0..modulus`.
    pub fn new(modulus: usize) -> Result<AtomicModuloIndexer, Error> {
        if modulus == 0 {
            return Err(Error::InvalidArgument("modulus must be positive"));
        }
        Ok(AtomicModuloIndexer {
            value: AtomicUsize::new(0),
            modulus,
        })
    }

    /// Atomically take the current value and advance modulo the
    /// modulus.
    pub fn next(&self) -> usize {
        // the closure never returns None, so fetch_update cannot fail
        self.value
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |v| {
                Some((v + 1) % self.modulus)
            })
            .unwrap_or_else(|v| v)
    }

    /// The exclusive upper bound of the cycle.
    pub fn modulus(&self) -> usize {
        self.modulus
    }
}

const UNINITIALIZED: u8 = 0;
const INITIALIZED: u8 = 1;

/// A one-shot initialization guard: an explicit
/// {uninitialized, initialized} state machine behind an atomic
/// compare-and-swap, instead of an ambient global flag.
///
/// # Examples
///
/// ```
/// let flag = grove::OnceFlag::new();
/// assert!(flag.require_initialized().is_err());
///
/// assert!(flag.initialize_once());
/// assert!(!flag.initialize_once());
/// assert!(flag.require_initialized().is_ok());
/// ```
#[derive(Debug, Default)]
pub struct OnceFlag {
    state: AtomicU8,
}

impl OnceFlag {
    /// A flag in the uninitialized state.
    pub fn new() -> OnceFlag {
        OnceFlag {
            state: AtomicU8::new(UNINITIALIZED),
        }
    }

    /// Transition to initialized. Only the first caller ever observes
    /// `true`; every later call is a no-op returning `false`.
    pub fn initialize_once(&self) -> bool {
        self.state
            .compare_exchange(
                UNINITIALIZED,
                INITIALIZED,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Whether initialization has happened.
    pub fn is_initialized(&self) -> bool {
        self.state.load(Ordering::Acquire) == INITIALIZED
    }

    /// Fail with [`Error::IllegalState`] unless initialization has
    /// happened.
    pub fn require_initialized(&self) -> Result<(), Error> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(Error::IllegalState("not initialized"))
        }
    }
}
