//! Fixed-capacity byte ring used to buffer random numbers.
//!
//! A [`RingPool`] with `SIZE` slots of backing storage holds at most `SIZE - 1`
//! bytes. Keeping one slot free lets the pool tell full from empty using only
//! its read and write indices:
//!
//! - empty: `write == read`
//! - full: `(write + 1) % SIZE == read`
//! - count: `(write - read) mod SIZE`
//!
//! The pool has exactly one producer and one consumer. Each operation writes
//! the slot first and moves its own index last, so a reader never sees a slot
//! the writer has not committed.

use crate::consts::RAND_POOL_SIZE;
use crate::error::Error;

/// A pool sized for the random number generator (64 usable slots).
pub type RandPool = RingPool<RAND_POOL_SIZE>;

/// A single-producer, single-consumer circular byte queue.
#[derive(Debug, Clone)]
pub struct RingPool<const SIZE: usize> {
    slots: [u8; SIZE],
    write: usize,
    read: usize,
}

impl<const SIZE: usize> Default for RingPool<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const SIZE: usize> RingPool<SIZE> {
    /// Creates an empty, zeroed pool.
    pub const fn new() -> Self {
        Self {
            slots: [0; SIZE],
            write: 0,
            read: 0,
        }
    }

    /// Resets both indices, discarding everything buffered.
    pub fn clear(&mut self) {
        self.write = 0;
        self.read = 0;
    }

    /// Number of bytes the pool can hold.
    pub const fn capacity(&self) -> usize {
        SIZE - 1
    }

    /// Number of bytes currently buffered.
    pub fn len(&self) -> usize {
        (self.write + SIZE - self.read) % SIZE
    }

    /// Whether no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.write == self.read
    }

    /// Whether another [`enqueue`](RingPool::enqueue) would be rejected.
    pub fn is_full(&self) -> bool {
        (self.write + 1) % SIZE == self.read
    }

    /// Appends one byte.
    ///
    /// # Errors
    /// [`Error::PoolFull`] if no slot is free; the buffered bytes are left untouched.
    pub fn enqueue(&mut self, byte: u8) -> Result<(), Error> {
        if self.is_full() {
            return Err(Error::PoolFull);
        }
        self.slots[self.write] = byte;
        self.write = (self.write + 1) % SIZE;
        Ok(())
    }

    /// Removes the oldest byte, if any.
    pub fn dequeue(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let byte = self.slots[self.read];
        self.read = (self.read + 1) % SIZE;
        Some(byte)
    }

    /// Fills `buf` entirely from the pool in FIFO order.
    ///
    /// All or nothing: if fewer than `buf.len()` bytes are buffered, nothing is
    /// consumed and `buf` is left as it was.
    ///
    /// # Returns
    /// - `true`: `buf` now holds the `buf.len()` oldest bytes
    /// - `false`: not enough bytes were available
    pub fn try_take(&mut self, buf: &mut [u8]) -> bool {
        if buf.len() > self.len() {
            return false;
        }
        let mut read = self.read;
        for slot in buf.iter_mut() {
            *slot = self.slots[read];
            read = (read + 1) % SIZE;
        }
        self.read = read;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::RAND_POOL_CAPACITY;

    #[test]
    fn test_pool_initialization_defaults() {
        let pool = RandPool::new();
        assert!(pool.is_empty());
        assert!(!pool.is_full());
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.capacity(), RAND_POOL_CAPACITY);
    }

    #[test]
    fn test_take_returns_oldest_bytes_in_order() {
        let mut pool = RandPool::new();
        for b in 1..=10u8 {
            pool.enqueue(b).unwrap();
        }

        let mut buf = [0u8; 4];
        assert!(pool.try_take(&mut buf));
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(pool.len(), 6);

        let mut rest = [0u8; 6];
        assert!(pool.try_take(&mut rest));
        assert_eq!(rest, [5, 6, 7, 8, 9, 10]);
        assert!(pool.is_empty());
    }

    #[test]
    fn test_take_is_all_or_nothing() {
        let mut pool = RandPool::new();
        pool.enqueue(0xaa).unwrap();
        pool.enqueue(0xbb).unwrap();

        let mut buf = [0x55u8; 3];
        assert!(!pool.try_take(&mut buf));
        assert_eq!(buf, [0x55; 3]);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.dequeue(), Some(0xaa));
    }

    #[test]
    fn test_full_pool_rejects_enqueue() {
        let mut pool = RandPool::new();
        for b in 0..RAND_POOL_CAPACITY {
            pool.enqueue(b as u8).unwrap();
        }
        assert!(pool.is_full());
        assert_eq!(pool.len(), RAND_POOL_CAPACITY);

        assert_eq!(pool.enqueue(0xff), Err(Error::PoolFull));
        assert_eq!(pool.len(), RAND_POOL_CAPACITY);
        // Oldest byte survived the rejected write.
        assert_eq!(pool.dequeue(), Some(0));
    }

    #[test]
    fn test_indices_wrap_around_backing_storage() {
        let mut pool: RingPool<5> = RingPool::new();
        let mut buf = [0u8; 3];
        for round in 0..10u8 {
            for i in 0..3 {
                pool.enqueue(round * 3 + i).unwrap();
            }
            assert!(pool.try_take(&mut buf));
            assert_eq!(buf, [round * 3, round * 3 + 1, round * 3 + 2]);
            assert_eq!(pool.len(), 0);
        }
    }

    #[test]
    fn test_equal_enqueue_dequeue_counts_leave_pool_empty() {
        let mut pool = RandPool::new();
        for b in 0..100u8 {
            pool.enqueue(b).unwrap();
            assert_eq!(pool.dequeue(), Some(b));
        }
        assert_eq!(pool.len(), 0);
        assert_eq!(pool.dequeue(), None);
    }

    #[test]
    fn test_clear_discards_buffered_bytes() {
        let mut pool = RandPool::new();
        pool.enqueue(7).unwrap();
        pool.clear();
        assert!(pool.is_empty());
        let mut buf = [0u8; 1];
        assert!(!pool.try_take(&mut buf));
    }
}
