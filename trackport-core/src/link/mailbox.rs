//! Bounded FIFO between the receiver interrupt and the main loop

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

/// Received bytes the main loop has not consumed yet
///
/// A full report plus command replies fits several times over; anything
/// beyond that means the loop has stalled and bytes are dropped.
pub const MAILBOX_CAPACITY: usize = 16;

struct Inner {
    queue: Deque<u8, MAILBOX_CAPACITY>,
    dropped: u32,
}

/// Single-producer single-consumer byte queue
///
/// Every access runs inside a critical section, so the interrupt side and
/// the loop side can share one static instance.
pub struct Mailbox {
    inner: Mutex<RefCell<Inner>>,
}

impl Mailbox {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Inner {
                queue: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Append a byte; returns `false` and counts a drop when full
    pub fn push(&self, byte: u8) -> bool {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            if inner.queue.push_back(byte).is_ok() {
                true
            } else {
                inner.dropped = inner.dropped.wrapping_add(1);
                false
            }
        })
    }

    /// Take the oldest byte
    pub fn pull(&self) -> Option<u8> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).queue.pop_front())
    }

    pub fn is_empty(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow_ref(cs).queue.is_empty())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).queue.len())
    }

    /// Discard every queued byte
    pub fn clear(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).queue.clear());
    }

    /// Bytes lost to a full queue since power-on
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow_ref(cs).dropped)
    }
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fifo_order() {
        let mailbox = Mailbox::new();
        assert!(mailbox.is_empty());
        mailbox.push(0xFA);
        mailbox.push(0xAA);
        mailbox.push(0x00);
        assert_eq!(mailbox.len(), 3);
        assert_eq!(mailbox.pull(), Some(0xFA));
        assert_eq!(mailbox.pull(), Some(0xAA));
        assert_eq!(mailbox.pull(), Some(0x00));
        assert_eq!(mailbox.pull(), None);
    }

    #[test]
    fn test_overflow_drops_newest() {
        let mailbox = Mailbox::new();
        for i in 0..MAILBOX_CAPACITY as u8 {
            assert!(mailbox.push(i));
        }
        assert!(!mailbox.push(0xFF));
        assert_eq!(mailbox.dropped(), 1);
        assert_eq!(mailbox.pull(), Some(0));
    }

    proptest! {
        #[test]
        fn prop_fifo_within_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..=MAILBOX_CAPACITY)) {
            let mailbox = Mailbox::new();
            for &byte in &bytes {
                prop_assert!(mailbox.push(byte));
            }
            for &byte in &bytes {
                prop_assert_eq!(mailbox.pull(), Some(byte));
            }
            prop_assert!(mailbox.is_empty());
            prop_assert_eq!(mailbox.dropped(), 0);
        }

        #[test]
        fn prop_overflow_keeps_buffered(extra in 1usize..8) {
            let mailbox = Mailbox::new();
            for i in 0..MAILBOX_CAPACITY + extra {
                mailbox.push(i as u8);
            }
            prop_assert_eq!(mailbox.dropped(), extra as u32);
            for i in 0..MAILBOX_CAPACITY {
                prop_assert_eq!(mailbox.pull(), Some(i as u8));
            }
        }
    }

    #[test]
    fn test_clear_empties() {
        let mailbox = Mailbox::new();
        mailbox.push(1);
        mailbox.push(2);
        mailbox.clear();
        assert!(mailbox.is_empty());
        assert_eq!(mailbox.pull(), None);
    }
}
