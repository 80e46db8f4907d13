//! Optimistic atomic-flag back-end.

use std::sync::atomic::{AtomicBool, Ordering};

use super::LockBackend;

/// One atomic flag per cell; every contention is an immediate failure.
///
/// The cheapest back-end under low contention: a single CAS to acquire, a
/// store to release, and no retry logic at all. Callers are expected to back
/// off and retry at a coarser level (typically by releasing everything and
/// re-attempting the whole neighborhood).
pub struct NonBlocking {
    slots: Box<[AtomicBool]>,
}

impl LockBackend for NonBlocking {
    fn with_cells(num_cells: usize) -> Self {
        Self {
            slots: (0..num_cells).map(|_| AtomicBool::new(false)).collect(),
        }
    }

    #[inline]
    fn is_locked(&self, cell: usize) -> bool {
        self.slots[cell].load(Ordering::Acquire)
    }

    #[inline]
    fn try_acquire(&self, cell: usize, _no_spin: bool) -> bool {
        self.slots[cell]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
    }

    #[inline]
    fn release(&self, cell: usize) {
        self.slots[cell].store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_release_cycle() {
        let table = NonBlocking::with_cells(8);
        assert!(!table.is_locked(3));

        assert!(table.try_acquire(3, false));
        assert!(table.is_locked(3));

        // Contention fails regardless of the spin flag
        assert!(!table.try_acquire(3, false));
        assert!(!table.try_acquire(3, true));

        table.release(3);
        assert!(!table.is_locked(3));
        assert!(table.try_acquire(3, true));
    }

    #[test]
    fn test_slots_are_independent() {
        let table = NonBlocking::with_cells(4);
        assert!(table.try_acquire(0, false));
        assert!(table.try_acquire(1, false));
        assert!(!table.is_locked(2));
        table.release(0);
        assert!(table.is_locked(1));
        assert!(!table.is_locked(0));
    }
}
