//! Mutex-per-cell back-end.
//!
//! Exists for validating the protocol against an ordinary lock
//! implementation; not meant for production throughput.

use parking_lot::lock_api::RawMutex as _;
use parking_lot::RawMutex;

use super::LockBackend;

/// One raw mutex per cell.
///
/// Uses the guardless `RawMutex` API because slots are acquired and released
/// from different call frames. The mutexes are not recursive; re-entrant
/// acquisition never reaches them because the grid lock's ownership fast
/// path short-circuits first.
pub struct PerCellMutex {
    slots: Box<[RawMutex]>,
}

impl LockBackend for PerCellMutex {
    fn with_cells(num_cells: usize) -> Self {
        Self {
            slots: (0..num_cells).map(|_| RawMutex::INIT).collect(),
        }
    }

    /// Probes by try-lock-then-unlock, so the answer refers to the instant of
    /// the probe: a slot locked by another thread right after the probe is
    /// still reported free.
    fn is_locked(&self, cell: usize) -> bool {
        if self.slots[cell].try_lock() {
            // Safety: acquired on the line above, on this thread.
            unsafe { self.slots[cell].unlock() };
            false
        } else {
            true
        }
    }

    #[inline]
    fn try_acquire(&self, cell: usize, _no_spin: bool) -> bool {
        self.slots[cell].try_lock()
    }

    #[inline]
    fn release(&self, cell: usize) {
        // Safety: the protocol releases a slot only from the thread whose
        // acquisition succeeded (bulk release gates on the shadow table).
        unsafe { self.slots[cell].unlock() }
    }
}
