//! Priority-blocking back-end.
//!
//! Slots store the holder's thread token (zero = free). On contention the
//! outcome depends on who holds the slot: a thread that outranks the holder
//! (numerically lower token) yields and retries until the slot frees up; any
//! other thread backs off immediately. With every thread applying this rule,
//! at most one thread ever waits on a given slot, so cyclic waits cannot
//! form, and the lowest-token thread in any stable contention set eventually
//! acquires whatever it asks for.

use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;

use super::LockBackend;
use crate::registry;

/// One token-stamped atomic slot per cell.
pub struct PriorityBlocking {
    slots: Box<[AtomicU32]>,
}

impl LockBackend for PriorityBlocking {
    fn with_cells(num_cells: usize) -> Self {
        Self {
            slots: (0..num_cells).map(|_| AtomicU32::new(0)).collect(),
        }
    }

    #[inline]
    fn is_locked(&self, cell: usize) -> bool {
        self.slots[cell].load(Ordering::Acquire) != 0
    }

    fn try_acquire(&self, cell: usize, no_spin: bool) -> bool {
        let token = registry::current_thread_token();
        let slot = &self.slots[cell];

        if no_spin {
            return slot
                .compare_exchange(0, token, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok();
        }

        loop {
            match slot.compare_exchange(0, token, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => return true,
                // The holder ranks below us; wait for it to finish.
                Err(holder) if holder > token => thread::yield_now(),
                // The holder ranks at or above us; back off.
                Err(_) => return false,
            }
        }
    }

    #[inline]
    fn release(&self, cell: usize) {
        self.slots[cell].store(0, Ordering::Release);
    }
}

impl PriorityBlocking {
    /// Token currently stamped on a slot, zero if free. Advisory.
    #[inline]
    pub fn holder(&self, cell: usize) -> u32 {
        self.slots[cell].load(Ordering::Acquire)
    }
}
