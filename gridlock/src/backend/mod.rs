//! Shared lock table back-ends.
//!
//! A back-end owns one synchronization slot per grid cell and exposes the
//! minimal capability set the locking protocol needs: probe, try-acquire,
//! release. The back-end is chosen at grid construction through the type
//! parameter of [`crate::SpatialGridLock`].
//!
//! Back-ends operate on the shared table only; per-thread bookkeeping (the
//! shadow table, the held list) is layered on top by the grid lock itself.

mod mutex;
mod non_blocking;
mod priority;

pub use mutex::PerCellMutex;
pub use non_blocking::NonBlocking;
pub use priority::PriorityBlocking;

/// One synchronization slot per cell.
///
/// Each successful [`try_acquire`](LockBackend::try_acquire) /
/// [`release`](LockBackend::release) pair acts as an acquire/release barrier
/// on its slot. No ordering between distinct cells is implied.
pub trait LockBackend: Send + Sync {
    /// Create a table of `num_cells` free slots.
    fn with_cells(num_cells: usize) -> Self
    where
        Self: Sized;

    /// Whether the slot is currently held by some thread.
    ///
    /// Advisory under concurrency: the answer can be stale by the time the
    /// caller observes it.
    fn is_locked(&self, cell: usize) -> bool;

    /// Attempt to take the slot for the calling thread.
    ///
    /// Returns false on contention. When `no_spin` is false, a back-end may
    /// briefly yield and retry before giving up (only the priority-blocking
    /// back-end does); it must never block indefinitely on its own.
    fn try_acquire(&self, cell: usize, no_spin: bool) -> bool;

    /// Free the slot. The calling thread must be its current holder.
    fn release(&self, cell: usize);
}
