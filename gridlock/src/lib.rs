//! # gridlock
//!
//! Concurrent spatial grid lock for parallel 3D mesh and geometry algorithms.
//!
//! Parallel meshing kernels (refinement, Delaunay flips, local remeshing)
//! repeatedly mutate small neighborhoods of a shared triangulation. This
//! crate provides the synchronization substrate for that pattern: space is
//! partitioned into a uniform cubic grid, and worker threads take short-term
//! exclusive ownership of single cells or cubic neighborhoods around a cell.
//!
//! - **Re-entrant**: locking a cell the thread already owns is free (a
//!   thread-local lookup, no shared-memory traffic).
//! - **All-or-nothing neighborhoods**: a multi-cell request either leaves the
//!   caller owning the whole clipped `(2r+1)³` block or rolls back cleanly.
//! - **Deadlock-free by construction**: acquisition never blocks on a lock;
//!   the default back-end resolves contention with a thread-priority rule
//!   under which at most one thread ever waits for a given slot.
//!
//! ## Back-ends
//!
//! The shared table back-end is chosen by type parameter:
//!
//! - [`PriorityBlocking`] (default): slots carry the holder's thread token;
//!   an outranking contender yields and retries, everyone else backs off.
//! - [`NonBlocking`]: plain atomic flags, every contention fails immediately.
//! - [`PerCellMutex`]: a mutex per cell, for validating the protocol.
//!
//! ## Quick Start
//!
//! ```
//! use gridlock::{Bbox3, Point3, PriorityGridLock};
//!
//! let bbox = Bbox3::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
//! let lock = PriorityGridLock::new(&bbox, 8).unwrap();
//!
//! let vertex = Point3::new(0.42, 0.17, 0.66);
//! if lock.try_lock_point(&vertex, 1) {
//!     // The 3x3x3 cell neighborhood around the vertex is ours; mutate away.
//!     lock.unlock_all_locked_by_this_thread();
//! } else {
//!     // Contention: back off and retry later, nothing was left locked.
//!     assert!(lock.all_local_cells_unlocked());
//! }
//! ```
//!
//! ## Threading model
//!
//! One grid instance is shared by preemptively scheduled OS threads; all
//! public operations are callable from any thread at any time. Per-thread
//! shadow state is created lazily on a thread's first call and reclaimed
//! when the grid is dropped, so the grid must outlive every operation in
//! flight (the borrow checker enforces this for scoped threads and `Arc`
//! keeps it true for detached ones).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
mod local;
mod lock;
pub mod registry;

pub use backend::{LockBackend, NonBlocking, PerCellMutex, PriorityBlocking};
pub use lock::{MutexGridLock, NonBlockingGridLock, PriorityGridLock, SpatialGridLock};

// Re-export core types for convenience
pub use gridlock_core::{Bbox3, CellCoord, CellGrid, GridError, Point3, Point3Like, RegionIndices};

/// Prelude module for convenient imports.
///
/// ```
/// use gridlock::prelude::*;
/// ```
pub mod prelude {
    pub use crate::backend::{LockBackend, NonBlocking, PerCellMutex, PriorityBlocking};
    pub use crate::lock::{
        MutexGridLock, NonBlockingGridLock, PriorityGridLock, SpatialGridLock,
    };
    pub use gridlock_core::{Bbox3, CellCoord, CellGrid, Point3, Point3Like};
}
