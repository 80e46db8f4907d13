//! The spatial grid lock.
//!
//! [`SpatialGridLock`] couples a [`CellGrid`] with a shared lock table (one
//! slot per cell, back-end chosen by type parameter) and a per-thread shadow
//! table. Worker threads take short-term exclusive ownership of single cells
//! or clipped cubic neighborhoods, re-entrantly and with all-or-nothing
//! semantics for multi-cell requests.

use gridlock_core::{Bbox3, CellCoord, CellGrid, Point3Like, Result};

use crate::backend::{LockBackend, PriorityBlocking};
use crate::local::ShadowTable;

/// Outcome of a single-cell acquisition attempt.
enum CellAcquire {
    /// The calling thread already owned the cell; the shared slot was not
    /// touched.
    AlreadyOwned,
    /// Freshly taken from the shared table.
    Acquired,
    /// Another thread holds it.
    Failed,
}

/// Concurrent lock over a uniform cubic subdivision of 3D space.
///
/// Many threads share one instance. Each `try_lock_*` call either leaves the
/// caller owning the requested cell(s) and returns true, or changes nothing
/// and returns false; neighborhood requests roll back partial progress before
/// failing. Ownership is re-entrant: locking a cell the thread already owns
/// succeeds immediately without touching the shared table.
///
/// The back-end defaults to [`PriorityBlocking`], which resolves contention
/// by thread seniority: see the [`backend`](crate::backend) module for the
/// alternatives and their trade-offs.
///
/// # Example
///
/// ```
/// use gridlock::{Bbox3, Point3, PriorityGridLock};
///
/// let bbox = Bbox3::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
/// let lock = PriorityGridLock::new(&bbox, 4).unwrap();
///
/// let site = Point3::new(0.3, 0.3, 0.3);
/// assert!(lock.try_lock_point(&site, 1)); // 3x3x3 neighborhood
/// assert!(lock.is_locked(&site));
///
/// // ... mutate the geometry covered by the neighborhood ...
///
/// lock.unlock_all_locked_by_this_thread();
/// assert!(lock.all_cells_unlocked());
/// ```
pub struct SpatialGridLock<B: LockBackend = PriorityBlocking> {
    grid: CellGrid,
    table: B,
    shadow: ShadowTable,
}

/// Grid lock with the optimistic atomic-flag back-end.
pub type NonBlockingGridLock = SpatialGridLock<crate::backend::NonBlocking>;
/// Grid lock with the priority-blocking back-end (the default).
pub type PriorityGridLock = SpatialGridLock<PriorityBlocking>;
/// Grid lock with the mutex-per-cell back-end (validation only).
pub type MutexGridLock = SpatialGridLock<crate::backend::PerCellMutex>;

impl<B: LockBackend> SpatialGridLock<B> {
    /// Create a lock over `bbox` subdivided into `cells_per_axis`³ cells.
    ///
    /// # Errors
    /// Propagates [`gridlock_core::GridError`] for an empty bounding box or a
    /// zero cell count.
    pub fn new(bbox: &Bbox3, cells_per_axis: i32) -> Result<Self> {
        let grid = CellGrid::new(bbox, cells_per_axis)?;
        log::debug!(
            "spatial grid lock: {}^3 cells over [{}, {}] x [{}, {}] x [{}, {}]",
            cells_per_axis,
            bbox.xmin,
            bbox.xmax,
            bbox.ymin,
            bbox.ymax,
            bbox.zmin,
            bbox.zmax
        );
        Ok(Self {
            table: B::with_cells(grid.num_cells()),
            shadow: ShadowTable::new(grid.num_cells()),
            grid,
        })
    }

    /// The grid geometry this lock partitions space with.
    #[inline]
    pub fn grid(&self) -> &CellGrid {
        &self.grid
    }

    /// The shared lock table. Exposed for instrumentation and diagnostics.
    #[inline]
    pub fn backend(&self) -> &B {
        &self.table
    }

    /// Rebind the bounding box, keeping the cell count and all lock state.
    ///
    /// Callers must ensure no thread holds cells across the rebind; indices
    /// computed from points change meaning when the box moves.
    pub fn set_bbox(&mut self, bbox: &Bbox3) -> Result<()> {
        self.grid.set_bbox(bbox)
    }

    // ------------------------------------------------------------------
    // Acquisition
    // ------------------------------------------------------------------

    fn acquire_cell(&self, cell: usize, no_spin: bool) -> CellAcquire {
        debug_assert!(cell < self.grid.num_cells());
        let state = self.shadow.state();
        if state.borrow().owned[cell] {
            return CellAcquire::AlreadyOwned;
        }
        if self.table.try_acquire(cell, no_spin) {
            let mut state = state.borrow_mut();
            state.owned[cell] = true;
            state.held.push(cell);
            CellAcquire::Acquired
        } else {
            CellAcquire::Failed
        }
    }

    fn acquire_region(&self, center: CellCoord, radius: i32, no_spin: bool) -> bool {
        if radius <= 0 {
            let cell = self.grid.flat_index(center);
            return !matches!(self.acquire_cell(cell, no_spin), CellAcquire::Failed);
        }

        let region = self.grid.region(center, radius);
        let mut fresh = Vec::with_capacity(region.len());
        for cell in region {
            match self.acquire_cell(cell, no_spin) {
                CellAcquire::Acquired => fresh.push(cell),
                CellAcquire::AlreadyOwned => {}
                CellAcquire::Failed => {
                    // Roll back this call's own acquisitions; cells owned
                    // before the call stay owned.
                    for &taken in &fresh {
                        self.unlock(taken);
                    }
                    return false;
                }
            }
        }
        true
    }

    /// Try to lock a single cell by flat index.
    ///
    /// Returns true if the calling thread owns the cell afterwards, including
    /// when it already owned it going in.
    #[inline]
    pub fn try_lock(&self, cell: usize) -> bool {
        !matches!(self.acquire_cell(cell, false), CellAcquire::Failed)
    }

    /// [`try_lock`](Self::try_lock) without the back-end's yield-and-retry
    /// courtesy: contention fails immediately.
    #[inline]
    pub fn try_lock_no_spin(&self, cell: usize) -> bool {
        !matches!(self.acquire_cell(cell, true), CellAcquire::Failed)
    }

    /// Try to lock the cubic neighborhood of radius `radius` around the cell
    /// with flat index `cell`, clipped to the grid.
    ///
    /// All-or-nothing: on the first cell that cannot be taken, every cell
    /// this call freshly acquired is released again and false is returned.
    /// `radius <= 0` degenerates to [`try_lock`](Self::try_lock).
    #[inline]
    pub fn try_lock_region(&self, cell: usize, radius: i32) -> bool {
        self.acquire_region(self.grid.cell_at(cell), radius, false)
    }

    /// [`try_lock_region`](Self::try_lock_region), failing fast on contention.
    #[inline]
    pub fn try_lock_region_no_spin(&self, cell: usize, radius: i32) -> bool {
        self.acquire_region(self.grid.cell_at(cell), radius, true)
    }

    /// Try to lock the neighborhood around explicit cell coordinates.
    #[inline]
    pub fn try_lock_region_around(&self, center: CellCoord, radius: i32) -> bool {
        self.acquire_region(center, radius, false)
    }

    /// [`try_lock_region_around`](Self::try_lock_region_around), failing fast
    /// on contention.
    #[inline]
    pub fn try_lock_region_around_no_spin(&self, center: CellCoord, radius: i32) -> bool {
        self.acquire_region(center, radius, true)
    }

    /// Try to lock the neighborhood around the cell containing `point`.
    ///
    /// Points outside the bounding box clamp to the nearest boundary cell.
    #[inline]
    pub fn try_lock_point<P: Point3Like>(&self, point: &P, radius: i32) -> bool {
        self.acquire_region(self.grid.cell_of(point), radius, false)
    }

    /// [`try_lock_point`](Self::try_lock_point), failing fast on contention.
    #[inline]
    pub fn try_lock_point_no_spin<P: Point3Like>(&self, point: &P, radius: i32) -> bool {
        self.acquire_region(self.grid.cell_of(point), radius, true)
    }

    // ------------------------------------------------------------------
    // Probes
    // ------------------------------------------------------------------

    /// Whether some thread holds the cell. Advisory under concurrency.
    #[inline]
    pub fn is_cell_locked(&self, cell: usize) -> bool {
        self.table.is_locked(cell)
    }

    /// Whether some thread holds the cell containing `point`.
    #[inline]
    pub fn is_locked<P: Point3Like>(&self, point: &P) -> bool {
        self.table.is_locked(self.grid.index_of(point))
    }

    /// Whether the calling thread holds the cell.
    #[inline]
    pub fn is_locked_by_this_thread(&self, cell: usize) -> bool {
        self.shadow.state().borrow().owned[cell]
    }

    /// Whether the calling thread holds the cell containing `point`.
    #[inline]
    pub fn is_point_locked_by_this_thread<P: Point3Like>(&self, point: &P) -> bool {
        self.is_locked_by_this_thread(self.grid.index_of(point))
    }

    // ------------------------------------------------------------------
    // Release
    // ------------------------------------------------------------------

    /// Release a single cell.
    ///
    /// The calling thread must hold the cell. The shared slot is freed before
    /// the shadow entry is cleared, so a thread that observes the slot free
    /// and re-acquires it can never see a stale ownership claim here.
    pub fn unlock(&self, cell: usize) {
        self.table.release(cell);
        self.shadow.state().borrow_mut().owned[cell] = false;
    }

    /// Release every cell the calling thread holds.
    ///
    /// Walks the thread's held list in acquisition order, skipping entries
    /// already released (duplicates are expected), and clears the list.
    pub fn unlock_all_locked_by_this_thread(&self) {
        let state = self.shadow.state();
        let mut state = state.borrow_mut();
        let held = std::mem::take(&mut state.held);
        for cell in held {
            if state.owned[cell] {
                self.table.release(cell);
                state.owned[cell] = false;
            }
        }
    }

    /// Release every cell the calling thread holds except `keep`.
    ///
    /// If the thread held `keep` going in, it still does afterwards and the
    /// held list shrinks to exactly that one entry; otherwise the held list
    /// ends empty.
    pub fn unlock_all_but_one(&self, keep: usize) {
        let state = self.shadow.state();
        let mut state = state.borrow_mut();
        let held = std::mem::take(&mut state.held);
        let mut keep_found = false;
        for cell in held {
            if !state.owned[cell] {
                continue;
            }
            if cell == keep {
                keep_found = true;
            } else {
                self.table.release(cell);
                state.owned[cell] = false;
            }
        }
        if keep_found {
            state.held.push(keep);
        }
    }

    /// Release everything except the cell containing `point`.
    #[inline]
    pub fn unlock_all_but_one_point<P: Point3Like>(&self, point: &P) {
        self.unlock_all_but_one(self.grid.index_of(point));
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    /// Whether every slot of the shared table is free.
    ///
    /// A linear scan; not linearizable under concurrent activity. Intended
    /// for tests and quiescent-state assertions.
    pub fn all_cells_unlocked(&self) -> bool {
        (0..self.grid.num_cells()).all(|cell| !self.table.is_locked(cell))
    }

    /// Whether the calling thread holds no cell at all.
    ///
    /// Scans only the calling thread's shadow table.
    pub fn all_local_cells_unlocked(&self) -> bool {
        self.shadow.state().borrow().owned.iter().all(|&owned| !owned)
    }
}
