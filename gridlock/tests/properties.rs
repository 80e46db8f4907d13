//! Property-based tests verifying the lock against a naive reference model.
//!
//! Single-threaded model checking: with no contention, every acquisition
//! succeeds, so the shadow table must track exactly the set a HashSet-based
//! model predicts, and the shared table must mirror it cell for cell.

use std::collections::HashSet;

use gridlock::{Bbox3, CellCoord, LockBackend, NonBlockingGridLock, Point3};
use proptest::prelude::*;

fn unit_bbox() -> Bbox3 {
    Bbox3::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)
}

/// One step of the single-threaded workload.
#[derive(Debug, Clone)]
enum Op {
    LockCell(usize),
    LockRegion { cell: usize, radius: i32 },
    Unlock(usize),
    UnlockAllButOne(usize),
    UnlockAll,
}

fn op_strategy(num_cells: usize) -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..num_cells).prop_map(Op::LockCell),
        ((0..num_cells), 0..3i32)
            .prop_map(|(cell, radius)| Op::LockRegion { cell, radius }),
        (0..num_cells).prop_map(Op::Unlock),
        (0..num_cells).prop_map(Op::UnlockAllButOne),
        Just(Op::UnlockAll),
    ]
}

/// Apply an op to the model set of owned cells.
fn apply_to_model(model: &mut HashSet<usize>, lock: &NonBlockingGridLock, op: &Op) {
    match *op {
        Op::LockCell(cell) => {
            model.insert(cell);
        }
        Op::LockRegion { cell, radius } => {
            let center = lock.grid().cell_at(cell);
            model.extend(lock.grid().region(center, radius));
        }
        Op::Unlock(cell) => {
            model.remove(&cell);
        }
        Op::UnlockAllButOne(keep) => {
            let kept = model.contains(&keep);
            model.clear();
            if kept {
                model.insert(keep);
            }
        }
        Op::UnlockAll => model.clear(),
    }
}

fn apply_to_lock(lock: &NonBlockingGridLock, op: &Op) {
    match *op {
        Op::LockCell(cell) => assert!(lock.try_lock(cell)),
        Op::LockRegion { cell, radius } => assert!(lock.try_lock_region(cell, radius)),
        Op::Unlock(cell) => {
            // Only the owner may release; the model gates identically.
            if lock.is_locked_by_this_thread(cell) {
                lock.unlock(cell);
            }
        }
        Op::UnlockAllButOne(keep) => lock.unlock_all_but_one(keep),
        Op::UnlockAll => lock.unlock_all_locked_by_this_thread(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Uncontended acquisitions and releases track the reference model, and
    /// the shared table mirrors thread ownership cell for cell.
    #[test]
    fn lock_state_matches_model(
        ops in prop::collection::vec(op_strategy(64), 1..40),
    ) {
        let lock = NonBlockingGridLock::new(&unit_bbox(), 4).unwrap();
        let mut model = HashSet::new();

        for op in &ops {
            apply_to_model(&mut model, &lock, op);
            apply_to_lock(&lock, op);

            for cell in 0..lock.grid().num_cells() {
                let owned = model.contains(&cell);
                prop_assert_eq!(lock.is_locked_by_this_thread(cell), owned);
                prop_assert_eq!(lock.is_cell_locked(cell), owned);
            }
        }

        lock.unlock_all_locked_by_this_thread();
        prop_assert!(lock.all_cells_unlocked());
        prop_assert!(lock.all_local_cells_unlocked());
    }

    /// Every point of space, inside the box or far outside it, maps to a
    /// valid cell, and locking through the point is observable through the
    /// same point.
    #[test]
    fn any_point_locks_some_cell(
        x in -10.0f64..10.0,
        y in -10.0f64..10.0,
        z in -10.0f64..10.0,
    ) {
        let lock = NonBlockingGridLock::new(&unit_bbox(), 4).unwrap();
        let p = Point3::new(x, y, z);

        let index = lock.grid().index_of(&p);
        prop_assert!(index < lock.grid().num_cells());

        prop_assert!(lock.try_lock_point(&p, 0));
        prop_assert!(lock.is_locked(&p));
        prop_assert!(lock.is_point_locked_by_this_thread(&p));

        lock.unlock_all_locked_by_this_thread();
        prop_assert!(lock.all_cells_unlocked());
    }

    /// Neighborhood enumeration stays inside the clipped bounds, visits the
    /// expected number of cells, and follows lexicographic (x, y, z) order.
    #[test]
    fn region_enumeration_is_clipped_and_ordered(
        n in 2..8i32,
        cx in 0..8i32,
        cy in 0..8i32,
        cz in 0..8i32,
        radius in 0..4i32,
    ) {
        prop_assume!(cx < n && cy < n && cz < n);

        let lock = NonBlockingGridLock::new(&unit_bbox(), n).unwrap();
        let center = CellCoord::new(cx, cy, cz);

        let cells: Vec<CellCoord> = lock
            .grid()
            .region(center, radius)
            .map(|index| lock.grid().cell_at(index))
            .collect();

        let lo = |c: i32| (c - radius).max(0);
        let hi = |c: i32| (c + radius).min(n - 1);
        let expected_len = ((hi(cx) - lo(cx) + 1)
            * (hi(cy) - lo(cy) + 1)
            * (hi(cz) - lo(cz) + 1)) as usize;
        prop_assert_eq!(cells.len(), expected_len);

        for pair in cells.windows(2) {
            let a = (pair[0].x, pair[0].y, pair[0].z);
            let b = (pair[1].x, pair[1].y, pair[1].z);
            prop_assert!(a < b, "traversal not lexicographic: {:?} then {:?}", a, b);
        }

        for cell in &cells {
            prop_assert!(cell.x >= lo(cx) && cell.x <= hi(cx));
            prop_assert!(cell.y >= lo(cy) && cell.y <= hi(cy));
            prop_assert!(cell.z >= lo(cz) && cell.z <= hi(cz));
        }
    }

    /// A failed neighborhood acquisition rolls back completely no matter
    /// which cell of the neighborhood was taken by someone else.
    #[test]
    fn failed_region_never_leaks(
        cell in 0..64usize,
        blocked_offset in 0..27usize,
    ) {
        let lock = NonBlockingGridLock::new(&unit_bbox(), 4).unwrap();
        let center = lock.grid().cell_at(cell);

        let cells: Vec<usize> = lock.grid().region(center, 1).collect();
        let blocked = cells[blocked_offset % cells.len()];

        // Foreign holder, bypassing this thread's shadow table.
        prop_assert!(lock.backend().try_acquire(blocked, true));

        prop_assert!(!lock.try_lock_region(cell, 1));
        prop_assert!(lock.all_local_cells_unlocked());
        for &c in &cells {
            if c != blocked {
                prop_assert!(!lock.is_cell_locked(c));
            }
        }

        lock.backend().release(blocked);
        prop_assert!(lock.all_cells_unlocked());
    }
}
