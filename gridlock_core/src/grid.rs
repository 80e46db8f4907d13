//! Grid geometry for a uniform cubic subdivision of a bounding box.
//!
//! A [`CellGrid`] maps world-space points to flat cell indices. The grid is
//! `n × n × n` cells over an axis-aligned bounding box; the mapping clamps,
//! so every point of space (inside the box or not) lands on some cell.

use crate::error::{GridError, Result};
use crate::traits::Point3Like;
use crate::types::{Bbox3, CellCoord};

/// Immutable description of a uniform cubic grid over a bounding box.
///
/// Stores the minimum corner and the precomputed inverse cell size per axis,
/// so point-to-cell mapping is a multiply, a floor, and a clamp.
///
/// Flat indices use row-major ordering `x + y·n + z·n²` where `n` is the
/// number of cells per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellGrid {
    cells_per_axis: i32,
    num_cells: usize,
    xmin: f64,
    ymin: f64,
    zmin: f64,
    inv_dx: f64,
    inv_dy: f64,
    inv_dz: f64,
}

fn check_bbox(bbox: &Bbox3) -> Result<()> {
    let axes = [
        ('x', bbox.xmin, bbox.xmax),
        ('y', bbox.ymin, bbox.ymax),
        ('z', bbox.zmin, bbox.zmax),
    ];
    for (axis, min, max) in axes {
        if !(max > min) {
            return Err(GridError::EmptyAxis { axis, min, max });
        }
    }
    Ok(())
}

impl CellGrid {
    /// Create a grid subdividing `bbox` into `cells_per_axis`³ cells.
    ///
    /// # Errors
    /// - [`GridError::ZeroCellsPerAxis`] if `cells_per_axis < 1`
    /// - [`GridError::EmptyAxis`] if the box is empty along any axis
    pub fn new(bbox: &Bbox3, cells_per_axis: i32) -> Result<Self> {
        if cells_per_axis < 1 {
            return Err(GridError::ZeroCellsPerAxis);
        }
        check_bbox(bbox)?;

        let n = cells_per_axis as f64;
        Ok(Self {
            cells_per_axis,
            num_cells: (cells_per_axis as usize).pow(3),
            xmin: bbox.xmin,
            ymin: bbox.ymin,
            zmin: bbox.zmin,
            inv_dx: n / (bbox.xmax - bbox.xmin),
            inv_dy: n / (bbox.ymax - bbox.ymin),
            inv_dz: n / (bbox.zmax - bbox.zmin),
        })
    }

    /// Rebind the grid to a new bounding box, keeping the cell count.
    ///
    /// # Errors
    /// [`GridError::EmptyAxis`] if the box is empty along any axis; the grid
    /// is left unchanged on error.
    pub fn set_bbox(&mut self, bbox: &Bbox3) -> Result<()> {
        check_bbox(bbox)?;

        let n = self.cells_per_axis as f64;
        self.xmin = bbox.xmin;
        self.ymin = bbox.ymin;
        self.zmin = bbox.zmin;
        self.inv_dx = n / (bbox.xmax - bbox.xmin);
        self.inv_dy = n / (bbox.ymax - bbox.ymin);
        self.inv_dz = n / (bbox.zmax - bbox.zmin);
        Ok(())
    }

    /// Number of cells per axis.
    #[inline]
    pub const fn cells_per_axis(&self) -> i32 {
        self.cells_per_axis
    }

    /// Total number of cells (`cells_per_axis`³).
    #[inline]
    pub const fn num_cells(&self) -> usize {
        self.num_cells
    }

    #[inline]
    fn clamp_axis(&self, i: i32) -> i32 {
        if i < 0 {
            0
        } else if i >= self.cells_per_axis {
            self.cells_per_axis - 1
        } else {
            i
        }
    }

    /// Map a point to its cell coordinates.
    ///
    /// Each component is `floor((p − min) · inv_cell)`, clamped independently
    /// into `[0, cells_per_axis)`. Points outside the bounding box map to the
    /// nearest boundary cell; no error is raised.
    #[inline]
    pub fn cell_of<P: Point3Like>(&self, point: &P) -> CellCoord {
        let ix = libm::floor((point.x() - self.xmin) * self.inv_dx) as i32;
        let iy = libm::floor((point.y() - self.ymin) * self.inv_dy) as i32;
        let iz = libm::floor((point.z() - self.zmin) * self.inv_dz) as i32;
        CellCoord::new(self.clamp_axis(ix), self.clamp_axis(iy), self.clamp_axis(iz))
    }

    /// Map a point to its flat cell index.
    #[inline]
    pub fn index_of<P: Point3Like>(&self, point: &P) -> usize {
        self.flat_index(self.cell_of(point))
    }

    /// Flat index of a cell whose coordinates are already in range.
    #[inline]
    pub fn flat_index(&self, cell: CellCoord) -> usize {
        debug_assert!(
            cell.x >= 0
                && cell.x < self.cells_per_axis
                && cell.y >= 0
                && cell.y < self.cells_per_axis
                && cell.z >= 0
                && cell.z < self.cells_per_axis,
            "cell {:?} out of range for {} cells per axis",
            cell,
            self.cells_per_axis
        );
        cell.flat_index(self.cells_per_axis)
    }

    /// Cell coordinates of a flat index.
    #[inline]
    pub fn cell_at(&self, index: usize) -> CellCoord {
        debug_assert!(index < self.num_cells);
        CellCoord::from_flat_index(index, self.cells_per_axis)
    }

    /// Iterate the cubic neighborhood of radius `radius` around `center`,
    /// clipped to the grid, as flat indices.
    ///
    /// The traversal is lexicographic in `(x, y, z)` cell coordinates (`x`
    /// varying slowest). Concurrent users that acquire multiple cells rely on
    /// every participant using this same order, so it is part of the
    /// contract, not an implementation detail.
    pub fn region(&self, center: CellCoord, radius: i32) -> RegionIndices {
        let r = if radius < 0 { 0 } else { radius };
        let last = self.cells_per_axis - 1;
        let clip_lo = |c: i32| if c - r < 0 { 0 } else { c - r };
        let clip_hi = |c: i32| if c + r > last { last } else { c + r };

        let (x_lo, x_hi) = (clip_lo(center.x), clip_hi(center.x));
        let (y_lo, y_hi) = (clip_lo(center.y), clip_hi(center.y));
        let (z_lo, z_hi) = (clip_lo(center.z), clip_hi(center.z));

        let remaining = if x_lo > x_hi || y_lo > y_hi || z_lo > z_hi {
            0
        } else {
            (x_hi - x_lo + 1) as usize * (y_hi - y_lo + 1) as usize * (z_hi - z_lo + 1) as usize
        };

        RegionIndices {
            n: self.cells_per_axis,
            y_lo,
            z_lo,
            x_hi,
            y_hi,
            z_hi,
            i: x_lo,
            j: y_lo,
            k: z_lo,
            remaining,
        }
    }
}

/// Iterator over the flat indices of a clipped cubic neighborhood.
///
/// Created by [`CellGrid::region`]; yields indices in lexicographic
/// `(x, y, z)` order.
#[derive(Debug, Clone)]
pub struct RegionIndices {
    n: i32,
    y_lo: i32,
    z_lo: i32,
    x_hi: i32,
    y_hi: i32,
    z_hi: i32,
    i: i32,
    j: i32,
    k: i32,
    remaining: usize,
}

impl Iterator for RegionIndices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let index = CellCoord::new(self.i, self.j, self.k).flat_index(self.n);

        if self.k < self.z_hi {
            self.k += 1;
        } else {
            self.k = self.z_lo;
            if self.j < self.y_hi {
                self.j += 1;
            } else {
                self.j = self.y_lo;
                if self.i < self.x_hi {
                    self.i += 1;
                }
            }
        }

        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RegionIndices {}
