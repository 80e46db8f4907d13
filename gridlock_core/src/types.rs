//! Core types for the gridlock ecosystem.
//!
//! Provides the point, bounding box, and cell coordinate types shared by the
//! locking runtime and its callers.

/// A 3D point with named fields for clarity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3 {
    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Point3 {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<Point3> for [f64; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl From<(f64, f64, f64)> for Point3 {
    #[inline]
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

/// An axis-aligned bounding box in 3D space.
///
/// The box is the cartesian product `[xmin, xmax] × [ymin, ymax] × [zmin, zmax]`.
/// Construction does not validate the extents; [`crate::CellGrid::new`] rejects
/// boxes that are empty along any axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bbox3 {
    /// Minimum X.
    pub xmin: f64,
    /// Maximum X.
    pub xmax: f64,
    /// Minimum Y.
    pub ymin: f64,
    /// Maximum Y.
    pub ymax: f64,
    /// Minimum Z.
    pub zmin: f64,
    /// Maximum Z.
    pub zmax: f64,
}

impl Bbox3 {
    /// Create a new bounding box from per-axis extents.
    #[inline]
    pub const fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64, zmin: f64, zmax: f64) -> Self {
        Self {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
        }
    }

    /// Create a bounding box from its minimum and maximum corners.
    #[inline]
    pub const fn from_corners(min: Point3, max: Point3) -> Self {
        Self {
            xmin: min.x,
            xmax: max.x,
            ymin: min.y,
            ymax: max.y,
            zmin: min.z,
            zmax: max.z,
        }
    }

    /// The minimum corner of the box.
    #[inline]
    pub const fn min_corner(&self) -> Point3 {
        Point3::new(self.xmin, self.ymin, self.zmin)
    }

    /// The maximum corner of the box.
    #[inline]
    pub const fn max_corner(&self) -> Point3 {
        Point3::new(self.xmax, self.ymax, self.zmax)
    }
}

/// Cell coordinates within the grid (one component per axis).
///
/// Components are signed so that intermediate arithmetic (for example a
/// neighborhood extending past the grid boundary) stays representable before
/// clipping brings it back into `[0, cells_per_axis)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    /// X coordinate (0 to cells_per_axis - 1 once clipped).
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl CellCoord {
    /// Create a new CellCoord.
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// Compute the flat index for a grid with the given cells per axis.
    /// Uses row-major ordering: index = x + y * n + z * n * n
    #[inline]
    pub const fn flat_index(&self, cells_per_axis: i32) -> usize {
        let n = cells_per_axis as i64;
        (self.x as i64 + self.y as i64 * n + self.z as i64 * n * n) as usize
    }

    /// Create a CellCoord from a flat index and cells per axis.
    #[inline]
    pub const fn from_flat_index(index: usize, cells_per_axis: i32) -> Self {
        let n = cells_per_axis as usize;
        Self {
            x: (index % n) as i32,
            y: ((index / n) % n) as i32,
            z: (index / (n * n)) as i32,
        }
    }
}

impl From<[i32; 3]> for CellCoord {
    #[inline]
    fn from(arr: [i32; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<CellCoord> for [i32; 3] {
    #[inline]
    fn from(c: CellCoord) -> Self {
        c.as_array()
    }
}
