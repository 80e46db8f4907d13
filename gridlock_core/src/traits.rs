//! Point access abstraction.
//!
//! Callers bring their own point types (mesh vertices, kernel points, plain
//! arrays); anything exposing three coordinate accessors can address the grid.

use crate::types::Point3;

/// Trait for types usable as a 3D point.
///
/// Implemented for [`Point3`], `[f64; 3]`, and `(f64, f64, f64)` out of the
/// box; geometry kernels implement it for their own vertex types.
pub trait Point3Like {
    /// X coordinate.
    fn x(&self) -> f64;
    /// Y coordinate.
    fn y(&self) -> f64;
    /// Z coordinate.
    fn z(&self) -> f64;
}

impl Point3Like for Point3 {
    #[inline]
    fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    fn y(&self) -> f64 {
        self.y
    }

    #[inline]
    fn z(&self) -> f64 {
        self.z
    }
}

impl Point3Like for [f64; 3] {
    #[inline]
    fn x(&self) -> f64 {
        self[0]
    }

    #[inline]
    fn y(&self) -> f64 {
        self[1]
    }

    #[inline]
    fn z(&self) -> f64 {
        self[2]
    }
}

impl Point3Like for (f64, f64, f64) {
    #[inline]
    fn x(&self) -> f64 {
        self.0
    }

    #[inline]
    fn y(&self) -> f64 {
        self.1
    }

    #[inline]
    fn z(&self) -> f64 {
        self.2
    }
}
