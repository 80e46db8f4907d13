//! # gridlock_core
//!
//! Grid geometry and core types for the gridlock ecosystem.
//!
//! This crate provides the pure-math foundation for coordinate-indexed
//! locking of 3D space: an axis-aligned bounding box subdivided into a
//! uniform cubic grid, with point-to-cell mapping and clipped neighborhood
//! enumeration. It holds no synchronization state; the concurrent lock table
//! lives in the `gridlock` crate.
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support (`std::error::Error` impls)
//!
//! ## Modules
//!
//! - [`types`]: Core data types ([`Point3`], [`Bbox3`], [`CellCoord`])
//! - [`grid`]: The grid descriptor ([`CellGrid`]) and neighborhood iteration
//! - [`traits`]: Point access abstraction ([`Point3Like`])
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```
//! use gridlock_core::{Bbox3, CellGrid, Point3};
//!
//! let bbox = Bbox3::new(0.0, 1.0, 0.0, 1.0, 0.0, 1.0);
//! let grid = CellGrid::new(&bbox, 4).unwrap();
//!
//! // Points map to flat cell indices; outside points clamp to the boundary.
//! assert_eq!(grid.index_of(&Point3::new(0.1, 0.1, 0.1)), 0);
//! assert_eq!(grid.index_of(&Point3::new(-5.0, 0.5, 0.5)), 40);
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod grid;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::error::GridError;
    pub use crate::grid::{CellGrid, RegionIndices};
    pub use crate::traits::Point3Like;
    pub use crate::types::{Bbox3, CellCoord, Point3};
}

pub use error::{GridError, Result};
pub use grid::{CellGrid, RegionIndices};
pub use traits::Point3Like;
pub use types::{Bbox3, CellCoord, Point3};
