//! Geometry pipeline for StackPlus
//!
//! Everything that decides what a stacked block looks like lives here:
//!
//! - [`Polygon2D`] - Counter-clockwise simple polygon, or the empty polygon
//! - [`Extruder`] / [`Prism`] - 2D polygon to drawable prism with face topology
//! - [`spatial::apply`] - Re-project a posed polygon onto the stacking plane
//! - [`PolygonIntersector`] - Grid-snapped boolean AND, largest piece wins
//! - [`PolygonKernel`] - Seam to the underlying polygon library ([`GeoKernel`])
//!
//! The pipeline for one stack action is
//! polygon -> transform -> intersect -> extrude.
//! None of it fails on degenerate geometry; the empty polygon and the empty
//! prism flow through instead.

mod error;
mod polygon;
mod kernel;
pub mod prism;
pub mod spatial;
pub mod intersect;

pub use error::GeometryError;
pub use polygon::{Polygon2D, ring_signed_area, AREA_EPSILON};
pub use kernel::{PolygonKernel, GeoKernel};
pub use prism::{Prism, Extruder, extrude, DEFAULT_DEPTH};
pub use spatial::{Transform, MatrixSource, FlatView};
pub use intersect::{PolygonIntersector, intersect, DEFAULT_TOLERANCE};

// Re-export math types used in the public API
pub use stackplus_math::{Vec2, Vec3, Mat4};
