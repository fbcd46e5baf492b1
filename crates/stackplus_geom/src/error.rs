//! Geometry error types
//!
//! Raised only when a polygon is built from untrusted point data. Operations
//! on already-valid polygons never fail; they degrade to the empty polygon.

use std::fmt;

/// Reason a point ring was rejected as a polygon boundary
#[derive(Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Fewer than three distinct vertices after removing duplicates
    TooFewPoints {
        /// Distinct vertex count that remained
        count: usize,
    },
    /// The ring encloses no area (all points collinear)
    ZeroArea,
    /// A coordinate was NaN or infinite
    NonFinite {
        /// Index of the offending point in the input
        index: usize,
    },
    /// Two non-adjacent edges cross or touch
    SelfIntersecting {
        /// Index of the first edge (starting vertex)
        first_edge: usize,
        /// Index of the second edge (starting vertex)
        second_edge: usize,
    },
}

impl fmt::Display for GeometryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryError::TooFewPoints { count } => {
                write!(f, "polygon needs at least 3 distinct points, got {}", count)
            }
            GeometryError::ZeroArea => write!(f, "polygon encloses no area"),
            GeometryError::NonFinite { index } => {
                write!(f, "point {} has a non-finite coordinate", index)
            }
            GeometryError::SelfIntersecting { first_edge, second_edge } => write!(
                f,
                "polygon ring is self-intersecting (edges {} and {})",
                first_edge, second_edge
            ),
        }
    }
}

impl std::error::Error for GeometryError {}
