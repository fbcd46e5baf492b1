//! Tolerant polygon intersection
//!
//! Stacking keeps only the part of the falling block that overlaps the block
//! below. [`PolygonIntersector::intersect`] computes that overlap on a
//! snapped grid so that edges which are shared up to floating-point noise do
//! not leave sliver pieces behind.
//!
//! Result policy:
//! - one piece: returned, wound counter-clockwise
//! - several pieces: the one with the greatest area
//! - nothing polygonal (disjoint, or touching along a line or point): the
//!   empty polygon
//!
//! An empty result is an ordinary return value, never an error: it is how a
//! round is lost.

use stackplus_math::Vec2;

use crate::{GeoKernel, Polygon2D, PolygonKernel};

/// Default grid spacing for snapping
pub const DEFAULT_TOLERANCE: f64 = 0.05;

/// Relative area difference under which two pieces count as tied
const TIE_EPSILON: f64 = 1e-9;

/// Boolean AND of polygons on a snapping grid
#[derive(Clone, Debug)]
pub struct PolygonIntersector<K: PolygonKernel = GeoKernel> {
    kernel: K,
    tolerance: f64,
}

impl Default for PolygonIntersector<GeoKernel> {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonIntersector<GeoKernel> {
    /// Intersector with the `geo` kernel and [`DEFAULT_TOLERANCE`]
    pub fn new() -> Self {
        Self::with_kernel(GeoKernel, DEFAULT_TOLERANCE)
    }

    /// Intersector with the `geo` kernel and a custom grid spacing
    ///
    /// A tolerance of zero disables snapping.
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self::with_kernel(GeoKernel, tolerance)
    }
}

impl<K: PolygonKernel> PolygonIntersector<K> {
    /// Intersector with a custom kernel
    pub fn with_kernel(kernel: K, tolerance: f64) -> Self {
        Self {
            kernel,
            tolerance: tolerance.max(0.0),
        }
    }

    /// Grid spacing used for snapping
    #[inline]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Overlap of `a` and `b`, or the empty polygon
    ///
    /// When the overlap falls apart into several pieces of equal area, the
    /// piece whose centroid lies closest to the centroid of `a` is kept; if
    /// that still ties, the first piece the kernel reported wins.
    pub fn intersect(&self, a: &Polygon2D, b: &Polygon2D) -> Polygon2D {
        if a.is_empty() || b.is_empty() {
            return Polygon2D::empty();
        }

        let snapped_a = a.snapped(self.tolerance);
        let snapped_b = b.snapped(self.tolerance);
        if snapped_a.is_empty() || snapped_b.is_empty() {
            log::debug!("Operand collapsed when snapped to grid {}", self.tolerance);
            return Polygon2D::empty();
        }

        let pieces = self.pieces(&snapped_a, &snapped_b, self.tolerance);
        if pieces.len() > 1 {
            log::debug!("Intersection produced {} pieces, keeping the largest", pieces.len());
        }

        let anchor = snapped_a.centroid().unwrap_or(Vec2::ZERO);
        let Some(overlap) = largest_piece(pieces, anchor) else {
            return Polygon2D::empty();
        };

        // Snapping can move vertices outwards; the overlap must stay inside
        // both unsnapped operands
        let overlap = self.clip(overlap, a, anchor);
        self.clip(overlap, b, anchor)
    }

    /// Non-empty pieces of `a AND b`, each snapped to `grid`
    fn pieces(&self, a: &Polygon2D, b: &Polygon2D, grid: f64) -> Vec<Polygon2D> {
        self.kernel
            .intersection(a, b)
            .into_iter()
            .map(|ring| Polygon2D::from_ring(ring.into_iter().map(|p| p.snapped(grid))))
            .filter(|piece| !piece.is_empty())
            .collect()
    }

    /// Largest piece of `piece` that lies inside `bound`
    fn clip(&self, piece: Polygon2D, bound: &Polygon2D, anchor: Vec2) -> Polygon2D {
        if piece.is_empty() {
            return piece;
        }
        largest_piece(self.pieces(&piece, bound, 0.0), anchor).unwrap_or_else(Polygon2D::empty)
    }
}

/// Intersect with the `geo` kernel and the given grid spacing
pub fn intersect(a: &Polygon2D, b: &Polygon2D, tolerance: f64) -> Polygon2D {
    PolygonIntersector::with_tolerance(tolerance).intersect(a, b)
}

/// Strictly greatest area, ties broken by centroid distance to `anchor`
fn largest_piece(pieces: Vec<Polygon2D>, anchor: Vec2) -> Option<Polygon2D> {
    let mut best: Option<(Polygon2D, f64, f64)> = None;
    for piece in pieces {
        let area = piece.area();
        let distance = piece
            .centroid()
            .map(|c| c.distance(anchor))
            .unwrap_or(f64::INFINITY);

        let replace = match &best {
            None => true,
            Some((_, best_area, best_distance)) => {
                let tie_band = TIE_EPSILON * best_area.max(area).max(1.0);
                if (area - best_area).abs() <= tie_band {
                    distance < *best_distance
                } else {
                    area > *best_area
                }
            }
        };
        if replace {
            best = Some((piece, area, distance));
        }
    }
    best.map(|(piece, _, _)| piece)
}
