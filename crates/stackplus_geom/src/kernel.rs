//! Computational-geometry backend
//!
//! The extruder and intersector only need four primitives from a polygon
//! library. [`PolygonKernel`] is that narrow seam; [`GeoKernel`] implements
//! it on top of the `geo` crate.

use geo::{Area, BooleanOps, ConvexHull, Coord, LineString, Polygon, Winding};
use stackplus_math::Vec2;

use crate::Polygon2D;

/// Polygon primitives the pipeline depends on
///
/// Implementations must be deterministic: the same inputs produce the same
/// pieces in the same order.
pub trait PolygonKernel {
    /// Boolean AND of two polygons
    ///
    /// Returns the exterior ring of every resulting piece, unsnapped and in
    /// any winding. An empty vector means the polygons share no area.
    fn intersection(&self, a: &Polygon2D, b: &Polygon2D) -> Vec<Vec<Vec2>>;

    /// Convex hull of the polygon's vertices
    fn convex_hull(&self, polygon: &Polygon2D) -> Polygon2D;

    /// Enclosed area
    fn area(&self, polygon: &Polygon2D) -> f64 {
        polygon.area()
    }

    /// Whether the boundary winds counter-clockwise
    fn is_ccw(&self, polygon: &Polygon2D) -> bool {
        polygon.is_ccw()
    }
}

/// [`PolygonKernel`] backed by the `geo` crate
#[derive(Clone, Copy, Debug, Default)]
pub struct GeoKernel;

impl GeoKernel {
    fn to_geo(polygon: &Polygon2D) -> Polygon<f64> {
        let coords: Vec<Coord<f64>> = polygon
            .points()
            .iter()
            .map(|p| Coord { x: p.x, y: p.y })
            .collect();
        // geo closes the ring itself
        Polygon::new(LineString::new(coords), vec![])
    }

    fn exterior_ring(polygon: &Polygon<f64>) -> Vec<Vec2> {
        polygon
            .exterior()
            .coords()
            .map(|c| Vec2::new(c.x, c.y))
            .collect()
    }
}

impl PolygonKernel for GeoKernel {
    fn intersection(&self, a: &Polygon2D, b: &Polygon2D) -> Vec<Vec<Vec2>> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }
        let result = Self::to_geo(a).intersection(&Self::to_geo(b));
        result
            .iter()
            .map(|piece| {
                if !piece.interiors().is_empty() {
                    log::debug!("Dropping {} interior ring(s) from intersection piece", piece.interiors().len());
                }
                Self::exterior_ring(piece)
            })
            .collect()
    }

    fn convex_hull(&self, polygon: &Polygon2D) -> Polygon2D {
        if polygon.is_empty() {
            return Polygon2D::empty();
        }
        let hull = Self::to_geo(polygon).convex_hull();
        Polygon2D::from_ring(Self::exterior_ring(&hull))
    }

    fn area(&self, polygon: &Polygon2D) -> f64 {
        if polygon.is_empty() {
            return 0.0;
        }
        Self::to_geo(polygon).unsigned_area()
    }

    fn is_ccw(&self, polygon: &Polygon2D) -> bool {
        if polygon.is_empty() {
            return false;
        }
        Self::to_geo(polygon).exterior().is_ccw()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn square(x: f64, y: f64, size: f64) -> Polygon2D {
        Polygon2D::new(vec![(x, y), (x + size, y), (x + size, y + size), (x, y + size)]).unwrap()
    }

    #[test]
    fn test_intersection_overlap() {
        let pieces = GeoKernel.intersection(&square(0.0, 0.0, 1.0), &square(0.5, 0.5, 1.0));
        assert_eq!(pieces.len(), 1);
        let piece = Polygon2D::from_ring(pieces[0].clone());
        assert!((piece.area() - 0.25).abs() < EPSILON, "area {}", piece.area());
    }

    #[test]
    fn test_intersection_disjoint() {
        let pieces = GeoKernel.intersection(&square(0.0, 0.0, 1.0), &square(10.0, 0.0, 1.0));
        assert!(pieces.is_empty());
    }

    #[test]
    fn test_intersection_with_empty() {
        let pieces = GeoKernel.intersection(&square(0.0, 0.0, 1.0), &Polygon2D::empty());
        assert!(pieces.is_empty());
    }

    #[test]
    fn test_convex_hull_of_l_shape() {
        let l_shape = Polygon2D::new(vec![
            (0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0),
        ])
        .unwrap();
        let hull = GeoKernel.convex_hull(&l_shape);
        assert!(hull.is_ccw());
        assert_eq!(hull.len(), 5);
        assert!((hull.area() - 3.5).abs() < EPSILON, "hull area {}", hull.area());
    }

    #[test]
    fn test_area_and_winding() {
        let s = square(0.0, 0.0, 2.0);
        assert!((GeoKernel.area(&s) - 4.0).abs() < EPSILON);
        assert!(GeoKernel.is_ccw(&s));
        assert!(!GeoKernel.is_ccw(&Polygon2D::empty()));
        assert_eq!(GeoKernel.area(&Polygon2D::empty()), 0.0);
    }

    #[test]
    fn test_area_agrees_with_shoelace() {
        let l_shape = Polygon2D::new(vec![
            (0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0),
        ])
        .unwrap();
        assert!((GeoKernel.area(&l_shape) - l_shape.area()).abs() < EPSILON);
        assert_eq!(GeoKernel.is_ccw(&l_shape), l_shape.is_ccw());
    }
}
