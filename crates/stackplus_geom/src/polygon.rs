//! Counter-clockwise simple polygons on the stacking plane
//!
//! [`Polygon2D`] is the value every stage of the pipeline passes around. Its
//! boundary is stored once (no closing duplicate), always wound
//! counter-clockwise, and never mutated after construction.
//!
//! The empty polygon is a first-class value: it is what an intersection that
//! leaves nothing behind returns, and it is distinct from any real polygon
//! (no vertices, zero area).

use stackplus_math::Vec2;

use crate::GeometryError;

/// Rings with less absolute area than this are treated as degenerate
pub const AREA_EPSILON: f64 = 1e-12;

/// Relative tolerance for deciding three points are collinear
const COLLINEAR_EPSILON: f64 = 1e-12;

/// Absolute tolerance for orientation tests in the simplicity check
const ORIENTATION_EPSILON: f64 = 1e-12;

/// A simple polygon with counter-clockwise winding, or the empty polygon
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon2D {
    points: Vec<Vec2>,
}

impl Polygon2D {
    /// The empty polygon ("no shape")
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Build a polygon from an untrusted point ring
    ///
    /// A trailing point equal to the first is stripped, as are repeated and
    /// collinear vertices. The ring is reversed if it winds clockwise.
    ///
    /// # Errors
    /// Rejects rings with non-finite coordinates, fewer than three distinct
    /// points, zero area, or crossing edges.
    pub fn new<I, P>(points: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec2>,
    {
        let raw: Vec<Vec2> = points.into_iter().map(Into::into).collect();
        if let Some(index) = raw.iter().position(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(GeometryError::NonFinite { index });
        }

        let mut ring = dedup_ring(raw);
        if ring.len() < 3 {
            return Err(GeometryError::TooFewPoints { count: ring.len() });
        }
        remove_collinear(&mut ring);
        if ring.len() < 3 || ring_signed_area(&ring).abs() <= AREA_EPSILON {
            return Err(GeometryError::ZeroArea);
        }
        if let Some((first_edge, second_edge)) = first_self_intersection(&ring) {
            return Err(GeometryError::SelfIntersecting { first_edge, second_edge });
        }

        Ok(Self { points: into_ccw(ring) })
    }

    /// Build a polygon from a ring that is known to be simple
    ///
    /// Used for images of valid polygons (affine maps, clipping results).
    /// Instead of failing, a ring that collapses to fewer than three points or
    /// to zero area yields [`Polygon2D::empty`].
    pub fn from_ring<I, P>(points: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Vec2>,
    {
        let mut ring = dedup_ring(points.into_iter().map(Into::into).collect());
        remove_collinear(&mut ring);
        if ring.len() < 3 || ring.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Self::empty();
        }
        if ring_signed_area(&ring).abs() <= AREA_EPSILON {
            return Self::empty();
        }
        Self { points: into_ccw(ring) }
    }

    /// Boundary vertices in counter-clockwise order, without closing point
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Number of vertices
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether this is the empty polygon
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace signed area; positive for every non-empty polygon
    pub fn signed_area(&self) -> f64 {
        ring_signed_area(&self.points)
    }

    /// Enclosed area (0 for the empty polygon)
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the boundary winds counter-clockwise
    ///
    /// False for the empty polygon, which has no orientation.
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Area-weighted centroid, `None` for the empty polygon
    pub fn centroid(&self) -> Option<Vec2> {
        let area = self.signed_area();
        if self.is_empty() || area.abs() <= AREA_EPSILON {
            return None;
        }
        let mut cx = 0.0;
        let mut cy = 0.0;
        for (a, b) in self.edges() {
            let w = a.cross(b);
            cx += (a.x + b.x) * w;
            cy += (a.y + b.y) * w;
        }
        Some(Vec2::new(cx / (6.0 * area), cy / (6.0 * area)))
    }

    /// Axis-aligned bounds as (min, max), `None` for the empty polygon
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Vec2::new(lo.x.min(p.x), lo.y.min(p.y)),
                Vec2::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Directed boundary edges, closing edge included
    pub fn edges(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        let n = self.points.len();
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }

    /// Copy moved by `offset`
    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            points: self.points.iter().map(|&p| p + offset).collect(),
        }
    }

    /// Copy with every vertex snapped to a grid of the given spacing
    ///
    /// May collapse to the empty polygon when the shape is smaller than a
    /// grid cell.
    pub fn snapped(&self, grid: f64) -> Self {
        Self::from_ring(self.points.iter().map(|p| p.snapped(grid)))
    }
}

/// Shoelace signed area of an open ring (positive when counter-clockwise)
pub fn ring_signed_area(ring: &[Vec2]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n).map(|i| ring[i].cross(ring[(i + 1) % n])).sum();
    0.5 * twice
}

/// Drop repeated consecutive points and the closing duplicate
fn dedup_ring(mut ring: Vec<Vec2>) -> Vec<Vec2> {
    ring.dedup();
    while ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Remove vertices lying on the line through their neighbours
fn remove_collinear(ring: &mut Vec<Vec2>) {
    let mut changed = true;
    while changed && ring.len() >= 3 {
        changed = false;
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let e1 = cur - prev;
            let e2 = next - cur;
            let scale = e1.length() * e2.length();
            if e1.cross(e2).abs() <= COLLINEAR_EPSILON * scale.max(f64::MIN_POSITIVE) {
                ring.remove(i);
                changed = true;
                break;
            }
        }
    }
}

fn into_ccw(mut ring: Vec<Vec2>) -> Vec<Vec2> {
    if ring_signed_area(&ring) < 0.0 {
        ring.reverse();
    }
    ring
}

fn orient(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    let o = (b - a).cross(c - a);
    if o.abs() <= ORIENTATION_EPSILON {
        0.0
    } else {
        o
    }
}

fn within_box(a: Vec2, b: Vec2, p: Vec2) -> bool {
    p.x >= a.x.min(b.x) - ORIENTATION_EPSILON
        && p.x <= a.x.max(b.x) + ORIENTATION_EPSILON
        && p.y >= a.y.min(b.y) - ORIENTATION_EPSILON
        && p.y <= a.y.max(b.y) + ORIENTATION_EPSILON
}

/// Whether closed segments p1-p2 and q1-q2 share at least one point
fn segments_touch(p1: Vec2, p2: Vec2, q1: Vec2, q2: Vec2) -> bool {
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);

    if d1 * d2 < 0.0 && d3 * d4 < 0.0 {
        return true;
    }

    (d1 == 0.0 && within_box(q1, q2, p1))
        || (d2 == 0.0 && within_box(q1, q2, p2))
        || (d3 == 0.0 && within_box(p1, p2, q1))
        || (d4 == 0.0 && within_box(p1, p2, q2))
}

/// First pair of non-adjacent edges that touch, by starting vertex index
fn first_self_intersection(ring: &[Vec2]) -> Option<(usize, usize)> {
    let n = ring.len();
    for i in 0..n {
        for j in (i + 2)..n {
            // the closing edge is adjacent to the first one
            if i == 0 && j == n - 1 {
                continue;
            }
            if segments_touch(ring[i], ring[(i + 1) % n], ring[j], ring[(j + 1) % n]) {
                return Some((i, j));
            }
        }
    }
    None
}
