//! Extrusion of plane polygons into prisms
//!
//! A [`Prism`] is the drawable description of one block: both cap rings,
//! the wireframe edges, one quad per side, and whether the caps are convex
//! (a renderer can draw convex caps as a single polygon, concave ones need
//! tessellation).
//!
//! ## Index layout
//!
//! For an `N`-vertex polygon, vertices `0..N` are the bottom ring at `z = 0`
//! in *reversed* order (so the bottom cap winds counter-clockwise when seen
//! from below) and vertices `N..2N` are the top ring at `z = depth` in the
//! original order. Bottom index `i` therefore holds original vertex
//! `N - 1 - i`, which sits directly below top index `2N - 1 - i`.

use stackplus_math::{Vec2, Vec3};

use crate::{GeoKernel, Polygon2D, PolygonKernel};

/// Default extrusion depth
pub const DEFAULT_DEPTH: f64 = 1.0;

/// Relative tolerance when comparing a polygon's area to its hull's
const CONVEX_TOLERANCE: f64 = 1e-9;

/// Read-only mesh description of an extruded polygon
#[derive(Clone, Debug, PartialEq)]
pub struct Prism {
    vertices: Vec<Vec3>,
    edges: Vec<[usize; 2]>,
    cap_faces: Vec<Vec<usize>>,
    side_faces: Vec<[usize; 4]>,
    is_convex: bool,
    depth: f64,
}

impl Prism {
    /// The prism of a degenerate polygon: nothing to draw
    pub fn empty() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            cap_faces: Vec::new(),
            side_faces: Vec::new(),
            is_convex: true,
            depth: 0.0,
        }
    }

    /// Bottom ring (reversed, z = 0) followed by top ring (z = depth)
    #[inline]
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Bottom ring, top ring, then vertical connector index pairs
    #[inline]
    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    /// Exactly two index loops (bottom, top), or none when empty
    #[inline]
    pub fn cap_faces(&self) -> &[Vec<usize>] {
        &self.cap_faces
    }

    /// One quad per original edge as (BL, BR, TR, TL)
    #[inline]
    pub fn side_faces(&self) -> &[[usize; 4]] {
        &self.side_faces
    }

    /// Whether the caps are convex
    #[inline]
    pub fn is_convex(&self) -> bool {
        self.is_convex
    }

    /// Extrusion depth (0 for the empty prism)
    #[inline]
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Vertex count of one ring
    #[inline]
    pub fn ring_len(&self) -> usize {
        self.vertices.len() / 2
    }

    /// Whether there is nothing to draw
    ///
    /// An empty prism is the loss condition of a round.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 6
    }
}

/// Builds [`Prism`]s, using a [`PolygonKernel`] for the convexity test
#[derive(Clone, Debug, Default)]
pub struct Extruder<K: PolygonKernel = GeoKernel> {
    kernel: K,
}

impl Extruder<GeoKernel> {
    /// Extruder backed by the `geo` kernel
    pub fn new() -> Self {
        Self { kernel: GeoKernel }
    }
}

impl<K: PolygonKernel> Extruder<K> {
    /// Extruder backed by a custom kernel
    pub fn with_kernel(kernel: K) -> Self {
        Self { kernel }
    }

    /// Whether the polygon's area equals its convex hull's area
    ///
    /// Vacuously true for degenerate input.
    pub fn is_convex(&self, polygon: &Polygon2D) -> bool {
        if polygon.len() < 3 {
            return true;
        }
        let area = self.kernel.area(polygon);
        let hull_area = self.kernel.area(&self.kernel.convex_hull(polygon));
        (hull_area - area).abs() <= CONVEX_TOLERANCE * hull_area.max(1.0)
    }

    /// Extrude `polygon` from `z = 0` up to `z = depth`
    ///
    /// Input with fewer than three vertices (including the empty polygon)
    /// produces [`Prism::empty`].
    pub fn extrude(&self, polygon: &Polygon2D, depth: f64) -> Prism {
        let n = polygon.len();
        if n < 3 {
            log::debug!("Extruding degenerate polygon ({} vertices), returning empty prism", n);
            return Prism::empty();
        }
        let ring: &[Vec2] = polygon.points();

        let vertices: Vec<Vec3> = ring
            .iter()
            .rev()
            .map(|&p| Vec3::from_xy(p, 0.0))
            .chain(ring.iter().map(|&p| Vec3::from_xy(p, depth)))
            .collect();

        let prev = |i: usize| (i + n - 1) % n;

        let mut edges = Vec::with_capacity(3 * n);
        // bottom ring
        edges.extend((0..n).map(|i| [i, prev(i)]));
        // top ring
        edges.extend((0..n).map(|i| [i + n, prev(i) + n]));
        // vertical connectors
        edges.extend((0..n).map(|i| [i, 2 * n - 1 - i]));

        let cap_faces = vec![(0..n).collect(), (n..2 * n).collect()];

        let side_faces = (0..n)
            .map(|i| {
                [
                    i,               // BL
                    prev(i),         // BR
                    (n - i) % n + n, // TR
                    2 * n - 1 - i,   // TL
                ]
            })
            .collect();

        Prism {
            vertices,
            edges,
            cap_faces,
            side_faces,
            is_convex: self.is_convex(polygon),
            depth,
        }
    }
}

/// Extrude with the default kernel
pub fn extrude(polygon: &Polygon2D, depth: f64) -> Prism {
    Extruder::new().extrude(polygon, depth)
}
