//! Re-projection of a posed polygon onto the stacking plane
//!
//! A block is drawn at some pose (translation plus yaw). To stack it, its
//! footprint has to be expressed back in the plane's 2D frame. [`apply`]
//! pushes every vertex through the pose matrix as `(x, y, 0, 1)` and keeps
//! the resulting `(x, y)`. This is a flattening, not a camera projection: the
//! caller picks a matrix whose net effect keeps the plane of interest at
//! z = 0 (a flat-on view).
//!
//! The matrix itself comes from a [`MatrixSource`], so the view state used
//! for drawing can be injected.

use serde::{Serialize, Deserialize};
use stackplus_math::{mat4, Mat4};

use crate::Polygon2D;

/// Translation plus rotation about the vertical axis
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation along X
    pub dx: f64,
    /// Translation along Y
    pub dy: f64,
    /// Translation along Z (height)
    pub dz: f64,
    /// Yaw about Z in degrees, counter-clockwise
    pub theta: f64,
}

impl Transform {
    /// The transform that changes nothing
    pub const IDENTITY: Self = Self { dx: 0.0, dy: 0.0, dz: 0.0, theta: 0.0 };

    /// Create a transform from translation and yaw (degrees)
    pub const fn new(dx: f64, dy: f64, dz: f64, theta: f64) -> Self {
        Self { dx, dy, dz, theta }
    }

    /// Pure translation
    pub const fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::new(dx, dy, dz, 0.0)
    }

    /// Same translation, different yaw
    pub const fn with_theta(self, theta: f64) -> Self {
        Self { theta, ..self }
    }

    /// Model matrix: rotate about Z, then translate
    pub fn to_matrix(&self) -> Mat4 {
        mat4::mul(
            mat4::translation(self.dx, self.dy, self.dz),
            mat4::rotation_z_degrees(self.theta),
        )
    }
}

/// Produces the matrix that moves a polygon by a pose
///
/// Any `Fn(dx, dy, dz, theta_degrees) -> Mat4` is a source, so a renderer can
/// hand in a closure over its own view state.
pub trait MatrixSource {
    /// Matrix for the given translation and yaw (degrees)
    fn matrix_for(&self, dx: f64, dy: f64, dz: f64, theta: f64) -> Mat4;

    /// Matrix for a [`Transform`]
    fn matrix(&self, transform: &Transform) -> Mat4 {
        self.matrix_for(transform.dx, transform.dy, transform.dz, transform.theta)
    }
}

impl<F> MatrixSource for F
where
    F: Fn(f64, f64, f64, f64) -> Mat4,
{
    fn matrix_for(&self, dx: f64, dy: f64, dz: f64, theta: f64) -> Mat4 {
        self(dx, dy, dz, theta)
    }
}

/// Modelview of a camera looking straight down, optionally tilted about X
///
/// The matrix is `tilt * translate * rotate_z`. Stacking uses a zero tilt so
/// the flattened footprint matches the plane; drawing uses an isometric tilt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatView {
    /// Tilt about X in degrees
    pub tilt: f64,
}

impl FlatView {
    /// Flat-on view, the one used for stacking
    pub const FLAT: Self = Self { tilt: 0.0 };

    /// View tilted about X by `tilt` degrees
    pub const fn tilted(tilt: f64) -> Self {
        Self { tilt }
    }
}

impl MatrixSource for FlatView {
    fn matrix_for(&self, dx: f64, dy: f64, dz: f64, theta: f64) -> Mat4 {
        let model = Transform::new(dx, dy, dz, theta).to_matrix();
        if self.tilt == 0.0 {
            model
        } else {
            mat4::mul(mat4::rotation_x_degrees(self.tilt), model)
        }
    }
}

/// Push a polygon through a matrix and flatten it back onto z = 0
///
/// The result is re-wound counter-clockwise. Empty input, or an image that
/// collapses to zero area, yields the empty polygon.
pub fn apply(polygon: &Polygon2D, matrix: &Mat4) -> Polygon2D {
    if polygon.is_empty() {
        return Polygon2D::empty();
    }
    let result = Polygon2D::from_ring(
        polygon
            .points()
            .iter()
            .map(|&p| mat4::transform_flat(*matrix, p)),
    );
    if result.is_empty() {
        log::debug!("Spatial transform collapsed a {}-gon to nothing", polygon.len());
    }
    result
}

/// [`apply`] with the matrix a [`MatrixSource`] gives for `transform`
pub fn apply_pose<S: MatrixSource + ?Sized>(
    polygon: &Polygon2D,
    transform: &Transform,
    source: &S,
) -> Polygon2D {
    apply(polygon, &source.matrix(transform))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackplus_math::Vec2;

    const EPSILON: f64 = 1e-9;

    fn square() -> Polygon2D {
        Polygon2D::new(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]).unwrap()
    }

    fn l_hexagon() -> Polygon2D {
        Polygon2D::new(vec![
            (0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_identity_round_trip() {
        for poly in [square(), l_hexagon()] {
            let out = apply_pose(&poly, &Transform::IDENTITY, &FlatView::FLAT);
            assert_eq!(out.len(), poly.len());
            for (a, b) in poly.points().iter().zip(out.points()) {
                assert!(a.approx_eq(*b, EPSILON), "{:?} != {:?}", a, b);
            }
            assert!((out.area() - poly.area()).abs() < EPSILON);
        }
    }

    #[test]
    fn test_translation_moves_points() {
        let out = apply_pose(&square(), &Transform::translation(2.0, -1.0, 5.0), &FlatView::FLAT);
        let (lo, hi) = out.bounds().unwrap();
        assert!(lo.approx_eq(Vec2::new(2.0, -1.0), EPSILON));
        assert!(hi.approx_eq(Vec2::new(3.0, 0.0), EPSILON));
    }

    #[test]
    fn test_rotation_preserves_area_and_winding() {
        let poly = l_hexagon();
        for theta in [0.0, 45.0, 90.0, 135.0, 270.0, 355.0] {
            let out = apply_pose(&poly, &Transform::new(0.5, 0.5, -1.0, theta), &FlatView::FLAT);
            assert!(out.is_ccw(), "theta {} lost CCW winding", theta);
            assert!((out.area() - poly.area()).abs() < 1e-6, "theta {}", theta);
        }
    }

    #[test]
    fn test_mirror_matrix_is_rewound() {
        let mut mirror = stackplus_math::mat4::IDENTITY;
        mirror[0][0] = -1.0;
        let out = apply(&square(), &mirror);
        assert!(out.is_ccw());
        assert!((out.area() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_edge_on_view_collapses() {
        // Tilted 90 degrees the plane is seen edge-on: every y maps to 0
        let out = apply_pose(&square(), &Transform::IDENTITY, &FlatView::tilted(90.0));
        assert!(out.is_empty());
    }

    #[test]
    fn test_empty_input_stays_empty() {
        let out = apply_pose(&Polygon2D::empty(), &Transform::new(1.0, 1.0, 0.0, 30.0), &FlatView::FLAT);
        assert!(out.is_empty());
    }

    #[test]
    fn test_closure_as_matrix_source() {
        let source = |dx: f64, dy: f64, _dz: f64, _theta: f64| stackplus_math::mat4::translation(dx * 2.0, dy, 0.0);
        let out = apply_pose(&square(), &Transform::translation(1.0, 0.0, 0.0), &source);
        let (lo, _) = out.bounds().unwrap();
        assert!(lo.approx_eq(Vec2::new(2.0, 0.0), EPSILON));
    }

    #[test]
    fn test_transform_matrix_rotates_before_translating() {
        let m = Transform::new(10.0, 0.0, 0.0, 90.0).to_matrix();
        let p = stackplus_math::mat4::transform_flat(m, Vec2::new(1.0, 0.0));
        assert!(p.approx_eq(Vec2::new(10.0, 1.0), EPSILON), "got {:?}", p);
    }
}
