//! 4x4 Matrix utilities for affine transformations
//!
//! Matrices are column-major (`m[column][row]`), matching the layout a
//! fixed-function modelview stack hands back. Points are treated as column
//! vectors: `p' = M * p`. Multiplying a homogeneous row vector by the
//! row-major reading of the same array gives the identical result.

use crate::{Vec2, Vec3};

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f64; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Create a rotation matrix in the plane spanned by two axes.
///
/// # Arguments
/// * `angle` - Rotation angle in radians
/// * `p1`, `p2` - Indices of the axes forming the rotation plane (0=X, 1=Y, 2=Z)
///
/// Rotates `p1` towards `p2`; `plane_rotation(a, 0, 1)` is a
/// counter-clockwise rotation about Z.
///
/// # Example
/// ```
/// use stackplus_math::mat4::plane_rotation;
/// // Rotation about the vertical axis
/// let yaw = plane_rotation(0.5, 0, 1);
/// ```
pub fn plane_rotation(angle: f64, p1: usize, p2: usize) -> Mat4 {
    let cs = angle.cos();
    let sn = angle.sin();

    let mut m = IDENTITY;

    m[p1][p1] = cs;
    m[p2][p2] = cs;
    m[p1][p2] = sn;
    m[p2][p1] = -sn;

    m
}

/// Rotation about the vertical (Z) axis, angle in degrees
pub fn rotation_z_degrees(theta: f64) -> Mat4 {
    plane_rotation(theta.to_radians(), 0, 1)
}

/// Rotation about the X axis, angle in degrees (camera tilt)
pub fn rotation_x_degrees(theta: f64) -> Mat4 {
    plane_rotation(theta.to_radians(), 1, 2)
}

/// Translation matrix
pub fn translation(dx: f64, dy: f64, dz: f64) -> Mat4 {
    let mut m = IDENTITY;
    m[3][0] = dx;
    m[3][1] = dy;
    m[3][2] = dz;
    m
}

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f64; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a homogeneous 4-vector: result = M * v
pub fn transform(m: Mat4, v: [f64; 4]) -> [f64; 4] {
    let mut out = [0.0f64; 4];
    for (row, value) in out.iter_mut().enumerate() {
        *value = m[0][row] * v[0] + m[1][row] * v[1] + m[2][row] * v[2] + m[3][row] * v[3];
    }
    out
}

/// Transform a 3D point (w = 1), discarding the resulting w
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    let [x, y, z, _] = transform(m, [p.x, p.y, p.z, 1.0]);
    Vec3::new(x, y, z)
}

/// Transform a point of the z=0 plane and flatten the result back onto it
///
/// The point is homogenized as (x, y, 0, 1); z and w of the result are dropped.
pub fn transform_flat(m: Mat4, p: Vec2) -> Vec2 {
    let [x, y, _, _] = transform(m, [p.x, p.y, 0.0, 1.0]);
    Vec2::new(x, y)
}

/// Transpose a matrix
pub fn transpose(m: Mat4) -> Mat4 {
    [
        [m[0][0], m[1][0], m[2][0], m[3][0]],
        [m[0][1], m[1][1], m[2][1], m[3][1]],
        [m[0][2], m[1][2], m[2][2], m[3][2]],
        [m[0][3], m[1][3], m[2][3], m[3][3]],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !approx_eq(a[i][j], b[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform_point(IDENTITY, p), p));
    }

    #[test]
    fn test_plane_rotation_xy() {
        use std::f64::consts::FRAC_PI_2;

        let m = plane_rotation(FRAC_PI_2, 0, 1);

        // X should go to Y
        let result = transform_point(m, Vec3::new(1.0, 0.0, 0.0));
        assert!(vec_approx_eq(result, Vec3::new(0.0, 1.0, 0.0)),
            "X should become Y, got {:?}", result);

        // Y should go to -X
        let result = transform_point(m, Vec3::new(0.0, 1.0, 0.0));
        assert!(vec_approx_eq(result, Vec3::new(-1.0, 0.0, 0.0)),
            "Y should become -X, got {:?}", result);

        // Z should be unchanged
        let z = Vec3::new(0.0, 0.0, 1.0);
        assert!(vec_approx_eq(transform_point(m, z), z));
    }

    #[test]
    fn test_rotation_z_degrees() {
        let m = rotation_z_degrees(90.0);
        let result = transform_flat(m, Vec2::new(1.0, 0.0));
        assert!(result.approx_eq(Vec2::new(0.0, 1.0), EPSILON), "got {:?}", result);
    }

    #[test]
    fn test_rotation_x_tilts_y_into_z() {
        let m = rotation_x_degrees(90.0);
        let result = transform_point(m, Vec3::new(0.0, 1.0, 0.0));
        assert!(vec_approx_eq(result, Vec3::new(0.0, 0.0, 1.0)), "got {:?}", result);
    }

    #[test]
    fn test_translation() {
        let m = translation(1.0, 2.0, 3.0);
        let result = transform_point(m, Vec3::ZERO);
        assert!(vec_approx_eq(result, Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_translate_then_rotate_order() {
        // T * R rotates about the local origin first, then moves
        let m = mul(translation(10.0, 0.0, 0.0), rotation_z_degrees(90.0));
        let result = transform_flat(m, Vec2::new(1.0, 0.0));
        assert!(result.approx_eq(Vec2::new(10.0, 1.0), EPSILON), "got {:?}", result);
    }

    #[test]
    fn test_transform_flat_drops_z() {
        let m = translation(0.0, 0.0, -1.0);
        let result = transform_flat(m, Vec2::new(0.5, 0.25));
        assert!(result.approx_eq(Vec2::new(0.5, 0.25), EPSILON));
    }

    #[test]
    fn test_mul_identity() {
        let a = plane_rotation(0.5, 0, 1);
        assert!(mat_approx_eq(a, mul(IDENTITY, a)));
        assert!(mat_approx_eq(a, mul(a, IDENTITY)));
    }

    #[test]
    fn test_mul_composition() {
        let r45 = rotation_z_degrees(45.0);
        let r90 = rotation_z_degrees(90.0);
        assert!(mat_approx_eq(mul(r45, r45), r90));
    }

    #[test]
    fn test_transpose_involution() {
        let m = mul(translation(1.0, 2.0, 3.0), rotation_z_degrees(30.0));
        assert!(mat_approx_eq(transpose(transpose(m)), m));
        assert!(approx_eq(transpose(m)[0][3], 1.0));
    }
}
