//! Small math helpers on top of nalgebra

use nalgebra::Matrix4;

/// Off-center perspective projection, the fixed-function `glFrustum` matrix.
///
/// nalgebra only offers the symmetric [`nalgebra::Perspective3`] form; the
/// gears scene uses the asymmetric-capable variant with a fixed ±1 horizontal
/// extent and a vertical extent scaled by the aspect ratio.
#[rustfmt::skip]
pub fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4<f32> {
    let a = (right + left) / (right - left);
    let b = (top + bottom) / (top - bottom);
    let c = -(far + near) / (far - near);
    let d = -(2.0 * far * near) / (far - near);
    Matrix4::new(
        2.0 * near / (right - left), 0.0,                         a,    0.0,
        0.0,                         2.0 * near / (top - bottom), b,    0.0,
        0.0,                         0.0,                         c,    d,
        0.0,                         0.0,                         -1.0, 0.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Perspective3, Point3};

    #[test]
    fn test_symmetric_frustum_matches_perspective() {
        let (near, far) = (5.0_f32, 60.0_f32);
        let top = 0.75_f32;
        let right = 1.0_f32;
        let fovy = 2.0 * (top / near).atan();
        let aspect = right / top;

        let expected = Perspective3::new(aspect, fovy, near, far).to_homogeneous();
        let actual = frustum(-right, right, -top, top, near, far);
        assert_relative_eq!(actual, expected, epsilon = 1e-5);
    }

    #[test]
    fn test_near_plane_corners_map_to_clip_extents() {
        let m = frustum(-1.0, 1.0, -1.0, 1.0, 1.0, 3.0);

        let corner = m.transform_point(&Point3::new(1.0, 1.0, -1.0));
        assert_relative_eq!(corner.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(corner.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(corner.z, -1.0, epsilon = 1e-6);

        let far_center = m.transform_point(&Point3::new(0.0, 0.0, -3.0));
        assert_relative_eq!(far_center.z, 1.0, epsilon = 1e-6);
    }
}
