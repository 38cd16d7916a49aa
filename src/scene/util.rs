use nalgebra as na;
use na::{matrix, vector, Matrix4, Point3, Vector4};

/// Transformation of a point to homogenous coordinates.
pub fn to_hom_point(v: Point3<f32>) -> Vector4<f32> {
    return vector![v.x, v.y, v.z, 1.0];
}

/// Perspective divide of a clip-space vector.
/// No guard against w == 0, the caller decides what a non-positive w means.
pub fn perspective_divide(v: Vector4<f32>) -> Vector4<f32> {
    return vector![v.x / v.w, v.y / v.w, v.z / v.w, 1.0];
}

pub fn identity() -> Matrix4<f32> {
    return Matrix4::identity();
}

/// Identity with the translation column set.
pub fn translate(tx: f32, ty: f32, tz: f32) -> Matrix4<f32> {
    let mut m = identity();
    m[(0, 3)] = tx;
    m[(1, 3)] = ty;
    m[(2, 3)] = tz;
    return m;
}

/// Identity with the diagonal set.
pub fn scale(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
    let mut m = identity();
    m[(0, 0)] = sx;
    m[(1, 1)] = sy;
    m[(2, 2)] = sz;
    return m;
}

/// Off-axis perspective projection.
/// `near` and `far` are positive distances along the view direction (-z).
pub fn perspective(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Matrix4<f32> {
    let (l, r, b, t, n, f) = (left, right, bottom, top, near, far);
    return matrix![2.0 * n / (r - l), 0.0,               (r + l) / (r - l),  0.0;
                   0.0,               2.0 * n / (t - b), (t + b) / (t - b),  0.0;
                   0.0,               0.0,               -(f + n) / (f - n), -2.0 * f * n / (f - n);
                   0.0,               0.0,               -1.0,               0.0];
}

/// Same as `perspective`, but near and far are given as z values of the planes.
/// Camera looks down -z, so both are negative.
pub fn frustum_from_z_planes(left: f32, right: f32, bottom: f32, top: f32, near_z: f32, far_z: f32) -> Matrix4<f32> {
    return perspective(left, right, bottom, top, -near_z, -far_z);
}

/// Maps NDC cube [-1, 1]^3 to pixel space, depth goes to [0, 1].
/// Pixel centers of an nx x ny grid over the NDC square land on integer coordinates.
pub fn viewport(nx: u32, ny: u32) -> Matrix4<f32> {
    let mut m = identity();
    m[(0, 0)] = nx as f32 / 2.0;
    m[(0, 3)] = (nx as f32 - 1.0) / 2.0;
    m[(1, 1)] = ny as f32 / 2.0;
    m[(1, 3)] = (ny as f32 - 1.0) / 2.0;
    m[(2, 2)] = 0.5;
    m[(2, 3)] = 0.5;
    return m;
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_matrix() -> impl Strategy<Value = Matrix4<f32>> {
        prop::collection::vec(-2.0f32..2.0, 16).prop_map(|values| Matrix4::from_row_slice(&values))
    }

    fn assert_matrix_close(a: &Matrix4<f32>, b: &Matrix4<f32>, tolerance: f32) {
        for i in 0..4 {
            for j in 0..4 {
                let scale = 1.0f32.max(a[(i, j)].abs()).max(b[(i, j)].abs());
                assert!(
                    (a[(i, j)] - b[(i, j)]).abs() <= tolerance * scale,
                    "element ({}, {}) differs: {} vs {}", i, j, a[(i, j)], b[(i, j)]
                );
            }
        }
    }

    proptest! {
        #[test]
        fn multiplication_is_associative(a in any_matrix(), b in any_matrix(), c in any_matrix()) {
            assert_matrix_close(&((a * b) * c), &(a * (b * c)), 1e-3);
        }

        #[test]
        fn identity_is_exact_on_both_sides(a in any_matrix()) {
            prop_assert_eq!(identity() * a, a);
            prop_assert_eq!(a * identity(), a);
        }
    }

    #[test]
    fn translate_moves_points() {
        let p = translate(1.0, -2.0, 3.0) * to_hom_point(Point3::new(1.0, 1.0, 1.0));
        assert_eq!(p, vector![2.0, -1.0, 4.0, 1.0]);
    }

    #[test]
    fn translate_ignores_directions() {
        let d = translate(5.0, 5.0, 5.0) * vector![1.0, 0.0, 0.0, 0.0];
        assert_eq!(d, vector![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn scale_sets_diagonal() {
        let m = scale(2.0, 3.0, 4.0);
        assert_eq!(m.diagonal(), vector![2.0, 3.0, 4.0, 1.0]);
        assert_eq!(m * vector![1.0, 1.0, 1.0, 1.0], vector![2.0, 3.0, 4.0, 1.0]);
    }

    #[test]
    fn perspective_maps_near_and_far_planes_to_ndc_bounds() {
        let p = frustum_from_z_planes(-0.1, 0.1, -0.1, 0.1, -0.1, -1000.0);
        let near = perspective_divide(p * vector![0.1, 0.1, -0.1, 1.0]);
        assert!((near.x - 1.0).abs() < 1e-5);
        assert!((near.y - 1.0).abs() < 1e-5);
        assert!((near.z + 1.0).abs() < 1e-4);
        let far = perspective_divide(p * vector![-1000.0, 0.0, -1000.0, 1.0]);
        assert!((far.x + 1.0).abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-4);
    }

    #[test]
    fn frustum_from_z_planes_negates_distances() {
        let a = frustum_from_z_planes(-1.0, 2.0, -3.0, 4.0, -0.5, -50.0);
        let b = perspective(-1.0, 2.0, -3.0, 4.0, 0.5, 50.0);
        assert_eq!(a, b);
    }

    #[test]
    fn perspective_divide_sets_w_to_one() {
        let v = perspective_divide(vector![2.0, 4.0, 6.0, 2.0]);
        assert_eq!(v, vector![1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn viewport_corners_land_on_outer_pixel_edges() {
        for &(nx, ny) in &[(512u32, 512u32), (640, 480), (7, 3), (1, 1)] {
            let w = viewport(nx, ny);
            let low = w * vector![-1.0, -1.0, -1.0, 1.0];
            let high = w * vector![1.0, 1.0, 1.0, 1.0];
            // Pixel i spans [i - 0.5, i + 0.5].
            assert_eq!((low.x, low.y, low.z), (-0.5, -0.5, 0.0));
            assert_eq!((high.x, high.y, high.z), (nx as f32 - 0.5, ny as f32 - 0.5, 1.0));
        }
    }

    #[test]
    fn viewport_maps_corner_pixel_centers_to_first_and_last_pixel() {
        for &(nx, ny) in &[(512u32, 512u32), (640, 480), (7, 3)] {
            let w = viewport(nx, ny);
            let first = w * vector![-1.0 + 1.0 / nx as f32, -1.0 + 1.0 / ny as f32, 0.0, 1.0];
            let last = w * vector![1.0 - 1.0 / nx as f32, 1.0 - 1.0 / ny as f32, 0.0, 1.0];
            assert!(first.x.abs() < 1e-3 && first.y.abs() < 1e-3);
            assert!((last.x - (nx - 1) as f32).abs() < 1e-3);
            assert!((last.y - (ny - 1) as f32).abs() < 1e-3);
            assert_eq!(first.z, 0.5);
        }
    }
}
