use image::Rgb;
use nalgebra as na;
use na::{vector, Vector3};

use super::buffer::FrameBuffer;
use super::transform::ScreenPoint;

/// What happened to a triangle handed to the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    /// Back-facing or degenerate, no pixel was looked at.
    Culled,
    /// Number of pixels that passed the depth test.
    Rasterized(usize),
}

/// Integer pixel bounds, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x_min: u32,
    pub x_max: u32,
    pub y_min: u32,
    pub y_max: u32,
}

impl BoundingBox {
    /// Floor of the minimum and ceil of the maximum vertex coordinates, clamped to the buffer.
    pub fn of_triangle(v0: ScreenPoint, v1: ScreenPoint, v2: ScreenPoint, width: u32, height: u32) -> Self {
        fn clamp(value: f32, max: u32) -> u32 {
            // `as` saturates and maps NaN to 0.
            return (value as i64).clamp(0, max as i64) as u32;
        }

        let x_min = v0.x.min(v1.x).min(v2.x).floor();
        let x_max = v0.x.max(v1.x).max(v2.x).ceil();
        let y_min = v0.y.min(v1.y).min(v2.y).floor();
        let y_max = v0.y.max(v1.y).max(v2.y).ceil();
        return Self {
            x_min: clamp(x_min, width - 1),
            x_max: clamp(x_max, width - 1),
            y_min: clamp(y_min, height - 1),
            y_max: clamp(y_max, height - 1),
        };
    }
}

/// z component of (v1 - v0) x (v2 - v0) in screen space.
pub fn signed_area(v0: ScreenPoint, v1: ScreenPoint, v2: ScreenPoint) -> f32 {
    let (ex_1, ey_1) = (v1.x - v0.x, v1.y - v0.y);
    let (ex_2, ey_2) = (v2.x - v0.x, v2.y - v0.y);
    return ex_1 * ey_2 - ey_1 * ex_2;
}

/// Barycentric coordinates of (px, py) relative to v0, v1, v2 via signed area ratios.
/// A degenerate triangle yields non-finite weights.
pub fn barycentric(v0: ScreenPoint, v1: ScreenPoint, v2: ScreenPoint, px: f32, py: f32) -> Vector3<f32> {
    let (x0, y0) = (v0.x, v0.y);
    let (x1, y1) = (v1.x, v1.y);
    let (x2, y2) = (v2.x, v2.y);
    let d = (y1 - y2) * (x0 - x2) + (x2 - x1) * (y0 - y2);
    let w0 = ((y1 - y2) * (px - x2) + (x2 - x1) * (py - y2)) / d;
    let w1 = ((y2 - y0) * (px - x2) + (x0 - x2) * (py - y2)) / d;
    return vector![w0, w1, 1.0 - w0 - w1];
}

/// Edge pixels (zero weights) count as covered. NaN never does.
fn is_covered(bar_coord: Vector3<f32>) -> bool {
    return bar_coord.x >= 0.0 && bar_coord.y >= 0.0 && bar_coord.z >= 0.0;
}

/// Flat color triangle rasterizer with back-face culling and z-buffering.
/// Scans the full bounding box of every triangle.
pub struct Rasterizer {
    pub color: Rgb<u8>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        return Self { color: Rgb([255, 255, 255]) };
    }
}

impl Rasterizer {
    pub fn new(color: Rgb<u8>) -> Self {
        return Self { color };
    }

    /// Triangles with non-negative signed area face away from the viewer and are skipped.
    pub fn draw_triangle(&self, frame_buffer: &mut FrameBuffer, v0: ScreenPoint, v1: ScreenPoint, v2: ScreenPoint) -> Coverage {
        if !(signed_area(v0, v1, v2) < 0.0) {
            return Coverage::Culled;
        }

        let bbox = BoundingBox::of_triangle(v0, v1, v2, frame_buffer.width(), frame_buffer.height());
        let z_values = vector![v0.z, v1.z, v2.z];
        let mut drawn = 0;
        for y in bbox.y_min..=bbox.y_max {
            for x in bbox.x_min..=bbox.x_max {
                // Sampling at the pixel center.
                let bar_coord = barycentric(v0, v1, v2, x as f32 + 0.5, y as f32 + 0.5);
                if !is_covered(bar_coord) {
                    continue;
                }
                let z = bar_coord.dot(&z_values);
                if frame_buffer.test_and_set(x, y, z, self.color) {
                    drawn += 1;
                }
            }
        }
        return Coverage::Rasterized(drawn);
    }
}
