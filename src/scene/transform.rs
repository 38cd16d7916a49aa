use nalgebra as na;
use na::{Matrix4, Point3};

use super::util::{perspective_divide, to_hom_point, viewport};

/// Vertex after the whole pipeline: pixel x, pixel y and depth in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Clip-space w before the divide. Non-positive means the vertex was behind the eye
    /// and the other coordinates are garbage.
    pub clip_w: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        return Self { x, y, z, clip_w: 1.0 };
    }

    pub fn is_behind_eye(&self) -> bool {
        return !(self.clip_w > 0.0);
    }
}

/// Model, view, projection and viewport matrices, built once and applied to every vertex.
#[derive(Debug, Clone)]
pub struct Transform {
    pub model: Matrix4<f32>,
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub viewport: Matrix4<f32>,
}

impl Transform {
    pub fn new(model: Matrix4<f32>, view: Matrix4<f32>, projection: Matrix4<f32>, width: u32, height: u32) -> Self {
        return Self {
            model,
            view,
            projection,
            viewport: viewport(width, height),
        };
    }

    /// Object space -> clip space -> NDC -> screen.
    /// No clipping happens before the divide.
    pub fn transform_vertex(&self, v: Point3<f32>) -> ScreenPoint {
        let clip = self.projection * (self.view * (self.model * to_hom_point(v)));
        let screen = self.viewport * perspective_divide(clip);
        return ScreenPoint {
            x: screen.x,
            y: screen.y,
            z: screen.z,
            clip_w: clip.w,
        };
    }
}
