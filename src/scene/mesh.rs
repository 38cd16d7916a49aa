use std::f32::consts::PI;

use nalgebra as na;
use na::Point3;

/// Owned vertex and index buffers of a triangle mesh.
/// Winding is the same for every triangle: the right-handed face normal points away from the center.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Point3<f32>>,
    indices: Vec<usize>,
}

impl Mesh {
    /// Unit UV-sphere with `rings` latitude rings (poles included) and `segments` longitude steps.
    /// The first and the last longitude columns coincide, they are separate vertices.
    ///
    /// Needs `rings >= 3` and `segments >= 2`.
    pub fn uv_sphere(segments: usize, rings: usize) -> Mesh {
        let width = segments;
        let height = rings;
        let num_vertices = (height - 2) * width + 2;
        let num_triangles = (height - 2) * (width - 1) * 2;

        let mut vertices = Vec::with_capacity(num_vertices);
        // Interior rings, top to bottom.
        for j in 1..height - 1 {
            let theta = j as f32 / (height - 1) as f32 * PI;
            for i in 0..width {
                let phi = i as f32 / (width - 1) as f32 * 2.0 * PI;
                vertices.push(Point3::new(
                    theta.sin() * phi.cos(),
                    theta.cos(),
                    -theta.sin() * phi.sin(),
                ));
            }
        }
        let north = vertices.len();
        vertices.push(Point3::new(0.0, 1.0, 0.0));
        let south = vertices.len();
        vertices.push(Point3::new(0.0, -1.0, 0.0));

        let mut indices = Vec::with_capacity(3 * num_triangles);
        for j in 0..height - 3 {
            let row_0 = j * width;
            let row_1 = (j + 1) * width;
            for i in 0..width - 1 {
                indices.extend_from_slice(&[row_0 + i, row_1 + i + 1, row_0 + i + 1]);
                indices.extend_from_slice(&[row_0 + i, row_1 + i, row_1 + i + 1]);
            }
        }
        // Fans from the first ring to the north pole and from the last ring to the south pole.
        let last_ring = (height - 3) * width;
        for i in 0..width - 1 {
            indices.extend_from_slice(&[north, i, i + 1]);
            indices.extend_from_slice(&[south, last_ring + i + 1, last_ring + i]);
        }

        debug_assert_eq!(vertices.len(), num_vertices);
        debug_assert_eq!(indices.len(), 3 * num_triangles);
        return Mesh { vertices, indices };
    }

    pub fn num_vertices(&self) -> usize {
        return self.vertices.len();
    }

    pub fn num_triangles(&self) -> usize {
        return self.indices.len() / 3;
    }

    pub fn vertices(&self) -> &[Point3<f32>] {
        return &self.vertices[..];
    }

    pub fn indices(&self) -> &[usize] {
        return &self.indices[..];
    }

    /// Index triples in winding order.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|triangle| [triangle[0], triangle[1], triangle[2]])
    }
}
