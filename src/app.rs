use std::path::PathBuf;

use crate::bitmap;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::scene::util::identity;
use crate::scene::{Coverage, FrameBuffer, Mesh, Rasterizer, ScreenPoint, Transform};

/// Everything a run needs, resolved from the command line and the config file.
pub struct Context {
    pub config: RenderConfig,
    /// Where the config came from, for logging. None means built-in defaults.
    pub config_path: Option<PathBuf>,
}

/// Counters of one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub triangles: usize,
    pub culled: usize,
    pub drawn_pixels: usize,
    /// Vertices with clip-space w <= 0, their screen coordinates are meaningless.
    pub non_positive_w: usize,
}

/// Model, view, projection and viewport of the configured scene.
pub fn build_transform(config: &RenderConfig) -> Transform {
    return Transform::new(
        config.model.matrix(),
        identity(),
        config.camera.projection(),
        config.width,
        config.height,
    );
}

/// One pass over all triangles of `mesh`.
pub fn render(config: &RenderConfig, mesh: &Mesh) -> (FrameBuffer, RenderStats) {
    let transform = build_transform(config);
    let mut frame_buffer = FrameBuffer::new(config.width, config.height);
    let rasterizer = Rasterizer::default();
    let mut stats = RenderStats { triangles: mesh.num_triangles(), ..Default::default() };

    // Every vertex goes through the pipeline once, triangles look the results up.
    let projected: Vec<ScreenPoint> = mesh
        .vertices()
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let p = transform.transform_vertex(v);
            if p.is_behind_eye() {
                log::warn!("Vertex {} has non-positive clip w ({}), no clipping is done", i, p.clip_w);
                stats.non_positive_w += 1;
            }
            p
        })
        .collect();

    for [i0, i1, i2] in mesh.triangles() {
        match rasterizer.draw_triangle(&mut frame_buffer, projected[i0], projected[i1], projected[i2]) {
            Coverage::Culled => stats.culled += 1,
            Coverage::Rasterized(drawn) => stats.drawn_pixels += drawn,
        }
    }

    log::debug!(
        "Rasterized {} of {} triangles ({} culled)",
        stats.triangles - stats.culled,
        stats.triangles,
        stats.culled
    );
    return (frame_buffer, stats);
}

/// Builds the scene, renders it and writes the bitmap(s).
pub fn run(context: Context) -> Result<RenderStats> {
    let config = context.config;
    match &context.config_path {
        Some(path) => log::info!("Using config {}", path.display()),
        None => log::info!("Using built-in scene config"),
    }

    let mesh = Mesh::uv_sphere(config.sphere.segments, config.sphere.rings);
    println!("NumVertices={}, NumTriangles={}", mesh.num_vertices(), mesh.num_triangles());

    let v0 = build_transform(&config).transform_vertex(mesh.vertices()[0]);
    println!("Screen coord of v0: x={:.2}, y={:.2}, z={:.2}", v0.x, v0.y, v0.z);

    let (frame_buffer, stats) = render(&config, &mesh);
    println!("Total pixels drawn: {}", stats.drawn_pixels);

    bitmap::save(&config.output, frame_buffer.color())?;
    log::info!("Wrote {}x{} image to {}", config.width, config.height, config.output.display());

    if let Some(depth_output) = &config.depth_output {
        bitmap::save(depth_output, &frame_buffer.depth_image())?;
        log::info!("Wrote depth image to {}", depth_output.display());
    }

    return Ok(stats);
}
