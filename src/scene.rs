//! Rendering core: mesh source, linear algebra, transform stage, buffers and rasterizer.
//! Single threaded and infallible.

pub mod buffer;
pub mod mesh;
pub mod raster;
pub mod transform;
pub mod util;

pub use buffer::FrameBuffer;
pub use mesh::Mesh;
pub use raster::{Coverage, Rasterizer};
pub use transform::{ScreenPoint, Transform};
