//! Minimal software rasterizer.
//!
//! Generates a UV-sphere, pushes it through model, view, projection and viewport transforms,
//! fills front-facing triangles into a z-buffered color buffer and writes the result as an
//! uncompressed 24-bit BMP.
//!
//! - [`scene`]: mesh source, matrices, transform stage, buffers, rasterizer
//! - [`bitmap`]: BMP encoding
//! - [`config`]: scene and output settings
//! - [`app`]: single render pass and image output

pub mod app;
pub mod bitmap;
pub mod config;
pub mod error;
pub mod scene;

pub use error::{RenderError, Result};
