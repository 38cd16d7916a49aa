//! Render configuration.
//!
//! Defaults reproduce the fixed scene: a 512x512 image of a 32x16 unit sphere scaled by 2
//! and moved to z = -7, seen through a 90 degree frustum. A TOML file can override any part,
//! missing keys keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use nalgebra::Matrix4;
use serde::Deserialize;

use crate::error::{RenderError, Result};
use crate::scene::util::{frustum_from_z_planes, scale, translate};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    /// Optional grayscale z-buffer image.
    pub depth_output: Option<PathBuf>,
    pub sphere: SphereConfig,
    pub camera: CameraConfig,
    pub model: ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SphereConfig {
    /// Latitude rings, poles included.
    pub rings: usize,
    /// Longitude steps per ring.
    pub segments: usize,
}

/// Frustum in z-plane form: near_z and far_z are z values, camera looks down -z.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near_z: f32,
    pub far_z: f32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub translation: [f32; 3],
    pub scale: [f32; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            output: PathBuf::from("HW5_Result_Img.bmp"),
            depth_output: None,
            sphere: SphereConfig::default(),
            camera: CameraConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self { rings: 16, segments: 32 }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            left: -0.1,
            right: 0.1,
            bottom: -0.1,
            top: 0.1,
            near_z: -0.1,
            far_z: -1000.0,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            translation: [0.0, 0.0, -7.0],
            scale: [2.0, 2.0, 2.0],
        }
    }
}

impl CameraConfig {
    pub fn projection(&self) -> Matrix4<f32> {
        frustum_from_z_planes(self.left, self.right, self.bottom, self.top, self.near_z, self.far_z)
    }
}

impl ModelConfig {
    /// Scale first, then translate.
    pub fn matrix(&self) -> Matrix4<f32> {
        let [tx, ty, tz] = self.translation;
        let [sx, sy, sz] = self.scale;
        translate(tx, ty, tz) * scale(sx, sy, sz)
    }
}

impl RenderConfig {
    /// Parse TOML text and validate it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: RenderConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        Self::from_toml(&text)
    }

    /// Rejects values the pipeline has no defined behavior for.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "resolution must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.sphere.rings < 3 || self.sphere.segments < 2 {
            return Err(RenderError::InvalidConfig(format!(
                "sphere needs at least 3 rings and 2 segments, got {} rings and {} segments",
                self.sphere.rings, self.sphere.segments
            )));
        }
        let camera = &self.camera;
        if camera.left == camera.right || camera.bottom == camera.top {
            return Err(RenderError::InvalidConfig(
                "frustum side planes must be distinct".to_string(),
            ));
        }
        if !(camera.near_z < 0.0 && camera.far_z < 0.0) || camera.near_z == camera.far_z {
            return Err(RenderError::InvalidConfig(format!(
                "near_z and far_z must be distinct negative z values, got {} and {}",
                camera.near_z, camera.far_z
            )));
        }
        Ok(())
    }
}
