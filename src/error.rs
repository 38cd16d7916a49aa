//! Error type of the renderer.
//!
//! Only the outer layer can fail: reading the config and writing images.
//! Mesh generation, transforms and rasterization have no error paths.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// Config file could not be read, or an image could not be written
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `RenderConfig`
    #[error("Failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// Config value outside of what the pipeline accepts
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl RenderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RenderError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RenderError>;
