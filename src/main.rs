use std::path::PathBuf;

use clap::Parser;

use tiny_rasterizer::app;
use tiny_rasterizer::config::RenderConfig;
use tiny_rasterizer::error;

/// Software rasterizer rendering a unit sphere into a 24-bit BMP.
/// Without arguments renders the built-in 512x512 scene.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML file overriding the built-in scene
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output bitmap path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also write the z-buffer as a grayscale bitmap
    #[arg(long, value_name = "FILE")]
    depth: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,
}

impl Args {
    /// Config file (or defaults) with command line overrides applied on top.
    fn resolve(&self) -> error::Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(depth) = &self.depth {
            config.depth_output = Some(depth.clone());
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        config.validate()?;
        return Ok(config);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let context = app::Context {
        config: args.resolve()?,
        config_path: args.config.clone(),
    };

    app::run(context)?;

    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_default_scene() {
        let args = Args::try_parse_from(["tiny_rasterizer"]).unwrap();
        assert_eq!(args.resolve().unwrap(), RenderConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let args = Args::try_parse_from([
            "tiny_rasterizer",
            "-o",
            "out.bmp",
            "--depth",
            "depth.bmp",
            "--width",
            "320",
            "--height",
            "240",
        ])
        .unwrap();
        let config = args.resolve().unwrap();
        assert_eq!(config.output, PathBuf::from("out.bmp"));
        assert_eq!(config.depth_output, Some(PathBuf::from("depth.bmp")));
        assert_eq!((config.width, config.height), (320, 240));
    }

    #[test]
    fn zero_width_is_rejected() {
        let args = Args::try_parse_from(["tiny_rasterizer", "--width", "0"]).unwrap();
        assert!(args.resolve().is_err());
    }

    #[test]
    fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.toml");
        std::fs::write(&path, "height = 100\n[sphere]\nsegments = 8\n").unwrap();
        let args = Args::try_parse_from(["tiny_rasterizer", "--config", path.to_str().unwrap()]).unwrap();
        let config = args.resolve().unwrap();
        assert_eq!(config.height, 100);
        assert_eq!(config.sphere.segments, 8);
    }
}
