use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glint_core::load_scene;
use glint_renderer::{render_scene, RenderConfig, DEFAULT_WORKERS};

#[derive(Parser, Debug)]
#[command(name = "glint")]
#[command(about = "Render every camera of an XML scene with a Whitted ray tracer", long_about = None)]
struct Cli {
    /// Scene description file
    scene: PathBuf,

    /// Worker threads per camera
    #[arg(short = 'j', long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// Directory the images are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let start = Instant::now();

    let scene = load_scene(&cli.scene)
        .with_context(|| format!("Failed to load scene {}", cli.scene.display()))?;

    let config = RenderConfig::default().with_workers(cli.workers);
    let cameras = render_scene(&scene, &config).context("Render failed")?;

    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!("Failed to create output directory {}", cli.output_dir.display())
    })?;
    for camera in &cameras {
        camera
            .save_image(&cli.output_dir)
            .with_context(|| format!("Failed to save {}", camera.image_name()))?;
    }

    log::info!(
        "Finished {} image(s) in {:.2?}",
        cameras.len(),
        start.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["glint", "scene.xml"]).unwrap();
        assert_eq!(cli.scene, PathBuf::from("scene.xml"));
        assert_eq!(cli.workers, 12);
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from(["glint", "a.xml", "-j", "3", "-o", "out"]).unwrap();
        assert_eq!(cli.workers, 3);
        assert_eq!(cli.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_scene_is_required() {
        assert!(Cli::try_parse_from(["glint"]).is_err());
    }
}
