//! Command line viewer: renders the demo scene with the ray tracer or the
//! rasterizer and writes the frames as PNG images.

mod demo;
mod settings;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use cgl_core::Scene;
use cgl_math::Camera;
use cgl_renderer::{FrameBuffer, HittableList, Rasterizer, RayTracer, RenderConfig};
use clap::{Parser, ValueEnum};

use settings::ViewerSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Recursive ray tracing through a screen quad
    Raytrace,
    /// Triangle rasterization with a depth buffer
    Rasterize,
}

#[derive(Parser, Debug)]
#[command(name = "cgl_viewer", about = "Render the demo scene to PNG", version)]
struct Args {
    /// Rendering technique
    #[arg(long, value_enum, default_value_t = Mode::Raytrace)]
    mode: Mode,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Image width and height in pixels (overrides the settings file)
    #[arg(long)]
    resolution: Option<u32>,

    /// Number of animation frames to render
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Output image. With more than one frame, the frame number is appended.
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Skip recording debug lines
    #[arg(long)]
    no_debug_lines: bool,
}

enum Renderer {
    Raytrace(RayTracer),
    Rasterize(Rasterizer),
}

impl Renderer {
    fn new(mode: Mode, config: RenderConfig) -> Result<Self> {
        Ok(match mode {
            Mode::Raytrace => Self::Raytrace(RayTracer::new(config).context("Invalid render settings")?),
            Mode::Rasterize => Self::Rasterize(Rasterizer::new(config).context("Invalid render settings")?),
        })
    }

    fn render(&mut self, scene: &Scene, camera: &Camera) -> (&FrameBuffer, usize) {
        match self {
            Self::Raytrace(tracer) => {
                let world = HittableList::from_scene(scene);
                let screen = demo::screen_for(camera);
                tracer.render_frame(camera, &screen, &world, &scene.light);
                (tracer.framebuffer(), tracer.debug_lines().len())
            }
            Self::Rasterize(rasterizer) => {
                rasterizer.render_frame(scene, camera);
                (rasterizer.framebuffer(), rasterizer.debug_lines().len())
            }
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::info!("cgl_viewer starting in {:?} mode", args.mode);

    let settings = match &args.config {
        Some(path) => ViewerSettings::load(path)?,
        None => ViewerSettings::default(),
    };
    let config = resolve_config(&settings, &args);

    let mut scene = demo::build_scene();
    if let Some(light) = settings.light {
        scene.light = light;
    }
    let camera = settings.camera.unwrap_or_else(demo::default_camera);

    log::info!(
        "Scene '{}': {} objects, {} triangles, {}x{} pixels",
        scene.name,
        scene.objects.len(),
        scene.total_triangle_count(),
        config.resolution,
        config.resolution
    );

    let mut renderer = Renderer::new(args.mode, config)?;
    for frame in 0..args.frames {
        demo::animate(&mut scene, frame);

        let start = Instant::now();
        let (framebuffer, debug_lines) = renderer.render(&scene, &camera);
        log::info!(
            "Frame {} rendered in {:.1} ms ({} debug lines)",
            frame,
            start.elapsed().as_secs_f64() * 1000.0,
            debug_lines
        );

        let path = frame_path(&args.output, frame, args.frames);
        save_png(framebuffer, &path)?;
        log::info!("Wrote {}", path.display());
    }

    Ok(())
}

/// Apply command line overrides on top of the settings file.
fn resolve_config(settings: &ViewerSettings, args: &Args) -> RenderConfig {
    let mut config = settings.render.clone();
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if args.no_debug_lines {
        config.draw_debug_lines = false;
    }
    config
}

fn frame_path(output: &Path, frame: u32, frames: u32) -> PathBuf {
    if frames <= 1 {
        return output.to_path_buf();
    }
    let stem = output.file_stem().and_then(|s| s.to_str()).unwrap_or("render");
    let extension = output.extension().and_then(|s| s.to_str()).unwrap_or("png");
    output.with_file_name(format!("{stem}_{frame:03}.{extension}"))
}

/// Build an image with the top row first.
fn to_image(framebuffer: &FrameBuffer) -> Result<image::RgbaImage> {
    let size = framebuffer.resolution();
    let mut image = image::RgbaImage::from_raw(size, size, framebuffer.to_rgba8())
        .context("Frame buffer size does not match its resolution")?;
    // Row 0 of the frame buffer is the bottom of the picture
    image::imageops::flip_vertical_in_place(&mut image);
    Ok(image)
}

fn save_png(framebuffer: &FrameBuffer, path: &Path) -> Result<()> {
    to_image(framebuffer)?
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgl_core::Color;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("cgl_viewer").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_args() {
        let args = parse(&[]);

        assert_eq!(args.mode, Mode::Raytrace);
        assert_eq!(args.frames, 1);
        assert_eq!(args.output, PathBuf::from("render.png"));
        assert!(!args.no_debug_lines);
    }

    #[test]
    fn test_overrides_apply_over_settings() {
        let args = parse(&["--mode", "rasterize", "--resolution", "16", "--no-debug-lines"]);
        let config = resolve_config(&ViewerSettings::default(), &args);

        assert_eq!(args.mode, Mode::Rasterize);
        assert_eq!(config.resolution, 16);
        assert!(!config.draw_debug_lines);
        assert_eq!(config.ambient_intensity, RenderConfig::default().ambient_intensity);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        assert!(Args::try_parse_from(["cgl_viewer", "--mode", "pathtrace"]).is_err());
    }

    #[test]
    fn test_frame_path_numbering() {
        let output = Path::new("out/shot.png");

        assert_eq!(frame_path(output, 0, 1), PathBuf::from("out/shot.png"));
        assert_eq!(frame_path(output, 7, 24), PathBuf::from("out/shot_007.png"));
    }

    #[test]
    fn test_image_is_flipped_top_row_first() {
        let mut framebuffer = FrameBuffer::new(2);
        framebuffer.clear(Color::ZERO);
        framebuffer.set(0, 0, Color::ONE);

        let image = to_image(&framebuffer).unwrap();

        assert_eq!(image.get_pixel(0, 1).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_both_modes_render_demo_scene() {
        let mut scene = demo::build_scene();
        let camera = demo::default_camera();
        demo::animate(&mut scene, 1);

        for mode in [Mode::Raytrace, Mode::Rasterize] {
            let config = RenderConfig {
                resolution: 12,
                max_bounces: 1,
                ..RenderConfig::default()
            };
            let mut renderer = Renderer::new(mode, config).unwrap();
            let (framebuffer, _) = renderer.render(&scene, &camera);

            assert_eq!(framebuffer.pixels().len(), 144);
            assert!(
                framebuffer.pixels().iter().any(|c| *c != Color::ZERO),
                "{mode:?} rendered an empty frame"
            );
        }
    }

    #[test]
    fn test_invalid_resolution_rejected() {
        let config = RenderConfig {
            resolution: 0,
            ..RenderConfig::default()
        };
        assert!(Renderer::new(Mode::Raytrace, config).is_err());
    }
}
