//! Headless preview of the scale bar overlay.
//!
//! Renders the scale bar for a sequence of zoom levels the way a viewer would
//! frame by frame, logs which frames re-rendered, and writes the final texture
//! to a PNG.
//!
//! Usage: `scalebar-preview <config.json>`

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use scalebar_core::QuantizerConfig;
use scalebar_renderer::{MemoryGraphics, RasterCanvas, ScaleBarStyle, ScaleBarTexture};

#[derive(Debug, Deserialize)]
struct PreviewConfig {
    /// TrueType/OpenType sans-serif font used for the label.
    font_path: PathBuf,
    /// Set when `font_path` already points at a bold face.
    #[serde(default)]
    bold_face: bool,
    output_path: PathBuf,
    /// One entry per simulated frame.
    nanometers_per_pixel: Vec<f64>,
    #[serde(default)]
    quantizer: QuantizerConfig,
    #[serde(default)]
    style: ScaleBarStyle,
}

fn load_config(path: &Path) -> Result<PreviewConfig, String> {
    let json = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&json).map_err(|e| format!("{}: {}", path.display(), e))
}

fn run(config_path: &Path) -> Result<(), String> {
    let config = load_config(config_path)?;
    let first = *config
        .nanometers_per_pixel
        .first()
        .ok_or("nanometers_per_pixel must list at least one frame")?;

    let font = fs::read(&config.font_path)
        .map_err(|e| format!("{}: {}", config.font_path.display(), e))?;
    let canvas = RasterCanvas::from_font_bytes(&font)
        .map_err(|e| e.to_string())?
        .with_bold_face(config.bold_face);

    let mut gl = MemoryGraphics::new();
    let mut scale_bar = ScaleBarTexture::new(config.quantizer.build(first), canvas)
        .with_style(config.style.clone());

    for (frame, &nanometers_per_pixel) in config.nanometers_per_pixel.iter().enumerate() {
        scale_bar.set_nanometers_per_pixel(nanometers_per_pixel);
        match scale_bar.update(&mut gl) {
            Ok(true) => log::info!(
                "Frame {}: {} nm/px -> {} ({} px), raster {}x{}",
                frame,
                nanometers_per_pixel,
                scale_bar.dimensions().label(),
                scale_bar.dimensions().length_in_pixels(),
                scale_bar.width(),
                scale_bar.height()
            ),
            Ok(false) => log::info!("Frame {}: unchanged, texture reused", frame),
            Err(e) => log::warn!("Frame {}: {}", frame, e),
        }
    }

    let overlay = scale_bar.overlay().to_json().map_err(|e| e.to_string())?;
    println!("{}", overlay);

    let result = match scale_bar.texture().and_then(|t| gl.texture_image(t)) {
        Some(image) => image
            .save(&config.output_path)
            .map(|()| log::info!("Wrote {}", config.output_path.display()))
            .map_err(|e| format!("{}: {}", config.output_path.display(), e)),
        None => Err("no frame rendered successfully".to_string()),
    };
    scale_bar.release(&mut gl);
    result
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(config_path) = std::env::args().nth(1) else {
        eprintln!("usage: scalebar-preview <config.json>");
        std::process::exit(2);
    };
    if let Err(e) = run(Path::new(&config_path)) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
