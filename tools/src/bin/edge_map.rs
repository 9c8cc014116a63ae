//! Edge Map Export
//!
//! Computes the edge map of an image and writes it as a grayscale PNG.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin edge_map -- hazy.png edges.png
//!
//! # Brighten faint gradients
//! cargo run --bin edge_map -- hazy.png edges.png --scale 1020
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dehaze_burn::{convert::open_image, convert::rgb_to_chw_tensor, edge_map};
use dehaze_tools::{create_device, get_backend_name, init_tracing, EdgeMapConfig, SelectedBackend};
use image::GrayImage;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input image
    input: PathBuf,

    /// Output PNG path
    output: PathBuf,

    /// Multiplier applied to edge values before quantisation
    #[arg(long)]
    scale: Option<f32>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_json::from_str::<EdgeMapConfig>(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        EdgeMapConfig::default()
    };

    if let Some(scale) = args.scale {
        config.scale = scale;
    }

    let device = create_device();
    tracing::info!(backend = get_backend_name(), input = %args.input.display(), "computing edge map");

    let image = open_image(&args.input)?.to_rgb8();
    let (width, height) = image.dimensions();

    let tensor = rgb_to_chw_tensor::<SelectedBackend>(&image, &device);
    let edges = edge_map(tensor).context("Failed to compute edge map")?;

    let values = (edges * config.scale)
        .clamp(0.0, 255.0)
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|err| anyhow::anyhow!("Failed to read edge map: {err:?}"))?;
    let pixels = values.into_iter().map(|v| v as u8).collect();

    let output = GrayImage::from_raw(width, height, pixels)
        .context("Edge map size does not match the input image")?;
    output
        .save(&args.output)
        .with_context(|| format!("Failed to save edge map: {}", args.output.display()))?;

    tracing::info!(output = %args.output.display(), "edge map saved");
    Ok(())
}
