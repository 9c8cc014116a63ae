//! Atmospheric Light Estimation
//!
//! Prints the dark-channel atmospheric light of every input image, as a colour in
//! 8-bit units and as a normalised luminance.
//!
//! ## Usage
//!
//! ```bash
//! # Single image
//! cargo run --bin estimate -- hazy.png
//!
//! # Every image below a directory, as JSON lines
//! cargo run --bin estimate -- datasets/dehaze/test/hazy --json
//!
//! # Larger candidate set with nearest rounding
//! cargo run --bin estimate -- hazy.png --top-fraction 0.01 --rounding nearest
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dehaze_burn::{
    atmospheric_light_rgb, convert::open_image, convert::rgb_to_hwc_tensor,
    priors::normalized_luminance, AtmosphericLightConfig, CandidateRounding,
};
use dehaze_tools::{
    collect_image_paths, create_device, get_backend_name, init_tracing, SelectedBackend,
    SelectedDevice,
};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Rounding {
    Floor,
    Nearest,
}

impl From<Rounding> for CandidateRounding {
    fn from(rounding: Rounding) -> Self {
        match rounding {
            Rounding::Floor => Self::Floor,
            Rounding::Nearest => Self::Nearest,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image files or directories
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Fraction of haziest pixels used as candidates
    #[arg(long)]
    top_fraction: Option<f64>,

    /// Erosion window size
    #[arg(long)]
    window_size: Option<usize>,

    /// Candidate count rounding
    #[arg(long, value_enum)]
    rounding: Option<Rounding>,

    /// Print one JSON object per image
    #[arg(long)]
    json: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct Estimate<'a> {
    path: &'a str,
    width: u32,
    height: u32,
    rgb: [f32; 3],
    luminance: f32,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    // Load configuration
    let mut config = if let Some(config_path) = &args.config {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        serde_json::from_str::<AtmosphericLightConfig>(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?
    } else {
        AtmosphericLightConfig::new()
    };

    // Apply command line overrides
    if let Some(top_fraction) = args.top_fraction {
        config.top_fraction = top_fraction;
    }
    if let Some(window_size) = args.window_size {
        config.window_size = window_size;
    }
    if let Some(rounding) = args.rounding {
        config.rounding = rounding.into();
    }
    config.validate().context("Invalid atmospheric light configuration")?;

    let device = create_device();
    tracing::info!(
        backend = get_backend_name(),
        top_fraction = config.top_fraction,
        window_size = config.window_size,
        "estimating atmospheric light"
    );

    let paths = collect_image_paths(&args.inputs)?;
    if paths.is_empty() {
        anyhow::bail!("No images found");
    }

    for path in &paths {
        estimate(path, &config, &device, args.json)
            .with_context(|| format!("Failed to process {}", path.display()))?;
    }

    Ok(())
}

fn estimate(
    path: &std::path::Path,
    config: &AtmosphericLightConfig,
    device: &SelectedDevice,
    json: bool,
) -> Result<()> {
    let image = open_image(path)?.to_rgb8();
    let (width, height) = image.dimensions();

    let tensor = rgb_to_hwc_tensor::<SelectedBackend>(&image, device);
    let rgb = atmospheric_light_rgb(tensor, config)?;
    let luminance = normalized_luminance(rgb);

    if json {
        let estimate = Estimate {
            path: &path.to_string_lossy(),
            width,
            height,
            rgb,
            luminance,
        };
        println!("{}", serde_json::to_string(&estimate)?);
    } else {
        println!(
            "{}: A = [{:.1}, {:.1}, {:.1}], luminance = {:.4}",
            path.display(),
            rgb[0],
            rgb[1],
            rgb[2],
            luminance
        );
    }

    Ok(())
}
