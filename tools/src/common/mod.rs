//! Shared helpers for the tool binaries.

mod backend;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use walkdir::WalkDir;

pub use backend::{create_device, get_backend_name, SelectedBackend, SelectedDevice};

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "ppm", "bmp"];

/// Installs the global tracing subscriber.
///
/// Honours `RUST_LOG` and falls back to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|valid| ext.eq_ignore_ascii_case(valid))
        })
}

/// Expands the given paths into image files.
///
/// Files are kept as given, directories are walked recursively and yield their
/// images sorted by file name.
///
/// # Errors
///
/// Returns an error if a path does not exist or a directory cannot be read.
pub fn collect_image_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_file() {
            paths.push(input.clone());
        } else if input.is_dir() {
            for entry in WalkDir::new(input).sort_by_file_name() {
                let entry = entry
                    .with_context(|| format!("Failed to read directory: {}", input.display()))?;
                if entry.file_type().is_file() && has_image_extension(entry.path()) {
                    paths.push(entry.into_path());
                }
            }
        } else {
            anyhow::bail!("Input path does not exist: {}", input.display());
        }
    }

    Ok(paths)
}
