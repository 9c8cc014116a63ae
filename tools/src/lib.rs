//! Dehaze-Burn Tools
//!
//! Command line utilities built on the `dehaze-burn` library.
//!
//! ## Available Tools
//!
//! - `estimate`: Atmospheric light of single images or whole directories
//! - `edge_map`: Write the edge map of an image as a grayscale PNG
//! - `dataset_test`: Dataset loading and batching checks
//!
//! ## Usage
//!
//! ```bash
//! # Estimate the atmospheric light of every image in a folder
//! cargo run --bin estimate -- datasets/dehaze/test/hazy --json
//!
//! # Edge map of one image
//! cargo run --bin edge_map -- hazy.png edges.png
//!
//! # Test dataset loading
//! cargo run --bin dataset_test -- --dataset-path datasets/dehaze
//! ```

pub mod common;
pub mod config;

// Re-export commonly used items
pub use common::{
    collect_image_paths, create_device, get_backend_name, init_tracing, SelectedBackend,
    SelectedDevice,
};
pub use config::{DatasetTestConfig, EdgeMapConfig};
