#[cfg(feature = "dataset")]
pub mod augmentation;
mod config;
pub mod convert;
#[cfg(feature = "dataset")]
pub mod dataset;
mod error;
pub mod postprocess;
pub mod priors;


pub use config::*;
pub use error::{DehazeError, DehazeResult};
pub use postprocess::{postprocess, ImageInput};
pub use priors::{
    append_edge_channel, atmospheric_light_luminance, atmospheric_light_rgb, dark_channel,
    edge_map, edge_map_batch,
};

#[cfg(feature = "dataset")]
pub use dataset::{DehazeBatch, DehazeBatcher, DehazeDataset, DehazeItem};
