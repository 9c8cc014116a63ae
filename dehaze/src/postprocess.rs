//! Conversion of network outputs back into 8-bit images.

use burn::prelude::*;
use image::RgbImage;

use crate::{
    error::{DehazeError, DehazeResult},
    priors::{edge_map, edge_map_batch, MAX_INTENSITY},
};

/// A single channel-first image or a batch of them.
#[derive(Debug, Clone)]
pub enum ImageInput<B: Backend> {
    /// One image of shape `[C, H, W]`.
    Single(Tensor<B, 3>),
    /// A batch of shape `[N, C, H, W]`.
    Batch(Tensor<B, 4>),
}

impl<B: Backend> ImageInput<B> {
    /// Number of images held.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Batch(tensor) => tensor.dims()[0],
        }
    }

    /// Whether no image is held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Channel count of the held images.
    pub fn channels(&self) -> usize {
        match self {
            Self::Single(tensor) => tensor.dims()[0],
            Self::Batch(tensor) => tensor.dims()[1],
        }
    }

    /// Edge map of every image, keeping the single/batch form.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the images have no channels or are smaller than 2x2.
    pub fn edge_map(self) -> DehazeResult<Self> {
        match self {
            Self::Single(tensor) => edge_map(tensor).map(Self::Single),
            Self::Batch(tensor) => edge_map_batch(tensor).map(Self::Batch),
        }
    }

    fn into_batch(self) -> Tensor<B, 4> {
        match self {
            Self::Single(tensor) => tensor.unsqueeze::<4>(),
            Self::Batch(tensor) => tensor,
        }
    }
}

impl<B: Backend> From<Tensor<B, 3>> for ImageInput<B> {
    fn from(tensor: Tensor<B, 3>) -> Self {
        Self::Single(tensor)
    }
}

impl<B: Backend> From<Tensor<B, 4>> for ImageInput<B> {
    fn from(tensor: Tensor<B, 4>) -> Self {
        Self::Batch(tensor)
    }
}

/// Converts `[0, 1]` RGB tensors into 8-bit images.
///
/// Values are clamped to `[0, 1]`, scaled by 255 and truncated. A single image
/// yields one output, a batch yields one output per item in order.
///
/// # Errors
///
/// Returns `InvalidInput` if the images do not have exactly three channels.
pub fn postprocess<B: Backend>(input: ImageInput<B>) -> DehazeResult<Vec<RgbImage>> {
    if input.channels() != 3 {
        return Err(DehazeError::invalid_input(
            "3-channel images",
            format!("{} channels", input.channels()),
        ));
    }

    let [batch_size, _, height, width] = input.clone().into_batch().dims();

    // NCHW to NHWC
    let pixels = (input.into_batch().clamp(0.0, 1.0) * MAX_INTENSITY).permute([0, 2, 3, 1]);
    let values = pixels
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|err| DehazeError::TensorDataFailed {
            reason: format!("{err:?}"),
        })?;

    let frame = height * width * 3;
    values
        .chunks_exact(frame.max(1))
        .take(batch_size)
        .map(|chunk| {
            let raw = chunk.iter().map(|&v| v as u8).collect();
            RgbImage::from_raw(width as u32, height as u32, raw).ok_or_else(|| {
                DehazeError::invalid_input(
                    format!("{width}x{height} RGB buffer"),
                    format!("{} values", chunk.len()),
                )
            })
        })
        .collect()
}
