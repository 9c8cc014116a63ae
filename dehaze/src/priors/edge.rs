//! # Edge Map
//!
//! Averaged absolute gradient map used as an extra input channel.
//!
//! Horizontal and vertical absolute differences are accumulated into both pixels
//! they were computed from, summed over channels, averaged over the channel count
//! and divided by four. Interior pixels collect four differences, edge pixels three
//! and corner pixels two, so the border is systematically under-weighted. The
//! networks consuming this channel were trained with that bias.

use burn::{prelude::*, tensor::ElementConversion};
use burn_extra_ops::TensorExtraOps;

use crate::error::{DehazeError, DehazeResult};

/// Number of directional contributions an interior pixel receives.
const DIRECTIONS: f32 = 4.0;

fn check_spatial_dims(
    channels: usize,
    height: usize,
    width: usize,
    shape: String,
) -> DehazeResult<()> {
    if channels == 0 || height < 2 || width < 2 {
        return Err(DehazeError::invalid_input(
            "at least one channel and a spatial size of at least 2x2",
            shape,
        ));
    }
    Ok(())
}

/// Computes the edge map of a channel-first image.
///
/// The channel sum is divided by the actual channel count. For RGB this is the
/// usual divisor of 3, and single-channel or 4-channel inputs keep the same range
/// instead of being scaled by `3 / C`.
///
/// # Shapes
/// - input: `[channels, height, width]`
/// - output: `[1, height, width]`
///
/// # Errors
///
/// Returns `InvalidInput` if the image has no channels or is smaller than 2x2.
pub fn edge_map<B: Backend>(image: Tensor<B, 3>) -> DehazeResult<Tensor<B, 3>> {
    let [channels, height, width] = image.dims();
    check_spatial_dims(channels, height, width, format!("{:?}", image.dims()))?;

    Ok(accumulate(image.unsqueeze::<4>()).squeeze::<3>(0))
}

/// Computes the edge map of every image in a batch.
///
/// # Shapes
/// - input: `[batch_size, channels, height, width]`
/// - output: `[batch_size, 1, height, width]`
///
/// # Errors
///
/// Returns `InvalidInput` if the images have no channels or are smaller than 2x2.
pub fn edge_map_batch<B: Backend>(images: Tensor<B, 4>) -> DehazeResult<Tensor<B, 4>> {
    let [_, channels, height, width] = images.dims();
    check_spatial_dims(channels, height, width, format!("{:?}", images.dims()))?;

    Ok(accumulate(images))
}

/// Concatenates an image with its edge map along the channel axis.
///
/// `[C, H, W]` becomes `[C + 1, H, W]`.
///
/// # Errors
///
/// Same as [`edge_map`].
pub fn append_edge_channel<B: Backend>(image: Tensor<B, 3>) -> DehazeResult<Tensor<B, 3>> {
    let edges = edge_map(image.clone())?;
    Ok(Tensor::cat(vec![image, edges], 0))
}

fn accumulate<B: Backend>(images: Tensor<B, 4>) -> Tensor<B, 4> {
    let channels = images.dims()[1];
    let zero = B::FloatElem::from_elem(0.0);

    let dx = images.clone().abs_diff(3);
    let dy = images.abs_diff(2);

    // Padding order is (left, right, top, bottom).
    let edges = dx.clone().pad((1, 0, 0, 0), zero)
        + dx.pad((0, 1, 0, 0), zero)
        + dy.clone().pad((0, 0, 1, 0), zero)
        + dy.pad((0, 0, 0, 1), zero);

    edges.sum_dim(1) / (channels as f32) / DIRECTIONS
}
