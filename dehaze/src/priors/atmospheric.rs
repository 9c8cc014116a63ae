//! # Atmospheric Light Estimation
//!
//! Dark-channel prior estimate of the airlight `A` in the haze model
//! `I(x) = J(x) t(x) + A (1 - t(x))`.
//!
//! 1. Dark channel: per-pixel minimum over the colour channels.
//! 2. Erosion of the dark channel with a square window (31x31 by default), which
//!    suppresses small bright objects.
//! 3. The `top_fraction` pixels with the highest eroded dark value are taken as
//!    the haziest ones.
//! 4. The per-channel maximum over those pixels of the original image is the
//!    atmospheric light colour.

use burn::prelude::*;
use burn_extra_ops::ImageExtraOps;

use crate::{
    config::AtmosphericLightConfig,
    error::{DehazeError, DehazeResult},
};

/// Rec. 709 luma weights for the R, G and B channels.
pub const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// Full scale of the 8-bit inputs the luminance variant expects.
pub const MAX_INTENSITY: f32 = 255.0;

fn check_image_dims(dims: [usize; 3]) -> DehazeResult<()> {
    let [height, width, channels] = dims;
    if channels != 3 || height == 0 || width == 0 {
        return Err(DehazeError::invalid_input(
            "non-empty image of shape [H, W, 3]",
            format!("{dims:?}"),
        ));
    }
    Ok(())
}

/// Computes the eroded dark channel of an `[H, W, 3]` image.
///
/// # Errors
///
/// Returns `InvalidInput` for a malformed image and `InvalidParameter` for a zero
/// window size.
pub fn dark_channel<B: Backend>(
    image: Tensor<B, 3>,
    window_size: usize,
) -> DehazeResult<Tensor<B, 2>> {
    check_image_dims(image.dims())?;
    if window_size == 0 {
        return Err(DehazeError::invalid_parameter(
            "window_size",
            "erosion window must be at least 1x1",
        ));
    }

    let [height, width, _] = image.dims();
    let dark = image.min_dim(2).reshape([1, 1, height, width]);
    let eroded = dark.erode([window_size, window_size]);

    Ok(eroded.reshape([height, width]))
}

/// Estimates the atmospheric light colour of an `[H, W, 3]` image.
///
/// The result is in the same units as the input (no normalisation). At least one
/// candidate pixel is always selected, see [`AtmosphericLightConfig::candidate_count`].
/// Ties between equal dark-channel values are resolved by the backend's descending
/// sort, which is deterministic for a given backend.
///
/// # Errors
///
/// Returns `InvalidParameter` for an invalid configuration, `InvalidInput` for a
/// malformed image.
pub fn atmospheric_light_rgb<B: Backend>(
    image: Tensor<B, 3>,
    config: &AtmosphericLightConfig,
) -> DehazeResult<[f32; 3]> {
    config.validate()?;
    let dark = dark_channel(image.clone(), config.window_size)?;

    let [height, width, _] = image.dims();
    let num_pixels = height * width;
    let count = config.candidate_count(num_pixels);

    let haziest = dark.reshape([num_pixels]).argsort_descending(0).slice([0..count]);
    let light = image
        .reshape([num_pixels, 3])
        .select(0, haziest)
        .max_dim(0)
        .reshape([3]);

    let values = light
        .into_data()
        .convert::<f32>()
        .to_vec::<f32>()
        .map_err(|err| DehazeError::TensorDataFailed {
            reason: format!("{err:?}"),
        })?;

    Ok([values[0], values[1], values[2]])
}

/// Estimates the atmospheric light as a single luminance value in `[0, 1]`.
///
/// Expects 8-bit range input (`[0, 255]`): the colour from
/// [`atmospheric_light_rgb`] is weighted with [`LUMA_WEIGHTS`] and divided by 255.
///
/// # Errors
///
/// Same as [`atmospheric_light_rgb`].
pub fn atmospheric_light_luminance<B: Backend>(
    image: Tensor<B, 3>,
    config: &AtmosphericLightConfig,
) -> DehazeResult<f32> {
    atmospheric_light_rgb(image, config).map(normalized_luminance)
}

/// Rec. 709 luminance of an 8-bit colour, scaled to `[0, 1]`.
#[must_use]
pub fn normalized_luminance(rgb: [f32; 3]) -> f32 {
    let [r, g, b] = rgb;
    (LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b) / MAX_INTENSITY
}
