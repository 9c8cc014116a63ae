//! Core configuration structures for Dehaze-Burn.
//!
//! This module contains the configuration structures that drive the haze priors
//! and the paired dataset loader.

use std::path::PathBuf;

use crate::error::{DehazeError, DehazeResult};
use burn::prelude::*;

use super::enums::*;

/// Configuration for the dark-channel atmospheric light estimator.
#[derive(Config, Debug)]
pub struct AtmosphericLightConfig {
    /// Fraction of pixels, by highest eroded dark-channel value, treated as haziest.
    /// Must lie in `(0, 1]`.
    #[config(default = 0.001)]
    pub top_fraction: f64,
    /// Side length of the square erosion window applied to the dark channel.
    #[config(default = 31)]
    pub window_size: usize,
    /// Rounding policy for the candidate count.
    #[config(default = "CandidateRounding::Floor")]
    pub rounding: CandidateRounding,
}

impl AtmosphericLightConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err(DehazeError::InvalidParameter)` if `top_fraction` is outside `(0, 1]`
    /// (NaN included) or `window_size` is zero.
    pub fn validate(&self) -> DehazeResult<()> {
        if !(self.top_fraction > 0.0 && self.top_fraction <= 1.0) {
            return Err(DehazeError::invalid_parameter(
                "top_fraction",
                format!("must be in (0, 1], got {}", self.top_fraction),
            ));
        }

        if self.window_size == 0 {
            return Err(DehazeError::invalid_parameter(
                "window_size",
                "erosion window must be at least 1x1",
            ));
        }

        Ok(())
    }

    /// Number of candidate pixels selected from an image with `num_pixels` pixels.
    ///
    /// Never less than one and never more than `num_pixels` (for non-empty images).
    #[must_use]
    pub fn candidate_count(&self, num_pixels: usize) -> usize {
        let raw = num_pixels as f64 * self.top_fraction;
        let count = match self.rounding {
            CandidateRounding::Floor => raw.floor(),
            CandidateRounding::Nearest => raw.round(),
        } as usize;

        count.clamp(1, num_pixels.max(1))
    }
}

/// Configuration for the paired hazy/clear folder dataset.
///
/// Expected layout: `<data_root_dir>/<split>/{hazy,clear,trans}/`.
#[derive(Config, Debug)]
pub struct DatasetConfig {
    /// Root directory holding the `train` and `test` splits.
    #[config(default = "PathBuf::from(\"datasets/dehaze\")")]
    pub data_root_dir: PathBuf,
    /// Side length of the square training crop. `None` keeps full images.
    #[config(default = "None")]
    pub patch_size: Option<u32>,
    /// Random horizontal flip with probability 0.5 (training only).
    #[config(default = "true")]
    pub horizontal_flip: bool,
    /// Random vertical flip with probability 0.5 (training only).
    #[config(default = "true")]
    pub vertical_flip: bool,
    /// Load grayscale transmission maps from `trans/`.
    #[config(default = "false")]
    pub load_transmission: bool,
    /// Estimate the atmospheric light of every hazy image.
    #[config(default = "true")]
    pub atmospheric_light: bool,
    /// Whether the atmospheric light is stored as a luminance or as a raw colour.
    #[config(default = "AtmosphericOutput::Luminance")]
    pub atmospheric_output: AtmosphericOutput,
    /// Estimate the atmospheric light on the training crop instead of the full image.
    #[config(default = "false")]
    pub estimate_after_crop: bool,
    /// Append the edge map of the hazy image as a fourth input channel.
    #[config(default = "false")]
    pub edge_channel: bool,
    /// How clear ground truth files are located.
    #[config(default = "ClearNaming::SceneId")]
    pub clear_naming: ClearNaming,
    /// Seed for crop and flip randomness. Drawn at random when `None`.
    #[config(default = "None")]
    pub seed: Option<u64>,
    /// Atmospheric light estimator settings.
    #[config(default = "AtmosphericLightConfig::new()")]
    pub atmospheric: AtmosphericLightConfig,
}

impl DatasetConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err(DehazeError::InvalidParameter)` for a zero patch size or an
    /// invalid atmospheric light configuration.
    pub fn validate(&self) -> DehazeResult<()> {
        if self.patch_size == Some(0) {
            return Err(DehazeError::invalid_parameter(
                "patch_size",
                "crop size must be positive",
            ));
        }

        if self.atmospheric_light {
            self.atmospheric.validate()?;
        }

        Ok(())
    }

    /// Directory of a split below the data root.
    #[must_use]
    pub fn split_dir(&self, split: Split) -> PathBuf {
        self.data_root_dir.join(split.dir_name())
    }
}
