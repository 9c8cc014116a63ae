//! Enumeration types for Dehaze-Burn configuration.

use burn::prelude::*;

/// How the number of haziest candidate pixels is derived from `top_fraction * H * W`.
///
/// Both policies select at least one pixel.
#[derive(Config, Debug, Copy, PartialEq, Eq)]
pub enum CandidateRounding {
    /// Truncate towards zero, as the reference training pipelines do.
    Floor,
    /// Round to the nearest integer.
    Nearest,
}

/// Form in which the dataset stores the atmospheric light of a sample.
#[derive(Config, Debug, Copy, PartialEq, Eq)]
pub enum AtmosphericOutput {
    /// Normalised luminance in `[0, 1]`, stored as `[1, 1, 1]`.
    Luminance,
    /// Raw per-channel colour in 8-bit units, stored as `[3, 1, 1]`.
    Rgb,
}

/// How a hazy file name maps to its clear ground truth.
#[derive(Config, Debug, Copy, PartialEq, Eq)]
pub enum ClearNaming {
    /// `clear/` holds a file with exactly the hazy file name.
    SameName,
    /// RESIDE ITS/OTS naming: `1400_3_0.8.png` pairs with `clear/1400.<ext>`.
    SceneId,
}

/// Dataset split.
#[derive(Config, Debug, Copy, PartialEq, Eq)]
pub enum Split {
    /// Training split with cropping and flipping.
    Train,
    /// Evaluation split, images are used as-is.
    Test,
}

impl Split {
    /// Directory name of the split below the data root.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }
}
