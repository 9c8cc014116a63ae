//! Paired data augmentation for hazy/clear training samples.
//!
//! Every image of a sample (hazy input, clear ground truth and the optional
//! transmission map) receives exactly the same geometric transform:
//! 1. Random crop (`patch_size`): images smaller than the patch are first resized
//!    up to `max(patch, H) x max(patch, W)`.
//! 2. Horizontal flip (50% probability)
//! 3. Vertical flip (50% probability)

use image::{imageops::FilterType, DynamicImage, GenericImageView};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::config::DatasetConfig;

/// The decoded images of one dataset sample.
#[derive(Debug, Clone)]
pub struct RawSample {
    /// Hazy input image.
    pub hazy: DynamicImage,
    /// Haze-free ground truth.
    pub clear: DynamicImage,
    /// Grayscale transmission map, when the dataset provides one.
    pub transmission: Option<DynamicImage>,
}

impl RawSample {
    /// Applies the same transform to every image of the sample.
    #[must_use]
    pub fn map(self, f: impl Fn(DynamicImage) -> DynamicImage) -> Self {
        Self {
            hazy: f(self.hazy),
            clear: f(self.clear),
            transmission: self.transmission.map(&f),
        }
    }
}

/// Crop and flip augmentation shared by all images of a sample.
#[derive(Debug, Clone)]
pub struct PairAugmentor {
    patch_size: Option<u32>,
    horizontal_flip: bool,
    vertical_flip: bool,
    // Per-sample RNGs are derived from this seed so workers never share state.
    seed: u64,
}

impl PairAugmentor {
    /// Create a new augmentor from the dataset configuration.
    ///
    /// A random seed is drawn when the configuration does not fix one.
    pub fn new(config: &DatasetConfig) -> Self {
        Self {
            patch_size: config.patch_size,
            horizontal_flip: config.horizontal_flip,
            vertical_flip: config.vertical_flip,
            seed: config.seed.unwrap_or_else(rand::random),
        }
    }

    /// The seed all per-sample RNGs derive from.
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    fn create_rng(&self, index: usize) -> StdRng {
        StdRng::seed_from_u64(self.seed.wrapping_add(index as u64))
    }

    /// Augment the sample stored at `index`.
    ///
    /// The result only depends on the seed and `index`.
    pub fn augment(&self, sample: RawSample, index: usize) -> RawSample {
        self.augment_with(sample, index, |_| ()).0
    }

    /// Augment the sample stored at `index`, calling `on_crop` with the cropped
    /// sample before it is flipped.
    ///
    /// Without a patch size `on_crop` sees the full images.
    pub fn augment_with<T>(
        &self,
        sample: RawSample,
        index: usize,
        on_crop: impl FnOnce(&RawSample) -> T,
    ) -> (RawSample, T) {
        let mut rng = self.create_rng(index);

        let mut sample = match self.patch_size {
            Some(patch) => Self::random_crop(sample, patch, &mut rng),
            None => sample,
        };
        let inspected = on_crop(&sample);

        if self.horizontal_flip && rng.random_bool(0.5) {
            sample = sample.map(|image| image.fliph());
        }
        if self.vertical_flip && rng.random_bool(0.5) {
            sample = sample.map(|image| image.flipv());
        }

        (sample, inspected)
    }

    fn random_crop(sample: RawSample, patch: u32, rng: &mut StdRng) -> RawSample {
        let (width, height) = sample.hazy.dimensions();
        let width = width.max(patch);
        let height = height.max(patch);

        let crop_x = rng.random_range(0..=width - patch);
        let crop_y = rng.random_range(0..=height - patch);

        sample.map(|image| {
            let image = if image.dimensions() == (width, height) {
                image
            } else {
                image.resize_exact(width, height, FilterType::Triangle)
            };
            image.crop_imm(crop_x, crop_y, patch, patch)
        })
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, ImageBuffer, Luma, Rgb};

    use super::*;

    fn gradient_sample(width: u32, height: u32) -> RawSample {
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_fn(width, height, |x, y| {
            Rgb([(x * 10) as u8, (y * 10) as u8, 128])
        }));
        let transmission = DynamicImage::ImageLuma8(GrayImage::from_fn(width, height, |x, y| {
            Luma([(x + y) as u8])
        }));
        RawSample {
            hazy: image.clone(),
            clear: image,
            transmission: Some(transmission),
        }
    }

    fn config(patch_size: Option<u32>) -> DatasetConfig {
        DatasetConfig::new()
            .with_patch_size(patch_size)
            .with_seed(Some(42))
    }

    #[test]
    fn crop_produces_patch_sized_images() {
        let augmentor = PairAugmentor::new(&config(Some(8)));

        let sample = augmentor.augment(gradient_sample(20, 12), 0);

        assert_eq!(sample.hazy.dimensions(), (8, 8));
        assert_eq!(sample.clear.dimensions(), (8, 8));
        assert_eq!(sample.transmission.unwrap().dimensions(), (8, 8));
    }

    #[test]
    fn small_images_are_resized_up_before_cropping() {
        let augmentor = PairAugmentor::new(&config(Some(16)));

        let sample = augmentor.augment(gradient_sample(10, 6), 3);

        assert_eq!(sample.hazy.dimensions(), (16, 16));
        assert_eq!(sample.clear.dimensions(), (16, 16));
    }

    #[test]
    fn all_images_get_the_same_transform() {
        let augmentor = PairAugmentor::new(&config(Some(8)));

        for index in 0..16 {
            let sample = augmentor.augment(gradient_sample(24, 20), index);
            assert_eq!(sample.hazy.to_rgb8(), sample.clear.to_rgb8(), "index {index}");
        }
    }

    #[test]
    fn same_seed_and_index_are_reproducible() {
        let first = PairAugmentor::new(&config(Some(8)));
        let second = PairAugmentor::new(&config(Some(8)));

        let a = first.augment(gradient_sample(30, 30), 5);
        let b = second.augment(gradient_sample(30, 30), 5);

        assert_eq!(a.hazy.to_rgb8(), b.hazy.to_rgb8());
        assert_eq!(
            a.transmission.unwrap().to_luma8(),
            b.transmission.unwrap().to_luma8()
        );
    }

    #[test]
    fn disabled_augmentation_is_identity() {
        let augmentor = PairAugmentor::new(
            &config(None)
                .with_horizontal_flip(false)
                .with_vertical_flip(false),
        );
        let original = gradient_sample(9, 7);

        let sample = augmentor.augment(original.clone(), 11);

        assert_eq!(sample.hazy.to_rgb8(), original.hazy.to_rgb8());
        assert_eq!(sample.clear.to_rgb8(), original.clear.to_rgb8());
    }

    #[test]
    fn crop_callback_sees_the_unflipped_patch() {
        let augmentor = PairAugmentor::new(&config(Some(8)).with_vertical_flip(false));

        for index in 0..8 {
            let (sample, cropped) =
                augmentor.augment_with(gradient_sample(24, 20), index, |s| s.hazy.to_rgb8());

            assert_eq!(cropped.dimensions(), (8, 8));
            let flipped = sample.hazy.to_rgb8();
            // Either untouched or mirrored left to right.
            assert!(
                flipped == cropped || flipped == image::imageops::flip_horizontal(&cropped),
                "index {index}"
            );
        }
    }

    #[test]
    fn flips_preserve_dimensions() {
        let augmentor = PairAugmentor::new(&config(None));

        for index in 0..8 {
            let sample = augmentor.augment(gradient_sample(9, 7), index);
            assert_eq!(sample.hazy.dimensions(), (9, 7));
        }
    }
}
