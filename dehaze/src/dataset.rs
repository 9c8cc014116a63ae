//! Dataset implementation for paired hazy/clear training and evaluation.
//!
//! This module provides a folder dataset in the layout used by RESIDE-style
//! benchmarks, handling file discovery, augmentation and the computation of the
//! haze priors (atmospheric light, edge channel) for every sample.
//!
//! ```text
//! <data_root_dir>/<split>/hazy/1400_1_0.8.png
//! <data_root_dir>/<split>/clear/1400.png
//! <data_root_dir>/<split>/trans/1400_1_0.8.png   (optional)
//! ```

use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use burn::data::{dataloader::batcher::Batcher, dataset::Dataset};
use burn::tensor::{backend::Backend, Tensor, TensorData};
use walkdir::WalkDir;

use crate::{
    augmentation::{PairAugmentor, RawSample},
    config::{AtmosphericOutput, ClearNaming, DatasetConfig, Split},
    convert::{luma_to_chw_tensor, open_image, rgb_to_chw_tensor, rgb_to_hwc_tensor},
    error::{DehazeError, DehazeResult},
    priors::{append_edge_channel, atmospheric_light_luminance, atmospheric_light_rgb},
};

/// Valid image extensions, compared case-insensitively.
const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "ppm", "bmp"];

/// Represents a single preprocessed sample of the dehazing dataset.
#[derive(Debug, Clone)]
pub struct DehazeItem<B: Backend> {
    /// Ground truth tensor with shape [3, H, W] in [0, 1]
    pub clear: Tensor<B, 3>,
    /// Hazy input tensor with shape [C, H, W] in [0, 1], C=4 when the edge channel is appended
    pub hazy: Tensor<B, 3>,
    /// Transmission map with shape [1, H, W] in [0, 1]
    pub transmission: Option<Tensor<B, 3>>,
    /// Atmospheric light, [1, 1, 1] luminance or [3, 1, 1] raw colour
    pub atmospheric_light: Option<Tensor<B, 3>>,
}

/// Represents a batch of preprocessed samples.
///
/// Optional fields are only present when every item of the batch carries them.
#[derive(Debug, Clone)]
pub struct DehazeBatch<B: Backend> {
    /// Batched ground truth tensor with shape [B, 3, H, W]
    pub clear: Tensor<B, 4>,
    /// Batched hazy input tensor with shape [B, C, H, W]
    pub hazy: Tensor<B, 4>,
    /// Batched transmission maps with shape [B, 1, H, W]
    pub transmission: Option<Tensor<B, 4>>,
    /// Batched atmospheric light with shape [B, 1, 1, 1] or [B, 3, 1, 1]
    pub atmospheric_light: Option<Tensor<B, 4>>,
}

/// Batcher implementation for converting vectors of DehazeItem into DehazeBatch.
#[derive(Clone, Default)]
pub struct DehazeBatcher<B: Backend> {
    _phantom: PhantomData<B>,
}

impl<B: Backend> DehazeBatcher<B> {
    /// Create a new batcher.
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

fn stack_optional<B: Backend>(
    tensors: Vec<Option<Tensor<B, 3>>>,
    device: &B::Device,
) -> Option<Tensor<B, 4>> {
    let tensors = tensors
        .into_iter()
        .map(|tensor| tensor.map(|t| t.to_device(device)))
        .collect::<Option<Vec<_>>>()?;
    Some(Tensor::stack(tensors, 0))
}

impl<B: Backend> Batcher<B, DehazeItem<B>, DehazeBatch<B>> for DehazeBatcher<B> {
    fn batch(&self, items: Vec<DehazeItem<B>>, device: &B::Device) -> DehazeBatch<B> {
        let batch_size = items.len();

        let mut clear = Vec::with_capacity(batch_size);
        let mut hazy = Vec::with_capacity(batch_size);
        let mut transmission = Vec::with_capacity(batch_size);
        let mut atmospheric_light = Vec::with_capacity(batch_size);

        for item in items {
            clear.push(item.clear.to_device(device));
            hazy.push(item.hazy.to_device(device));
            transmission.push(item.transmission);
            atmospheric_light.push(item.atmospheric_light);
        }

        // Stack tensors along the batch dimension (dim 0) to create [B, C, H, W] tensors
        DehazeBatch {
            clear: Tensor::stack(clear, 0),
            hazy: Tensor::stack(hazy, 0),
            transmission: stack_optional(transmission, device),
            atmospheric_light: stack_optional(atmospheric_light, device),
        }
    }
}

/// File paths of one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplePaths {
    /// Hazy input image.
    pub hazy: PathBuf,
    /// Matching clear ground truth.
    pub clear: PathBuf,
    /// Matching transmission map, when requested.
    pub transmission: Option<PathBuf>,
}

/// Paired hazy/clear folder dataset.
pub struct DehazeDataset<B: Backend> {
    items: Vec<SamplePaths>,
    config: DatasetConfig,
    split: Split,
    augmentor: PairAugmentor,
    device: B::Device,
}

impl<B: Backend> DehazeDataset<B> {
    /// Create a new dataset over `<data_root_dir>/<split>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, a required directory is
    /// missing or unreadable, or no hazy/clear pair is found.
    pub fn new(config: &DatasetConfig, split: Split, device: &B::Device) -> DehazeResult<Self> {
        config.validate()?;
        let items = Self::collect_samples(config, split)?;
        let augmentor = PairAugmentor::new(config);

        tracing::debug!(seed = augmentor.seed(), ?split, "dataset augmentation seed");

        Ok(Self {
            items,
            config: config.clone(),
            split,
            augmentor,
            device: device.clone(),
        })
    }

    /// The split this dataset reads.
    pub const fn split(&self) -> Split {
        self.split
    }

    /// Paths of the sample at `index`.
    pub fn sample_paths(&self, index: usize) -> Option<&SamplePaths> {
        self.items.get(index)
    }

    /// Find every hazy image of the split and resolve its clear (and transmission) file.
    fn collect_samples(config: &DatasetConfig, split: Split) -> DehazeResult<Vec<SamplePaths>> {
        let split_root = config.split_dir(split);
        let hazy_root = split_root.join("hazy");
        let clear_root = split_root.join("clear");
        let trans_root = split_root.join("trans");

        let mut required = vec![&hazy_root, &clear_root];
        if config.load_transmission {
            required.push(&trans_root);
        }
        if let Some(missing) = required.into_iter().find(|dir| !dir.is_dir()) {
            return Err(DehazeError::DirectoryNotFound {
                path: missing.clone(),
            });
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(&hazy_root).sort_by_file_name() {
            let entry = entry.map_err(|source| DehazeError::DirectoryReadFailed {
                path: hazy_root.clone(),
                source,
            })?;

            let hazy = entry.path();
            if !entry.file_type().is_file() || !is_image_file(hazy) {
                continue;
            }

            // Walked paths always live below the walk root.
            let Ok(relative) = hazy.strip_prefix(&hazy_root) else {
                continue;
            };

            let Some(clear) = find_clear_image(&clear_root, relative, config.clear_naming) else {
                tracing::warn!(hazy = %hazy.display(), "no clear image found, skipping");
                continue;
            };

            let transmission = if config.load_transmission {
                let path = trans_root.join(relative);
                if !path.is_file() {
                    tracing::warn!(hazy = %hazy.display(), "no transmission map found, skipping");
                    continue;
                }
                Some(path)
            } else {
                None
            };

            items.push(SamplePaths {
                hazy: hazy.to_path_buf(),
                clear,
                transmission,
            });
        }

        if items.is_empty() {
            return Err(DehazeError::NoValidPairs { path: hazy_root });
        }

        tracing::info!(
            count = items.len(),
            root = %split_root.display(),
            "found hazy/clear pairs"
        );
        Ok(items)
    }

    /// Load, augment and convert one sample.
    fn load(&self, paths: &SamplePaths, index: usize) -> DehazeResult<DehazeItem<B>> {
        let sample = RawSample {
            hazy: open_image(&paths.hazy)?,
            clear: open_image(&paths.clear)?,
            transmission: paths.transmission.as_ref().map(open_image).transpose()?,
        };

        // Estimated on the full hazy image unless the crop is requested.
        let (sample, atmospheric_light) = match self.split {
            Split::Train if self.config.estimate_after_crop => {
                let (sample, light) = self.augmentor.augment_with(sample, index, |cropped| {
                    self.estimate_light(cropped)
                });
                (sample, light?)
            }
            Split::Train => {
                let light = self.estimate_light(&sample)?;
                (self.augmentor.augment(sample, index), light)
            }
            Split::Test => {
                let light = self.estimate_light(&sample)?;
                (sample, light)
            }
        };

        let hazy = rgb_to_chw_tensor::<B>(&sample.hazy.to_rgb8(), &self.device);
        let hazy = if self.config.edge_channel {
            append_edge_channel(hazy)?
        } else {
            hazy
        };

        Ok(DehazeItem {
            clear: rgb_to_chw_tensor(&sample.clear.to_rgb8(), &self.device),
            hazy,
            transmission: sample
                .transmission
                .map(|t| luma_to_chw_tensor(&t.to_luma8(), &self.device)),
            atmospheric_light,
        })
    }

    /// Atmospheric light of the sample's hazy image in the configured form.
    fn estimate_light(&self, sample: &RawSample) -> DehazeResult<Option<Tensor<B, 3>>> {
        if !self.config.atmospheric_light {
            return Ok(None);
        }

        let hazy = rgb_to_hwc_tensor::<B>(&sample.hazy.to_rgb8(), &self.device);
        let data = match self.config.atmospheric_output {
            AtmosphericOutput::Luminance => TensorData::new(
                vec![atmospheric_light_luminance(hazy, &self.config.atmospheric)?],
                [1, 1, 1],
            ),
            AtmosphericOutput::Rgb => TensorData::new(
                atmospheric_light_rgb(hazy, &self.config.atmospheric)?.to_vec(),
                [3, 1, 1],
            ),
        };

        Ok(Some(Tensor::from_data(data, &self.device)))
    }
}

impl<B: Backend> Dataset<DehazeItem<B>> for DehazeDataset<B> {
    fn get(&self, index: usize) -> Option<DehazeItem<B>> {
        let paths = self.items.get(index)?;

        match self.load(paths, index) {
            Ok(item) => Some(item),
            Err(err) => {
                tracing::warn!(hazy = %paths.hazy.display(), error = %err, "failed to load sample");
                None
            }
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|valid| ext.eq_ignore_ascii_case(valid))
        })
}

/// Resolve the clear image for a hazy path relative to the hazy root.
fn find_clear_image(clear_root: &Path, relative: &Path, naming: ClearNaming) -> Option<PathBuf> {
    match naming {
        ClearNaming::SameName => {
            let path = clear_root.join(relative);
            path.is_file().then_some(path)
        }
        ClearNaming::SceneId => {
            let stem = relative.file_stem()?.to_str()?;
            let scene = stem.split('_').next()?;
            let dir = match relative.parent() {
                Some(parent) => clear_root.join(parent),
                None => clear_root.to_path_buf(),
            };

            IMAGE_EXTENSIONS
                .iter()
                .flat_map(|ext| [ext.to_string(), ext.to_ascii_uppercase()])
                .map(|ext| dir.join(format!("{scene}.{ext}")))
                .find(|path| path.is_file())
        }
    }
}
