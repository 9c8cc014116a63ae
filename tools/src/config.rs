//! Configuration files accepted by the tool binaries through `--config`.

use dehaze_burn::{DatasetConfig, Split};
use serde::{Deserialize, Serialize};

/// Configuration for the `dataset_test` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetTestConfig {
    /// Dataset settings.
    pub dataset: DatasetConfig,
    /// Split to load.
    pub split: Split,
    /// Number of samples to inspect individually.
    pub num_samples: usize,
    /// Batch size for the loader check.
    pub batch_size: usize,
    /// Number of loader workers.
    pub num_workers: usize,
    /// Number of batches to iterate.
    pub max_batches: usize,
}

impl Default for DatasetTestConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig::new(),
            split: Split::Test,
            num_samples: 10,
            batch_size: 4,
            num_workers: 2,
            max_batches: 3,
        }
    }
}

/// Configuration for the `edge_map` tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeMapConfig {
    /// Multiplier applied to the `[0, 1]` edge values before quantisation.
    pub scale: f32,
}

impl Default for EdgeMapConfig {
    fn default() -> Self {
        Self { scale: 255.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dehaze_burn::AtmosphericOutput;

    #[test]
    fn dataset_test_config_from_json() {
        let json = r#"{
            "dataset": {
                "data_root_dir": "data/its",
                "patch_size": 240,
                "horizontal_flip": true,
                "vertical_flip": false,
                "load_transmission": false,
                "atmospheric_light": true,
                "atmospheric_output": "Rgb",
                "estimate_after_crop": true,
                "edge_channel": true,
                "clear_naming": "SceneId",
                "seed": 1,
                "atmospheric": { "top_fraction": 0.001, "window_size": 15, "rounding": "Floor" }
            },
            "split": "Train",
            "num_samples": 2,
            "batch_size": 1,
            "num_workers": 0,
            "max_batches": 1
        }"#;

        let config: DatasetTestConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.split, Split::Train);
        assert_eq!(config.dataset.patch_size, Some(240));
        assert_eq!(config.dataset.atmospheric.window_size, 15);
        assert!(!config.dataset.vertical_flip);
        assert_eq!(config.dataset.atmospheric_output, AtmosphericOutput::Rgb);
        assert!(config.dataset.estimate_after_crop);
    }

    #[test]
    fn default_edge_scale_is_eight_bit() {
        assert_eq!(EdgeMapConfig::default().scale, 255.0);
    }
}
