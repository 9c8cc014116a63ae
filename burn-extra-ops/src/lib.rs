//! Additional image operations for the Burn deep learning framework
//!
//! This crate provides low-level operations used by the haze priors that are not
//! yet available in the core Burn framework.

use burn::prelude::*;

mod diff;
mod erosion;

// Convenient re-exports
pub use diff::abs_diff;
pub use erosion::{Erosion2d, Erosion2dConfig};

/// Additional operations for Burn tensors
pub trait TensorExtraOps<B: Backend, const D: usize> {
    /// Absolute forward difference along `dim` (the dimension shrinks by one).
    fn abs_diff(self, dim: usize) -> Self;
}

impl<B: Backend, const D: usize> TensorExtraOps<B, D> for Tensor<B, D> {
    fn abs_diff(self, dim: usize) -> Self {
        diff::abs_diff(self, dim)
    }
}

/// Image operations that only make sense on `[batch, channels, height, width]` tensors.
pub trait ImageExtraOps<B: Backend> {
    /// Grayscale erosion with a rectangular window of `kernel_size`.
    fn erode(self, kernel_size: [usize; 2]) -> Self;
}

impl<B: Backend> ImageExtraOps<B> for Tensor<B, 4> {
    fn erode(self, kernel_size: [usize; 2]) -> Self {
        Erosion2dConfig::new()
            .with_kernel_size(kernel_size)
            .init()
            .forward(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{backend::ndarray::NdArray, tensor::Tensor};

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_tensor_extra_ops() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 4>::random(
            [2, 3, 4, 5],
            burn::tensor::Distribution::Normal(0.0, 1.0),
            &device,
        );

        assert_eq!(tensor.clone().abs_diff(3).dims(), [2, 3, 4, 4]);
        assert_eq!(tensor.clone().abs_diff(2).dims(), [2, 3, 3, 5]);
        assert_eq!(tensor.erode([3, 3]).dims(), [2, 3, 4, 5]);
    }

    #[test]
    fn test_erode_never_increases_values() {
        let device = Default::default();
        let tensor = Tensor::<TestBackend, 4>::random(
            [1, 1, 6, 6],
            burn::tensor::Distribution::Uniform(0.0, 1.0),
            &device,
        );

        let eroded = tensor.clone().erode([3, 3]);
        let excess = (eroded - tensor).clamp_min(0.0).sum().into_scalar();
        assert_eq!(excess, 0.0);
    }
}
