//! # Grayscale Erosion
//!
//! Morphological erosion with a rectangular structuring element, i.e. a local
//! minimum filter. Positions of the window that fall outside the image are
//! ignored, so border pixels take the minimum over the clipped window.

use burn::{
    nn::{
        pool::{MaxPool2d, MaxPool2dConfig},
        PaddingConfig2d,
    },
    prelude::*,
    tensor::ElementConversion,
};

/// Configuration for the `Erosion2d` operation.
#[derive(Config, Debug)]
pub struct Erosion2dConfig {
    /// Height and width of the rectangular structuring element.
    #[config(default = "[3, 3]")]
    pub kernel_size: [usize; 2],
}

impl Erosion2dConfig {
    /// Initializes a new `Erosion2d` operation.
    ///
    /// # Panics
    ///
    /// Panics if either kernel dimension is zero.
    pub fn init(&self) -> Erosion2d {
        let [kernel_h, kernel_w] = self.kernel_size;
        assert!(
            kernel_h > 0 && kernel_w > 0,
            "Erosion kernel must be non-empty, got {kernel_h}x{kernel_w}"
        );

        Erosion2d {
            kernel_size: self.kernel_size,
            pool: MaxPool2dConfig::new(self.kernel_size)
                .with_strides([1, 1])
                .with_padding(PaddingConfig2d::Valid)
                .init(),
        }
    }
}

/// Rectangular grayscale erosion.
///
/// The anchor sits at `(k_h / 2, k_w / 2)`, which is the window centre for odd
/// sizes.
#[derive(Debug, Clone)]
pub struct Erosion2d {
    kernel_size: [usize; 2],
    pool: MaxPool2d,
}

impl Erosion2d {
    /// Kernel height and width.
    pub const fn kernel_size(&self) -> [usize; 2] {
        self.kernel_size
    }

    /// Applies the erosion to every channel independently.
    ///
    /// # Shapes
    /// - input: `[batch_size, channels, height, width]`
    /// - output: `[batch_size, channels, height, width]`
    pub fn forward<B: Backend>(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let [kernel_h, kernel_w] = self.kernel_size;
        if kernel_h == 1 && kernel_w == 1 {
            return x;
        }

        let top = kernel_h / 2;
        let left = kernel_w / 2;
        let bottom = kernel_h - 1 - top;
        let right = kernel_w - 1 - left;

        // min(x) = -max(-x). Padding with -inf keeps outside cells from ever winning.
        let padded = x.neg().pad(
            (left, right, top, bottom),
            B::FloatElem::from_elem(f32::NEG_INFINITY),
        );

        self.pool.forward(padded).neg()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{
        backend::{ndarray::NdArrayDevice, NdArray},
        tensor::{Tensor, TensorData},
    };

    type TestBackend = NdArray;
    type TestDevice = NdArrayDevice;

    fn values(tensor: Tensor<TestBackend, 4>) -> Vec<f32> {
        tensor.into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn unit_kernel_is_identity() {
        let device = TestDevice::default();
        let x = Tensor::<TestBackend, 4>::from_data(
            TensorData::new(vec![3.0_f32, 1.0, 4.0, 1.0, 5.0, 9.0], [1, 1, 2, 3]),
            &device,
        );
        let erosion = Erosion2dConfig::new().with_kernel_size([1, 1]).init();

        assert_eq!(values(erosion.forward(x)), vec![3.0, 1.0, 4.0, 1.0, 5.0, 9.0]);
    }

    #[test]
    fn erosion_takes_local_minimum() {
        let device = TestDevice::default();
        #[rustfmt::skip]
        let data = vec![
            5.0_f32, 5.0, 5.0, 5.0,
            5.0,     1.0, 5.0, 5.0,
            5.0,     5.0, 5.0, 5.0,
            5.0,     5.0, 5.0, 7.0,
        ];
        let x = Tensor::<TestBackend, 4>::from_data(TensorData::new(data, [1, 1, 4, 4]), &device);
        let erosion = Erosion2dConfig::new().init();

        #[rustfmt::skip]
        let expected = vec![
            1.0, 1.0, 1.0, 5.0,
            1.0, 1.0, 1.0, 5.0,
            1.0, 1.0, 1.0, 5.0,
            5.0, 5.0, 5.0, 5.0,
        ];
        assert_eq!(values(erosion.forward(x)), expected);
    }

    #[test]
    fn border_window_is_clipped() {
        let device = TestDevice::default();
        // A large window over a tiny positive image must not pull in padding values.
        let x = Tensor::<TestBackend, 4>::from_data(
            TensorData::new(vec![2.0_f32, 3.0, 4.0, 6.0], [1, 1, 2, 2]),
            &device,
        );
        let erosion = Erosion2dConfig::new().with_kernel_size([31, 31]).init();

        assert_eq!(values(erosion.forward(x)), vec![2.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn channels_are_eroded_independently() {
        let device = TestDevice::default();
        let x = Tensor::<TestBackend, 4>::from_data(
            TensorData::new(
                vec![1.0_f32, 9.0, 9.0, 9.0, 8.0, 8.0, 8.0, 2.0],
                [1, 2, 2, 2],
            ),
            &device,
        );
        let erosion = Erosion2dConfig::new().init();

        assert_eq!(
            values(erosion.forward(x)),
            vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]
        );
    }

    #[test]
    fn even_kernel_keeps_shape() {
        let device = TestDevice::default();
        let x = Tensor::<TestBackend, 4>::ones([2, 3, 5, 7], &device);
        let erosion = Erosion2dConfig::new().with_kernel_size([4, 2]).init();

        assert_eq!(erosion.forward(x).dims(), [2, 3, 5, 7]);
    }

    #[test]
    #[should_panic(expected = "Erosion kernel must be non-empty")]
    fn empty_kernel_panics() {
        let _ = Erosion2dConfig::new().with_kernel_size([0, 3]).init();
    }
}
