//! Absolute forward differences along a single tensor dimension.

use burn::prelude::*;

/// Computes `|x[i + 1] - x[i]|` along `dim`.
///
/// The output has the same shape as the input except that `dim` shrinks by one.
///
/// # Panics
///
/// Panics if `dim` is out of range or the dimension has fewer than two elements.
pub fn abs_diff<B: Backend, const D: usize>(x: Tensor<B, D>, dim: usize) -> Tensor<B, D> {
    let len = x.dims()[dim];
    assert!(
        len >= 2,
        "abs_diff needs at least two elements along dim {dim}, got {len}"
    );

    let head = x.clone().narrow(dim, 0, len - 1);
    let tail = x.narrow(dim, 1, len - 1);

    (tail - head).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::{
        backend::{ndarray::NdArrayDevice, NdArray},
        tensor::{Tensor, TensorData},
    };

    type TestBackend = NdArray;

    #[test]
    fn diff_along_last_dim() {
        let device = NdArrayDevice::default();
        let x = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![1.0_f32, 4.0, 2.0, 0.0, 0.0, 5.0], [2, 3]),
            &device,
        );

        let dx = abs_diff(x, 1);

        assert_eq!(dx.dims(), [2, 2]);
        assert_eq!(
            dx.into_data().to_vec::<f32>().unwrap(),
            vec![3.0, 2.0, 0.0, 5.0]
        );
    }

    #[test]
    fn diff_along_first_dim() {
        let device = NdArrayDevice::default();
        let x = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![1.0_f32, 4.0, 2.0, 0.0, 0.0, 5.0], [2, 3]),
            &device,
        );

        let dy = abs_diff(x, 0);

        assert_eq!(dy.dims(), [1, 3]);
        assert_eq!(dy.into_data().to_vec::<f32>().unwrap(), vec![1.0, 4.0, 3.0]);
    }

    #[test]
    #[should_panic(expected = "abs_diff needs at least two elements")]
    fn single_element_dim_panics() {
        let device = NdArrayDevice::default();
        let x = Tensor::<TestBackend, 2>::zeros([1, 4], &device);
        let _ = abs_diff(x, 0);
    }
}
