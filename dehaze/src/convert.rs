//! Conversions between decoded images and tensors.

use std::path::Path;

use burn::tensor::{backend::Backend, Tensor, TensorData};
use image::{DynamicImage, GrayImage, RgbImage};

use crate::{
    error::{DehazeError, DehazeResult},
    priors::MAX_INTENSITY,
};

/// Opens and decodes an image file.
///
/// # Errors
///
/// Returns `ImageOpenFailed` if the file cannot be read or decoded.
pub fn open_image<P: AsRef<Path>>(path: P) -> DehazeResult<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|source| DehazeError::ImageOpenFailed {
        path: path.to_path_buf(),
        source,
    })
}

/// Channel-last `[H, W, 3]` tensor with the raw 8-bit values in `[0, 255]`.
///
/// This is the layout and scale the atmospheric light estimator expects.
pub fn rgb_to_hwc_tensor<B: Backend>(image: &RgbImage, device: &B::Device) -> Tensor<B, 3> {
    let (width, height) = image.dimensions();
    let data: Vec<f32> = image.as_raw().iter().map(|&v| f32::from(v)).collect();
    Tensor::from_data(
        TensorData::new(data, [height as usize, width as usize, 3]),
        device,
    )
}

/// Channel-first `[3, H, W]` tensor scaled to `[0, 1]`.
pub fn rgb_to_chw_tensor<B: Backend>(image: &RgbImage, device: &B::Device) -> Tensor<B, 3> {
    // HWC to CHW
    (rgb_to_hwc_tensor::<B>(image, device) / MAX_INTENSITY).permute([2, 0, 1])
}

/// Channel-first `[1, H, W]` tensor scaled to `[0, 1]`.
pub fn luma_to_chw_tensor<B: Backend>(image: &GrayImage, device: &B::Device) -> Tensor<B, 3> {
    let (width, height) = image.dimensions();
    let data: Vec<f32> = image
        .as_raw()
        .iter()
        .map(|&v| f32::from(v) / MAX_INTENSITY)
        .collect();
    Tensor::from_data(
        TensorData::new(data, [1, height as usize, width as usize]),
        device,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, NdArray};
    use image::{Luma, Rgb};

    type TestBackend = NdArray;

    #[test]
    fn hwc_keeps_raw_values() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8, y as u8, 255]));

        let tensor = rgb_to_hwc_tensor::<TestBackend>(&image, &NdArrayDevice::default());

        assert_eq!(tensor.dims(), [2, 3, 3]);
        let values = tensor.into_data().to_vec::<f32>().unwrap();
        // Pixel (x=2, y=1) is the last one in raster order.
        assert_eq!(&values[15..18], &[2.0, 1.0, 255.0]);
    }

    #[test]
    fn chw_is_normalised_and_channel_first() {
        let image = RgbImage::from_pixel(4, 2, Rgb([255, 0, 51]));

        let tensor = rgb_to_chw_tensor::<TestBackend>(&image, &NdArrayDevice::default());

        assert_eq!(tensor.dims(), [3, 2, 4]);
        let values = tensor.into_data().to_vec::<f32>().unwrap();
        assert!(values[..8].iter().all(|&v| v == 1.0));
        assert!(values[8..16].iter().all(|&v| v == 0.0));
        assert!(values[16..].iter().all(|&v| (v - 0.2).abs() < 1e-6));
    }

    #[test]
    fn luma_has_single_channel() {
        let image = GrayImage::from_pixel(5, 3, Luma([255]));

        let tensor = luma_to_chw_tensor::<TestBackend>(&image, &NdArrayDevice::default());

        assert_eq!(tensor.dims(), [1, 3, 5]);
        assert_eq!(tensor.sum().into_scalar(), 15.0);
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("definitely/not/here.png");

        match open_image(path) {
            Err(DehazeError::ImageOpenFailed { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("Expected ImageOpenFailed error, got {:?}", other.map(|_| ())),
        }
    }
}
