//! Backend selection by cargo feature.
//!
//! `cuda` wins over `wgpu`, and `ndarray` (CPU) is the fallback.

use burn::tensor::backend::Backend;
use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "cuda")] {
        /// Selected backend type
        pub type SelectedBackend = burn::backend::Cuda;

        const BACKEND_NAME: &str = "CUDA (NVIDIA GPU)";
    } else if #[cfg(feature = "wgpu")] {
        /// Selected backend type
        pub type SelectedBackend = burn::backend::Wgpu;

        const BACKEND_NAME: &str = "WGPU (GPU)";
    } else {
        /// Selected backend type
        pub type SelectedBackend = burn::backend::NdArray;

        const BACKEND_NAME: &str = "NdArray (CPU)";
    }
}

/// Selected device type
pub type SelectedDevice = <SelectedBackend as Backend>::Device;

/// Creates the default device of the selected backend.
pub fn create_device() -> SelectedDevice {
    let device = SelectedDevice::default();
    tracing::debug!(backend = BACKEND_NAME, ?device, "created device");
    device
}

/// Gets the backend name for logging purposes
pub const fn get_backend_name() -> &'static str {
    BACKEND_NAME
}
