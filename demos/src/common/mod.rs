//! Common utilities for the ISIC2018 demos.
//!
//! This module provides compile-time backend selection shared across
//! the demo binaries.

use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "cuda")] {
        /// The backend selected at compile time.
        pub type SelectedBackend = burn::backend::Cuda;
        /// The device type of the selected backend.
        pub type SelectedDevice = burn::backend::cuda::CudaDevice;

        /// Create the default device for the selected backend.
        pub fn create_device() -> SelectedDevice {
            SelectedDevice::default()
        }

        /// Human-readable name of the selected backend.
        pub const fn get_backend_name() -> &'static str {
            "cuda"
        }
    } else if #[cfg(feature = "wgpu")] {
        /// The backend selected at compile time.
        pub type SelectedBackend = burn::backend::Wgpu;
        /// The device type of the selected backend.
        pub type SelectedDevice = burn::backend::wgpu::WgpuDevice;

        /// Create the default device for the selected backend.
        pub fn create_device() -> SelectedDevice {
            SelectedDevice::default()
        }

        /// Human-readable name of the selected backend.
        pub const fn get_backend_name() -> &'static str {
            "wgpu"
        }
    } else {
        /// The backend selected at compile time.
        pub type SelectedBackend = burn::backend::ndarray::NdArray<f32>;
        /// The device type of the selected backend.
        pub type SelectedDevice = burn::backend::ndarray::NdArrayDevice;

        /// Create the default device for the selected backend.
        pub fn create_device() -> SelectedDevice {
            SelectedDevice::default()
        }

        /// Human-readable name of the selected backend.
        pub const fn get_backend_name() -> &'static str {
            "ndarray"
        }
    }
}
