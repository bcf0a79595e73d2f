//! ISIC2018 Dataset Demos
//!
//! This crate provides demo applications for the ISIC2018 dataset crate.
//!
//! ## Available Demos
//!
//! - `dataset_test`: Dataset loading, corruption, and batching utilities
//!
//! ## Usage
//!
//! ```bash
//! # Test dataset loading
//! cargo run --bin dataset_test -- --dataset-path datasets/isic2018
//!
//! # Test with synthetic input corruption
//! cargo run --bin dataset_test -- --dataset-path datasets/isic2018 --damage-degree 0.3
//! ```

pub mod common;
pub mod config;

// Re-export commonly used items
pub use common::{create_device, get_backend_name, SelectedBackend, SelectedDevice};
pub use config::DatasetTestConfig;
