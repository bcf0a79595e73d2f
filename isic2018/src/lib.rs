//! ISIC2018 skin-lesion segmentation dataset loading for the Burn framework.
//!
//! This crate exposes paired dermoscopic input images and segmentation masks
//! to a training loop: indexed file access over the ISIC2018 directory
//! layout, optional resize + channel-first tensor conversion, and synthetic
//! input corruption for robustness experiments.

mod config;
mod corruption;
mod dataset;
mod error;
mod transform;

pub use config::{DamageConfig, DamageMethod, DamageSource, IsicDatasetConfig};
pub use corruption::{corrupt_image, corrupt_tensor, validate_degree};
pub use dataset::{IsicBatch, IsicBatcher, IsicDataset, IsicItem, IsicSample};
pub use error::{DatasetError, DatasetResult};
pub use transform::{image_to_tensor, mask_to_tensor, TensorImage};
