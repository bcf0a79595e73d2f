//! Configuration for the ISIC2018 demos.
//!
//! This module provides the configuration structure for the dataset testing
//! application.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the dataset testing demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetTestConfig {
    /// Path to the dataset root.
    pub dataset_path: PathBuf,
    /// Subdirectory holding the input images.
    pub input_subdir: PathBuf,
    /// Subdirectory holding the segmentation masks.
    pub target_subdir: PathBuf,
    /// Number of samples to test.
    pub num_samples: usize,
    /// Resize target (square). None disables resizing.
    pub image_size: Option<u32>,
    /// Damage degree for synthetic input corruption. None disables damage.
    pub damage_degree: Option<f64>,
}

impl Default for DatasetTestConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("datasets/isic2018"),
            input_subdir: PathBuf::from("ISIC2018_Task1-2_Training_Input"),
            target_subdir: PathBuf::from("ISIC2018_Task1_Training_GroundTruth"),
            num_samples: 10,
            image_size: Some(512),
            damage_degree: None,
        }
    }
}
