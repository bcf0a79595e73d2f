//! Indexed dataset accessor for the ISIC2018 skin-lesion segmentation task.
//!
//! The accessor discovers numeric sample identifiers from the input-image
//! directory at construction time and resolves matched input/mask paths per
//! access. Every access re-reads from storage; there is no caching, prefetch,
//! or shared mutable state, so independent instances are safe to use from
//! multi-worker data loaders.

use std::{
    fs,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use burn::{
    data::{dataloader::batcher::Batcher, dataset::Dataset},
    tensor::{backend::Backend, Tensor},
};
use image::DynamicImage;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::{DamageConfig, DamageSource, IsicDatasetConfig},
    corruption,
    error::{DatasetError, DatasetResult},
    transform::{self, TensorImage},
};

/// A single (input, target) pair returned by indexed access.
///
/// The variant follows the transform flag: raw decoded images when the
/// pipeline is disabled, channel-first float data when it is enabled. Both
/// sides of a pair always share the same variant.
#[derive(Debug, Clone)]
pub enum IsicSample {
    /// Decoded images exactly as stored on disk.
    Images {
        /// The dermoscopic input image.
        input: DynamicImage,
        /// The segmentation mask.
        target: DynamicImage,
    },
    /// Channel-first float pairs produced by the transform pipeline.
    Tensors {
        /// The input as 3-channel CHW data in [0, 1].
        input: TensorImage,
        /// The mask as 1-channel CHW data in [0, 1].
        target: TensorImage,
    },
}

impl IsicSample {
    /// Convert into the uniform item form used by the Burn data loader.
    ///
    /// Raw images are converted at their original size; transformed pairs
    /// pass through unchanged.
    pub fn into_item(self) -> IsicItem {
        match self {
            Self::Images { input, target } => IsicItem {
                image: transform::image_to_tensor(&input, None),
                mask: transform::mask_to_tensor(&target, None),
            },
            Self::Tensors { input, target } => IsicItem {
                image: input,
                mask: target,
            },
        }
    }
}

/// A batchable data item: dense input and mask planes.
#[derive(Debug, Clone)]
pub struct IsicItem {
    /// Input image data, 3-channel CHW in [0, 1].
    pub image: TensorImage,
    /// Mask data, 1-channel CHW in [0, 1].
    pub mask: TensorImage,
}

/// ISIC2018 dataset accessor.
///
/// Construction scans the input directory once; the identifier list is fixed
/// for the lifetime of the accessor.
#[derive(Debug)]
pub struct IsicDataset {
    config: IsicDatasetConfig,
    ids: Vec<u64>,
    corruption_seed: u64,
}

impl IsicDataset {
    /// Create a new accessor from its configuration.
    ///
    /// Lists the input directory and extracts one integer identifier per
    /// filename that contains a digit run; files without digits are silently
    /// skipped. The damage degree is not validated here; the check fires when
    /// damage is applied.
    pub fn new(config: IsicDatasetConfig) -> DatasetResult<Self> {
        let input_dir = config.root_path.join(&config.input_path);
        let ids = Self::scan_identifiers(&input_dir)?;

        println!("Found {} samples in {}", ids.len(), input_dir.display());

        Ok(Self {
            config,
            ids,
            corruption_seed: rand::random(),
        })
    }

    fn scan_identifiers(input_dir: &Path) -> DatasetResult<Vec<u64>> {
        let entries = fs::read_dir(input_dir).map_err(|e| DatasetError::DirectoryReadFailed {
            path: input_dir.to_path_buf(),
            source: e,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| DatasetError::DirectoryReadFailed {
                path: input_dir.to_path_buf(),
                source: e,
            })?;
            if let Some(id) = extract_identifier(&entry.file_name().to_string_lossy()) {
                ids.push(id);
            }
        }

        // Directory listing order is platform dependent; sorting keeps the
        // index-to-identifier mapping stable across filesystems.
        ids.sort_unstable();
        Ok(ids)
    }

    /// The sorted identifier list backing index translation.
    pub fn identifiers(&self) -> &[u64] {
        &self.ids
    }

    /// The configuration this accessor was built from.
    pub const fn config(&self) -> &IsicDatasetConfig {
        &self.config
    }

    /// Number of samples, after re-checking the directory count invariant.
    ///
    /// Both directories are re-listed on every call and must hold the same
    /// number of entries. The returned length is the identifier count
    /// captured at construction, not the fresh directory counts: the
    /// directories may hold extra non-sample files that never made it into
    /// the identifier list.
    pub fn checked_len(&self) -> DatasetResult<usize> {
        let input_dir = self.input_dir();
        let target_dir = self.target_dir();

        if !input_dir.is_dir() {
            return Err(DatasetError::InputDirectoryNotFound { path: input_dir });
        }
        if !target_dir.is_dir() {
            return Err(DatasetError::TargetDirectoryNotFound { path: target_dir });
        }

        let inputs = count_entries(&input_dir)?;
        let targets = count_entries(&target_dir)?;
        if inputs != targets {
            return Err(DatasetError::MismatchedCount { inputs, targets });
        }

        Ok(self.ids.len())
    }

    /// Load the sample at the given zero-based index.
    ///
    /// Resolves the deterministic input/mask paths for the identifier at
    /// that position, decodes both images, and applies the transform pipeline
    /// and the configured corruption. Only the input is ever corrupted.
    pub fn sample(&self, index: usize) -> DatasetResult<IsicSample> {
        let id = *self
            .ids
            .get(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.ids.len(),
            })?;

        let input_path = self.input_image_path(id);
        let target_path = self.target_mask_path(id);

        let input = open_image(&input_path)?;
        let target = open_image(&target_path)?;

        let resize = self.config.resize_target();
        let mut sample = if self.config.transform {
            IsicSample::Tensors {
                input: transform::image_to_tensor(&input, resize),
                target: transform::mask_to_tensor(&target, resize),
            }
        } else {
            IsicSample::Images { input, target }
        };

        if let Some(damage) = &self.config.damage {
            sample = self.apply_damage(sample, damage, &input_path, index)?;
        }

        Ok(sample)
    }

    fn apply_damage(
        &self,
        sample: IsicSample,
        damage: &DamageConfig,
        input_path: &Path,
        index: usize,
    ) -> DatasetResult<IsicSample> {
        let mut rng = self.corruption_rng(index);
        let resize = self.config.resize_target();

        match damage.source {
            DamageSource::OriginalFile => {
                // The corrupted input is derived from the file on disk, not
                // the in-memory value, mirroring the upstream pipeline.
                let original = open_image(input_path)?;
                let damaged = corruption::corrupt_image(&original, damage, &mut rng)?;
                Ok(match sample {
                    IsicSample::Images { target, .. } => IsicSample::Images {
                        input: damaged,
                        target,
                    },
                    IsicSample::Tensors { target, .. } => IsicSample::Tensors {
                        input: transform::image_to_tensor(&damaged, resize),
                        target,
                    },
                })
            }
            DamageSource::TransformedImage => Ok(match sample {
                IsicSample::Images { input, target } => IsicSample::Images {
                    input: corruption::corrupt_image(&input, damage, &mut rng)?,
                    target,
                },
                IsicSample::Tensors { mut input, target } => {
                    corruption::corrupt_tensor(&mut input, damage, &mut rng)?;
                    IsicSample::Tensors { input, target }
                }
            }),
        }
    }

    fn corruption_rng(&self, index: usize) -> StdRng {
        StdRng::seed_from_u64(self.corruption_seed.wrapping_add(index as u64))
    }

    fn input_dir(&self) -> PathBuf {
        self.config.root_path.join(&self.config.input_path)
    }

    fn target_dir(&self) -> PathBuf {
        self.config.root_path.join(&self.config.target_path)
    }

    fn input_image_path(&self, id: u64) -> PathBuf {
        self.input_dir().join(format!("ISIC_{id:07}.jpg"))
    }

    fn target_mask_path(&self, id: u64) -> PathBuf {
        self.target_dir().join(format!("ISIC_{id:07}_segmentation.png"))
    }
}

impl Dataset<IsicItem> for IsicDataset {
    fn get(&self, index: usize) -> Option<IsicItem> {
        if index >= self.ids.len() {
            return None;
        }
        match self.sample(index) {
            Ok(sample) => Some(sample.into_item()),
            Err(err) => {
                eprintln!("Failed to load sample {index}: {err}");
                None
            }
        }
    }

    fn len(&self) -> usize {
        // The count invariant is a fatal precondition: a mismatch means the
        // dataset tree itself is broken, and the trait offers no error
        // channel.
        match self.checked_len() {
            Ok(len) => len,
            Err(err) => panic!("dataset length query failed: {err}"),
        }
    }
}

/// Extract the first run of ASCII digits from a filename.
///
/// Leading zeros parse as part of the integer, so `ISIC_0000007.jpg` yields 7.
fn extract_identifier(name: &str) -> Option<u64> {
    let start = name.find(|c: char| c.is_ascii_digit())?;
    let digits: String = name[start..]
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn count_entries(dir: &Path) -> DatasetResult<usize> {
    let entries = fs::read_dir(dir).map_err(|e| DatasetError::DirectoryReadFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;
    Ok(entries.count())
}

fn open_image(path: &Path) -> DatasetResult<DynamicImage> {
    image::open(path).map_err(|e| DatasetError::ImageOpenFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Batcher converting vectors of [`IsicItem`] into [`IsicBatch`].
///
/// Tensor creation and device placement happen here, following Burn's
/// convention that datasets return raw data.
#[derive(Clone, Default)]
pub struct IsicBatcher<B: Backend> {
    _phantom: PhantomData<B>,
}

impl<B: Backend> IsicBatcher<B> {
    /// Create a new batcher.
    pub const fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

/// A batch of input images and segmentation masks.
#[derive(Debug, Clone)]
pub struct IsicBatch<B: Backend> {
    /// Batched input tensor with shape `[B, 3, H, W]`.
    pub images: Tensor<B, 4>,
    /// Batched mask tensor with shape `[B, 1, H, W]`.
    pub masks: Tensor<B, 4>,
}

impl<B: Backend> Batcher<B, IsicItem, IsicBatch<B>> for IsicBatcher<B> {
    fn batch(&self, items: Vec<IsicItem>, device: &B::Device) -> IsicBatch<B> {
        let batch_size = items.len();

        let mut images = Vec::with_capacity(batch_size);
        let mut masks = Vec::with_capacity(batch_size);
        for item in items {
            images.push(item.image.into_tensor::<B>(device));
            masks.push(item.mask.into_tensor::<B>(device));
        }

        IsicBatch {
            images: Tensor::stack(images, 0),
            masks: Tensor::stack(masks, 0),
        }
    }
}
