//! Configuration for the ISIC2018 dataset accessor.
//!
//! The configuration is immutable after construction: paths, the transform
//! flag, the resize target, and the optional damage settings are fixed for
//! the lifetime of the dataset built from them.

use std::{fmt, path::PathBuf, str::FromStr};

use burn::prelude::*;

use crate::error::DatasetError;

/// Configuration for [`IsicDataset`](crate::IsicDataset).
#[derive(Config, Debug)]
pub struct IsicDatasetConfig {
    /// Root directory of the dataset.
    pub root_path: PathBuf,
    /// Subdirectory of `root_path` holding the input images.
    #[config(default = "PathBuf::from(\"ISIC2018_Task1-2_Training_Input\")")]
    pub input_path: PathBuf,
    /// Subdirectory of `root_path` holding the segmentation masks.
    #[config(default = "PathBuf::from(\"ISIC2018_Task1_Training_GroundTruth\")")]
    pub target_path: PathBuf,
    /// Enable the resize + tensor-convert pipeline.
    #[config(default = "false")]
    pub transform: bool,
    /// Resize target width. A value below 1 in either dimension disables
    /// resizing, leaving images at their original size.
    #[config(default = "0")]
    pub image_width: u32,
    /// Resize target height.
    #[config(default = "0")]
    pub image_height: u32,
    /// Synthetic input corruption. `None` leaves inputs untouched.
    #[config(default = "None")]
    pub damage: Option<DamageConfig>,
}

impl IsicDatasetConfig {
    /// The resize target as (width, height), or `None` when either
    /// configured dimension disables resizing.
    pub const fn resize_target(&self) -> Option<(u32, u32)> {
        if self.image_width < 1 || self.image_height < 1 {
            None
        } else {
            Some((self.image_width, self.image_height))
        }
    }
}

/// Settings for synthetic input corruption.
///
/// The degree must lie strictly inside (0, 1); it is checked when damage is
/// applied, not when the configuration is built.
#[derive(Config, Debug)]
pub struct DamageConfig {
    /// The corruption strategy.
    pub method: DamageMethod,
    /// Fraction of input pixels subjected to corruption.
    pub degree: f64,
    /// Which value the corruption derives from.
    #[config(default = "DamageSource::OriginalFile")]
    pub source: DamageSource,
}

/// Corruption strategy, keyed by method name.
///
/// Unlike the other configuration types this enum keeps a hand-written
/// [`Display`]/[`FromStr`] pair keyed by method name, so it derives the
/// serialization/clone traits it needs as a [`DamageConfig`] field directly
/// rather than through `Config` (whose generated `Display` would collide with
/// the manual one).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DamageMethod {
    /// Zero a random subset of pixels proportional to the damage degree.
    RandomCorrupt,
}

impl FromStr for DamageMethod {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random-corrupt" => Ok(Self::RandomCorrupt),
            other => Err(DatasetError::UnknownDamageMethod {
                method: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for DamageMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RandomCorrupt => f.write_str("random-corrupt"),
        }
    }
}

/// Which value the corruption routine derives the damaged input from.
///
/// The upstream data pipeline re-read the original file even when a
/// transformed copy was already in memory; both behaviors are kept here
/// behind this switch.
#[derive(Config, Debug, PartialEq, Eq)]
pub enum DamageSource {
    /// Re-open and decode the input path, then corrupt the fresh copy.
    OriginalFile,
    /// Corrupt the value already loaded (and possibly transformed) in memory.
    TransformedImage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_method_parses_known_name() {
        let method: DamageMethod = "random-corrupt".parse().unwrap();
        assert_eq!(method, DamageMethod::RandomCorrupt);
        assert_eq!(method.to_string(), "random-corrupt");
    }

    #[test]
    fn damage_method_rejects_unknown_name() {
        let err = "salt-and-pepper".parse::<DamageMethod>().unwrap_err();
        assert!(matches!(
            err,
            DatasetError::UnknownDamageMethod { method } if method == "salt-and-pepper"
        ));
    }

    #[test]
    fn resize_target_disabled_by_zero_dimension() {
        let config = IsicDatasetConfig::new(PathBuf::from("datasets/isic2018"));
        assert_eq!(config.resize_target(), None);

        let config = config.with_image_width(100);
        assert_eq!(config.resize_target(), None);

        let config = config.with_image_height(50);
        assert_eq!(config.resize_target(), Some((100, 50)));
    }
}
