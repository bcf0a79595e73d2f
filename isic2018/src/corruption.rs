//! Synthetic input corruption strategies.
//!
//! The damage degree expresses the proportion of input pixels exposed to
//! corruption; every strategy checks it lies strictly inside (0, 1) before
//! touching any pixel. Corruption only ever applies to the input image, never
//! to the segmentation mask.

use image::{DynamicImage, Rgb};
use rand::Rng;

use crate::{
    config::{DamageConfig, DamageMethod},
    error::{DatasetError, DatasetResult},
    transform::TensorImage,
};

/// Corrupt a decoded image, returning the damaged copy.
///
/// `random-corrupt` zeroes each pixel independently with probability equal to
/// the damage degree, so the expected fraction of zeroed pixels matches the
/// degree.
pub fn corrupt_image<R: Rng>(
    image: &DynamicImage,
    damage: &DamageConfig,
    rng: &mut R,
) -> DatasetResult<DynamicImage> {
    validate_degree(damage.degree)?;
    match damage.method {
        DamageMethod::RandomCorrupt => {
            let mut rgb = image.to_rgb8();
            for pixel in rgb.pixels_mut() {
                if rng.random_bool(damage.degree) {
                    *pixel = Rgb([0, 0, 0]);
                }
            }
            Ok(DynamicImage::ImageRgb8(rgb))
        }
    }
}

/// Corrupt transformed tensor data in place.
///
/// Zeroing a pixel clears it across all channels, mirroring what
/// [`corrupt_image`] does on decoded images.
pub fn corrupt_tensor<R: Rng>(
    image: &mut TensorImage,
    damage: &DamageConfig,
    rng: &mut R,
) -> DatasetResult<()> {
    validate_degree(damage.degree)?;
    match damage.method {
        DamageMethod::RandomCorrupt => {
            let plane = image.height * image.width;
            for pos in 0..plane {
                if rng.random_bool(damage.degree) {
                    for ch in 0..image.channels {
                        image.data[ch * plane + pos] = 0.0;
                    }
                }
            }
            Ok(())
        }
    }
}

/// Check the damage degree lies strictly inside (0, 1).
pub fn validate_degree(degree: f64) -> DatasetResult<()> {
    if !(degree > 0.0 && degree < 1.0) {
        return Err(DatasetError::InvalidDamageDegree { degree });
    }
    Ok(())
}
