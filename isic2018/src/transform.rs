//! Deterministic resize + tensor-convert pipeline.
//!
//! These are stateless free functions: optional bilinear resize to the
//! configured (height, width), then conversion into channel-first float data
//! in [0, 1]. Inputs keep their three RGB channels, masks collapse to a
//! single luma channel.

use burn::tensor::{backend::Backend, Tensor, TensorData};
use image::{imageops::FilterType, DynamicImage};

/// A dense channel-first float image in [0, 1].
///
/// Datasets return raw data and batchers handle tensor creation and device
/// placement, so this type stays backend-free until [`into_tensor`] is
/// called.
///
/// [`into_tensor`]: TensorImage::into_tensor
#[derive(Debug, Clone, PartialEq)]
pub struct TensorImage {
    /// Pixel data in CHW order.
    pub data: Vec<f32>,
    /// Number of channels (3 for RGB inputs, 1 for masks).
    pub channels: usize,
    /// Image height in pixels.
    pub height: usize,
    /// Image width in pixels.
    pub width: usize,
}

impl TensorImage {
    /// Reorder interleaved (HWC) pixel data into channel-first layout.
    fn from_interleaved(raw: Vec<f32>, channels: usize, height: usize, width: usize) -> Self {
        debug_assert_eq!(raw.len(), channels * height * width);
        let plane = height * width;
        let mut data = vec![0.0; raw.len()];
        for pos in 0..plane {
            for ch in 0..channels {
                data[ch * plane + pos] = raw[pos * channels + ch];
            }
        }
        Self {
            data,
            channels,
            height,
            width,
        }
    }

    /// The dimensions as `[channels, height, width]`.
    pub const fn dims(&self) -> [usize; 3] {
        [self.channels, self.height, self.width]
    }

    /// Create a `[C, H, W]` tensor on the given device.
    pub fn into_tensor<B: Backend>(self, device: &B::Device) -> Tensor<B, 3> {
        let shape = self.dims();
        Tensor::from_data(TensorData::new(self.data, shape), device)
    }
}

/// Convert an input image to channel-first RGB float data, resizing first
/// when a target size is given.
pub fn image_to_tensor(image: &DynamicImage, resize: Option<(u32, u32)>) -> TensorImage {
    match resize {
        Some((width, height)) => rgb_tensor(&image.resize_exact(width, height, FilterType::Triangle)),
        None => rgb_tensor(image),
    }
}

/// Convert a segmentation mask to single-channel float data, resizing first
/// when a target size is given.
pub fn mask_to_tensor(mask: &DynamicImage, resize: Option<(u32, u32)>) -> TensorImage {
    match resize {
        Some((width, height)) => luma_tensor(&mask.resize_exact(width, height, FilterType::Triangle)),
        None => luma_tensor(mask),
    }
}

fn rgb_tensor(image: &DynamicImage) -> TensorImage {
    let rgb = image.to_rgb32f();
    let (width, height) = rgb.dimensions();
    TensorImage::from_interleaved(rgb.into_raw(), 3, height as usize, width as usize)
}

fn luma_tensor(image: &DynamicImage) -> TensorImage {
    let luma = image.to_luma32f();
    let (width, height) = luma.dimensions();
    TensorImage::from_interleaved(luma.into_raw(), 1, height as usize, width as usize)
}
