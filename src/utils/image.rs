//! Utility functions for image decoding and conversion.

use crate::core::errors::ImageProcessError;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

/// Decodes an in-memory image, guessing the format from its magic bytes.
///
/// # Errors
///
/// * `ImageProcessError::EmptyPayload` if `bytes` is empty
/// * `ImageProcessError::Decode` if the bytes are not a supported image format
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, ImageProcessError> {
    if bytes.is_empty() {
        return Err(ImageProcessError::EmptyPayload);
    }
    image::load_from_memory(bytes).map_err(ImageProcessError::Decode)
}

/// Converts a DynamicImage to an RgbImage.
///
/// Grayscale, alpha and 16-bit images are all brought to 8-bit RGB; alpha
/// is dropped.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    match img {
        DynamicImage::ImageRgb8(rgb) => rgb,
        other => other.to_rgb8(),
    }
}

/// Resizes to exactly `width` x `height`, ignoring the aspect ratio.
pub fn resize_exact(img: &RgbImage, width: u32, height: u32, filter: FilterType) -> RgbImage {
    if img.dimensions() == (width, height) {
        return img.clone();
    }
    image::imageops::resize(img, width, height, filter)
}
