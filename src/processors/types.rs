//! Types used in image processing operations
//!
//! This module defines the enums that configure how uploaded images are
//! turned into scorer input.
use std::str::FromStr;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::core::errors::DxError;

/// Specifies the order of channels in an image tensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChannelOrder {
    /// Channel, Height, Width order (common in PyTorch)
    CHW,
    /// Height, Width, Channel order (common in TensorFlow)
    #[default]
    HWC,
}

/// Interpolation used when resizing to the scorer geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResizeFilter {
    /// Nearest neighbour.
    Nearest,
    /// Bilinear.
    Triangle,
    /// Bicubic.
    #[default]
    CatmullRom,
    /// Lanczos with window 3.
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl FromStr for ResizeFilter {
    type Err = DxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmullrom" | "bicubic" => Ok(Self::CatmullRom),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(DxError::config_error_with_context(
                "resize_filter",
                other,
                "expected nearest, bilinear, bicubic or lanczos3",
            )),
        }
    }
}

/// Numeric preprocessing applied after resizing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PreprocessMode {
    /// RGB to BGR swap followed by per-channel mean subtraction, no scaling.
    /// This is what ResNet50 checkpoints exported from Keras expect.
    #[default]
    Caffe,
    /// `(pixel * scale - mean) / std` per RGB channel.
    ImageNet {
        scale: f32,
        mean: [f32; 3],
        std: [f32; 3],
    },
}

impl PreprocessMode {
    /// ImageNet normalization with the usual 1/255 scale.
    pub fn imagenet() -> Self {
        Self::ImageNet {
            scale: 1.0 / 255.0,
            mean: crate::core::constants::IMAGENET_MEAN,
            std: crate::core::constants::IMAGENET_STD,
        }
    }
}
