//! Image normalization for the vision scorer.
//!
//! Turns uploaded bytes into a fixed-geometry float tensor: decode, convert
//! to 3-channel RGB, resize (interpolated, never cropped) to 224x224 and
//! apply the per-channel linear transform the scorer was trained with.

use crate::core::batch::{ImageBatch, Tensor3D};
use crate::core::config::PreprocessConfig;
use crate::core::constants::{CAFFE_BGR_MEAN, INPUT_CHANNELS, INPUT_HEIGHT, INPUT_WIDTH};
use crate::core::errors::{DxError, DxResult, ImageProcessError};
use crate::domain::ImageAsset;
use crate::processors::types::{ChannelOrder, PreprocessMode};
use crate::utils::image::{decode_image, dynamic_to_rgb, resize_exact};
use image::RgbImage;
use image::imageops::FilterType;
use ndarray::Array3;
use rayon::prelude::*;

/// Normalizes uploaded images into scorer input.
///
/// Each output channel `c` is computed as `pixel[src(c)] * alpha[c] + beta[c]`,
/// where `src` swaps red and blue for BGR models. The coefficients are
/// precomputed from the configured [`PreprocessMode`].
#[derive(Debug, Clone)]
pub struct ImageNormalizer {
    alpha: [f32; 3],
    beta: [f32; 3],
    swap_rb: bool,
    order: ChannelOrder,
    filter: FilterType,
}

impl ImageNormalizer {
    /// Creates a normalizer from preprocessing settings.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if an ImageNet scale or std is not
    /// strictly positive.
    pub fn new(config: &PreprocessConfig) -> DxResult<Self> {
        let (alpha, beta, swap_rb) = match &config.mode {
            PreprocessMode::Caffe => ([1.0; 3], CAFFE_BGR_MEAN.map(|m| -m), true),
            PreprocessMode::ImageNet { scale, mean, std } => {
                if scale.is_nan() || *scale <= 0.0 {
                    return Err(DxError::config_error("Scale must be greater than 0"));
                }
                let invalid_std = std
                    .iter()
                    .enumerate()
                    .find(|(_, s)| s.is_nan() || **s <= 0.0);
                if let Some((i, s)) = invalid_std {
                    return Err(DxError::config_error(format!(
                        "Standard deviation at index {i} must be greater than 0, got {s}"
                    )));
                }
                let alpha = [scale / std[0], scale / std[1], scale / std[2]];
                let beta = [-mean[0] / std[0], -mean[1] / std[1], -mean[2] / std[2]];
                (alpha, beta, false)
            }
        };

        Ok(Self {
            alpha,
            beta,
            swap_rb,
            order: config.channel_order,
            filter: config.resize_filter.into(),
        })
    }

    /// The `(width, height)` every image is resized to.
    pub fn target_size(&self) -> (u32, u32) {
        (INPUT_WIDTH, INPUT_HEIGHT)
    }

    /// Shape of one normalized image in the configured channel order.
    pub fn expected_shape(&self) -> [usize; 3] {
        let (w, h) = (INPUT_WIDTH as usize, INPUT_HEIGHT as usize);
        match self.order {
            ChannelOrder::CHW => [INPUT_CHANNELS, h, w],
            ChannelOrder::HWC => [h, w, INPUT_CHANNELS],
        }
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// Normalizes one uploaded image.
    pub fn normalize(&self, asset: &ImageAsset) -> Result<Tensor3D, ImageProcessError> {
        let decoded = decode_image(asset.bytes())?;
        self.normalize_rgb(&dynamic_to_rgb(decoded))
    }

    /// Resizes and transforms an already-decoded RGB image.
    pub fn normalize_rgb(&self, img: &RgbImage) -> Result<Tensor3D, ImageProcessError> {
        let (width, height) = img.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageProcessError::ZeroDimension { width, height });
        }

        let (target_w, target_h) = self.target_size();
        let resized = resize_exact(img, target_w, target_h, self.filter);
        let tensor = self.transform(&resized);

        let expected = self.expected_shape();
        if tensor.shape() != expected.as_slice() {
            return Err(ImageProcessError::ShapeMismatch {
                expected,
                actual: tensor.shape().to_vec(),
            });
        }
        Ok(tensor)
    }

    /// Normalizes every image of a request.
    ///
    /// Any single failure aborts the batch; the error names the index and
    /// filename of the offending image. Batches larger than
    /// `parallel_threshold` are processed with rayon.
    pub fn normalize_batch(
        &self,
        assets: &[ImageAsset],
        parallel_threshold: Option<usize>,
    ) -> DxResult<ImageBatch> {
        let normalize_one = |(index, asset): (usize, &ImageAsset)| {
            self.normalize(asset)
                .map_err(|e| DxError::image_processing(index, asset.filename(), e))
        };

        let images = match parallel_threshold {
            Some(threshold) if assets.len() > threshold => {
                tracing::debug!(
                    "Normalizing {} images in parallel (threshold: {})",
                    assets.len(),
                    threshold
                );
                assets
                    .par_iter()
                    .enumerate()
                    .map(normalize_one)
                    .collect::<DxResult<Vec<_>>>()?
            }
            _ => assets
                .iter()
                .enumerate()
                .map(normalize_one)
                .collect::<DxResult<Vec<_>>>()?,
        };

        Ok(ImageBatch::new(images, self.order))
    }

    fn channel_value(&self, img: &RgbImage, x: u32, y: u32, c: usize) -> f32 {
        let src = if self.swap_rb { 2 - c } else { c };
        img.get_pixel(x, y)[src] as f32 * self.alpha[c] + self.beta[c]
    }

    fn transform(&self, img: &RgbImage) -> Tensor3D {
        let (width, height) = img.dimensions();
        let (w, h) = (width as usize, height as usize);

        match self.order {
            ChannelOrder::CHW => Array3::from_shape_fn((INPUT_CHANNELS, h, w), |(c, y, x)| {
                self.channel_value(img, x as u32, y as u32, c)
            }),
            ChannelOrder::HWC => Array3::from_shape_fn((h, w, INPUT_CHANNELS), |(y, x, c)| {
                self.channel_value(img, x as u32, y as u32, c)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::ProcessingStage;
    use image::{DynamicImage, ImageFormat, Rgb, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_asset(img: DynamicImage, name: &str) -> ImageAsset {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        ImageAsset::new(bytes, name)
    }

    fn solid_rgb(w: u32, h: u32, px: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(px)))
    }

    #[test]
    fn test_caffe_mode_swaps_to_bgr_and_subtracts_mean() {
        let normalizer = ImageNormalizer::new(&PreprocessConfig::default()).unwrap();
        let asset = png_asset(solid_rgb(16, 16, [10, 20, 30]), "solid.png");

        let tensor = normalizer.normalize(&asset).unwrap();
        assert_eq!(tensor.shape(), &[224, 224, 3]);

        let px = tensor.slice(ndarray::s![100, 100, ..]).to_vec();
        assert!((px[0] - (30.0 - 103.939)).abs() < 1e-3);
        assert!((px[1] - (20.0 - 116.779)).abs() < 1e-3);
        assert!((px[2] - (10.0 - 123.68)).abs() < 1e-3);
    }

    #[test]
    fn test_imagenet_mode_chw() {
        let config = PreprocessConfig {
            mode: PreprocessMode::imagenet(),
            channel_order: ChannelOrder::CHW,
            ..Default::default()
        };
        let normalizer = ImageNormalizer::new(&config).unwrap();
        let asset = png_asset(solid_rgb(8, 8, [255, 0, 255]), "magenta.png");

        let tensor = normalizer.normalize(&asset).unwrap();
        assert_eq!(tensor.shape(), &[3, 224, 224]);
        let red = tensor[[0, 5, 5]];
        let green = tensor[[1, 5, 5]];
        assert!((red - (1.0 - 0.485) / 0.229).abs() < 1e-4);
        assert!((green - (-0.456 / 0.224)).abs() < 1e-4);
    }

    #[test]
    fn test_rgba_and_non_square_inputs_are_resized_not_cropped() {
        let normalizer = ImageNormalizer::new(&PreprocessConfig::default()).unwrap();
        let rgba = RgbaImage::from_pixel(300, 40, Rgba([50, 60, 70, 0]));
        let asset = png_asset(DynamicImage::ImageRgba8(rgba), "wide.png");

        let tensor = normalizer.normalize(&asset).unwrap();
        assert_eq!(tensor.shape(), &normalizer.expected_shape());
        // Corners keep the source color, so nothing was padded in.
        assert!((tensor[[0, 0, 0]] - (70.0 - 103.939)).abs() < 1e-3);
        assert!((tensor[[223, 223, 2]] - (50.0 - 123.68)).abs() < 1e-3);
    }

    #[test]
    fn test_rejects_invalid_imagenet_parameters() {
        let config = PreprocessConfig {
            mode: PreprocessMode::ImageNet {
                scale: 1.0,
                mean: [0.0; 3],
                std: [1.0, -1.0, 1.0],
            },
            ..Default::default()
        };
        assert!(ImageNormalizer::new(&config).is_err());
    }

    #[test]
    fn test_normalize_batch_reports_failing_index() {
        let normalizer = ImageNormalizer::new(&PreprocessConfig::default()).unwrap();
        let assets = vec![
            png_asset(solid_rgb(4, 4, [1, 2, 3]), "ok.png"),
            ImageAsset::new(b"not an image".to_vec(), "notes.txt"),
        ];

        let err = normalizer.normalize_batch(&assets, None).unwrap_err();
        match err {
            DxError::ImageProcessing {
                index,
                filename,
                stage,
                ..
            } => {
                assert_eq!(index, 1);
                assert_eq!(filename, "notes.txt");
                assert_eq!(stage, ProcessingStage::Decode);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let normalizer = ImageNormalizer::new(&PreprocessConfig::default()).unwrap();
        let assets: Vec<_> = (0..4u8)
            .map(|i| png_asset(solid_rgb(6, 9, [i * 40, 10, 200]), "tile.png"))
            .collect();

        let sequential = normalizer.normalize_batch(&assets, None).unwrap();
        let parallel = normalizer.normalize_batch(&assets, Some(1)).unwrap();
        assert_eq!(sequential.len(), 4);
        assert_eq!(sequential.images(), parallel.images());
    }

    #[test]
    fn test_empty_asset_is_decode_error() {
        let normalizer = ImageNormalizer::new(&PreprocessConfig::default()).unwrap();
        let err = normalizer
            .normalize(&ImageAsset::new(Vec::new(), "empty.png"))
            .unwrap_err();
        assert!(matches!(err, ImageProcessError::EmptyPayload));
    }
}
