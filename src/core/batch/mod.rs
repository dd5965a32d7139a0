//! Batched scorer input.
//!
//! Normalized images are kept individually until a scorer asks for a
//! stacked tensor, so that fallback scoring never pays for the copy.

use crate::core::errors::DxResult;
use crate::processors::ChannelOrder;
use ndarray::{Axis, stack};

/// A 2-dimensional tensor represented as a 2D array of f32 values.
pub type Tensor2D = ndarray::Array2<f32>;

/// A 3-dimensional tensor represented as a 3D array of f32 values.
pub type Tensor3D = ndarray::Array3<f32>;

/// A 4-dimensional tensor represented as a 4D array of f32 values.
pub type Tensor4D = ndarray::Array4<f32>;

/// A normalized batch of images, all with the same geometry and layout.
#[derive(Debug, Clone)]
pub struct ImageBatch {
    images: Vec<Tensor3D>,
    order: ChannelOrder,
}

impl ImageBatch {
    /// Creates a batch from normalized images laid out in `order`.
    pub fn new(images: Vec<Tensor3D>, order: ChannelOrder) -> Self {
        Self { images, order }
    }

    /// Returns the number of images in the batch.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Checks if the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Returns the channel layout of each image.
    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    /// Returns the individual normalized images.
    pub fn images(&self) -> &[Tensor3D] {
        &self.images
    }

    /// Stacks the images into a `[N, ...]` tensor.
    ///
    /// The trailing three axes follow [`ChannelOrder`]: `[N, C, H, W]` for
    /// `CHW` and `[N, H, W, C]` for `HWC`.
    pub fn to_tensor(&self) -> DxResult<Tensor4D> {
        let views: Vec<_> = self.images.iter().map(|img| img.view()).collect();
        Ok(stack(Axis(0), &views)?)
    }
}
