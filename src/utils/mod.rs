//! Utility functions for the diagnostic pipeline.
//!
//! Image decoding helpers used by the normalizer, and the random sources
//! behind the fallback scorer.

pub mod image;
pub mod random;

pub use image::{decode_image, dynamic_to_rgb, resize_exact};
pub use random::{SeededRandom, ThreadRandom, random_source};
