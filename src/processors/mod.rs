//! Image processing for the vision scorer.
//!
//! # Modules
//!
//! * `normalization` - Decoding, resizing and numeric preprocessing of uploads
//! * `types` - Type definitions used across the processors module

mod normalization;
pub mod types;

pub use normalization::*;
pub use types::*;
