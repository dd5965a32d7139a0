//! Injectable randomness.

/// A source of uniformly distributed samples.
///
/// Shared across threads; implementations synchronize internally.
pub trait RandomSource: Send + Sync + std::fmt::Debug {
    /// Returns a sample from the half-open range `[low, high)`, or `low` when
    /// the range is empty.
    fn uniform(&self, low: f32, high: f32) -> f32;
}
