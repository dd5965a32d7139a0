//! Request statistics for the diagnostic predictor.

use std::fmt;
use std::sync::Mutex;

/// Counters over every `predict` call made on one predictor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictorStats {
    /// The total number of requests handled.
    pub total_requests: usize,
    /// Requests that produced a result.
    pub successful_requests: usize,
    /// Requests that ended in an error.
    pub failed_requests: usize,
    /// Successful requests scored by the fallback heuristic.
    pub fallback_requests: usize,
    /// Mean processing time of successful requests, in seconds.
    pub average_processing_seconds: f64,
}

impl PredictorStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the success rate as a percentage (0.0 to 100.0).
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            (self.successful_requests as f64 / self.total_requests as f64) * 100.0
        }
    }
}

impl fmt::Display for PredictorStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Predictor Statistics:")?;
        writeln!(f, "  Total requests: {}", self.total_requests)?;
        writeln!(
            f,
            "  Successful: {} ({:.1}%)",
            self.successful_requests,
            self.success_rate()
        )?;
        writeln!(f, "  Failed: {}", self.failed_requests)?;
        writeln!(f, "  Fallback: {}", self.fallback_requests)?;
        writeln!(
            f,
            "  Average processing time: {:.3} s",
            self.average_processing_seconds
        )?;
        Ok(())
    }
}

/// Thread-safe holder for [`PredictorStats`].
#[derive(Debug, Default)]
pub struct StatsManager {
    stats: Mutex<PredictorStats>,
}

impl StatsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current statistics snapshot.
    pub fn get_stats(&self) -> PredictorStats {
        self.lock().clone()
    }

    /// Records a successful request.
    pub fn record_success(&self, processing_seconds: f64, fallback: bool) {
        let mut stats = self.lock();
        let previous = stats.successful_requests as f64;

        stats.total_requests += 1;
        stats.successful_requests += 1;
        if fallback {
            stats.fallback_requests += 1;
        }
        stats.average_processing_seconds = (stats.average_processing_seconds * previous
            + processing_seconds)
            / stats.successful_requests as f64;
    }

    /// Records a failed request.
    pub fn record_failure(&self) {
        let mut stats = self.lock();
        stats.total_requests += 1;
        stats.failed_requests += 1;
    }

    /// Resets the tracked statistics to their default state.
    pub fn reset_stats(&self) {
        *self.lock() = PredictorStats::default();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PredictorStats> {
        self.stats.lock().unwrap_or_else(|e| e.into_inner())
    }
}
