//! The prediction orchestrator.
//!
//! One call runs `Validate -> Normalize -> Score -> Adjust -> Threshold`
//! and either returns a complete [`PredictionResult`] or a terminal error.
//! Nothing is retried and no partial result is produced.

use crate::core::batch::ImageBatch;
use crate::core::config::{ConfigValidator, PredictorConfig};
use crate::core::constants::PENDING_SCORES_PER_WORKER;
use crate::core::errors::{DxError, DxResult, SimpleError};
use crate::core::traits::ImageScorer;
use crate::domain::{ClinicalRecord, ImageAsset, PredictionLabel, PredictionResult};
use crate::predictors::adjuster::{ClinicalRiskAdjuster, round_confidence};
use crate::predictors::startup::{LoadedScorer, load_scorer};
use crate::predictors::stats::{PredictorStats, StatsManager};
use crate::processors::ImageNormalizer;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Fixed set of threads running time-limited scoring calls.
///
/// At most `capacity` jobs are queued or running at once; further requests
/// are refused instead of queued. A job whose caller has timed out is
/// skipped if it has not started yet.
#[derive(Debug)]
struct ScoringPool {
    pool: rayon::ThreadPool,
    in_flight: Arc<AtomicUsize>,
    capacity: usize,
}

/// Releases one in-flight slot when dropped, including on panic.
struct InFlightSlot(Arc<AtomicUsize>);

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl ScoringPool {
    fn new(workers: usize) -> DxResult<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("cancerdx-score-{i}"))
            .panic_handler(|_| error!("Scoring job panicked"))
            .build()
            .map_err(|e| DxError::config_error(format!("failed to start scoring workers: {e}")))?;

        Ok(Self {
            pool,
            in_flight: Arc::new(AtomicUsize::new(0)),
            capacity: workers * PENDING_SCORES_PER_WORKER,
        })
    }

    fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn try_acquire(&self) -> Option<InFlightSlot> {
        let previous = self.in_flight.fetch_add(1, Ordering::SeqCst);
        let slot = InFlightSlot(Arc::clone(&self.in_flight));
        (previous < self.capacity).then_some(slot)
    }
}

/// Composes normalizer, scorer and adjuster into one prediction per request.
///
/// The predictor holds no per-request state and can be shared across
/// threads; the scorer is read-only after startup.
#[derive(Debug)]
pub struct DiagnosticPredictor {
    scorer: Arc<dyn ImageScorer>,
    normalizer: ImageNormalizer,
    adjuster: ClinicalRiskAdjuster,
    score_timeout: Option<Duration>,
    scoring_pool: Option<ScoringPool>,
    parallel_threshold: Option<usize>,
    stats: StatsManager,
}

impl DiagnosticPredictor {
    pub fn builder() -> DiagnosticPredictorBuilder {
        DiagnosticPredictorBuilder::new()
    }

    /// Runs a prediction for a batch of images and a decoded clinical payload.
    ///
    /// # Errors
    ///
    /// * `EmptyInput` if `images` is empty; the scorer is not invoked
    /// * `InvalidClinicalData` if `clinical` is not a valid clinical record
    /// * `ImageProcessing` if any image fails to normalize
    /// * `Scoring` if the scorer fails, returns unusable output or times out
    pub fn predict(&self, images: &[ImageAsset], clinical: &Value) -> DxResult<PredictionResult> {
        let start = Instant::now();
        let outcome = self.run(start, images, || ClinicalRecord::from_value(clinical));
        self.finish(outcome)
    }

    /// Like [`predict`](Self::predict), with the clinical payload as a JSON string.
    pub fn predict_json(&self, images: &[ImageAsset], clinical: &str) -> DxResult<PredictionResult> {
        let start = Instant::now();
        let outcome = self.run(start, images, || ClinicalRecord::from_json_str(clinical));
        self.finish(outcome)
    }

    fn finish(&self, outcome: DxResult<PredictionResult>) -> DxResult<PredictionResult> {
        match &outcome {
            Ok(result) => {
                info!(
                    "Prediction {} (confidence {:.4}) for {} image(s) by '{}' in {:.3}s",
                    result.label,
                    result.confidence,
                    result.image_count,
                    result.model_version,
                    result.processing_time_seconds
                );
                self.stats
                    .record_success(result.processing_time_seconds, self.scorer.is_fallback());
            }
            Err(e) => {
                warn!("Prediction failed: {}", e);
                self.stats.record_failure();
            }
        }
        outcome
    }

    fn run(
        &self,
        start: Instant,
        images: &[ImageAsset],
        parse_clinical: impl FnOnce() -> DxResult<ClinicalRecord>,
    ) -> DxResult<PredictionResult> {
        if images.is_empty() {
            return Err(DxError::EmptyInput);
        }
        let clinical = parse_clinical()?;
        debug!("Validated request with {} image(s)", images.len());

        let batch = self
            .normalizer
            .normalize_batch(images, self.parallel_threshold)?;
        debug!("Normalized {} image(s)", batch.len());

        let scores = self.score(batch, &clinical)?;
        let base = aggregate_scores(&scores, images.len())
            .map_err(|e| DxError::scoring(self.scorer.model_version(), "unusable scorer output", e))?;
        debug!("Aggregated {} score(s) to {:.4}", scores.len(), base);

        let adjustment = self.adjuster.explain(base, &clinical);
        debug!(
            "Adjusted {:.4} -> {:.4} ({:?})",
            base, adjustment.confidence, adjustment.applied_rules
        );

        let label = PredictionLabel::from_confidence(adjustment.confidence);

        Ok(PredictionResult {
            label,
            confidence: adjustment.confidence,
            base_confidence: base,
            processing_time_seconds: start.elapsed().as_secs_f64(),
            model_version: self.scorer.model_version().to_string(),
            image_count: images.len(),
            applied_rules: adjustment
                .applied_rules
                .into_iter()
                .map(str::to_string)
                .collect(),
            clinical_data: clinical.raw().clone(),
        })
    }

    /// Invokes the scorer, on the scoring pool when a time budget is set.
    fn score(&self, batch: ImageBatch, clinical: &ClinicalRecord) -> DxResult<Vec<f32>> {
        let version = self.scorer.model_version().to_string();

        let (Some(limit), Some(pool)) = (self.score_timeout, self.scoring_pool.as_ref()) else {
            return self
                .scorer
                .score(&batch, clinical)
                .map_err(|e| into_scoring_error(&version, e));
        };

        let Some(slot) = pool.try_acquire() else {
            return Err(DxError::scoring(
                version,
                "scoring pool saturated",
                SimpleError::new(format!("{} scoring jobs already in flight", pool.capacity)),
            ));
        };

        let (tx, rx) = mpsc::sync_channel(1);
        let abandoned = Arc::new(AtomicBool::new(false));
        let job_abandoned = Arc::clone(&abandoned);
        let scorer = Arc::clone(&self.scorer);
        let clinical = clinical.clone();
        pool.pool.spawn(move || {
            let _slot = slot;
            if job_abandoned.load(Ordering::SeqCst) {
                debug!("Skipping scoring job abandoned by its caller");
                return;
            }
            // The receiver is gone after a timeout; the late result is dropped.
            let _ = tx.send(scorer.score(&batch, &clinical));
        });

        match rx.recv_timeout(limit) {
            Ok(result) => result.map_err(|e| into_scoring_error(&version, e)),
            Err(RecvTimeoutError::Timeout) => {
                abandoned.store(true, Ordering::SeqCst);
                Err(DxError::scoring_timeout(version, limit))
            }
            Err(RecvTimeoutError::Disconnected) => Err(DxError::scoring(
                version,
                "scoring job ended without a result",
                SimpleError::new("scorer panicked"),
            )),
        }
    }

    pub fn model_version(&self) -> &str {
        self.scorer.model_version()
    }

    pub fn is_fallback(&self) -> bool {
        self.scorer.is_fallback()
    }

    pub fn stats(&self) -> PredictorStats {
        self.stats.get_stats()
    }

    pub fn adjuster(&self) -> &ClinicalRiskAdjuster {
        &self.adjuster
    }

    pub fn normalizer(&self) -> &ImageNormalizer {
        &self.normalizer
    }
}

fn into_scoring_error(model_version: &str, error: DxError) -> DxError {
    match error {
        DxError::Scoring { .. } => error,
        other => DxError::scoring(model_version, "scorer failed", other),
    }
}

/// Reduces scorer output to one probability by arithmetic mean.
///
/// Accepts one score per image or a single score for the whole batch. The
/// mean is taken in `f64` and rounded like an adjusted confidence.
pub fn aggregate_scores(scores: &[f32], image_count: usize) -> Result<f64, SimpleError> {
    if scores.is_empty() {
        return Err(SimpleError::new("scorer returned no scores"));
    }
    if scores.len() != 1 && scores.len() != image_count {
        return Err(SimpleError::new(format!(
            "scorer returned {} scores for {} images",
            scores.len(),
            image_count
        )));
    }
    if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(SimpleError::new(format!("scorer returned non-finite score {bad}")));
    }

    let sum: f64 = scores.iter().map(|&s| f64::from(s)).sum();
    Ok(round_confidence(sum / scores.len() as f64))
}

/// Builder for [`DiagnosticPredictor`].
#[derive(Debug, Default)]
pub struct DiagnosticPredictorBuilder {
    config: PredictorConfig,
    scorer: Option<Arc<dyn ImageScorer>>,
    adjuster: Option<ClinicalRiskAdjuster>,
}

impl DiagnosticPredictorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn config(mut self, config: PredictorConfig) -> Self {
        self.config = config;
        self
    }

    /// Installs an already-selected scorer instead of loading one.
    pub fn scorer(mut self, scorer: Arc<dyn ImageScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Installs the scorer chosen at startup.
    pub fn loaded_scorer(self, loaded: &LoadedScorer) -> Self {
        self.scorer(Arc::clone(&loaded.scorer))
    }

    /// Replaces the standard adjustment table.
    pub fn adjuster(mut self, adjuster: ClinicalRiskAdjuster) -> Self {
        self.adjuster = Some(adjuster);
        self
    }

    /// Validates the configuration and assembles the predictor.
    ///
    /// Without an explicit scorer, the configured model is loaded (or the
    /// fallback selected) here.
    pub fn build(self) -> DxResult<DiagnosticPredictor> {
        self.config.validate()?;
        let normalizer = ImageNormalizer::new(&self.config.preprocessing)?;
        let score_timeout = self.config.score_timeout();
        let scoring_pool = match score_timeout {
            Some(_) => Some(ScoringPool::new(self.config.score_workers)?),
            None => None,
        };
        let scorer = match self.scorer {
            Some(scorer) => scorer,
            None => load_scorer(&self.config).scorer,
        };

        Ok(DiagnosticPredictor {
            scorer,
            normalizer,
            adjuster: self.adjuster.unwrap_or_default(),
            score_timeout,
            scoring_pool,
            parallel_threshold: self.config.parallel_threshold,
            stats: StatsManager::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{DEFAULT_MODEL_VERSION, FALLBACK_MODEL_VERSION};
    use crate::core::errors::{ErrorKind, ScoringTimeout};
    use crate::core::traits::RandomSource;
    use crate::models::HeuristicScorer;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use serde_json::json;
    use std::io::Cursor;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug)]
    struct StubScorer {
        scores: Vec<f32>,
        calls: AtomicUsize,
        delay_per_image: Duration,
    }

    impl StubScorer {
        fn fixed(value: f32) -> Self {
            Self::returning(vec![value])
        }

        fn returning(scores: Vec<f32>) -> Self {
            Self {
                scores,
                calls: AtomicUsize::new(0),
                delay_per_image: Duration::ZERO,
            }
        }

        fn slow(value: f32, delay_per_image: Duration) -> Self {
            Self {
                delay_per_image,
                ..Self::fixed(value)
            }
        }
    }

    impl ImageScorer for StubScorer {
        fn score(&self, batch: &ImageBatch, _clinical: &ClinicalRecord) -> DxResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(self.delay_per_image * batch.len() as u32);
            Ok(self.scores.clone())
        }

        fn model_version(&self) -> &str {
            DEFAULT_MODEL_VERSION
        }
    }

    /// Blocks every call until released.
    #[derive(Debug, Default)]
    struct BlockingScorer {
        released: AtomicBool,
        calls: AtomicUsize,
    }

    impl ImageScorer for BlockingScorer {
        fn score(&self, _batch: &ImageBatch, _clinical: &ClinicalRecord) -> DxResult<Vec<f32>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let deadline = Instant::now() + Duration::from_secs(10);
            while !self.released.load(Ordering::SeqCst) && Instant::now() < deadline {
                std::thread::sleep(Duration::from_millis(5));
            }
            Ok(vec![0.5])
        }

        fn model_version(&self) -> &str {
            DEFAULT_MODEL_VERSION
        }
    }

    #[derive(Debug)]
    struct Fixed(f32);

    impl RandomSource for Fixed {
        fn uniform(&self, _low: f32, _high: f32) -> f32 {
            self.0
        }
    }

    fn png(name: &str) -> ImageAsset {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 24, Rgb([180, 90, 140])));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        ImageAsset::new(bytes, name)
    }

    fn predictor(scorer: Arc<dyn ImageScorer>) -> DiagnosticPredictor {
        DiagnosticPredictor::builder().scorer(scorer).build().unwrap()
    }

    fn all_rules() -> Value {
        json!({"age": 15, "gender": "male", "tumorSite": "head-neck", "familyHistory": true})
    }

    #[test]
    fn test_all_rules_turn_low_score_positive() {
        let p = predictor(Arc::new(StubScorer::fixed(0.40)));
        let result = p.predict(&[png("a.png")], &all_rules()).unwrap();

        assert!((result.confidence - 0.60).abs() < 1e-6);
        assert!((result.base_confidence - 0.40).abs() < 1e-6);
        assert_eq!(result.label, PredictionLabel::Positive);
        assert_eq!(result.applied_rules.len(), 4);
        assert_eq!(result.model_version, DEFAULT_MODEL_VERSION);
        assert_eq!(result.clinical_data, all_rules());
    }

    #[test]
    fn test_high_score_is_clamped() {
        let p = predictor(Arc::new(StubScorer::fixed(0.95)));
        let result = p.predict(&[png("a.png")], &all_rules()).unwrap();
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.label, PredictionLabel::Positive);
    }

    #[test]
    fn test_exact_threshold_is_negative() {
        let p = predictor(Arc::new(StubScorer::fixed(0.50)));
        let result = p.predict(&[png("imgA.png")], &json!({})).unwrap();
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.label, PredictionLabel::Negative);
        assert!(result.applied_rules.is_empty());
        assert_eq!(result.image_count, 1);
    }

    #[test]
    fn test_empty_input_does_not_invoke_scorer() {
        let stub = Arc::new(StubScorer::fixed(0.5));
        let p = predictor(stub.clone());

        let err = p.predict(&[], &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyInput);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_non_image_payload_fails_whole_request() {
        let stub = Arc::new(StubScorer::fixed(0.5));
        let p = predictor(stub.clone());
        let images = [png("a.png"), ImageAsset::new(b"GIF89?garbage".to_vec(), "b.gif")];

        let err = p.predict(&images, &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ImageProcessing);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
        assert_eq!(p.stats().failed_requests, 1);
    }

    #[test]
    fn test_invalid_clinical_payloads() {
        let p = predictor(Arc::new(StubScorer::fixed(0.5)));
        let images = [png("a.png")];

        let err = p.predict(&images, &json!(["not", "a", "mapping"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidClinicalData);

        let err = p.predict_json(&images, "{age: 4").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidClinicalData);

        let ok = p.predict_json(&images, r#"{"age": 40}"#).unwrap();
        assert_eq!(ok.label, PredictionLabel::Negative);
    }

    #[test]
    fn test_per_image_scores_are_averaged() {
        let p = predictor(Arc::new(StubScorer::returning(vec![0.2, 0.6, 0.7])));
        let images = [png("a.png"), png("b.png"), png("c.png")];
        let result = p.predict(&images, &json!({})).unwrap();
        assert!((result.base_confidence - 0.5).abs() < 1e-6);
        assert_eq!(result.image_count, 3);
    }

    #[test]
    fn test_mismatched_score_count_is_scoring_error() {
        let p = predictor(Arc::new(StubScorer::returning(vec![0.2, 0.6])));
        let images = [png("a.png"), png("b.png"), png("c.png")];
        let err = p.predict(&images, &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Scoring);
    }

    #[test]
    fn test_slow_scorer_times_out() {
        let config = PredictorConfig::new().with_score_timeout(Some(Duration::from_millis(50)));
        let p = DiagnosticPredictor::builder()
            .config(config)
            .scorer(Arc::new(StubScorer::slow(0.5, Duration::from_millis(500))))
            .build()
            .unwrap();

        let err = p.predict(&[png("a.png")], &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Scoring);
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<ScoringTimeout>().is_some());
    }

    #[test]
    fn test_hung_scorer_keeps_worker_count_bounded() {
        let scorer = Arc::new(BlockingScorer::default());
        let config = PredictorConfig::new()
            .with_score_timeout(Some(Duration::from_millis(100)))
            .with_score_workers(1);
        let p = DiagnosticPredictor::builder()
            .config(config)
            .scorer(scorer.clone())
            .build()
            .unwrap();
        let pool = p.scoring_pool.as_ref().unwrap();
        let images = [png("a.png")];

        for _ in 0..PENDING_SCORES_PER_WORKER {
            let err = p.predict(&images, &json!({})).unwrap_err();
            let source = std::error::Error::source(&err).unwrap();
            assert!(source.downcast_ref::<ScoringTimeout>().is_some());
        }
        assert_eq!(pool.in_flight(), PENDING_SCORES_PER_WORKER);

        // Saturated: refused at once, without queueing more work.
        let err = p.predict(&images, &json!({})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Scoring);
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.downcast_ref::<ScoringTimeout>().is_none());
        assert_eq!(pool.in_flight(), PENDING_SCORES_PER_WORKER);

        // Only the first job ever reached the scorer.
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);

        scorer.released.store(true, Ordering::SeqCst);
        let deadline = Instant::now() + Duration::from_secs(5);
        while pool.in_flight() > 0 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(pool.in_flight(), 0);
        // Abandoned queued jobs were skipped, not scored.
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 1);

        let result = p.predict(&images, &json!({})).unwrap();
        assert_eq!(result.base_confidence, 0.5);
        assert_eq!(scorer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_no_timeout_scores_inline() {
        let config = PredictorConfig::new().with_score_timeout(None);
        let p = DiagnosticPredictor::builder()
            .config(config)
            .scorer(Arc::new(StubScorer::fixed(0.7)))
            .build()
            .unwrap();
        assert!(p.scoring_pool.is_none());
        assert_eq!(p.predict(&[png("a.png")], &json!({})).unwrap().base_confidence, 0.7);
    }

    #[test]
    fn test_decimal_half_through_predict_is_negative() {
        let cases = [
            (0.45, json!({"age": 15})),
            (0.48, json!({"gender": "male"})),
            (0.42, json!({"tumorSite": "head-neck"})),
            (0.45, json!({"familyHistory": true})),
            (0.30, all_rules()),
            (0.37, json!({"age": 12, "tumorSite": "genitourinary"})),
            (0.43, json!({"gender": "male", "familyHistory": true})),
        ];
        for (base, clinical) in cases {
            let p = predictor(Arc::new(StubScorer::fixed(base)));
            let result = p.predict(&[png("a.png")], &clinical).unwrap();
            assert_eq!(result.confidence, 0.5, "base {base}, clinical {clinical}");
            assert_eq!(result.label, PredictionLabel::Negative, "base {base}");
        }
    }

    #[test]
    fn test_processing_time_grows_with_batch_size() {
        let p = predictor(Arc::new(StubScorer::slow(0.5, Duration::from_millis(20))));

        let one = p.predict(&[png("a.png")], &json!({})).unwrap();
        let four: Vec<_> = (0..4).map(|i| png(&format!("{i}.png"))).collect();
        let many = p.predict(&four, &json!({})).unwrap();

        assert!(one.processing_time_seconds >= 0.0);
        assert!(many.processing_time_seconds > one.processing_time_seconds);
    }

    #[test]
    fn test_fallback_path_is_adjusted_twice() {
        let fallback = HeuristicScorer::new(Box::new(Fixed(0.3)), (0.3, 0.9), FALLBACK_MODEL_VERSION);
        let p = predictor(Arc::new(fallback));
        let clinical = json!({"age": 15, "tumorSite": "head-neck"});

        let result = p.predict(&[png("a.png")], &clinical).unwrap();
        // heuristic: 0.3 + 0.10 + 0.15, adjuster: + 0.05 + 0.08
        assert!((result.base_confidence - 0.55).abs() < 1e-6);
        assert!((result.confidence - 0.68).abs() < 1e-6);
        assert_eq!(result.model_version, FALLBACK_MODEL_VERSION);
        assert!(p.is_fallback());
        assert_eq!(p.stats().fallback_requests, 1);
    }

    #[test]
    fn test_repeated_calls_are_identical_apart_from_timing() {
        let p = predictor(Arc::new(StubScorer::fixed(0.33)));
        let clinical = json!({"gender": "male", "familyHistory": true});
        let a = p.predict(&[png("a.png")], &clinical).unwrap();
        let b = p.predict(&[png("a.png")], &clinical).unwrap();
        assert_eq!(a.confidence, b.confidence);
        assert_eq!(a.applied_rules, b.applied_rules);
        assert_eq!(p.stats().successful_requests, 2);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = PredictorConfig::new().with_session_pool_size(0);
        assert!(DiagnosticPredictor::builder().config(config).build().is_err());
    }

    #[test]
    fn test_aggregate_scores() {
        assert_eq!(aggregate_scores(&[0.4], 3).unwrap(), 0.4);
        assert!((aggregate_scores(&[0.2, 0.4], 2).unwrap() - 0.3).abs() < 1e-6);
        assert!(aggregate_scores(&[], 1).is_err());
        assert!(aggregate_scores(&[f32::INFINITY], 1).is_err());
    }
}
