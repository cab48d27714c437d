use std::sync::Arc;
use std::time::Duration;

use haruspex::instrument::{ExtractObserver, PredictObserver, PredictorMetrics};
use haruspex::{ModelId, PredictError, Prediction, Vector};
use tracing::{info, warn};

/// Reports pipeline outcomes as tracing events.
pub struct LogMetrics;

pub struct LogExtractObserver;

impl ExtractObserver<f64, Vec<f64>> for LogExtractObserver {
    fn observe(&self, vectors: &[Vector<f64, Vec<f64>>], elapsed: Duration) {
        info!(
            vectors = vectors.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "features extracted"
        );
    }

    fn observe_failure(&self, error: &PredictError, elapsed: Duration) {
        warn!(
            %error,
            elapsed_us = elapsed.as_micros() as u64,
            "extraction failed"
        );
    }
}

pub struct LogPredictObserver {
    model_id: ModelId,
}

impl PredictObserver<f64, f64> for LogPredictObserver {
    fn observe(&self, predictions: &[Prediction<f64, f64>], elapsed: Duration) {
        info!(
            model_id = %self.model_id,
            predictions = predictions.len(),
            elapsed_us = elapsed.as_micros() as u64,
            "batch scored"
        );
    }

    fn observe_failure(&self, error: &PredictError, elapsed: Duration) {
        warn!(
            model_id = %self.model_id,
            %error,
            elapsed_us = elapsed.as_micros() as u64,
            "scoring failed"
        );
    }
}

impl PredictorMetrics<f64, Vec<f64>, f64> for LogMetrics {
    type Extract = LogExtractObserver;
    type Predict = LogPredictObserver;

    fn extract_observer(&self) -> Arc<LogExtractObserver> {
        Arc::new(LogExtractObserver)
    }

    fn predict_observer(&self, id: &ModelId) -> Arc<LogPredictObserver> {
        Arc::new(LogPredictObserver {
            model_id: id.clone(),
        })
    }
}
