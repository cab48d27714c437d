use std::sync::Arc;
use std::time::Duration;

use crate::error::PredictError;
use crate::featurize::Vector;
use crate::model::ModelId;
use crate::predict::Prediction;

/// Receives the outcome of each feature extraction.
///
/// Observers see completed work only; they cannot alter the batch or the
/// error that is handed back to the pipeline.
pub trait ExtractObserver<I, V>: Send + Sync {
    /// Called after a successful extraction with the produced vectors and
    /// the time the stage took.
    fn observe(&self, vectors: &[Vector<I, V>], elapsed: Duration);

    /// Called after a failed extraction. Defaults to ignoring failures.
    fn observe_failure(&self, error: &PredictError, elapsed: Duration) {
        let _ = (error, elapsed);
    }
}

/// Receives the outcome of each scoring pass for one model id.
pub trait PredictObserver<I, P>: Send + Sync {
    /// Called after a successful scoring pass with the produced predictions
    /// and the time the stage took.
    fn observe(&self, predictions: &[Prediction<I, P>], elapsed: Duration);

    /// Called after a failed scoring pass. Defaults to ignoring failures.
    fn observe_failure(&self, error: &PredictError, elapsed: Duration) {
        let _ = (error, elapsed);
    }
}

/// Factory for the observers a metrics backend hands to an instrumented
/// pipeline.
///
/// Extraction gets a single observer for the predictor. Scoring observers
/// are created per [`ModelId`], so a backend can tag its series with the
/// model that produced them; the instrumented stage caches each observer and
/// calls [`predict_observer`](PredictorMetrics::predict_observer) once per
/// distinct id.
///
/// ## Usage Context
///
/// Implement this against your metrics registry and pass it to
/// [`PredictorBuilder::instrumented`](crate::predict::PredictorBuilder::instrumented).
pub trait PredictorMetrics<I, A, P>: Send + Sync {
    /// Observer type for the extraction stage.
    type Extract: ExtractObserver<I, A> + 'static;
    /// Observer type for the scoring stage.
    type Predict: PredictObserver<I, P> + 'static;

    /// The observer for every extraction this predictor runs.
    fn extract_observer(&self) -> Arc<Self::Extract>;

    /// A scoring observer scoped to one model id.
    fn predict_observer(&self, id: &ModelId) -> Arc<Self::Predict>;
}
