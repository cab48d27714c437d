//! Shared test fixtures.
//!
//! Small stand-ins for backend collaborators: a model whose "instance" is a
//! single weight, suppliers that count invocations, and stages that never
//! resolve (for exercising the timeout race).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{BoxError, PredictError, PredictResult};
use crate::featurize::{FeatureExtractor, Vector};
use crate::instrument::{ExtractObserver, PredictObserver, PredictorMetrics};
use crate::loader::ModelLoader;
use crate::model::{Model, ModelId};
use crate::predict::{AsyncPredictFn, Prediction};

/// A model whose backend instance is a single multiplier weight.
#[derive(Debug)]
pub(crate) struct TestModel {
    id: ModelId,
    weight: f64,
    closed: AtomicBool,
}

impl TestModel {
    pub fn new(id: &str, weight: f64) -> Self {
        Self {
            id: ModelId::new(id),
            weight,
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Model for TestModel {
    type Instance = f64;

    fn id(&self) -> &ModelId {
        &self.id
    }

    fn instance(&self) -> &f64 {
        &self.weight
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

/// A supplier that counts how many times it runs before producing a
/// `TestModel` with the given weight.
pub(crate) fn counting_supplier(
    id: &'static str,
    weight: f64,
) -> (
    Arc<AtomicUsize>,
    impl Fn() -> Result<TestModel, BoxError> + Send + Sync + 'static,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let supplier = move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(TestModel::new(id, weight))
    };
    (calls, supplier)
}

/// A supplier that counts invocations and always fails.
pub(crate) fn failing_supplier(
    message: &'static str,
) -> (
    Arc<AtomicUsize>,
    impl Fn() -> Result<TestModel, BoxError> + Send + Sync + 'static,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let supplier = move || -> Result<TestModel, BoxError> {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(std::io::Error::other(message).into())
    };
    (calls, supplier)
}

/// A loader whose `get()` never resolves.
pub(crate) struct NeverLoader;

#[async_trait]
impl ModelLoader for NeverLoader {
    type Model = TestModel;

    async fn get(&self) -> PredictResult<Arc<TestModel>> {
        futures::future::pending().await
    }
}

/// A purely asynchronous extractor mapping `x` to `x / 10.0`.
///
/// Unlike `ExtractFn` this never touches the blocking pool, which keeps it
/// safe to use under a paused test clock.
pub(crate) struct TenthExtractor;

#[async_trait]
impl FeatureExtractor for TenthExtractor {
    type Input = i32;
    type Value = f64;

    async fn extract(&self, inputs: Vec<i32>) -> PredictResult<Vec<Vector<i32, f64>>> {
        Ok(inputs
            .into_iter()
            .map(|x| Vector::new(x, f64::from(x) / 10.0))
            .collect())
    }
}

/// A purely asynchronous predict fn multiplying each feature by the model
/// weight.
pub(crate) struct WeightPredictFn;

#[async_trait]
impl AsyncPredictFn for WeightPredictFn {
    type Model = TestModel;
    type Input = i32;
    type Feature = f64;
    type Output = f64;

    async fn apply(
        &self,
        model: &Arc<TestModel>,
        vectors: Vec<Vector<i32, f64>>,
    ) -> PredictResult<Vec<Prediction<i32, f64>>> {
        let weight = *model.instance();
        Ok(vectors
            .into_iter()
            .map(|vector| {
                let (input, feature) = vector.into_parts();
                Prediction::new(input, feature * weight)
            })
            .collect())
    }
}

/// A predict fn that never resolves.
pub(crate) struct PendingPredictFn;

#[async_trait]
impl AsyncPredictFn for PendingPredictFn {
    type Model = TestModel;
    type Input = i32;
    type Feature = f64;
    type Output = f64;

    async fn apply(
        &self,
        _model: &Arc<TestModel>,
        _vectors: Vec<Vector<i32, f64>>,
    ) -> PredictResult<Vec<Prediction<i32, f64>>> {
        futures::future::pending().await
    }
}

/// Extraction observer that tallies items and failures.
pub(crate) struct RecordingExtractObserver {
    items: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl ExtractObserver<i32, f64> for RecordingExtractObserver {
    fn observe(&self, vectors: &[Vector<i32, f64>], _elapsed: Duration) {
        self.items.fetch_add(vectors.len(), Ordering::SeqCst);
    }

    fn observe_failure(&self, _error: &PredictError, _elapsed: Duration) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}

/// Scoring observer that tallies items and failures.
pub(crate) struct RecordingPredictObserver {
    items: Arc<AtomicUsize>,
    failures: Arc<AtomicUsize>,
}

impl PredictObserver<i32, f64> for RecordingPredictObserver {
    fn observe(&self, predictions: &[Prediction<i32, f64>], _elapsed: Duration) {
        self.items.fetch_add(predictions.len(), Ordering::SeqCst);
    }

    fn observe_failure(&self, _error: &PredictError, _elapsed: Duration) {
        self.failures.fetch_add(1, Ordering::SeqCst);
    }
}

/// A metrics backend backed by plain counters, shared across the observers
/// it hands out.
#[derive(Default)]
pub(crate) struct RecordingMetrics {
    pub extract_items: Arc<AtomicUsize>,
    pub extract_failures: Arc<AtomicUsize>,
    pub predict_items: Arc<AtomicUsize>,
    pub predict_failures: Arc<AtomicUsize>,
    pub observers_created: Arc<AtomicUsize>,
}

impl RecordingMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PredictorMetrics<i32, f64, f64> for RecordingMetrics {
    type Extract = RecordingExtractObserver;
    type Predict = RecordingPredictObserver;

    fn extract_observer(&self) -> Arc<RecordingExtractObserver> {
        Arc::new(RecordingExtractObserver {
            items: self.extract_items.clone(),
            failures: self.extract_failures.clone(),
        })
    }

    fn predict_observer(&self, _id: &ModelId) -> Arc<RecordingPredictObserver> {
        self.observers_created.fetch_add(1, Ordering::SeqCst);
        Arc::new(RecordingPredictObserver {
            items: self.predict_items.clone(),
            failures: self.predict_failures.clone(),
        })
    }
}
