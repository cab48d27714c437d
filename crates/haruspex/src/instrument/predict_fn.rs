use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::PredictResult;
use crate::featurize::Vector;
use crate::instrument::metrics::{PredictObserver, PredictorMetrics};
use crate::model::{Model, ModelId};
use crate::predict::{AsyncPredictFn, Prediction};

/// Times each scoring pass and reports its outcome to a per-model observer.
///
/// Observers come from a [`PredictorMetrics`] backend and are scoped to the
/// id of the model each batch was scored with. The factory runs once per
/// distinct id; the observer is cached here and reused for every later batch
/// against that id, from any task.
///
/// Like [`InstrumentedExtractor`](crate::instrument::InstrumentedExtractor)
/// this is a pure pass-through for the batch itself.
pub struct InstrumentedPredictFn<F, X>
where
    F: AsyncPredictFn,
    X: PredictorMetrics<F::Input, F::Feature, F::Output>,
{
    delegate: Arc<F>,
    metrics: Arc<X>,
    observers: RwLock<HashMap<ModelId, Arc<X::Predict>>>,
}

impl<F, X> InstrumentedPredictFn<F, X>
where
    F: AsyncPredictFn,
    X: PredictorMetrics<F::Input, F::Feature, F::Output>,
{
    pub fn new(delegate: Arc<F>, metrics: Arc<X>) -> Self {
        Self {
            delegate,
            metrics,
            observers: RwLock::new(HashMap::new()),
        }
    }

    /// The cached observer for `id`, created on first sight.
    ///
    /// Fast path takes the read lock only. Racing first sightings settle
    /// under the write lock, where the entry is checked again so the factory
    /// runs at most once per id.
    async fn observer_for(&self, id: &ModelId) -> Arc<X::Predict> {
        if let Some(observer) = self.observers.read().await.get(id) {
            return observer.clone();
        }
        let mut observers = self.observers.write().await;
        observers
            .entry(id.clone())
            .or_insert_with(|| self.metrics.predict_observer(id))
            .clone()
    }
}

#[async_trait]
impl<F, X> AsyncPredictFn for InstrumentedPredictFn<F, X>
where
    F: AsyncPredictFn,
    X: PredictorMetrics<F::Input, F::Feature, F::Output> + 'static,
{
    type Model = F::Model;
    type Input = F::Input;
    type Feature = F::Feature;
    type Output = F::Output;

    async fn apply(
        &self,
        model: &Arc<F::Model>,
        vectors: Vec<Vector<F::Input, F::Feature>>,
    ) -> PredictResult<Vec<Prediction<F::Input, F::Output>>> {
        let observer = self.observer_for(model.id()).await;
        let started = Instant::now();
        let outcome = self.delegate.apply(model, vectors).await;
        let elapsed = started.elapsed();
        match &outcome {
            Ok(predictions) => observer.observe(predictions, elapsed),
            Err(error) => observer.observe_failure(error, elapsed),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use futures::future::join_all;

    use super::*;
    use crate::error::{BoxError, PredictError};
    use crate::predict::PredictFn;
    use crate::testing::{RecordingMetrics, TestModel, WeightPredictFn};

    fn feature_batch() -> Vec<Vector<i32, f64>> {
        vec![Vector::new(1, 0.1), Vector::new(2, 0.2)]
    }

    #[tokio::test]
    async fn test_observes_without_changing_the_outcome() {
        let delegate = Arc::new(WeightPredictFn);
        let metrics = Arc::new(RecordingMetrics::new());
        let instrumented = InstrumentedPredictFn::new(delegate.clone(), metrics.clone());
        let model = Arc::new(TestModel::new("observed", 2.0));

        let instrumented_out = instrumented
            .apply(&model, feature_batch())
            .await
            .expect("instrumented");
        let bare = delegate.apply(&model, feature_batch()).await.expect("bare");

        assert_eq!(instrumented_out, bare);
        assert_eq!(metrics.predict_items.load(Ordering::SeqCst), 2);
        assert_eq!(metrics.predict_failures.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_creates_one_observer_per_model_id() {
        let metrics = Arc::new(RecordingMetrics::new());
        let instrumented = InstrumentedPredictFn::new(Arc::new(WeightPredictFn), metrics.clone());
        let first = Arc::new(TestModel::new("model-a", 1.0));
        let second = Arc::new(TestModel::new("model-b", 1.0));

        for _ in 0..3 {
            instrumented
                .apply(&first, feature_batch())
                .await
                .expect("first model");
        }
        instrumented
            .apply(&second, feature_batch())
            .await
            .expect("second model");

        assert_eq!(metrics.observers_created.load(Ordering::SeqCst), 2);
        assert_eq!(metrics.predict_items.load(Ordering::SeqCst), 8);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_racing_first_sightings_share_one_observer() {
        let metrics = Arc::new(RecordingMetrics::new());
        let instrumented = Arc::new(InstrumentedPredictFn::new(
            Arc::new(WeightPredictFn),
            metrics.clone(),
        ));
        let model = Arc::new(TestModel::new("raced", 1.0));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let instrumented = instrumented.clone();
                let model = model.clone();
                tokio::spawn(async move { instrumented.apply(&model, feature_batch()).await })
            })
            .collect();
        for joined in join_all(tasks).await {
            joined.expect("task").expect("apply");
        }

        assert_eq!(metrics.observers_created.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.predict_items.load(Ordering::SeqCst), 32);
    }

    #[tokio::test]
    async fn test_reports_failures_and_passes_them_through() {
        let failing = PredictFn::per_vector(|_model: &TestModel, _vector: &Vector<i32, f64>| {
            Err::<f64, BoxError>(std::io::Error::other("scorer down").into())
        });
        let metrics = Arc::new(RecordingMetrics::new());
        let instrumented = InstrumentedPredictFn::new(Arc::new(failing), metrics.clone());
        let model = Arc::new(TestModel::new("failing", 1.0));

        let error = instrumented
            .apply(&model, feature_batch())
            .await
            .expect_err("failure passes through");

        assert!(matches!(error, PredictError::Prediction(_)));
        assert_eq!(metrics.predict_failures.load(Ordering::SeqCst), 1);
        assert_eq!(metrics.predict_items.load(Ordering::SeqCst), 0);
    }
}
