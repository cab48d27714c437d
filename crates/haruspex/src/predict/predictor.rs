use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{PredictError, PredictResult};
use crate::featurize::FeatureExtractor;
use crate::loader::ModelLoader;
use crate::model::Model;
use crate::predict::core_trait::AsyncPredictFn;
use crate::predict::prediction::Prediction;

/// Deadline applied by [`Predictor::predict`]. Effectively unbounded, but
/// the race is still armed so a stuck pipeline cannot hold a caller forever.
pub const DEFAULT_PREDICT_TIMEOUT: Duration = Duration::from_secs(86_400);

/// Runs the full prediction pipeline for each request batch.
///
/// A predictor owns one loader, one extractor, and one prediction function,
/// and drives a batch of raw inputs through them in order: resolve the model,
/// extract feature vectors, score. All three stages run inside a single
/// deadline race; see [`predict_within`](Predictor::predict_within).
///
/// Predictors are cheap to clone; clones share the same stages, so a
/// memoized loader keeps sharing its one model across clones.
///
/// ## Usage Context
///
/// The serving entry point. Assemble one with
/// [`PredictorBuilder`](crate::predict::PredictorBuilder), clone it into
/// request handlers, and call [`predict`](Predictor::predict) per batch.
pub struct Predictor<L, E, F> {
    loader: Arc<L>,
    extractor: Arc<E>,
    predict_fn: Arc<F>,
}

impl<L, E, F> Clone for Predictor<L, E, F> {
    fn clone(&self) -> Self {
        Self {
            loader: self.loader.clone(),
            extractor: self.extractor.clone(),
            predict_fn: self.predict_fn.clone(),
        }
    }
}

impl<L, E, F> Predictor<L, E, F>
where
    L: ModelLoader,
    E: FeatureExtractor,
    F: AsyncPredictFn<Model = L::Model, Input = E::Input, Feature = E::Value>,
{
    /// Assembles a predictor from owned stages.
    pub fn new(loader: L, extractor: E, predict_fn: F) -> Self {
        Self::from_shared(Arc::new(loader), Arc::new(extractor), Arc::new(predict_fn))
    }

    /// Assembles a predictor from already shared stages.
    pub fn from_shared(loader: Arc<L>, extractor: Arc<E>, predict_fn: Arc<F>) -> Self {
        Self {
            loader,
            extractor,
            predict_fn,
        }
    }

    /// Predicts a batch under [`DEFAULT_PREDICT_TIMEOUT`].
    pub async fn predict(
        &self,
        inputs: Vec<E::Input>,
    ) -> PredictResult<Vec<Prediction<E::Input, F::Output>>> {
        self.predict_within(inputs, DEFAULT_PREDICT_TIMEOUT).await
    }

    /// Predicts a batch, allowing the whole pipeline at most `timeout`.
    ///
    /// The deadline starts when this is called and covers model resolution,
    /// feature extraction, and scoring together; however the time is split
    /// between stages, the race has a single timer. When it fires the
    /// pipeline future is dropped and the caller gets
    /// [`PredictError::Timeout`]. Work that does not live in that future,
    /// such as a load owned by a
    /// [`MemoizedLoader`](crate::loader::MemoizedLoader), keeps running.
    ///
    /// # Returns
    ///
    /// One prediction per input, in input order, or the first stage error.
    pub async fn predict_within(
        &self,
        inputs: Vec<E::Input>,
        timeout: Duration,
    ) -> PredictResult<Vec<Prediction<E::Input, F::Output>>> {
        match tokio::time::timeout(timeout, self.pipeline(inputs)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                warn!(after_ms = timeout.as_millis() as u64, "prediction deadline elapsed");
                Err(PredictError::Timeout { after: timeout })
            }
        }
    }

    async fn pipeline(
        &self,
        inputs: Vec<E::Input>,
    ) -> PredictResult<Vec<Prediction<E::Input, F::Output>>> {
        let model = self.loader.get().await?;
        debug!(model_id = %model.id(), batch_size = inputs.len(), "scoring batch");
        let vectors = self.extractor.extract(inputs).await?;
        self.predict_fn.apply(&model, vectors).await
    }
}
