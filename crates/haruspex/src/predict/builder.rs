use std::sync::Arc;

use crate::featurize::FeatureExtractor;
use crate::instrument::{InstrumentedExtractor, InstrumentedPredictFn, PredictorMetrics};
use crate::loader::ModelLoader;
use crate::predict::core_trait::AsyncPredictFn;
use crate::predict::predictor::Predictor;

/// Immutable recipe for a [`Predictor`].
///
/// Every `with_*` call leaves this builder untouched and returns a new one
/// that shares the stages it kept. Sharing is real, not a copy: two builders
/// that differ only in their prediction function still hand out predictors
/// backed by the same loader, so a memoized model loads once across all of
/// them.
///
/// Replacing a stage may change the builder's type parameters; the pipeline
/// is only required to line up when [`predictor`](PredictorBuilder::predictor)
/// assembles it.
///
/// ## Usage Context
///
/// Compose the serving pipeline once at startup, derive variants (an
/// instrumented one, a canary with a different scorer) from the same base,
/// and hand each assembled predictor to its serving path.
pub struct PredictorBuilder<L, E, F> {
    loader: Arc<L>,
    extractor: Arc<E>,
    predict_fn: Arc<F>,
}

impl<L, E, F> Clone for PredictorBuilder<L, E, F> {
    fn clone(&self) -> Self {
        Self {
            loader: self.loader.clone(),
            extractor: self.extractor.clone(),
            predict_fn: self.predict_fn.clone(),
        }
    }
}

impl<L, E, F> PredictorBuilder<L, E, F> {
    /// Starts a builder from owned stages.
    pub fn new(loader: L, extractor: E, predict_fn: F) -> Self {
        Self {
            loader: Arc::new(loader),
            extractor: Arc::new(extractor),
            predict_fn: Arc::new(predict_fn),
        }
    }

    /// A new builder with `loader` in place, sharing the other stages.
    pub fn with_loader<L2>(&self, loader: L2) -> PredictorBuilder<L2, E, F> {
        PredictorBuilder {
            loader: Arc::new(loader),
            extractor: self.extractor.clone(),
            predict_fn: self.predict_fn.clone(),
        }
    }

    /// A new builder with `extractor` in place, sharing the other stages.
    pub fn with_extractor<E2>(&self, extractor: E2) -> PredictorBuilder<L, E2, F> {
        PredictorBuilder {
            loader: self.loader.clone(),
            extractor: Arc::new(extractor),
            predict_fn: self.predict_fn.clone(),
        }
    }

    /// A new builder with `predict_fn` in place, sharing the other stages.
    pub fn with_predict_fn<F2>(&self, predict_fn: F2) -> PredictorBuilder<L, E, F2> {
        PredictorBuilder {
            loader: self.loader.clone(),
            extractor: self.extractor.clone(),
            predict_fn: Arc::new(predict_fn),
        }
    }
}

impl<L, E, F> PredictorBuilder<L, E, F>
where
    L: ModelLoader,
    E: FeatureExtractor,
    F: AsyncPredictFn<Model = L::Model, Input = E::Input, Feature = E::Value>,
{
    /// Assembles a predictor sharing this builder's stages.
    pub fn predictor(&self) -> Predictor<L, E, F> {
        Predictor::from_shared(
            self.loader.clone(),
            self.extractor.clone(),
            self.predict_fn.clone(),
        )
    }

    /// A new builder whose extraction and scoring stages report to
    /// `metrics`, sharing the loader.
    ///
    /// The wrapped stages serve identically to the bare ones; see
    /// [`InstrumentedPredictFn`](crate::instrument::InstrumentedPredictFn)
    /// for the per-model observer contract.
    pub fn instrumented<X>(
        &self,
        metrics: Arc<X>,
    ) -> PredictorBuilder<L, InstrumentedExtractor<E, X::Extract>, InstrumentedPredictFn<F, X>>
    where
        X: PredictorMetrics<E::Input, E::Value, F::Output> + 'static,
    {
        PredictorBuilder {
            loader: self.loader.clone(),
            extractor: Arc::new(InstrumentedExtractor::new(
                self.extractor.clone(),
                metrics.extract_observer(),
            )),
            predict_fn: Arc::new(InstrumentedPredictFn::new(
                self.predict_fn.clone(),
                metrics,
            )),
        }
    }
}
