use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::error::PredictResult;
use crate::featurize::{FeatureExtractor, Vector};
use crate::instrument::metrics::ExtractObserver;

/// Times each extraction and reports its outcome to an observer.
///
/// A pure pass-through otherwise: inputs, vectors, and errors reach the
/// delegate and the caller exactly as they would without instrumentation.
pub struct InstrumentedExtractor<E, O> {
    delegate: Arc<E>,
    observer: Arc<O>,
}

impl<E, O> InstrumentedExtractor<E, O> {
    pub fn new(delegate: Arc<E>, observer: Arc<O>) -> Self {
        Self { delegate, observer }
    }
}

#[async_trait]
impl<E, O> FeatureExtractor for InstrumentedExtractor<E, O>
where
    E: FeatureExtractor,
    O: ExtractObserver<E::Input, E::Value> + 'static,
{
    type Input = E::Input;
    type Value = E::Value;

    async fn extract(
        &self,
        inputs: Vec<E::Input>,
    ) -> PredictResult<Vec<Vector<E::Input, E::Value>>> {
        let started = Instant::now();
        let outcome = self.delegate.extract(inputs).await;
        let elapsed = started.elapsed();
        match &outcome {
            Ok(vectors) => self.observer.observe(vectors, elapsed),
            Err(error) => self.observer.observe_failure(error, elapsed),
        }
        outcome
    }
}
