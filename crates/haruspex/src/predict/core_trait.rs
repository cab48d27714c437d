use std::sync::Arc;

use async_trait::async_trait;

use super::Prediction;
use crate::error::PredictResult;
use crate::featurize::Vector;
use crate::model::Model;

/// Runs a loaded model over a batch of vectors, asynchronously.
///
/// This is the prediction contract the [`Predictor`](super::Predictor)
/// orchestrates against. Implementations receive the shared model handle
/// and the extraction stage's vectors, and must return one
/// [`Prediction`] per vector, in vector order.
///
/// Synchronous prediction code does not implement this trait by hand - it
/// goes through [`PredictFn`](super::PredictFn), which lifts it onto the
/// blocking worker pool. Per-vector asynchronous operations compose into a
/// batch via [`PerVectorPredictFn`](super::PerVectorPredictFn). Natively
/// batch-asynchronous backends (remote serving APIs) implement the trait
/// directly.
///
/// There is no partial success: implementations fail the whole batch on the
/// first vector they cannot predict.
#[async_trait]
pub trait AsyncPredictFn: Send + Sync {
    /// Model handle type this function predicts with.
    type Model: Model;

    /// Raw input type carried through from extraction.
    type Input: Send + 'static;

    /// Extracted feature type consumed by the model.
    type Feature: Send + 'static;

    /// Predicted value type.
    type Output: Send + 'static;

    /// Produces one prediction per vector, preserving vector order.
    async fn apply(
        &self,
        model: &Arc<Self::Model>,
        vectors: Vec<Vector<Self::Input, Self::Feature>>,
    ) -> PredictResult<Vec<Prediction<Self::Input, Self::Output>>>;
}
