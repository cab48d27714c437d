use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{PredictError, PredictResult};
use crate::model::Model;

/// Asynchronous source of a shared model handle.
///
/// A loader owns the strategy for producing its model: building it on every
/// call, memoizing a single construction, or handing out an instance resolved
/// ahead of time. Callers only ever see `get()`, which resolves to a cheaply
/// cloneable [`Arc`] around the handle.
///
/// `get()` may be awaited concurrently from any number of tasks. Implementors
/// must stay safe under that load; whether concurrent calls share one
/// construction is the implementor's contract (see
/// [`MemoizedLoader`](crate::loader::MemoizedLoader)).
///
/// ## Usage Context
///
/// The first stage of every prediction pipeline. A
/// [`Predictor`](crate::predict::Predictor) awaits `get()` under its request
/// deadline before extraction and scoring run.
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// The model handle this loader produces.
    type Model: Model;

    /// Resolves the model, loading it first if this loader's strategy calls
    /// for it.
    ///
    /// # Returns
    ///
    /// A shared handle to the loaded model, or the error that construction
    /// produced.
    async fn get(&self) -> PredictResult<Arc<Self::Model>>;

    /// Resolves the model, waiting at most `wait`.
    ///
    /// # Returns
    ///
    /// The loaded model, the construction error, or
    /// [`PredictError::Timeout`] if the deadline passed first. Timing out
    /// does not cancel an in-flight load owned by the loader itself.
    async fn get_within(&self, wait: Duration) -> PredictResult<Arc<Self::Model>> {
        match tokio::time::timeout(wait, self.get()).await {
            Ok(outcome) => outcome,
            Err(_) => Err(PredictError::Timeout { after: wait }),
        }
    }
}

#[async_trait]
impl<L> ModelLoader for Arc<L>
where
    L: ModelLoader + ?Sized,
{
    type Model = L::Model;

    async fn get(&self) -> PredictResult<Arc<Self::Model>> {
        (**self).get().await
    }

    async fn get_within(&self, wait: Duration) -> PredictResult<Arc<Self::Model>> {
        (**self).get_within(wait).await
    }
}
