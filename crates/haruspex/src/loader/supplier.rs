use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;
use tracing::{info, warn};

use crate::error::{BoxError, PredictError, PredictResult};
use crate::loader::core_trait::ModelLoader;
use crate::model::Model;

/// Lifts a synchronous, potentially blocking model supplier into a
/// [`ModelLoader`].
///
/// The supplier typically reads weights from disk or a remote store and
/// assembles the backend session. Every `get()` runs it once on the blocking
/// pool, so this loader builds a fresh model per call; wrap it in a
/// [`MemoizedLoader`](crate::loader::MemoizedLoader) to share one
/// construction instead.
pub struct SupplierLoader<M> {
    supplier: Arc<dyn Fn() -> Result<M, BoxError> + Send + Sync>,
}

impl<M> SupplierLoader<M>
where
    M: Model,
{
    /// Wraps a synchronous model supplier.
    ///
    /// # Parameters
    ///
    /// - `supplier`: closure producing a ready-to-serve model handle or the
    ///   error that stopped construction
    pub fn new<F>(supplier: F) -> Self
    where
        F: Fn() -> Result<M, BoxError> + Send + Sync + 'static,
    {
        Self {
            supplier: Arc::new(supplier),
        }
    }
}

#[async_trait]
impl<M> ModelLoader for SupplierLoader<M>
where
    M: Model,
{
    type Model = M;

    async fn get(&self) -> PredictResult<Arc<M>> {
        let supplier = self.supplier.clone();
        let outcome = task::spawn_blocking(move || supplier()).await;
        match outcome {
            Ok(Ok(model)) => {
                let model = Arc::new(model);
                info!(model_id = %model.id(), "model loaded");
                Ok(model)
            }
            Ok(Err(cause)) => {
                warn!(error = %cause, "model load failed");
                Err(PredictError::load(cause))
            }
            Err(join) => {
                warn!(error = %join, "model load worker panicked");
                Err(PredictError::load(join))
            }
        }
    }
}
