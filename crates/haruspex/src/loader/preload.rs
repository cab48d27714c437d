use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::PredictResult;
use crate::loader::core_trait::ModelLoader;
use crate::model::Model;

/// A loader whose outcome was settled ahead of serving.
///
/// [`PreloadedLoader::wait`] drives an inner loader up to a deadline at
/// construction time, then holds whatever that produced: the model, the
/// load error, or a timeout. `get()` never waits again, it resolves
/// immediately with the settled outcome. A loader that timed out stays
/// failed; build a new one to retry.
///
/// ## Usage Context
///
/// For services that refuse to come up without a servable model: preload
/// during startup, check [`is_loaded`](PreloadedLoader::is_loaded), and only
/// then start accepting traffic.
pub struct PreloadedLoader<M>
where
    M: Model,
{
    outcome: PredictResult<Arc<M>>,
}

impl<M> PreloadedLoader<M>
where
    M: Model,
{
    /// Drives `inner` to completion, waiting at most `wait`, and settles on
    /// whatever it produced.
    pub async fn wait<L>(inner: L, wait: Duration) -> Self
    where
        L: ModelLoader<Model = M>,
    {
        let outcome = inner.get_within(wait).await;
        match &outcome {
            Ok(model) => info!(model_id = %model.id(), "model preloaded"),
            Err(error) if error.is_timeout() => warn!(after = ?wait, "preload timed out"),
            Err(error) => warn!(%error, "preload failed"),
        }
        Self { outcome }
    }

    /// Settles immediately on an already constructed model.
    pub fn ready(model: M) -> Self {
        Self {
            outcome: Ok(Arc::new(model)),
        }
    }

    /// Whether preloading settled on a servable model.
    pub fn is_loaded(&self) -> bool {
        self.outcome.is_ok()
    }
}

#[async_trait]
impl<M> ModelLoader for PreloadedLoader<M>
where
    M: Model,
{
    type Model = M;

    async fn get(&self) -> PredictResult<Arc<M>> {
        self.outcome.clone()
    }
}
