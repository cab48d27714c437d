use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tokio::sync::Mutex;

use crate::error::{PredictError, PredictResult};
use crate::loader::core_trait::ModelLoader;

/// One in-flight or settled load, cloneable by any number of waiters.
type LoadHandle<M> = Shared<BoxFuture<'static, PredictResult<Arc<M>>>>;

/// Memoizes an inner loader so the model is constructed exactly once.
///
/// The first `get()` spawns the inner load as a detached task and publishes a
/// shared handle to it; every later `get()` (and every concurrent one) awaits
/// that same handle. Because the load runs in its own task, a caller that
/// gives up waiting (for example a [`Predictor`](crate::predict::Predictor)
/// whose deadline fires mid-load) does not cancel it: the construction keeps
/// running and its result is ready for the next caller.
///
/// A failed load settles the handle with its error, and that error is what
/// every subsequent `get()` resolves to. Recovering from a bad construction
/// means building a fresh `MemoizedLoader`.
///
/// ## Usage Context
///
/// Wraps a [`SupplierLoader`](crate::loader::SupplierLoader) (or any loader
/// whose construction is expensive) so that serving traffic shares one model
/// instance.
pub struct MemoizedLoader<L>
where
    L: ModelLoader,
{
    inner: Arc<L>,
    slot: Mutex<Option<LoadHandle<L::Model>>>,
}

impl<L> MemoizedLoader<L>
where
    L: ModelLoader + 'static,
{
    /// Wraps `inner` without starting the load; the first `get()` triggers
    /// it.
    pub fn new(inner: L) -> Self {
        Self {
            inner: Arc::new(inner),
            slot: Mutex::new(None),
        }
    }

    /// Wraps `inner` and starts the load immediately.
    ///
    /// Must be called from within a Tokio runtime, since the load is spawned
    /// onto it. `get()` still resolves only once the load settles.
    pub fn preloading(inner: L) -> Self {
        let inner = Arc::new(inner);
        let handle = Self::spawn_load(inner.clone());
        Self {
            inner,
            slot: Mutex::new(Some(handle)),
        }
    }

    /// Starts the inner load as a detached task and returns a handle that
    /// any number of callers can await.
    fn spawn_load(inner: Arc<L>) -> LoadHandle<L::Model> {
        let task = tokio::spawn(async move { inner.get().await });
        async move {
            match task.await {
                Ok(outcome) => outcome,
                Err(join) => Err(PredictError::load(join)),
            }
        }
        .boxed()
        .shared()
    }
}

#[async_trait]
impl<L> ModelLoader for MemoizedLoader<L>
where
    L: ModelLoader + 'static,
{
    type Model = L::Model;

    async fn get(&self) -> PredictResult<Arc<L::Model>> {
        // The lock covers only the check-and-publish; waiting on the load
        // happens outside it so callers never serialize on each other.
        let handle = {
            let mut slot = self.slot.lock().await;
            match slot.as_ref() {
                Some(handle) => handle.clone(),
                None => {
                    let handle = Self::spawn_load(self.inner.clone());
                    *slot = Some(handle.clone());
                    handle
                }
            }
        };
        handle.await
    }
}
