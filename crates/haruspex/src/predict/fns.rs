use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{self, BoxFuture};
use tokio::task;

use crate::error::{BoxError, PredictError, PredictResult};
use crate::featurize::Vector;
use crate::model::Model;
use crate::predict::core_trait::AsyncPredictFn;
use crate::predict::prediction::Prediction;

/// A synchronous, potentially blocking prediction function lifted onto the
/// blocking pool.
///
/// The wrapped closure receives the raw backend instance and the full feature
/// batch and must return one prediction per vector. Each call to
/// [`AsyncPredictFn::apply`] runs the closure via
/// [`tokio::task::spawn_blocking`], so CPU-heavy inference never stalls the
/// async executor.
///
/// ## Usage Context
///
/// Used for in-process model backends whose inference API is synchronous.
/// Purely asynchronous backends (remote scoring services and the like) should
/// implement [`AsyncPredictFn`] directly or go through
/// [`PerVectorPredictFn`].
pub struct PredictFn<M, I, A, P> {
    #[allow(clippy::type_complexity)]
    f: Arc<dyn Fn(&M, Vec<Vector<I, A>>) -> Result<Vec<Prediction<I, P>>, BoxError> + Send + Sync>,
}

impl<M, I, A, P> PredictFn<M, I, A, P>
where
    M: Model,
    I: Send + 'static,
    A: Send + 'static,
    P: Send + 'static,
{
    /// Wraps a synchronous whole-batch prediction function.
    ///
    /// # Parameters
    ///
    /// - `f`: closure from a model reference and the extracted feature batch
    ///   to one prediction per vector
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&M, Vec<Vector<I, A>>) -> Result<Vec<Prediction<I, P>>, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Wraps a synchronous single-vector prediction function.
    ///
    /// The closure is applied to each vector of the batch in order; the first
    /// failure fails the whole batch.
    pub fn per_vector<F>(f: F) -> Self
    where
        F: Fn(&M, &Vector<I, A>) -> Result<P, BoxError> + Send + Sync + 'static,
    {
        Self::new(move |model, vectors| {
            vectors
                .into_iter()
                .map(|vector| {
                    let value = f(model, &vector)?;
                    let (input, _) = vector.into_parts();
                    Ok(Prediction::new(input, value))
                })
                .collect()
        })
    }
}

#[async_trait]
impl<M, I, A, P> AsyncPredictFn for PredictFn<M, I, A, P>
where
    M: Model,
    I: Send + 'static,
    A: Send + 'static,
    P: Send + 'static,
{
    type Model = M;
    type Input = I;
    type Feature = A;
    type Output = P;

    async fn apply(
        &self,
        model: &Arc<M>,
        vectors: Vec<Vector<I, A>>,
    ) -> PredictResult<Vec<Prediction<I, P>>> {
        let f = self.f.clone();
        let model = model.clone();
        let outcome = task::spawn_blocking(move || f(&model, vectors)).await;
        match outcome {
            Ok(Ok(predictions)) => Ok(predictions),
            Ok(Err(cause)) => Err(PredictError::prediction(cause)),
            Err(join) => Err(PredictError::prediction(join)),
        }
    }
}

/// An asynchronous prediction function applied to each vector independently.
///
/// Every vector of the batch spawns one future from the wrapped closure; the
/// futures run concurrently and are joined back into a single ordered batch.
/// The first failing vector fails the whole batch, there are no partial
/// results.
///
/// The closure receives the model behind its shared handle together with the
/// owned feature value, so the returned future holds no borrows and may
/// outlive the call frame. Prediction functions that also need the raw input
/// should implement [`AsyncPredictFn`] directly.
pub struct PerVectorPredictFn<M, I, A, P> {
    #[allow(clippy::type_complexity)]
    f: Arc<dyn Fn(Arc<M>, A) -> BoxFuture<'static, Result<P, BoxError>> + Send + Sync>,
    marker: PhantomData<fn(I)>,
}

impl<M, I, A, P> PerVectorPredictFn<M, I, A, P>
where
    M: Model,
    I: Send + 'static,
    A: Send + 'static,
    P: Send + 'static,
{
    /// Wraps an asynchronous single-feature prediction function.
    ///
    /// # Parameters
    ///
    /// - `f`: closure from a model handle and one feature value to a future
    ///   resolving to that vector's prediction
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Arc<M>, A) -> BoxFuture<'static, Result<P, BoxError>> + Send + Sync + 'static,
    {
        Self {
            f: Arc::new(f),
            marker: PhantomData,
        }
    }
}

#[async_trait]
impl<M, I, A, P> AsyncPredictFn for PerVectorPredictFn<M, I, A, P>
where
    M: Model,
    I: Send + 'static,
    A: Send + 'static,
    P: Send + 'static,
{
    type Model = M;
    type Input = I;
    type Feature = A;
    type Output = P;

    async fn apply(
        &self,
        model: &Arc<M>,
        vectors: Vec<Vector<I, A>>,
    ) -> PredictResult<Vec<Prediction<I, P>>> {
        let (inputs, futures): (Vec<I>, Vec<_>) = vectors
            .into_iter()
            .map(|vector| {
                let (input, feature) = vector.into_parts();
                (input, (self.f)(model.clone(), feature))
            })
            .unzip();

        let values = future::try_join_all(futures)
            .await
            .map_err(PredictError::prediction)?;

        Ok(inputs
            .into_iter()
            .zip(values)
            .map(|(input, value)| Prediction::new(input, value))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures::FutureExt;

    use super::*;
    use crate::testing::TestModel;

    fn feature_batch() -> Vec<Vector<i32, f64>> {
        vec![
            Vector::new(1, 0.1),
            Vector::new(2, 0.2),
            Vector::new(3, 0.3),
        ]
    }

    #[tokio::test]
    async fn test_batch_fn_sees_model_and_all_vectors() {
        let predict_fn = PredictFn::new(|model: &TestModel, vectors| {
            let weight = *model.instance();
            Ok(vectors
                .into_iter()
                .map(|vector: Vector<i32, f64>| {
                    let (input, feature) = vector.into_parts();
                    Prediction::new(input, feature * weight)
                })
                .collect())
        });
        let model = Arc::new(TestModel::new("batch", 2.0));

        let predictions = predict_fn
            .apply(&model, feature_batch())
            .await
            .expect("batch prediction");

        let pairs: Vec<(i32, f64)> = predictions.into_iter().map(Prediction::into_parts).collect();
        assert_eq!(pairs, vec![(1, 0.2), (2, 0.4), (3, 0.6)]);
    }

    #[tokio::test]
    async fn test_per_vector_preserves_input_order() {
        let predict_fn = PredictFn::per_vector(|model: &TestModel, vector: &Vector<i32, f64>| {
            Ok(vector.value() * model.instance())
        });
        let model = Arc::new(TestModel::new("ordered", 2.0));

        let predictions = predict_fn
            .apply(&model, feature_batch())
            .await
            .expect("per-vector prediction");

        let inputs: Vec<i32> = predictions.iter().map(|p| *p.input()).collect();
        assert_eq!(inputs, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_failure_carries_prediction_stage_cause() {
        let predict_fn =
            PredictFn::per_vector(|_model: &TestModel, _vector: &Vector<i32, f64>| {
                Err::<f64, BoxError>(std::io::Error::other("scorer offline").into())
            });
        let model = Arc::new(TestModel::new("failing", 1.0));

        let error = predict_fn
            .apply(&model, feature_batch())
            .await
            .expect_err("prediction must fail");

        assert!(matches!(error, PredictError::Prediction(_)));
        assert!(format!("{error:?}").contains("scorer offline"));
    }

    #[tokio::test]
    async fn test_panic_in_sync_fn_becomes_prediction_error() {
        let predict_fn = PredictFn::new(
            |_model: &TestModel, _vectors: Vec<Vector<i32, f64>>| -> Result<
                Vec<Prediction<i32, f64>>,
                BoxError,
            > { panic!("backend bug") },
        );
        let model = Arc::new(TestModel::new("panicking", 1.0));

        let error = predict_fn
            .apply(&model, feature_batch())
            .await
            .expect_err("panic must surface as an error");

        assert!(matches!(error, PredictError::Prediction(_)));
    }

    #[tokio::test]
    async fn test_per_vector_futures_join_in_input_order() {
        // Later vectors resolve sooner; the joined batch must still follow
        // input order.
        let predict_fn = PerVectorPredictFn::new(|model: Arc<TestModel>, feature: f64| {
            async move {
                let delay = Duration::from_millis((30.0 - feature * 100.0) as u64);
                tokio::time::sleep(delay).await;
                Ok(feature * model.instance())
            }
            .boxed()
        });
        let model = Arc::new(TestModel::new("async", 2.0));

        let predictions = predict_fn
            .apply(&model, feature_batch())
            .await
            .expect("async prediction");

        let pairs: Vec<(i32, f64)> = predictions.into_iter().map(Prediction::into_parts).collect();
        assert_eq!(pairs, vec![(1, 0.2), (2, 0.4), (3, 0.6)]);
    }

    #[tokio::test]
    async fn test_per_vector_failure_fails_whole_batch() {
        let predict_fn = PerVectorPredictFn::new(|_model: Arc<TestModel>, feature: f64| {
            async move {
                if feature > 0.25 {
                    Err::<f64, BoxError>(std::io::Error::other("vector rejected").into())
                } else {
                    Ok(feature)
                }
            }
            .boxed()
        });
        let model = Arc::new(TestModel::new("partial", 1.0));

        let error = predict_fn
            .apply(&model, feature_batch())
            .await
            .expect_err("one bad vector must fail the batch");

        assert!(matches!(error, PredictError::Prediction(_)));
    }
}
