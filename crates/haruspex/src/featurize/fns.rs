use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;

use super::{FeatureExtractor, Vector};
use crate::error::{BoxError, PredictError, PredictResult};

/// Batch transform produced by a feature-encoding collaborator.
///
/// Given the full input batch, returns one value per input, in input order.
pub type BatchExtract<I, V> = Box<dyn Fn(&[I]) -> Result<Vec<V>, BoxError> + Send + Sync>;

/// Opaque feature-engineering artifact: a feature specification plus the
/// fitted settings persisted by an external tool.
///
/// The harness never interprets either field; it hands them to the
/// `compile` collaborator of [`ExtractFn::from_settings`], which turns them
/// into a runnable batch transform.
#[derive(Debug, Clone)]
pub struct FeatureSettings {
    spec: String,
    settings: Vec<u8>,
}

impl FeatureSettings {
    /// Bundles a feature spec with its fitted settings blob.
    pub fn new(spec: impl Into<String>, settings: impl Into<Vec<u8>>) -> Self {
        Self {
            spec: spec.into(),
            settings: settings.into(),
        }
    }

    /// The feature specification.
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// The fitted settings blob.
    pub fn settings(&self) -> &[u8] {
        &self.settings
    }
}

/// A [`FeatureExtractor`] lifted from a synchronous transform.
///
/// The wrapped function runs on the blocking worker pool
/// (`tokio::task::spawn_blocking`), so CPU-heavy encodings do not stall the
/// async executor. Errors returned by the transform, and panics inside it,
/// surface as [`PredictError::Extraction`] with the cause preserved.
///
/// The lift enforces the pairing contract for you: a batch transform that
/// returns the wrong number of values fails with
/// [`PredictError::VectorCount`] instead of silently mispairing inputs.
pub struct ExtractFn<I, V> {
    f: Arc<dyn Fn(&[I]) -> Result<Vec<V>, BoxError> + Send + Sync>,
}

impl<I, V> ExtractFn<I, V>
where
    I: Send + 'static,
    V: Send + 'static,
{
    /// Lifts a batch transform.
    ///
    /// The transform sees the whole input slice at once and must return
    /// exactly one value per input, in input order. An empty batch must
    /// yield an empty value list.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[I]) -> Result<Vec<V>, BoxError> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Lifts a per-item transform, applying it to each input in order.
    pub fn per_item<F>(f: F) -> Self
    where
        F: Fn(&I) -> Result<V, BoxError> + Send + Sync + 'static,
    {
        Self::new(move |inputs| inputs.iter().map(&f).collect())
    }

    /// Builds an extractor from a persisted feature-engineering artifact.
    ///
    /// `compile` is the external collaborator (a feature-encoding library)
    /// that turns the opaque spec/settings pair into a batch transform.
    /// Compilation happens once, here; failures surface as
    /// [`PredictError::Extraction`].
    pub fn from_settings<C>(settings: &FeatureSettings, compile: C) -> PredictResult<Self>
    where
        C: FnOnce(&FeatureSettings) -> Result<BatchExtract<I, V>, BoxError>,
    {
        let f = compile(settings).map_err(PredictError::extraction)?;
        Ok(Self { f: Arc::from(f) })
    }
}

#[async_trait]
impl<I, V> FeatureExtractor for ExtractFn<I, V>
where
    I: Send + 'static,
    V: Send + 'static,
{
    type Input = I;
    type Value = V;

    async fn extract(&self, inputs: Vec<I>) -> PredictResult<Vec<Vector<I, V>>> {
        let f = self.f.clone();
        let outcome = task::spawn_blocking(move || {
            let values = f(&inputs)?;
            Ok::<_, BoxError>((inputs, values))
        })
        .await;

        let (inputs, values) = match outcome {
            Ok(Ok(pair)) => pair,
            Ok(Err(cause)) => return Err(PredictError::extraction(cause)),
            Err(join) => return Err(PredictError::extraction(join)),
        };

        if values.len() != inputs.len() {
            return Err(PredictError::VectorCount {
                expected: inputs.len(),
                actual: values.len(),
            });
        }

        Ok(inputs
            .into_iter()
            .zip(values)
            .map(|(input, value)| Vector::new(input, value))
            .collect())
    }
}
