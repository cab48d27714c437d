//! # Failure Taxonomy
//!
//! Every stage of the prediction pipeline reports failure through a single
//! enum, [`PredictError`], so that callers can tell a timeout apart from a
//! genuine backend failure with a match or [`PredictError::is_timeout`].
//!
//! The variants mirror the pipeline stages:
//!
//! * [`PredictError::ModelLoad`] - the model supplier failed, or the worker
//!   running it panicked
//! * [`PredictError::Extraction`] - the feature-extraction stage failed
//! * [`PredictError::VectorCount`] - a batch transform returned the wrong
//!   number of values for its input batch
//! * [`PredictError::Prediction`] - the prediction stage failed
//! * [`PredictError::Timeout`] - the deadline fired before the pipeline
//!   completed
//!
//! Causes are kept behind `Arc` so the error is cheap to clone; a memoized
//! loader hands the same failure to every caller that observes it.

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Boxed error type accepted at the collaborator seams (model suppliers,
/// extract functions, predict functions).
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Result alias used throughout the crate.
pub type PredictResult<T> = Result<T, PredictError>;

/// Error returned by loaders, extractors, predict functions, and the
/// assembled predictor.
///
/// No stage recovers or retries: a failure in any stage surfaces to the
/// caller as-is, and a single failed vector or prediction fails the whole
/// batch. The original cause is preserved as the [`source`] of the stage
/// variant that wrapped it.
///
/// [`source`]: std::error::Error::source
#[derive(Debug, Clone, Error)]
pub enum PredictError {
    /// Model construction failed.
    ///
    /// Raised when a supplier returns an error or the blocking worker
    /// running it panics.
    #[error("model load failed")]
    ModelLoad(#[source] Arc<dyn StdError + Send + Sync>),

    /// Feature extraction failed.
    #[error("feature extraction failed")]
    Extraction(#[source] Arc<dyn StdError + Send + Sync>),

    /// A batch extract function broke the one-vector-per-input contract.
    ///
    /// Extraction must produce exactly one value per input, in input order;
    /// a transform returning a list of any other length is rejected rather
    /// than silently truncated or padded.
    #[error("extract function returned {actual} values for {expected} inputs")]
    VectorCount {
        /// Number of inputs handed to the transform.
        expected: usize,
        /// Number of values it returned.
        actual: usize,
    },

    /// The prediction function failed.
    #[error("prediction failed")]
    Prediction(#[source] Arc<dyn StdError + Send + Sync>),

    /// The pipeline did not complete before its deadline.
    ///
    /// Distinct from every other variant so callers can always distinguish
    /// a timeout from a backend failure.
    #[error("prediction timed out after {after:?}")]
    Timeout {
        /// The timeout that expired.
        after: Duration,
    },
}

impl PredictError {
    /// Wraps a model-construction failure, preserving `cause` as the source.
    pub fn load<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        PredictError::ModelLoad(Arc::from(cause.into()))
    }

    /// Wraps a feature-extraction failure, preserving `cause` as the source.
    pub fn extraction<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        PredictError::Extraction(Arc::from(cause.into()))
    }

    /// Wraps a prediction failure, preserving `cause` as the source.
    pub fn prediction<E>(cause: E) -> Self
    where
        E: Into<BoxError>,
    {
        PredictError::Prediction(Arc::from(cause.into()))
    }

    /// Returns `true` if this error was raised by the timeout race rather
    /// than by a pipeline stage.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PredictError::Timeout { .. })
    }
}
