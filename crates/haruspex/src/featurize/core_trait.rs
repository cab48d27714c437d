use async_trait::async_trait;

use super::Vector;
use crate::error::PredictResult;

/// Transforms a batch of raw inputs into parallel (input, value) pairs.
///
/// Implementations must uphold the pairing contract:
///
/// * exactly one [`Vector`] per input
/// * vectors in input order - no dropping, no reordering
/// * an empty input batch yields an empty vector batch, not an error
///
/// Extraction is asynchronous because it commonly shells out to encoding
/// libraries or runs CPU-heavy transforms; the synchronous lifts in
/// [`ExtractFn`](super::ExtractFn) run those on the blocking worker pool.
/// Natively asynchronous extractors implement this trait directly.
#[async_trait]
pub trait FeatureExtractor: Send + Sync {
    /// Raw input type.
    type Input: Send + 'static;

    /// Extracted feature type.
    type Value: Send + 'static;

    /// Extracts one vector per input, preserving input order.
    async fn extract(
        &self,
        inputs: Vec<Self::Input>,
    ) -> PredictResult<Vec<Vector<Self::Input, Self::Value>>>;
}
