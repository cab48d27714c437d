//! Metrics decorators for pipeline stages.
//!
//! Instrumentation wraps a stage rather than hooking into it: an
//! [`InstrumentedExtractor`] or [`InstrumentedPredictFn`] holds the real
//! stage, times each call, and reports the outcome to observers supplied by
//! a [`PredictorMetrics`] backend. Wrapped stages behave identically to bare
//! ones, so instrumentation can be layered on with
//! [`PredictorBuilder::instrumented`](crate::predict::PredictorBuilder::instrumented)
//! without touching serving behavior.

mod extractor;
mod metrics;
mod predict_fn;

pub use extractor::InstrumentedExtractor;
pub use metrics::{ExtractObserver, PredictObserver, PredictorMetrics};
pub use predict_fn::InstrumentedPredictFn;
