//! The prediction pipeline: scoring stages, the predictor, and its builder.
//!
//! Scoring is expressed as an [`AsyncPredictFn`] over a loaded model and an
//! extracted feature batch. Synchronous backends lift into it with
//! [`PredictFn`]; per-vector async backends compose with
//! [`PerVectorPredictFn`]. A [`Predictor`] drives load, extraction, and
//! scoring under one deadline, and [`PredictorBuilder`] assembles and
//! recomposes predictors without mutating shared stages.

mod builder;
mod core_trait;
mod fns;
mod prediction;
mod predictor;

pub use builder::PredictorBuilder;
pub use core_trait::AsyncPredictFn;
pub use fns::{PerVectorPredictFn, PredictFn};
pub use prediction::Prediction;
pub use predictor::{DEFAULT_PREDICT_TIMEOUT, Predictor};
