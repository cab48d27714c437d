//! # Feature Extraction
//!
//! The extraction stage turns a batch of raw inputs into [`Vector`]s -
//! parallel (input, extracted-value) pairs that the prediction stage
//! consumes alongside the loaded model.
//!
//! ## Key Components
//!
//! * [`FeatureExtractor`] - the async extraction contract: one vector per
//!   input, input order preserved, empty in means empty out
//! * [`ExtractFn`] - lifts synchronous batch or per-item transforms onto
//!   the blocking worker pool
//! * [`FeatureSettings`] - the opaque persisted artifact consumed by
//!   [`ExtractFn::from_settings`] together with an external compile step
//!
//! Natively asynchronous extraction (say, a remote encoding service)
//! implements [`FeatureExtractor`] directly instead of going through the
//! lifts.

mod core_trait;
mod fns;
mod vector;

pub use core_trait::FeatureExtractor;
pub use fns::{BatchExtract, ExtractFn, FeatureSettings};
pub use vector::Vector;
