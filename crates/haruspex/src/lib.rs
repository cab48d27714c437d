//! # Haruspex
//!
//! An asynchronous inference serving harness.
//!
//! ## Overview
//!
//! Haruspex turns a model backend into a serving pipeline: a batch of raw
//! inputs is matched with a loaded model, converted to feature vectors, and
//! scored, all under a single request deadline. The harness is backend
//! agnostic; it standardizes how models are loaded and shared, how stages
//! compose, and how failures and timeouts surface, while the actual
//! inference stays behind small traits.
//!
//! ## Architecture
//!
//! A [`Predictor`] drives three stages in order:
//!
//! 1. a [`loader::ModelLoader`] resolves the shared model handle, loading
//!    it lazily, memoized, or ahead of time
//! 2. a [`featurize::FeatureExtractor`] turns the input batch into feature
//!    [`Vector`]s, one per input and in input order
//! 3. a [`predict::AsyncPredictFn`] scores the vectors into
//!    [`Prediction`]s, again one per input and in input order
//!
//! Synchronous, blocking stage implementations lift onto the Tokio blocking
//! pool through [`loader::SupplierLoader`], [`featurize::ExtractFn`], and
//! [`predict::PredictFn`], so the async executor never stalls on them. The
//! whole pipeline races one timer per request; when it fires the caller gets
//! [`PredictError::Timeout`] while loads owned by a
//! [`loader::MemoizedLoader`] keep running for the next request.
//!
//! ## Key Components
//!
//! - [`Model`]: the loaded-model handle a backend exposes to the pipeline
//! - [`loader`]: loading strategies and their composition
//! - [`featurize`]: feature extraction traits and sync lifting
//! - [`predict`]: scoring traits, the [`Predictor`], and
//!   [`PredictorBuilder`]
//! - [`instrument`]: metrics decorators that wrap stages without changing
//!   their behavior
//!
//! ## Usage Example
//!
//! ```
//! use haruspex::featurize::ExtractFn;
//! use haruspex::loader::{MemoizedLoader, SupplierLoader};
//! use haruspex::predict::{PredictFn, PredictorBuilder};
//! use haruspex::{Model, ModelId, Prediction, Vector};
//!
//! struct Linear {
//!     id: ModelId,
//!     weights: Vec<f64>,
//! }
//!
//! impl Model for Linear {
//!     type Instance = Vec<f64>;
//!
//!     fn id(&self) -> &ModelId {
//!         &self.id
//!     }
//!
//!     fn instance(&self) -> &Vec<f64> {
//!         &self.weights
//!     }
//!
//!     fn close(&self) {}
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), haruspex::PredictError> {
//!     // Loads once, shared by every request.
//!     let loader = MemoizedLoader::new(SupplierLoader::new(|| {
//!         Ok(Linear {
//!             id: ModelId::new("linear-v1"),
//!             weights: vec![0.5, 2.0],
//!         })
//!     }));
//!     let extractor = ExtractFn::per_item(|x: &f64| Ok(vec![*x, x * x]));
//!     let predict_fn = PredictFn::per_vector(|model: &Linear, vector: &Vector<f64, Vec<f64>>| {
//!         let score = model
//!             .instance()
//!             .iter()
//!             .zip(vector.value())
//!             .map(|(w, f)| w * f)
//!             .sum::<f64>();
//!         Ok(score)
//!     });
//!
//!     let builder = PredictorBuilder::new(loader, extractor, predict_fn);
//!     let predictions = builder.predictor().predict(vec![1.0, 3.0]).await?;
//!
//!     let pairs: Vec<(f64, f64)> = predictions.into_iter().map(Prediction::into_parts).collect();
//!     assert_eq!(pairs, vec![(1.0, 2.5), (3.0, 19.5)]);
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Every handle in the harness is cheap to clone and safe to share:
//! predictors clone into request handlers, loaders hand out `Arc`ed models,
//! and instrumented stages cache their observers behind async locks. No
//! stage blocks the executor; anything synchronous runs on the blocking
//! pool.

pub mod error;
pub mod featurize;
pub mod instrument;
pub mod loader;
pub mod model;
pub mod predict;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{BoxError, PredictError, PredictResult};
pub use featurize::Vector;
pub use model::{Model, ModelId};
pub use predict::{Prediction, Predictor, PredictorBuilder};
