//! # Model Handles
//!
//! The [`Model`] trait is the harness's view of a loaded backend: an opaque
//! instance, an identifier, and an idempotent close. Everything else in the
//! crate is generic over it, so backends plug in by implementing this one
//! trait on whatever their runtime hands back after loading.

mod core_trait;
mod id;

pub use core_trait::Model;
pub use id::ModelId;
