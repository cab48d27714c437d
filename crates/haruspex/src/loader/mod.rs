//! Model loading strategies.
//!
//! Every strategy implements [`ModelLoader`], the async source of a shared
//! model handle, and they compose:
//!
//! - [`SupplierLoader`] lifts a synchronous supplier onto the blocking pool
//!   and builds a fresh model per call
//! - [`MemoizedLoader`] shares exactly one construction across all callers,
//!   optionally starting it eagerly via
//!   [`preloading`](MemoizedLoader::preloading)
//! - [`PreloadedLoader`] settles the outcome up front so serving never waits
//!
//! A typical serving stack is supplier -> memoized -> (optionally) preloaded.

mod core_trait;
mod memoize;
mod preload;
mod supplier;

pub use core_trait::ModelLoader;
pub use memoize::MemoizedLoader;
pub use preload::PreloadedLoader;
pub use supplier::SupplierLoader;
