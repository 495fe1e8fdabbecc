//! # tidings-std
//!
//! Standard implementations for the Tidings synchronous event dispatcher.
//!
//! This crate provides:
//! - **Dispatcher**: [`Dispatcher`], the registration table and synchronous dispatch
//! - **Standard handlers**: logging, conditional, named
//! - **Adapters**: [`block_on`](adapters::block_on) for async handler bodies
//! - **Value container**: [`Pair`](pair::Pair)
//! - **Testing**: probes that make dispatch order, timing and threads observable

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use tidings_core;

// Modules
pub mod adapters;
pub mod dispatcher;
pub mod handlers;
pub mod pair;
pub mod testing;

pub use dispatcher::{DispatchOutcome, Dispatcher, Registration};
