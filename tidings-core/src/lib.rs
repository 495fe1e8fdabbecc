//! # tidings-core
//!
//! Core vocabulary for the Tidings synchronous event dispatcher.
//!
//! This crate has minimal dependencies and is meant to be imported by code
//! that only needs to *write* handlers, without pulling in the dispatcher
//! implementation from `tidings-std`.
//!
//! # Dispatch Model
//!
//! A dispatch is a single straight-line walk over the handlers registered for
//! an [`EventKind`]:
//!
//! - **Synchronous**: the caller is blocked until every matched handler has
//!   returned, or one has failed.
//! - **Same thread**: handlers run on the caller's thread; nothing is handed
//!   off to a pool, task or queue.
//! - **Non-transactional**: the dispatcher forwards an "inside a unit of work"
//!   flag through the [`DispatchContext`] but never acts on it. Side effects
//!   of handlers that already ran are never undone.
//!
//! # Error Types
//!
//! - [`TidingsError`] - Top-level error type
//! - [`RegistrationError`] - Rejected registrations
//! - [`DispatchFailure`] - A handler failed during dispatch

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod context;
mod error;
mod event;
mod handler;

// Re-exports
pub use context::{DispatchContext, Payload};
pub use error::{BoxError, DispatchFailure, RegistrationError, TidingsError};
pub use event::{EventKind, SourceFilter};
pub use handler::{Handler, HandlerId};
