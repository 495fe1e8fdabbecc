//! Adapters for handlers that do asynchronous work.
//!
//! Dispatch never yields to a scheduler. An async handler is therefore driven
//! to completion on the dispatching thread with
//! [`futures::executor::block_on`], and the dispatch stays blocked until the
//! future resolves.

use std::future::Future;
use tidings_core::{BoxError, DispatchContext, Handler};

/// A handler that runs an async function to completion on the calling thread.
///
/// The function receives an owned clone of the context, so the returned
/// future does not borrow from the dispatch.
///
/// `futures::executor::block_on` panics when called from inside another
/// `futures` executor; do not dispatch through a `BlockOn` handler from within
/// such an executor.
pub struct BlockOn<F> {
    f: F,
}

impl<F> BlockOn<F> {
    /// Create a new blocking adapter.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

/// Wrap an async function as a blocking [`Handler`].
///
/// # Example
///
/// ```rust
/// use tidings_core::{DispatchContext, Payload, SourceFilter};
/// use tidings_std::{adapters::block_on, dispatcher::Dispatcher};
///
/// let dispatcher = Dispatcher::new();
/// dispatcher
///     .register_handler(
///         "after-save",
///         SourceFilter::Any,
///         block_on(|ctx: DispatchContext| async move {
///             assert_eq!(ctx.source(), "Widget");
///             Ok(())
///         }),
///     )
///     .unwrap();
///
/// dispatcher.dispatch("after-save", "Widget", Payload::new(), false).unwrap();
/// ```
pub fn block_on<F, Fut>(f: F) -> BlockOn<F>
where
    F: Fn(DispatchContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>>,
{
    BlockOn::new(f)
}

impl<F, Fut> Handler for BlockOn<F>
where
    F: Fn(DispatchContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), BoxError>>,
{
    fn handle(&self, ctx: &DispatchContext) -> Result<(), BoxError> {
        futures::executor::block_on((self.f)(ctx.clone()))
    }
}
