//! Conditional execution of handlers.
//!
//! The dispatcher never looks at the unit-of-work flag. Handlers that care
//! can be wrapped with [`when`] to decide per occurrence:
//!
//! ```rust
//! use tidings_core::{BoxError, DispatchContext, SourceFilter};
//! use tidings_std::{dispatcher::Dispatcher, handlers::when};
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher
//!     .register_handler(
//!         "after-save",
//!         SourceFilter::Any,
//!         when(
//!             |ctx: &DispatchContext| !ctx.in_unit_of_work(),
//!             |_ctx: &DispatchContext| -> Result<(), BoxError> { Ok(()) },
//!         ),
//!     )
//!     .unwrap();
//! ```

use tidings_core::{BoxError, DispatchContext, Handler};

/// A handler that only runs its inner handler when a predicate holds.
///
/// A skipped occurrence counts as a successful invocation.
pub struct Conditional<P, H> {
    predicate: P,
    inner: H,
}

impl<P, H> Conditional<P, H> {
    /// Create a new conditional handler.
    pub fn new(predicate: P, inner: H) -> Self {
        Self { predicate, inner }
    }

    /// Get a reference to the inner handler.
    pub fn inner(&self) -> &H {
        &self.inner
    }
}

/// Run `inner` only for contexts matching `predicate`.
pub fn when<P, H>(predicate: P, inner: H) -> Conditional<P, H>
where
    P: Fn(&DispatchContext) -> bool + Send + Sync + 'static,
    H: Handler,
{
    Conditional::new(predicate, inner)
}

impl<P, H> Handler for Conditional<P, H>
where
    P: Fn(&DispatchContext) -> bool + Send + Sync + 'static,
    H: Handler,
{
    fn handle(&self, ctx: &DispatchContext) -> Result<(), BoxError> {
        if (self.predicate)(ctx) {
            self.inner.handle(ctx)
        } else {
            Ok(())
        }
    }

    fn name(&self) -> Option<&str> {
        self.inner.name()
    }
}
