//! Diagnostic names for handlers.

use std::borrow::Cow;
use tidings_core::{BoxError, DispatchContext, Handler};

/// Attaches a name to a handler. The name shows up in dispatch failures and
/// log output.
pub struct Named<H> {
    name: Cow<'static, str>,
    inner: H,
}

impl<H> Named<H> {
    /// Create a new named handler.
    pub fn new(name: impl Into<Cow<'static, str>>, inner: H) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }
}

/// Name a handler.
pub fn named<H: Handler>(name: impl Into<Cow<'static, str>>, inner: H) -> Named<H> {
    Named::new(name, inner)
}

impl<H: Handler> Handler for Named<H> {
    fn handle(&self, ctx: &DispatchContext) -> Result<(), BoxError> {
        self.inner.handle(ctx)
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }
}
