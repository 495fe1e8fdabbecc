//! # Handlers
//!
//! A handler is the unit of work a dispatcher invokes for a matching event.
//! It receives the [`DispatchContext`] by reference and either succeeds or
//! returns a [`BoxError`], which stops the dispatch.
//!
//! # Usage Patterns
//!
//! 1. **Direct closure**: `|ctx: &DispatchContext| { ...; Ok(()) }`
//! 2. **Struct implementation**: `impl Handler for MyHandler`
//!
//! Handlers run on the dispatching thread and block it until they return. A
//! handler that needs to do asynchronous work owns that concern; see the
//! blocking adapter in `tidings-std`.

use crate::{context::DispatchContext, error::BoxError};
use std::fmt;

/// Identifies a registration within one dispatcher.
///
/// Ids are handed out in increasing order and never reused by the same
/// dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Wrap a raw id.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Something a dispatcher can invoke for an event.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an event handler",
    label = "missing `Handler` implementation",
    note = "Closures must have the signature `Fn(&DispatchContext) -> Result<(), BoxError>`."
)]
pub trait Handler: Send + Sync + 'static {
    /// Handle one occurrence. Returning `Err` stops the dispatch.
    fn handle(&self, ctx: &DispatchContext) -> Result<(), BoxError>;

    /// Optional diagnostic name, reported when this handler fails.
    fn name(&self) -> Option<&str> {
        None
    }
}

// Blanket impl for closures
impl<F> Handler for F
where
    F: Fn(&DispatchContext) -> Result<(), BoxError> + Send + Sync + 'static,
{
    fn handle(&self, ctx: &DispatchContext) -> Result<(), BoxError> {
        (self)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EventKind, Payload};

    struct Audit;

    impl Handler for Audit {
        fn handle(&self, ctx: &DispatchContext) -> Result<(), BoxError> {
            if ctx.source().is_empty() {
                return Err("missing source".into());
            }
            Ok(())
        }

        fn name(&self) -> Option<&str> {
            Some("audit")
        }
    }

    fn ctx(source: &str) -> DispatchContext {
        DispatchContext::new(EventKind::new("after-save").unwrap(), source, Payload::new(), false)
    }

    #[test]
    fn test_closure_is_handler() {
        let handler = |ctx: &DispatchContext| -> Result<(), BoxError> {
            assert_eq!(ctx.kind().as_str(), "after-save");
            Ok(())
        };
        assert!(handler.handle(&ctx("Widget")).is_ok());
        assert_eq!(Handler::name(&handler), None);
    }

    #[test]
    fn test_struct_handler_as_trait_object() {
        let handler: Box<dyn Handler> = Box::new(Audit);
        assert_eq!(handler.name(), Some("audit"));
        assert!(handler.handle(&ctx("Widget")).is_ok());
        assert_eq!(
            handler.handle(&ctx("")).unwrap_err().to_string(),
            "missing source"
        );
    }

    #[test]
    fn test_handler_id_display() {
        assert_eq!(HandlerId::from_raw(12).to_string(), "#12");
        assert_eq!(HandlerId::from_raw(12).get(), 12);
    }
}
