//! Logging handler for event observation.

use tidings_core::{BoxError, DispatchContext, Handler};

/// A handler that logs every context it receives.
///
/// Register it first for a kind to see each occurrence before the other
/// handlers act on it. Without the `tracing` feature it does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

impl Handler for LoggingHandler {
    fn handle(&self, ctx: &DispatchContext) -> Result<(), BoxError> {
        #[cfg(feature = "tracing")]
        {
            tracing::info!(
                kind = %ctx.kind(),
                source = ctx.source(),
                in_unit_of_work = ctx.in_unit_of_work(),
                payload = ?ctx.payload(),
                "event dispatched"
            );
        }
        #[cfg(not(feature = "tracing"))]
        {
            let _ = ctx; // Suppress unused warning
        }
        Ok(())
    }

    fn name(&self) -> Option<&str> {
        Some("logging")
    }
}
