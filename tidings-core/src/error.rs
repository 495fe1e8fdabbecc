//! Error types for Tidings.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`TidingsError`] - Top-level error type for all Tidings operations
//! - [`RegistrationError`] - Registrations rejected before touching the table
//! - [`DispatchFailure`] - A handler failed while an event was being dispatched

use crate::{event::EventKind, handler::HandlerId};
use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Tidings operations.
#[derive(Error, Debug)]
pub enum TidingsError {
    /// A registration was rejected.
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    /// A handler failed during dispatch.
    #[error("dispatch error: {0}")]
    Dispatch(#[from] DispatchFailure),
}

/// Errors raised by `register`. The registration table is left unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The event kind was empty or whitespace.
    #[error("event kind must not be empty")]
    EmptyEventKind,

    /// A source filter was given but names no source (empty or whitespace).
    #[error("source filter must not be empty; use `SourceFilter::Any` to match every source")]
    EmptySourceFilter,
}

/// A handler failed while an event was being dispatched.
///
/// Dispatch stops at the failing handler. Handlers listed in
/// [`completed`](Self::completed) have already run and their side effects
/// stand; the dispatcher does not roll anything back.
#[derive(Error, Debug)]
#[error(
    "handler {} failed while dispatching `{kind}` from `{source_id}` after {} handler(s) completed",
    handler_label(.handler, .handler_name),
    .completed.len()
)]
pub struct DispatchFailure {
    kind: EventKind,
    source_id: String,
    handler: HandlerId,
    handler_name: Option<String>,
    completed: Vec<HandlerId>,
    #[source]
    error: BoxError,
}

impl DispatchFailure {
    /// Create a new dispatch failure.
    pub fn new(
        kind: EventKind,
        source_id: impl Into<String>,
        handler: HandlerId,
        handler_name: Option<String>,
        completed: Vec<HandlerId>,
        error: BoxError,
    ) -> Self {
        Self {
            kind,
            source_id: source_id.into(),
            handler,
            handler_name,
            completed,
            error,
        }
    }

    /// The event kind being dispatched.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// The source the event was raised from.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// The handler that failed.
    pub fn handler(&self) -> HandlerId {
        self.handler
    }

    /// Diagnostic name of the failing handler, if it has one.
    pub fn handler_name(&self) -> Option<&str> {
        self.handler_name.as_deref()
    }

    /// Handlers that ran successfully before the failure, in invocation order.
    pub fn completed(&self) -> &[HandlerId] {
        &self.completed
    }

    /// Number of handlers that ran successfully before the failure.
    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// The error returned by the failing handler.
    pub fn error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        &*self.error
    }

    /// Unwrap into the error returned by the failing handler.
    pub fn into_inner(self) -> BoxError {
        self.error
    }
}

fn handler_label(handler: &HandlerId, name: &Option<String>) -> String {
    match name {
        Some(name) => format!("{handler} ({name})"),
        None => handler.to_string(),
    }
}
