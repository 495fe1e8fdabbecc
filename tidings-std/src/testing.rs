//! Testing utilities for Tidings.
//!
//! This module provides handlers that make the dispatch contract observable
//! from tests.
//!
//! # Features
//!
//! - [`Journal`] / [`RecordingHandler`]: record invocation order across handlers
//! - [`CountingHandler`]: count invocations
//! - [`FailingHandler`]: always fail, counting attempts
//! - [`SleepingHandler`]: block the dispatching thread for a fixed delay
//! - [`ThreadProbe`]: record which thread each invocation ran on

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    thread::{self, ThreadId},
    time::Duration,
};
use tidings_core::{BoxError, DispatchContext, Handler};

// ============================================================================
// Journal / Recording Handler
// ============================================================================

/// A shared, ordered log of labels written by [`RecordingHandler`]s.
///
/// # Example
///
/// ```rust
/// use tidings_core::{Payload, SourceFilter};
/// use tidings_std::{dispatcher::Dispatcher, testing::Journal};
///
/// let journal = Journal::new();
/// let dispatcher = Dispatcher::new();
/// dispatcher.register_handler("saved", SourceFilter::Any, journal.recorder("a")).unwrap();
/// dispatcher.register_handler("saved", SourceFilter::Any, journal.recorder("b")).unwrap();
///
/// dispatcher.dispatch("saved", "Widget", Payload::new(), false).unwrap();
/// assert_eq!(journal.entries(), vec!["a", "b"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Arc<Mutex<Vec<String>>>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handler that appends `label` to this journal.
    pub fn recorder(&self, label: impl Into<String>) -> RecordingHandler {
        RecordingHandler {
            label: label.into(),
            journal: self.clone(),
        }
    }

    /// Append a label directly, e.g. from the call site.
    pub fn record(&self, label: impl Into<String>) {
        self.entries.lock().unwrap().push(label.into());
    }

    /// Get a clone of the recorded labels.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// Number of recorded labels.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Check if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().unwrap().is_empty()
    }

    /// Clear all recorded labels.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// A handler that writes its label to a [`Journal`] on every invocation.
#[derive(Debug, Clone)]
pub struct RecordingHandler {
    label: String,
    journal: Journal,
}

impl Handler for RecordingHandler {
    fn handle(&self, _ctx: &DispatchContext) -> Result<(), BoxError> {
        self.journal.record(self.label.clone());
        Ok(())
    }

    fn name(&self) -> Option<&str> {
        Some(&self.label)
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl Handler for CountingHandler {
    fn handle(&self, _ctx: &DispatchContext) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// Failing Handler
// ============================================================================

/// A handler that always fails with a fixed message.
///
/// Clones share the attempt counter.
#[derive(Debug, Clone)]
pub struct FailingHandler {
    message: String,
    attempts: Arc<AtomicUsize>,
}

impl FailingHandler {
    /// Create a handler failing with `message`.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            attempts: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times the handler was invoked.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Handler for FailingHandler {
    fn handle(&self, _ctx: &DispatchContext) -> Result<(), BoxError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(self.message.clone().into())
    }

    fn name(&self) -> Option<&str> {
        Some("failing")
    }
}

// ============================================================================
// Sleeping Handler
// ============================================================================

/// A handler that blocks the dispatching thread for a fixed delay, then
/// succeeds.
#[derive(Debug, Clone, Copy)]
pub struct SleepingHandler {
    delay: Duration,
}

impl SleepingHandler {
    /// Create a handler sleeping for `delay`.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Handler for SleepingHandler {
    fn handle(&self, _ctx: &DispatchContext) -> Result<(), BoxError> {
        thread::sleep(self.delay);
        Ok(())
    }
}

// ============================================================================
// Thread Probe
// ============================================================================

/// A handler that records the id of the thread it ran on.
///
/// Clones share the recorded ids.
#[derive(Debug, Clone, Default)]
pub struct ThreadProbe {
    threads: Arc<Mutex<Vec<ThreadId>>>,
}

impl ThreadProbe {
    /// Create a new probe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Thread ids observed, one per invocation.
    pub fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().unwrap().clone()
    }
}

impl Handler for ThreadProbe {
    fn handle(&self, _ctx: &DispatchContext) -> Result<(), BoxError> {
        self.threads.lock().unwrap().push(thread::current().id());
        Ok(())
    }
}
