//! The synchronous dispatcher.
//!
//! A [`Dispatcher`] owns a registration table keyed by [`EventKind`]. Each kind
//! maps to a sequence of registrations kept in insertion order, which is also
//! the invocation order. Duplicate registrations are legal and all of them fire.
//!
//! [`Dispatcher::dispatch`] walks the matching registrations on the calling
//! thread, one at a time, and returns only after all of them completed or one
//! failed. On failure the walk stops and the caller receives a
//! [`DispatchFailure`]; whatever the earlier handlers did stays done.
//!
//! # Example
//!
//! ```rust
//! use tidings_core::{Payload, SourceFilter};
//! use tidings_std::dispatcher::Dispatcher;
//!
//! let dispatcher = Dispatcher::new();
//! dispatcher
//!     .register("created", SourceFilter::only("Widget"), |ctx| {
//!         assert_eq!(ctx.source(), "Widget");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let outcome = dispatcher.dispatch("created", "Widget", Payload::new(), false).unwrap();
//! assert_eq!(outcome.count(), 1);
//!
//! let outcome = dispatcher.dispatch("created", "Gadget", Payload::new(), false).unwrap();
//! assert!(outcome.is_noop());
//! ```

use std::{
    borrow::Cow,
    collections::HashMap,
    fmt,
    sync::{
        Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard,
        atomic::{AtomicU64, Ordering},
    },
};
use tidings_core::{
    BoxError, DispatchContext, DispatchFailure, EventKind, Handler, HandlerId, Payload,
    RegistrationError, SourceFilter,
};

/// Handle returned by [`Dispatcher::register`], used to unregister.
///
/// A handle only removes registrations from the dispatcher that issued it;
/// any other dispatcher ignores it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Registration {
    owner: u64,
    id: HandlerId,
    kind: EventKind,
}

impl Registration {
    /// The id of the registered handler.
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// The event kind the handler is registered for.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }
}

/// Result of a successful dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    invoked: Vec<HandlerId>,
}

impl DispatchOutcome {
    /// Handlers that ran, in invocation order.
    pub fn invoked(&self) -> &[HandlerId] {
        &self.invoked
    }

    /// Number of handlers that ran.
    pub fn count(&self) -> usize {
        self.invoked.len()
    }

    /// True when no registration matched. This is a normal outcome.
    pub fn is_noop(&self) -> bool {
        self.invoked.is_empty()
    }
}

struct Entry {
    id: HandlerId,
    filter: SourceFilter,
    handler: Arc<dyn Handler>,
}

type Table = HashMap<EventKind, Vec<Entry>>;

// Source of per-dispatcher tokens, so handles never match a foreign table.
static NEXT_DISPATCHER: AtomicU64 = AtomicU64::new(1);

/// Synchronous, same-thread event dispatcher.
///
/// The registration table is guarded by a read-mostly lock so a dispatcher can
/// be shared behind an `Arc`. The lock is never held while handlers run: a
/// dispatch snapshots the matching handlers first, so handlers may register,
/// unregister or dispatch on the same dispatcher. Table changes made during a
/// dispatch apply from the next dispatch on.
pub struct Dispatcher {
    name: Cow<'static, str>,
    token: u64,
    table: RwLock<Table>,
    next_id: AtomicU64,
}

impl Dispatcher {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::named("default")
    }

    /// Create an empty dispatcher with a name used in log output.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            token: NEXT_DISPATCHER.fetch_add(1, Ordering::Relaxed),
            table: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// The dispatcher's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a closure for `kind`.
    ///
    /// The handler is appended after every existing registration for the same
    /// kind. Fails without touching the table if `kind` is empty or `filter`
    /// names an empty source.
    pub fn register<F>(
        &self,
        kind: impl AsRef<str>,
        filter: SourceFilter,
        handler: F,
    ) -> Result<Registration, RegistrationError>
    where
        F: Fn(&DispatchContext) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.register_handler(kind, filter, handler)
    }

    /// Register any [`Handler`] implementation for `kind`.
    pub fn register_handler<H: Handler>(
        &self,
        kind: impl AsRef<str>,
        filter: SourceFilter,
        handler: H,
    ) -> Result<Registration, RegistrationError> {
        let kind = EventKind::new(kind)?;
        filter.validate()?;

        let id = HandlerId::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));

        #[cfg(feature = "tracing")]
        tracing::debug!(
            dispatcher = %self.name,
            kind = %kind,
            filter = %filter,
            handler = %id,
            handler_name = handler.name(),
            "registered handler"
        );

        self.write().entry(kind.clone()).or_default().push(Entry {
            id,
            filter,
            handler: Arc::new(handler),
        });

        Ok(Registration {
            owner: self.token,
            id,
            kind,
        })
    }

    /// Remove exactly the given registration.
    ///
    /// Returns `false` if it was already removed or was issued by another
    /// dispatcher. The relative order of the remaining registrations is
    /// unchanged.
    pub fn unregister(&self, registration: &Registration) -> bool {
        if registration.owner != self.token {
            return false;
        }
        let mut table = self.write();
        let Some(entries) = table.get_mut(registration.kind.as_str()) else {
            return false;
        };
        let Some(pos) = entries.iter().position(|e| e.id == registration.id) else {
            return false;
        };

        entries.remove(pos);
        if entries.is_empty() {
            table.remove(registration.kind.as_str());
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            dispatcher = %self.name,
            kind = %registration.kind,
            handler = %registration.id,
            "unregistered handler"
        );

        true
    }

    /// Dispatch an event and block until every matching handler has run.
    ///
    /// Handlers registered for `kind` whose filter is unset or equal to
    /// `source` are invoked in registration order on the calling thread. The
    /// first failure stops the dispatch and is returned as a
    /// [`DispatchFailure`]. `in_unit_of_work` is forwarded to handlers as is.
    pub fn dispatch(
        &self,
        kind: &str,
        source: &str,
        payload: Payload,
        in_unit_of_work: bool,
    ) -> Result<DispatchOutcome, DispatchFailure> {
        // No registration can exist for an invalid kind.
        let Ok(kind) = EventKind::new(kind) else {
            return Ok(DispatchOutcome::default());
        };
        let ctx = DispatchContext::new(kind, source, payload, in_unit_of_work);
        self.dispatch_context(&ctx)
    }

    /// Dispatch with a caller-built context.
    pub fn dispatch_context(&self, ctx: &DispatchContext) -> Result<DispatchOutcome, DispatchFailure> {
        let matched = self.resolve(ctx.kind().as_str(), ctx.source());
        let mut invoked = Vec::with_capacity(matched.len());

        for (id, handler) in matched {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                dispatcher = %self.name,
                kind = %ctx.kind(),
                source = ctx.source(),
                handler = %id,
                "invoking handler"
            );

            if let Err(error) = handler.handle(ctx) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    dispatcher = %self.name,
                    kind = %ctx.kind(),
                    source = ctx.source(),
                    handler = %id,
                    handler_name = handler.name(),
                    completed = invoked.len(),
                    in_unit_of_work = ctx.in_unit_of_work(),
                    error = %error,
                    "handler failed, stopping dispatch"
                );

                return Err(DispatchFailure::new(
                    ctx.kind().clone(),
                    ctx.source(),
                    id,
                    handler.name().map(str::to_owned),
                    invoked,
                    error,
                ));
            }
            invoked.push(id);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            dispatcher = %self.name,
            kind = %ctx.kind(),
            source = ctx.source(),
            invoked = invoked.len(),
            "dispatch complete"
        );

        Ok(DispatchOutcome { invoked })
    }

    /// Total number of registrations across all kinds.
    pub fn len(&self) -> usize {
        self.read().values().map(Vec::len).sum()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of registrations for `kind`, regardless of source filter.
    pub fn handler_count(&self, kind: &str) -> usize {
        self.read().get(kind).map_or(0, Vec::len)
    }

    /// Event kinds with at least one registration, sorted.
    pub fn kinds(&self) -> Vec<EventKind> {
        let mut kinds: Vec<EventKind> = self.read().keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.write().clear();
    }

    fn resolve(&self, kind: &str, source: &str) -> Vec<(HandlerId, Arc<dyn Handler>)> {
        self.read()
            .get(kind)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.filter.matches(source))
                    .map(|e| (e.id, Arc::clone(&e.handler)))
                    .collect()
            })
            .unwrap_or_default()
    }

    // Handlers never run under the lock, so a poisoned lock still holds a
    // consistent table.
    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.name)
            .field("kinds", &self.kinds())
            .field("registrations", &self.len())
            .finish()
    }
}
