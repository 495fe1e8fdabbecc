//! # tidings - Synchronous In-Process Event Dispatch
//!
//! `tidings` announces events to handlers registered in a [`Dispatcher`]. A
//! dispatch is a plain function call:
//!
//! - handlers run **synchronously**, one after another, and the caller is
//!   blocked until they are done;
//! - handlers run on the **caller's thread**, never on a pool or task;
//! - dispatch is **not transactional**: when a handler fails, the handlers
//!   before it have already had their effects and nothing is undone. Whether
//!   a surrounding unit of work rolls back is up to whoever manages it.
//!
//! ## Quick Start
//!
//! ```rust
//! use tidings::prelude::*;
//!
//! let dispatcher = Dispatcher::new();
//! let registration = dispatcher
//!     .register("after-save", SourceFilter::only("Widget"), |ctx| {
//!         if ctx.in_unit_of_work() {
//!             // e.g. queue the e-mail until the transaction commits
//!         }
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! let payload = Payload::new().with("id", 7_u64);
//! dispatcher.dispatch("after-save", "Widget", payload, true).unwrap();
//!
//! dispatcher.unregister(&registration);
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use tidings_core::{
    // Event vocabulary
    DispatchContext, EventKind, Payload, SourceFilter,
    // Handler
    Handler, HandlerId,
    // Error types
    BoxError, DispatchFailure, RegistrationError, TidingsError,
};

// Dispatcher
pub use tidings_std::dispatcher::{DispatchOutcome, Dispatcher, Registration};

/// Adapters for async handler bodies.
pub mod adapters {
    pub use tidings_std::adapters::{BlockOn, block_on};
}

/// Standard handler implementations.
pub mod handlers {
    pub use tidings_std::handlers::{Conditional, LoggingHandler, Named, named, when};
}

/// Two-field value container.
pub mod pair {
    pub use tidings_std::pair::{FIRST, Pair, PairEntry, PairIter, SECOND};
}

/// Testing utilities.
pub mod testing {
    pub use tidings_std::testing::{
        CountingHandler, FailingHandler, Journal, RecordingHandler, SleepingHandler, ThreadProbe,
    };
}

/// Prelude module - common imports for Tidings.
///
/// # Usage
///
/// ```rust
/// use tidings::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BoxError, DispatchContext, DispatchFailure, DispatchOutcome, Dispatcher, EventKind,
        Handler, HandlerId, Payload, Registration, RegistrationError, SourceFilter, TidingsError,
    };
}
