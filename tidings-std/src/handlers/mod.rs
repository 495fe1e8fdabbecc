//! Standard handler implementations.

pub mod conditional;
pub mod logging;
pub mod named;

pub use conditional::{Conditional, when};
pub use logging::LoggingHandler;
pub use named::{Named, named};
